//! Helpers shared by tests: a structural walker over GIF bytes and a thin
//! wrapper around the `gif` crate used as the reference decoder.

use crate::lzw::write_sub_blocks;

/// One top-level block of a GIF stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Header,
    ScreenDescriptor { width: u16, height: u16, packed: u8 },
    GlobalColorTable(Vec<u8>),
    LoopExtension { repeat: u16 },
    GraphicControl { packed: u8, delay: u16, transparent: u8 },
    ImageDescriptor { x: u16, y: u16, width: u16, height: u16, packed: u8 },
    LocalColorTable(Vec<u8>),
    ImageData { min_code_size: u8, sub_blocks: Vec<usize> },
    Trailer,
}

fn le16(bytes: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
}

/// Read sub-blocks at `pos`, returning their lengths, their joined payload and
/// the position after the terminator.
fn read_sub_blocks(bytes: &[u8], mut pos: usize) -> (Vec<usize>, Vec<u8>, usize) {
    let mut lengths = Vec::new();
    let mut payload = Vec::new();
    loop {
        let len = bytes[pos] as usize;
        lengths.push(len);
        pos += 1;
        if len == 0 {
            return (lengths, payload, pos);
        }
        payload.extend_from_slice(&bytes[pos..pos + len]);
        pos += len;
    }
}

/// Split a GIF stream into its blocks, asserting basic well-formedness.
pub fn parse_blocks(bytes: &[u8]) -> Vec<Block> {
    assert_eq!(&bytes[..6], b"GIF89a", "missing signature");
    let mut blocks = vec![Block::Header];

    let packed = bytes[10];
    blocks.push(Block::ScreenDescriptor {
        width: le16(bytes, 6),
        height: le16(bytes, 8),
        packed,
    });
    let mut pos = 13;
    if packed & 0x80 != 0 {
        let len = 3 * (2usize << (packed & 0x07));
        blocks.push(Block::GlobalColorTable(bytes[pos..pos + len].to_vec()));
        pos += len;
    }

    loop {
        match bytes[pos] {
            0x21 => match bytes[pos + 1] {
                0xF9 => {
                    assert_eq!(bytes[pos + 2], 4, "graphic control size");
                    assert_eq!(bytes[pos + 7], 0, "graphic control terminator");
                    blocks.push(Block::GraphicControl {
                        packed: bytes[pos + 3],
                        delay: le16(bytes, pos + 4),
                        transparent: bytes[pos + 6],
                    });
                    pos += 8;
                }
                0xFF => {
                    let size = bytes[pos + 2] as usize;
                    let id = bytes[pos + 3..pos + 3 + size].to_vec();
                    let (_, payload, next) = read_sub_blocks(bytes, pos + 3 + size);
                    if id == b"NETSCAPE2.0" && payload.first() == Some(&1) {
                        blocks.push(Block::LoopExtension {
                            repeat: le16(&payload, 1),
                        });
                    }
                    pos = next;
                }
                _ => {
                    let size = bytes[pos + 2] as usize;
                    let (_, _, next) = read_sub_blocks(bytes, pos + 3 + size);
                    pos = next;
                }
            },
            0x2C => {
                let packed = bytes[pos + 9];
                blocks.push(Block::ImageDescriptor {
                    x: le16(bytes, pos + 1),
                    y: le16(bytes, pos + 3),
                    width: le16(bytes, pos + 5),
                    height: le16(bytes, pos + 7),
                    packed,
                });
                pos += 10;
                if packed & 0x80 != 0 {
                    let len = 3 * (2usize << (packed & 0x07));
                    blocks.push(Block::LocalColorTable(bytes[pos..pos + len].to_vec()));
                    pos += len;
                }
                let min_code_size = bytes[pos];
                let (sub_blocks, _, next) = read_sub_blocks(bytes, pos + 1);
                blocks.push(Block::ImageData {
                    min_code_size,
                    sub_blocks,
                });
                pos = next;
            }
            0x3B => {
                blocks.push(Block::Trailer);
                assert_eq!(pos + 1, bytes.len(), "bytes after trailer");
                return blocks;
            }
            other => panic!("unexpected block introducer {:#04x} at {}", other, pos),
        }
    }
}

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Count blocks matching a predicate.
pub fn count(blocks: &[Block], pred: impl Fn(&Block) -> bool) -> usize {
    blocks.iter().filter(|b| pred(b)).count()
}

#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub delay: u16,
    pub dispose: gif::DisposalMethod,
    pub transparent: Option<u8>,
    pub palette: Option<Vec<u8>>,
    pub indices: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DecodedGif {
    pub width: u16,
    pub height: u16,
    pub global_palette: Option<Vec<u8>>,
    pub repeat: gif::Repeat,
    pub frames: Vec<DecodedFrame>,
}

impl DecodedGif {
    /// RGB color of pixel `i` of frame `n`, resolved through its palette.
    pub fn rgb(&self, n: usize, i: usize) -> [u8; 3] {
        let frame = &self.frames[n];
        let palette = frame
            .palette
            .as_ref()
            .or(self.global_palette.as_ref())
            .expect("frame has no palette");
        let idx = frame.indices[i] as usize * 3;
        [palette[idx], palette[idx + 1], palette[idx + 2]]
    }
}

/// Decode with the `gif` crate, keeping palette indices.
pub fn decode(bytes: &[u8]) -> DecodedGif {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(bytes).expect("reference decoder rejected header");

    let width = decoder.width();
    let height = decoder.height();
    let global_palette = decoder.global_palette().map(|p| p.to_vec());

    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().expect("reference decoder rejected frame") {
        frames.push(DecodedFrame {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            delay: frame.delay,
            dispose: frame.dispose,
            transparent: frame.transparent,
            palette: frame.palette.clone(),
            indices: frame.buffer.to_vec(),
        });
    }

    DecodedGif {
        width,
        height,
        global_palette,
        repeat: decoder.repeat(),
        frames,
    }
}

/// Wrap already framed image data (code size byte + sub-blocks) in a minimal
/// single-frame GIF with a 256-entry grey global table.
pub fn single_frame_gif(width: u32, height: u32, image_data: &[u8]) -> Vec<u8> {
    let (w, h) = (width as u16, height as u16);
    let mut out = b"GIF89a".to_vec();
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&[0xF7, 0, 0]);
    for i in 0..=255u8 {
        out.extend_from_slice(&[i, i, i]);
    }
    out.push(0x2C);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.push(0);
    out.extend_from_slice(image_data);
    out.push(0x3B);
    out
}

#[test]
fn test_parse_blocks_minimal_stream() {
    let mut data = vec![8];
    write_sub_blocks(&crate::lzw::compress(&[0], 8), &mut data);
    let bytes = single_frame_gif(1, 1, &data);
    let blocks = parse_blocks(&bytes);
    assert_eq!(blocks[0], Block::Header);
    assert!(matches!(blocks[2], Block::GlobalColorTable(ref t) if t.len() == 768));
    assert_eq!(blocks.last(), Some(&Block::Trailer));
    assert_eq!(decode(&bytes).frames[0].indices, vec![0]);
}
