//! Writers for the individual GIF89a blocks.
//!
//! Every function appends exactly one block (or the signature/trailer) to the
//! sink. Multi-byte integers are little-endian.

use std::io::{self, Write};

use crate::quantize::Palette;

pub const SIGNATURE: &[u8; 6] = b"GIF89a";
pub const EXTENSION_INTRODUCER: u8 = 0x21;
pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
pub const APPLICATION_LABEL: u8 = 0xFF;
pub const IMAGE_SEPARATOR: u8 = 0x2C;
pub const TRAILER: u8 = 0x3B;

/// Application identifier and authentication code of the loop extension.
const NETSCAPE_ID: &[u8; 11] = b"NETSCAPE2.0";

/// Color resolution field of the screen descriptor: 8 bits per primary.
const COLOR_RESOLUTION: u8 = 0x70;
const TABLE_PRESENT: u8 = 0x80;

/// Fields of a Graphic Control Extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicControl {
    /// Disposal method, already reduced to 3 bits.
    pub disposal: u8,
    /// Delay in centiseconds.
    pub delay: u16,
    pub transparent_index: Option<u8>,
}

/// Fields of an Image Descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    /// Size field of the local color table that follows, if any.
    pub local_table_bits: Option<u8>,
}

fn write_u16<W: Write>(w: &mut W, value: u16) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

pub fn write_signature<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SIGNATURE)
}

/// Logical Screen Descriptor declaring a global color table of
/// `2^(table_bits + 1)` entries.
pub fn write_screen_descriptor<W: Write>(
    w: &mut W,
    width: u16,
    height: u16,
    table_bits: u8,
) -> io::Result<()> {
    write_u16(w, width)?;
    write_u16(w, height)?;
    // global table present, 8-bit resolution, unsorted
    w.write_all(&[TABLE_PRESENT | COLOR_RESOLUTION | (table_bits & 0x07)])?;
    // background color index, pixel aspect ratio
    w.write_all(&[0, 0])
}

pub fn write_color_table<W: Write>(w: &mut W, palette: &Palette) -> io::Result<()> {
    w.write_all(&palette.to_table_bytes())
}

/// Netscape application extension; `repeat` 0 loops forever.
pub fn write_loop_extension<W: Write>(w: &mut W, repeat: u16) -> io::Result<()> {
    w.write_all(&[EXTENSION_INTRODUCER, APPLICATION_LABEL, NETSCAPE_ID.len() as u8])?;
    w.write_all(NETSCAPE_ID)?;
    // sub-block: loop sub-block id, count, terminator
    w.write_all(&[3, 1])?;
    write_u16(w, repeat)?;
    w.write_all(&[0])
}

pub fn write_graphic_control<W: Write>(w: &mut W, gce: &GraphicControl) -> io::Result<()> {
    w.write_all(&[EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, 4])?;
    let transparent_flag = u8::from(gce.transparent_index.is_some());
    // reserved bits and user input flag stay zero
    w.write_all(&[((gce.disposal & 0x07) << 2) | transparent_flag])?;
    write_u16(w, gce.delay)?;
    w.write_all(&[gce.transparent_index.unwrap_or(0), 0])
}

pub fn write_image_descriptor<W: Write>(w: &mut W, desc: &ImageDescriptor) -> io::Result<()> {
    w.write_all(&[IMAGE_SEPARATOR])?;
    write_u16(w, desc.left)?;
    write_u16(w, desc.top)?;
    write_u16(w, desc.width)?;
    write_u16(w, desc.height)?;
    // not interlaced, unsorted
    let packed = match desc.local_table_bits {
        Some(bits) => TABLE_PRESENT | (bits & 0x07),
        None => 0,
    };
    w.write_all(&[packed])
}

pub fn write_trailer<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(&[TRAILER])
}
