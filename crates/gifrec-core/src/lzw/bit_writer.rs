//! LSB-first bit packing.

/// Packs variable-width codes into bytes, least significant bit first.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    acc: u32,
    bits: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append the low `width` bits of `code` (width <= 16).
    #[inline]
    pub fn write(&mut self, code: u16, width: u8) {
        debug_assert!(width <= 16);
        self.acc |= (code as u32 & ((1 << width) - 1)) << self.bits;
        self.bits += width;
        while self.bits >= 8 {
            self.bytes.push(self.acc as u8);
            self.acc >>= 8;
            self.bits -= 8;
        }
    }

    /// Flush any partial byte (zero padded) and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.bytes.push(self.acc as u8);
        }
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_pass_through() {
        let mut w = BitWriter::new();
        w.write(0xAB, 8);
        w.write(0xCD, 8);
        assert_eq!(w.finish(), vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_lsb_first_packing() {
        let mut w = BitWriter::new();
        // 3 bits of 0b101, then 5 bits of 0b11000
        w.write(0b101, 3);
        w.write(0b11000, 5);
        assert_eq!(w.finish(), vec![0b1100_0101]);
    }

    #[test]
    fn test_partial_byte_is_zero_padded() {
        let mut w = BitWriter::new();
        w.write(0b1, 1);
        w.write(0b11, 2);
        assert_eq!(w.finish(), vec![0b0000_0111]);
    }

    #[test]
    fn test_code_spanning_bytes() {
        let mut w = BitWriter::new();
        w.write(0x0FFF, 12);
        w.write(0x0000, 12);
        assert_eq!(w.finish(), vec![0xFF, 0x0F, 0x00]);
    }

    #[test]
    fn test_extra_high_bits_are_masked() {
        let mut w = BitWriter::new();
        w.write(0xFFFF, 4);
        assert_eq!(w.finish(), vec![0x0F]);
    }

    #[test]
    fn test_empty() {
        assert!(BitWriter::with_capacity(10).finish().is_empty());
    }
}
