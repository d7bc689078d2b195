//! Dedicated shift register (MB14241).
//!
//! The game writes bytes into the top of a 16-bit register and reads back
//! an 8-bit window at a programmable offset, which is how it shifts sprites
//! horizontally without doing it on the 8080.

/// 16-bit shift register with a 3-bit read offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftRegister {
    msb: u8,
    lsb: u8,
    offset: u8,
}

impl ShiftRegister {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            msb: 0,
            lsb: 0,
            offset: 0,
        }
    }

    /// Port 2 write: set the read offset from the low three bits.
    pub fn set_offset(&mut self, value: u8) {
        self.offset = value & 0x07;
    }

    /// Port 4 write: the old top byte moves down, the new byte goes on top.
    pub fn push(&mut self, value: u8) {
        self.lsb = self.msb;
        self.msb = value;
    }

    /// Port 3 read: the 8 bits starting `offset` bits below the top.
    #[must_use]
    pub const fn result(&self) -> u8 {
        let word = (self.msb as u16) << 8 | self.lsb as u16;
        (word >> (8 - self.offset)) as u8
    }

    #[must_use]
    pub const fn offset(&self) -> u8 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_reads_top_byte() {
        let mut shift = ShiftRegister::new();
        shift.push(0xFF);
        shift.push(0xFF);
        assert_eq!(shift.result(), 0xFF);

        shift.push(0x12);
        assert_eq!(shift.result(), 0x12);
    }

    #[test]
    fn offset_slides_window() {
        let mut shift = ShiftRegister::new();
        shift.push(0x01);
        shift.push(0x80);
        shift.set_offset(7);
        assert_eq!(shift.result(), (((0x80u16 << 8) | 0x01) >> 1) as u8);
        assert_eq!(shift.result(), 0x00);

        shift.set_offset(1);
        // 0x8001 >> 7 = 0x0100 -> low byte 0x00; bit 15 lands at bit 8.
        assert_eq!(shift.result(), 0x00);

        shift.push(0xC3);
        // word = 0xC380, offset 1 -> 0xC380 >> 7 = 0x0187 -> 0x87
        assert_eq!(shift.result(), 0x87);
    }

    #[test]
    fn offset_uses_low_three_bits() {
        let mut shift = ShiftRegister::new();
        shift.set_offset(0xFD);
        assert_eq!(shift.offset(), 5);
    }
}
