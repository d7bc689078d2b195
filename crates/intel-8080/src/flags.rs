//! 8080 condition flags.
//!
//! The flags are held as individual booleans and only packed into a byte
//! for PUSH PSW. The packed layout matches the processor's status byte:
//!
//! ```text
//! bit  7 6 5 4  3 2 1 0
//!      S Z 0 AC 0 P 1 CY
//! ```

/// Sign flag (bit 7) - bit 7 of the result.
pub const SF: u8 = 0b1000_0000;

/// Zero flag (bit 6) - low 8 bits of the result are zero.
pub const ZF: u8 = 0b0100_0000;

/// Auxiliary carry flag (bit 4).
pub const AF: u8 = 0b0001_0000;

/// Parity flag (bit 2) - even number of set bits in the result.
pub const PF: u8 = 0b0000_0100;

/// Carry flag (bit 0) - carry or borrow out of the result.
pub const CF: u8 = 0b0000_0001;

/// Status byte bit that always reads 1.
const ALWAYS_SET: u8 = 0b0000_0010;

/// Every flag the arithmetic group recomputes.
pub const ALL: u8 = SF | ZF | AF | PF | CF;

/// Compute parity of a byte (true if even number of 1 bits).
#[must_use]
pub const fn parity(value: u8) -> bool {
    value.count_ones().is_multiple_of(2)
}

/// The five condition flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub s: bool,
    pub z: bool,
    pub ac: bool,
    pub p: bool,
    pub cy: bool,
}

impl Flags {
    /// Recompute the flags selected by `mask` from an operation's result.
    ///
    /// `result` is the raw, unmasked arithmetic result so that CY can see
    /// values above $FF or below zero. `accumulator` is A as it was before
    /// the operation: AC is set when its low nibble is greater than the
    /// low nibble of the result. That is an approximation of the real
    /// half carry and is applied to every instruction that touches AC.
    pub fn update(&mut self, mask: u8, accumulator: u8, result: i32) {
        if mask & SF != 0 {
            self.s = result & 0x80 != 0;
        }
        if mask & ZF != 0 {
            self.z = result & 0xFF == 0;
        }
        if mask & AF != 0 {
            self.ac = i32::from(accumulator & 0x0F) > result & 0x0F;
        }
        if mask & PF != 0 {
            self.p = parity(result as u8);
        }
        if mask & CF != 0 {
            self.cy = !(0..=0xFF).contains(&result);
        }
    }

    /// Pack into the PSW status byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let mut f = ALWAYS_SET;
        if self.s {
            f |= SF;
        }
        if self.z {
            f |= ZF;
        }
        if self.ac {
            f |= AF;
        }
        if self.p {
            f |= PF;
        }
        if self.cy {
            f |= CF;
        }
        f
    }

    /// Unpack from a PSW status byte. Bits 1, 3 and 5 are ignored.
    #[must_use]
    pub const fn from_byte(f: u8) -> Self {
        Self {
            s: f & SF != 0,
            z: f & ZF != 0,
            ac: f & AF != 0,
            p: f & PF != 0,
            cy: f & CF != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_matches_popcount_for_every_byte() {
        for v in 0..=255u8 {
            let mut ones = 0;
            for bit in 0..8 {
                ones += (v >> bit) & 1;
            }
            assert_eq!(parity(v), ones % 2 == 0, "parity({v:#04X})");
        }
    }

    #[test]
    fn status_byte_has_fixed_bits() {
        assert_eq!(Flags::default().to_byte(), 0x02);
        let all = Flags {
            s: true,
            z: true,
            ac: true,
            p: true,
            cy: true,
        };
        assert_eq!(all.to_byte(), 0xD7);
    }

    #[test]
    fn status_byte_ignores_unused_bits() {
        assert_eq!(Flags::from_byte(0x28), Flags::default());
        assert_eq!(Flags::from_byte(0xFF).to_byte(), 0xD7);
    }

    #[test]
    fn carry_covers_overflow_and_borrow() {
        let mut flags = Flags::default();
        flags.update(CF, 0, 0x100);
        assert!(flags.cy);
        flags.update(CF, 0, -1);
        assert!(flags.cy);
        flags.update(CF, 0, 0xFF);
        assert!(!flags.cy);
    }

    #[test]
    fn masked_update_leaves_other_flags() {
        let mut flags = Flags {
            cy: true,
            ..Flags::default()
        };
        flags.update(SF | ZF | PF, 0, 0);
        assert!(flags.z);
        assert!(flags.p);
        assert!(!flags.s);
        assert!(flags.cy, "carry untouched when not in mask");
    }

    #[test]
    fn auxiliary_carry_compares_low_nibbles() {
        let mut flags = Flags::default();
        // 0x0F + 0x01 = 0x10: accumulator nibble F > result nibble 0.
        flags.update(AF, 0x0F, 0x10);
        assert!(flags.ac);
        // 0x01 + 0x01 = 0x02: 1 > 2 is false.
        flags.update(AF, 0x01, 0x02);
        assert!(!flags.ac);
        // Borrow result: 0x00 - 0x01 = -1, low nibble F.
        flags.update(AF, 0x00, -1);
        assert!(!flags.ac);
    }
}
