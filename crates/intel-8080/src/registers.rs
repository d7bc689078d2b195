//! 8080 register set.

use crate::flags::Flags;

/// Everything the program can see: seven 8-bit registers, the condition
/// flags, PC, SP and the interrupt-enable latch.
///
/// BC, DE and HL are views over the 8-bit registers, not separate storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,

    pub flags: Flags,

    pub sp: u16,
    pub pc: u16,

    /// INTE flip-flop. Set by EI, cleared by DI and by accepting an interrupt.
    pub inte: bool,
}

impl Registers {
    /// Get BC register pair.
    #[must_use]
    pub const fn bc(&self) -> u16 {
        (self.b as u16) << 8 | self.c as u16
    }

    /// Get DE register pair.
    #[must_use]
    pub const fn de(&self) -> u16 {
        (self.d as u16) << 8 | self.e as u16
    }

    /// Get HL register pair.
    #[must_use]
    pub const fn hl(&self) -> u16 {
        (self.h as u16) << 8 | self.l as u16
    }

    /// Get the processor status word: A in the high byte, packed flags low.
    #[must_use]
    pub const fn psw(&self) -> u16 {
        (self.a as u16) << 8 | self.flags.to_byte() as u16
    }

    /// Set BC register pair.
    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    /// Set DE register pair.
    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    /// Set HL register pair.
    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    /// Set A and the flags from a processor status word.
    pub fn set_psw(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.flags = Flags::from_byte(value as u8);
    }
}
