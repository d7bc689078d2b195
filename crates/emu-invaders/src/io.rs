//! I/O port decoding.
//!
//! Inputs:  1 = controls, 2 = DIP switches + P2 controls, 3 = shift result.
//! Outputs: 2 = shift offset, 3 = sound bank 1, 4 = shift data,
//!          5 = sound bank 2, 6 = watchdog.

use crate::input::InputPort;
use crate::shift::ShiftRegister;
use crate::sound::{SoundLatch, SoundSink};

/// Value returned for ports nothing drives.
const OPEN_BUS: u8 = 0xFF;

/// Port-side state of the board.
pub struct IoPorts {
    port1: u8,
    port2: u8,
    shift: ShiftRegister,
    bank1: SoundLatch,
    bank2: SoundLatch,
}

impl IoPorts {
    #[must_use]
    pub fn new(port1: u8, port2: u8) -> Self {
        Self {
            port1,
            port2,
            shift: ShiftRegister::new(),
            bank1: SoundLatch::BANK1,
            bank2: SoundLatch::BANK2,
        }
    }

    /// IN instruction.
    pub fn read(&mut self, port: u8) -> u8 {
        match port {
            1 => self.port1,
            2 => self.port2,
            3 => self.shift.result(),
            _ => {
                log::warn!("IN from unknown port {port:#04X}");
                OPEN_BUS
            }
        }
    }

    /// OUT instruction. Sound triggers go straight to `sink`.
    pub fn write<S: SoundSink + ?Sized>(&mut self, port: u8, value: u8, sink: &mut S) {
        match port {
            2 => self.shift.set_offset(value),
            3 => self.bank1.write(value, sink),
            4 => self.shift.push(value),
            5 => self.bank2.write(value, sink),
            6 => {} // watchdog
            _ => log::warn!("OUT {value:#04X} to unknown port {port:#04X}"),
        }
    }

    /// Replace the bits of `port` selected by `mask` with those of `value`.
    pub fn set_input_bits(&mut self, port: InputPort, mask: u8, value: u8) {
        let target = match port {
            InputPort::Port1 => &mut self.port1,
            InputPort::Port2 => &mut self.port2,
        };
        *target = (*target & !mask) | (value & mask);
    }

    #[must_use]
    pub const fn port1(&self) -> u8 {
        self.port1
    }

    #[must_use]
    pub const fn port2(&self) -> u8 {
        self.port2
    }

    #[must_use]
    pub const fn shift(&self) -> &ShiftRegister {
        &self.shift
    }

    /// Last values written to the two sound ports.
    #[must_use]
    pub const fn sound_latches(&self) -> (u8, u8) {
        (self.bank1.last(), self.bank2.last())
    }

    /// Clear the shift register and sound latches. Input ports are left to
    /// the caller, which owns their power-on values.
    pub fn reset(&mut self) {
        self.shift = ShiftRegister::new();
        self.bank1.clear();
        self.bank2.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::{NullSink, SoundEvent};

    #[test]
    fn input_ports_read_back() {
        let mut io = IoPorts::new(0x01, 0x80);
        assert_eq!(io.read(1), 0x01);
        assert_eq!(io.read(2), 0x80);
    }

    #[test]
    fn set_input_bits_is_masked() {
        let mut io = IoPorts::new(0, 0b1000_0011);
        io.set_input_bits(InputPort::Port2, 0x10, 0xFF);
        assert_eq!(io.port2(), 0b1001_0011);
        io.set_input_bits(InputPort::Port2, 0x03, 0x00);
        assert_eq!(io.port2(), 0b1001_0000);
        io.set_input_bits(InputPort::Port1, 0x05, 0x04);
        assert_eq!(io.port1(), 0x04);
    }

    #[test]
    fn shift_register_through_ports() {
        let mut io = IoPorts::new(0, 0);
        let mut sink = NullSink;
        io.write(2, 0, &mut sink);
        io.write(4, 0xFF, &mut sink);
        io.write(4, 0xFF, &mut sink);
        assert_eq!(io.read(3), 0xFF);

        io.write(4, 0x01, &mut sink);
        io.write(4, 0x80, &mut sink);
        io.write(2, 7, &mut sink);
        assert_eq!(io.read(3), (((0x80u16 << 8) | 0x01) >> 1) as u8);
    }

    #[test]
    fn sound_ports_edge_trigger() {
        let mut io = IoPorts::new(0, 0);
        let mut events: Vec<SoundEvent> = Vec::new();
        io.write(3, 0x02, &mut events);
        io.write(3, 0x02, &mut events);
        io.write(5, 0x01, &mut events);
        assert_eq!(
            events,
            [
                SoundEvent { bank: 1, index: 1 },
                SoundEvent { bank: 2, index: 4 },
            ]
        );
        assert_eq!(io.sound_latches(), (0x02, 0x01));
    }

    #[test]
    fn unknown_ports_are_harmless() {
        let mut io = IoPorts::new(0x12, 0x34);
        assert_eq!(io.read(0), 0xFF);
        assert_eq!(io.read(7), 0xFF);
        io.write(6, 0xAA, &mut NullSink);
        io.write(9, 0xAA, &mut NullSink);
        assert_eq!(io.port1(), 0x12);
        assert_eq!(io.port2(), 0x34);
        assert_eq!(io.shift().offset(), 0);
    }

    #[test]
    fn reset_keeps_inputs() {
        let mut io = IoPorts::new(0x01, 0x02);
        io.write(2, 3, &mut NullSink);
        io.write(3, 0x0F, &mut NullSink);
        io.reset();
        assert_eq!(io.shift().offset(), 0);
        assert_eq!(io.sound_latches(), (0, 0));
        assert_eq!(io.port1(), 0x01);
    }
}
