use crate::Bus;

/// A bus that also supports a separate I/O port space.
///
/// The 8080 has a 256-port I/O space reached only through the IN and OUT
/// instructions. The port number is the byte following the opcode, so
/// ports are 8 bits wide. Machines built around the 8080 decode these
/// ports to their own hardware (input latches, shifters, sound triggers).
pub trait IoBus: Bus {
    /// Read a byte from the given I/O port (IN instruction).
    fn read_io(&mut self, port: u8) -> u8;

    /// Write a byte to the given I/O port (OUT instruction).
    fn write_io(&mut self, port: u8, value: u8);
}
