//! Memory bus interface.

/// Memory bus interface.
///
/// CPUs access memory through this trait. The bus handles address decoding:
/// mirroring, write protection and unmapped regions are the bus's business,
/// never the CPU's. Accesses never fail; an address the bus doesn't decode
/// reads as whatever the hardware would float to and swallows writes.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a little-endian word: low byte at `address`, high byte at
    /// `address + 1` (wrapping at the top of the address space).
    fn read_word(&mut self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Write a little-endian word: low byte at `address`, high byte at
    /// `address + 1` (wrapping at the top of the address space).
    fn write_word(&mut self, address: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(address, lo);
        self.write(address.wrapping_add(1), hi);
    }
}

/// Flat 64K RAM bus for CPU tests.
///
/// Every address is plain read/write RAM. Port reads return the value last
/// set with [`SimpleBus::set_port`]; port writes are recorded in order so
/// tests can assert on them.
pub struct SimpleBus {
    memory: Box<[u8; 0x10000]>,
    ports: [u8; 256],
    port_writes: Vec<(u8, u8)>,
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: Box::new([0; 0x10000]),
            ports: [0; 256],
            port_writes: Vec::new(),
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            let addr = address.wrapping_add(i as u16);
            self.memory[addr as usize] = byte;
        }
    }

    /// Read memory without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    /// Set the value returned by reads of `port`.
    pub fn set_port(&mut self, port: u8, value: u8) {
        self.ports[port as usize] = value;
    }

    /// All `(port, value)` pairs written so far, oldest first.
    #[must_use]
    pub fn port_writes(&self) -> &[(u8, u8)] {
        &self.port_writes
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}

impl crate::IoBus for SimpleBus {
    fn read_io(&mut self, port: u8) -> u8 {
        self.ports[port as usize]
    }

    fn write_io(&mut self, port: u8, value: u8) {
        self.port_writes.push((port, value));
    }
}
