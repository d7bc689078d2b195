//! Board bus: memory and I/O routing.
//!
//! The bus connects the 8080 to memory, the port hardware and the sound
//! sink. The CPU reaches all of them through `Bus` and `IoBus`.

use emu_core::{Bus, IoBus};

use crate::io::IoPorts;
use crate::memory::InvadersMemory;
use crate::sound::SoundSink;

/// The board bus, implementing `emu_core::IoBus`.
pub struct InvadersBus<S> {
    pub memory: InvadersMemory,
    pub io: IoPorts,
    pub sound: S,
}

impl<S: SoundSink> InvadersBus<S> {
    #[must_use]
    pub fn new(memory: InvadersMemory, io: IoPorts, sound: S) -> Self {
        Self { memory, io, sound }
    }
}

impl<S: SoundSink> Bus for InvadersBus<S> {
    fn read(&mut self, address: u16) -> u8 {
        self.memory.read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory.write(address, value);
    }
}

impl<S: SoundSink> IoBus for InvadersBus<S> {
    fn read_io(&mut self, port: u8) -> u8 {
        self.io.read(port)
    }

    fn write_io(&mut self, port: u8, value: u8) {
        self.io.write(port, value, &mut self.sound);
    }
}
