//! Space Invaders arcade board emulator.
//!
//! Midway's 1978 board: an Intel 8080 at 2 MHz, 8K of ROM, 1K of work RAM,
//! 7K of bitmapped video RAM, a hardware shift register and a bank of
//! discrete sound circuits. The video hardware interrupts the CPU twice a
//! frame.
//!
//! The core is headless. A front end reads video RAM, writes input bits,
//! and receives sound triggers through a [`SoundSink`].

mod bus;
mod config;
mod error;
pub mod input;
mod interrupt;
mod invaders;
mod io;
pub mod memory;
mod shift;
pub mod sound;

pub use bus::InvadersBus;
pub use config::InvadersConfig;
pub use error::LoadError;
pub use input::{Button, DipSwitches, InputPort, ShipCount};
pub use interrupt::{Beam, InterruptController};
pub use invaders::{CHIP_SIZE, HISCORE_ADDR, HISCORE_ROM_ADDR, Invaders, ROM_CHIPS};
pub use io::IoPorts;
pub use memory::InvadersMemory;
pub use shift::ShiftRegister;
pub use sound::{NullSink, Sound, SoundEvent, SoundSink};
