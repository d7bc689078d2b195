//! Board memory map.
//!
//! Layout:
//! - $0000-$1FFF: ROM (writes ignored)
//! - $2000-$23FF: Work RAM
//! - $2400-$3FFF: Video RAM
//! - $4000-$5FFF: Mirror of $2000-$3FFF
//! - $6000-$FFFF: Unmapped (reads 0, writes ignored)

use crate::error::LoadError;

/// Size of the ROM region.
pub const ROM_SIZE: usize = 0x2000;
/// First RAM address.
pub const RAM_START: u16 = 0x2000;
/// Size of RAM, video RAM included.
pub const RAM_SIZE: usize = 0x2000;
/// First video RAM address.
pub const VRAM_START: u16 = 0x2400;
/// Size of video RAM: 256 x 224 pixels at one bit each.
pub const VRAM_SIZE: usize = 0x1C00;
/// First address of the RAM mirror.
pub const MIRROR_START: u16 = 0x4000;
/// Distance between a mirror address and the RAM byte it aliases.
pub const MIRROR_SPAN: u16 = 0x2000;
/// First address above the physical map.
pub const UNMAPPED_START: u16 = 0x6000;

/// Where an address lands after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Rom(usize),
    Ram(usize),
    Unmapped,
}

fn decode(addr: u16) -> Target {
    let addr = if (MIRROR_START..UNMAPPED_START).contains(&addr) {
        addr - MIRROR_SPAN
    } else {
        addr
    };
    match addr {
        0x0000..=0x1FFF => Target::Rom(addr as usize),
        0x2000..=0x3FFF => Target::Ram((addr - RAM_START) as usize),
        _ => Target::Unmapped,
    }
}

/// 8K ROM + 8K RAM with the board's mirroring.
pub struct InvadersMemory {
    rom: [u8; ROM_SIZE],
    ram: [u8; RAM_SIZE],
}

impl InvadersMemory {
    /// Create memory with ROM and RAM zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rom: [0; ROM_SIZE],
            ram: [0; RAM_SIZE],
        }
    }

    /// Read a byte. Reads never have side effects.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        match decode(addr) {
            Target::Rom(offset) => self.rom[offset],
            Target::Ram(offset) => self.ram[offset],
            Target::Unmapped => 0,
        }
    }

    /// Write a byte. ROM and unmapped writes are silently ignored.
    pub fn write(&mut self, addr: u16, value: u8) {
        if let Target::Ram(offset) = decode(addr) {
            self.ram[offset] = value;
        }
    }

    /// Copy `data` into ROM at `start`.
    pub fn load_rom(&mut self, start: u16, data: &[u8]) -> Result<(), LoadError> {
        let offset = start as usize;
        if offset >= ROM_SIZE {
            return Err(LoadError::OutOfRange { start });
        }
        if data.len() > ROM_SIZE - offset {
            return Err(LoadError::TooLarge {
                start,
                len: data.len(),
                rom_end: (ROM_SIZE - 1) as u16,
            });
        }
        self.rom[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// The ROM image. Index is the CPU address.
    #[must_use]
    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    /// Patch ROM bytes, bypassing write protection. Bytes past the end of
    /// ROM are dropped.
    pub fn patch_rom(&mut self, start: u16, data: &[u8]) {
        let offset = (start as usize).min(ROM_SIZE);
        let len = data.len().min(ROM_SIZE - offset);
        self.rom[offset..offset + len].copy_from_slice(&data[..len]);
    }

    /// Video RAM, $2400-$3FFF.
    #[must_use]
    pub fn video_ram(&self) -> &[u8] {
        let start = (VRAM_START - RAM_START) as usize;
        &self.ram[start..start + VRAM_SIZE]
    }

    /// Zero RAM. ROM is kept.
    pub fn clear_ram(&mut self) {
        self.ram.fill(0);
    }
}

impl Default for InvadersMemory {
    fn default() -> Self {
        Self::new()
    }
}
