//! Top-level Space Invaders system.
//!
//! The 8080 runs at 2 MHz. The video hardware interrupts twice per 60 Hz
//! frame: RST 1 when the beam reaches mid-screen, RST 2 at the end of the
//! screen. Nothing else is clocked; the shift register and sound latches
//! only change on OUT instructions.
//!
//! # Scheduling
//!
//! `advance_millis()` and `run_frame()` turn a time budget into a cycle
//! count and step the CPU until it is reached. The last instruction may
//! overshoot. Each call computes its own target, so overshoot is not
//! carried into the next one.

use std::path::Path;

use emu_core::{
    Cpu, Machine, MasterClock, Observable, Ticks, Value, VideoConfig, parse_address,
};
use intel_8080::I8080;

use crate::bus::InvadersBus;
use crate::config::InvadersConfig;
use crate::error::LoadError;
use crate::input::{Button, COIN_INFO_MASK, EXTRA_SHIP_MASK, InputPort, SHIPS_MASK, ShipCount};
use crate::interrupt::{Beam, InterruptController};
use crate::io::IoPorts;
use crate::memory::{InvadersMemory, VRAM_SIZE, VRAM_START};
use crate::sound::{NullSink, SoundSink};

/// Video RAM raster as stored: 256 pixels per row, 224 rows. The monitor
/// is rotated 90 degrees anticlockwise in the cabinet.
const VIDEO_WIDTH: u32 = 256;
const VIDEO_HEIGHT: u32 = 224;

/// Work RAM address of the high score (two BCD bytes, low first).
pub const HISCORE_ADDR: u16 = 0x20F4;
/// ROM address the game copies the high score from at power-on.
pub const HISCORE_ROM_ADDR: u16 = 0x1BF4;

/// ROM chip file names and load addresses, in ROM order.
pub const ROM_CHIPS: [(&str, u16); 4] = [
    ("invaders.h", 0x0000),
    ("invaders.g", 0x0800),
    ("invaders.f", 0x1000),
    ("invaders.e", 0x1800),
];
/// Capacity of one ROM socket.
pub const CHIP_SIZE: usize = 0x0800;

/// Space Invaders arcade board.
pub struct Invaders<S: SoundSink = NullSink> {
    cpu: I8080,
    bus: InvadersBus<S>,
    interrupts: InterruptController,
    clock: MasterClock,
    config: InvadersConfig,
    /// Completed frames (end-of-screen interrupts) since reset.
    frame_count: u64,
}

impl Invaders<NullSink> {
    /// Create a board that discards sound events.
    #[must_use]
    pub fn new(config: InvadersConfig) -> Self {
        Self::with_sound_sink(config, NullSink)
    }
}

impl<S: SoundSink> Invaders<S> {
    /// Create a board that delivers sound events to `sink`.
    ///
    /// All RAM and registers are zero and ROM is empty. Load a program
    /// before running.
    pub fn with_sound_sink(config: InvadersConfig, sink: S) -> Self {
        let io = IoPorts::new(0, config.dip_switches.port2_bits());
        let bus = InvadersBus::new(InvadersMemory::new(), io, sink);

        Self {
            cpu: I8080::new(),
            bus,
            interrupts: InterruptController::new(
                config.cycles_per_half_frame(),
                config.interrupt_vectors,
            ),
            clock: MasterClock::new(config.clock_hz),
            config,
            frame_count: 0,
        }
    }

    /// Copy a program image into ROM at `start`.
    ///
    /// # Errors
    ///
    /// Fails if `start` is outside ROM or the image runs past its end.
    /// Nothing is written on failure.
    pub fn load_program(&mut self, bytes: &[u8], start: u16) -> Result<(), LoadError> {
        self.bus.memory.load_rom(start, bytes)?;
        log::debug!("loaded {} bytes at {start:#06X}", bytes.len());
        Ok(())
    }

    /// Load the four 2K chips (H, G, F, E) at their socket addresses.
    ///
    /// # Errors
    ///
    /// Fails if any chip is larger than its socket. Chips are checked
    /// before any is loaded.
    pub fn load_rom_set(&mut self, chips: [&[u8]; 4]) -> Result<(), LoadError> {
        for (data, (name, _)) in chips.iter().zip(ROM_CHIPS) {
            if data.len() > CHIP_SIZE {
                return Err(LoadError::ChipTooLarge {
                    chip: name,
                    len: data.len(),
                    capacity: CHIP_SIZE,
                });
            }
        }
        for (data, (_, start)) in chips.iter().zip(ROM_CHIPS) {
            self.load_program(data, start)?;
        }
        Ok(())
    }

    /// Read `invaders.h`, `.g`, `.f` and `.e` from `dir` and load them.
    ///
    /// # Errors
    ///
    /// Fails if a file is missing or unreadable, or too large for its
    /// socket.
    pub fn load_rom_dir(&mut self, dir: &Path) -> Result<(), LoadError> {
        let mut images = Vec::with_capacity(ROM_CHIPS.len());
        for (name, _) in ROM_CHIPS {
            let path = dir.join(name);
            let data = std::fs::read(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            images.push(data);
        }
        self.load_rom_set([
            images[0].as_slice(),
            images[1].as_slice(),
            images[2].as_slice(),
            images[3].as_slice(),
        ])?;
        log::info!("loaded ROM set from {}", dir.display());
        Ok(())
    }

    /// Execute one instruction, then let the video hardware interrupt.
    /// Returns cycles consumed by the instruction.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        if self.interrupts.check(&mut self.cpu, &mut self.bus) == Some(Beam::EndOfScreen) {
            self.frame_count += 1;
        }
        cycles
    }

    /// Step until at least `budget` cycles have run. Returns cycles run.
    fn run_cycles(&mut self, budget: Ticks) -> u64 {
        let mut elapsed = Ticks::ZERO;
        while elapsed < budget {
            elapsed += self.step();
        }
        elapsed.get()
    }

    /// The video RAM window, $2400-$3FFF: 32 bytes per 256-pixel row,
    /// least significant bit leftmost.
    #[must_use]
    pub fn video_ram(&self) -> &[u8] {
        self.bus.memory.video_ram()
    }

    /// A slice of video RAM, clamped to the window.
    #[must_use]
    pub fn read_video_memory(&self, offset: usize, len: usize) -> &[u8] {
        let vram = self.video_ram();
        let start = offset.min(VRAM_SIZE);
        let end = start.saturating_add(len).min(VRAM_SIZE);
        &vram[start..end]
    }

    /// Address of the first video RAM byte.
    #[must_use]
    pub const fn video_ram_start(&self) -> u16 {
        VRAM_START
    }

    /// Replace the bits of an input port selected by `mask`.
    pub fn set_input_bits(&mut self, port: InputPort, mask: u8, value: u8) {
        self.bus.io.set_input_bits(port, mask, value);
    }

    pub fn press(&mut self, button: Button) {
        let (port, mask) = button.wiring();
        self.set_input_bits(port, mask, mask);
    }

    pub fn release(&mut self, button: Button) {
        let (port, mask) = button.wiring();
        self.set_input_bits(port, mask, 0);
    }

    pub fn set_ship_count(&mut self, ships: ShipCount) {
        self.config.dip_switches.ships = ships;
        self.set_input_bits(InputPort::Port2, SHIPS_MASK, ships.bits());
    }

    /// Extra ship at 1000 points instead of 1500.
    pub fn set_extra_ship_at_1000(&mut self, on: bool) {
        self.config.dip_switches.extra_ship_at_1000 = on;
        self.set_input_bits(InputPort::Port2, EXTRA_SHIP_MASK, if on { 0xFF } else { 0 });
    }

    /// Hide the coin info in attract mode.
    pub fn set_coin_info_hidden(&mut self, on: bool) {
        self.config.dip_switches.coin_info_hidden = on;
        self.set_input_bits(InputPort::Port2, COIN_INFO_MASK, if on { 0xFF } else { 0 });
    }

    /// The two high-score bytes from work RAM.
    #[must_use]
    pub fn hiscore(&self) -> [u8; 2] {
        [
            self.bus.memory.read(HISCORE_ADDR),
            self.bus.memory.read(HISCORE_ADDR + 1),
        ]
    }

    /// Seed the high score. The game copies it from ROM into RAM when it
    /// initialises, so this takes effect at the next reset.
    pub fn set_hiscore(&mut self, bytes: [u8; 2]) {
        self.bus.memory.patch_rom(HISCORE_ROM_ADDR, &bytes);
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn config(&self) -> &InvadersConfig {
        &self.config
    }

    #[must_use]
    pub fn cpu(&self) -> &I8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut I8080 {
        &mut self.cpu
    }

    #[must_use]
    pub fn bus(&self) -> &InvadersBus<S> {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut InvadersBus<S> {
        &mut self.bus
    }

    #[must_use]
    pub fn sound_sink(&self) -> &S {
        &self.bus.sound
    }

    pub fn sound_sink_mut(&mut self) -> &mut S {
        &mut self.bus.sound
    }
}

impl<S: SoundSink> Machine for Invaders<S> {
    fn video_config(&self) -> VideoConfig {
        VideoConfig {
            width: VIDEO_WIDTH,
            height: VIDEO_HEIGHT,
            fps: self.config.fps,
        }
    }

    fn run_frame(&mut self) -> u64 {
        let budget = self.clock.ticks_per_frame(self.config.frame_rate());
        self.run_cycles(budget)
    }

    fn advance_millis(&mut self, millis: u64) -> u64 {
        let budget = self.clock.ticks_for_millis(millis);
        self.run_cycles(budget)
    }

    /// Power-on state: CPU, RAM, shift register and sound latches cleared,
    /// inputs released, DIP switches reapplied. ROM is kept.
    fn reset(&mut self) {
        self.cpu.reset();
        self.bus.memory.clear_ram();
        self.bus.io.reset();
        self.bus.io.set_input_bits(InputPort::Port1, 0xFF, 0);
        self.bus
            .io
            .set_input_bits(InputPort::Port2, 0xFF, self.config.dip_switches.port2_bits());
        self.interrupts.reset();
        self.frame_count = 0;
    }
}

impl<S: SoundSink> Observable for Invaders<S> {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("memory.") {
            parse_address(rest).map(|addr| Value::U8(self.bus.memory.read(addr)))
        } else if let Some(rest) = path.strip_prefix("io.") {
            match rest {
                "port1" => Some(self.bus.io.port1().into()),
                "port2" => Some(self.bus.io.port2().into()),
                "shift_offset" => Some(self.bus.io.shift().offset().into()),
                _ => None,
            }
        } else {
            match path {
                "frame_count" => Some(self.frame_count.into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<i8080_paths>",
            "memory.<address>",
            "io.port1",
            "io.port2",
            "io.shift_offset",
            "frame_count",
        ]
    }
}
