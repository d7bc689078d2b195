//! Machine abstraction for emulated systems.
//!
//! A machine owns its CPU, memory and peripherals and is driven from
//! outside by a front end that decides when to run and for how long. The
//! core never paces itself against real time.

/// Video memory layout exposed to an external renderer.
#[derive(Debug, Clone, Copy)]
pub struct VideoConfig {
    /// Raster width in pixels, as stored in video memory.
    pub width: u32,
    /// Raster height in pixels, as stored in video memory.
    pub height: u32,
    /// Frame rate in frames per second.
    pub fps: u32,
}

/// Trait for emulated machines.
///
/// Provides the scheduling interface a front end needs without knowing
/// the machine's hardware.
pub trait Machine {
    /// Get the video memory configuration.
    fn video_config(&self) -> VideoConfig;

    /// Run one frame's worth of cycles. Returns cycles executed.
    fn run_frame(&mut self) -> u64;

    /// Run for `millis` milliseconds of emulated time. Returns cycles
    /// executed, which may overshoot the budget by part of one instruction.
    fn advance_millis(&mut self, millis: u64) -> u64;

    /// Reset the machine to its power-on state. Loaded ROM is kept.
    fn reset(&mut self);
}
