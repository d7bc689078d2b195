//! CPU core trait.

use crate::IoBus;

/// A CPU that executes whole instructions.
///
/// The bus is passed in, not owned, so the machine can keep its memory and
/// peripherals in one place and hand them to the CPU for each step.
///
/// The type parameter `B` is the bus type this CPU operates on.
pub trait Cpu<B: IoBus> {
    /// Execute one instruction. Returns cycles consumed.
    fn step(&mut self, bus: &mut B) -> u32;

    /// Reset the CPU to its power-on state.
    fn reset(&mut self);

    /// Request a maskable interrupt that restarts at `vector`.
    ///
    /// Returns true if the CPU accepted it. A CPU with interrupts disabled
    /// drops the request; nothing is latched.
    fn interrupt(&mut self, bus: &mut B, vector: u16) -> bool;

    /// Get the current program counter.
    fn pc(&self) -> u16;
}
