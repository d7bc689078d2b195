//! Core traits and types for cycle-counted emulation.
//!
//! Timing is counted in CPU clock cycles. A machine converts wall-clock
//! budgets into cycles through its `MasterClock` and steps the CPU until
//! the budget is spent.

mod bus;
mod clock;
mod cpu;
mod io_bus;
mod machine;
mod observable;
mod ticks;

pub use bus::{Bus, SimpleBus};
pub use clock::MasterClock;
pub use cpu::Cpu;
pub use io_bus::IoBus;
pub use machine::{Machine, VideoConfig};
pub use observable::{Observable, Value, parse_address};
pub use ticks::Ticks;
