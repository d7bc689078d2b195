//! Intel 8080 CPU emulator.
//!
//! Each call to `step()` executes one whole instruction and returns the
//! cycles it took. Memory and I/O ports are reached through the
//! `emu_core::IoBus` the machine passes in.

mod alu;
mod cpu;
mod decode;
mod flags;
mod registers;

pub use cpu::I8080;
pub use decode::{AluOp, Condition, Instruction, OPCODES, Opcode, Operand, Pair, decode};
pub use flags::{AF, ALL, CF, Flags, PF, SF, ZF, parity};
pub use registers::Registers;
