//! Single-instruction reference vectors.
//!
//! Each case in `tests/data/vectors.json` gives the full register state and
//! the relevant RAM before and after one `step()`, plus the cycle cost.
//! Flags are compared as the packed PSW status byte.

use emu_core::{Cpu, SimpleBus};
use intel_8080::{Flags, I8080};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: u32,
}

#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    sp: u16,
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    f: u8,
    inte: bool,
    ram: Vec<(u16, u8)>,
}

fn setup(cpu: &mut I8080, bus: &mut SimpleBus, state: &CpuState) {
    for &(addr, value) in &state.ram {
        bus.load(addr, &[value]);
    }

    cpu.regs.a = state.a;
    cpu.regs.b = state.b;
    cpu.regs.c = state.c;
    cpu.regs.d = state.d;
    cpu.regs.e = state.e;
    cpu.regs.h = state.h;
    cpu.regs.l = state.l;
    cpu.regs.flags = Flags::from_byte(state.f);
    cpu.regs.sp = state.sp;
    cpu.regs.pc = state.pc;
    cpu.regs.inte = state.inte;
}

fn compare(cpu: &I8080, bus: &SimpleBus, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();

    check_u8(&mut errors, "A", cpu.regs.a, expected.a);
    check_u8(&mut errors, "F", cpu.regs.flags.to_byte(), expected.f);
    check_u8(&mut errors, "B", cpu.regs.b, expected.b);
    check_u8(&mut errors, "C", cpu.regs.c, expected.c);
    check_u8(&mut errors, "D", cpu.regs.d, expected.d);
    check_u8(&mut errors, "E", cpu.regs.e, expected.e);
    check_u8(&mut errors, "H", cpu.regs.h, expected.h);
    check_u8(&mut errors, "L", cpu.regs.l, expected.l);
    check_u16(&mut errors, "SP", cpu.regs.sp, expected.sp);
    check_u16(&mut errors, "PC", cpu.regs.pc, expected.pc);

    if cpu.regs.inte != expected.inte {
        errors.push(format!("INTE: got {}, want {}", cpu.regs.inte, expected.inte));
    }

    for &(addr, expected_val) in &expected.ram {
        let actual_val = bus.peek(addr);
        if actual_val != expected_val {
            errors.push(format!(
                "RAM[${addr:04X}]: got ${actual_val:02X}, want ${expected_val:02X}"
            ));
        }
    }

    errors
}

fn check_u8(errors: &mut Vec<String>, name: &str, actual: u8, expected: u8) {
    if actual != expected {
        errors.push(format!("{name}: got ${actual:02X}, want ${expected:02X}"));
    }
}

fn check_u16(errors: &mut Vec<String>, name: &str, actual: u16, expected: u16) {
    if actual != expected {
        errors.push(format!("{name}: got ${actual:04X}, want ${expected:04X}"));
    }
}

#[test]
fn reference_vectors() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/vectors.json");
    let data = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    let tests: Vec<TestCase> = serde_json::from_str(&data)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()));
    assert!(!tests.is_empty());

    let mut failures = Vec::new();
    for test in &tests {
        let mut cpu = I8080::new();
        let mut bus = SimpleBus::new();
        setup(&mut cpu, &mut bus, &test.initial);

        let cycles = cpu.step(&mut bus);

        let mut errors = compare(&cpu, &bus, &test.final_state);
        if cycles != test.cycles {
            errors.push(format!("cycles: got {cycles}, want {}", test.cycles));
        }
        if !errors.is_empty() {
            failures.push(format!("  FAIL [{}]: {}", test.name, errors.join(", ")));
        }
    }

    for msg in &failures {
        println!("{msg}");
    }
    assert!(failures.is_empty(), "{} of {} vectors failed", failures.len(), tests.len());
}
