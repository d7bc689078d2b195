//! Minimal CP/M harness for the classic 8080 exerciser programs.
//!
//! CP/M memory layout:
//! - 0x0000: Warm boot. Reaching it ends the run.
//! - 0x0005: BDOS entry. `CALL 5` is intercepted before it executes.
//! - 0x0100: Program load address (TPA start)
//!
//! The .COM files are not shipped; drop them into `roms/cpm/` at the
//! workspace root and run with `--ignored`.

use std::io::Write;
use std::path::PathBuf;

use emu_core::{Bus, Cpu, SimpleBus};
use intel_8080::I8080;

const INSTRUCTION_LIMIT: u64 = 10_000_000_000;

fn rom_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../roms/cpm")
        .join(name)
}

/// Run a .COM image until it warm-boots. Returns everything it printed.
fn run_cpm(binary: &[u8]) -> String {
    let mut bus = SimpleBus::new();
    bus.load(0x0100, binary);
    // Anything that falls through the BDOS trap just returns.
    bus.load(0x0005, &[0xC9]);

    let mut cpu = I8080::new();
    cpu.regs.pc = 0x0100;

    let mut output = String::new();
    let mut instructions: u64 = 0;

    loop {
        if cpu.pc() == 0x0005 {
            match cpu.regs.c {
                2 => {
                    let ch = cpu.regs.e as char;
                    eprint!("{ch}");
                    output.push(ch);
                }
                9 => {
                    let mut addr = cpu.regs.de();
                    loop {
                        let ch = bus.peek(addr);
                        if ch == b'$' {
                            break;
                        }
                        eprint!("{}", ch as char);
                        output.push(ch as char);
                        addr = addr.wrapping_add(1);
                    }
                }
                func => eprintln!("\nUnknown BDOS function: {func}"),
            }
            std::io::stderr().flush().unwrap();

            // Simulate RET
            cpu.regs.pc = bus.read_word(cpu.regs.sp);
            cpu.regs.sp = cpu.regs.sp.wrapping_add(2);
            continue;
        }

        cpu.step(&mut bus);
        instructions += 1;

        if cpu.pc() == 0x0000 {
            eprintln!("\nWarm boot after {instructions} instructions");
            break;
        }
        assert!(instructions < INSTRUCTION_LIMIT, "exerciser never finished");
    }

    output
}

fn run_rom(name: &str) -> String {
    let path = rom_path(name);
    let binary = std::fs::read(&path)
        .unwrap_or_else(|e| panic!("{} not found: {e}", path.display()));
    run_cpm(&binary)
}

#[test]
#[ignore]
fn tst8080() {
    let output = run_rom("TST8080.COM");
    assert!(output.contains("CPU IS OPERATIONAL"), "TST8080 failed");
}

#[test]
#[ignore]
fn pre8080() {
    let output = run_rom("8080PRE.COM");
    assert!(!output.contains("ERROR"), "8080PRE failed");
}

#[test]
#[ignore]
fn cputest() {
    let output = run_rom("CPUTEST.COM");
    assert!(!output.contains("ERROR"), "CPUTEST failed");
}

#[test]
#[ignore]
fn exm8080() {
    let output = run_rom("8080EXM.COM");
    assert!(!output.contains("ERROR"), "8080EXM failed");
}
