//! Space Invaders emulator binary.
//!
//! Runs the board headless for a fixed number of frames, as fast as the
//! host allows, then reports the sound triggers it saw and a checksum of
//! video RAM. `--state` adds a JSON dump of the observable state. Set
//! `RUST_LOG` for diagnostics.

use std::path::PathBuf;
use std::process;

use crossbeam::channel::{Receiver, unbounded};
use emu_core::{Machine, Observable, Value};
use emu_invaders::{Invaders, InvadersConfig, ShipCount, Sound, SoundEvent, SoundSink};
use serde_json::{Map, Value as JsonValue};

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    rom_dir: PathBuf,
    frames: u32,
    millis: Option<u64>,
    ships: ShipCount,
    state: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        rom_dir: PathBuf::from("roms/invaders"),
        frames: 600,
        millis: None,
        ships: ShipCount::Three,
        state: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rom-dir" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.rom_dir = PathBuf::from(s);
                }
            }
            "--frames" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.frames = s.parse().unwrap_or(cli.frames);
                }
            }
            "--millis" => {
                i += 1;
                cli.millis = args.get(i).and_then(|s| s.parse().ok());
            }
            "--ships" => {
                i += 1;
                let ships = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .and_then(ShipCount::from_count);
                match ships {
                    Some(ships) => cli.ships = ships,
                    None => {
                        eprintln!("--ships takes 3, 4, 5 or 6");
                        process::exit(1);
                    }
                }
            }
            "--state" => {
                cli.state = true;
            }
            "--help" | "-h" => {
                eprintln!("Usage: emu-invaders [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!(
                    "  --rom-dir <dir>  Directory holding invaders.h/g/f/e [default: roms/invaders]"
                );
                eprintln!("  --frames <n>     Frames to run [default: 600]");
                eprintln!("  --millis <ms>    Run for emulated milliseconds instead of frames");
                eprintln!("  --ships <n>      Ships per game DIP setting, 3-6 [default: 3]");
                eprintln!("  --state          Print CPU and I/O state as JSON when done");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

// ---------------------------------------------------------------------------
// Headless run
// ---------------------------------------------------------------------------

fn sound_summary(rx: &Receiver<SoundEvent>) -> [u64; 9] {
    let mut counts = [0u64; 9];
    for event in rx.try_iter() {
        if let Some(slot) = counts.get_mut(usize::from(event.index)) {
            *slot += 1;
        }
    }
    counts
}

/// Fletcher-16 over video RAM, enough to tell two screens apart.
fn vram_checksum(vram: &[u8]) -> u16 {
    let (mut a, mut b) = (0u16, 0u16);
    for &byte in vram {
        a = (a + u16::from(byte)) % 255;
        b = (b + a) % 255;
    }
    (b << 8) | a
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(v) => serde_json::json!(v),
        Value::U8(v) => serde_json::json!(v),
        Value::U16(v) => serde_json::json!(v),
        Value::U32(v) => serde_json::json!(v),
        Value::U64(v) => serde_json::json!(v),
    }
}

fn state_json<S: SoundSink>(board: &Invaders<S>) -> JsonValue {
    let cpu_paths = board.cpu().query_paths().iter().map(|p| format!("cpu.{p}"));
    let board_paths = ["io.port1", "io.port2", "io.shift_offset", "frame_count"]
        .into_iter()
        .map(String::from);

    let mut state = Map::new();
    for path in cpu_paths.chain(board_paths) {
        if let Some(value) = board.query(&path) {
            state.insert(path, value_to_json(&value));
        }
    }
    state.insert("hiscore".into(), serde_json::json!(board.hiscore()));
    JsonValue::Object(state)
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    let (tx, rx) = unbounded::<SoundEvent>();
    let mut config = InvadersConfig::default();
    config.dip_switches.ships = cli.ships;
    let mut board = Invaders::with_sound_sink(config, tx);

    if let Err(e) = board.load_rom_dir(&cli.rom_dir) {
        eprintln!("Failed to load ROMs: {e}");
        process::exit(1);
    }

    let cycles = match cli.millis {
        Some(ms) => board.advance_millis(ms),
        None => (0..cli.frames).map(|_| board.run_frame()).sum(),
    };

    println!(
        "ran {cycles} cycles, {} frames, PC={:#06X}",
        board.frame_count(),
        board.cpu().regs.pc
    );
    for (sound, count) in Sound::ALL.iter().zip(sound_summary(&rx)) {
        if count > 0 {
            println!("  {sound:?}: {count}");
        }
    }
    println!("video RAM checksum: {:#06X}", vram_checksum(board.video_ram()));

    if cli.state {
        println!("{:#}", state_json(&board));
    }
}
