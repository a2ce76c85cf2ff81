use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chip8_vm::catalog::{FileCatalog, RomCatalog};
use chip8_vm::display::TermDisplay;
use chip8_vm::keypad::TermKeypad;
use chip8_vm::sound::{Mute, SimpleBeep, Sound};
use chip8_vm::{Interpreter, Platform, QuirkProfile};
use clap::Parser;
use log::{error, info};

const FRAME: Duration = Duration::from_micros(1_000_000 / 60);

/// Run a CHIP-8 ROM in the terminal. Esc or Ctrl-C quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// path to the ROM
    rom: String,

    /// platform quirks to run with; defaults to whatever the ROM's extension implies
    #[arg(short, long)]
    platform: Option<Platform>,

    /// instructions per second
    #[arg(short, long)]
    tickrate: Option<u32>,

    /// write ALU results after VF, so VF as a destination keeps the result
    #[arg(long)]
    vf_order: bool,

    /// no beeping
    #[arg(short, long)]
    mute: bool,

    /// stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let catalog = FileCatalog::new();
    let mut rom = catalog.resolve(&args.rom)?;
    if let Some(platform) = args.platform {
        rom.platform = platform;
        rom.profile = QuirkProfile::for_platform(platform);
    }
    if let Some(tickrate) = args.tickrate {
        rom.profile.clock_speed = tickrate;
    }
    rom.profile.vf_order |= args.vf_order;
    let bytes = catalog.read(&args.rom)?;

    // initialise
    let quit = Rc::new(Cell::new(false));
    let mut display = TermDisplay::new(64, 32)?;
    let mut keypad = TermKeypad::new(quit.clone())?;
    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute)
    } else {
        Box::new(SimpleBeep::new())
    };
    let mut interpreter = Interpreter::new(&mut display, &mut keypad, sound.as_mut());
    interpreter.load_program(&bytes, rom.profile)?;
    info!(
        "running {:?} [platform: {}, clock: {}Hz]",
        rom.title, rom.platform, rom.profile.clock_speed
    );

    let steps_per_frame = (rom.profile.clock_speed / 60).max(1);
    let mut frames = 0;
    while !quit.get() && args.max_frames.map_or(true, |max| frames < max) {
        let start = Instant::now();
        for _ in 0..steps_per_frame {
            if let Err(e) = interpreter.step() {
                error!("halted at {:#05x}: {}", interpreter.pc(), e);
                return Err(e.into());
            }
        }
        interpreter.present()?;
        frames += 1;
        spin_sleep::sleep(FRAME.saturating_sub(start.elapsed()));
    }

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
