//! # chip8-vm
//!
//! ## Design
//!
//! * one instruction per `step()`; the caller owns wallclock timing and
//!   calls `step()` `clock_speed / 60` times per frame, then sleeps
//! * delay and sound timers count down at 60Hz of *logical* time, derived
//!   from the instruction count, so runs are reproducible
//! * abstract display, keypad and sound so can plug alternatives; TUI
//!   in-console for real use, headless/fixed/mute for tests
//! * per-platform behaviour lives in a `QuirkProfile`, never in the decoder
//! * ROMs come from a `RomCatalog`, which also says which profile they need
//!
//! Model
//!
//! ```text
//! main
//!  |-- display, keypad, sound, catalog
//!  |-- interpreter(display, keypad, sound)
//!  |    |-- memory(font)
//!  |    |-- instruction set
//!  |    `-- quirk profile (from catalog, overridden by cli)
//!  `-- main loop
//!       |-- interpreter.step() x clock_speed/60
//!       |-- interpreter.present()
//!       `-- sleep(rest of the 1/60s frame)
//! ```
pub mod catalog;
pub mod display;
pub mod error;
pub mod font;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod memory;
pub mod quirks;
pub mod sound;
pub mod timers;

pub use error::Error;
pub use interpreter::{Interpreter, KeyWaitState};
pub use quirks::{Platform, QuirkProfile};
