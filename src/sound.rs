use beep::beep;
use log::warn;

/// Buzzer driven by the sound timer. Calls must be cheap and idempotent: the
/// interpreter calls `play` on every timer tick while sound is due.
pub trait Sound {
    fn play(&mut self);
    fn stop(&mut self);
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// PC speaker beeper; failures are logged, never fatal to the program
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        SimpleBeep::new()
    }
}

impl Sound for SimpleBeep {
    fn play(&mut self) {
        if self.is_beeping {
            return;
        }
        match beep(SIMPLEBEEP_PITCH) {
            Ok(()) => self.is_beeping = true,
            Err(e) => warn!("beep failed: {:?}", e),
        }
    }

    fn stop(&mut self) {
        if !self.is_beeping {
            return;
        }
        if let Err(e) = beep(0) {
            warn!("couldn't stop beeping: {:?}", e);
        }
        self.is_beeping = false;
    }
}

impl Drop for SimpleBeep {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Default)]
pub struct Mute;

impl Sound for Mute {
    fn play(&mut self) {}

    fn stop(&mut self) {}
}
