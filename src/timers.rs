/// timers count down at this rate whatever the CPU clock is doing
pub const TIMER_RATE_HZ: u32 = 60;

/// what the sound device should do after a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Play,
    Stop,
}

/// Delay and sound timers, clocked by instruction count.
///
/// Each cycle banks 60 units; once the bank exceeds the clock speed a tick is
/// due and the clock speed is withdrawn. That's `cycles > clock / 60` without
/// the floating point drift.
#[derive(Debug, Default, Clone)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    accumulator: u32,
}

impl Timers {
    pub fn reset(&mut self) {
        *self = Timers::default();
    }

    /// account for one executed instruction; true when a 60Hz tick is due
    pub fn cycle(&mut self, clock_speed: u32) -> bool {
        // below 60Hz we'd owe more than one tick per cycle
        let threshold = clock_speed.max(TIMER_RATE_HZ);
        self.accumulator += TIMER_RATE_HZ;
        if self.accumulator > threshold {
            self.accumulator -= threshold;
            true
        } else {
            false
        }
    }

    /// count both timers down by one, never below zero
    pub fn decrement(&mut self) -> Option<SoundCue> {
        self.delay = self.delay.saturating_sub(1);
        if self.sound == 0 {
            return None;
        }
        self.sound -= 1;
        if self.sound > 0 {
            Some(SoundCue::Play)
        } else {
            Some(SoundCue::Stop)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_after(cycles: usize, clock_speed: u32) -> usize {
        let mut t = Timers::default();
        (0..cycles).filter(|_| t.cycle(clock_speed)).count()
    }

    #[test]
    fn test_cadence_at_500hz() {
        assert_eq!(ticks_after(8, 500), 0);
        assert_eq!(ticks_after(9, 500), 1);
        // 500/60 = 8.33..., the twelfth tick lands on cycle 101
        assert_eq!(ticks_after(100, 500), 11);
        assert_eq!(ticks_after(101, 500), 12);
        assert_eq!(ticks_after(501, 500), 60);
    }

    #[test]
    fn test_slow_clock_ticks_at_most_once_per_cycle() {
        assert_eq!(ticks_after(10, 30), 9);
    }

    #[test]
    fn test_decrement_saturates() {
        let mut t = Timers::default();
        assert_eq!(t.decrement(), None);
        assert_eq!(t.delay, 0);
        assert_eq!(t.sound, 0);
    }

    #[test]
    fn test_sound_cues() {
        let mut t = Timers {
            delay: 1,
            sound: 2,
            ..Default::default()
        };
        assert_eq!(t.decrement(), Some(SoundCue::Play));
        assert_eq!(t.delay, 0);
        assert_eq!(t.decrement(), Some(SoundCue::Stop));
        assert_eq!(t.decrement(), None);
    }

    #[test]
    fn test_reset() {
        let mut t = Timers {
            delay: 9,
            sound: 9,
            ..Default::default()
        };
        t.cycle(500);
        t.reset();
        assert_eq!((t.delay, t.sound, t.accumulator), (0, 0, 0));
    }
}
