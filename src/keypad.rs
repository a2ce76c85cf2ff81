use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// COSMAC VIP hex keypad, mapped onto the left-hand side of a qwerty keyboard
///
///   1 2 3 C        1 2 3 4
///   4 5 6 D   <-   q w e r
///   7 8 9 E        a s d f
///   A 0 B F        z x c v
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// A set of hex keys (0x0-0xF), one bit each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u16);

impl KeySet {
    pub const fn empty() -> Self {
        KeySet(0)
    }

    /// keys above 0xF are ignored
    pub fn insert(&mut self, key: u8) {
        if key < 16 {
            self.0 |= 1 << key;
        }
    }

    pub fn remove(&mut self, key: u8) {
        if key < 16 {
            self.0 &= !(1 << key);
        }
    }

    pub fn contains(&self, key: u8) -> bool {
        key < 16 && self.0 & (1 << key) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// lowest pressed key
    pub fn first(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..16u8).filter(move |k| self.contains(*k))
    }
}

impl FromIterator<u8> for KeySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = KeySet::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// reads the state of the hex keypad
pub trait Keypad {
    /// which keys are held down right now
    fn pressed_keys(&mut self) -> KeySet;
}

/// how long a key counts as held after the terminal last reported it; the
/// terminal sends presses and auto-repeats, never releases
const KEY_HOLD: Duration = Duration::from_millis(150);

/// Keypad fed by crossterm key events in raw mode.
///
/// Esc and Ctrl-C raise the shared quit flag instead of reaching the program.
pub struct TermKeypad {
    keymap: HashMap<char, u8>,
    last_seen: [Option<Instant>; 16],
    quit: Rc<Cell<bool>>,
}

impl TermKeypad {
    pub fn new(quit: Rc<Cell<bool>>) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(TermKeypad {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            last_seen: [None; 16],
            quit,
        })
    }

    fn read_events(&mut self) -> io::Result<()> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => self.handle_key(evt),
                _ => debug!("ignoring non-key terminal event"),
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, evt: KeyEvent) {
        match evt.code {
            KeyCode::Esc => self.quit.set(true),
            KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit.set(true)
            }
            KeyCode::Char(c) => match self.keymap.get(&c.to_ascii_lowercase()) {
                Some(key) => self.last_seen[*key as usize] = Some(Instant::now()),
                None => debug!("can't map {:?} to a COSMAC key", c),
            },
            other => debug!("unmapped key event {:?}", other),
        }
    }
}

impl Drop for TermKeypad {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Keypad for TermKeypad {
    fn pressed_keys(&mut self) -> KeySet {
        if let Err(e) = self.read_events() {
            warn!("keyboard read failed: {}", e);
        }
        let now = Instant::now();
        self.last_seen
            .iter()
            .enumerate()
            .filter(|(_, seen)| matches!(seen, Some(t) if now.duration_since(*t) < KEY_HOLD))
            .map(|(key, _)| key as u8)
            .collect()
    }
}

/// keypad that always reports the same keys, for testing
#[derive(Default)]
pub struct FixedKeypad {
    keys: KeySet,
}

impl FixedKeypad {
    pub fn new(keys: &[u8]) -> Self {
        FixedKeypad {
            keys: keys.iter().copied().collect(),
        }
    }
}

impl Keypad for FixedKeypad {
    fn pressed_keys(&mut self) -> KeySet {
        self.keys
    }
}
