/// # interpreter
///
/// Owns the machine state (memory, V0-VF, I, PC, call stack, timers) and runs
/// one instruction per `step()`. Display, keypad and sound are borrowed for
/// the interpreter's lifetime and only ever touched from inside a step.
///
/// Timing is logical: the caller decides how often to call `step()`, and the
/// timers follow the instruction count at the profile's clock speed.
use crate::catalog::{RomCatalog, RomInfo};
use crate::display::Display;
use crate::error::Error;
use crate::font::{ContemporaryFont, FontProvider, FONT_SIZE_BYTES, GLYPH_HEIGHT};
use crate::instruction::{Instruction, Reg};
use crate::keypad::Keypad;
use crate::memory::{Memory, PROGRAM_ADDR};
use crate::quirks::QuirkProfile;
use crate::sound::Sound;
use crate::timers::{SoundCue, Timers};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::io;

pub const REGISTER_COUNT: usize = 16;
/// deepest the call stack may get
pub const STACK_DEPTH: usize = 16;
const FLAG: usize = 0xF;
const INSTRUCTION_SIZE: u16 = 2;

/// Progress of an FX0A across the cycles it spans.
///
/// FX0A only completes once a key has gone down *and* come back up; until
/// then the PC is rewound so the same instruction runs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWaitState {
    Idle,
    /// nothing pressed yet
    WaitingForPress,
    /// key captured into VX, waiting for it to be let go
    WaitingForRelease(u8),
}

pub struct Interpreter<'a> {
    memory: Memory,
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
    stack: Vec<u16>,
    timers: Timers,
    key_wait: KeyWaitState,
    /// a 60Hz tick happened since the last draw
    vblank: bool,
    profile: QuirkProfile,
    glyphs: [u8; FONT_SIZE_BYTES],
    display: &'a mut dyn Display,
    keypad: &'a mut dyn Keypad,
    sound: &'a mut dyn Sound,
    rng: Box<dyn RngCore>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        display: &'a mut dyn Display,
        keypad: &'a mut dyn Keypad,
        sound: &'a mut dyn Sound,
    ) -> Self {
        let mut interpreter = Interpreter {
            memory: Memory::new(),
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_ADDR,
            stack: Vec::with_capacity(STACK_DEPTH),
            timers: Timers::default(),
            key_wait: KeyWaitState::Idle,
            vblank: true,
            profile: QuirkProfile::default(),
            glyphs: *ContemporaryFont.glyphs(),
            display,
            keypad,
            sound,
            rng: Box::new(StdRng::from_entropy()),
        };
        interpreter.memory.reset(&interpreter.glyphs);
        interpreter
    }

    /// use a different font; replaces the glyphs in low memory straight away
    pub fn with_font(mut self, font: &dyn FontProvider) -> Self {
        self.glyphs = *font.glyphs();
        self.memory.reset(&self.glyphs);
        self
    }

    /// swap the source of CXNN random bytes, e.g. for a seeded replay
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Reset the machine and load a program at 0x200.
    ///
    /// On `RomTooLarge` the machine stays reset and keeps its old profile.
    pub fn load_program(&mut self, bytes: &[u8], profile: QuirkProfile) -> Result<(), Error> {
        self.reset();

        let max = profile.max_rom_size.min(Memory::program_capacity());
        if bytes.len() > max {
            return Err(Error::RomTooLarge {
                size: bytes.len(),
                max,
            });
        }

        self.memory.write(PROGRAM_ADDR, bytes)?;
        self.profile = profile;
        info!(
            "Loaded program [size: {}, clock: {}Hz]",
            bytes.len(),
            profile.clock_speed
        );
        Ok(())
    }

    /// look a ROM up in the catalog, then load it with the profile it asks for
    pub fn load_rom(
        &mut self,
        catalog: &dyn RomCatalog,
        identifier: &str,
    ) -> Result<RomInfo, Error> {
        self.reset();
        let bytes = catalog.read(identifier)?;
        let rom = catalog.resolve(identifier)?;
        self.load_program(&bytes, rom.profile)?;
        info!("Loaded ROM [title: {:?}, platform: {}]", rom.title, rom.platform);
        Ok(rom)
    }

    fn reset(&mut self) {
        self.memory.reset(&self.glyphs);
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_ADDR;
        self.stack.clear();
        self.timers.reset();
        self.key_wait = KeyWaitState::Idle;
        self.vblank = true;
        self.display.clear();
    }

    /// fetch, decode and execute one instruction, then run the timers
    pub fn step(&mut self) -> Result<(), Error> {
        let opcode = self.memory.fetch(self.pc)?;
        self.pc += INSTRUCTION_SIZE;

        let instruction = Instruction::decode(opcode)?;
        trace!("{:04x}: {:04x} {}", self.pc - INSTRUCTION_SIZE, opcode, instruction);
        self.execute(instruction)?;

        if !matches!(instruction, Instruction::WaitForKey(_)) {
            self.key_wait = KeyWaitState::Idle;
        }

        if self.timers.cycle(self.profile.clock_speed) {
            self.vblank = true;
            match self.timers.decrement() {
                Some(SoundCue::Play) => self.sound.play(),
                Some(SoundCue::Stop) => {
                    debug!("sound timer expired");
                    self.sound.stop()
                }
                None => {}
            }
        }
        Ok(())
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), Error> {
        use Instruction::*;
        match instruction {
            ClearScreen => self.display.clear(),
            Return => self.pc = self.stack.pop().ok_or(Error::StackUnderflow)?,
            Jump(addr) => self.pc = addr,
            Call(addr) => {
                if self.stack.len() >= STACK_DEPTH {
                    return Err(Error::StackOverflow);
                }
                self.stack.push(self.pc);
                self.pc = addr;
            }
            SkipIfEqual(x, nn) => self.skip_if(self.reg(x) == nn),
            SkipIfNotEqual(x, nn) => self.skip_if(self.reg(x) != nn),
            SkipIfRegistersEqual(x, y) => self.skip_if(self.reg(x) == self.reg(y)),
            SkipIfRegistersNotEqual(x, y) => self.skip_if(self.reg(x) != self.reg(y)),
            Load(x, nn) => self.v[x as usize] = nn,
            AddImmediate(x, nn) => self.v[x as usize] = self.reg(x).wrapping_add(nn),
            Move(x, y) => self.v[x as usize] = self.reg(y),
            Or(x, y) => self.logic(x, self.reg(x) | self.reg(y)),
            And(x, y) => self.logic(x, self.reg(x) & self.reg(y)),
            Xor(x, y) => self.logic(x, self.reg(x) ^ self.reg(y)),
            Add(x, y) => {
                let sum = self.reg(x) as u16 + self.reg(y) as u16;
                self.write_with_carry(x, sum as u8, (sum > 0xFF) as u8);
            }
            Sub(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.write_with_carry(x, vx.wrapping_sub(vy), (vy <= vx) as u8);
            }
            SubReversed(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.write_with_carry(x, vy.wrapping_sub(vx), (vx <= vy) as u8);
            }
            ShiftRight(x, y) => {
                let src = self.shift_source(x, y);
                self.write_with_carry(x, src >> 1, src & 0x1);
            }
            ShiftLeft(x, y) => {
                let src = self.shift_source(x, y);
                self.write_with_carry(x, src << 1, src >> 7);
            }
            LoadIndex(addr) => self.i = addr,
            JumpWithOffset(addr) => {
                let offset = if self.profile.jump {
                    self.reg((addr >> 8) as u8)
                } else {
                    self.v[0]
                };
                self.pc = addr + offset as u16;
            }
            Random(x, nn) => self.v[x as usize] = self.rng.gen::<u8>() & nn,
            Draw(x, y, n) => self.draw(x, y, n)?,
            SkipIfKeyPressed(x) => {
                let pressed = self.keypad.pressed_keys().contains(self.reg(x));
                self.skip_if(pressed);
            }
            SkipIfKeyNotPressed(x) => {
                let pressed = self.keypad.pressed_keys().contains(self.reg(x));
                self.skip_if(!pressed);
            }
            ReadDelayTimer(x) => self.v[x as usize] = self.timers.delay,
            WaitForKey(x) => self.wait_for_key(x),
            SetDelayTimer(x) => self.timers.delay = self.reg(x),
            SetSoundTimer(x) => self.timers.sound = self.reg(x),
            AddToIndex(x) => self.i = self.i.wrapping_add(self.reg(x) as u16),
            LoadGlyph(x) => self.i = self.reg(x) as u16 * GLYPH_HEIGHT,
            StoreBcd(x) => {
                let vx = self.reg(x);
                self.memory.write(self.i, &[vx / 100, vx / 10 % 10, vx % 10])?;
            }
            StoreRegisters(x) => {
                let count = x as usize + 1;
                self.memory.write(self.i, &self.v[..count])?;
                self.advance_index(count);
            }
            LoadRegisters(x) => {
                let count = x as usize + 1;
                let data = self.memory.get_ro_slice(self.i, count)?;
                self.v[..count].copy_from_slice(data);
                self.advance_index(count);
            }
        }
        Ok(())
    }

    fn reg(&self, r: Reg) -> u8 {
        self.v[r as usize]
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc += INSTRUCTION_SIZE;
        }
    }

    /// Every ALU result that also produces a flag goes through here.
    ///
    /// The flag lands in VF after the result, so with X = F the flag wins;
    /// with the VF-order quirk the result is written once more and wins.
    fn write_with_carry(&mut self, dest: Reg, value: u8, flag: u8) {
        self.v[dest as usize] = value;
        self.v[FLAG] = flag;
        if self.profile.vf_order {
            self.v[dest as usize] = value;
        }
    }

    fn logic(&mut self, dest: Reg, value: u8) {
        if self.profile.logic {
            self.write_with_carry(dest, value, 0);
        } else {
            self.v[dest as usize] = value;
        }
    }

    fn shift_source(&self, x: Reg, y: Reg) -> u8 {
        if self.profile.shift {
            self.reg(x)
        } else {
            self.reg(y)
        }
    }

    fn advance_index(&mut self, count: usize) {
        if !self.profile.load_store {
            self.i = self.i.wrapping_add(count as u16);
        }
    }

    fn draw(&mut self, x: Reg, y: Reg, n: u8) -> Result<(), Error> {
        if self.profile.vblank {
            if !self.vblank {
                // try again after the next tick
                self.pc -= INSTRUCTION_SIZE;
                return Ok(());
            }
            self.vblank = false;
        }

        let sprite = self.memory.get_ro_slice(self.i, n as usize)?;
        let (width, height) = (self.display.width(), self.display.height());
        let x0 = self.v[x as usize] as usize % width;
        let y0 = self.v[y as usize] as usize % height;

        let mut collision = 0;
        for (row, bits) in sprite.iter().enumerate() {
            for col in 0..8 {
                if (bits >> (7 - col)) & 0x1 == 0 {
                    continue;
                }
                let (mut px, mut py) = (x0 + col, y0 + row);
                if px >= width || py >= height {
                    if self.profile.clip {
                        continue;
                    }
                    px %= width;
                    py %= height;
                }
                let old = self.display.pixel(px, py);
                collision |= old;
                self.display.set_pixel(px, py, old ^ 1);
            }
        }
        self.v[FLAG] = collision;
        Ok(())
    }

    fn wait_for_key(&mut self, x: Reg) {
        let keys = self.keypad.pressed_keys();
        match self.key_wait {
            KeyWaitState::Idle | KeyWaitState::WaitingForPress => {
                match keys.first() {
                    Some(key) => {
                        debug!("FX0A captured key {:x}", key);
                        self.v[x as usize] = key;
                        self.key_wait = KeyWaitState::WaitingForRelease(key);
                    }
                    None => self.key_wait = KeyWaitState::WaitingForPress,
                }
                self.pc -= INSTRUCTION_SIZE;
            }
            KeyWaitState::WaitingForRelease(key) => {
                if keys.contains(key) {
                    self.pc -= INSTRUCTION_SIZE;
                } else {
                    debug!("FX0A key {:x} released", key);
                    self.key_wait = KeyWaitState::Idle;
                }
            }
        }
    }

    /// hand the current frame to the display
    pub fn present(&mut self) -> io::Result<()> {
        self.display.present()
    }

    pub fn display(&self) -> &dyn Display {
        &*self.display
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn key_wait_state(&self) -> KeyWaitState {
        self.key_wait
    }

    pub fn profile(&self) -> &QuirkProfile {
        &self.profile
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }
}
