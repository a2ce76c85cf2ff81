use crate::error::Error;
use std::fmt;

/// register index, 0x0-0xF
pub type Reg = u8;
/// 12-bit address
pub type Addr = u16;

/// One decoded CHIP-8 instruction with its operands pulled out.
///
/// Decoding doesn't look at quirks: the same word always decodes the same way
/// and the interpreter decides how the variant behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /* 00E0 */ ClearScreen,
    /* 00EE */ Return,
    /* 1NNN */ Jump(Addr),
    /* 2NNN */ Call(Addr),
    /* 3XNN */ SkipIfEqual(Reg, u8),
    /* 4XNN */ SkipIfNotEqual(Reg, u8),
    /* 5XY0 */ SkipIfRegistersEqual(Reg, Reg),
    /* 6XNN */ Load(Reg, u8),
    /* 7XNN */ AddImmediate(Reg, u8),
    /* 8XY0 */ Move(Reg, Reg),
    /* 8XY1 */ Or(Reg, Reg),
    /* 8XY2 */ And(Reg, Reg),
    /* 8XY3 */ Xor(Reg, Reg),
    /* 8XY4 */ Add(Reg, Reg),            // Vx += Vy, VF = carry
    /* 8XY5 */ Sub(Reg, Reg),            // Vx -= Vy, VF = !borrow
    /* 8XY6 */ ShiftRight(Reg, Reg),
    /* 8XY7 */ SubReversed(Reg, Reg),    // Vx = Vy - Vx
    /* 8XYE */ ShiftLeft(Reg, Reg),
    /* 9XY0 */ SkipIfRegistersNotEqual(Reg, Reg),
    /* ANNN */ LoadIndex(Addr),
    /* BNNN */ JumpWithOffset(Addr),     // V0 or VX, depending on quirks
    /* CXNN */ Random(Reg, u8),
    /* DXYN */ Draw(Reg, Reg, u8),
    /* EX9E */ SkipIfKeyPressed(Reg),
    /* EXA1 */ SkipIfKeyNotPressed(Reg),
    /* FX07 */ ReadDelayTimer(Reg),
    /* FX0A */ WaitForKey(Reg),
    /* FX15 */ SetDelayTimer(Reg),
    /* FX18 */ SetSoundTimer(Reg),
    /* FX1E */ AddToIndex(Reg),
    /* FX29 */ LoadGlyph(Reg),
    /* FX33 */ StoreBcd(Reg),
    /* FX55 */ StoreRegisters(Reg),     // V0..=Vx to memory at I
    /* FX65 */ LoadRegisters(Reg),      // memory at I to V0..=Vx
}

impl Instruction {
    /// split the word into `(op, x, y, n)` nibbles and match on the tuple
    pub fn decode(opcode: u16) -> Result<Instruction, Error> {
        let op = ((opcode & 0xF000) >> 12) as u8;
        let x = ((opcode & 0x0F00) >> 8) as u8;
        let y = ((opcode & 0x00F0) >> 4) as u8;
        let n = (opcode & 0x000F) as u8;
        let nn = (opcode & 0x00FF) as u8;
        let nnn = opcode & 0x0FFF;

        use Instruction::*;
        let instruction = match (op, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, _, _, _) => return Err(Error::UnsupportedLegacyOpcode(opcode)),
            (0x1, _, _, _) => Jump(nnn),
            (0x2, _, _, _) => Call(nnn),
            (0x3, _, _, _) => SkipIfEqual(x, nn),
            (0x4, _, _, _) => SkipIfNotEqual(x, nn),
            (0x5, _, _, 0x0) => SkipIfRegistersEqual(x, y),
            (0x6, _, _, _) => Load(x, nn),
            (0x7, _, _, _) => AddImmediate(x, nn),
            (0x8, _, _, 0x0) => Move(x, y),
            (0x8, _, _, 0x1) => Or(x, y),
            (0x8, _, _, 0x2) => And(x, y),
            (0x8, _, _, 0x3) => Xor(x, y),
            (0x8, _, _, 0x4) => Add(x, y),
            (0x8, _, _, 0x5) => Sub(x, y),
            (0x8, _, _, 0x6) => ShiftRight(x, y),
            (0x8, _, _, 0x7) => SubReversed(x, y),
            (0x8, _, _, 0xE) => ShiftLeft(x, y),
            (0x9, _, _, 0x0) => SkipIfRegistersNotEqual(x, y),
            (0xA, _, _, _) => LoadIndex(nnn),
            (0xB, _, _, _) => JumpWithOffset(nnn),
            (0xC, _, _, _) => Random(x, nn),
            (0xD, _, _, _) => Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => SkipIfKeyPressed(x),
            (0xE, _, 0xA, 0x1) => SkipIfKeyNotPressed(x),
            (0xF, _, 0x0, 0x7) => ReadDelayTimer(x),
            (0xF, _, 0x0, 0xA) => WaitForKey(x),
            (0xF, _, 0x1, 0x5) => SetDelayTimer(x),
            (0xF, _, 0x1, 0x8) => SetSoundTimer(x),
            (0xF, _, 0x1, 0xE) => AddToIndex(x),
            (0xF, _, 0x2, 0x9) => LoadGlyph(x),
            (0xF, _, 0x3, 0x3) => StoreBcd(x),
            (0xF, _, 0x5, 0x5) => StoreRegisters(x),
            (0xF, _, 0x6, 0x5) => LoadRegisters(x),
            _ => return Err(Error::UnknownOpcode(opcode)),
        };
        Ok(instruction)
    }
}

/// Cowgod-style mnemonics, used for tracing
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(a) => write!(f, "JP 0x{:03x}", a),
            Call(a) => write!(f, "CALL 0x{:03x}", a),
            SkipIfEqual(x, nn) => write!(f, "SE V{:X}, 0x{:02x}", x, nn),
            SkipIfNotEqual(x, nn) => write!(f, "SNE V{:X}, 0x{:02x}", x, nn),
            SkipIfRegistersEqual(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Load(x, nn) => write!(f, "LD V{:X}, 0x{:02x}", x, nn),
            AddImmediate(x, nn) => write!(f, "ADD V{:X}, 0x{:02x}", x, nn),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x, y) => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubReversed(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x, y) => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipIfRegistersNotEqual(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(a) => write!(f, "LD I, 0x{:03x}", a),
            JumpWithOffset(a) => write!(f, "JP V0, 0x{:03x}", a),
            Random(x, nn) => write!(f, "RND V{:X}, 0x{:02x}", x, nn),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyPressed(x) => write!(f, "SKP V{:X}", x),
            SkipIfKeyNotPressed(x) => write!(f, "SKNP V{:X}", x),
            ReadDelayTimer(x) => write!(f, "LD V{:X}, DT", x),
            WaitForKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelayTimer(x) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer(x) => write!(f, "LD ST, V{:X}", x),
            AddToIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
