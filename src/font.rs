/// bytes per glyph; FX29 relies on this stride
pub const GLYPH_HEIGHT: u16 = 5;
/// 16 hex digits, 5 rows each
pub const FONT_SIZE_BYTES: usize = 16 * GLYPH_HEIGHT as usize;

/// Supplies the hex digit glyphs copied into low memory
pub trait FontProvider {
    fn glyphs(&self) -> &[u8; FONT_SIZE_BYTES];
}

/// the 4x5 font most modern interpreters ship
pub struct ContemporaryFont;

impl FontProvider for ContemporaryFont {
    fn glyphs(&self) -> &[u8; FONT_SIZE_BYTES] {
        &CONTEMPORARY_FONT
    }
}

const CONTEMPORARY_FONT: [u8; FONT_SIZE_BYTES] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
