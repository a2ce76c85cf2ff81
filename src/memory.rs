use crate::error::Error;
use crate::font::FONT_SIZE_BYTES;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const MEMORY_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// where the hex font lives; FX29 computes glyph addresses from zero
pub const FONT_ADDR: u16 = 0x0000;

/// Defines the CHIP-8 memory map
///
///   0x0000-0x004f  font glyphs
///   0x0050-0x01ff  reserved for the interpreter
///   0x0200-0x0fff  program
///
/// the stack, timers and display live outside addressable memory, so chip-8
/// programs can't scribble over them
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: vec![0u8; MEMORY_SIZE_BYTES].into_boxed_slice(),
        }
    }

    /// room left for a program above the reserved area
    pub const fn program_capacity() -> usize {
        MEMORY_SIZE_BYTES - PROGRAM_ADDR as usize
    }

    /// zero everything, then bake the font back in
    pub fn reset(&mut self, glyphs: &[u8; FONT_SIZE_BYTES]) {
        self.bytes.fill(0);
        let start = FONT_ADDR as usize;
        self.bytes[start..start + FONT_SIZE_BYTES].copy_from_slice(glyphs);
    }

    /// copy a chunk of bytes into "RAM"
    pub fn write(&mut self, addr: u16, data: &[u8]) -> Result<(), Error> {
        let dst = self.get_rw_slice(addr, data.len())?;
        dst.copy_from_slice(data);
        Ok(())
    }

    /// get a two-byte big-endian instruction word
    pub fn fetch(&self, addr: u16) -> Result<u16, Error> {
        let word = self
            .get_ro_slice(addr, 2)
            .map_err(|_| Error::FetchOutOfBounds(addr))?;
        Ok(((word[0] as u16) << 8) | (word[1] as u16))
    }

    /// get a r/o slice of the underlying memory
    pub fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8], Error> {
        let a = self.check_range(addr, len)?;
        Ok(&self.bytes[a..a + len])
    }

    /// get a r/w slice of the underlying memory
    pub fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Error> {
        let a = self.check_range(addr, len)?;
        Ok(&mut self.bytes[a..a + len])
    }

    fn check_range(&self, addr: u16, len: usize) -> Result<usize, Error> {
        let a = addr as usize;
        if a + len > self.bytes.len() {
            // report the first address that doesn't exist
            let bad = a.max(self.bytes.len());
            return Err(Error::AddressOutOfBounds(bad.min(u16::MAX as usize) as u16));
        }
        Ok(a)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{ContemporaryFont, FontProvider};

    #[test]
    fn test_memory_zeroed() {
        let mut m = Memory::new();
        m.write(0x300, &[1, 2, 3]).unwrap();
        m.reset(ContemporaryFont.glyphs());
        // NB. memory is zeroed from 0x50 because before that we bake in the font
        assert!(m.bytes[FONT_SIZE_BYTES..].iter().all(|b| *b == 0));
        assert_eq!(&m.bytes[..FONT_SIZE_BYTES], &ContemporaryFont.glyphs()[..]);
    }

    #[test]
    fn test_write_slice_ok() -> Result<(), Error> {
        let mut dst = Memory::new();
        dst.write(8, &[0, 1, 2, 3, 4, 5, 6, 7])?;
        assert_eq!(
            dst.bytes[..16],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
        Ok(())
    }

    #[test]
    fn test_read_word() -> Result<(), Error> {
        let mut m = Memory::new();
        m.write(0, &[0, 1, 2, 3, 4, 5, 6, 7])?;
        assert_eq!(m.fetch(0x4)?, 0x0405);
        Ok(())
    }

    #[test]
    fn test_fetch_last_word() -> Result<(), Error> {
        let mut m = Memory::new();
        m.write(0xffe, &[0x12, 0x34])?;
        assert_eq!(m.fetch(0xffe)?, 0x1234);
        Ok(())
    }

    #[test]
    fn test_fetch_past_end() {
        let m = Memory::new();
        assert!(matches!(m.fetch(0xfff), Err(Error::FetchOutOfBounds(0xfff))));
        assert!(matches!(m.fetch(0x1000), Err(Error::FetchOutOfBounds(0x1000))));
    }

    #[test]
    fn test_write_too_much() {
        let mut dst = Memory::new();
        let r = dst.write(4089, &[0; 8]);
        assert!(matches!(r, Err(Error::AddressOutOfBounds(0x1000))));
    }

    #[test]
    fn test_read_ro() -> Result<(), Error> {
        let m = Memory::new();
        assert_eq!(m.get_ro_slice(0, 8)?, &[0, 0, 0, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_program_capacity() {
        assert_eq!(Memory::program_capacity(), 0xe00);
    }
}
