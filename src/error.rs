use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Everything that can stop a CHIP-8 program.
///
/// Load errors leave the interpreter in its reset state. Everything else is
/// fatal to the running program: the host should halt and report it.
#[derive(Debug)]
pub enum Error {
    /// the catalog couldn't read the ROM bytes
    RomNotFound { identifier: String, source: io::Error },
    /// ROM doesn't fit the profile's limit or the program area
    RomTooLarge { size: usize, max: usize },
    /// PC points past the last complete instruction word
    FetchOutOfBounds(u16),
    UnknownOpcode(u16),
    /// 0nnn native routine calls
    UnsupportedLegacyOpcode(u16),
    StackOverflow,
    StackUnderflow,
    /// I-relative access ran off the end of memory
    AddressOutOfBounds(u16),
    /// terminal adapters
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RomNotFound { identifier, source } => {
                write!(f, "ROM not found: {} ({})", identifier, source)
            }
            Error::RomTooLarge { size, max } => write!(
                f,
                "ROM too large: {} bytes, maximum supported is {} bytes",
                size, max
            ),
            Error::FetchOutOfBounds(pc) => {
                write!(f, "instruction fetch out of bounds at 0x{:04x}", pc)
            }
            Error::UnknownOpcode(op) => write!(f, "unknown opcode 0x{:04x}", op),
            Error::UnsupportedLegacyOpcode(op) => {
                write!(f, "machine code routine 0x{:04x} is not supported", op)
            }
            Error::StackOverflow => write!(f, "call stack overflow"),
            Error::StackUnderflow => write!(f, "return with an empty call stack"),
            Error::AddressOutOfBounds(addr) => {
                write!(f, "memory access out of bounds at 0x{:04x}", addr)
            }
            Error::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::RomNotFound { source, .. } => Some(source),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
