use std::fmt;
use std::str::FromStr;

/// The machine a ROM was written for; each one implies a default set of quirks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// original COSMAC VIP interpreter
    Chip8,
    SuperChip,
    Octo,
    XoChip,
}

impl Platform {
    /// guess the platform from a ROM's file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "8o" => Platform::XoChip,
            "sch8" => Platform::SuperChip,
            _ => Platform::Chip8,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Chip8 => "chip8",
            Platform::SuperChip => "schip",
            Platform::Octo => "octo",
            Platform::XoChip => "xochip",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Platform::Chip8),
            "schip" | "superchip" | "super-chip" => Ok(Platform::SuperChip),
            "octo" => Ok(Platform::Octo),
            "xochip" | "xo-chip" => Ok(Platform::XoChip),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

/// Behavioural switches for one loaded program.
///
/// Historical interpreters disagree on a handful of opcodes; ROMs written for
/// one of them often break on another. A profile is picked when the program is
/// loaded and stays fixed until the next load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuirkProfile {
    /// 8XY6/8XYE shift VX in place instead of reading VY
    pub shift: bool,
    /// FX55/FX65 leave I untouched
    pub load_store: bool,
    /// 8XY1/8XY2/8XY3 reset VF
    pub logic: bool,
    /// after a flag write, the result is written again so a VF destination
    /// ends up holding the result rather than the flag
    pub vf_order: bool,
    /// DXYN drops pixels past the screen edge instead of wrapping them
    pub clip: bool,
    /// BNNN jumps to NNN + VX (X being the top nibble of NNN) instead of V0
    pub jump: bool,
    /// DXYN waits for the 60Hz tick
    pub vblank: bool,
    /// instructions per second
    pub clock_speed: u32,
    /// largest ROM, in bytes
    pub max_rom_size: usize,
}

impl QuirkProfile {
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Chip8 => QuirkProfile {
                shift: false,
                load_store: false,
                logic: true,
                vf_order: false,
                clip: true,
                jump: false,
                vblank: true,
                clock_speed: 500,
                max_rom_size: 3215,
            },
            Platform::SuperChip => QuirkProfile {
                shift: true,
                load_store: true,
                logic: false,
                vf_order: false,
                clip: true,
                jump: true,
                vblank: false,
                clock_speed: 500,
                max_rom_size: 3583,
            },
            Platform::Octo => QuirkProfile {
                shift: false,
                load_store: false,
                logic: false,
                vf_order: false,
                clip: false,
                jump: false,
                vblank: false,
                clock_speed: 500,
                max_rom_size: 3584,
            },
            Platform::XoChip => QuirkProfile {
                shift: false,
                load_store: false,
                logic: false,
                vf_order: false,
                clip: false,
                jump: false,
                vblank: false,
                clock_speed: 500,
                max_rom_size: 65024,
            },
        }
    }
}

impl Default for QuirkProfile {
    fn default() -> Self {
        QuirkProfile::for_platform(Platform::Chip8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chip8() {
        assert_eq!(
            QuirkProfile::default(),
            QuirkProfile::for_platform(Platform::Chip8)
        );
    }

    #[test]
    fn test_superchip_quirks() {
        let p = QuirkProfile::for_platform(Platform::SuperChip);
        assert!(p.shift && p.load_store && p.jump && p.clip);
        assert!(!p.logic && !p.vblank);
        assert_eq!(p.max_rom_size, 3583);
    }

    #[test]
    fn test_platform_from_extension() {
        assert_eq!(Platform::from_extension("8o"), Platform::XoChip);
        assert_eq!(Platform::from_extension("SCH8"), Platform::SuperChip);
        assert_eq!(Platform::from_extension("ch8"), Platform::Chip8);
        assert_eq!(Platform::from_extension(""), Platform::Chip8);
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("schip".parse::<Platform>(), Ok(Platform::SuperChip));
        assert_eq!("XO-CHIP".parse::<Platform>(), Ok(Platform::XoChip));
        assert!("gameboy".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_display_parses_back() {
        for p in [
            Platform::Chip8,
            Platform::SuperChip,
            Platform::Octo,
            Platform::XoChip,
        ] {
            assert_eq!(p.to_string().parse::<Platform>(), Ok(p));
        }
    }
}
