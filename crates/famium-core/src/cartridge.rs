//! Decoded cartridge image.
//!
//! The core never parses container formats; a frontend loader produces a
//! [`Cartridge`] and hands it to [`crate::Nes::new`].

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cartridge {
    /// Nametable arrangement. `true` mirrors 0x2400 onto 0x2000.
    pub is_horizontal_mirror: bool,
    pub program_rom: Vec<u8>,
    pub character_rom: Vec<u8>,
}

impl Cartridge {
    pub fn new(is_horizontal_mirror: bool, program_rom: Vec<u8>, character_rom: Vec<u8>) -> Self {
        Self {
            is_horizontal_mirror,
            program_rom,
            character_rom,
        }
    }
}

impl Display for Cartridge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "prg {} KiB, chr {} KiB, {} mirroring",
            self.program_rom.len() / 1024,
            self.character_rom.len() / 1024,
            if self.is_horizontal_mirror {
                "horizontal"
            } else {
                "vertical"
            }
        )
    }
}
