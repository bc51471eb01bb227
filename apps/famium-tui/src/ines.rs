//! iNES container loader.
//!
//! Splits a `.nes` dump into the pieces [`famium_core::Nes`] consumes. Only
//! the iNES 1.0 fields the console model uses are decoded; the mapper number
//! is reported but every cartridge runs with fixed NROM banking.

use std::{fs, io, path::Path};

use bitflags::bitflags;
use famium_core::cartridge::Cartridge;
use thiserror::Error;
use tracing::{info, warn};

const NES_MAGIC: &[u8; 4] = b"NES\x1A";

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
pub const PRG_PAGE_SIZE: usize = 0x4000;
pub const CHR_PAGE_SIZE: usize = 0x2000;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        /// Set for vertical arrangement (horizontal mirroring when clear).
        const MIRRORING        = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("file is {actual} bytes, shorter than the {HEADER_LEN}-byte iNES header")]
    TooShort { actual: usize },
    #[error("missing NES\\x1A magic")]
    InvalidMagic,
    #[error("{section} needs {expected} bytes but only {available} remain")]
    SectionTooShort {
        section: &'static str,
        expected: usize,
        available: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub prg_pages: u8,
    pub chr_pages: u8,
    pub flags6: Flags6,
    pub mapper: u8,
}

impl Header {
    pub fn parse(bytes: &[u8]) -> Result<Self, CartridgeError> {
        if bytes.len() < HEADER_LEN {
            return Err(CartridgeError::TooShort {
                actual: bytes.len(),
            });
        }
        if &bytes[0..4] != NES_MAGIC {
            return Err(CartridgeError::InvalidMagic);
        }
        let flags6 = Flags6::from_bits_retain(bytes[6]);
        Ok(Self {
            prg_pages: bytes[4],
            chr_pages: bytes[5],
            flags6,
            mapper: (bytes[6] >> 4) | (bytes[7] & 0xF0),
        })
    }

    pub fn is_horizontal_mirror(&self) -> bool {
        !self.flags6.contains(Flags6::MIRRORING)
    }

    pub fn prg_len(&self) -> usize {
        self.prg_pages as usize * PRG_PAGE_SIZE
    }

    pub fn chr_len(&self) -> usize {
        self.chr_pages as usize * CHR_PAGE_SIZE
    }
}

fn section<'a>(
    bytes: &'a [u8],
    start: usize,
    len: usize,
    name: &'static str,
) -> Result<&'a [u8], CartridgeError> {
    bytes
        .get(start..start + len)
        .ok_or(CartridgeError::SectionTooShort {
            section: name,
            expected: len,
            available: bytes.len().saturating_sub(start),
        })
}

/// Splits an in-memory iNES image.
pub fn parse(bytes: &[u8]) -> Result<Cartridge, CartridgeError> {
    let header = Header::parse(bytes)?;
    info!(
        "rom size {:#x}, prg pages {}, chr pages {}, mapper {}",
        bytes.len(),
        header.prg_pages,
        header.chr_pages,
        header.mapper
    );
    if header.mapper != 0 {
        warn!("mapper {} is not emulated, banking stays fixed", header.mapper);
    }

    let mut offset = HEADER_LEN;
    if header.flags6.contains(Flags6::TRAINER) {
        section(bytes, offset, TRAINER_LEN, "trainer")?;
        offset += TRAINER_LEN;
    }
    let program_rom = section(bytes, offset, header.prg_len(), "program rom")?;
    offset += header.prg_len();
    let character_rom = section(bytes, offset, header.chr_len(), "character rom")?;

    Ok(Cartridge::new(
        header.is_horizontal_mirror(),
        program_rom.to_vec(),
        character_rom.to_vec(),
    ))
}

pub fn load(path: impl AsRef<Path>) -> Result<Cartridge, CartridgeError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}
