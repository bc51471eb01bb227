//! Palette RAM (`$3F00-$3F1F`, mirrored through `$3FFF`).

use crate::{memory::ppu as ppu_mem, ram::ppu::PaletteRam};

/// Resolved palette handed to the renderer, one hardware colour index per entry.
pub type PaletteTable = [u8; ppu_mem::PALETTE_RAM_SIZE];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Palette {
    ram: PaletteRam,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// `$3F10/$3F14/$3F18/$3F1C` share storage with the background entries 0x10 below.
    fn is_sprite_mirror(index: usize) -> bool {
        matches!(index, 0x10 | 0x14 | 0x18 | 0x1C)
    }

    /// `$3F04/$3F08/$3F0C` display as the universal background colour.
    fn is_background_mirror(index: usize) -> bool {
        matches!(index, 0x04 | 0x08 | 0x0C)
    }

    /// Storage slot for a PPU address in the palette window.
    fn slot(addr: u16) -> usize {
        let index = (addr & 0xFF) as usize % ppu_mem::PALETTE_RAM_SIZE;
        if Self::is_sprite_mirror(index) {
            index - 0x10
        } else {
            index
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.ram.read(Self::slot(addr))
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.ram.write(Self::slot(addr), data);
    }

    /// Snapshot with both mirroring rules applied.
    pub fn resolved(&self) -> PaletteTable {
        std::array::from_fn(|i| {
            if Self::is_sprite_mirror(i) {
                self.ram.read(i - 0x10)
            } else if Self::is_background_mirror(i) {
                self.ram.read(0x00)
            } else {
                self.ram.read(i)
            }
        })
    }
}
