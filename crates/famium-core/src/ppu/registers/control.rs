use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

bitflags! {
    /// PPU control register (`$2000`).
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N M S B s I n n
    /// ```
    /// - `n n`: base nametable select
    /// - `I`: VRAM increment (0=+1, 1=+32)
    /// - `s`: sprite pattern table
    /// - `B`: background pattern table
    /// - `S`: sprite size (stored, 8x8 only is rendered)
    /// - `M`: master/slave select
    /// - `N`: generate NMI at VBlank start
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct Control: u8 {
        /// Base nametable, `00`=`$2000` .. `11`=`$2C00`. Drives the coarse scroll.
        const NAMETABLE = 0b0000_0011;

        const INCREMENT_32 = 0b0000_0100;

        /// `0` uses `$0000`, `1` uses `$1000`.
        const SPRITE_TABLE = 0b0000_1000;

        /// `0` uses `$0000`, `1` uses `$1000`.
        const BACKGROUND_TABLE = 0b0001_0000;

        const SPRITE_SIZE_16 = 0b0010_0000;

        const MASTER_SLAVE = 0b0100_0000;

        const GENERATE_NMI = 0b1000_0000;
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::empty()
    }
}

impl Control {
    /// Returns the nametable select bits (0..3).
    pub(crate) fn nametable_index(self) -> u8 {
        self.bits() & Control::NAMETABLE.bits()
    }

    /// Returns the VRAM increment amount (1 or 32) based on bit 2.
    pub(crate) fn vram_increment(self) -> u16 {
        if self.contains(Control::INCREMENT_32) {
            32
        } else {
            1
        }
    }

    /// Returns the sprite pattern table base address.
    pub(crate) fn sprite_pattern_table(self) -> usize {
        if self.contains(Control::SPRITE_TABLE) {
            ppu_mem::PATTERN_TABLE_1
        } else {
            ppu_mem::PATTERN_TABLE_0
        }
    }

    /// Returns the background pattern table base address.
    pub(crate) fn background_pattern_table(self) -> usize {
        if self.contains(Control::BACKGROUND_TABLE) {
            ppu_mem::PATTERN_TABLE_1
        } else {
            ppu_mem::PATTERN_TABLE_0
        }
    }

    /// Indicates whether the PPU should fire an NMI at the start of VBlank.
    pub(crate) fn nmi_enabled(self) -> bool {
        self.contains(Control::GENERATE_NMI)
    }
}
