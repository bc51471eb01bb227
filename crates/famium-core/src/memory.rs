//! Address map constants shared by the buses, the CPU and the PPU.
//!
//! Keeping the layout in one place stops magic numbers from leaking into the
//! device code and makes the routing in [`crate::bus`] easy to audit.

/// CPU address space.
pub mod cpu {
    /// First address of the hardware stack page.
    pub const STACK_PAGE_START: u16 = 0x0100;

    /// Reset vector (`$FFFC`, little-endian word).
    pub const RESET_VECTOR: u16 = 0xFFFC;
    /// NMI vector (`$FFFA`, little-endian word).
    pub const NMI_VECTOR: u16 = 0xFFFA;
    /// IRQ/BRK vector (`$FFFE`, little-endian word).
    pub const IRQ_VECTOR: u16 = 0xFFFE;

    /// Size of the work RAM block (2 KiB mirrored through `$1FFF`).
    pub const WORK_RAM_SIZE: usize = 0x0800;
    /// Last address decoded to work RAM.
    pub const WORK_RAM_MIRROR_END: u16 = 0x1FFF;
    /// Mask folding work RAM mirrors onto the backing 2 KiB.
    pub const WORK_RAM_MASK: u16 = (WORK_RAM_SIZE as u16) - 1;

    /// First CPU address of the PPU register window.
    pub const PPU_REGISTER_BASE: u16 = 0x2000;
    /// Last CPU address of the PPU register window.
    pub const PPU_REGISTER_END: u16 = 0x3FFF;

    /// OAM DMA trigger register.
    pub const OAM_DMA: u16 = 0x4014;
    /// Keypad strobe/read port.
    pub const KEYPAD_PORT: u16 = 0x4016;

    /// First address of the program ROM window.
    pub const PRG_ROM_START: u16 = 0x8000;
    /// Upper half of the program ROM window.
    pub const PRG_ROM_UPPER: u16 = 0xC000;
    /// Size of one program ROM bank; images of this size or less are mirrored.
    pub const PRG_BANK_SIZE: usize = 0x4000;
}

/// PPU address space and register layout.
pub mod ppu {
    /// Mask for decoding register mirrors (`addr & 0x0007`).
    pub const REGISTER_SELECT_MASK: u16 = 0x0007;

    /// Character memory visible through [`crate::bus::PpuBus`].
    pub const CHARACTER_MEMORY_SIZE: usize = 0x4000;
    /// Nametable/attribute memory backing `$2000-$3EFF`.
    pub const VRAM_SIZE: usize = 0x2000;
    /// First VRAM address seen through the data port.
    pub const NAMETABLE_BASE: u16 = 0x2000;
    /// Start of the `$3000-$3EFF` nametable mirror.
    pub const NAMETABLE_MIRROR_BASE: u16 = 0x3000;
    /// Offset of the attribute table inside a nametable.
    pub const ATTRIBUTE_TABLE_OFFSET: usize = 0x03C0;
    /// Size of one nametable quadrant.
    pub const NAMETABLE_SIZE: usize = 0x0400;
    /// Mask applied to the VRAM address latch (14-bit space).
    pub const VRAM_ADDR_MASK: u16 = 0x3FFF;

    /// Palette RAM base address (`$3F00`).
    pub const PALETTE_BASE: u16 = 0x3F00;
    /// Palette RAM byte count.
    pub const PALETTE_RAM_SIZE: usize = 0x20;

    /// Pattern tables selected by the control register.
    pub const PATTERN_TABLE_0: usize = 0x0000;
    pub const PATTERN_TABLE_1: usize = 0x1000;
    /// Bytes per 8x8 tile: two bit planes of eight rows.
    pub const TILE_BYTES: usize = 16;

    /// Object attribute memory byte count (64 sprites x 4 bytes).
    pub const OAM_SIZE: usize = 0x100;

    /// CPU-visible PPU registers, indexed by `addr & 7`.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$2000` - control 1
        Control = 0,
        /// `$2001` - control 2 (mask)
        Mask = 1,
        /// `$2002` - status
        Status = 2,
        /// `$2003` - OAM address
        OamAddr = 3,
        /// `$2004` - OAM data
        OamData = 4,
        /// `$2005` - scroll
        Scroll = 5,
        /// `$2006` - VRAM address
        Addr = 6,
        /// `$2007` - VRAM data
        Data = 7,
    }

    impl Register {
        /// Resolves the register for any address of the mirrored window.
        pub const fn from_addr(addr: u16) -> Self {
            match addr & REGISTER_SELECT_MASK {
                0 => Self::Control,
                1 => Self::Mask,
                2 => Self::Status,
                3 => Self::OamAddr,
                4 => Self::OamData,
                5 => Self::Scroll,
                6 => Self::Addr,
                _ => Self::Data,
            }
        }
    }
}
