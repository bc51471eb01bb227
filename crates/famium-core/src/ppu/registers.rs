//! CPU-visible PPU register state and the latches behind `$2005`-`$2007`.

mod control;
mod mask;
mod status;

pub(crate) use control::Control;
pub(crate) use mask::Mask;
pub(crate) use status::Status;

use crate::{memory::ppu as ppu_mem, ram::ppu::OamRam};

/// Aggregates the state of all CPU visible PPU registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Registers {
    /// Control 1 (`$2000`).
    pub(crate) control: Control,
    /// Control 2 (`$2001`).
    pub(crate) mask: Mask,
    /// Status (`$2002`).
    pub(crate) status: Status,
    /// OAM pointer driven by `$2003`/`$2004`.
    pub(crate) oam_addr: u8,
    /// Sprite memory reachable through `$2004` and OAM DMA.
    pub(crate) oam: OamRam,
    /// 14-bit VRAM address set through `$2006`.
    pub(crate) vram_addr: u16,
    /// Delayed `$2007` read value.
    pub(crate) vram_buffer: u8,
    pub(crate) scroll_x: u8,
    pub(crate) scroll_y: u8,
    /// Next `$2005` write targets Y when set.
    scroll_latch: bool,
    /// Next `$2006` write is the low byte when set.
    addr_latch: bool,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub(crate) fn new() -> Self {
        Self {
            control: Control::default(),
            mask: Mask::default(),
            status: Status::default(),
            oam_addr: 0,
            oam: OamRam::new(),
            vram_addr: 0,
            vram_buffer: 0,
            scroll_x: 0,
            scroll_y: 0,
            scroll_latch: false,
            addr_latch: false,
        }
    }

    /// Status read side effect: both write toggles go back to their first write.
    pub(crate) fn reset_latches(&mut self) {
        self.scroll_latch = false;
        self.addr_latch = false;
    }

    /// `$2005`: X on the first write, Y on the second.
    pub(crate) fn write_scroll(&mut self, value: u8) {
        if self.scroll_latch {
            self.scroll_y = value;
        } else {
            self.scroll_x = value;
        }
        self.scroll_latch = !self.scroll_latch;
    }

    /// `$2006`: high byte first, then the low byte is added.
    pub(crate) fn write_addr(&mut self, value: u8) {
        if self.addr_latch {
            self.vram_addr = self.vram_addr.wrapping_add(value as u16);
        } else {
            self.vram_addr = (value as u16) << 8;
        }
        self.vram_addr &= ppu_mem::VRAM_ADDR_MASK;
        self.addr_latch = !self.addr_latch;
    }

    /// Advances the VRAM address after a `$2007` access.
    pub(crate) fn increment_vram_addr(&mut self) {
        self.vram_addr =
            self.vram_addr.wrapping_add(self.control.vram_increment()) & ppu_mem::VRAM_ADDR_MASK;
    }

    pub(crate) fn write_oam_data(&mut self, value: u8) {
        self.oam.write(self.oam_addr as usize, value);
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    pub(crate) fn read_oam_data(&self) -> u8 {
        self.oam.read(self.oam_addr as usize)
    }
}
