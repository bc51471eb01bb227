//! OAM DMA unit.
//!
//! A write to `$4014` arms a transfer of one 256-byte work RAM page into PPU
//! sprite memory. The run loop services the transfer before the next CPU
//! instruction and charges the stall given by [`crate::config::DmaTiming`].

use tracing::debug;

use crate::{memory::cpu as cpu_mem, ppu::Ppu, ram::cpu::WorkRam};

/// Bytes moved by one transfer.
pub const TRANSFER_LEN: usize = 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dma {
    ram_addr: u16,
    processing: bool,
}

impl Dma {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Latches the source page and arms the transfer.
    pub fn write(&mut self, data: u8) {
        self.ram_addr = (data as u16) << 8;
        self.processing = true;
    }

    /// Copies the armed page into sprite memory and disarms.
    pub fn run(&mut self, ram: &WorkRam, ppu: &mut Ppu) {
        if !self.processing {
            return;
        }
        debug!("oam dma from {:#06x}", self.ram_addr);
        for i in 0..TRANSFER_LEN {
            let addr = self.ram_addr.wrapping_add(i as u16) & cpu_mem::WORK_RAM_MASK;
            ppu.transfer_sprite(i, ram.read(addr as usize));
        }
        self.processing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::PpuBus;

    #[test]
    fn page_two_lands_in_sprite_ram_unchanged() {
        let mut ram = WorkRam::new();
        for i in 0..0x100 {
            ram.write(0x200 + i, (i as u8).wrapping_mul(7) ^ 0x5A);
        }
        let mut ppu = Ppu::new(PpuBus::default(), false);
        let mut dma = Dma::new();

        dma.write(0x02);
        assert!(dma.is_processing());
        dma.run(&ram, &mut ppu);
        assert!(!dma.is_processing());

        assert_eq!(ppu.sprite_ram(), &ram[0x200..0x300]);
    }

    #[test]
    fn run_without_trigger_is_a_no_op() {
        let mut ram = WorkRam::new();
        ram.write(0, 0xFF);
        let mut ppu = Ppu::new(PpuBus::default(), false);
        let mut dma = Dma::new();

        dma.run(&ram, &mut ppu);
        assert!(ppu.sprite_ram().iter().all(|&b| b == 0));
    }
}
