use tracing::{trace, warn};

use crate::{
    bus::Bus,
    dma::Dma,
    error::Result,
    keypad::InputDevice,
    memory::{cpu as cpu_mem, ppu::Register},
    ppu::Ppu,
    ram::cpu::WorkRam,
    rom::Rom,
};

/// CPU-visible bus. It borrows the devices from the owning [`crate::Nes`]
/// for the duration of one instruction.
#[derive(Debug)]
pub struct CpuBus<'a> {
    ram: &'a mut WorkRam,
    program_rom: &'a Rom,
    ppu: &'a mut Ppu,
    dma: &'a mut Dma,
    keypad: &'a mut dyn InputDevice,
}

impl<'a> CpuBus<'a> {
    pub fn new(
        ram: &'a mut WorkRam,
        program_rom: &'a Rom,
        ppu: &'a mut Ppu,
        dma: &'a mut Dma,
        keypad: &'a mut dyn InputDevice,
    ) -> Self {
        Self {
            ram,
            program_rom,
            ppu,
            dma,
            keypad,
        }
    }

    fn read_program_rom(&self, addr: u16) -> Result<u8> {
        // A single 16 KiB bank answers in both halves of the window.
        let offset = if addr >= cpu_mem::PRG_ROM_UPPER
            && self.program_rom.size() <= cpu_mem::PRG_BANK_SIZE
        {
            addr - cpu_mem::PRG_ROM_UPPER
        } else {
            addr - cpu_mem::PRG_ROM_START
        };
        self.program_rom.read(offset as usize)
    }

    fn work_ram_index(addr: u16) -> usize {
        (addr & cpu_mem::WORK_RAM_MASK) as usize
    }
}

impl Bus for CpuBus<'_> {
    fn mem_read(&mut self, addr: u16) -> Result<u8> {
        let value = match addr {
            0x0000..=cpu_mem::WORK_RAM_MIRROR_END => self.ram.read(Self::work_ram_index(addr)),
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                self.ppu.read_register(Register::from_addr(addr))
            }
            cpu_mem::KEYPAD_PORT => self.keypad.read() as u8,
            cpu_mem::PRG_ROM_START..=0xFFFF => self.read_program_rom(addr)?,
            _ => {
                trace!("read from unmapped {:#06x}", addr);
                0
            }
        };
        Ok(value)
    }

    fn mem_write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=cpu_mem::WORK_RAM_MIRROR_END => {
                self.ram.write(Self::work_ram_index(addr), data)
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => {
                self.ppu.write_register(Register::from_addr(addr), data)
            }
            cpu_mem::OAM_DMA => self.dma.write(data),
            cpu_mem::KEYPAD_PORT => self.keypad.write(data),
            cpu_mem::PRG_ROM_START..=0xFFFF => {
                warn!("write {:#04x} to program rom at {:#06x} ignored", data, addr)
            }
            _ => trace!("write {:#04x} to unmapped {:#06x} ignored", data, addr),
        }
    }
}
