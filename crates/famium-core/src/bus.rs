use std::fmt::Debug;

use crate::error::Result;

pub mod cpu;
#[cfg(test)]
pub(crate) mod mock;
pub mod ppu;

pub use cpu::CpuBus;
pub use ppu::PpuBus;

/// CPU-side address bus.
///
/// Reads are fallible because program ROM is bounds-checked; writes into
/// read-only space are dropped by the implementation.
pub trait Bus: Debug {
    fn mem_read(&mut self, addr: u16) -> Result<u8>;

    fn mem_write(&mut self, addr: u16, data: u8);

    /// Little-endian word at `addr`, `addr + 1` (16-bit wrap).
    fn read_word(&mut self, addr: u16) -> Result<u16> {
        let lo = self.mem_read(addr)? as u16;
        let hi = self.mem_read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }
}

// Lets `&mut CpuBus` and `&mut dyn Bus` flow into generic CPU helpers.
impl<T: Bus + ?Sized> Bus for &mut T {
    fn mem_read(&mut self, addr: u16) -> Result<u8> {
        (**self).mem_read(addr)
    }

    fn mem_write(&mut self, addr: u16, data: u8) {
        (**self).mem_write(addr, data)
    }

    fn read_word(&mut self, addr: u16) -> Result<u16> {
        (**self).read_word(addr)
    }
}
