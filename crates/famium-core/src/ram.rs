use core::ops::{Deref, DerefMut};

/// Fixed-size, zero-initialised byte bank.
///
/// Addresses index the bank directly; mirroring is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ram<const N: usize>(Box<[u8; N]>);

pub mod cpu {
    use crate::memory::cpu as cpu_mem;

    pub type WorkRam = super::Ram<{ cpu_mem::WORK_RAM_SIZE }>;
}

pub mod ppu {
    use crate::memory::ppu as ppu_mem;

    pub type CharacterRam = super::Ram<{ ppu_mem::CHARACTER_MEMORY_SIZE }>;
    pub type Vram = super::Ram<{ ppu_mem::VRAM_SIZE }>;
    pub type PaletteRam = super::Ram<{ ppu_mem::PALETTE_RAM_SIZE }>;
    pub type OamRam = super::Ram<{ ppu_mem::OAM_SIZE }>;
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self(Box::new([0; N]))
    }

    pub fn read(&self, addr: usize) -> u8 {
        self.0[addr]
    }

    pub fn write(&mut self, addr: usize, value: u8) {
        self.0[addr] = value;
    }

    /// Zeroes every byte.
    pub fn reset(&mut self) {
        self.0.fill(0);
    }

    pub fn size(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for Ram<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl<const N: usize> DerefMut for Ram<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut_slice()
    }
}
