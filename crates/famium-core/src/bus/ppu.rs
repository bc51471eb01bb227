use crate::{memory::ppu as ppu_mem, ram::ppu::CharacterRam};

/// PPU-side bus: pattern-table traffic lands in character memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PpuBus {
    character: CharacterRam,
}

impl PpuBus {
    /// Copies the cartridge's character ROM into character memory.
    pub fn new(character_rom: &[u8]) -> Self {
        let mut character = CharacterRam::new();
        let len = character_rom.len().min(ppu_mem::CHARACTER_MEMORY_SIZE);
        character[..len].copy_from_slice(&character_rom[..len]);
        Self { character }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.character.read(Self::index(addr))
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.character.write(Self::index(addr), data);
    }

    fn index(addr: u16) -> usize {
        (addr as usize) % ppu_mem::CHARACTER_MEMORY_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::PpuBus;

    #[test]
    fn character_rom_is_copied_and_writable() {
        let mut bus = PpuBus::new(&[0x11, 0x22, 0x33]);
        assert_eq!(bus.read(0x0001), 0x22);
        assert_eq!(bus.read(0x0003), 0x00);

        bus.write(0x1FFF, 0xAB);
        assert_eq!(bus.read(0x1FFF), 0xAB);
    }
}
