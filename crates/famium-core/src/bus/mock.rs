use crate::{bus::Bus, error::Result};

/// Flat 64 KiB address space for exercising the CPU without devices.
#[derive(Debug)]
pub(crate) struct MockBus {
    pub(crate) mem: Box<[u8; 0x10000]>,
}

impl MockBus {
    /// Places `program` at `origin` and points the reset vector at it.
    pub(crate) fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        let start = origin as usize;
        bus.mem[start..start + program.len()].copy_from_slice(program);
        bus.mem[0xFFFC] = origin as u8;
        bus.mem[0xFFFD] = (origin >> 8) as u8;
        bus
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self {
            mem: Box::new([0; 0x10000]),
        }
    }
}

impl Bus for MockBus {
    fn mem_read(&mut self, addr: u16) -> Result<u8> {
        Ok(self.mem[addr as usize])
    }

    fn mem_write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
    }
}
