use core::fmt;

/// Session-wide emulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Config {
    pub dma_timing: DmaTiming,
}

/// How many CPU cycles an OAM DMA transfer stalls the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DmaTiming {
    /// 513 cycles when the transfer starts on an even CPU cycle, 514 on odd.
    #[default]
    Aligned,
    /// Always 514 cycles.
    Fixed,
}

impl DmaTiming {
    /// Stall charged for a transfer starting at `cpu_cycle`.
    pub fn stall_cycles(self, cpu_cycle: u64) -> u32 {
        match self {
            DmaTiming::Aligned => 513 + (cpu_cycle & 1) as u32,
            DmaTiming::Fixed => 514,
        }
    }
}

impl fmt::Display for DmaTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DmaTiming::Aligned => "aligned",
            DmaTiming::Fixed => "fixed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::DmaTiming;

    #[test]
    fn aligned_stall_depends_on_parity() {
        assert_eq!(DmaTiming::Aligned.stall_cycles(10), 513);
        assert_eq!(DmaTiming::Aligned.stall_cycles(11), 514);
        assert_eq!(DmaTiming::Fixed.stall_cycles(10), 514);
        assert_eq!(DmaTiming::Fixed.stall_cycles(11), 514);
    }
}
