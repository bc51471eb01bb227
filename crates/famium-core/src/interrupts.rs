//! Interrupt line shared by the CPU, the PPU and external devices.
//!
//! One instance exists per emulation session. It is owned by [`crate::Nes`]
//! and lent by `&mut` to whichever component is stepping, so signalling and
//! servicing never overlap.

/// Sticky NMI/IRQ request flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interrupts {
    nmi: bool,
    irq: bool,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_nmi_asserted(&self) -> bool {
        self.nmi
    }

    pub fn assert_nmi(&mut self) {
        self.nmi = true;
    }

    pub fn deassert_nmi(&mut self) {
        self.nmi = false;
    }

    pub fn is_irq_asserted(&self) -> bool {
        self.irq
    }

    pub fn assert_irq(&mut self) {
        self.irq = true;
    }

    pub fn deassert_irq(&mut self) {
        self.irq = false;
    }
}

#[cfg(test)]
mod tests {
    use super::Interrupts;

    #[test]
    fn lines_are_independent() {
        let mut line = Interrupts::new();
        line.assert_irq();
        assert!(line.is_irq_asserted());
        assert!(!line.is_nmi_asserted());

        line.assert_nmi();
        line.deassert_irq();
        assert!(line.is_nmi_asserted());
        assert!(!line.is_irq_asserted());

        line.deassert_nmi();
        assert_eq!(line, Interrupts::default());
    }
}
