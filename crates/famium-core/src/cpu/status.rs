use bitflags::bitflags;

bitflags! {
    /// Processor status register (P).
    ///
    /// Bit layout:
    /// 7 6 5 4 3 2 1 0
    /// N V R B D I Z C
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry out of bit 7, or "no borrow" after a subtraction.
        const CARRY     = 0b0000_0001;

        /// Last result was zero.
        const ZERO      = 0b0000_0010;

        /// Masks IRQ when set. NMI ignores it.
        const INTERRUPT = 0b0000_0100;

        /// Stored and restored, but arithmetic stays binary.
        const DECIMAL   = 0b0000_1000;

        /// Set in the copy pushed by BRK, PHP and interrupt entry.
        const BREAK     = 0b0001_0000;

        /// Always reads back as 1 after a pull.
        const RESERVED  = 0b0010_0000;

        /// Signed overflow.
        const OVERFLOW  = 0b0100_0000;

        /// Bit 7 of the last result.
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Status {
    /// Power-on value: reserved, break and interrupt-disable set (`0x34`).
    pub const fn new() -> Self {
        Status::RESERVED.union(Status::BREAK).union(Status::INTERRUPT)
    }

    pub fn update_zero(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
    }

    pub fn update_negative(&mut self, value: u8) {
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Updates Z and N from `value`.
    pub fn set_zn(&mut self, value: u8) {
        self.update_zero(value);
        self.update_negative(value);
    }

    pub fn c(&self) -> bool {
        self.contains(Status::CARRY)
    }

    pub fn z(&self) -> bool {
        self.contains(Status::ZERO)
    }

    pub fn i(&self) -> bool {
        self.contains(Status::INTERRUPT)
    }

    pub fn v(&self) -> bool {
        self.contains(Status::OVERFLOW)
    }

    pub fn n(&self) -> bool {
        self.contains(Status::NEGATIVE)
    }

    /// Value restored by PLP and RTI: the reserved bit is forced on.
    pub fn from_pulled(byte: u8) -> Self {
        Status::from_bits_retain(byte) | Status::RESERVED
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn power_on_value() {
        assert_eq!(Status::new().bits(), 0x34);
    }

    #[test]
    fn zn_follow_value() {
        let mut p = Status::empty();
        p.set_zn(0);
        assert!(p.z() && !p.n());
        p.set_zn(0x80);
        assert!(!p.z() && p.n());
    }

    #[test]
    fn pulled_value_keeps_reserved() {
        assert_eq!(Status::from_pulled(0x00).bits(), 0x20);
        assert_eq!(Status::from_pulled(0xCF).bits(), 0xEF);
    }
}
