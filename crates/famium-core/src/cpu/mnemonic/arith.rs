use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, mnemonic::Mnemonic, status::Status},
    error::Result,
};

impl Cpu {
    /// A ← A + M + C with binary carry and signed overflow.
    pub(crate) fn add_with_carry(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.p.c() as u16;
        let result = sum as u8;
        self.p.set(Status::CARRY, sum > 0xFF);
        // Overflow when both inputs share a sign that the result does not.
        self.p.set(
            Status::OVERFLOW,
            (self.a ^ value) & 0x80 == 0 && (self.a ^ result) & 0x80 != 0,
        );
        self.a = result;
        self.p.set_zn(result);
    }

    /// A ← A - M - !C. C is set when no borrow occurred.
    pub(crate) fn subtract_with_borrow(&mut self, value: u8) {
        let diff = self.a as i16 - value as i16 - (!self.p.c()) as i16;
        let result = diff as u8;
        self.p.set(Status::CARRY, diff >= 0);
        self.p.set(
            Status::OVERFLOW,
            (self.a ^ result) & 0x80 != 0 && (self.a ^ value) & 0x80 != 0,
        );
        self.a = result;
        self.p.set_zn(result);
    }

    pub(crate) fn compare(&mut self, register: u8, value: u8) {
        self.p.set(Status::CARRY, register >= value);
        self.p.set_zn(register.wrapping_sub(value));
    }

    // ================================================================
    //  ADC / SBC
    // ================================================================
    pub(crate) fn adc(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::ADC)?;
        self.add_with_carry(value);
        Ok(())
    }

    pub(crate) fn sbc(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::SBC)?;
        self.subtract_with_borrow(value);
        Ok(())
    }

    // ================================================================
    //  CMP / CPX / CPY
    // ================================================================
    pub(crate) fn cmp(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::CMP)?;
        self.compare(self.a, value);
        Ok(())
    }

    pub(crate) fn cpx(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::CPX)?;
        self.compare(self.x, value);
        Ok(())
    }

    pub(crate) fn cpy(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::CPY)?;
        self.compare(self.y, value);
        Ok(())
    }

    // ================================================================
    //  Unofficial read-modify-write combinations
    // ================================================================

    /// DEC then CMP.
    pub(crate) fn dcp(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::DCP, |_, m| m.wrapping_sub(1))?;
        self.compare(self.a, value);
        Ok(())
    }

    /// INC then SBC.
    pub(crate) fn isb(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::ISB, |_, m| m.wrapping_add(1))?;
        self.subtract_with_borrow(value);
        Ok(())
    }

    /// ASL then ORA.
    pub(crate) fn slo(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::SLO, Self::shift_left)?;
        self.a |= value;
        self.p.set_zn(self.a);
        Ok(())
    }

    /// ROL then AND.
    pub(crate) fn rla(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::RLA, Self::rotate_left)?;
        self.a &= value;
        self.p.set_zn(self.a);
        Ok(())
    }

    /// LSR then EOR.
    pub(crate) fn sre(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::SRE, Self::shift_right)?;
        self.a ^= value;
        self.p.set_zn(self.a);
        Ok(())
    }

    /// ROR then ADC, with the carry out of the rotate feeding the add.
    pub(crate) fn rra(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::RRA, Self::rotate_right)?;
        self.add_with_carry(value);
        Ok(())
    }
}
