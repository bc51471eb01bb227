use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, mnemonic::Mnemonic, status::Status},
    error::Result,
};

impl Cpu {
    pub(crate) fn and(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        self.a &= op.load(bus, Mnemonic::AND)?;
        self.p.set_zn(self.a);
        Ok(())
    }

    pub(crate) fn eor(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        self.a ^= op.load(bus, Mnemonic::EOR)?;
        self.p.set_zn(self.a);
        Ok(())
    }

    pub(crate) fn ora(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        self.a |= op.load(bus, Mnemonic::ORA)?;
        self.p.set_zn(self.a);
        Ok(())
    }

    /// N ← M7, V ← M6, Z ← (A & M) == 0. A is not modified.
    pub(crate) fn bit(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::BIT)?;
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
        self.p.set(Status::OVERFLOW, value & 0x40 != 0);
        self.p.update_zero(self.a & value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::{boot, step};

    #[test]
    fn and_ora_eor_immediate() {
        // LDA #$F0; AND #$3C; ORA #$01; EOR #$31
        let (mut cpu, mut bus) = boot(&[0xA9, 0xF0, 0x29, 0x3C, 0x09, 0x01, 0x49, 0x31]);
        step(&mut cpu, &mut bus);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.a(), 0x30);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.a(), 0x31);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.status().z());
    }

    #[test]
    fn bit_copies_high_bits_and_tests_mask() {
        // LDA #$01; BIT $20
        let (mut cpu, mut bus) = boot(&[0xA9, 0x01, 0x24, 0x20]);
        bus.mem[0x0020] = 0xC0;
        step(&mut cpu, &mut bus);
        assert_eq!(step(&mut cpu, &mut bus), 3);
        let p = cpu.status();
        assert!(p.n() && p.v() && p.z());
        assert_eq!(cpu.a(), 0x01);
    }
}
