use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, mnemonic::Mnemonic},
    error::Result,
};

impl Cpu {
    // ================================================================
    //  LAX - Load A and X (unofficial)
    // ================================================================
    /// A, X ← M. Flags: N, Z.
    pub(crate) fn lax(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = op.load(bus, Mnemonic::LAX)?;
        self.a = value;
        self.x = value;
        self.p.set_zn(value);
        Ok(())
    }

    // ================================================================
    //  LDA / LDX / LDY - Load register
    // ================================================================
    /// A ← M. Flags: N, Z.
    pub(crate) fn lda(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        self.a = op.load(bus, Mnemonic::LDA)?;
        self.p.set_zn(self.a);
        Ok(())
    }

    pub(crate) fn ldx(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        self.x = op.load(bus, Mnemonic::LDX)?;
        self.p.set_zn(self.x);
        Ok(())
    }

    pub(crate) fn ldy(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        self.y = op.load(bus, Mnemonic::LDY)?;
        self.p.set_zn(self.y);
        Ok(())
    }

    // ================================================================
    //  SAX - Store A & X (unofficial)
    // ================================================================
    /// M ← A & X. No flags.
    pub(crate) fn sax(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        bus.mem_write(op.address(Mnemonic::SAX)?, self.a & self.x);
        Ok(())
    }

    // ================================================================
    //  STA / STX / STY - Store register
    // ================================================================
    pub(crate) fn sta(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        bus.mem_write(op.address(Mnemonic::STA)?, self.a);
        Ok(())
    }

    pub(crate) fn stx(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        bus.mem_write(op.address(Mnemonic::STX)?, self.x);
        Ok(())
    }

    pub(crate) fn sty(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        bus.mem_write(op.address(Mnemonic::STY)?, self.y);
        Ok(())
    }
}
