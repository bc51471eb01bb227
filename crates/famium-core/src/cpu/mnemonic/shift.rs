use crate::{
    bus::Bus,
    cpu::{
        Cpu,
        addressing::{Addressing, Operand},
        mnemonic::Mnemonic,
        status::Status,
    },
    error::Result,
};

impl Cpu {
    /// Applies `f` to A or to memory at the operand address and writes the
    /// result back. `f` sees the current CPU so it can read and update C.
    fn modify(
        &mut self,
        bus: &mut impl Bus,
        op: Operand,
        mnemonic: Mnemonic,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) -> Result<u8> {
        if op.mode == Addressing::Accumulator {
            let value = self.a;
            self.a = f(self, value);
            return Ok(self.a);
        }
        let addr = op.address(mnemonic)?;
        let value = bus.mem_read(addr)?;
        let result = f(self, value);
        bus.mem_write(addr, result);
        Ok(result)
    }

    pub(crate) fn shift_left(&mut self, value: u8) -> u8 {
        self.p.set(Status::CARRY, value & 0x80 != 0);
        value << 1
    }

    pub(crate) fn shift_right(&mut self, value: u8) -> u8 {
        self.p.set(Status::CARRY, value & 0x01 != 0);
        value >> 1
    }

    pub(crate) fn rotate_left(&mut self, value: u8) -> u8 {
        let carry_in = self.p.c() as u8;
        self.p.set(Status::CARRY, value & 0x80 != 0);
        (value << 1) | carry_in
    }

    pub(crate) fn rotate_right(&mut self, value: u8) -> u8 {
        let carry_in = (self.p.c() as u8) << 7;
        self.p.set(Status::CARRY, value & 0x01 != 0);
        (value >> 1) | carry_in
    }

    // ================================================================
    //  ASL - Arithmetic Shift Left
    // ================================================================
    /// C ← bit 7, M ← M << 1. Flags: N, Z, C.
    pub(crate) fn asl(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let result = self.modify(bus, op, Mnemonic::ASL, Self::shift_left)?;
        self.p.set_zn(result);
        Ok(())
    }

    // ================================================================
    //  LSR - Logical Shift Right
    // ================================================================
    /// C ← bit 0, M ← M >> 1. N is always cleared.
    pub(crate) fn lsr(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let result = self.modify(bus, op, Mnemonic::LSR, Self::shift_right)?;
        self.p.set_zn(result);
        Ok(())
    }

    // ================================================================
    //  ROL / ROR - Rotate through carry
    // ================================================================
    pub(crate) fn rol(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let result = self.modify(bus, op, Mnemonic::ROL, Self::rotate_left)?;
        self.p.set_zn(result);
        Ok(())
    }

    pub(crate) fn ror(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let result = self.modify(bus, op, Mnemonic::ROR, Self::rotate_right)?;
        self.p.set_zn(result);
        Ok(())
    }

    /// Read-modify-write on memory only, for INC/DEC and the unofficial combos.
    pub(crate) fn modify_memory(
        &mut self,
        bus: &mut impl Bus,
        op: Operand,
        mnemonic: Mnemonic,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) -> Result<u8> {
        if op.mode == Addressing::Accumulator {
            return Err(op.unsupported(mnemonic));
        }
        self.modify(bus, op, mnemonic, f)
    }
}
