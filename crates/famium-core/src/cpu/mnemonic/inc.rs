use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, mnemonic::Mnemonic},
    error::Result,
};

impl Cpu {
    pub(crate) fn inc(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::INC, |_, m| m.wrapping_add(1))?;
        self.p.set_zn(value);
        Ok(())
    }

    pub(crate) fn dec(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let value = self.modify_memory(bus, op, Mnemonic::DEC, |_, m| m.wrapping_sub(1))?;
        self.p.set_zn(value);
        Ok(())
    }

    pub(crate) fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.p.set_zn(self.x);
    }

    pub(crate) fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.p.set_zn(self.y);
    }

    pub(crate) fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.p.set_zn(self.x);
    }

    pub(crate) fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.p.set_zn(self.y);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::{boot, step};

    #[test]
    fn memory_increment_wraps() {
        // INC $10; DEC $11
        let (mut cpu, mut bus) = boot(&[0xE6, 0x10, 0xC6, 0x11]);
        bus.mem[0x0010] = 0xFF;
        bus.mem[0x0011] = 0x00;
        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(bus.mem[0x0010], 0x00);
        assert!(cpu.status().z());
        step(&mut cpu, &mut bus);
        assert_eq!(bus.mem[0x0011], 0xFF);
        assert!(cpu.status().n());
    }

    #[test]
    fn register_increment_and_decrement() {
        // DEX; INY; INY; DEY
        let (mut cpu, mut bus) = boot(&[0xCA, 0xC8, 0xC8, 0x88]);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.x(), 0xFF);
        assert!(cpu.status().n());
        for _ in 0..3 {
            step(&mut cpu, &mut bus);
        }
        assert_eq!(cpu.y(), 0x01);
        assert!(!cpu.status().z());
    }
}
