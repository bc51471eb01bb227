use crate::cpu::Cpu;

impl Cpu {
    /// NOPD and NOPI: advance PC past operand bytes that are never read.
    pub(crate) fn skip_operand(&mut self, len: u16) {
        self.pc = self.pc.wrapping_add(len);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::{boot, step};

    #[test]
    fn nop_variants_only_advance_pc() {
        // NOP; NOPD $44; NOPI $1234; NOP (0x1A)
        let (mut cpu, mut bus) = boot(&[0xEA, 0x04, 0x44, 0x0C, 0x34, 0x12, 0x1A]);
        bus.mem[0x0044] = 0x99;
        let cycles: Vec<u32> = (0..4).map(|_| step(&mut cpu, &mut bus)).collect();
        assert_eq!(cycles, [2, 3, 4, 2]);
        assert_eq!(cpu.pc(), 0x8007);
        assert_eq!((cpu.a(), cpu.x(), cpu.y()), (0, 0, 0));
        assert_eq!(cpu.status().bits(), 0x34);
    }
}
