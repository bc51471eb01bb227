use crate::cpu::Cpu;

impl Cpu {
    // ================================================================
    //  Register transfers
    // ================================================================
    // All but TXS update N and Z from the destination.

    pub(crate) fn tax(&mut self) {
        self.x = self.a;
        self.p.set_zn(self.x);
    }

    pub(crate) fn tay(&mut self) {
        self.y = self.a;
        self.p.set_zn(self.y);
    }

    pub(crate) fn tsx(&mut self) {
        self.x = self.s;
        self.p.set_zn(self.x);
    }

    pub(crate) fn txa(&mut self) {
        self.a = self.x;
        self.p.set_zn(self.a);
    }

    /// S ← X. Flags untouched.
    pub(crate) fn txs(&mut self) {
        self.s = self.x;
    }

    pub(crate) fn tya(&mut self) {
        self.a = self.y;
        self.p.set_zn(self.a);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::{boot, step};

    #[test]
    fn tax_tay_copy_accumulator() {
        // LDA #$80; TAX; TAY
        let (mut cpu, mut bus) = boot(&[0xA9, 0x80, 0xAA, 0xA8]);
        for _ in 0..3 {
            step(&mut cpu, &mut bus);
        }
        assert_eq!((cpu.x(), cpu.y()), (0x80, 0x80));
        assert!(cpu.status().n());
    }

    #[test]
    fn txs_keeps_flags_and_tsx_reads_back() {
        // LDX #$00; TXS; LDX #$05; TSX
        let (mut cpu, mut bus) = boot(&[0xA2, 0x00, 0x9A, 0xA2, 0x05, 0xBA]);
        step(&mut cpu, &mut bus);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.sp(), 0x0100);
        assert!(cpu.status().z());
        step(&mut cpu, &mut bus);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.status().z());
    }

    #[test]
    fn txa_tya_copy_into_accumulator() {
        // LDX #$01; TXA; LDY #$00; TYA
        let (mut cpu, mut bus) = boot(&[0xA2, 0x01, 0x8A, 0xA0, 0x00, 0x98]);
        step(&mut cpu, &mut bus);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.a(), 0x01);
        step(&mut cpu, &mut bus);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.status().z());
    }
}
