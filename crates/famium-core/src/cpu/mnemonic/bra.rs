use crate::cpu::{Cpu, addressing::Operand};

impl Cpu {
    /// Conditional branch. The operand was already resolved relative to the
    /// next instruction; a taken branch costs one more cycle.
    pub(crate) fn branch(&mut self, taken: bool, op: Operand) {
        if taken {
            self.pc = op.value;
            self.branched = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::{boot, step};

    #[test]
    fn untaken_branch_falls_through() {
        // LDA #$01; BEQ +2
        let (mut cpu, mut bus) = boot(&[0xA9, 0x01, 0xF0, 0x02]);
        step(&mut cpu, &mut bus);
        assert_eq!(step(&mut cpu, &mut bus), 2);
        assert_eq!(cpu.pc(), 0x8004);
    }

    #[test]
    fn taken_branch_adds_a_cycle() {
        // LDA #$01; BNE +2
        let (mut cpu, mut bus) = boot(&[0xA9, 0x01, 0xD0, 0x02]);
        step(&mut cpu, &mut bus);
        assert_eq!(step(&mut cpu, &mut bus), 3);
        assert_eq!(cpu.pc(), 0x8006);
    }

    #[test]
    fn backward_loop_counts_down() {
        // LDX #$03; DEX; BNE -3; INY
        let (mut cpu, mut bus) = boot(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0xC8]);
        step(&mut cpu, &mut bus);
        while cpu.pc() != 0x8005 {
            step(&mut cpu, &mut bus);
        }
        assert_eq!(cpu.x(), 0);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.y(), 1);
    }

    #[test]
    fn flag_branches_follow_their_flag() {
        // SEC; BCS +1; <skipped>; CLV; BVC +1; <skipped>; BMI +1; INX
        let (mut cpu, mut bus) = boot(&[0x38, 0xB0, 0x01, 0xFF, 0xB8, 0x50, 0x01, 0xFF, 0x30, 0x01, 0xE8]);
        for _ in 0..6 {
            step(&mut cpu, &mut bus);
        }
        assert_eq!(cpu.x(), 1);
    }
}
