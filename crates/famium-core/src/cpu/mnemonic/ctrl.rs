use tracing::debug;

use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, mnemonic::Mnemonic, status::Status},
    error::Result,
    memory::cpu as cpu_mem,
};

impl Cpu {
    // ================================================================
    //  BRK - Force Interrupt
    // ================================================================
    /// Pushes PC + 1 and the status with B set, then sets I. Jumps through
    /// `$FFFE` only when I was clear beforehand; otherwise execution
    /// continues after the padding byte.
    pub(crate) fn brk(&mut self, bus: &mut impl Bus) -> Result<()> {
        let masked = self.p.i();
        self.incr_pc();
        self.p.insert(Status::BREAK);
        self.push_word(bus, self.pc);
        self.push(bus, self.p.bits());
        self.p.insert(Status::INTERRUPT);
        if masked {
            debug!("brk ignored with interrupts disabled at pc={:#06x}", self.pc);
        } else {
            self.pc = bus.read_word(cpu_mem::IRQ_VECTOR)?;
        }
        Ok(())
    }

    pub(crate) fn jmp(&mut self, op: Operand) -> Result<()> {
        self.pc = op.address(Mnemonic::JMP)?;
        Ok(())
    }

    /// Pushes the address of the last operand byte, then jumps.
    pub(crate) fn jsr(&mut self, bus: &mut impl Bus, op: Operand) -> Result<()> {
        let target = op.address(Mnemonic::JSR)?;
        self.push_word(bus, self.pc.wrapping_sub(1));
        self.pc = target;
        Ok(())
    }

    /// Pops status (reserved forced), then PC.
    pub(crate) fn rti(&mut self, bus: &mut impl Bus) -> Result<()> {
        self.p = Status::from_pulled(self.pop(bus)?);
        self.pc = self.pop_word(bus)?;
        Ok(())
    }

    pub(crate) fn rts(&mut self, bus: &mut impl Bus) -> Result<()> {
        self.pc = self.pop_word(bus)?.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::tests::{boot, step};

    #[test]
    fn jsr_rts_return_after_call() {
        // JSR $8010; LDX #$07 ... $8010: LDA #$05; RTS
        let mut program = vec![0x20, 0x10, 0x80, 0xA2, 0x07];
        program.resize(0x10, 0xEA);
        program.extend_from_slice(&[0xA9, 0x05, 0x60]);
        let (mut cpu, mut bus) = boot(&program);

        assert_eq!(step(&mut cpu, &mut bus), 6);
        assert_eq!(cpu.pc(), 0x8010);
        assert_eq!(bus.mem[0x01FD], 0x80);
        assert_eq!(bus.mem[0x01FC], 0x02);

        step(&mut cpu, &mut bus);
        assert_eq!(step(&mut cpu, &mut bus), 6);
        assert_eq!(cpu.pc(), 0x8003);
        step(&mut cpu, &mut bus);
        assert_eq!((cpu.a(), cpu.x()), (0x05, 0x07));
        assert_eq!(cpu.sp(), 0x01FD);
    }

    #[test]
    fn jmp_indirect_follows_pointer() {
        let (mut cpu, mut bus) = boot(&[0x6C, 0x00, 0x03]);
        bus.mem[0x0300] = 0x34;
        bus.mem[0x0301] = 0x12;
        assert_eq!(step(&mut cpu, &mut bus), 5);
        assert_eq!(cpu.pc(), 0x1234);
    }

    #[test]
    fn brk_vectors_when_enabled_and_rti_returns() {
        // CLI; BRK; <pad>; INX ... handler at $9000: RTI
        let (mut cpu, mut bus) = boot(&[0x58, 0x00, 0xFF, 0xE8]);
        bus.mem[0x9000] = 0x40;
        bus.mem[0xFFFE] = 0x00;
        bus.mem[0xFFFF] = 0x90;

        step(&mut cpu, &mut bus);
        assert_eq!(step(&mut cpu, &mut bus), 7);
        assert_eq!(cpu.pc(), 0x9000);
        assert!(cpu.status().i());
        assert_eq!(bus.mem[0x01FD], 0x80);
        assert_eq!(bus.mem[0x01FC], 0x03);
        assert_eq!(bus.mem[0x01FB] & 0x30, 0x30);

        assert_eq!(step(&mut cpu, &mut bus), 6);
        assert_eq!(cpu.pc(), 0x8003);
        assert!(!cpu.status().i());
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.x(), 1);
    }

    #[test]
    fn brk_with_interrupts_disabled_skips_vector() {
        // BRK; <pad>; INX
        let (mut cpu, mut bus) = boot(&[0x00, 0xFF, 0xE8]);
        bus.mem[0xFFFE] = 0x00;
        bus.mem[0xFFFF] = 0x90;
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.sp(), 0x01FA);
        step(&mut cpu, &mut bus);
        assert_eq!(cpu.x(), 1);
    }
}
