use std::fmt::Display;

use tracing::{debug, info, trace};

use crate::{
    bus::Bus,
    error::{Error, Result},
    interrupts::Interrupts,
    memory::cpu as cpu_mem,
};

mod addressing;
mod lookup;
mod mnemonic;
mod status;

pub use addressing::{Addressing, Operand};
pub use lookup::{OpCode, lookup, opcode_table};
pub use mnemonic::Mnemonic;
pub use status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpu {
    // Registers
    pub(crate) a: u8,     //Accumulator
    pub(crate) x: u8,     //X Index Register
    pub(crate) y: u8,     //Y Index Register
    pub(crate) s: u8,     //Stack Pointer (low byte, page 1)
    pub(crate) p: Status, //Processor Status
    pub(crate) pc: u16,   //Program Counter

    /// Set by a taken branch during the current step.
    branched: bool,
}

impl Cpu {
    /// Power-on register state. PC stays at 0 until [`Cpu::reset`] reads the vector.
    pub fn new() -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            s: 0xFD,
            p: Status::new(),
            pc: 0x0000,
            branched: false,
        }
    }

    /// Restores power-on registers and loads PC from `$FFFC`.
    pub fn reset(&mut self, bus: &mut impl Bus) -> Result<()> {
        *self = Self::new();
        self.pc = bus.read_word(cpu_mem::RESET_VECTOR)?;
        info!("cpu reset, pc={:#06x}", self.pc);
        Ok(())
    }

    /// Executes one instruction, servicing a pending interrupt first.
    ///
    /// Returns the cycles consumed: base cycles from the decode table, plus one
    /// on a page cross during operand resolution, plus one for a taken branch.
    pub fn run(&mut self, bus: &mut impl Bus, interrupts: &mut Interrupts) -> Result<u32> {
        if interrupts.is_nmi_asserted() {
            self.process_nmi(bus, interrupts)?;
        } else if interrupts.is_irq_asserted() && !self.p.i() {
            self.process_irq(bus, interrupts)?;
        }

        let pc = self.pc;
        let opcode = self.fetch(bus)?;
        let instr = lookup(opcode).ok_or(Error::UnsupportedOpcode { opcode, pc })?;
        trace!("{:#06x} {} {}", pc, instr, self);

        let operand = self.resolve(instr.mode, bus)?;
        self.branched = false;
        instr.mnemonic.execute(self, bus, operand)?;

        Ok(instr.cycles as u32 + operand.extra_cycles as u32 + self.branched as u32)
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Full stack pointer address in page one.
    pub fn sp(&self) -> u16 {
        cpu_mem::STACK_PAGE_START | self.s as u16
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn status(&self) -> Status {
        self.p
    }

    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> Result<u8> {
        let value = bus.mem_read(self.pc)?;
        self.incr_pc();
        Ok(value)
    }

    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> Result<u16> {
        let lo = self.fetch(bus)? as u16;
        let hi = self.fetch(bus)? as u16;
        Ok((hi << 8) | lo)
    }

    pub(crate) fn incr_pc(&mut self) {
        self.pc = self.pc.wrapping_add(1);
    }

    pub(crate) fn push(&mut self, bus: &mut impl Bus, data: u8) {
        bus.mem_write(self.sp(), data);
        self.s = self.s.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self, bus: &mut impl Bus) -> Result<u8> {
        self.s = self.s.wrapping_add(1);
        bus.mem_read(self.sp())
    }

    pub(crate) fn push_word(&mut self, bus: &mut impl Bus, data: u16) {
        self.push(bus, (data >> 8) as u8);
        self.push(bus, data as u8);
    }

    pub(crate) fn pop_word(&mut self, bus: &mut impl Bus) -> Result<u16> {
        let lo = self.pop(bus)? as u16;
        let hi = self.pop(bus)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Shared interrupt entry: PC and status (break set) onto the stack, then I.
    pub(crate) fn enter_interrupt(&mut self, bus: &mut impl Bus) {
        self.push_word(bus, self.pc);
        self.push(bus, (self.p | Status::BREAK).bits());
        self.p.insert(Status::INTERRUPT);
    }

    fn process_nmi(&mut self, bus: &mut impl Bus, interrupts: &mut Interrupts) -> Result<()> {
        interrupts.deassert_nmi();
        debug!("nmi at pc={:#06x}", self.pc);
        self.enter_interrupt(bus);
        self.pc = bus.read_word(cpu_mem::NMI_VECTOR)?;
        Ok(())
    }

    fn process_irq(&mut self, bus: &mut impl Bus, interrupts: &mut Interrupts) -> Result<()> {
        interrupts.deassert_irq();
        debug!("irq at pc={:#06x}", self.pc);
        self.enter_interrupt(bus);
        self.pc = bus.read_word(cpu_mem::IRQ_VECTOR)?;
        Ok(())
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[a:0x{:02x},x:0x{:02x},y:0x{:02x},s:0x{:02x},p:0x{:02x},pc:0x{:04x}]",
            self.a,
            self.x,
            self.y,
            self.s,
            self.p.bits(),
            self.pc
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bus::mock::MockBus;

    /// Resets a CPU against `program` placed at `$8000`.
    pub(crate) fn boot(program: &[u8]) -> (Cpu, MockBus) {
        let mut bus = MockBus::with_program(0x8000, program);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus).expect("reset vector is in range");
        (cpu, bus)
    }

    /// Runs one instruction with no interrupts pending.
    pub(crate) fn step(cpu: &mut Cpu, bus: &mut MockBus) -> u32 {
        cpu.run(bus, &mut Interrupts::new()).expect("instruction decodes")
    }

    #[test]
    fn power_on_state() {
        let cpu = Cpu::new();
        assert_eq!((cpu.a(), cpu.x(), cpu.y()), (0, 0, 0));
        assert_eq!(cpu.sp(), 0x01FD);
        let p = cpu.status();
        assert!(p.contains(Status::RESERVED | Status::BREAK | Status::INTERRUPT));
        assert!(!p.intersects(
            Status::NEGATIVE | Status::OVERFLOW | Status::DECIMAL | Status::ZERO | Status::CARRY
        ));
    }

    #[test]
    fn reset_loads_vector() {
        let (cpu, _) = boot(&[0xEA]);
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn load_store_jump_program() {
        let (mut cpu, mut bus) = boot(&[0xA9, 0x01, 0x85, 0x00, 0x4C, 0x04, 0x80]);

        assert_eq!(step(&mut cpu, &mut bus), 2);
        assert_eq!(bus.mem[0x0000], 0);
        assert_eq!(cpu.a(), 1);
        assert!(!cpu.status().z() && !cpu.status().n());

        assert_eq!(step(&mut cpu, &mut bus), 3);
        assert_eq!(bus.mem[0x0000], 1);

        for _ in 0..3 {
            assert_eq!(step(&mut cpu, &mut bus), 3);
            assert_eq!(cpu.pc(), 0x8004);
            assert_eq!(cpu.a(), 1);
            assert_eq!(bus.mem[0x0000], 1);
        }
    }

    #[test]
    fn undefined_opcode_is_fatal() {
        let (mut cpu, mut bus) = boot(&[0x0B]);
        let err = cpu.run(&mut bus, &mut Interrupts::new());
        assert!(matches!(
            err,
            Err(Error::UnsupportedOpcode {
                opcode: 0x0B,
                pc: 0x8000
            })
        ));
    }

    #[test]
    fn nmi_is_serviced_before_fetch() {
        let (mut cpu, mut bus) = boot(&[0xEA]);
        bus.mem[0x9000] = 0xE8; // INX
        bus.mem[0xFFFA] = 0x00;
        bus.mem[0xFFFB] = 0x90;
        let mut interrupts = Interrupts::new();
        interrupts.assert_nmi();

        cpu.run(&mut bus, &mut interrupts).expect("nmi handler runs");
        assert!(!interrupts.is_nmi_asserted());
        assert_eq!(cpu.x(), 1);
        assert_eq!(cpu.pc(), 0x9001);
        assert!(cpu.status().i());
        // PC hi, PC lo, then status with break set.
        assert_eq!(bus.mem[0x01FD], 0x80);
        assert_eq!(bus.mem[0x01FC], 0x00);
        assert_eq!(bus.mem[0x01FB] & Status::BREAK.bits(), Status::BREAK.bits());
        assert_eq!(cpu.sp(), 0x01FA);
    }

    #[test]
    fn irq_waits_for_interrupt_enable() {
        let (mut cpu, mut bus) = boot(&[0x58, 0xEA]); // CLI; NOP
        bus.mem[0xA000] = 0xEA;
        bus.mem[0xFFFE] = 0x00;
        bus.mem[0xFFFF] = 0xA0;
        let mut interrupts = Interrupts::new();
        interrupts.assert_irq();

        cpu.run(&mut bus, &mut interrupts).expect("cli runs");
        assert!(interrupts.is_irq_asserted());
        assert_eq!(cpu.pc(), 0x8001);

        cpu.run(&mut bus, &mut interrupts).expect("irq handler runs");
        assert!(!interrupts.is_irq_asserted());
        assert_eq!(cpu.pc(), 0xA001);
    }
}
