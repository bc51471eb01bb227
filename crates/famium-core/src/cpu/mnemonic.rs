use std::fmt::Display;

use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand},
    error::Result,
};

pub mod arith;
pub mod bra;
pub mod ctrl;
pub mod flags;
pub mod inc;
pub mod load;
pub mod logic;
pub mod nop;
pub mod shift;
pub mod stack;
pub mod trans;

/// Instruction family. Every opcode byte decodes to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    //Load/Store
    LAX,
    LDA,
    LDX,
    LDY,
    SAX,
    STA,
    STX,
    STY,
    //Transfer
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    //Stack
    PHA,
    PHP,
    PLA,
    PLP,
    //Shift
    ASL,
    LSR,
    ROL,
    ROR,
    //Logic
    AND,
    BIT,
    EOR,
    ORA,
    //Arithmetic
    ADC,
    CMP,
    CPX,
    CPY,
    DCP,
    ISB,
    RLA,
    RRA,
    SBC,
    SLO,
    SRE,
    //Arithmetic: Inc/Dec
    DEC,
    DEX,
    DEY,
    INC,
    INX,
    INY,
    //Control Flow
    BRK,
    JMP,
    JSR,
    RTI,
    RTS,
    //Branch
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BVC,
    BVS,
    //Flags
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,
    //NOP
    NOP,
    NOPD,
    NOPI,
}

impl Mnemonic {
    /// Runs the instruction against an already-resolved operand.
    pub(crate) fn execute(self, cpu: &mut Cpu, bus: &mut impl Bus, op: Operand) -> Result<()> {
        match self {
            Mnemonic::LAX => cpu.lax(bus, op)?,
            Mnemonic::LDA => cpu.lda(bus, op)?,
            Mnemonic::LDX => cpu.ldx(bus, op)?,
            Mnemonic::LDY => cpu.ldy(bus, op)?,
            Mnemonic::SAX => cpu.sax(bus, op)?,
            Mnemonic::STA => cpu.sta(bus, op)?,
            Mnemonic::STX => cpu.stx(bus, op)?,
            Mnemonic::STY => cpu.sty(bus, op)?,

            Mnemonic::TAX => cpu.tax(),
            Mnemonic::TAY => cpu.tay(),
            Mnemonic::TSX => cpu.tsx(),
            Mnemonic::TXA => cpu.txa(),
            Mnemonic::TXS => cpu.txs(),
            Mnemonic::TYA => cpu.tya(),

            Mnemonic::PHA => cpu.pha(bus),
            Mnemonic::PHP => cpu.php(bus),
            Mnemonic::PLA => cpu.pla(bus)?,
            Mnemonic::PLP => cpu.plp(bus)?,

            Mnemonic::ASL => cpu.asl(bus, op)?,
            Mnemonic::LSR => cpu.lsr(bus, op)?,
            Mnemonic::ROL => cpu.rol(bus, op)?,
            Mnemonic::ROR => cpu.ror(bus, op)?,

            Mnemonic::AND => cpu.and(bus, op)?,
            Mnemonic::BIT => cpu.bit(bus, op)?,
            Mnemonic::EOR => cpu.eor(bus, op)?,
            Mnemonic::ORA => cpu.ora(bus, op)?,

            Mnemonic::ADC => cpu.adc(bus, op)?,
            Mnemonic::CMP => cpu.cmp(bus, op)?,
            Mnemonic::CPX => cpu.cpx(bus, op)?,
            Mnemonic::CPY => cpu.cpy(bus, op)?,
            Mnemonic::DCP => cpu.dcp(bus, op)?,
            Mnemonic::ISB => cpu.isb(bus, op)?,
            Mnemonic::RLA => cpu.rla(bus, op)?,
            Mnemonic::RRA => cpu.rra(bus, op)?,
            Mnemonic::SBC => cpu.sbc(bus, op)?,
            Mnemonic::SLO => cpu.slo(bus, op)?,
            Mnemonic::SRE => cpu.sre(bus, op)?,

            Mnemonic::DEC => cpu.dec(bus, op)?,
            Mnemonic::DEX => cpu.dex(),
            Mnemonic::DEY => cpu.dey(),
            Mnemonic::INC => cpu.inc(bus, op)?,
            Mnemonic::INX => cpu.inx(),
            Mnemonic::INY => cpu.iny(),

            Mnemonic::BRK => cpu.brk(bus)?,
            Mnemonic::JMP => cpu.jmp(op)?,
            Mnemonic::JSR => cpu.jsr(bus, op)?,
            Mnemonic::RTI => cpu.rti(bus)?,
            Mnemonic::RTS => cpu.rts(bus)?,

            Mnemonic::BCC => cpu.branch(!cpu.p.c(), op),
            Mnemonic::BCS => cpu.branch(cpu.p.c(), op),
            Mnemonic::BEQ => cpu.branch(cpu.p.z(), op),
            Mnemonic::BMI => cpu.branch(cpu.p.n(), op),
            Mnemonic::BNE => cpu.branch(!cpu.p.z(), op),
            Mnemonic::BPL => cpu.branch(!cpu.p.n(), op),
            Mnemonic::BVC => cpu.branch(!cpu.p.v(), op),
            Mnemonic::BVS => cpu.branch(cpu.p.v(), op),

            Mnemonic::CLC => cpu.clc(),
            Mnemonic::CLD => cpu.cld(),
            Mnemonic::CLI => cpu.cli(),
            Mnemonic::CLV => cpu.clv(),
            Mnemonic::SEC => cpu.sec(),
            Mnemonic::SED => cpu.sed(),
            Mnemonic::SEI => cpu.sei(),

            Mnemonic::NOP => {}
            Mnemonic::NOPD => cpu.skip_operand(1),
            Mnemonic::NOPI => cpu.skip_operand(2),
        }
        Ok(())
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
