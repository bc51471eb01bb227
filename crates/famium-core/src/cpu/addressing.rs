use std::fmt::Display;

use crate::{
    bus::Bus,
    cpu::{Cpu, mnemonic::Mnemonic},
    error::{Error, Result},
};

/// How an instruction finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// No operand. `CLC`, `RTS`, and the multi-byte NOPs, which skip their
    /// own operand bytes.
    Implied,
    /// Operates on A. `ASL A`.
    Accumulator,
    /// Next byte is the value. `LDA #$42`.
    Immediate,
    /// Next byte is an address in page zero.
    ZeroPage,
    /// `(zp + X) & 0xFF`.
    ZeroPageX,
    /// `(zp + Y) & 0xFF`.
    ZeroPageY,
    /// Next word is the address.
    Absolute,
    /// `abs + X`, one extra cycle on page cross.
    AbsoluteX,
    /// `abs + Y`, one extra cycle on page cross.
    AbsoluteY,
    /// Signed displacement from the PC after the operand fetch.
    Relative,
    /// `(zp,X)`: pointer read from page zero at `zp + X`.
    PreIndexedIndirect,
    /// `(zp),Y`: pointer read from page zero at `zp`, then `+ Y`.
    PostIndexedIndirect,
    /// `JMP ($xxxx)`, including the page-wrap bug on the pointer's high byte.
    IndirectAbsolute,
}

impl Addressing {
    /// Suffix used by [`crate::cpu::OpCode`]'s display name.
    pub(crate) const fn suffix(&self) -> Option<&'static str> {
        match self {
            Addressing::Implied | Addressing::Accumulator | Addressing::Relative => None,
            Addressing::Immediate => Some("IMM"),
            Addressing::ZeroPage => Some("ZERO"),
            Addressing::ZeroPageX => Some("ZEROX"),
            Addressing::ZeroPageY => Some("ZEROY"),
            Addressing::Absolute => Some("ABS"),
            Addressing::AbsoluteX => Some("ABSX"),
            Addressing::AbsoluteY => Some("ABSY"),
            Addressing::PreIndexedIndirect => Some("INDX"),
            Addressing::PostIndexedIndirect => Some("INDY"),
            Addressing::IndirectAbsolute => Some("INDABS"),
        }
    }
}

impl Display for Addressing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Addressing::Implied => "implied",
            Addressing::Accumulator => "accumulator",
            Addressing::Immediate => "immediate",
            Addressing::ZeroPage => "zero page",
            Addressing::ZeroPageX => "zero page,X",
            Addressing::ZeroPageY => "zero page,Y",
            Addressing::Absolute => "absolute",
            Addressing::AbsoluteX => "absolute,X",
            Addressing::AbsoluteY => "absolute,Y",
            Addressing::Relative => "relative",
            Addressing::PreIndexedIndirect => "(indirect,X)",
            Addressing::PostIndexedIndirect => "(indirect),Y",
            Addressing::IndirectAbsolute => "(absolute)",
        };
        f.write_str(name)
    }
}

/// Resolved operand: an address, or the value itself for [`Addressing::Immediate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    pub mode: Addressing,
    pub value: u16,
    /// 1 when resolution crossed a page boundary.
    pub extra_cycles: u8,
}

impl Operand {
    const fn new(mode: Addressing, value: u16, crossed: bool) -> Self {
        Self {
            mode,
            value,
            extra_cycles: crossed as u8,
        }
    }

    /// Effective address for stores and read-modify-write.
    pub(crate) fn address(&self, mnemonic: Mnemonic) -> Result<u16> {
        match self.mode {
            Addressing::Implied | Addressing::Accumulator | Addressing::Immediate => {
                Err(self.unsupported(mnemonic))
            }
            _ => Ok(self.value),
        }
    }

    /// Value for read instructions: the immediate byte, or memory at the address.
    pub(crate) fn load(&self, bus: &mut impl Bus, mnemonic: Mnemonic) -> Result<u8> {
        match self.mode {
            Addressing::Immediate => Ok(self.value as u8),
            Addressing::Implied | Addressing::Accumulator => Err(self.unsupported(mnemonic)),
            _ => bus.mem_read(self.value),
        }
    }

    pub(crate) fn unsupported(&self, mnemonic: Mnemonic) -> Error {
        Error::UnsupportedAddressingMode {
            mnemonic,
            mode: self.mode,
        }
    }
}

#[inline]
const fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

impl Cpu {
    /// Fetches operand bytes at PC and computes the effective operand.
    pub(crate) fn resolve(&mut self, mode: Addressing, bus: &mut impl Bus) -> Result<Operand> {
        let operand = match mode {
            Addressing::Implied | Addressing::Accumulator => Operand::new(mode, 0, false),
            Addressing::Immediate => Operand::new(mode, self.fetch(bus)? as u16, false),
            Addressing::ZeroPage => Operand::new(mode, self.fetch(bus)? as u16, false),
            Addressing::ZeroPageX => {
                let zp = self.fetch(bus)?.wrapping_add(self.x);
                Operand::new(mode, zp as u16, false)
            }
            Addressing::ZeroPageY => {
                let zp = self.fetch(bus)?.wrapping_add(self.y);
                Operand::new(mode, zp as u16, false)
            }
            Addressing::Absolute => Operand::new(mode, self.fetch_word(bus)?, false),
            Addressing::AbsoluteX => {
                let base = self.fetch_word(bus)?;
                let addr = base.wrapping_add(self.x as u16);
                Operand::new(mode, addr, page_crossed(base, addr))
            }
            Addressing::AbsoluteY => {
                let base = self.fetch_word(bus)?;
                let addr = base.wrapping_add(self.y as u16);
                Operand::new(mode, addr, page_crossed(base, addr))
            }
            Addressing::Relative => {
                let offset = self.fetch(bus)?;
                let target = self.pc.wrapping_add(offset as i8 as u16);
                // Charged on the page test alone, taken or not.
                Operand::new(mode, target, page_crossed(target, self.pc))
            }
            Addressing::PreIndexedIndirect => {
                let base = self.fetch(bus)?.wrapping_add(self.x);
                let addr = Self::read_zero_page_word(bus, base)?;
                Operand::new(mode, addr, page_crossed(addr, base as u16))
            }
            Addressing::PostIndexedIndirect => {
                let zp = self.fetch(bus)?;
                let base = Self::read_zero_page_word(bus, zp)?;
                let addr = base.wrapping_add(self.y as u16);
                Operand::new(mode, addr, page_crossed(base, addr))
            }
            Addressing::IndirectAbsolute => {
                let ptr = self.fetch_word(bus)?;
                let lo = bus.mem_read(ptr)? as u16;
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let hi = bus.mem_read(hi_addr)? as u16;
                Operand::new(mode, (hi << 8) | lo, false)
            }
        };
        Ok(operand)
    }

    fn read_zero_page_word(bus: &mut impl Bus, zp: u8) -> Result<u16> {
        let lo = bus.mem_read(zp as u16)? as u16;
        let hi = bus.mem_read(zp.wrapping_add(1) as u16)? as u16;
        Ok((hi << 8) | lo)
    }
}
