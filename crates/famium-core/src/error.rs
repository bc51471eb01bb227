use thiserror::Error;

use crate::cpu::{Addressing, Mnemonic};

/// Fatal emulation errors surfaced to the run loop.
///
/// None of these are transient: each one means the program image or the
/// decode table is corrupt, so callers propagate instead of retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// A ROM bank was read past its last byte.
    #[error("invalid address on rom read: {addr:#06x} (rom: 0x0000 - {size:#06x})")]
    AddressOutOfRange { addr: usize, size: usize },
    /// The fetched byte has no decode table entry.
    #[error("unsupported opcode {opcode:#04x} at pc {pc:#06x}")]
    UnsupportedOpcode { opcode: u8, pc: u16 },
    /// A mnemonic was paired with a mode it cannot consume.
    #[error("unsupported addressing mode {mode} for {mnemonic}")]
    UnsupportedAddressingMode { mnemonic: Mnemonic, mode: Addressing },
    /// The output sink failed while receiving a frame.
    #[error("frame sink error: {0}")]
    Sink(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
