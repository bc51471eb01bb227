use crate::error::{Error, Result};

/// Immutable byte bank loaded from a cartridge image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rom(Box<[u8]>);

impl Rom {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Reads one byte, failing when `addr` lies past the end of the bank.
    pub fn read(&self, addr: usize) -> Result<u8> {
        self.0
            .get(addr)
            .copied()
            .ok_or(Error::AddressOutOfRange {
                addr,
                size: self.0.len(),
            })
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }
}
