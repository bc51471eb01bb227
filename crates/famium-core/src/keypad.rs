//! Standard eight-button pad readable through `$4016`.

use std::fmt::Debug;

use bitflags::bitflags;

bitflags! {
    /// Button state in serial shift order (A is shifted out first).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const A      = 0b0000_0001;
        const B      = 0b0000_0010;
        const SELECT = 0b0000_0100;
        const START  = 0b0000_1000;
        const UP     = 0b0001_0000;
        const DOWN   = 0b0010_0000;
        const LEFT   = 0b0100_0000;
        const RIGHT  = 0b1000_0000;
    }
}

/// Device contract consumed by the CPU bus at [`crate::memory::cpu::KEYPAD_PORT`].
pub trait InputDevice: Debug {
    /// Next button bit in poll order.
    fn read(&mut self) -> bool;

    /// Latch/strobe control.
    fn write(&mut self, data: u8);
}

/// Serially-readable pad with latch/strobe behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keypad {
    /// State polled at the last frame boundary.
    buffer: Buttons,
    /// State copied out of `buffer` when the strobe falls.
    latched: Buttons,
    index: u8,
    strobe: bool,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores freshly polled input; it becomes visible on the next latch.
    pub fn fetch(&mut self, state: Buttons) {
        self.buffer = state;
    }

    pub fn buffered(&self) -> Buttons {
        self.buffer
    }
}

impl InputDevice for Keypad {
    fn read(&mut self) -> bool {
        if self.index >= 8 {
            return false;
        }
        let bit = (self.latched.bits() >> self.index) & 0x01 != 0;
        self.index += 1;
        bit
    }

    fn write(&mut self, data: u8) {
        if data & 0x01 != 0 {
            self.strobe = true;
        } else if self.strobe {
            self.strobe = false;
            self.index = 0;
            self.latched = self.buffer;
        }
    }
}
