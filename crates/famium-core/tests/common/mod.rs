#![allow(dead_code)]

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::Result;
use famium_core::{
    FrameSink, InputSource, Nes,
    cartridge::Cartridge,
    config::Config,
    keypad::Buttons,
    renderer::{FRAME_BUFFER_SIZE, SCREEN_WIDTH},
};

pub const PRG_BASE: u16 = 0x8000;
pub const PRG_SIZE: usize = 0x4000;
pub const CHR_SIZE: usize = 0x2000;

const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

/// Synthetic NROM image: one 16 KiB PRG bank filled with NOP, every vector
/// pointing at `$8000`, and 8 KiB of blank character data.
#[derive(Debug, Clone)]
pub struct Image {
    prg: Vec<u8>,
    chr: Vec<u8>,
    horizontal: bool,
}

impl Image {
    pub fn new() -> Self {
        let image = Self {
            prg: vec![0xEA; PRG_SIZE],
            chr: vec![0; CHR_SIZE],
            horizontal: false,
        };
        image
            .vector(NMI_VECTOR, PRG_BASE)
            .vector(RESET_VECTOR, PRG_BASE)
            .vector(IRQ_VECTOR, PRG_BASE)
    }

    /// Places `bytes` at CPU address `addr` (either half of the mirrored bank).
    pub fn at(mut self, addr: u16, bytes: &[u8]) -> Self {
        let offset = (addr - PRG_BASE) as usize % PRG_SIZE;
        self.prg[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn program(self, bytes: &[u8]) -> Self {
        self.at(PRG_BASE, bytes)
    }

    pub fn nmi(self, target: u16) -> Self {
        self.vector(NMI_VECTOR, target)
    }

    fn vector(self, vector: u16, target: u16) -> Self {
        self.at(vector, &target.to_le_bytes())
    }

    /// Tile `id` of pattern table 0 with every pixel set to colour `value` (0..=3).
    pub fn solid_tile(mut self, id: u8, value: u8) -> Self {
        let base = id as usize * 16;
        let low = if value & 0x01 != 0 { 0xFF } else { 0x00 };
        let high = if value & 0x02 != 0 { 0xFF } else { 0x00 };
        self.chr[base..base + 8].fill(low);
        self.chr[base + 8..base + 16].fill(high);
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.horizontal = true;
        self
    }

    pub fn cartridge(self) -> Cartridge {
        Cartridge::new(self.horizontal, self.prg, self.chr)
    }

    pub fn boot(self) -> Result<Nes> {
        Ok(Nes::new(self.cartridge(), Config::default())?)
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

/// `LDA #value; STA addr` as machine code.
pub fn store(addr: u16, value: u8) -> Vec<u8> {
    let [lo, hi] = addr.to_le_bytes();
    vec![0xA9, value, 0x8D, lo, hi]
}

/// Machine code that points `$2006` at `addr` and writes `data` through `$2007`.
pub fn vram_write(addr: u16, data: &[u8]) -> Vec<u8> {
    let [lo, hi] = addr.to_le_bytes();
    let mut code = store(0x2006, hi);
    code.extend(store(0x2006, lo));
    for &byte in data {
        code.extend(store(0x2007, byte));
    }
    code
}

/// `JMP` to itself at `addr`.
pub fn spin(addr: u16) -> Vec<u8> {
    let [lo, hi] = addr.to_le_bytes();
    vec![0x4C, lo, hi]
}

pub fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
    let index = (x + y * SCREEN_WIDTH) * 4;
    [
        frame[index],
        frame[index + 1],
        frame[index + 2],
        frame[index + 3],
    ]
}

/// Counts frames and raises the shared cancel flag after `limit` of them.
#[derive(Debug)]
pub struct LimitSink {
    pub frames: u64,
    limit: u64,
    cancel: Arc<AtomicBool>,
    pub last: Vec<u8>,
}

impl LimitSink {
    pub fn new(limit: u64) -> (Self, Arc<AtomicBool>) {
        let cancel = Arc::new(AtomicBool::new(false));
        let sink = Self {
            frames: 0,
            limit,
            cancel: cancel.clone(),
            last: Vec::new(),
        };
        (sink, cancel)
    }
}

impl FrameSink for LimitSink {
    fn draw(&mut self, frame: &[u8]) -> io::Result<()> {
        assert_eq!(frame.len(), FRAME_BUFFER_SIZE);
        self.last = frame.to_vec();
        self.frames += 1;
        if self.frames >= self.limit {
            self.cancel.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}

/// Input source that reports the same buttons every frame.
#[derive(Debug, Clone, Copy)]
pub struct Hold(pub Buttons);

impl InputSource for Hold {
    fn poll(&mut self) -> Buttons {
        self.0
    }
}
