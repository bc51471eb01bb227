//! Picture Processing Unit.
//!
//! The PPU is stepped in bulk by the run loop with `cpu_cycles * 3` dots. It
//! counts 341 dots per scanline and 262 scanlines per frame, builds one row of
//! background tiles every eight lines, decodes the sprite table at the start of
//! each frame and signals vblank on line 241. When line 262 is reached the
//! frame is complete and [`Ppu::run`] hands back a [`RenderingData`] snapshot.

pub mod palette;
pub mod rendering_data;
pub mod sprite;
pub mod tile;

mod registers;

use core::fmt;

use tracing::{debug, trace};

use crate::{
    bus::PpuBus,
    interrupts::Interrupts,
    memory::ppu::{self as ppu_mem, Register},
    ram::ppu::Vram,
};
use palette::Palette;
use registers::{Control, Mask, Registers, Status};
pub use rendering_data::RenderingData;
use sprite::Sprite;
use tile::{Tile, decode_pattern};

const CYCLES_PER_SCANLINE: u32 = 341;
const VBLANK_LINE: u16 = 241;
const SCANLINES_PER_FRAME: u16 = 262;
/// Last line on which a background row may be built.
const LAST_BACKGROUND_LINE: u16 = 240;
/// Tiles per background row: the 32 visible columns plus one for fine scroll.
pub const TILES_PER_ROW: usize = 33;
const NAMETABLE_COLUMNS: usize = 32;
const NAMETABLE_ROWS: usize = 30;
const SPRITE_COUNT: usize = ppu_mem::OAM_SIZE / Sprite::BYTES_PER_SPRITE;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ppu {
    /// Collection of CPU visible registers and their helper latches.
    registers: Registers,
    /// Character memory behind the pattern tables.
    bus: PpuBus,
    /// Nametables and attribute tables (`$2000-$2FFF`, mirrored at `$3000`).
    vram: Vram,
    palette: Palette,
    /// Dots accumulated on the current scanline.
    cycle: u32,
    line: u16,
    /// Set once the background and sprite tables were reset for this frame.
    frame_started: bool,
    background: Vec<Tile>,
    sprites: Vec<Sprite>,
    is_horizontal_mirror: bool,
}

impl fmt::Debug for Ppu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ppu")
            .field("control", &self.registers.control)
            .field("mask", &self.registers.mask)
            .field("status", &self.registers.status)
            .field("vram_addr", &self.registers.vram_addr)
            .field("cycle", &self.cycle)
            .field("line", &self.line)
            .field("background_tiles", &self.background.len())
            .field("sprites", &self.sprites.len())
            .finish()
    }
}

impl Ppu {
    pub fn new(bus: PpuBus, is_horizontal_mirror: bool) -> Self {
        Self {
            registers: Registers::new(),
            bus,
            vram: Vram::new(),
            palette: Palette::new(),
            cycle: 0,
            line: 0,
            frame_started: false,
            background: Vec::new(),
            sprites: Vec::with_capacity(SPRITE_COUNT),
            is_horizontal_mirror,
        }
    }

    /// Advances by `cycles` dots. Returns the frame snapshot when line 262 is reached.
    pub fn run(&mut self, cycles: u32, interrupts: &mut Interrupts) -> Option<RenderingData> {
        self.cycle += cycles;
        if self.line == 0 && !self.frame_started {
            self.frame_started = true;
            self.background.clear();
            self.build_sprites();
        }

        while self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle -= CYCLES_PER_SCANLINE;
            self.line += 1;

            if self.has_sprite_zero_hit() {
                self.registers.status.insert(Status::SPRITE_ZERO_HIT);
            }
            if self.line <= LAST_BACKGROUND_LINE
                && self.line % 8 == 0
                && self.registers.scroll_y as u16 <= LAST_BACKGROUND_LINE
            {
                self.build_background();
            }
            if self.line == VBLANK_LINE {
                self.registers.status.insert(Status::VERTICAL_BLANK);
                if self.registers.control.nmi_enabled() {
                    interrupts.assert_nmi();
                }
            }
            if self.line == SCANLINES_PER_FRAME {
                self.registers
                    .status
                    .remove(Status::VERTICAL_BLANK | Status::SPRITE_ZERO_HIT);
                self.line = 0;
                self.frame_started = false;
                interrupts.deassert_nmi();
                return Some(self.take_frame());
            }
        }
        None
    }

    fn take_frame(&mut self) -> RenderingData {
        let mask = self.registers.mask;
        debug!(
            "frame complete: {} tiles, {} sprites",
            self.background.len(),
            self.sprites.len()
        );
        RenderingData {
            palette: self.palette.resolved(),
            background: mask
                .show_background()
                .then(|| std::mem::take(&mut self.background)),
            sprites: mask
                .show_sprites()
                .then(|| std::mem::take(&mut self.sprites)),
        }
    }

    /// Coarse sprite 0 hit: sprite 0's OAM Y equals the current line.
    fn has_sprite_zero_hit(&self) -> bool {
        let mask = self.registers.mask;
        self.registers.oam.read(0) as u16 == self.line
            && mask.show_background()
            && mask.show_sprites()
    }

    // ================================================================
    //  Background
    // ================================================================

    /// Folds the right-hand (second and fourth) nametables onto the left-hand
    /// ones when the cartridge is horizontally mirrored.
    fn mirror_nametable(&self, addr: usize) -> usize {
        if self.is_horizontal_mirror
            && ((0x0400..0x0800).contains(&addr) || addr >= 0x0C00)
        {
            addr - ppu_mem::NAMETABLE_SIZE
        } else {
            addr
        }
    }

    fn scroll_tile_x(&self) -> usize {
        let nametable = self.registers.control.nametable_index() as usize;
        (self.registers.scroll_x as usize + (nametable % 2) * 256) / 8
    }

    fn scroll_tile_y(&self) -> usize {
        let nametable = self.registers.control.nametable_index() as usize;
        (self.registers.scroll_y as usize + (nametable / 2) * 240) / 8
    }

    /// Appends one row of [`TILES_PER_ROW`] tiles for the current line.
    fn build_background(&mut self) {
        let tile_y = self.line as usize / 8 + self.scroll_tile_y();
        let clamped_y = tile_y % NAMETABLE_ROWS;
        let table_offset = if (tile_y / NAMETABLE_ROWS) % 2 == 1 { 2 } else { 0 };
        let scroll_tile_x = self.scroll_tile_x();

        for x in 0..TILES_PER_ROW {
            let tile_x = x + scroll_tile_x;
            let nametable = (tile_x / NAMETABLE_COLUMNS) % 2 + table_offset;
            let tile = self.build_tile(
                tile_x % NAMETABLE_COLUMNS,
                clamped_y,
                nametable * ppu_mem::NAMETABLE_SIZE,
            );
            self.background.push(tile);
        }
        trace!("background row for line {}", self.line);
    }

    fn build_tile(&self, tile_x: usize, tile_y: usize, offset: usize) -> Tile {
        let block_id = (tile_x % 4) / 2 + ((tile_y % 4) / 2) * 2;
        let sprite_id = self
            .vram
            .read(self.mirror_nametable(tile_y * NAMETABLE_COLUMNS + tile_x + offset));
        let attr_addr = tile_x / 4 + (tile_y / 4) * 8 + ppu_mem::ATTRIBUTE_TABLE_OFFSET + offset;
        let attr = self.vram.read(self.mirror_nametable(attr_addr));
        Tile {
            pattern: decode_pattern(
                &self.bus,
                sprite_id,
                self.registers.control.background_pattern_table(),
            ),
            palette_id: (attr >> (block_id * 2)) & 0x03,
            scroll_x: self.registers.scroll_x,
            scroll_y: self.registers.scroll_y,
        }
    }

    // ================================================================
    //  Sprites
    // ================================================================

    /// Rebuilds the sprite table from OAM, stopping at the first entry whose
    /// adjusted Y is negative.
    fn build_sprites(&mut self) {
        let table = self.registers.control.sprite_pattern_table();
        self.sprites.clear();
        for entry in self.registers.oam.chunks_exact(Sprite::BYTES_PER_SPRITE) {
            let (y, id, attributes, x) = Sprite::fields(entry);
            let Some(y) = y.checked_sub(8) else {
                break;
            };
            self.sprites.push(Sprite {
                pattern: decode_pattern(&self.bus, id, table),
                x,
                y,
                attributes,
                id,
            });
        }
    }

    // ================================================================
    //  CPU register window
    // ================================================================

    /// Handles CPU reads from `$2000-$3FFF` after mirror decoding.
    pub fn read_register(&mut self, register: Register) -> u8 {
        match register {
            Register::Status => self.read_status(),
            Register::OamData => self.registers.read_oam_data(),
            Register::Data => self.read_data(),
            _ => 0,
        }
    }

    /// Handles CPU writes to `$2000-$3FFF` after mirror decoding.
    pub fn write_register(&mut self, register: Register, value: u8) {
        trace!("ppu write {:?} <- {:#04x}", register, value);
        match register {
            Register::Control => self.registers.control = Control::from_bits_retain(value),
            Register::Mask => self.registers.mask = Mask::from_bits_retain(value),
            Register::Status => {} // read-only
            Register::OamAddr => self.registers.oam_addr = value,
            Register::OamData => self.registers.write_oam_data(value),
            Register::Scroll => self.registers.write_scroll(value),
            Register::Addr => self.registers.write_addr(value),
            Register::Data => self.write_data(value),
        }
    }

    fn read_status(&mut self) -> u8 {
        let status = self.registers.status.bits();
        self.registers.status.remove(Status::VERTICAL_BLANK);
        self.registers.reset_latches();
        status
    }

    /// VRAM index for `$2000-$3EFF`; `$3000-$3EFF` folds onto `$2000-$2EFF`.
    fn vram_index(addr: u16) -> usize {
        if (ppu_mem::NAMETABLE_MIRROR_BASE..ppu_mem::PALETTE_BASE).contains(&addr) {
            (addr - ppu_mem::NAMETABLE_MIRROR_BASE) as usize
        } else {
            (addr - ppu_mem::NAMETABLE_BASE) as usize
        }
    }

    /// `$2007` read: palette entries answer at once, everything else goes
    /// through the one-byte read buffer.
    fn read_data(&mut self) -> u8 {
        let addr = self.registers.vram_addr;
        self.registers.increment_vram_addr();
        if addr >= ppu_mem::PALETTE_BASE {
            return self.palette.read(addr);
        }
        let buffered = self.registers.vram_buffer;
        self.registers.vram_buffer = if addr >= ppu_mem::NAMETABLE_BASE {
            self.vram.read(Self::vram_index(addr))
        } else {
            self.bus.read(addr)
        };
        buffered
    }

    fn write_data(&mut self, value: u8) {
        let addr = self.registers.vram_addr;
        if addr >= ppu_mem::PALETTE_BASE {
            self.palette.write(addr, value);
        } else if addr >= ppu_mem::NAMETABLE_BASE {
            self.vram.write(Self::vram_index(addr), value);
        } else {
            self.bus.write(addr, value);
        }
        self.registers.increment_vram_addr();
    }

    /// OAM DMA entry point: byte `index` of the transfer lands at `OAMADDR + index`.
    pub fn transfer_sprite(&mut self, index: usize, data: u8) {
        let addr = (index + self.registers.oam_addr as usize) % ppu_mem::OAM_SIZE;
        self.registers.oam.write(addr, data);
    }

    pub fn sprite_ram(&self) -> &[u8] {
        &self.registers.oam
    }

    pub fn line(&self) -> u16 {
        self.line
    }

    pub fn is_vblank(&self) -> bool {
        self.registers.status.contains(Status::VERTICAL_BLANK)
    }

    pub fn has_sprite_hit(&self) -> bool {
        self.registers.status.contains(Status::SPRITE_ZERO_HIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppu() -> Ppu {
        Ppu::new(PpuBus::default(), false)
    }

    fn set_vram_addr(ppu: &mut Ppu, addr: u16) {
        ppu.write_register(Register::Addr, (addr >> 8) as u8);
        ppu.write_register(Register::Addr, addr as u8);
    }

    #[test]
    fn vblank_at_line_241_and_frame_at_262() {
        let mut ppu = ppu();
        let mut interrupts = Interrupts::new();
        ppu.write_register(Register::Control, 0x80);

        assert!(ppu.run(341 * 241, &mut interrupts).is_none());
        assert!(ppu.is_vblank());
        assert_eq!(ppu.line(), 241);
        assert!(interrupts.is_nmi_asserted());

        let frame = ppu.run(341 * 21, &mut interrupts);
        assert!(frame.is_some());
        assert!(!ppu.is_vblank());
        assert_eq!(ppu.line(), 0);
        assert!(!interrupts.is_nmi_asserted());
    }

    #[test]
    fn nmi_stays_low_when_disabled() {
        let mut ppu = ppu();
        let mut interrupts = Interrupts::new();
        ppu.run(341 * 241, &mut interrupts);
        assert!(ppu.is_vblank());
        assert!(!interrupts.is_nmi_asserted());
    }

    #[test]
    fn status_read_clears_vblank() {
        let mut ppu = ppu();
        ppu.run(341 * 241, &mut Interrupts::new());
        assert_eq!(ppu.read_register(Register::Status) & 0x80, 0x80);
        assert_eq!(ppu.read_register(Register::Status) & 0x80, 0x00);
    }

    #[test]
    fn frame_carries_enabled_layers() {
        let mut ppu = ppu();
        ppu.write_register(Register::Mask, 0x18);
        let frame = ppu
            .run(341 * 262, &mut Interrupts::new())
            .expect("frame completes");
        let background = frame.background.expect("background enabled");
        assert_eq!(background.len(), 30 * TILES_PER_ROW);
        // OAM is all zero, so the first entry already stops the table.
        assert_eq!(frame.sprites.map(|s| s.len()), Some(0));
    }

    #[test]
    fn frame_omits_disabled_layers() {
        let mut ppu = ppu();
        let frame = ppu
            .run(341 * 262, &mut Interrupts::new())
            .expect("frame completes");
        assert!(frame.background.is_none());
        assert!(frame.sprites.is_none());
    }

    #[test]
    fn sprite_table_stops_at_first_offscreen_entry() {
        let mut ppu = ppu();
        for (i, byte) in [0x20, 0x01, 0x43, 0x10, 0x30, 0x02, 0x00, 0x20, 0x04, 0x03, 0x00, 0x30]
            .into_iter()
            .enumerate()
        {
            ppu.transfer_sprite(i, byte);
        }
        ppu.write_register(Register::Mask, 0x10);
        let frame = ppu
            .run(341 * 262, &mut Interrupts::new())
            .expect("frame completes");
        let sprites = frame.sprites.expect("sprites enabled");
        assert_eq!(sprites.len(), 2);
        assert_eq!((sprites[0].x, sprites[0].y, sprites[0].id), (0x10, 0x18, 0x01));
        assert_eq!(sprites[0].attributes.palette_id(), 3);
        assert_eq!(sprites[1].y, 0x28);
    }

    #[test]
    fn sprite_zero_hit_on_matching_line() {
        let mut ppu = ppu();
        ppu.transfer_sprite(0, 20);
        ppu.write_register(Register::Mask, 0x18);
        let mut interrupts = Interrupts::new();
        ppu.run(341 * 19, &mut interrupts);
        assert!(!ppu.has_sprite_hit());
        ppu.run(341, &mut interrupts);
        assert!(ppu.has_sprite_hit());
        ppu.run(341 * 242, &mut interrupts);
        assert!(!ppu.has_sprite_hit());
    }

    #[test]
    fn data_port_buffers_vram_reads() {
        let mut ppu = ppu();
        set_vram_addr(&mut ppu, 0x2400);
        ppu.write_register(Register::Data, 0x11);
        ppu.write_register(Register::Data, 0x22);

        set_vram_addr(&mut ppu, 0x2400);
        let _stale = ppu.read_register(Register::Data);
        assert_eq!(ppu.read_register(Register::Data), 0x11);
        assert_eq!(ppu.read_register(Register::Data), 0x22);
    }

    #[test]
    fn nametable_mirror_at_3000() {
        let mut ppu = ppu();
        set_vram_addr(&mut ppu, 0x3005);
        ppu.write_register(Register::Data, 0x5A);
        set_vram_addr(&mut ppu, 0x2005);
        ppu.read_register(Register::Data);
        assert_eq!(ppu.read_register(Register::Data), 0x5A);
    }

    #[test]
    fn palette_reads_are_immediate() {
        let mut ppu = ppu();
        set_vram_addr(&mut ppu, 0x3F10);
        ppu.write_register(Register::Data, 0x2C);
        set_vram_addr(&mut ppu, 0x3F00);
        assert_eq!(ppu.read_register(Register::Data), 0x2C);
    }

    #[test]
    fn character_memory_through_data_port() {
        let mut ppu = ppu();
        ppu.write_register(Register::Control, 0x04);
        set_vram_addr(&mut ppu, 0x0010);
        ppu.write_register(Register::Data, 0xAA);
        ppu.write_register(Register::Data, 0xBB);
        assert_eq!(ppu.bus.read(0x0010), 0xAA);
        assert_eq!(ppu.bus.read(0x0030), 0xBB);
    }

    #[test]
    fn background_tile_reads_nametable_and_attributes() {
        let mut chr = vec![0u8; 0x2000];
        chr[0x0050] = 0xFF; // tile 5, row 0, plane 0
        let mut ppu = Ppu::new(PpuBus::new(&chr), false);
        // Row 1 of nametable 0, column 2: tile 5.
        set_vram_addr(&mut ppu, 0x2022);
        ppu.write_register(Register::Data, 0x05);
        // Attribute for block (1, 0) of the first 4x4 group: palette 2.
        set_vram_addr(&mut ppu, 0x23C0);
        ppu.write_register(Register::Data, 0b0000_1000);
        ppu.write_register(Register::Mask, 0x08);

        let frame = ppu
            .run(341 * 262, &mut Interrupts::new())
            .expect("frame completes");
        let background = frame.background.expect("background enabled");
        // First row built is nametable row 1.
        let tile = &background[2];
        assert_eq!(tile.pattern[0], [1; 8]);
        assert_eq!(tile.palette_id, 2);
    }

    #[test]
    fn horizontal_mirroring_folds_right_nametables() {
        let horizontal = Ppu::new(PpuBus::default(), true);
        assert_eq!(horizontal.mirror_nametable(0x0405), 0x0005);
        assert_eq!(horizontal.mirror_nametable(0x0C05), 0x0805);
        assert_eq!(horizontal.mirror_nametable(0x0805), 0x0805);
        let vertical = ppu();
        assert_eq!(vertical.mirror_nametable(0x0405), 0x0405);
    }

    #[test]
    fn oam_dma_offsets_by_oam_addr() {
        let mut ppu = ppu();
        ppu.write_register(Register::OamAddr, 0xFE);
        ppu.transfer_sprite(0, 0x01);
        ppu.transfer_sprite(2, 0x02);
        assert_eq!(ppu.sprite_ram()[0xFE], 0x01);
        assert_eq!(ppu.sprite_ram()[0x00], 0x02);
    }
}
