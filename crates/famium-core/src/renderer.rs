//! Turns a [`RenderingData`] snapshot into an RGBA frame buffer.

use crate::ppu::{
    RenderingData, TILES_PER_ROW,
    palette::PaletteTable,
    sprite::{Sprite, SpriteAttributes},
    tile::Tile,
};

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 224;
/// Bytes in one RGBA frame.
pub const FRAME_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

/// Offset of the sprite palettes inside the resolved palette.
const SPRITE_PALETTE_BASE: usize = 0x10;

/// Hardware colour table indexed by palette RAM values.
#[rustfmt::skip]
pub const COLORS: [[u8; 3]; 64] = [
    [0x80, 0x80, 0x80], [0x00, 0x3D, 0xA6], [0x00, 0x12, 0xB0], [0x44, 0x00, 0x96],
    [0xA1, 0x00, 0x5E], [0xC7, 0x00, 0x28], [0xBA, 0x06, 0x00], [0x8C, 0x17, 0x00],
    [0x5C, 0x2F, 0x00], [0x10, 0x45, 0x00], [0x05, 0x4A, 0x00], [0x00, 0x47, 0x2E],
    [0x00, 0x41, 0x66], [0x00, 0x00, 0x00], [0x05, 0x05, 0x05], [0x05, 0x05, 0x05],
    [0xC7, 0xC7, 0xC7], [0x00, 0x77, 0xFF], [0x21, 0x55, 0xFF], [0x82, 0x37, 0xFA],
    [0xEB, 0x2F, 0xB5], [0xFF, 0x29, 0x50], [0xFF, 0x22, 0x00], [0xD6, 0x32, 0x00],
    [0xC4, 0x62, 0x00], [0x35, 0x80, 0x00], [0x05, 0x8F, 0x00], [0x00, 0x8A, 0x55],
    [0x00, 0x99, 0xCC], [0x21, 0x21, 0x21], [0x09, 0x09, 0x09], [0x09, 0x09, 0x09],
    [0xFF, 0xFF, 0xFF], [0x0F, 0xD7, 0xFF], [0x69, 0xA2, 0xFF], [0xD4, 0x80, 0xFF],
    [0xFF, 0x45, 0xF3], [0xFF, 0x61, 0x8B], [0xFF, 0x88, 0x33], [0xFF, 0x9C, 0x12],
    [0xFA, 0xBC, 0x20], [0x9F, 0xE3, 0x0E], [0x2B, 0xF0, 0x35], [0x0C, 0xF0, 0xA4],
    [0x05, 0xFB, 0xFF], [0x5E, 0x5E, 0x5E], [0x0D, 0x0D, 0x0D], [0x0D, 0x0D, 0x0D],
    [0xFF, 0xFF, 0xFF], [0xA6, 0xFC, 0xFF], [0xB3, 0xEC, 0xFF], [0xDA, 0xAB, 0xEB],
    [0xFF, 0xA8, 0xF9], [0xFF, 0xAB, 0xB3], [0xFF, 0xD2, 0xB0], [0xFF, 0xEF, 0xA6],
    [0xFF, 0xF7, 0x9C], [0xD7, 0xE8, 0x95], [0xA6, 0xED, 0xAF], [0xA2, 0xF2, 0xDA],
    [0x99, 0xFF, 0xFC], [0xDD, 0xDD, 0xDD], [0x11, 0x11, 0x11], [0x11, 0x11, 0x11],
];

/// Owns the frame buffer. Pixels not touched by a frame keep their old value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Renderer {
    frame_buffer: Box<[u8]>,
    /// Background of the frame being rendered, consulted for sprite priority.
    background: Vec<Tile>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            frame_buffer: vec![0; FRAME_BUFFER_SIZE].into_boxed_slice(),
            background: Vec::new(),
        }
    }

    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// Draws the background layer, then sprites on top.
    pub fn render(&mut self, data: RenderingData) -> &[u8] {
        self.background = data.background.unwrap_or_default();
        for (i, tile) in self.background.iter().enumerate() {
            let x = (i % TILES_PER_ROW) * 8;
            let y = (i / TILES_PER_ROW) * 8;
            Self::render_tile(&mut self.frame_buffer, tile, x, y, &data.palette);
        }
        if let Some(sprites) = &data.sprites {
            for sprite in sprites {
                self.render_sprite(sprite, &data.palette);
            }
        }
        &self.frame_buffer
    }

    fn color(palette: &PaletteTable, index: usize) -> Option<[u8; 3]> {
        let value = *palette.get(index)?;
        COLORS.get(value as usize).copied()
    }

    fn put_pixel(buffer: &mut [u8], x: usize, y: usize, rgb: [u8; 3]) {
        let index = (x + y * SCREEN_WIDTH) * 4;
        buffer[index..index + 3].copy_from_slice(&rgb);
        buffer[index + 3] = 0xFF;
    }

    fn render_tile(buffer: &mut [u8], tile: &Tile, x: usize, y: usize, palette: &PaletteTable) {
        let offset_x = (tile.scroll_x % 8) as usize;
        let offset_y = (tile.scroll_y % 8) as usize;
        for (i, row) in tile.pattern.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let Some(rgb) = Self::color(palette, tile.palette_id as usize * 4 + value as usize)
                else {
                    continue;
                };
                // Fine scroll can push the first column and row off screen.
                let (Some(px), Some(py)) = ((x + j).checked_sub(offset_x), (y + i).checked_sub(offset_y))
                else {
                    continue;
                };
                if px < SCREEN_WIDTH && py < SCREEN_HEIGHT {
                    Self::put_pixel(buffer, px, py, rgb);
                }
            }
        }
    }

    /// A low-priority sprite pixel hides behind a non-transparent background
    /// pixel, or wherever no background tile was built.
    fn should_pixel_hide(&self, x: usize, y: usize) -> bool {
        let index = (y / 8) * TILES_PER_ROW + x / 8;
        match self.background.get(index) {
            Some(tile) => tile.pattern[y % 8][x % 8] % 4 != 0,
            None => true,
        }
    }

    fn render_sprite(&mut self, sprite: &Sprite, palette: &PaletteTable) {
        let attr = sprite.attributes;
        let flip_v = attr.contains(SpriteAttributes::FLIP_VERTICAL);
        let flip_h = attr.contains(SpriteAttributes::FLIP_HORIZONTAL);
        let behind = attr.contains(SpriteAttributes::PRIORITY_BEHIND_BACKGROUND);
        let palette_base = attr.palette_id() as usize * 4 + SPRITE_PALETTE_BASE;

        for (i, row) in sprite.pattern.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let x = sprite.x as usize + if flip_h { 7 - j } else { j };
                let y = sprite.y as usize + if flip_v { 7 - i } else { i };
                if behind && self.should_pixel_hide(x, y) {
                    continue;
                }
                if value == 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                    continue;
                }
                if let Some(rgb) = Self::color(palette, palette_base + value as usize) {
                    Self::put_pixel(&mut self.frame_buffer, x, y, rgb);
                }
            }
        }
    }
}
