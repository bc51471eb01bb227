use crate::{bus::PpuBus, memory::ppu as ppu_mem};

/// 8x8 grid of 2-bit colour indices, `pattern[row][column]`.
pub type Pattern = [[u8; 8]; 8];

/// One background cell built during a scanline row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub pattern: Pattern,
    /// Attribute palette select (0..=3).
    pub palette_id: u8,
    /// Scroll registers at the time the row was built.
    pub scroll_x: u8,
    pub scroll_y: u8,
}

/// Combines the two bit planes of tile `id` in the pattern table at `table`.
///
/// Rows 0-7 carry bit 0 of each pixel, rows 8-15 carry bit 1.
pub(crate) fn decode_pattern(bus: &PpuBus, id: u8, table: usize) -> Pattern {
    let mut pattern = Pattern::default();
    let base = id as usize * ppu_mem::TILE_BYTES + table;
    for i in 0..ppu_mem::TILE_BYTES {
        let plane = bus.read((base + i) as u16);
        for j in 0..8 {
            if plane & (0x80 >> j) != 0 {
                pattern[i % 8][j] += 1 << (i / 8);
            }
        }
    }
    pattern
}
