use crate::ppu::{palette::PaletteTable, sprite::Sprite, tile::Tile};

/// Everything the renderer needs for one completed frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderingData {
    pub palette: PaletteTable,
    /// Background rows, 33 tiles each. `None` when the background layer is off.
    pub background: Option<Vec<Tile>>,
    /// Sprites in OAM order starting at slot 0. `None` when sprites are off.
    pub sprites: Option<Vec<Sprite>>,
}
