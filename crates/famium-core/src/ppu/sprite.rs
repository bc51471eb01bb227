use bitflags::bitflags;

use crate::ppu::tile::Pattern;

bitflags! {
    /// Attribute bits stored in sprite byte 2.
    ///
    /// Bit layout:
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V H P . . . p p
    /// ```
    /// - `V`: Vertical flip
    /// - `H`: Horizontal flip
    /// - `P`: Priority (behind background when set)
    /// - `p`: Sprite palette select (0..=3)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SpriteAttributes: u8 {
        const PALETTE = 0b0000_0011;

        /// When set, sprite is drawn behind the background.
        const PRIORITY_BEHIND_BACKGROUND = 0b0010_0000;

        const FLIP_HORIZONTAL = 0b0100_0000;

        const FLIP_VERTICAL = 0b1000_0000;
    }
}

impl SpriteAttributes {
    pub fn palette_id(self) -> u8 {
        self.bits() & SpriteAttributes::PALETTE.bits()
    }
}

/// A decoded OAM entry.
///
/// OAM stores four bytes per sprite: Y, tile id, attributes, X.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sprite {
    pub pattern: Pattern,
    pub x: u8,
    /// OAM Y minus 8; the top eight lines are never shown.
    pub y: u8,
    pub attributes: SpriteAttributes,
    /// Tile id from OAM byte 1.
    pub id: u8,
}

impl Sprite {
    pub const BYTES_PER_SPRITE: usize = 4;

    /// Splits one OAM entry into `(y, id, attributes, x)`.
    pub(crate) fn fields(entry: &[u8]) -> (u8, u8, SpriteAttributes, u8) {
        (
            entry[0],
            entry[1],
            SpriteAttributes::from_bits_retain(entry[2]),
            entry[3],
        )
    }
}
