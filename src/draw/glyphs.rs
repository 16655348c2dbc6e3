//! 5x7 bitmap font
//!
//! Each glyph is seven rows, top row first. Bit 4 of a row is the leftmost
//! column.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Blank columns between adjacent glyphs
pub const GLYPH_SPACING: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; GLYPH_HEIGHT],
}

impl Glyph {
    pub const fn new(rows: [u8; GLYPH_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Pixel at column `col` (0 = left) of row `row` (0 = top)
    #[inline]
    pub fn lit(&self, col: usize, row: usize) -> bool {
        col < GLYPH_WIDTH
            && row < GLYPH_HEIGHT
            && self.rows[row] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
    }

    /// Lit pixels as (column, row from top)
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GLYPH_HEIGHT)
            .flat_map(|row| (0..GLYPH_WIDTH).map(move |col| (col, row)))
            .filter(|&(col, row)| self.lit(col, row))
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| *r == 0)
    }
}

/// Stand-in for characters the font lacks
pub const UNKNOWN_GLYPH: Glyph = Glyph::new([
    0b10101, 0b01010, 0b10101, 0b01010, 0b10101, 0b01010, 0b10101,
]);

static GLYPHS: LazyLock<HashMap<char, Glyph>> = LazyLock::new(|| {
    [
        (' ', [0u8; GLYPH_HEIGHT]),
        ('A', [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        ('B', [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
        ('C', [0b01111, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b01111]),
        ('D', [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110]),
        ('E', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        ('F', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        ('G', [0b01111, 0b10000, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110]),
        ('H', [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        ('I', [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111]),
        ('J', [0b11110, 0b00001, 0b00001, 0b00001, 0b00001, 0b10001, 0b01110]),
        ('K', [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
        ('L', [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        ('M', [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001]),
        ('N', [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
        ('O', [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        ('P', [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        ('Q', [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
        ('R', [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001]),
        ('S', [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        ('T', [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        ('U', [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        ('V', [0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b01010, 0b00100]),
        ('W', [0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010]),
        ('X', [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
        ('Y', [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
        ('Z', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
        ('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        ('1', [0b00100, 0b01100, 0b10100, 0b00100, 0b00100, 0b00100, 0b11111]),
        ('2', [0b01110, 0b10001, 0b00001, 0b01110, 0b10000, 0b10000, 0b11111]),
        ('3', [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110]),
        ('4', [0b00001, 0b00011, 0b00101, 0b01001, 0b11111, 0b00001, 0b00001]),
        ('5', [0b11111, 0b10000, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110]),
        ('6', [0b01110, 0b10001, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        ('7', [0b11111, 0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000]),
        ('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        ('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b10001, 0b01110]),
        ('<', [0b00000, 0b00010, 0b00100, 0b01000, 0b00100, 0b00010, 0b00000]),
        ('>', [0b00000, 0b01000, 0b00100, 0b00010, 0b00100, 0b01000, 0b00000]),
    ]
    .into_iter()
    .map(|(c, rows)| (c, Glyph::new(rows)))
    .collect()
});

/// Glyph for `c`, or `None` if the font has no such character
pub fn glyph(c: char) -> Option<&'static Glyph> {
    GLYPHS.get(&c)
}

/// Width of `text` in glyph pixels, including inter-glyph spacing
pub fn text_width(text: &str) -> usize {
    let count = text.chars().count();
    if count == 0 {
        0
    } else {
        count * GLYPH_WIDTH + (count - 1) * GLYPH_SPACING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_menu_alphabet() {
        for c in ('A'..='Z').chain('0'..='9').chain(['<', '>', ' ']) {
            assert!(glyph(c).is_some(), "missing glyph {c:?}");
        }
        assert!(glyph('a').is_none());
        assert!(glyph('?').is_none());
    }

    #[test]
    fn test_bit_order_is_left_to_right() {
        // L: left column fully lit, bottom row fully lit
        let l = glyph('L').unwrap();
        for row in 0..GLYPH_HEIGHT {
            assert!(l.lit(0, row));
        }
        assert!(!l.lit(4, 0));
        assert!((0..GLYPH_WIDTH).all(|col| l.lit(col, GLYPH_HEIGHT - 1)));
    }

    #[test]
    fn test_one_has_serif_on_left() {
        let one = glyph('1').unwrap();
        assert!(one.lit(2, 0));
        assert!(one.lit(1, 1));
        assert!(!one.lit(3, 1));
    }

    #[test]
    fn test_space_is_blank() {
        assert!(glyph(' ').unwrap().is_blank());
        assert_eq!(glyph(' ').unwrap().pixels().count(), 0);
        assert!(!UNKNOWN_GLYPH.is_blank());
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), 5);
        assert_eq!(text_width("PLAY"), 4 * 5 + 3);
    }
}
