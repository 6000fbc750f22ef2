//! Glyphs for the 8-row LED matrix. Each row is a bitmask, leftmost column in
//! the highest used bit.

/// Width of a digit cell.
pub const DIGIT_WIDTH: i32 = 3;

/// Width of a separator cell.
pub const SEPARATOR_WIDTH: i32 = 1;

pub type Glyph = [u8; 8];

const BLANK: Glyph = [0; 8];

/// 3x5 digits on rows 1..=5.
const DIGITS: [Glyph; 10] = [
    [0, 0b111, 0b101, 0b101, 0b101, 0b111, 0, 0],
    [0, 0b010, 0b110, 0b010, 0b010, 0b111, 0, 0],
    [0, 0b111, 0b001, 0b111, 0b100, 0b111, 0, 0],
    [0, 0b111, 0b001, 0b111, 0b001, 0b111, 0, 0],
    [0, 0b101, 0b101, 0b111, 0b001, 0b001, 0, 0],
    [0, 0b111, 0b100, 0b111, 0b001, 0b111, 0, 0],
    [0, 0b111, 0b100, 0b111, 0b101, 0b111, 0, 0],
    [0, 0b111, 0b001, 0b001, 0b001, 0b001, 0, 0],
    [0, 0b111, 0b101, 0b111, 0b101, 0b111, 0, 0],
    [0, 0b111, 0b101, 0b111, 0b001, 0b111, 0, 0],
];

const COLON: Glyph = [0, 0, 1, 0, 1, 0, 0, 0];

/// Date separator, one column wide, so drawn as a baseline dot.
const SLASH: Glyph = [0, 0, 0, 0, 0, 1, 0, 0];

/// Glyph for a character inside a field. Anything but a digit is blank.
pub fn digit(c: char) -> &'static Glyph {
    match c.to_digit(10) {
        Some(d) => &DIGITS[d as usize],
        None => &BLANK,
    }
}

/// Glyph for a separator character.
pub fn separator(c: char) -> &'static Glyph {
    match c {
        ':' => &COLON,
        '/' => &SLASH,
        _ => &BLANK,
    }
}

/// Whether column `col` of a `width`-wide glyph is lit on `row`.
pub fn lit(glyph: &Glyph, width: i32, row: usize, col: i32) -> bool {
    glyph[row] & (1 << (width - 1 - col)) != 0
}
