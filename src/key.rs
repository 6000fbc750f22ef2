//! Keypad symbols as seen by the edit session.

use core::fmt;

/// 4x3 telephone keypad, rows top to bottom.
pub const KEYMAP: [[char; 3]; 4] = [
    ['1', '2', '3'],
    ['4', '5', '6'],
    ['7', '8', '9'],
    ['*', '0', '#'],
];

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    /// `#`: enters editing, or skips to the next field.
    Advance,
    /// Any other symbol. Not used by the clock.
    Other(char),
}

impl From<char> for Key {
    fn from(symbol: char) -> Self {
        match symbol {
            '#' => Key::Advance,
            c => match c.to_digit(10) {
                Some(d) => Key::Digit(d as u8),
                None => Key::Other(c),
            },
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::Advance => write!(f, "#"),
            Key::Other(c) => write!(f, "{}", c),
        }
    }
}
