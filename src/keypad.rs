//! 4x3 matrix keypad scanner.
//!
//! Columns are driven low one at a time and the rows, pulled up, are read
//! back: a low row means the key at that crossing is held.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::config::DEBOUNCE_MS;
use crate::key::{Key, KEYMAP};

pub const ROWS: usize = 4;
pub const COLS: usize = 3;

pub struct Keypad<I, O> {
    rows: [I; ROWS],
    cols: [O; COLS],
    candidate: Option<char>,
    since: u32,
    reported: bool,
}

impl<I, O, E> Keypad<I, O>
where
    I: InputPin<Error = E>,
    O: OutputPin<Error = E>,
{
    /// Takes the row inputs (with pull-ups) and column outputs. All columns
    /// are released (driven high).
    pub fn new(rows: [I; ROWS], mut cols: [O; COLS]) -> Result<Self, E> {
        for col in cols.iter_mut() {
            col.set_high()?;
        }
        Ok(Self {
            rows,
            cols,
            candidate: None,
            since: 0,
            reported: false,
        })
    }

    /// Symbol of the first held key, scanning row by row.
    pub fn scan(&mut self) -> Result<Option<char>, E> {
        let mut found = None;
        for (c, col) in self.cols.iter_mut().enumerate() {
            col.set_low()?;
            for (r, row) in self.rows.iter().enumerate() {
                if found.is_none() && row.is_low()? {
                    found = Some(KEYMAP[r][c]);
                }
            }
            col.set_high()?;
        }
        Ok(found)
    }

    /// Returns a key once per press, after it has read the same for
    /// [`DEBOUNCE_MS`]. Holding does not repeat.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<Key>, E> {
        let reading = self.scan()?;
        if reading != self.candidate {
            self.candidate = reading;
            self.since = now_ms;
            self.reported = false;
            return Ok(None);
        }
        match reading {
            Some(symbol) if !self.reported && now_ms.wrapping_sub(self.since) >= DEBOUNCE_MS => {
                self.reported = true;
                let key = Key::from(symbol);
                trace!("key {}", key);
                Ok(Some(key))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Matrix {
        held: Option<(usize, usize)>,
        col_low: [bool; COLS],
    }

    struct Row {
        index: usize,
        matrix: Rc<RefCell<Matrix>>,
    }

    struct Col {
        index: usize,
        matrix: Rc<RefCell<Matrix>>,
    }

    impl InputPin for Row {
        type Error = Infallible;

        fn is_high(&self) -> Result<bool, Infallible> {
            self.is_low().map(|low| !low)
        }

        fn is_low(&self) -> Result<bool, Infallible> {
            let m = self.matrix.borrow();
            Ok(matches!(m.held, Some((r, c)) if r == self.index && m.col_low[c]))
        }
    }

    impl OutputPin for Col {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.matrix.borrow_mut().col_low[self.index] = true;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.matrix.borrow_mut().col_low[self.index] = false;
            Ok(())
        }
    }

    fn keypad() -> (Keypad<Row, Col>, Rc<RefCell<Matrix>>) {
        let matrix = Rc::new(RefCell::new(Matrix::default()));
        let rows = core::array::from_fn(|index| Row {
            index,
            matrix: matrix.clone(),
        });
        let cols = core::array::from_fn(|index| Col {
            index,
            matrix: matrix.clone(),
        });
        (Keypad::new(rows, cols).unwrap(), matrix)
    }

    #[test]
    fn scan_finds_the_held_key() {
        let (mut pad, matrix) = keypad();
        assert_eq!(pad.scan().unwrap(), None);
        matrix.borrow_mut().held = Some((3, 2));
        assert_eq!(pad.scan().unwrap(), Some('#'));
        matrix.borrow_mut().held = Some((1, 0));
        assert_eq!(pad.scan().unwrap(), Some('4'));
        assert_eq!(matrix.borrow().col_low, [false; COLS]);
    }

    #[test]
    fn poll_reports_once_after_debounce() {
        let (mut pad, matrix) = keypad();
        matrix.borrow_mut().held = Some((0, 1));
        assert_eq!(pad.poll(100).unwrap(), None);
        assert_eq!(pad.poll(100 + DEBOUNCE_MS - 1).unwrap(), None);
        assert_eq!(pad.poll(100 + DEBOUNCE_MS).unwrap(), Some(Key::Digit(2)));
        assert_eq!(pad.poll(500).unwrap(), None);
    }

    #[test]
    fn release_rearms() {
        let (mut pad, matrix) = keypad();
        matrix.borrow_mut().held = Some((3, 1));
        pad.poll(0).unwrap();
        assert_eq!(pad.poll(DEBOUNCE_MS).unwrap(), Some(Key::Digit(0)));

        matrix.borrow_mut().held = None;
        assert_eq!(pad.poll(100).unwrap(), None);
        matrix.borrow_mut().held = Some((3, 1));
        assert_eq!(pad.poll(200).unwrap(), None);
        assert_eq!(pad.poll(200 + DEBOUNCE_MS).unwrap(), Some(Key::Digit(0)));
    }

    #[test]
    fn bounce_restarts_debounce() {
        let (mut pad, matrix) = keypad();
        matrix.borrow_mut().held = Some((2, 2));
        pad.poll(0).unwrap();
        matrix.borrow_mut().held = None;
        pad.poll(5).unwrap();
        matrix.borrow_mut().held = Some((2, 2));
        pad.poll(10).unwrap();
        assert_eq!(pad.poll(DEBOUNCE_MS + 5).unwrap(), None);
        assert_eq!(pad.poll(DEBOUNCE_MS + 10).unwrap(), Some(Key::Digit(9)));
    }
}
