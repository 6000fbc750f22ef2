//! Cursor-driven editing of the live clock.
//!
//! The six fields form one flattened cursor space (see [`crate::segment`]).
//! Every digit moves the cursor one slot to the right; landing on the last
//! slot of a field writes the typed value to the clock and reads it back. A
//! value the clock does not store verbatim is rolled back and the field has
//! to be typed again. `#` skips ahead one field, and passing the last field
//! leaves edit mode.

use heapless::String;

use crate::clock::{ClockProvider, Timestamp};
use crate::field::DateTime;
use crate::key::Key;
use crate::segment::{
    segment_containing, segment_ending_at, LAST_SEGMENT, MAX_WIDTH, SEGMENTS, TOTAL_WIDTH,
};

/// Digits typed for the field under the cursor.
#[derive(Debug, Clone, Default)]
pub struct DigitBuffer {
    digits: String<MAX_WIDTH>,
}

impl DigitBuffer {
    pub const fn new() -> Self {
        Self {
            digits: String::new(),
        }
    }

    /// Appends one digit. Panics if the buffer already holds `width` digits,
    /// which the session never lets happen.
    pub fn push(&mut self, digit: u8, width: usize) {
        assert!(digit < 10, "not a digit: {}", digit);
        assert!(!self.is_full(width), "digit buffer overrun");
        let _ = self.digits.push(char::from(b'0' + digit));
    }

    pub fn is_full(&self, width: usize) -> bool {
        self.digits.len() >= width.min(MAX_WIDTH)
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_str(&self) -> &str {
        self.digits.as_str()
    }

    /// Numeric value of the typed digits, 0 when nothing was typed.
    pub fn parse(&self) -> u16 {
        self.digits
            .bytes()
            .fold(0, |acc, b| acc * 10 + u16::from(b - b'0'))
    }
}

enum Commit {
    Accepted,
    Rejected,
}

/// Edit mode state. Created once, idle, and driven by key presses.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    active: bool,
    cursor: usize,
    buffer: DigitBuffer,
    snapshot: Timestamp,
}

impl EditSession {
    pub const fn new() -> Self {
        Self {
            active: false,
            cursor: 0,
            buffer: DigitBuffer::new(),
            snapshot: Timestamp(0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Digits typed so far for the field under the cursor.
    pub fn pending(&self) -> &str {
        self.buffer.as_str()
    }

    /// Index of the segment being edited, `None` while idle.
    pub fn active_segment(&self) -> Option<usize> {
        if self.active {
            segment_containing(self.cursor)
        } else {
            None
        }
    }

    /// Routes one key press: `#` advances (skipping while editing), digits are
    /// typed while editing, anything else is ignored.
    pub fn handle_key<C: ClockProvider>(&mut self, key: Key, clock: &mut C) {
        match key {
            Key::Advance => {
                let skip = self.active;
                self.advance(skip, clock);
            }
            Key::Digit(d) if self.active => self.digit(d, clock),
            Key::Digit(_) | Key::Other(_) => {}
        }
    }

    /// Types one digit into the field under the cursor. Ignored while idle.
    pub fn digit<C: ClockProvider>(&mut self, d: u8, clock: &mut C) {
        if !self.active {
            return;
        }
        let Some(index) = segment_containing(self.cursor) else {
            return;
        };
        self.buffer.push(d, SEGMENTS[index].width);
        self.snapshot = clock.now();
        self.advance(false, clock);
    }

    /// Enters edit mode when idle. While editing, completes the field if the
    /// cursor is on its last slot, then moves on; with `skip` the cursor jumps
    /// to the next field instead of the next slot.
    pub fn advance<C: ClockProvider>(&mut self, skip: bool, clock: &mut C) {
        if !self.active {
            self.active = true;
            self.cursor = 0;
            self.buffer.clear();
            debug!("edit mode entered");
            return;
        }

        // A skip over a partly typed field takes the digits as they are.
        if skip && !self.buffer.is_empty() {
            if let Some(index) = segment_containing(self.cursor) {
                self.cursor = SEGMENTS[index].last();
            }
        }

        if let Some(index) = segment_ending_at(self.cursor) {
            match self.commit(index, clock) {
                Commit::Accepted => self.buffer.clear(),
                Commit::Rejected => {
                    clock.restore(self.snapshot);
                    self.buffer.clear();
                    if !skip {
                        self.cursor = SEGMENTS[index].start;
                        return;
                    }
                }
            }
        }

        if skip {
            if let Some(index) = segment_containing(self.cursor) {
                self.cursor = SEGMENTS[index].end();
                if index < LAST_SEGMENT {
                    return;
                }
            }
        }

        self.cursor += 1;

        if self.cursor >= TOTAL_WIDTH {
            self.buffer.clear();
            self.cursor = 0;
            self.active = false;
            debug!("edit mode left");
        }
    }

    /// Writes the typed value into segment `index` and checks it reads back.
    /// The clock is snapshotted first so a rejection has something to restore.
    fn commit<C: ClockProvider>(&mut self, index: usize, clock: &mut C) -> Commit {
        self.snapshot = clock.now();
        let field = SEGMENTS[index].field;
        let value = self.buffer.parse();
        let tentative = DateTime::read(clock).with(field, value);

        if let Err(err) = clock.set_all(&tentative) {
            warn!("{} = {} not stored: {}", field, value, err);
            return Commit::Rejected;
        }
        if clock.field(field) != value {
            info!("{} = {} rejected, clock reads {}", field, value, clock.field(field));
            return Commit::Rejected;
        }
        info!("{} set to {}", field, value);
        Commit::Accepted
    }
}
