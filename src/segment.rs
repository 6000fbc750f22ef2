//! The editable fields and their place in the flattened cursor space.

use crate::field::FieldKind;

/// One editable field: cursor slots `start..start + width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub width: usize,
    pub field: FieldKind,
}

impl Segment {
    /// Cursor slot of the last digit; reaching it completes the entry.
    pub const fn last(&self) -> usize {
        self.start + self.width - 1
    }

    pub const fn end(&self) -> usize {
        self.start + self.width
    }

    pub const fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start && cursor < self.end()
    }
}

/// Editing order: hour, minute, second, day, month, year.
pub const SEGMENTS: [Segment; 6] = [
    Segment {
        start: 0,
        width: 2,
        field: FieldKind::Hour,
    },
    Segment {
        start: 2,
        width: 2,
        field: FieldKind::Minute,
    },
    Segment {
        start: 4,
        width: 2,
        field: FieldKind::Second,
    },
    Segment {
        start: 6,
        width: 2,
        field: FieldKind::Day,
    },
    Segment {
        start: 8,
        width: 2,
        field: FieldKind::Month,
    },
    Segment {
        start: 10,
        width: 4,
        field: FieldKind::Year,
    },
];

pub const LAST_SEGMENT: usize = SEGMENTS.len() - 1;

/// Size of the cursor space. A cursor equal to this means editing just ended.
pub const TOTAL_WIDTH: usize = SEGMENTS[LAST_SEGMENT].end();

/// Widest segment, and so the capacity of the digit buffer.
pub const MAX_WIDTH: usize = 4;

pub fn segment_containing(cursor: usize) -> Option<usize> {
    SEGMENTS.iter().position(|seg| seg.contains(cursor))
}

/// Segment whose last slot is `cursor`, if any.
pub fn segment_ending_at(cursor: usize) -> Option<usize> {
    SEGMENTS.iter().position(|seg| seg.last() == cursor)
}

pub fn bounds_of(index: usize) -> (usize, usize) {
    let seg = &SEGMENTS[index];
    (seg.start, seg.width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_contiguous() {
        let mut next = 0;
        for seg in &SEGMENTS {
            assert_eq!(seg.start, next);
            assert!(seg.width <= MAX_WIDTH);
            next = seg.end();
        }
        assert_eq!(next, TOTAL_WIDTH);
        assert_eq!(TOTAL_WIDTH, 14);
    }

    #[test]
    fn every_slot_belongs_to_exactly_one_segment() {
        for cursor in 0..TOTAL_WIDTH {
            let owners = SEGMENTS.iter().filter(|seg| seg.contains(cursor)).count();
            assert_eq!(owners, 1, "cursor {cursor}");
        }
        assert_eq!(segment_containing(TOTAL_WIDTH), None);
    }

    #[test]
    fn lookups() {
        assert_eq!(segment_containing(0), Some(0));
        assert_eq!(segment_containing(5), Some(2));
        assert_eq!(segment_containing(13), Some(5));
        assert_eq!(bounds_of(5), (10, 4));
        assert_eq!(segment_ending_at(1), Some(0));
        assert_eq!(segment_ending_at(13), Some(5));
        assert_eq!(segment_ending_at(10), None);
    }

    #[test]
    fn editing_order_differs_from_field_order() {
        let order: Vec<FieldKind> = SEGMENTS.iter().map(|seg| seg.field).collect();
        assert_eq!(
            order,
            [
                FieldKind::Hour,
                FieldKind::Minute,
                FieldKind::Second,
                FieldKind::Day,
                FieldKind::Month,
                FieldKind::Year,
            ]
        );
    }
}
