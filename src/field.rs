use core::fmt;

use crate::clock::ClockProvider;

/// Clock fields, in the order the clock store enumerates them.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Second,
    Minute,
    Hour,
    /// 1 = Sunday .. 7 = Saturday. Derived from the date, never set directly.
    Weekday,
    Day,
    Month,
    Year,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Second,
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::Weekday,
        FieldKind::Day,
        FieldKind::Month,
        FieldKind::Year,
    ];
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Second => "second",
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::Weekday => "weekday",
            FieldKind::Day => "day",
            FieldKind::Month => "month",
            FieldKind::Year => "year",
        };
        f.write_str(name)
    }
}

/// The six settable fields, handed to [`ClockProvider::set_all`] as one value.
///
/// Components are raw user input and may be out of range; the clock store
/// decides what to make of them.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl DateTime {
    pub const fn new(hour: u8, minute: u8, second: u8, day: u8, month: u8, year: u16) -> Self {
        Self {
            hour,
            minute,
            second,
            day,
            month,
            year,
        }
    }

    /// Reads all six fields live from `clock`.
    pub fn read<C: ClockProvider + ?Sized>(clock: &C) -> Self {
        let narrow = |kind| u8::try_from(clock.field(kind)).unwrap_or(u8::MAX);
        Self {
            hour: narrow(FieldKind::Hour),
            minute: narrow(FieldKind::Minute),
            second: narrow(FieldKind::Second),
            day: narrow(FieldKind::Day),
            month: narrow(FieldKind::Month),
            year: clock.field(FieldKind::Year),
        }
    }

    /// Returns a copy with `kind` replaced by `value`.
    ///
    /// Values too large for a byte-wide field saturate, which can never read
    /// back equal and so always fails validation.
    pub fn with(mut self, kind: FieldKind, value: u16) -> Self {
        let narrow = u8::try_from(value).unwrap_or(u8::MAX);
        match kind {
            FieldKind::Second => self.second = narrow,
            FieldKind::Minute => self.minute = narrow,
            FieldKind::Hour => self.hour = narrow,
            FieldKind::Day => self.day = narrow,
            FieldKind::Month => self.month = narrow,
            FieldKind::Year => self.year = value,
            FieldKind::Weekday => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_only_the_named_field() {
        let base = DateTime::new(12, 34, 56, 1, 2, 2024);
        assert_eq!(base.with(FieldKind::Hour, 7), DateTime::new(7, 34, 56, 1, 2, 2024));
        assert_eq!(base.with(FieldKind::Year, 1999), DateTime::new(12, 34, 56, 1, 2, 1999));
        assert_eq!(base.with(FieldKind::Weekday, 3), base);
    }

    #[test]
    fn oversized_values_saturate() {
        let base = DateTime::new(0, 0, 0, 1, 1, 2000);
        assert_eq!(base.with(FieldKind::Month, 4000).month, u8::MAX);
    }
}
