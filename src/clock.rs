use core::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::field::{DateTime, FieldKind};

/// Seconds since 1970-01-01T00:00:00.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u32);

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The value falls outside what the clock store can hold.
    UnsupportedDatetime,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::UnsupportedDatetime => f.write_str("unsupported datetime"),
        }
    }
}

/// Wall-clock store the edit session reads and writes.
pub trait ClockProvider {
    /// Current value of one field.
    fn field(&self, kind: FieldKind) -> u16;

    /// Sets all six fields together. Either every field takes the new value
    /// or none does.
    fn set_all(&mut self, value: &DateTime) -> Result<(), ClockError>;

    /// Current time as a single value, suitable for [`ClockProvider::restore`].
    fn now(&self) -> Timestamp;

    /// Puts the clock back to a previously taken [`ClockProvider::now`].
    fn restore(&mut self, at: Timestamp);

    /// Free-running millisecond counter. Only used for blink phases.
    fn now_millis(&self) -> u32;
}

/// Software clock ticking in RAM, advanced by the firmware timer.
///
/// `set_all` follows the forgiving rules of a classic microcontroller time
/// library: components are not range checked but carried (month 13 becomes
/// January of the next year), and two-digit years are read as 20xx. Callers
/// detect such normalisation by reading the field back.
#[derive(Debug, Clone)]
pub struct SoftClock {
    epoch: u32,
    sub_ms: u32,
    millis: u32,
}

impl SoftClock {
    pub const fn from_timestamp(at: Timestamp) -> Self {
        Self {
            epoch: at.0,
            sub_ms: 0,
            millis: 0,
        }
    }

    pub fn new(initial: &DateTime) -> Result<Self, ClockError> {
        let mut clock = Self::from_timestamp(Timestamp(0));
        clock.set_all(initial)?;
        Ok(clock)
    }

    /// Moves both the wall clock and the millisecond counter forward.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.millis = self.millis.wrapping_add(elapsed_ms);
        self.sub_ms += elapsed_ms % 1000;
        let mut secs = elapsed_ms / 1000;
        if self.sub_ms >= 1000 {
            self.sub_ms -= 1000;
            secs += 1;
        }
        self.epoch = self.epoch.wrapping_add(secs);
    }

    fn civil(&self) -> NaiveDateTime {
        chrono::DateTime::<chrono::Utc>::from_timestamp(i64::from(self.epoch), 0)
            .map(|utc| utc.naive_utc())
            .unwrap_or_default()
    }
}

/// Turns possibly out-of-range components into seconds since 1970 by carrying
/// each overflow into the next larger unit.
fn normalise(value: &DateTime) -> Option<u32> {
    let year = match value.year {
        y @ 0..=99 => i32::from(y) + 2000,
        y => i32::from(y),
    };
    let months = year * 12 + i32::from(value.month) - 1;
    let (year, month) = (months.div_euclid(12), months.rem_euclid(12) as u32 + 1);
    let first = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let offset = (i64::from(value.day) - 1) * 86_400
        + i64::from(value.hour) * 3_600
        + i64::from(value.minute) * 60
        + i64::from(value.second);
    let at = first.checked_add_signed(TimeDelta::try_seconds(offset)?)?;
    u32::try_from(at.and_utc().timestamp()).ok()
}

impl ClockProvider for SoftClock {
    fn field(&self, kind: FieldKind) -> u16 {
        let now = self.civil();
        let value = match kind {
            FieldKind::Second => now.second(),
            FieldKind::Minute => now.minute(),
            FieldKind::Hour => now.hour(),
            FieldKind::Weekday => now.weekday().number_from_sunday(),
            FieldKind::Day => now.day(),
            FieldKind::Month => now.month(),
            FieldKind::Year => now.year().unsigned_abs(),
        };
        value as u16
    }

    fn set_all(&mut self, value: &DateTime) -> Result<(), ClockError> {
        let epoch = normalise(value).ok_or(ClockError::UnsupportedDatetime)?;
        trace!("clock set to {}", epoch);
        self.epoch = epoch;
        self.sub_ms = 0;
        Ok(())
    }

    fn now(&self) -> Timestamp {
        Timestamp(self.epoch)
    }

    fn restore(&mut self, at: Timestamp) {
        self.epoch = at.0;
        self.sub_ms = 0;
    }

    fn now_millis(&self) -> u32 {
        self.millis
    }
}
