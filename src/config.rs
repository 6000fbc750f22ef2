//! Compile-time settings for the clock firmware.

use crate::field::DateTime;

/// Time the clock starts from after power-up.
pub const INITIAL_TIME: DateTime = DateTime::new(12, 34, 56, 1, 1, 2024);

/// How often the firmware polls the keypad and redraws.
pub const POLL_INTERVAL_MS: u32 = 10;

/// A key must read the same for this long before it counts as pressed.
pub const DEBOUNCE_MS: u32 = 20;

/// The field under the cursor is blank when `millis % PERIOD > THRESHOLD`.
pub const FIELD_FLASH_PERIOD_MS: u32 = 1_000;
pub const FIELD_FLASH_THRESHOLD_MS: u32 = 500;

/// The minute/second colon is blank when `millis % PERIOD > THRESHOLD`.
pub const SEPARATOR_BLINK_PERIOD_MS: u32 = 2_000;
pub const SEPARATOR_BLINK_THRESHOLD_MS: u32 = 1_000;

/// While idle the matrix shows the date for the last `DATE_PAGE_MS` of every
/// `PAGE_CYCLE_MS`.
pub const PAGE_CYCLE_MS: u32 = 10_000;
pub const DATE_PAGE_MS: u32 = 2_000;

/// MAX7219 brightness, 0x0..=0xF.
pub const MATRIX_INTENSITY: u8 = 0x0;

/// Number of chained 8x8 MAX7219 devices.
pub const MATRIX_DEVICES: usize = 4;
