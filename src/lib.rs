//! Clock/calendar display core with on-device editing from a numeric keypad.
//!
//! The interesting part is [`session::EditSession`], the cursor-driven state
//! machine that overwrites the live time one field at a time. Everything else
//! either feeds it keys ([`keypad`], [`key`]), stores the time it edits
//! ([`clock`]) or turns its state into text and pixels ([`render`],
//! [`display`]).
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod display;
pub mod field;
pub mod font;
pub mod key;
pub mod keypad;
pub mod render;
pub mod segment;
pub mod session;

pub use clock::{ClockError, ClockProvider, SoftClock, Timestamp};
pub use field::{DateTime, FieldKind};
pub use key::Key;
pub use render::{render, Frame};
pub use session::EditSession;
