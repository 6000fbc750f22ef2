//! Turns the edit session and the live clock into display text.
//!
//! Nothing here keeps time: the flash and blink phases are recomputed from the
//! millisecond counter on every frame.

use heapless::String;

use crate::clock::ClockProvider;
use crate::config::{
    FIELD_FLASH_PERIOD_MS, FIELD_FLASH_THRESHOLD_MS, SEPARATOR_BLINK_PERIOD_MS,
    SEPARATOR_BLINK_THRESHOLD_MS,
};
use crate::segment::{Segment, MAX_WIDTH, SEGMENTS};
use crate::session::EditSession;

pub type SegmentText = String<MAX_WIDTH>;

/// Longest [`Frame::line`]: `HH:MM:SS  DD/MM/YYYY`.
pub const LINE_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// The field under the cursor is blanked out.
    pub field_blank: bool,
    /// The minute/second colon is shown as a space.
    pub colon_blank: bool,
}

impl Phase {
    pub fn at(millis: u32) -> Self {
        Self {
            field_blank: millis % FIELD_FLASH_PERIOD_MS > FIELD_FLASH_THRESHOLD_MS,
            colon_blank: millis % SEPARATOR_BLINK_PERIOD_MS > SEPARATOR_BLINK_THRESHOLD_MS,
        }
    }
}

/// One rendered frame: the six fields in editing order plus the state of the
/// blinking colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub segments: [SegmentText; 6],
    pub colon_blank: bool,
}

impl Frame {
    /// Separator printed after segment `index`.
    pub fn separator(&self, index: usize) -> &'static str {
        match index {
            0 => ":",
            1 if self.colon_blank => " ",
            1 => ":",
            2 => "  ",
            3 | 4 => "/",
            _ => "",
        }
    }

    pub fn line(&self) -> String<LINE_LEN> {
        let mut line = String::new();
        for (index, text) in self.segments.iter().enumerate() {
            let _ = line.push_str(text);
            let _ = line.push_str(self.separator(index));
        }
        line
    }
}

pub fn render<C: ClockProvider + ?Sized>(session: &EditSession, clock: &C) -> Frame {
    render_at(session, clock, Phase::at(clock.now_millis()))
}

pub fn render_at<C: ClockProvider + ?Sized>(
    session: &EditSession,
    clock: &C,
    phase: Phase,
) -> Frame {
    let editing = session.active_segment();
    Frame {
        segments: core::array::from_fn(|index| {
            let seg = &SEGMENTS[index];
            if editing != Some(index) {
                live(seg, clock)
            } else if phase.field_blank {
                blank(seg.width)
            } else if session.pending().is_empty() {
                live(seg, clock)
            } else {
                pending(session.pending(), seg.width)
            }
        }),
        colon_blank: phase.colon_blank,
    }
}

fn live<C: ClockProvider + ?Sized>(seg: &Segment, clock: &C) -> SegmentText {
    let mut buf = [0u8; 8];
    let text = format_no_std::show(
        &mut buf,
        format_args!("{:0width$}", clock.field(seg.field), width = seg.width),
    )
    .unwrap_or_default();
    fit(text)
}

fn pending(digits: &str, width: usize) -> SegmentText {
    let mut buf = [0u8; 8];
    let text = format_no_std::show(&mut buf, format_args!("{:<width$}", digits, width = width))
        .unwrap_or_default();
    fit(text)
}

fn blank(width: usize) -> SegmentText {
    let mut text = String::new();
    for _ in 0..width.min(MAX_WIDTH) {
        let _ = text.push(' ');
    }
    text
}

fn fit(text: &str) -> SegmentText {
    let mut out = String::new();
    for c in text.chars().take(MAX_WIDTH) {
        let _ = out.push(c);
    }
    out
}
