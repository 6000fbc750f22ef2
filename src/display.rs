//! Lays a rendered [`Frame`] out on four chained 8x8 MAX7219 matrices.
//!
//! The matrix is 32 columns wide, which holds either `HH:MM:SS` or
//! `DD/MM/YYYY`, so the display shows one [`Page`] at a time.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{DATE_PAGE_MS, MATRIX_DEVICES, PAGE_CYCLE_MS};
use crate::font::{self, Glyph, DIGIT_WIDTH, SEPARATOR_WIDTH};
use crate::render::Frame;
use crate::session::EditSession;

pub const WIDTH: i32 = 8 * MATRIX_DEVICES as i32;
pub const HEIGHT: i32 = 8;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Hour, minute, second.
    Time,
    /// Day, month, year.
    Date,
}

impl Page {
    /// While editing, the page holding the field under the cursor. While
    /// idle, the time with the date shown at the end of every page cycle.
    pub fn select(session: &EditSession, millis: u32) -> Self {
        match session.active_segment() {
            Some(index) if index < 3 => Page::Time,
            Some(_) => Page::Date,
            None if millis % PAGE_CYCLE_MS >= PAGE_CYCLE_MS - DATE_PAGE_MS => Page::Date,
            None => Page::Time,
        }
    }

    fn segments(self) -> core::ops::Range<usize> {
        match self {
            Page::Time => 0..3,
            Page::Date => 3..6,
        }
    }

    /// Columns left free on either side of a separator.
    fn separator_gap(self) -> i32 {
        match self {
            Page::Time => 1,
            Page::Date => 0,
        }
    }
}

/// 32x8 monochrome frame buffer, one `u32` per row with column 0 in bit 31.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixFrame {
    rows: [u32; 8],
}

impl MatrixFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits the frame into per-device row buffers, leftmost device first.
    pub fn device_buffers(&self) -> [[u8; 8]; MATRIX_DEVICES] {
        let mut buffers = [[0u8; 8]; MATRIX_DEVICES];
        for (dev_idx, buffer) in buffers.iter_mut().enumerate() {
            let shift = 8 * (MATRIX_DEVICES - 1 - dev_idx);
            for (r, row) in self.rows.iter().enumerate() {
                buffer[r] = ((row >> shift) & 0xFF) as u8;
            }
        }
        buffers
    }

    fn draw_glyph(&mut self, x: i32, glyph: &Glyph, width: i32) {
        let pixels = (0..HEIGHT as usize).flat_map(move |row| {
            (0..width)
                .filter(move |&col| font::lit(glyph, width, row, col))
                .map(move |col| Pixel(Point::new(x + col, row as i32), BinaryColor::On))
        });
        let _ = self.draw_iter(pixels);
    }
}

impl OriginDimensions for MatrixFrame {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for MatrixFrame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if !(0..WIDTH).contains(&point.x) || !(0..HEIGHT).contains(&point.y) {
                continue;
            }
            let bit = 1u32 << (WIDTH - 1 - point.x);
            let row = &mut self.rows[point.y as usize];
            match color {
                BinaryColor::On => *row |= bit,
                BinaryColor::Off => *row &= !bit,
            }
        }
        Ok(())
    }
}

/// One placed glyph.
struct Cell {
    glyph: &'static Glyph,
    width: i32,
}

fn cells(frame: &Frame, page: Page, mut emit: impl FnMut(Cell, i32)) {
    let gap = page.separator_gap();
    let last = page.segments().end - 1;
    for index in page.segments() {
        for (n, c) in frame.segments[index].chars().enumerate() {
            let lead = if n == 0 { 0 } else { 1 };
            let cell = Cell {
                glyph: font::digit(c),
                width: DIGIT_WIDTH,
            };
            emit(cell, lead);
        }
        if index < last {
            for c in frame.separator(index).chars().take(1) {
                let cell = Cell {
                    glyph: font::separator(c),
                    width: SEPARATOR_WIDTH,
                };
                emit(cell, gap);
            }
        }
    }
}

/// Draws one page of `frame`, horizontally centred, and returns the buffers
/// for the chained devices.
pub fn prepare_buffer(frame: &Frame, page: Page) -> [[u8; 8]; MATRIX_DEVICES] {
    // A separator's trailing gap is charged as the lead of the next digit.
    let gap = page.separator_gap();
    let mut total = 0;
    let mut after_separator = false;
    cells(frame, page, |cell, lead| {
        total += lead + cell.width + if after_separator { gap } else { 0 };
        after_separator = cell.width == SEPARATOR_WIDTH;
    });

    let mut matrix = MatrixFrame::new();
    let mut x = (WIDTH - total).max(0) / 2;
    let mut after_separator = false;
    cells(frame, page, |cell, lead| {
        x += lead + if after_separator { gap } else { 0 };
        matrix.draw_glyph(x, cell.glyph, cell.width);
        x += cell.width;
        after_separator = cell.width == SEPARATOR_WIDTH;
    });
    matrix.device_buffers()
}
