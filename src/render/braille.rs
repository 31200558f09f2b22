//! Spans to UTF-8 braille cells, written straight into a frame buffer.
//!
//! 1. [`preprocess_to_braille`] maps each [`Span`] to pixel rows, one entry
//!    per half column.
//! 2. [`encode_braille_into_frame`] writes three bytes per character cell.
//!    Every braille scalar U+2800..U+28FF encodes as
//!    `E2  A0|((mask>>6)&3)  80|(mask&0x3F)`, so no `char` round trip.
//!
//! A contiguous vertical run intersected with a 4-dot cell column is one of
//! 11 shapes (empty, full, two triples, three pairs, four singles); the
//! masks for both half columns are tabulated below.

use crate::{
    core::{bounds::Span, constants::BRAILLE_VERTICAL_RESOLUTION as VR, error::Error},
    render::view::ViewConfig,
};

/// Pixel rows covered in one half column; row 0 is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSpan {
    pub top: usize,
    pub bottom: usize,
}

#[derive(Debug)]
pub struct BraillePlot {
    pub columns: Vec<PixelSpan>,
}

/// Shape order: empty, full, top-3, bottom-3, top-2, mid-2, bottom-2,
/// dot-0, dot-1, dot-2, dot-3.
const LEFT_MASKS: [u8; 11] = [
    0x00, 0x47, 0x07, 0x46, 0x03, 0x06, 0x44, 0x01, 0x02, 0x04, 0x40,
];
const RIGHT_MASKS: [u8; 11] = [
    0x00, 0xB8, 0x38, 0xB0, 0x18, 0x30, 0xA0, 0x08, 0x10, 0x20, 0x80,
];

/// `(first, last)` dot inside a 4-dot cell → shape index.
#[inline]
const fn shape(first: usize, last: usize) -> usize {
    match (first, last) {
        (0, 3) => 1,
        (0, 2) => 2,
        (1, 3) => 3,
        (0, 1) => 4,
        (1, 2) => 5,
        (2, 3) => 6,
        (0, 0) => 7,
        (1, 1) => 8,
        (2, 2) => 9,
        (3, 3) => 10,
        _ => 0,
    }
}

/// Shape of `span` clipped to the cell whose first pixel row is `cell_top`.
#[inline]
fn clip(span: Option<&PixelSpan>, cell_top: usize) -> usize {
    let cell_bottom = cell_top + VR - 1;
    match span {
        Some(s) if s.bottom >= cell_top && s.top <= cell_bottom => shape(
            s.top.max(cell_top) - cell_top,
            s.bottom.min(cell_bottom) - cell_top,
        ),
        _ => 0,
    }
}

/// Map spans into pixel space. With `bridge`, each column is stretched to
/// touch its predecessor so a sparse series still reads as a line.
pub fn preprocess_to_braille(
    spans: &[Span],
    config: &ViewConfig,
    bridge: bool,
) -> Result<BraillePlot, Error> {
    if spans.is_empty() {
        return Err(Error::EmptyData);
    }

    let rows = config.y_chars * VR;
    let y_span = config.y_max - config.y_min; // > 0 by construction

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let to_row = |y: f64| -> usize {
        let last = rows.saturating_sub(1);
        let r = ((y - config.y_min) / y_span).clamp(0.0, 1.0) * last as f64;
        last - r.round() as usize
    };

    let mut columns: Vec<PixelSpan> = spans
        .iter()
        .map(|s| {
            let (a, b) = (to_row(s.hi), to_row(s.lo));
            PixelSpan {
                top: a.min(b),
                bottom: a.max(b),
            }
        })
        .collect();

    if bridge {
        for i in (1..columns.len()).rev() {
            let prev = columns[i - 1];
            let curr = &mut columns[i];
            curr.top = curr.top.min(prev.top + 1);
            curr.bottom = curr.bottom.max(prev.bottom.saturating_sub(1));
        }
    }

    Ok(BraillePlot { columns })
}

/// Encode `plot` into `buf`, the full frame buffer.
///
/// * `offset` -- byte index of the first braille cell (row 0, col 0)
/// * `row_stride` -- bytes between successive graph rows in `buf`
pub fn encode_braille_into_frame(
    buf: &mut [u8],
    offset: usize,
    row_stride: usize,
    plot: &BraillePlot,
    x_chars: usize,
    y_chars: usize,
) {
    debug_assert!(
        buf.len() >= offset + row_stride * y_chars,
        "frame buffer too small"
    );

    for row in 0..y_chars {
        let cell_top = row * VR;
        let row_base = offset + row * row_stride;

        for col in 0..x_chars {
            let left = clip(plot.columns.get(col * 2), cell_top);
            let right = clip(plot.columns.get(col * 2 + 1), cell_top);
            let mask = LEFT_MASKS[left] | RIGHT_MASKS[right];

            let cell = row_base + col * 3;
            buf[cell] = 0xE2;
            // dots 7 and 8 live in the low bits of the second byte
            buf[cell + 1] = 0xA0 | ((mask >> 6) & 0x03);
            buf[cell + 2] = 0x80 | (mask & 0x3F);
        }
    }
}
