//! Terminal preview: spans → binned half columns → braille frame.

pub mod binner;
pub mod braille;
pub mod frame;
pub mod view;

pub use binner::bin_by_index;
pub use braille::{BraillePlot, preprocess_to_braille};
pub use frame::Renderer;
pub use view::{ViewBuilder, ViewConfig};

use crate::core::{
    bounds::{Axis, Span},
    constants::{BRAILLE_HORIZONTAL_RESOLUTION, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
    error::Error,
};

/// Sort and bin `spans` into a braille plot for an `x_chars` × `y_chars`
/// frame.
///
/// Frames below the minimum size are rejected before any drawing.
/// `view` gets a builder with the data's y range already set and adds the
/// title, subtitle and colour.
pub fn prepare<F>(
    mut spans: Vec<Span>,
    x_chars: usize,
    y_chars: usize,
    view: F,
) -> Result<(ViewConfig, BraillePlot), Error>
where
    F: FnOnce(ViewBuilder) -> ViewBuilder,
{
    if x_chars < MIN_GRAPH_WIDTH || y_chars < MIN_GRAPH_HEIGHT {
        return Err(Error::GraphTooSmall {
            want_w: MIN_GRAPH_WIDTH,
            want_h: MIN_GRAPH_HEIGHT,
            got_w: x_chars,
            got_h: y_chars,
        });
    }
    spans.retain(|s| s.x.is_finite());
    spans.sort_by(|l, r| l.x.total_cmp(&r.x));

    let cfg = view(ViewConfig::builder(x_chars, y_chars).y_range(Axis::Y.bounds(&spans))).build()?;
    let binned = bin_by_index(&spans, x_chars * BRAILLE_HORIZONTAL_RESOLUTION);
    let plot = preprocess_to_braille(&binned, &cfg, true)?;
    Ok((cfg, plot))
}

/// [`prepare`], then draw the frame as text.
pub fn frame_spans<F>(spans: Vec<Span>, x_chars: usize, y_chars: usize, view: F) -> Result<String, Error>
where
    F: FnOnce(ViewBuilder) -> ViewBuilder,
{
    let (cfg, plot) = prepare(spans, x_chars, y_chars, view)?;
    Renderer::full().render_to_string(&cfg, &plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Vec<Span> {
        (0..30).map(|i| Span::point(f64::from(i), f64::from(i % 4))).collect()
    }

    #[test]
    fn zero_height_is_too_small() {
        let err = prepare(ramp(), 20, 0, |b| b).unwrap_err();
        assert!(matches!(err, Error::GraphTooSmall { got_w: 20, got_h: 0, .. }));
    }

    #[test]
    fn minimum_frame_renders() {
        let text = frame_spans(ramp(), MIN_GRAPH_WIDTH, MIN_GRAPH_HEIGHT, |b| b.title("t")).unwrap();
        assert_eq!(text.lines().count(), MIN_GRAPH_HEIGHT + 4);
    }
}
