//! Geometry helpers: axis ranges + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION as HR, LABEL_GUTTER, MIN_GRAPH_HEIGHT,
    MIN_GRAPH_WIDTH,
};

/// One x position with the vertical extent drawn there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub x: f64,
    pub lo: f64,
    pub hi: f64,
}

impl Span {
    #[inline]
    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self { x, lo: y, hi: y }
    }
}

/// Which axis we’re measuring.
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Inclusive bounds without any padding.
    ///
    /// * If the series is empty or contains only non-finite values the
    ///   fallback is `(0.0, 1.0)`.
    /// * If *all* finite points are identical we expand by +-0.5 so the graph
    ///   still has non-zero height/width.
    #[must_use]
    pub fn bounds(self, spans: &[Span]) -> (f64, f64) {
        let (low, high) = spans
            .iter()
            .map(|s| match self {
                Self::X => (s.x, s.x),
                Self::Y => (s.lo, s.hi),
            })
            .filter(|(l, h)| l.is_finite() && h.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (l, h)| {
                (lo.min(l), hi.max(h))
            });
        settle(low, high)
    }
}

/// Fallbacks shared by every range computation.
#[must_use]
pub fn settle(low: f64, high: f64) -> (f64, f64) {
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    if (high - low).abs() < f64::EPSILON {
        return (low - 0.5, high + 0.5);
    }
    (low, high)
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert terminal dimensions + sample count to graph char grid.
/// Leaves space for borders + labels and never goes below the minimum frame.
#[inline]
#[must_use]
pub fn graph_dims((w, h): (Width, Height), samples: usize, label_width: usize) -> (usize, usize) {
    let x_chars = std::cmp::min(
        samples.div_ceil(HR),
        usize::from(w.0).saturating_sub(BORDER_WIDTH + LABEL_GUTTER + label_width + 1),
    )
    .max(MIN_GRAPH_WIDTH);
    let y_chars = std::cmp::max(MIN_GRAPH_HEIGHT, usize::from(h.0).saturating_sub(5));
    (x_chars, y_chars)
}

/// How wide will the y-axis labels be for *current* min/max?
#[inline]
#[must_use]
pub fn y_label_width(y_range: (f64, f64), decimals: usize) -> usize {
    let (low, high) = y_range;
    format!("{low:.decimals$}")
        .len()
        .max(format!("{high:.decimals$}").len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_flat_ranges() {
        assert_eq!(Axis::Y.bounds(&[]), (0.0, 1.0));
        assert_eq!(Axis::Y.bounds(&[Span::point(0.0, 2.0)]), (1.5, 2.5));
    }

    #[test]
    fn y_uses_span_extent() {
        let spans = [
            Span { x: 0.0, lo: -1.0, hi: 3.0 },
            Span { x: 5.0, lo: 0.0, hi: f64::NAN },
            Span::point(2.0, 1.0),
        ];
        assert_eq!(Axis::Y.bounds(&spans), (-1.0, 3.0));
        assert_eq!(Axis::X.bounds(&spans), (0.0, 5.0));
    }

    #[test]
    fn dims_respect_minimum() {
        let (x, y) = graph_dims((Width(200), Height(40)), 4, 4);
        assert_eq!((x, y), (MIN_GRAPH_WIDTH, 35));
        let (x, _) = graph_dims((Width(40), Height(10)), 1000, 4);
        assert_eq!(x, 40 - BORDER_WIDTH - LABEL_GUTTER - 4 - 1);
    }

    #[test]
    fn label_width_is_widest_end() {
        assert_eq!(y_label_width((-12.34, 5.0), 1), 5);
    }
}
