//! A collection of constants.

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;

/// Graph must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Graph must be at least 14 characters wide
pub const MIN_GRAPH_WIDTH: usize = 14;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Numbers are rounded to the first decimal place.
///
/// 14.832 becomes 14.8
pub const DECIMAL_PRECISION: usize = 1;

/// Figures are numbered 1 ..= `FIGURE_COUNT`.
pub const FIGURE_COUNT: usize = 10;
/// Exported figure size in inches.
pub const FIGURE_INCHES: (f64, f64) = (6.4, 4.8);
pub const DEFAULT_DPI: u32 = 150;
/// Marker sizes are given in typographic points.
pub const POINTS_PER_INCH: f64 = 72.0;
