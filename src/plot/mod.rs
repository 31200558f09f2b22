//! Numbered figures with matplotlib-like `plot` calls, exported through
//! plotters and previewed in the terminal.

pub mod export;
pub mod figure;
pub mod style;

pub use export::{export_path, save_figure};
pub use figure::{Axes, Figure, Figures, PlotOptions, Scale, Series};
pub use style::{LineStyle, Marker, Style};
