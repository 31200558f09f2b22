//! Batch-analysis toolkit: config and table readers, a timestamped report
//! log, text and binary data dumps, figure export and ANSI colours.

pub mod cli;
pub mod core;
pub mod plot;
pub mod render;

pub use self::core::{
    AnsiCode, ConfReader, Entry, Error, PlotError, Report, ReportOptions, Result, SaveOptions,
    Setting, Settings, Table, TableSpec, Value, colortext, dump_data, load_data, read_conf,
    read_table, save_data,
};
pub use plot::{Figures, PlotOptions};

/// Plot `y` over `x` into a fresh figure registry and export it.
///
/// Convenience for one-off scripts; keep a [`Figures`] around to overlay
/// several calls on one figure.
pub fn plot(x: &[f64], y: &[f64], opts: &PlotOptions) -> Result<Option<std::path::PathBuf>> {
    Ok(Figures::new().plot(x, y, opts)?)
}
