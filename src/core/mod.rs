//! Aggregates the readers, writers and shared types.

pub mod bounds;
pub mod color;
pub mod conf;
pub mod constants;
pub mod dump;
pub mod error;
pub mod report;
pub mod save;
pub mod table;
pub mod value;

// re-export frequently-used items for convenience
pub use color::{AnsiCode, colorize, colortext};
pub use conf::{ConfReader, Setting, Settings, parse_conf, read_conf};
pub use dump::{dump_data, load_data};
pub use error::{Error, PlotError, Result};
pub use report::{Entry, Report, ReportOptions};
pub use save::{SaveOptions, save_data};
pub use table::{ColumnKey, Table, TableSpec, numeric_rows, parse_table, read_rows, read_table};
pub use value::Value;
