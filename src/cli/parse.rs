use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "batchkit",
    about = "Config files, data tables, reports and plots for batch analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a config file and print its settings
    Conf(ConfArgs),
    /// Read columns out of a data table
    Table(TableArgs),
    /// Plot two table columns, export and preview the figure
    Plot(PlotArgs),
    /// Show available color names / hex syntax
    Colors,
    /// Print example invocations
    Examples,
}

/// `batchkit conf …`
#[derive(Args, Debug)]
pub struct ConfArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Keep only the last value of every key
    #[arg(long)]
    pub simplify: bool,

    /// With --simplify, collapse single-value keys only
    #[arg(long, requires = "simplify")]
    pub strict: bool,
}

/// Column selection shared by `table` and `plot`.
#[derive(Args, Debug)]
pub struct TableArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator (whitespace if omitted)
    #[arg(long, default_value = "")]
    pub sep: String,

    /// Columns to keep, e.g. `0,2`
    #[arg(long, value_delimiter = ',')]
    pub cols: Vec<usize>,

    /// Names for the kept columns, e.g. `t,v`
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Value of an empty field
    #[arg(long, default_value = "0")]
    pub fill: String,
}

/// `batchkit plot …`
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field separator (whitespace if omitted)
    #[arg(long, default_value = "")]
    pub sep: String,

    /// Column of the x values
    #[arg(long, default_value_t = 0)]
    pub x: usize,
    /// Column of the y values
    #[arg(long, default_value_t = 1)]
    pub y: usize,
    /// Column of the x errors (needs --yerr)
    #[arg(long, requires = "yerr")]
    pub xerr: Option<usize>,
    /// Column of the y errors (needs --xerr)
    #[arg(long, requires = "xerr")]
    pub yerr: Option<usize>,

    /// Format string, e.g. `r+`, `b-`, `go--`
    #[arg(long, default_value = "+")]
    pub fmt: String,
    /// `x`, `y` or `xy` for log axes, `-` for linear
    #[arg(long, default_value = "")]
    pub log: String,

    #[arg(short, long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub xlabel: String,
    #[arg(long, default_value = "")]
    pub ylabel: String,

    /// Export file name; nothing is written if omitted
    #[arg(long, default_value = "")]
    pub filename: String,
    /// Export directory
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    #[arg(long, default_value = ".png")]
    pub ext: String,
    #[arg(long, default_value_t = crate::core::constants::DEFAULT_DPI)]
    pub dpi: u32,

    /// Log the run into this report file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip the terminal preview
    #[arg(long)]
    pub no_preview: bool,
}
