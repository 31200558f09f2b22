//! Append-only run report.
//!
//! Every line is echoed to stdout, appended to the report file and flushed
//! straight away so a crashed batch job still leaves its trail on disk.
//!
//! The file handle is an explicit two-state machine: [`Report::open`] and
//! writing to a closed report move it to `Open` (header included),
//! [`Report::close`] moves it back to `Closed`.

use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::core::{color::colortext, error::Result};

/// `ctime(3)` layout, e.g. `Thu Oct 16 20:22:00 2026`.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Where and how a report is written.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub pathname: PathBuf,
    pub filename: String,
    /// Joins the arguments of one write.
    pub sep: String,
    /// Between the timestamp and the text.
    pub timesep: String,
    /// Stamp every line, not only forced ones.
    pub add_time: bool,
    /// First line written on every open; empty disables it.
    pub header: String,
    /// Echo lines to stdout.
    pub echo: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            pathname: PathBuf::from("./"),
            filename: "report.rep".to_owned(),
            sep: " ".to_owned(),
            timesep: "\t".to_owned(),
            add_time: true,
            header: "Report file is opened".to_owned(),
            echo: true,
        }
    }
}

impl ReportOptions {
    pub fn new(pathname: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            filename: filename.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn sep(mut self, s: impl Into<String>) -> Self {
        self.sep = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn timesep(mut self, s: impl Into<String>) -> Self {
        self.timesep = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn add_time(mut self, on: bool) -> Self {
        self.add_time = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn header(mut self, h: impl Into<String>) -> Self {
        self.header = h.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn echo(mut self, on: bool) -> Self {
        self.echo = on;
        self
    }

    /// Report file path; an invalid directory falls back to the current one.
    fn resolve(&self) -> PathBuf {
        self.resolve_in(Path::new("."))
    }

    fn resolve_in(&self, fallback: &Path) -> PathBuf {
        if self.pathname.is_dir() {
            self.pathname.join(&self.filename)
        } else {
            tracing::warn!(
                path = %self.pathname.display(),
                "invalid pathname, falling back to local dir"
            );
            fallback.join(&self.filename)
        }
    }
}

/// Per-write switches.
#[derive(Clone, Copy, Debug, Default)]
pub struct Entry<'a> {
    /// Stamp this line even when `add_time` is off.
    pub withtime: bool,
    /// Colour name for the console echo (see [`colortext`]).
    pub color: &'a str,
}

#[derive(Debug)]
enum State {
    Closed,
    Open(File),
}

/// A report file plus its open/closed state.
#[derive(Debug)]
pub struct Report {
    opts: ReportOptions,
    path: PathBuf,
    state: State,
}

impl Report {
    /// Open (append) the report and write the header block.
    pub fn open(opts: ReportOptions) -> Result<Self> {
        let path = opts.resolve();
        let mut rep = Self {
            opts,
            path,
            state: State::Closed,
        };
        rep.reopen()?;
        Ok(rep)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// `Closed -> Open`: append mode, stamped header, two blank lines.
    fn reopen(&mut self) -> Result<()> {
        let fp = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.state = State::Open(fp);

        if !self.opts.header.is_empty() {
            let line = self.format_line(&[&self.opts.header as &dyn Display], true);
            self.emit(&line, "")?;
        }
        let fp = self.handle()?;
        fp.write_all(b"\n\n")?;
        fp.flush()?;
        Ok(())
    }

    /// The open handle, reopening a closed report first.
    fn handle(&mut self) -> Result<&mut File> {
        if !self.is_open() {
            self.reopen()?;
        }
        match &mut self.state {
            State::Open(fp) => Ok(fp),
            State::Closed => Err(io::Error::other("report is closed").into()),
        }
    }

    fn format_line(&self, args: &[&dyn Display], withtime: bool) -> String {
        let body = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&self.opts.sep);

        if self.opts.add_time || withtime {
            let stamp = Local::now().format(CTIME_FORMAT);
            format!("{stamp}:{}{body}", self.opts.timesep)
        } else {
            body
        }
    }

    fn emit(&mut self, line: &str, color: &str) -> Result<()> {
        if self.opts.echo {
            println!("{}", colortext(line, color, true));
        }
        let fp = self.handle()?;
        fp.write_all(line.as_bytes())?;
        fp.write_all(b"\n")?;
        fp.flush()?;
        Ok(())
    }

    /// Write one line built from `args` with default switches.
    pub fn write(&mut self, args: &[&dyn Display]) -> Result<()> {
        self.write_entry(args, Entry::default())
    }

    /// Write one line built from `args`.
    pub fn write_entry(&mut self, args: &[&dyn Display], entry: Entry<'_>) -> Result<()> {
        self.handle()?;
        let line = self.format_line(args, entry.withtime);
        tracing::debug!(path = %self.path.display(), "report line");
        self.emit(&line, entry.color)
    }

    /// `Open -> Closed`: two trailing blank lines, then release the handle.
    /// Closing a closed report does nothing.
    pub fn close(&mut self) -> Result<()> {
        if let State::Open(mut fp) = std::mem::replace(&mut self.state, State::Closed) {
            fp.write_all(b"\n\n")?;
            fp.flush()?;
        }
        Ok(())
    }
}

/// `report!(rep, "Saving data to", path.display())`
#[macro_export]
macro_rules! report {
    ($rep:expr, $($arg:expr),+ $(,)?) => {
        $rep.write(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}
