//! Tab-separated text dump of row data.

use std::{
    fmt::Display,
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::core::{error::Result, report::Report};

/// Optional parts of a text dump.
#[derive(Debug, Default)]
pub struct SaveOptions<'r> {
    /// Free text on the first comment line.
    pub remark: String,
    /// Append instead of overwrite.
    pub append: bool,
    pub report: Option<&'r mut Report>,
}

impl<'r> SaveOptions<'r> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[inline]
    #[must_use]
    pub fn remark(mut self, r: impl Into<String>) -> Self {
        self.remark = r.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn append(mut self, on: bool) -> Self {
        self.append = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn report(mut self, rep: &'r mut Report) -> Self {
        self.report = Some(rep);
        self
    }
}

/// `out.dat` → `out-table.txt`, `my-table.csv` → `my-table.txt`.
#[must_use]
pub fn table_path(filename: impl AsRef<Path>) -> PathBuf {
    let path = filename.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.contains("table") {
        path.with_extension("txt")
    } else {
        path.with_file_name(format!("{stem}-table.txt"))
    }
}

fn join_tab<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\t")
}

/// Write `header` and `rows` as a commented, tab-separated table.
///
/// ```text
/// #<remark>
/// #
/// #a	b
/// 1	2
/// ```
///
/// Returns the normalized path actually written.
pub fn save_data<H, R, T>(
    header: &[H],
    rows: &[R],
    filename: impl AsRef<Path>,
    opts: SaveOptions<'_>,
) -> Result<PathBuf>
where
    H: Display,
    R: AsRef<[T]>,
    T: Display,
{
    let path = table_path(filename);
    let fp = OpenOptions::new()
        .create(true)
        .write(true)
        .append(opts.append)
        .truncate(!opts.append)
        .open(&path)?;
    let mut out = BufWriter::new(fp);

    writeln!(out, "#{}\n#", opts.remark)?;
    writeln!(out, "#{}", join_tab(header))?;
    for row in rows {
        writeln!(out, "{}", join_tab(row.as_ref()))?;
    }
    out.flush()?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "table saved");

    if let Some(rep) = opts.report {
        crate::report!(rep, "Saving data to", path.display())?;
        crate::report!(rep, "Remark:", opts.remark)?;
    }
    Ok(path)
}
