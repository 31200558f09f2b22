//! Delimited text table loader.
//!
//! One row per line, `#` remarks, tokens split on a delimiter (or any
//! whitespace run). Rows may be ragged: a column simply has no entry for a
//! row that is too short.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use crate::core::value::Value;

/// Name of an output column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

impl From<usize> for ColumnKey {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for ColumnKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_owned())
    }
}

impl From<String> for ColumnKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

/// What to pick from the file and how to split it.
#[derive(Clone, Debug)]
pub struct TableSpec {
    pub sep: String,
    pub cols: Vec<usize>,
    pub keys: Vec<ColumnKey>,
    pub fill: Value,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            sep: String::new(),
            cols: Vec::new(),
            keys: Vec::new(),
            fill: Value::Number(0.0),
        }
    }
}

impl TableSpec {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delimiter; empty means any whitespace run.
    #[inline]
    #[must_use]
    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Columns to keep, in output order. Empty keeps every column of the
    /// first row.
    #[inline]
    #[must_use]
    pub fn cols(mut self, cols: impl IntoIterator<Item = usize>) -> Self {
        self.cols = cols.into_iter().collect();
        self
    }

    /// Output names for `cols`. Missing names fall back to the index.
    #[inline]
    #[must_use]
    pub fn keys<K: Into<ColumnKey>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Stand-in for an empty token between two delimiters.
    #[inline]
    #[must_use]
    pub fn fill(mut self, fill: impl Into<Value>) -> Self {
        self.fill = fill.into();
        self
    }

    fn split<'a>(&'a self, line: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        if self.sep.is_empty() {
            Box::new(line.split_whitespace())
        } else {
            Box::new(line.split(self.sep.as_str()))
        }
    }

    fn row(&self, line: &str) -> Vec<Value> {
        self.split(line)
            .map(|tok| {
                if tok.is_empty() {
                    self.fill.clone()
                } else {
                    Value::numeric(tok)
                }
            })
            .collect()
    }
}

/// One output column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub key: ColumnKey,
    pub values: Vec<Value>,
}

/// Selected columns, in the requested order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Pick `spec.cols` out of ragged `rows`.
    #[must_use]
    pub fn from_rows(rows: &[Vec<Value>], spec: &TableSpec) -> Self {
        let cols: Vec<usize> = if spec.cols.is_empty() {
            (0..rows.first().map_or(0, Vec::len)).collect()
        } else {
            spec.cols.clone()
        };

        let mut keys = spec.keys.clone();
        if keys.len() < cols.len() {
            keys.extend(cols[keys.len()..].iter().map(|&c| ColumnKey::Index(c)));
        }

        let mut table = Self::default();
        for (&c, key) in cols.iter().zip(keys) {
            let values = rows.iter().filter_map(|r| r.get(c).cloned()).collect();
            table.insert(Column { key, values });
        }
        table
    }

    /// Later columns replace earlier ones with the same key.
    fn insert(&mut self, col: Column) {
        match self.columns.iter_mut().find(|c| c.key == col.key) {
            Some(slot) => *slot = col,
            None => self.columns.push(col),
        }
    }

    #[must_use]
    pub fn get(&self, key: &ColumnKey) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| &c.key == key)
            .map(|c| c.values.as_slice())
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&[Value]> {
        self.get(&ColumnKey::Index(index))
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Option<&[Value]> {
        self.get(&ColumnKey::Name(name.to_owned()))
    }

    /// Numeric entries of a column; text cells are skipped.
    #[must_use]
    pub fn numbers(&self, key: &ColumnKey) -> Option<Vec<f64>> {
        self.get(key)
            .map(|v| v.iter().filter_map(Value::as_f64).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// --- Ingest ---

/// Every data row of `src`, comments and blank lines dropped.
pub fn read_rows<R: Read>(src: R, spec: &TableSpec) -> io::Result<Vec<Vec<Value>>> {
    let mut rdr = BufReader::new(src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut rows = Vec::new();

    loop {
        buf.clear();
        if rdr.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let mut line = text.trim();
        if let Some(hash) = line.find('#') {
            line = &line[..hash];
        }
        if line.is_empty() {
            continue;
        }
        rows.push(spec.row(line));
    }
    Ok(rows)
}

/// Cells `cols` of every row whose selected cells are all numbers, so the
/// values stay paired row by row.
#[must_use]
pub fn numeric_rows(rows: &[Vec<Value>], cols: &[usize]) -> Vec<Vec<f64>> {
    rows.iter()
        .filter_map(|r| {
            cols.iter()
                .map(|&c| r.get(c).and_then(Value::as_f64))
                .collect::<Option<Vec<f64>>>()
        })
        .collect()
}

/// Parse table text held in memory.
#[must_use]
pub fn parse_table(text: &str, spec: &TableSpec) -> Table {
    // reading from a byte slice cannot fail
    let rows = read_rows(text.as_bytes(), spec).unwrap_or_default();
    Table::from_rows(&rows, spec)
}

/// Read a table file. A missing or unreadable file yields `None`.
pub fn read_table(path: impl AsRef<Path>, spec: &TableSpec) -> Option<Table> {
    let path = path.as_ref();
    let rows = File::open(path).and_then(|f| read_rows(f, spec));
    match rows {
        Ok(rows) => Some(Table::from_rows(&rows, spec)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "file not found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(v: &[f64]) -> Vec<Value> {
        v.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn whitespace_default() {
        let t = parse_table("1 2 \n", &TableSpec::new());
        assert_eq!(t.len(), 2);
        assert_eq!(t.column(0), Some(nums(&[1.0]).as_slice()));
        assert_eq!(t.column(1), Some(nums(&[2.0]).as_slice()));
    }

    #[test]
    fn comments_and_blank_lines_skip() {
        let text = "# header\n\n1\t2 # tail\n  3   4\n";
        let t = parse_table(text, &TableSpec::new());
        assert_eq!(t.column(0), Some(nums(&[1.0, 3.0]).as_slice()));
        assert_eq!(t.column(1), Some(nums(&[2.0, 4.0]).as_slice()));
    }

    #[test]
    fn empty_tokens_take_fill() {
        let spec = TableSpec::new().sep(",").fill(-1.0);
        let t = parse_table("1,,3\n,x,\n", &spec);
        assert_eq!(t.column(0), Some(nums(&[1.0, -1.0]).as_slice()));
        assert_eq!(
            t.column(1),
            Some([Value::Number(-1.0), Value::Text("x".into())].as_slice())
        );
        assert_eq!(t.column(2), Some(nums(&[3.0, -1.0]).as_slice()));
    }

    #[test]
    fn ragged_rows_skip_missing_cells() {
        let spec = TableSpec::new().cols([0, 2]);
        let t = parse_table("1 2 3\n4 5\n6 7 8\n", &spec);
        assert_eq!(t.column(0), Some(nums(&[1.0, 4.0, 6.0]).as_slice()));
        assert_eq!(t.column(2), Some(nums(&[3.0, 8.0]).as_slice()));
        assert_eq!(t.column(1), None);
    }

    #[test]
    fn short_key_list_pads_with_indices() {
        let spec = TableSpec::new().cols([2, 0, 1]).keys(["c"]);
        let t = parse_table("1 2 3\n", &spec);
        let keys: Vec<_> = t.iter().map(|c| c.key.clone()).collect();
        assert_eq!(
            keys,
            vec![ColumnKey::from("c"), ColumnKey::Index(0), ColumnKey::Index(1)]
        );
        assert_eq!(t.named("c"), Some(nums(&[3.0]).as_slice()));
    }

    #[test]
    fn all_columns_follow_first_row() {
        let t = parse_table("1 2\n3 4 5\n", &TableSpec::new());
        assert_eq!(t.len(), 2);
        assert_eq!(t.column(2), None);
    }

    #[test]
    fn text_cells_survive_and_numbers_filter() {
        let t = parse_table("1 n/a\n2 5\n", &TableSpec::new());
        assert_eq!(t.numbers(&ColumnKey::Index(1)), Some(vec![5.0]));
        assert_eq!(t.column(1).map(|c| c[0].to_string()), Some("n/a".into()));
    }

    #[test]
    fn numeric_rows_keep_cells_paired() {
        let rows = read_rows("n/a 4\n2 n/a\n3 6\n7\n".as_bytes(), &TableSpec::new()).unwrap();
        assert_eq!(numeric_rows(&rows, &[0, 1]), vec![vec![3.0, 6.0]]);
        assert_eq!(numeric_rows(&rows, &[1, 0]), vec![vec![6.0, 3.0]]);
        assert_eq!(numeric_rows(&rows, &[0]), vec![vec![2.0], vec![3.0], vec![7.0]]);
    }

    #[test]
    fn no_rows_is_empty() {
        assert!(parse_table("# nothing\n", &TableSpec::new()).is_empty());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(read_table("/nonexistent/batch-kit/t.txt", &TableSpec::new()).is_none());
    }
}
