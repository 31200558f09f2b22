//! Line-oriented `key = value` config reader.
//!
//! ```text
//! # remark to end of line
//! alpha = 2.5
//! name  = "two words"   # quoted text keeps inner spaces
//! flag                   # bare key, value 1
//! alpha = 3              # repeated keys accumulate
//! ```
//!
//! A `#` inside quotes still starts a comment.

use std::{collections::BTreeMap, fmt, fs, path::PathBuf};

use crate::core::value::Value;

/// Raw parse result: every key with its values in file order.
pub type ConfMap = BTreeMap<String, Vec<Value>>;

/// A key's value after the optional simplify step.
#[derive(Clone, Debug, PartialEq)]
pub enum Setting {
    Single(Value),
    List(Vec<Value>),
}

impl Setting {
    /// Values as a slice; a single value is a one-element slice.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::List(l) => l,
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.values().first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.values().last()
    }

    fn into_list(self) -> Vec<Value> {
        match self {
            Self::Single(v) => vec![v],
            Self::List(l) => l,
        }
    }
}

impl From<Value> for Setting {
    fn from(v: Value) -> Self {
        Self::Single(v)
    }
}

impl From<Vec<Value>> for Setting {
    fn from(l: Vec<Value>) -> Self {
        Self::List(l)
    }
}

macro_rules! setting_from_scalar {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Setting {
                fn from(v: $t) -> Self {
                    Self::Single(Value::from(v))
                }
            }
        )+
    };
}

setting_from_scalar!(bool, f64, i32, &str, String);

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(v) => write!(f, "{v}"),
            Self::List(l) => {
                f.write_str("[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Parsed configuration, sorted by key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings(BTreeMap<String, Setting>);

impl Settings {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// First value of `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Setting::first)
    }

    /// Last value of `key`, i.e. the one a later line overrode with.
    #[must_use]
    pub fn last(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Setting::last)
    }

    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.last(key).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.last(key).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.last(key).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Setting)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Print every `key : value` line, sorted by key.
    pub fn dump(&self) {
        for (k, v) in &self.0 {
            println!("{k} : {v}");
        }
    }
}

impl From<ConfMap> for Settings {
    fn from(map: ConfMap) -> Self {
        Self(map.into_iter().map(|(k, v)| (k, Setting::List(v))).collect())
    }
}

// --- Parsing ---

/// Extract `(key, raw value)` from one line. `None` when the line carries
/// nothing after comment stripping.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut line = line.trim();
    if let Some(hash) = line.find('#') {
        line = &line[..hash];
    }
    if line.is_empty() {
        return None;
    }

    let Some((key, raw)) = line.split_once('=') else {
        let key = line.trim();
        return (!key.is_empty()).then_some((key, "1"));
    };

    let value = match raw.split_once('"') {
        // text between the first pair of quotes; unterminated runs to EOL
        Some((_, rest)) => rest.split_once('"').map_or(rest, |(inner, _)| inner),
        None => raw.trim(),
    };
    Some((key.trim_end(), value))
}

/// Parse config text. Keys are never empty; repeated keys accumulate.
#[must_use]
pub fn parse_conf(text: &str) -> ConfMap {
    let mut res = ConfMap::new();
    for line in text.lines() {
        let Some((key, raw)) = split_line(line) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        res.entry(key.to_owned())
            .or_default()
            .push(Value::coerce(raw));
    }
    res
}

/// Insert every default whose key the file did not define.
pub fn merge_defaults<I>(res: &mut ConfMap, defaults: I)
where
    I: IntoIterator<Item = (String, Setting)>,
{
    for (k, v) in defaults {
        res.entry(k).or_insert_with(|| v.into_list());
    }
}

/// Collapse lists to scalars.
///
/// * `strict` – only one-element lists collapse.
/// * otherwise every key keeps its last value. Empty lists stay lists.
#[must_use]
pub fn simplify(map: ConfMap, strict: bool) -> Settings {
    Settings(
        map.into_iter()
            .map(|(k, mut v)| {
                let s = if strict && v.len() != 1 {
                    Setting::List(v)
                } else {
                    match v.pop() {
                        Some(last) => Setting::Single(last),
                        None => Setting::List(v),
                    }
                };
                (k, s)
            })
            .collect(),
    )
}

// --- Reader ---

/// Fluent reader: path + defaults + post-processing flags.
#[derive(Debug)]
pub struct ConfReader {
    path: PathBuf,
    defaults: Vec<(String, Setting)>,
    simplify: Option<bool>,
    verbose: bool,
}

impl ConfReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: Vec::new(),
            simplify: None,
            verbose: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn default(mut self, key: impl Into<String>, value: impl Into<Setting>) -> Self {
        self.defaults.push((key.into(), value.into()));
        self
    }

    #[inline]
    #[must_use]
    pub fn defaults<I, K>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, Setting)>,
        K: Into<String>,
    {
        self.defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Collapse lists after reading; see [`simplify`].
    #[inline]
    #[must_use]
    pub fn simplify(mut self, strict: bool) -> Self {
        self.simplify = Some(strict);
        self
    }

    #[inline]
    #[must_use]
    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }

    /// Read the file. A missing or unreadable file yields the defaults only.
    pub fn read(self) -> Settings {
        let mut res = match fs::read_to_string(&self.path) {
            Ok(text) => parse_conf(&text),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "config file does not exist");
                ConfMap::new()
            }
        };
        merge_defaults(&mut res, self.defaults);

        let settings = match self.simplify {
            Some(strict) => simplify(res, strict),
            None => Settings::from(res),
        };
        if self.verbose {
            settings.dump();
        }
        settings
    }
}

/// One-shot form of [`ConfReader`].
pub fn read_conf<I, K>(path: impl Into<PathBuf>, defaults: I, simplify: bool, strict: bool) -> Settings
where
    I: IntoIterator<Item = (K, Setting)>,
    K: Into<String>,
{
    let mut reader = ConfReader::new(path).defaults(defaults);
    if simplify {
        reader = reader.simplify(strict);
    }
    reader.read()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn comment_is_cut() {
        let m = parse_conf("alpha = 2.5 # comment\n");
        assert_eq!(m.len(), 1);
        assert_eq!(m["alpha"], vec![num(2.5)]);
    }

    #[test]
    fn bare_key_is_one() {
        let m = parse_conf("flag\n  other   # note\n");
        assert_eq!(m["flag"], vec![num(1.0)]);
        assert_eq!(m["other"], vec![num(1.0)]);
    }

    #[test]
    fn repeated_keys_keep_file_order() {
        let m = parse_conf("x = 3\ny = a\nx = 1\nx = true\n");
        assert_eq!(m["x"], vec![num(3.0), num(1.0), Value::Bool(true)]);
        assert_eq!(m["y"], vec![Value::Text("a".into())]);
    }

    #[test]
    fn quoted_value_is_taken_verbatim() {
        let m = parse_conf("name = \" two words \" trailing\nopen = \"no end\nq = \"FALSE\"\n");
        assert_eq!(m["name"], vec![Value::Text(" two words ".into())]);
        assert_eq!(m["open"], vec![Value::Text("no end".into())]);
        assert_eq!(m["q"], vec![Value::Bool(false)]);
    }

    #[test]
    fn quoted_hash_still_comments() {
        let m = parse_conf("tag = \"a#b\"\n");
        assert_eq!(m["tag"], vec![Value::Text("a".into())]);
    }

    #[test]
    fn empty_keys_are_dropped() {
        let m = parse_conf("= 4\n   \n# only a remark\n");
        assert!(m.is_empty());
    }

    #[test]
    fn first_equals_splits() {
        let m = parse_conf("expr = a=b\n");
        assert_eq!(m["expr"], vec![Value::Text("a=b".into())]);
    }

    #[test]
    fn defaults_fill_missing_keys_only() {
        let mut m = parse_conf("a = 1\n");
        merge_defaults(
            &mut m,
            [
                ("a".to_owned(), Setting::from(9.0)),
                ("b".to_owned(), Setting::from("x")),
                ("c".to_owned(), Setting::List(vec![num(1.0), num(2.0)])),
            ],
        );
        assert_eq!(m["a"], vec![num(1.0)]);
        assert_eq!(m["b"], vec![Value::Text("x".into())]);
        assert_eq!(m["c"], vec![num(1.0), num(2.0)]);
    }

    #[test]
    fn strict_simplify_keeps_lists() {
        let s = simplify(parse_conf("a = 1\nb = 1\nb = 2\n"), true);
        assert_eq!(s.get("a"), Some(&Setting::Single(num(1.0))));
        assert_eq!(s.get("b"), Some(&Setting::List(vec![num(1.0), num(2.0)])));
    }

    #[test]
    fn loose_simplify_takes_last() {
        let mut m = parse_conf("a = 1\nb = 1\nb = 2\n");
        m.insert("empty".into(), vec![]);
        let s = simplify(m, false);
        assert_eq!(s.get("a"), Some(&Setting::Single(num(1.0))));
        assert_eq!(s.get("b"), Some(&Setting::Single(num(2.0))));
        assert_eq!(s.get("empty"), Some(&Setting::List(vec![])));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let s = ConfReader::new("/nonexistent/batch-kit/none.conf")
            .default("dpi", 150.0)
            .simplify(false)
            .read();
        assert_eq!(s.len(), 1);
        assert_eq!(s.number("dpi"), Some(150.0));
    }

    #[test]
    fn setting_display() {
        assert_eq!(Setting::List(vec![num(1.0), Value::Bool(true)]).to_string(), "[1, true]");
        assert_eq!(Setting::from("x").to_string(), "x");
    }
}
