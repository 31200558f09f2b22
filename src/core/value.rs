//! Dynamically typed cell shared by the config parser and the table reader.

use std::fmt;

/// One coerced token.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Config coercion: `true`/`false` (any case), then float, then text.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            Self::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Self::Bool(false)
        } else {
            Self::numeric(raw)
        }
    }

    /// Table coercion: float, then text. Booleans are not recognised.
    #[must_use]
    pub fn numeric(raw: &str) -> Self {
        parse_f64(raw).map_or_else(|| Self::Text(raw.to_owned()), Self::Number)
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Float parse on the whitespace-trimmed token.
#[inline]
#[must_use]
pub fn parse_f64(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    lexical_core::parse::<f64>(t.as_bytes()).ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_ignore_case() {
        assert_eq!(Value::coerce("TRUE"), Value::Bool(true));
        assert_eq!(Value::coerce("true"), Value::Bool(true));
        assert_eq!(Value::coerce("False"), Value::Bool(false));
    }

    #[test]
    fn numbers_then_text() {
        assert_eq!(Value::coerce("3.14"), Value::Number(3.14));
        assert_eq!(Value::coerce("-2e3"), Value::Number(-2000.0));
        assert_eq!(Value::coerce("abc"), Value::Text("abc".into()));
        assert_eq!(Value::coerce(""), Value::Text(String::new()));
    }

    #[test]
    fn table_coercion_keeps_boolean_words() {
        assert_eq!(Value::numeric("true"), Value::Text("true".into()));
        assert_eq!(Value::numeric(" 7 "), Value::Number(7.0));
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::from("n/a").to_string(), "n/a");
    }
}
