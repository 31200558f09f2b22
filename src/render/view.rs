//! Terminal preview parameters + fluent builder.

use crate::core::{color::AnsiCode, error::Error};

/// Immutable parameters handed to the renderer.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub y_min: f64,
    pub y_max: f64,
    pub x_chars: usize,
    pub y_chars: usize,
    pub color: AnsiCode,
}

impl ViewConfig {
    #[inline]
    #[must_use]
    pub fn builder(x_chars: usize, y_chars: usize) -> ViewBuilder {
        ViewBuilder::new(x_chars, y_chars)
    }

    #[inline]
    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }
}

/// Fluent builder with zero allocation until `build`.
#[derive(Debug)]
pub struct ViewBuilder {
    x_chars: usize,
    y_chars: usize,
    title: Option<String>,
    subtitle: Option<String>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    color: Option<AnsiCode>,
}

impl ViewBuilder {
    pub(crate) fn new(x_chars: usize, y_chars: usize) -> Self {
        Self {
            x_chars,
            y_chars,
            title: None,
            subtitle: None,
            y_min: None,
            y_max: None,
            color: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn subtitle_opt(mut self, s: Option<String>) -> Self {
        self.subtitle = s;
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range(mut self, (lo, hi): (f64, f64)) -> Self {
        self.y_min = Some(lo);
        self.y_max = Some(hi);
        self
    }
    #[inline]
    #[must_use]
    pub fn color<C: Into<AnsiCode>>(mut self, c: C) -> Self {
        self.color = Some(c.into());
        self
    }

    pub fn build(self) -> Result<ViewConfig, Error> {
        let y_min = self.y_min.ok_or(Error::MissingField("y_min"))?;
        let y_max = self.y_max.ok_or(Error::MissingField("y_max"))?;
        if y_min >= y_max {
            return Err(Error::InvalidRange {
                low: y_min,
                high: y_max,
            });
        }
        Ok(ViewConfig {
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            y_min,
            y_max,
            x_chars: self.x_chars,
            y_chars: self.y_chars,
            color: self.color.unwrap_or_else(AnsiCode::industrial_orange),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected() {
        let err = ViewConfig::builder(20, 8).y_range((2.0, 1.0)).build();
        assert!(matches!(err, Err(Error::InvalidRange { .. })));
        assert!(matches!(
            ViewConfig::builder(20, 8).build(),
            Err(Error::MissingField("y_min"))
        ));
    }

    #[test]
    fn colour_defaults_to_orange() {
        let cfg = ViewConfig::builder(20, 8).y_range((0.0, 1.0)).build().unwrap();
        assert_eq!(cfg.color, AnsiCode::industrial_orange());
        assert!(cfg.title.is_empty());
    }
}
