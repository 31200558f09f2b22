//! Box-drawn frame around a braille plot.
//!
//! ```text
//! ┌───────  title  ───────┐
//! │                       │
//! │2.0 ⡇⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀│
//! │    ...                │
//! │0.0 ⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀│
//! │                       │
//! └──────  subtitle  ─────┘
//! ```

use std::io::{Write, stdout};

use crate::{
    core::{
        bounds::y_label_width,
        color::{AnsiCode, colorize},
        constants::{
            BORDER_WIDTH, DECIMAL_PRECISION, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH,
        },
        error::Error,
    },
    render::{
        braille::{BraillePlot, encode_braille_into_frame},
        view::ViewConfig,
    },
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

const RESET_SEQ: &str = "\x1b[0m";

/// Write centred coloured text between horizontal rules.
fn push_centered(buf: &mut String, text: &str, width: usize, color: &AnsiCode) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.push_str(&H.repeat(width));
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  ");
    buf.push_str(&colorize(color, text));
    buf.push(' ');
    buf.push_str(&H.repeat(pad_right));
}

fn push_blank(buf: &mut String, inner: usize) {
    buf.push_str(V);
    buf.push_str(&" ".repeat(inner));
    buf.push_str(V);
    buf.push('\n');
}

/// One-shot renderer: builds the whole frame, then prints it.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    #[inline]
    #[must_use]
    pub fn full() -> Self {
        Self
    }

    /// The complete frame as text (ANSI colour sequences included).
    pub fn render_to_string(&self, cfg: &ViewConfig, plot: &BraillePlot) -> Result<String, Error> {
        if cfg.x_chars < MIN_GRAPH_WIDTH || cfg.y_chars < MIN_GRAPH_HEIGHT {
            return Err(Error::GraphTooSmall {
                want_w: MIN_GRAPH_WIDTH,
                want_h: MIN_GRAPH_HEIGHT,
                got_w: cfg.x_chars,
                got_h: cfg.y_chars,
            });
        }

        let label_width = y_label_width(cfg.y_range(), DECIMAL_PRECISION);
        let inner = cfg.x_chars + label_width + LABEL_GUTTER;
        let line_len = inner + BORDER_WIDTH;
        let high_label = format!("{:.*}", DECIMAL_PRECISION, cfg.y_max);
        let low_label = format!("{:.*}", DECIMAL_PRECISION, cfg.y_min);

        // braille payload first, three bytes per glyph
        let stride = cfg.x_chars * 3;
        let mut cells = vec![0u8; stride * cfg.y_chars];
        encode_braille_into_frame(&mut cells, 0, stride, plot, cfg.x_chars, cfg.y_chars);

        let mut out = String::with_capacity((line_len * 4 + 16) * (cfg.y_chars + 4));

        // --- top ---
        out.push_str(TL);
        push_centered(&mut out, &cfg.title, inner, &cfg.color);
        out.push_str(TR);
        out.push('\n');
        push_blank(&mut out, inner);

        // --- rows ---
        for (r, row) in cells.chunks(stride).enumerate() {
            let label = match r {
                0 => high_label.as_str(),
                r if r + 1 == cfg.y_chars => low_label.as_str(),
                _ => "",
            };
            out.push_str(V);
            out.push_str(&format!("{label:>label_width$}"));
            out.push_str(&" ".repeat(LABEL_GUTTER));
            out.push_str(&cfg.color.to_string());
            out.push_str(&String::from_utf8_lossy(row));
            out.push_str(RESET_SEQ);
            out.push_str(V);
            out.push('\n');
        }

        // --- bottom ---
        push_blank(&mut out, inner);
        out.push_str(BL);
        match &cfg.subtitle {
            Some(sub) => push_centered(&mut out, sub, inner, &cfg.color),
            None => out.push_str(&H.repeat(inner)),
        }
        out.push_str(BR);
        out.push('\n');
        Ok(out)
    }

    /// Print the frame to stdout.
    pub fn render(&self, cfg: &ViewConfig, plot: &BraillePlot) -> Result<(), Error> {
        let frame = self.render_to_string(cfg, plot)?;
        let mut term = stdout().lock();
        term.write_all(frame.as_bytes())?;
        term.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::bounds::Span, render::braille::preprocess_to_braille};

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut esc = false;
        for c in s.chars() {
            match (esc, c) {
                (false, '\x1b') => esc = true,
                (true, 'm') => esc = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn frame_has_labels_and_chrome() {
        let cfg = ViewConfig::builder(MIN_GRAPH_WIDTH, MIN_GRAPH_HEIGHT)
            .title("fit")
            .y_range((0.0, 2.0))
            .build()
            .unwrap();
        let spans: Vec<Span> = (0..28).map(|i| Span::point(f64::from(i), f64::from(i % 3))).collect();
        let plot = preprocess_to_braille(&spans, &cfg, true).unwrap();

        let text = strip_ansi(&Renderer::full().render_to_string(&cfg, &plot).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), MIN_GRAPH_HEIGHT + 4);
        assert!(lines[0].starts_with('┌') && lines[0].contains(" fit "));
        assert!(lines[2].starts_with("│2.0 "));
        assert!(lines[MIN_GRAPH_HEIGHT + 1].starts_with("│0.0 "));
        assert!(lines.last().unwrap().starts_with('└'));

        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn tiny_frames_are_rejected() {
        let cfg = ViewConfig::builder(3, 3).y_range((0.0, 1.0)).build().unwrap();
        let plot = BraillePlot { columns: vec![] };
        assert!(matches!(
            Renderer::full().render_to_string(&cfg, &plot),
            Err(Error::GraphTooSmall { got_w: 3, .. })
        ));
    }
}
