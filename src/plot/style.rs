//! Matplotlib-style format strings: `[color][marker][line]` in any order,
//! e.g. `r+`, `b-`, `go--`, `k:`.

use plotters::style::RGBColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Point,
    Circle,
    Triangle,
    Square,
    Plus,
    Cross,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Parsed format string. No marker and no line means a solid line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    pub color: Option<RGBColor>,
    pub marker: Option<Marker>,
    pub line: Option<LineStyle>,
}

/// Default colour cycle, one entry per series.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

fn color_code(c: char) -> Option<RGBColor> {
    Some(match c {
        'b' => RGBColor(0, 0, 255),
        'g' => RGBColor(0, 128, 0),
        'r' => RGBColor(255, 0, 0),
        'c' => RGBColor(0, 191, 191),
        'm' => RGBColor(191, 0, 191),
        'y' => RGBColor(191, 191, 0),
        'k' => RGBColor(0, 0, 0),
        'w' => RGBColor(255, 255, 255),
        _ => return None,
    })
}

fn marker_code(c: char) -> Option<Marker> {
    Some(match c {
        '.' | ',' => Marker::Point,
        'o' | 'h' | 'H' | '8' | 'p' => Marker::Circle,
        '^' | 'v' | '<' | '>' => Marker::Triangle,
        's' | 'D' | 'd' => Marker::Square,
        '+' | '|' | '_' => Marker::Plus,
        'x' | 'X' | '*' => Marker::Cross,
        _ => return None,
    })
}

impl Style {
    /// Parse `fmt`; unknown characters are ignored.
    #[must_use]
    pub fn parse(fmt: &str) -> Self {
        let mut style = Self::default();
        let mut rest = fmt.trim();
        while let Some(c) = rest.chars().next() {
            if let Some(tail) = rest.strip_prefix("--").or_else(|| rest.strip_prefix("-.")) {
                style.line = Some(LineStyle::Dashed);
                rest = tail;
                continue;
            }
            match c {
                '-' => style.line = Some(LineStyle::Solid),
                ':' => style.line = Some(LineStyle::Dotted),
                _ => {
                    if let Some(col) = color_code(c) {
                        style.color = Some(col);
                    } else if let Some(m) = marker_code(c) {
                        style.marker = Some(m);
                    }
                }
            }
            rest = &rest[c.len_utf8()..];
        }
        if style.marker.is_none() && style.line.is_none() {
            style.line = Some(LineStyle::Solid);
        }
        style
    }

    /// Explicit colour, else the `index`-th palette entry.
    #[must_use]
    pub fn color_or_cycle(&self, index: usize) -> RGBColor {
        self.color.unwrap_or(PALETTE[index % PALETTE.len()])
    }
}
