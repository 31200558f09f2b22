//! ANSI colour helper: a static name → SGR table plus true-colour hex codes.

use std::fmt;

/// SGR reset code.
pub const RESET: u8 = 0;

/// Every symbolic name understood by [`colortext`]. `bg*` entries are
/// backgrounds; `bold` .. `strike` are styles.
pub static SGR_CODES: &[(&str, u8)] = &[
    ("reset", RESET),
    ("bold", 1),
    ("underline", 4),
    ("blink", 5),
    ("invert", 7),
    ("conceald", 8),
    ("strike", 9),
    ("grey30", 90),
    ("grey40", 2),
    ("grey65", 37),
    ("grey70", 97),
    ("bggrey20", 40),
    ("bggrey33", 100),
    ("bggrey80", 47),
    ("bggrey93", 107),
    ("darkred", 31),
    ("red", 91),
    ("bgdarkred", 41),
    ("bgred", 101),
    ("darkyellow", 33),
    ("yellow", 93),
    ("bgyellow", 43),
    ("bglightyellow", 103),
    ("darkblue", 34),
    ("blue", 94),
    ("bgdarkblue", 44),
    ("bgblue", 104),
    ("darkmagenta", 35),
    ("purple", 95),
    ("bgmagenta", 45),
    ("bglightpurple", 105),
    ("darkcyan", 36),
    ("cyan", 96),
    ("bgcyan", 106),
    ("darkgreen", 32),
    ("green", 92),
    ("bggreen", 42),
    ("bglightgreen", 102),
    ("black", 30),
];

/// Look up the SGR code of a symbolic name.
#[must_use]
pub fn sgr_code(name: &str) -> Option<u8> {
    SGR_CODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, code)| code)
}

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiCode {
    Sgr(u8),
    Rgb(u8, u8, u8),
}

impl AnsiCode {
    #[inline]
    #[must_use]
    pub const fn reset() -> Self {
        Self::Sgr(RESET)
    }

    /// Default colour of the terminal preview.
    #[inline]
    #[must_use]
    pub const fn industrial_orange() -> Self {
        Self::Rgb(210, 135, 10)
    }

    /// Table name or `#rrggbb`. `None` for anything else.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        sgr_code(s).map(Self::Sgr)
    }

    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        Some(Self::Rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }
}

impl From<&str> for AnsiCode {
    #[inline]
    fn from(s: &str) -> Self {
        // unknown names fall back to the preview default
        AnsiCode::from_name(s).unwrap_or_else(AnsiCode::industrial_orange)
    }
}

impl From<&String> for AnsiCode {
    #[inline]
    fn from(s: &String) -> Self {
        AnsiCode::from(s.as_str())
    }
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sgr(code) => write!(f, "\x1b[{code}m"),
            Self::Rgb(r, g, b) => write!(f, "\x1b[38;2;{r};{g};{b}m"),
        }
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}

/// Colour `text` by name. Unknown names return the text unchanged; with
/// `reset == false` the trailing reset sequence is omitted.
#[must_use]
pub fn colortext(text: &str, color: &str, reset: bool) -> String {
    match AnsiCode::from_name(color) {
        Some(code) if reset => colorize(&code, text),
        Some(code) => format!("{code}{text}"),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_wraps_with_reset() {
        assert_eq!(colortext("hi", "cyan", true), "\x1b[96mhi\x1b[0m");
        assert_eq!(colortext("hi", "bold", false), "\x1b[1mhi");
    }

    #[test]
    fn unknown_name_is_identity() {
        assert_eq!(colortext("hi", "mauve", true), "hi");
        assert_eq!(colortext("hi", "", true), "hi");
    }

    #[test]
    fn hex_is_true_colour() {
        assert_eq!(
            AnsiCode::from_name("#0a10ff"),
            Some(AnsiCode::Rgb(10, 16, 255))
        );
        assert_eq!(AnsiCode::from_name("#12"), None);
        assert_eq!(
            colortext("x", "#000000", true),
            "\x1b[38;2;0;0;0mx\x1b[0m"
        );
    }

    #[test]
    fn bgcyan_uses_the_bright_code() {
        assert_eq!(sgr_code("bgcyan"), Some(106));
        assert_eq!(sgr_code("grey40"), Some(2));
    }
}
