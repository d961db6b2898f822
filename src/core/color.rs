//! ANSI colour codes for chart series.  `Plain` renders as nothing, which is
//! what chart files get.

use std::{fmt, str};

use crate::core::error::ColorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiCode {
    Plain,
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

impl AnsiCode {
    pub const fn plain() -> Self {
        Self::Plain
    }
    pub const fn red() -> Self {
        Self::Static("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self::Static("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self::Static("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self::Static("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self::Static("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self::Static("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self::Static("\x1b[37m")
    }
    pub const fn gray() -> Self {
        Self::Static("\x1b[38;2;128;128;128m")
    }
    pub const fn light_blue() -> Self {
        Self::Static("\x1b[38;2;173;216;230m")
    }
    pub const fn purple() -> Self {
        Self::Static("\x1b[38;2;128;0;128m")
    }
    pub const fn orange() -> Self {
        Self::Static("\x1b[38;2;255;165;0m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    #[inline]
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            len: len as u8,
        }
    }

    /// Parse colour names or `#rrggbb`.  Falls back to hex parser on miss.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Self::plain()),
            "red" => Ok(Self::red()),
            "green" => Ok(Self::green()),
            "yellow" => Ok(Self::yellow()),
            "blue" => Ok(Self::blue()),
            "magenta" => Ok(Self::magenta()),
            "cyan" => Ok(Self::cyan()),
            "white" => Ok(Self::white()),
            "gray" | "grey" => Ok(Self::gray()),
            "lightblue" | "light-blue" => Ok(Self::light_blue()),
            "purple" => Ok(Self::purple()),
            "orange" => Ok(Self::orange()),
            _ => Self::from_hex(s),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 {
            return Err(ColorError::InvalidHexLength);
        }
        if !h.is_ascii() {
            return Err(ColorError::InvalidHexDigit);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "",
            Self::Static(s) => s,
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or(""),
        }
    }

    /// Drop to `Plain` unless `colored`.
    #[inline]
    #[must_use]
    pub fn when(self, colored: bool) -> Self {
        if colored { self } else { Self::Plain }
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence (no escapes at all for `Plain`).
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    if c.is_plain() {
        return text.to_owned();
    }
    format!("{c}{text}{}", AnsiCode::reset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn rgb_escape() {
        assert_eq!(AnsiCode::rgb(255, 0, 7).as_str(), "\x1b[38;2;255;0;7m");
    }

    #[rstest]
    #[case("red", AnsiCode::red())]
    #[case(" Grey ", AnsiCode::gray())]
    #[case("none", AnsiCode::plain())]
    #[case("#ffa500", AnsiCode::rgb(255, 165, 0))]
    fn names_and_hex(#[case] name: &str, #[case] want: AnsiCode) {
        assert_eq!(AnsiCode::from_name(name).unwrap(), want);
    }

    #[rstest]
    #[case("#12345")]
    #[case("mauve")]
    fn rejects_bad_hex_length(#[case] name: &str) {
        assert!(matches!(
            AnsiCode::from_name(name),
            Err(ColorError::InvalidHexLength)
        ));
    }

    #[test]
    fn rejects_bad_hex_digit() {
        assert!(matches!(
            AnsiCode::from_hex("#12345z"),
            Err(ColorError::InvalidHexDigit)
        ));
    }

    #[test]
    fn plain_adds_no_escapes() {
        assert_eq!(colorize(&AnsiCode::plain(), "π"), "π");
        assert_eq!(colorize(&AnsiCode::blue().when(false), "π"), "π");
        assert_eq!(colorize(&AnsiCode::blue(), "π"), "\x1b[34mπ\x1b[0m");
    }
}
