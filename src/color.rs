//! The color type used by ring styles.
//!
//! Stores RGBA as 8-bit channels so styles can be declared as constants and
//! written to/read from configuration files as hex strings.

use std::fmt;
use std::str::FromStr;

use floem::peniko::Color;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::RingError;

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct RingColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl RingColor {
    /// Opaque color from 0–255 channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn r(&self) -> u8 {
        self.r
    }
    pub fn g(&self) -> u8 {
        self.g
    }
    pub fn b(&self) -> u8 {
        self.b
    }
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex are opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&stripped[range], 16).ok();
        match stripped.len() {
            3 => {
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Some(Self::rgb8(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Formats as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
impl fmt::Display for RingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for RingColor {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| RingError::InvalidColor(s.to_string()))
    }
}

impl From<RingColor> for Color {
    fn from(c: RingColor) -> Self {
        Color::rgba8(c.r, c.g, c.b, c.a)
    }
}
