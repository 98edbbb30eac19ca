use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

/// Linear RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Used for bodies that have no orbit color of their own.
    pub const YELLOW: Rgba = Rgba::new(1.0, 0.92, 0.016, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha forced to fully opaque.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ScenarioError> {
        let invalid = || ScenarioError::InvalidColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(invalid());
        }

        let mut channels = [255u8; 4];
        for (i, slot) in channels.iter_mut().enumerate().take(digits.len() / 2) {
            *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }

        let [r, g, b, a] = channels.map(|c| c as f32 / 255.0);
        Ok(Self::new(r, g, b, a))
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if self.a < 1.0 {
            write!(f, "{:02x}", channel(self.a))?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = ScenarioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}
