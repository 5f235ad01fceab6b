//! Color handling for gridfig figures
//!
//! This module provides the [`Rgb`] type used by title bars, frames and
//! crop markers. Layout documents carry colors as `[r, g, b]` arrays of
//! 8-bit channel values, so the type (de)serializes as a three-element
//! array rather than a CSS string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit-per-channel RGB color.
///
/// # Examples
///
/// ```
/// use gridfig_core::color::Rgb;
///
/// let accent = Rgb::new(200, 80, 0);
/// assert_eq!(accent.to_string(), "rgb(200,80,0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a color from its three channel values.
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red channel.
    pub fn red(self) -> u8 {
        self.red
    }

    /// Returns the green channel.
    pub fn green(self) -> u8 {
        self.green
    }

    /// Returns the blue channel.
    pub fn blue(self) -> u8 {
        self.blue
    }

    /// Returns the channels as a `(r, g, b)` tuple.
    pub fn channels(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// White, the default background for title bars.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black, the default text color.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::black()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.red, color.green, color.blue]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}
