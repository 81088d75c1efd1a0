// src/color.rs — Hex/RGB/HSL conversions for resolved colors

use serde::Serialize;
use std::fmt;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees [0, 360), saturation and lightness in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Whether dark or light foreground text reads better on a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Dark,
    Light,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional). Returns `None` otherwise.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgb(r, g, b)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        let h = sector / 6.0;

        Hsl {
            h: h * 360.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// Perceived brightness in [0, 1] using Rec. 601 weights.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    pub fn mode(self) -> ColorMode {
        if self.luminance() > 0.5 {
            ColorMode::Light
        } else {
            ColorMode::Dark
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;
        let a = s * l.min(1.0 - l);
        let channel = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let c = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (255.0 * c).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(0.0), channel(8.0), channel(4.0))
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// CSS `hsl(h, s%, l%)` with components rounded to integers.
    pub fn to_css(self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.h.round() as i64,
            self.s.round() as i64,
            self.l.round() as i64
        )
    }
}

/// Every representation the UI shows for one color.
#[derive(Debug, Clone, Serialize)]
pub struct ColorInfo {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
    pub mode: ColorMode,
}

impl ColorInfo {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb = Rgb::from_hex(hex)?;
        Some(Self {
            hex: rgb.to_hex(),
            rgb: rgb.to_css(),
            hsl: rgb.to_hsl().to_css(),
            mode: rgb.mode(),
        })
    }
}
