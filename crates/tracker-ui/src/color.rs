//! Color values and theme constants
//!
//! Colors are stored with 8 bits per channel. Every operation that can push
//! a channel out of range clamps it back into `[0, 255]` before returning,
//! so a `Color` is always directly convertible to `Rgb888`.
//!
//! Fixed-point arguments use 16.16 format: `65536` is `1.0`.

use core::ops::AddAssign;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Fixed-point `1.0`.
pub const FIXED_ONE: i32 = 65536;

/// An RGB color with clamped byte channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Build from byte channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from arbitrary integers, clamping each channel.
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Multiply every channel by `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.scale_rgb(factor, factor, factor);
    }

    /// Multiply each channel by its own factor.
    pub fn scale_rgb(&mut self, fr: f32, fg: f32, fb: f32) {
        self.r = clamp_channel((self.r as f32 * fr) as i32);
        self.g = clamp_channel((self.g as f32 * fg) as i32);
        self.b = clamp_channel((self.b as f32 * fb) as i32);
    }

    /// Multiply every channel by a 16.16 fixed-point factor.
    pub fn scale_fixed(&mut self, factor: i32) {
        let f = factor as i64;
        self.r = clamp_channel(((self.r as i64 * f) >> 16) as i32);
        self.g = clamp_channel(((self.g as i64 * f) >> 16) as i32);
        self.b = clamp_channel(((self.b as i64 * f) >> 16) as i32);
    }

    /// Copy scaled by a 16.16 fixed-point factor.
    pub fn scaled_fixed(mut self, factor: i32) -> Self {
        self.scale_fixed(factor);
        self
    }

    /// Move toward `other` by a 16.16 fraction (`0` = self, `65536` = other).
    pub fn interpolate_fixed(&mut self, other: Color, fraction: i32) {
        let lerp = |a: u8, b: u8| -> u8 {
            let a = a as i64;
            let b = b as i64;
            clamp_channel((a + (((b - a) * fraction as i64) >> 16)) as i32)
        };
        self.r = lerp(self.r, other.r);
        self.g = lerp(self.g, other.g);
        self.b = lerp(self.b, other.b);
    }

    /// Copy interpolated toward `other`.
    pub fn interpolated_fixed(mut self, other: Color, fraction: i32) -> Self {
        self.interpolate_fixed(other, fraction);
        self
    }

    /// Lighter variant used for raised bevel edges.
    pub fn highlight(self) -> Self {
        self.scaled_fixed(FIXED_ONE * 3 / 2)
    }

    /// Darker variant used for sunken bevel edges and pressed states.
    pub fn shadow(self) -> Self {
        self.scaled_fixed(FIXED_ONE / 2)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r = clamp_channel(self.r as i32 + rhs.r as i32);
        self.g = clamp_channel(self.g as i32 + rhs.g as i32);
        self.b = clamp_channel(self.b as i32 + rhs.b as i32);
    }
}

impl From<Color> for Rgb888 {
    fn from(c: Color) -> Self {
        Rgb888::new(c.r, c.g, c.b)
    }
}

impl From<Rgb888> for Color {
    fn from(c: Rgb888) -> Self {
        Color::rgb(c.r(), c.g(), c.b())
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Scrollbar track.
pub const SCROLLBAR_TRACK: Color = Color::rgb(32, 48, 64);

/// Default face of buttons and thumbs.
pub const BUTTON_FACE: Color = Color::rgb(192, 192, 192);

/// Screen background.
pub const DESKTOP: Color = Color::rgb(24, 32, 48);

/// Dialog container surface.
pub const DIALOG_SURFACE: Color = Color::rgb(64, 96, 128);

/// Regular text.
pub const TEXT: Color = Color::rgb(255, 255, 255);

/// Text on a selected row.
pub const TEXT_SELECTED: Color = Color::rgb(255, 255, 128);

/// Selection highlight behind list rows.
pub const SELECTION: Color = Color::rgb(48, 64, 160);

/// Glyphs drawn on button faces (arrows, grips).
pub const GLYPH: Color = Color::rgb(1, 1, 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps() {
        assert_eq!(Color::new(-10, 300, 128), Color::rgb(0, 255, 128));
    }

    #[test]
    fn add_assign_clamps() {
        let mut c = Color::rgb(200, 10, 255);
        c += Color::rgb(100, 10, 1);
        assert_eq!(c, Color::rgb(255, 20, 255));
    }

    #[test]
    fn scale_clamps_both_ways() {
        let mut c = Color::rgb(100, 200, 50);
        c.scale(2.0);
        assert_eq!(c, Color::rgb(200, 255, 100));

        let mut c = Color::rgb(100, 200, 50);
        c.scale(-1.0);
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn scale_fixed_halves_and_saturates() {
        let mut c = Color::rgb(100, 200, 51);
        c.scale_fixed(FIXED_ONE / 2);
        assert_eq!(c, Color::rgb(50, 100, 25));

        let mut c = Color::rgb(100, 200, 51);
        c.scale_fixed(FIXED_ONE * 4);
        assert_eq!(c, Color::rgb(255, 255, 204));
    }

    #[test]
    fn interpolate_fixed_endpoints_and_midpoint() {
        let a = Color::rgb(0, 100, 200);
        let b = Color::rgb(100, 100, 0);
        assert_eq!(a.interpolated_fixed(b, 0), a);
        assert_eq!(a.interpolated_fixed(b, FIXED_ONE), b);
        assert_eq!(a.interpolated_fixed(b, FIXED_ONE / 2), Color::rgb(50, 100, 100));
        // Extrapolation past the target still clamps.
        assert_eq!(a.interpolated_fixed(b, FIXED_ONE * 3), Color::rgb(255, 100, 0));
    }

    #[test]
    fn converts_to_rgb888() {
        let c: Rgb888 = SCROLLBAR_TRACK.into();
        assert_eq!((c.r(), c.g(), c.b()), (32, 48, 64));
    }
}
