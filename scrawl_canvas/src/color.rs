// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed and floating-point color types.

/// A packed 32-bit ARGB color, 8 bits per component.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque red.
    pub const RED: Self = Self(0xFFFF_0000);
    /// Opaque green.
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFF00_00FF);

    /// Create a color from individual components.
    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Convert to peniko's color type.
    #[inline]
    pub fn to_peniko(self) -> peniko::Color {
        peniko::Color::from_rgba8(self.red(), self.green(), self.blue(), self.alpha())
    }

    /// Build from peniko's color type.
    #[inline]
    pub fn from_peniko(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self::from_argb(rgba.a, rgba.r, rgba.g, rgba.b)
    }
}

/// An unpacked RGBA color with f32 components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color4f {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color4f {
    /// Create a color from components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a packed color, clamping each component to `[0, 1]`.
    pub fn to_color(self) -> Color {
        #[inline]
        fn unit_to_u8(v: f32) -> u8 {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "value is clamped to [0, 255] before the cast"
            )]
            let b = (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
            b
        }
        Color::from_argb(
            unit_to_u8(self.a),
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
        )
    }
}

impl From<Color> for Color4f {
    fn from(c: Color) -> Self {
        let inv = 1.0 / 255.0;
        Self::new(
            f32::from(c.red()) * inv,
            f32::from(c.green()) * inv,
            f32::from(c.blue()) * inv,
            f32::from(c.alpha()) * inv,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_components() {
        let c = Color::from_argb(0x80, 0x11, 0x22, 0x33);
        assert_eq!(c.alpha(), 0x80, "alpha occupies the top byte");
        assert_eq!(c.red(), 0x11, "red component");
        assert_eq!(c.green(), 0x22, "green component");
        assert_eq!(c.blue(), 0x33, "blue component");
    }

    #[test]
    fn peniko_round_trip() {
        let c = Color::from_argb(0xFF, 0x10, 0x20, 0x30);
        assert_eq!(Color::from_peniko(c.to_peniko()), c, "peniko round trip");
    }

    #[test]
    fn unpacked_to_packed_clamps() {
        let c = Color4f::new(2.0, -1.0, 0.5, 1.0).to_color();
        assert_eq!(c.red(), 0xFF, "overflow clamps to 255");
        assert_eq!(c.green(), 0x00, "underflow clamps to 0");
        assert_eq!(c.alpha(), 0xFF, "alpha preserved");
    }
}
