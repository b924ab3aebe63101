// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint, font, and the paint-related single-byte enums.
//!
//! Every enum here is `#[repr(u8)]` and closed: the wire format stores
//! enums as one raw byte (and enum arrays as raw byte runs), so a value
//! outside an enum's range is a malformed stream, not a default. `from_raw`
//! is the checked decode path for that byte.

use crate::color::Color;
use crate::object::{ColorFilter, ColorSpace, ImageFilter, MaskFilter, PathEffect, Shader, Typeface};

/// Whether geometry is filled, stroked, or both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PaintStyle {
    /// Fill the geometry.
    #[default]
    Fill = 0,
    /// Stroke the geometry's boundary.
    Stroke = 1,
    /// Fill and stroke.
    StrokeAndFill = 2,
}

impl PaintStyle {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Fill),
            1 => Some(Self::Stroke),
            2 => Some(Self::StrokeAndFill),
            _ => None,
        }
    }
}

/// Geometry drawn at the ends of open stroked contours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum StrokeCap {
    /// No extension beyond the endpoint.
    #[default]
    Butt = 0,
    /// Semicircular extension.
    Round = 1,
    /// Half-square extension.
    Square = 2,
}

impl StrokeCap {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Butt),
            1 => Some(Self::Round),
            2 => Some(Self::Square),
            _ => None,
        }
    }
}

/// Geometry drawn at stroked corners.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum StrokeJoin {
    /// Extend the outer edges to meet, subject to the miter limit.
    #[default]
    Miter = 0,
    /// Round the corner.
    Round = 1,
    /// Connect the outer edges with a line.
    Bevel = 2,
}

impl StrokeJoin {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Miter),
            1 => Some(Self::Round),
            2 => Some(Self::Bevel),
            _ => None,
        }
    }
}

/// Porter-Duff and advanced blend modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
#[expect(missing_docs, reason = "variants follow the standard compositing names")]
pub enum BlendMode {
    Clear = 0,
    Src = 1,
    Dst = 2,
    #[default]
    SrcOver = 3,
    DstOver = 4,
    SrcIn = 5,
    DstIn = 6,
    SrcOut = 7,
    DstOut = 8,
    SrcATop = 9,
    DstATop = 10,
    Xor = 11,
    Plus = 12,
    Modulate = 13,
    Screen = 14,
    Overlay = 15,
    Darken = 16,
    Lighten = 17,
    ColorDodge = 18,
    ColorBurn = 19,
    HardLight = 20,
    SoftLight = 21,
    Difference = 22,
    Exclusion = 23,
    Multiply = 24,
    Hue = 25,
    Saturation = 26,
    Color = 27,
    Luminosity = 28,
}

impl BlendMode {
    /// Every mode, indexed by its wire byte.
    const ALL: [Self; 29] = [
        Self::Clear,
        Self::Src,
        Self::Dst,
        Self::SrcOver,
        Self::DstOver,
        Self::SrcIn,
        Self::DstIn,
        Self::SrcOut,
        Self::DstOut,
        Self::SrcATop,
        Self::DstATop,
        Self::Xor,
        Self::Plus,
        Self::Modulate,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Multiply,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Decode from the single-byte wire representation.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }
}

/// Sampling quality for image draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FilterQuality {
    /// Nearest neighbor.
    #[default]
    None = 0,
    /// Bilinear filtering.
    Low = 1,
    /// Bilinear with mipmaps.
    Medium = 2,
    /// Bicubic filtering.
    High = 3,
}

impl FilterQuality {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

/// Glyph outline hinting level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FontHinting {
    /// No hinting.
    None = 0,
    /// Minimal hinting.
    Slight = 1,
    /// The platform default.
    #[default]
    Normal = 2,
    /// Maximum hinting.
    Full = 3,
}

impl FontHinting {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Slight),
            2 => Some(Self::Normal),
            3 => Some(Self::Full),
            _ => None,
        }
    }
}

/// Glyph edge rendering mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FontEdging {
    /// Hard-edged, unfiltered glyphs.
    Alias = 0,
    /// Antialiased glyph edges.
    #[default]
    AntiAlias = 1,
    /// Subpixel-positioned antialiased glyphs.
    SubpixelAntiAlias = 2,
}

impl FontEdging {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Alias),
            1 => Some(Self::AntiAlias),
            2 => Some(Self::SubpixelAntiAlias),
            _ => None,
        }
    }
}

/// Text-facing state carried inside a [`Paint`].
///
/// Serialized field-by-field in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Typeface, or `None` for the platform default.
    pub typeface: Option<Typeface>,
    /// Text size in points.
    pub size: f32,
    /// Horizontal glyph scale.
    pub scale_x: f32,
    /// Horizontal glyph skew.
    pub skew_x: f32,
    /// Hinting level.
    pub hinting: FontHinting,
    /// Edge rendering mode.
    pub edging: FontEdging,
    /// Synthetic bold.
    pub embolden: bool,
    /// Subpixel glyph positioning.
    pub subpixel: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            typeface: None,
            size: 12.0,
            scale_x: 1.0,
            skew_x: 0.0,
            hinting: FontHinting::default(),
            edging: FontEdging::default(),
            embolden: false,
            subpixel: false,
        }
    }
}

/// Full drawing state applied to a draw operation.
///
/// Serialized field-by-field in declaration order: the font first, then
/// scalars and enums, then the nullable effect objects. Reordering or
/// omitting a field is a wire-format change; the type-checked channel
/// exists to catch exactly that class of mistake.
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    /// Text-facing state.
    pub font: Font,
    /// Antialiased geometry edges.
    pub anti_alias: bool,
    /// Dithered color quantization.
    pub dither: bool,
    /// Fill, stroke, or both.
    pub style: PaintStyle,
    /// The paint's packed color.
    pub color: Color,
    /// Color space the color is expressed in, or `None` for sRGB.
    pub color_space: Option<ColorSpace>,
    /// Stroke width; zero means hairline.
    pub stroke_width: f32,
    /// Miter limit for [`StrokeJoin::Miter`].
    pub stroke_miter: f32,
    /// Stroke endpoint geometry.
    pub stroke_cap: StrokeCap,
    /// Stroke corner geometry.
    pub stroke_join: StrokeJoin,
    /// Compositing mode.
    pub blend_mode: BlendMode,
    /// Image sampling quality.
    pub filter_quality: FilterQuality,
    /// Source of color per pixel, overriding `color` when set.
    pub shader: Option<Shader>,
    /// Transformation applied to the output color.
    pub color_filter: Option<ColorFilter>,
    /// Filter applied to the drawn content as an image.
    pub image_filter: Option<ImageFilter>,
    /// Modification of the coverage mask.
    pub mask_filter: Option<MaskFilter>,
    /// Modification of the geometry before drawing (dashing and friends).
    pub path_effect: Option<PathEffect>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            font: Font::default(),
            anti_alias: false,
            dither: false,
            style: PaintStyle::default(),
            color: Color::BLACK,
            color_space: None,
            stroke_width: 0.0,
            stroke_miter: 4.0,
            stroke_cap: StrokeCap::default(),
            stroke_join: StrokeJoin::default(),
            blend_mode: BlendMode::default(),
            filter_quality: FilterQuality::default(),
            shader: None,
            color_filter: None,
            image_filter: None,
            mask_filter: None,
            path_effect: None,
        }
    }
}

impl Paint {
    /// A default-state paint with the given color.
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_mode_raw_is_dense() {
        for raw in 0..=28_u8 {
            let mode = BlendMode::from_raw(raw).expect("in-range blend byte");
            assert_eq!(mode as u8, raw, "wire byte maps back to itself");
        }
        assert!(BlendMode::from_raw(29).is_none(), "out of range rejected");
    }

    #[test]
    fn enums_reject_out_of_range() {
        assert!(PaintStyle::from_raw(3).is_none(), "paint style range");
        assert!(StrokeCap::from_raw(3).is_none(), "stroke cap range");
        assert!(StrokeJoin::from_raw(3).is_none(), "stroke join range");
        assert!(FilterQuality::from_raw(4).is_none(), "filter quality range");
        assert!(FontHinting::from_raw(4).is_none(), "hinting range");
        assert!(FontEdging::from_raw(3).is_none(), "edging range");
    }
}
