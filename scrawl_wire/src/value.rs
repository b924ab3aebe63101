// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-level encode/decode rules for every operand shape.
//!
//! This module is the single source of truth for how a logical value maps
//! to wire bytes. The correctness contract is exact symmetry: for every
//! implementation here, `read` consumes precisely the bytes `write`
//! produced for the same logical value. A forgotten or reordered field
//! breaks every later read in the stream, which is what the type-checked
//! channel exists to localize.
//!
//! Encoding rules, per the format:
//!
//! - fixed scalars and structs: constituent fields in declaration order,
//!   no length prefix;
//! - nullable values: one presence byte, then the payload if present;
//! - resource objects: their own canonical serialization as a
//!   length-prefixed blob;
//! - composite values (paint, font, round-rect, lattice, region):
//!   field-by-field;
//! - arrays: one presence byte, a u32 element count, then the elements;
//!   primitive element types ride the channel's bulk path, and enum
//!   arrays are raw one-byte runs validated on decode.

use alloc::vec::Vec;

use scrawl_canvas::{
    BlendMode, ClipOp, Color, Color4f, ColorFilter, ColorSpace, Data, Drawable, FilterQuality,
    Font, FontEdging, FontHinting, IRect, Image, ImageFilter, Lattice, LatticeRectType,
    MaskFilter, Matrix, Paint, PaintStyle, Path, PathEffect, Picture, Point, PointMode, Rect,
    Region, RoundRect, RsTransform, SaveLayerFlags, Shader, StrokeCap, StrokeJoin, TextBlob,
    Typeface, Vertices,
};

use crate::channel::{WireRead, WireWrite};
use crate::error::WireError;

/// A value with an exact binary encode/decode on a wire channel.
pub trait Wire: Sized {
    /// Append this value's encoding to the channel.
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError>;
    /// Decode one value, consuming exactly the bytes `write` produced.
    fn read(r: &mut impl WireRead) -> Result<Self, WireError>;
}

/// A closed single-byte enum.
///
/// The wire format stores enums as one raw byte and enum arrays as raw
/// byte runs, so every enum in the schema must fit in a byte; `from_raw`
/// validates this on decode instead of assuming it.
pub trait WireEnum: Copy {
    /// Name used in decode errors.
    const NAME: &'static str;
    /// The enum's wire byte.
    fn to_raw(self) -> u8;
    /// Checked decode of a wire byte.
    fn from_raw(raw: u8) -> Option<Self>;
}

macro_rules! wire_enum {
    ($ty:ty, $name:literal) => {
        impl WireEnum for $ty {
            const NAME: &'static str = $name;

            #[inline]
            fn to_raw(self) -> u8 {
                self as u8
            }

            #[inline]
            fn from_raw(raw: u8) -> Option<Self> {
                <$ty>::from_raw(raw)
            }
        }

        impl Wire for $ty {
            fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
                w.write_u8(WireEnum::to_raw(*self));
                Ok(())
            }

            fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
                let raw = r.read_u8()?;
                <Self as WireEnum>::from_raw(raw).ok_or(WireError::InvalidEnum {
                    name: <Self as WireEnum>::NAME,
                    raw,
                })
            }
        }
    };
}

wire_enum!(PaintStyle, "paint style");
wire_enum!(StrokeCap, "stroke cap");
wire_enum!(StrokeJoin, "stroke join");
wire_enum!(BlendMode, "blend mode");
wire_enum!(FilterQuality, "filter quality");
wire_enum!(FontHinting, "font hinting");
wire_enum!(FontEdging, "font edging");
wire_enum!(ClipOp, "clip op");
wire_enum!(PointMode, "point mode");
wire_enum!(LatticeRectType, "lattice rect type");

impl Wire for bool {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_bool(*self);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        r.read_bool()
    }
}

impl Wire for i32 {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_i32(*self);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        r.read_i32()
    }
}

impl Wire for u32 {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_u32(*self);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        r.read_u32()
    }
}

impl Wire for f32 {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_f32(*self);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        r.read_f32()
    }
}

impl Wire for alloc::string::String {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_str(self)
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        r.read_str()
    }
}

impl<T: Wire> Wire for Option<T> {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        match self {
            None => {
                w.write_bool(false);
                Ok(())
            }
            Some(v) => {
                w.write_bool(true);
                v.write(w)
            }
        }
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        if r.read_bool()? {
            Ok(Some(T::read(r)?))
        } else {
            Ok(None)
        }
    }
}

impl Wire for Point {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_f32(self.x);
        w.write_f32(self.y);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            x: r.read_f32()?,
            y: r.read_f32()?,
        })
    }
}

impl Wire for Rect {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_f32(self.left);
        w.write_f32(self.top);
        w.write_f32(self.right);
        w.write_f32(self.bottom);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            left: r.read_f32()?,
            top: r.read_f32()?,
            right: r.read_f32()?,
            bottom: r.read_f32()?,
        })
    }
}

impl Wire for IRect {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_i32(self.left);
        w.write_i32(self.top);
        w.write_i32(self.right);
        w.write_i32(self.bottom);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            left: r.read_i32()?,
            top: r.read_i32()?,
            right: r.read_i32()?,
            bottom: r.read_i32()?,
        })
    }
}

impl Wire for Matrix {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        for c in self.m {
            w.write_f32(c);
        }
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        let mut m = [0.0_f32; 9];
        for c in &mut m {
            *c = r.read_f32()?;
        }
        Ok(Self { m })
    }
}

impl Wire for RsTransform {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_f32(self.scos);
        w.write_f32(self.ssin);
        w.write_f32(self.tx);
        w.write_f32(self.ty);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            scos: r.read_f32()?,
            ssin: r.read_f32()?,
            tx: r.read_f32()?,
            ty: r.read_f32()?,
        })
    }
}

impl Wire for Color {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_u32(self.0);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self(r.read_u32()?))
    }
}

impl Wire for Color4f {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_f32(self.r);
        w.write_f32(self.g);
        w.write_f32(self.b);
        w.write_f32(self.a);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            r: r.read_f32()?,
            g: r.read_f32()?,
            b: r.read_f32()?,
            a: r.read_f32()?,
        })
    }
}

impl Wire for SaveLayerFlags {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        w.write_u32(self.bits());
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Self::from_bits(r.read_u32()?).ok_or(WireError::Malformed {
            what: "save-layer flags",
        })
    }
}

macro_rules! wire_object {
    ($ty:ty, $kind:literal) => {
        impl Wire for $ty {
            fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
                w.write_bytes(self.canonical_bytes().as_ref())
            }

            fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
                let blob = r.read_bytes()?;
                <$ty>::from_canonical(&blob).ok_or(WireError::BadObject { kind: $kind })
            }
        }
    };
}

wire_object!(Typeface, "typeface");
wire_object!(Shader, "shader");
wire_object!(ColorFilter, "color filter");
wire_object!(ImageFilter, "image filter");
wire_object!(MaskFilter, "mask filter");
wire_object!(PathEffect, "path effect");
wire_object!(ColorSpace, "color space");
wire_object!(TextBlob, "text blob");
wire_object!(Vertices, "vertices");
wire_object!(Drawable, "drawable");
wire_object!(Data, "data");
wire_object!(Path, "path");
wire_object!(Image, "image");
wire_object!(Picture, "picture");

impl Wire for Font {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        self.typeface.write(w)?;
        w.write_f32(self.size);
        w.write_f32(self.scale_x);
        w.write_f32(self.skew_x);
        self.hinting.write(w)?;
        self.edging.write(w)?;
        w.write_bool(self.embolden);
        w.write_bool(self.subpixel);
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            typeface: Option::read(r)?,
            size: r.read_f32()?,
            scale_x: r.read_f32()?,
            skew_x: r.read_f32()?,
            hinting: FontHinting::read(r)?,
            edging: FontEdging::read(r)?,
            embolden: r.read_bool()?,
            subpixel: r.read_bool()?,
        })
    }
}

impl Wire for Paint {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        self.font.write(w)?;
        w.write_bool(self.anti_alias);
        w.write_bool(self.dither);
        self.style.write(w)?;
        self.color.write(w)?;
        self.color_space.write(w)?;
        w.write_f32(self.stroke_width);
        w.write_f32(self.stroke_miter);
        self.stroke_cap.write(w)?;
        self.stroke_join.write(w)?;
        self.blend_mode.write(w)?;
        self.filter_quality.write(w)?;
        self.shader.write(w)?;
        self.color_filter.write(w)?;
        self.image_filter.write(w)?;
        self.mask_filter.write(w)?;
        self.path_effect.write(w)?;
        Ok(())
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        Ok(Self {
            font: Font::read(r)?,
            anti_alias: r.read_bool()?,
            dither: r.read_bool()?,
            style: PaintStyle::read(r)?,
            color: Color::read(r)?,
            color_space: Option::read(r)?,
            stroke_width: r.read_f32()?,
            stroke_miter: r.read_f32()?,
            stroke_cap: StrokeCap::read(r)?,
            stroke_join: StrokeJoin::read(r)?,
            blend_mode: BlendMode::read(r)?,
            filter_quality: FilterQuality::read(r)?,
            shader: Option::read(r)?,
            color_filter: Option::read(r)?,
            image_filter: Option::read(r)?,
            mask_filter: Option::read(r)?,
            path_effect: Option::read(r)?,
        })
    }
}

impl Wire for RoundRect {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        self.rect.write(w)?;
        write_point_array(w, Some(&self.radii))
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        let rect = Rect::read(r)?;
        let radii = read_point_array(r)?.ok_or(WireError::Malformed {
            what: "round-rect radii",
        })?;
        let radii: [Point; 4] = radii.try_into().map_err(|_| WireError::Malformed {
            what: "round-rect radii",
        })?;
        Ok(Self { rect, radii })
    }
}

impl Wire for Region {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        write_array(w, Some(self.spans()))
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        let spans: Vec<IRect> = read_array(r)?.ok_or(WireError::Malformed {
            what: "region spans",
        })?;
        Ok(Self::new(spans.as_slice()))
    }
}

impl Wire for Lattice {
    fn write(&self, w: &mut impl WireWrite) -> Result<(), WireError> {
        self.bounds.write(w)?;
        write_color_array(w, Some(&self.colors))?;
        write_i32_array(w, Some(&self.x_divs))?;
        write_i32_array(w, Some(&self.y_divs))?;
        write_enum_array(w, Some(&self.rect_types))
    }

    fn read(r: &mut impl WireRead) -> Result<Self, WireError> {
        let bounds = Option::read(r)?;
        let colors = read_color_array(r)?.ok_or(WireError::Malformed {
            what: "lattice colors",
        })?;
        let x_divs = read_i32_array(r)?.ok_or(WireError::Malformed {
            what: "lattice x divisions",
        })?;
        let y_divs = read_i32_array(r)?.ok_or(WireError::Malformed {
            what: "lattice y divisions",
        })?;
        let rect_types: Vec<LatticeRectType> =
            read_enum_array(r)?.ok_or(WireError::Malformed {
                what: "lattice rect types",
            })?;
        Ok(Self {
            bounds,
            colors: colors.into(),
            x_divs: x_divs.into(),
            y_divs: y_divs.into(),
            rect_types: rect_types.into(),
        })
    }
}

fn array_len(len: usize) -> Result<u32, WireError> {
    u32::try_from(len).map_err(|_| WireError::Oversize { len })
}

fn checked_count(r: &mut impl WireRead, unit: usize) -> Result<usize, WireError> {
    let count = r.read_u32()? as usize;
    // An adversarial count cannot be larger than the bytes backing it.
    if count.saturating_mul(unit.max(1)) > r.remaining() {
        return Err(WireError::UnexpectedEof {
            needed: count * unit.max(1),
            remaining: r.remaining(),
        });
    }
    Ok(count)
}

/// Write a nullable array of `Wire` elements, element by element.
pub fn write_array<T: Wire>(
    w: &mut impl WireWrite,
    v: Option<&[T]>,
) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    for e in v {
        e.write(w)?;
    }
    Ok(())
}

/// Read a nullable array of `Wire` elements.
pub fn read_array<T: Wire>(r: &mut impl WireRead) -> Result<Option<Vec<T>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 1)?;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(T::read(r)?);
    }
    Ok(Some(out))
}

/// Write a nullable `i32` array over the channel's bulk path.
pub fn write_i32_array(w: &mut impl WireWrite, v: Option<&[i32]>) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    w.write_i32_slice(v);
    Ok(())
}

/// Read a nullable `i32` array.
pub fn read_i32_array(r: &mut impl WireRead) -> Result<Option<Vec<i32>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 4)?;
    Ok(Some(r.read_i32_slice(count)?))
}

/// Write a nullable packed-color array as a bulk `u32` run.
pub fn write_color_array(w: &mut impl WireWrite, v: Option<&[Color]>) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    let raw: Vec<u32> = v.iter().map(|c| c.0).collect();
    w.write_u32_slice(&raw);
    Ok(())
}

/// Read a nullable packed-color array.
pub fn read_color_array(r: &mut impl WireRead) -> Result<Option<Vec<Color>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 4)?;
    let raw = r.read_u32_slice(count)?;
    Ok(Some(raw.into_iter().map(Color).collect()))
}

/// Write a nullable point array as a flattened bulk `f32` run.
pub fn write_point_array(w: &mut impl WireWrite, v: Option<&[Point]>) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    let flat: Vec<f32> = v.iter().flat_map(|p| [p.x, p.y]).collect();
    w.write_f32_slice(&flat);
    Ok(())
}

/// Read a nullable point array.
pub fn read_point_array(r: &mut impl WireRead) -> Result<Option<Vec<Point>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 8)?;
    let flat = r.read_f32_slice(count * 2)?;
    Ok(Some(
        flat.chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect(),
    ))
}

/// Write a nullable rect array as a flattened bulk `f32` run.
pub fn write_rect_array(w: &mut impl WireWrite, v: Option<&[Rect]>) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    let flat: Vec<f32> = v
        .iter()
        .flat_map(|r| [r.left, r.top, r.right, r.bottom])
        .collect();
    w.write_f32_slice(&flat);
    Ok(())
}

/// Read a nullable rect array.
pub fn read_rect_array(r: &mut impl WireRead) -> Result<Option<Vec<Rect>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 16)?;
    let flat = r.read_f32_slice(count * 4)?;
    Ok(Some(
        flat.chunks_exact(4)
            .map(|c| Rect::new(c[0], c[1], c[2], c[3]))
            .collect(),
    ))
}

/// Write a nullable sprite-transform array as a flattened bulk `f32` run.
pub fn write_rs_transform_array(
    w: &mut impl WireWrite,
    v: Option<&[RsTransform]>,
) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    let flat: Vec<f32> = v
        .iter()
        .flat_map(|t| [t.scos, t.ssin, t.tx, t.ty])
        .collect();
    w.write_f32_slice(&flat);
    Ok(())
}

/// Read a nullable sprite-transform array.
pub fn read_rs_transform_array(
    r: &mut impl WireRead,
) -> Result<Option<Vec<RsTransform>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 16)?;
    let flat = r.read_f32_slice(count * 4)?;
    Ok(Some(
        flat.chunks_exact(4)
            .map(|c| RsTransform::new(c[0], c[1], c[2], c[3]))
            .collect(),
    ))
}

/// Write a nullable enum array as a raw one-byte run.
///
/// This is the raw-byte reinterpretation the format calls for; it is only
/// sound because [`WireEnum`] guarantees a single-byte representation.
pub fn write_enum_array<E: WireEnum>(
    w: &mut impl WireWrite,
    v: Option<&[E]>,
) -> Result<(), WireError> {
    let Some(v) = v else {
        w.write_bool(false);
        return Ok(());
    };
    w.write_bool(true);
    w.write_u32(array_len(v.len())?);
    let raw: Vec<u8> = v.iter().map(|e| e.to_raw()).collect();
    w.write_u8_slice(&raw);
    Ok(())
}

/// Read a nullable enum array, validating every byte.
pub fn read_enum_array<E: WireEnum>(
    r: &mut impl WireRead,
) -> Result<Option<Vec<E>>, WireError> {
    if !r.read_bool()? {
        return Ok(None);
    }
    let count = checked_count(r, 1)?;
    let raw = r.read_u8_slice(count)?;
    let mut out = Vec::with_capacity(count);
    for b in raw {
        out.push(E::from_raw(b).ok_or(WireError::InvalidEnum {
            name: E::NAME,
            raw: b,
        })?);
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checked::{CheckedReader, CheckedWriter};
    use crate::raw::{RawReader, RawWriter};
    use alloc::vec;

    fn round_trip_raw<T: Wire + PartialEq + core::fmt::Debug>(value: &T) {
        let mut w = RawWriter::new();
        value.write(&mut w).expect("encode");
        let bytes = w.into_bytes();
        let mut r = RawReader::new(&bytes);
        let back = T::read(&mut r).expect("decode");
        assert_eq!(&back, value, "raw round trip");
        assert!(r.is_empty(), "decode consumed exactly the encoded bytes");
    }

    fn round_trip_checked<T: Wire + PartialEq + core::fmt::Debug>(value: &T) {
        let mut w = CheckedWriter::new();
        value.write(&mut w).expect("encode");
        let bytes = w.into_bytes();
        let mut r = CheckedReader::new(&bytes);
        let back = T::read(&mut r).expect("decode");
        assert_eq!(&back, value, "checked round trip");
        assert!(r.is_empty(), "decode consumed exactly the encoded bytes");
    }

    fn round_trip<T: Wire + PartialEq + core::fmt::Debug>(value: &T) {
        round_trip_raw(value);
        round_trip_checked(value);
    }

    #[test]
    fn scalars_and_structs() {
        round_trip(&true);
        round_trip(&-12_i32);
        round_trip(&0xDEAD_BEEF_u32);
        round_trip(&3.25_f32);
        round_trip(&Point::new(1.0, -2.0));
        round_trip(&Rect::new(0.0, 0.0, 10.0, 10.0));
        round_trip(&IRect::new(-1, -2, 3, 4));
        round_trip(&Matrix::from_translate(3.0, 4.0));
        round_trip(&RsTransform::new(1.0, 0.0, 5.0, 6.0));
        round_trip(&Color::RED);
        round_trip(&Color4f::new(0.1, 0.2, 0.3, 1.0));
        round_trip(&SaveLayerFlags::INIT_WITH_PREVIOUS);
    }

    #[test]
    fn nullable_values() {
        round_trip(&Option::<Paint>::None);
        round_trip(&Some(Paint::with_color(Color::GREEN)));
        round_trip(&Option::<Matrix>::None);
        round_trip(&Some(Matrix::IDENTITY));
    }

    #[test]
    fn default_paint_round_trips() {
        round_trip(&Paint::default());
    }

    #[test]
    fn paint_with_effects_round_trips() {
        let paint = Paint {
            anti_alias: true,
            stroke_width: 2.5,
            style: PaintStyle::Stroke,
            blend_mode: BlendMode::Multiply,
            shader: Some(Shader::new([1_u8, 2, 3].as_slice())),
            mask_filter: Some(MaskFilter::new([9_u8].as_slice())),
            color_space: Some(ColorSpace::new([7_u8, 7].as_slice())),
            font: Font {
                typeface: Some(Typeface::new([4_u8, 5].as_slice())),
                size: 24.0,
                ..Font::default()
            },
            ..Paint::default()
        };
        round_trip(&paint);
    }

    #[test]
    fn objects_round_trip() {
        round_trip(&Path::rect(Rect::new(1.0, 2.0, 3.0, 4.0)));
        round_trip(&Image::new(2, 1, [0_u8; 8].as_slice()));
        round_trip(&Vertices::new([1_u8, 2, 3, 4].as_slice()));
        round_trip(&Picture::new([0xAB_u8, 0xCD].as_slice()));
        round_trip(&Data::new(b"annotation".as_slice()));
        round_trip(&Region::from_rect(IRect::new(0, 0, 4, 4)));
        round_trip(&RoundRect::from_rect_xy(
            Rect::new(0.0, 0.0, 8.0, 8.0),
            2.0,
            3.0,
        ));
    }

    #[test]
    fn lattice_round_trips() {
        let lattice = Lattice {
            bounds: Some(IRect::new(0, 0, 9, 9)),
            colors: vec![Color::RED, Color::BLUE].into(),
            x_divs: vec![3, 6].into(),
            y_divs: vec![3].into(),
            rect_types: vec![
                LatticeRectType::Default,
                LatticeRectType::Transparent,
                LatticeRectType::FixedColor,
            ]
            .into(),
        };
        round_trip(&lattice);

        let no_bounds = Lattice::default();
        round_trip(&no_bounds);
    }

    #[test]
    fn arrays_cover_null_empty_and_large() {
        let mut w = RawWriter::new();
        write_point_array(&mut w, None).expect("encode");
        write_point_array(&mut w, Some(&[])).expect("encode");
        let big: Vec<Point> = (0..1000).map(|i| Point::new(i as f32, 0.0)).collect();
        write_point_array(&mut w, Some(&big)).expect("encode");
        let bytes = w.into_bytes();

        let mut r = RawReader::new(&bytes);
        assert_eq!(read_point_array(&mut r).expect("null"), None, "null array");
        assert_eq!(
            read_point_array(&mut r).expect("empty"),
            Some(Vec::new()),
            "empty array"
        );
        assert_eq!(
            read_point_array(&mut r).expect("large"),
            Some(big),
            "large array"
        );
        assert!(r.is_empty(), "exact consumption");
    }

    #[test]
    fn enum_array_validates_each_byte() {
        let mut w = RawWriter::new();
        write_enum_array(&mut w, Some(&[LatticeRectType::Default])).expect("encode");
        let mut bytes = w.into_bytes();
        *bytes.last_mut().expect("payload byte") = 0x77;

        let mut r = RawReader::new(&bytes);
        assert_eq!(
            read_enum_array::<LatticeRectType>(&mut r),
            Err(WireError::InvalidEnum {
                name: "lattice rect type",
                raw: 0x77,
            }),
            "an out-of-range enum byte is a malformed stream"
        );
    }

    #[test]
    fn adversarial_array_count_is_bounded() {
        let mut w = RawWriter::new();
        write_i32_array(&mut w, Some(&[1, 2, 3])).expect("encode");
        let mut bytes = w.into_bytes();
        // Presence byte, then the u32 count. Claim far more elements than
        // the stream holds.
        bytes[1] = 0xFF;
        bytes[2] = 0xFF;

        let mut r = RawReader::new(&bytes);
        assert!(
            matches!(
                read_i32_array(&mut r),
                Err(WireError::UnexpectedEof { .. })
            ),
            "an oversized count must fail before allocating or reading past the end"
        );
    }

    #[test]
    fn corrupted_checked_array_length_fails_closed() {
        let mut w = CheckedWriter::new();
        write_i32_array(&mut w, Some(&[1, 2, 3])).expect("encode");
        let mut bytes = w.into_bytes();
        // Checked layout: presence (tag+1), count (tag+4), then the bulk
        // header's recorded length. Corrupt the recorded length to 4.
        let bulk_len_offset = 2 + 5 + 1 + 4;
        bytes[bulk_len_offset] = 4;

        let mut r = CheckedReader::new(&bytes);
        assert_eq!(
            read_i32_array(&mut r),
            Err(WireError::LengthMismatch {
                expected: 3,
                found: 4,
            }),
            "the recorded bulk length must match the count-driven read"
        );
    }
}
