// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-old-data geometry used by the canvas contract and the wire format.
//!
//! Every struct here is `Copy`, field-ordered, and free of hidden state, so
//! the wire codec can write constituent fields in declaration order with no
//! length prefix. Conversions to kurbo types are provided for callers that
//! want to do real geometry on them.

use kurbo::Affine;

/// A point in f32 coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to kurbo's point type.
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// An axis-aligned rectangle in f32 coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from edge coordinates.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Width of the rectangle.
    #[inline]
    pub const fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    #[inline]
    pub const fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Intersect with another rectangle; `None` when they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(Self::new(left, top, right, bottom))
        } else {
            None
        }
    }

    /// Convert to kurbo's rectangle type.
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// An axis-aligned rectangle in integer device coordinates.
///
/// Used for region spans, lattice bounds, and device clip queries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl IRect {
    /// Create a rectangle from edge coordinates.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns `true` if the rectangle encloses no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Intersect with another rectangle; empty results collapse to `None`.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() { None } else { Some(r) }
    }
}

/// A row-major 3×3 transform matrix.
///
/// Coefficient order is `[scale_x, skew_x, trans_x, skew_y, scale_y,
/// trans_y, persp_0, persp_1, persp_2]`, matching the order the wire codec
/// writes them in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    /// Row-major coefficients.
    pub m: [f32; 9],
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// A pure translation.
    #[inline]
    pub const fn from_translate(dx: f32, dy: f32) -> Self {
        Self {
            m: [1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0],
        }
    }

    /// A pure (possibly non-uniform) scale.
    #[inline]
    pub const fn from_scale(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// A rotation about the origin, in radians.
    #[inline]
    pub fn from_rotate(radians: f32) -> Self {
        Self::from_kurbo(Affine::rotate(f64::from(radians)))
    }

    /// A skew along the X and Y axes.
    #[inline]
    pub fn from_skew(kx: f32, ky: f32) -> Self {
        Self::from_kurbo(Affine::skew(f64::from(kx), f64::from(ky)))
    }

    /// Returns `self × other` (apply `other`, then `self`).
    pub fn concat(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut m = [0.0_f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self { m }
    }

    /// Returns `true` if the perspective row is trivial.
    #[inline]
    pub fn is_affine(&self) -> bool {
        self.m[6] == 0.0 && self.m[7] == 0.0 && self.m[8] == 1.0
    }

    /// Convert to a kurbo affine, or `None` when the matrix has a
    /// non-trivial perspective row.
    pub fn to_kurbo(self) -> Option<Affine> {
        if !self.is_affine() {
            return None;
        }
        let m = self.m;
        Some(Affine::new([
            f64::from(m[0]),
            f64::from(m[3]),
            f64::from(m[1]),
            f64::from(m[4]),
            f64::from(m[2]),
            f64::from(m[5]),
        ]))
    }

    /// Build from a kurbo affine.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "f64 to f32 narrowing is inherent to the f32 matrix format"
    )]
    pub fn from_kurbo(affine: Affine) -> Self {
        let c = affine.as_coeffs();
        Self {
            m: [
                c[0] as f32,
                c[2] as f32,
                c[4] as f32,
                c[1] as f32,
                c[3] as f32,
                c[5] as f32,
                0.0,
                0.0,
                1.0,
            ],
        }
    }
}

impl Default for Matrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A compressed rotate/scale/translate sprite transform used by atlas draws.
///
/// Maps a sprite-local point `(x, y)` to
/// `(scos·x − ssin·y + tx, ssin·x + scos·y + ty)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RsTransform {
    /// Scaled cosine component.
    pub scos: f32,
    /// Scaled sine component.
    pub ssin: f32,
    /// X translation.
    pub tx: f32,
    /// Y translation.
    pub ty: f32,
}

impl RsTransform {
    /// Create from raw components.
    #[inline]
    pub const fn new(scos: f32, ssin: f32, tx: f32, ty: f32) -> Self {
        Self { scos, ssin, tx, ty }
    }
}

/// An axis-aligned rounded rectangle: a bounding rect plus one X/Y radius
/// pair per corner, clockwise from the top-left.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RoundRect {
    /// The bounding rectangle.
    pub rect: Rect,
    /// Per-corner radii, clockwise from the top-left corner.
    pub radii: [Point; 4],
}

impl RoundRect {
    /// Create a rounded rectangle with the same X/Y radii on every corner.
    #[inline]
    pub const fn from_rect_xy(rect: Rect, rx: f32, ry: f32) -> Self {
        let r = Point::new(rx, ry);
        Self {
            rect,
            radii: [r, r, r, r],
        }
    }

    /// Create a rounded rectangle with explicit per-corner radii.
    #[inline]
    pub const fn new(rect: Rect, radii: [Point; 4]) -> Self {
        Self { rect, radii }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_concat_translate_then_scale() {
        let m = Matrix::from_scale(2.0, 2.0).concat(&Matrix::from_translate(3.0, 4.0));
        // Scale applied after translate: (1, 1) → (4, 5) → (8, 10).
        assert_eq!(m.m[2], 6.0, "translation x should be scaled");
        assert_eq!(m.m[5], 8.0, "translation y should be scaled");
    }

    #[test]
    fn matrix_kurbo_round_trip() {
        let m = Matrix::from_translate(5.0, -3.0).concat(&Matrix::from_scale(2.0, 0.5));
        let back = Matrix::from_kurbo(m.to_kurbo().expect("affine matrix"));
        assert_eq!(m, back, "affine matrices survive a kurbo round trip");
    }

    #[test]
    fn perspective_matrix_is_not_affine() {
        let mut m = Matrix::IDENTITY;
        m.m[6] = 0.1;
        assert!(m.to_kurbo().is_none(), "perspective row has no affine form");
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert_eq!(a.intersect(&Rect::new(20.0, 20.0, 30.0, 30.0)), None);
    }
}
