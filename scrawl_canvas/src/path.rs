// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path geometry and its canonical byte form.
//!
//! A [`Path`] owns its element program and is responsible for its own
//! serialization: the command wire format embeds paths as opaque,
//! length-prefixed blobs produced by [`Path::canonical_bytes`] and parsed
//! back by [`Path::from_canonical`]. The blob layout is one fill-type byte,
//! a little-endian u32 element count, then per element a verb byte followed
//! by that verb's points as little-endian f32 pairs.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::geom::{Point, Rect};

/// Fill rule for a path's interior.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PathFillType {
    /// Non-zero winding rule.
    #[default]
    Winding = 0,
    /// Even-odd rule.
    EvenOdd = 1,
    /// Inverse of the winding rule.
    InverseWinding = 2,
    /// Inverse of the even-odd rule.
    InverseEvenOdd = 3,
}

impl PathFillType {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Winding),
            1 => Some(Self::EvenOdd),
            2 => Some(Self::InverseWinding),
            3 => Some(Self::InverseEvenOdd),
            _ => None,
        }
    }
}

/// One element of a path's program.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEl {
    /// Start a new subpath at the given point.
    MoveTo(Point),
    /// Line from the current point.
    LineTo(Point),
    /// Quadratic Bézier with one control point.
    QuadTo(Point, Point),
    /// Cubic Bézier with two control points.
    CubicTo(Point, Point, Point),
    /// Close the current subpath.
    Close,
}

impl PathEl {
    const VERB_MOVE: u8 = 0;
    const VERB_LINE: u8 = 1;
    const VERB_QUAD: u8 = 2;
    const VERB_CUBIC: u8 = 3;
    const VERB_CLOSE: u8 = 4;
}

/// An immutable path: a fill type plus an element program.
///
/// Cheaply clonable; the element storage is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    fill_type: PathFillType,
    elements: Arc<[PathEl]>,
}

impl Path {
    /// Create a path from a fill type and elements.
    pub fn new(fill_type: PathFillType, elements: impl Into<Arc<[PathEl]>>) -> Self {
        Self {
            fill_type,
            elements: elements.into(),
        }
    }

    /// A closed rectangular path.
    pub fn rect(rect: Rect) -> Self {
        Self::new(
            PathFillType::Winding,
            [
                PathEl::MoveTo(Point::new(rect.left, rect.top)),
                PathEl::LineTo(Point::new(rect.right, rect.top)),
                PathEl::LineTo(Point::new(rect.right, rect.bottom)),
                PathEl::LineTo(Point::new(rect.left, rect.bottom)),
                PathEl::Close,
            ]
            .as_slice(),
        )
    }

    /// The path's fill type.
    #[inline]
    pub fn fill_type(&self) -> PathFillType {
        self.fill_type
    }

    /// The path's element program.
    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    /// Serialize to the path's canonical byte form.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "element counts beyond u32 are not representable in the blob format"
    )]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        fn put_point(out: &mut Vec<u8>, p: Point) {
            out.extend_from_slice(&p.x.to_le_bytes());
            out.extend_from_slice(&p.y.to_le_bytes());
        }

        let mut out = Vec::new();
        out.push(self.fill_type as u8);
        out.extend_from_slice(&(self.elements.len() as u32).to_le_bytes());
        for el in self.elements.iter() {
            match *el {
                PathEl::MoveTo(p) => {
                    out.push(PathEl::VERB_MOVE);
                    put_point(&mut out, p);
                }
                PathEl::LineTo(p) => {
                    out.push(PathEl::VERB_LINE);
                    put_point(&mut out, p);
                }
                PathEl::QuadTo(c, p) => {
                    out.push(PathEl::VERB_QUAD);
                    put_point(&mut out, c);
                    put_point(&mut out, p);
                }
                PathEl::CubicTo(c0, c1, p) => {
                    out.push(PathEl::VERB_CUBIC);
                    put_point(&mut out, c0);
                    put_point(&mut out, c1);
                    put_point(&mut out, p);
                }
                PathEl::Close => out.push(PathEl::VERB_CLOSE),
            }
        }
        out
    }

    /// Parse a canonical blob; `None` when the blob is malformed.
    pub fn from_canonical(bytes: &[u8]) -> Option<Self> {
        struct Cursor<'a> {
            bytes: &'a [u8],
        }

        impl<'a> Cursor<'a> {
            fn take(&mut self, n: usize) -> Option<&'a [u8]> {
                let (head, tail) = self.bytes.split_at_checked(n)?;
                self.bytes = tail;
                Some(head)
            }

            fn u8(&mut self) -> Option<u8> {
                Some(self.take(1)?[0])
            }

            fn u32(&mut self) -> Option<u32> {
                Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
            }

            fn point(&mut self) -> Option<Point> {
                let raw = self.take(8)?;
                Some(Point::new(
                    f32::from_le_bytes(raw[0..4].try_into().ok()?),
                    f32::from_le_bytes(raw[4..8].try_into().ok()?),
                ))
            }
        }

        let mut cursor = Cursor { bytes };
        let fill_type = PathFillType::from_raw(cursor.u8()?)?;
        let count = cursor.u32()? as usize;
        let mut elements = Vec::with_capacity(count.min(bytes.len()));
        for _ in 0..count {
            let el = match cursor.u8()? {
                PathEl::VERB_MOVE => PathEl::MoveTo(cursor.point()?),
                PathEl::VERB_LINE => PathEl::LineTo(cursor.point()?),
                PathEl::VERB_QUAD => PathEl::QuadTo(cursor.point()?, cursor.point()?),
                PathEl::VERB_CUBIC => {
                    PathEl::CubicTo(cursor.point()?, cursor.point()?, cursor.point()?)
                }
                PathEl::VERB_CLOSE => PathEl::Close,
                _ => return None,
            };
            elements.push(el);
        }
        if !cursor.bytes.is_empty() {
            return None;
        }
        Some(Self::new(fill_type, elements.as_slice()))
    }

    /// Convert to a kurbo path.
    pub fn to_kurbo(&self) -> kurbo::BezPath {
        let mut out = kurbo::BezPath::new();
        for el in self.elements.iter() {
            match *el {
                PathEl::MoveTo(p) => out.move_to(p.to_kurbo()),
                PathEl::LineTo(p) => out.line_to(p.to_kurbo()),
                PathEl::QuadTo(c, p) => out.quad_to(c.to_kurbo(), p.to_kurbo()),
                PathEl::CubicTo(c0, c1, p) => {
                    out.curve_to(c0.to_kurbo(), c1.to_kurbo(), p.to_kurbo());
                }
                PathEl::Close => out.close_path(),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_round_trip() {
        let path = Path::new(
            PathFillType::EvenOdd,
            [
                PathEl::MoveTo(Point::new(1.0, 2.0)),
                PathEl::QuadTo(Point::new(3.0, 4.0), Point::new(5.0, 6.0)),
                PathEl::CubicTo(
                    Point::new(7.0, 8.0),
                    Point::new(9.0, 10.0),
                    Point::new(11.0, 12.0),
                ),
                PathEl::Close,
            ]
            .as_slice(),
        );
        let bytes = path.canonical_bytes();
        let back = Path::from_canonical(&bytes).expect("valid canonical blob");
        assert_eq!(back, path, "canonical bytes round-trip the path");
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let bytes = Path::rect(Rect::new(0.0, 0.0, 4.0, 4.0)).canonical_bytes();
        assert!(
            Path::from_canonical(&bytes[..bytes.len() - 1]).is_none(),
            "truncated blob must not parse"
        );
    }

    #[test]
    fn unknown_verb_is_rejected() {
        let mut bytes = Path::rect(Rect::new(0.0, 0.0, 4.0, 4.0)).canonical_bytes();
        bytes[5] = 0xEE;
        assert!(
            Path::from_canonical(&bytes).is_none(),
            "unknown verb byte must not parse"
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = Path::rect(Rect::new(0.0, 0.0, 4.0, 4.0)).canonical_bytes();
        bytes.push(0);
        assert!(
            Path::from_canonical(&bytes).is_none(),
            "extra bytes after the program must not parse"
        );
    }
}
