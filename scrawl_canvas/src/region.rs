// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer regions and image lattices.

use alloc::sync::Arc;

use crate::color::Color;
use crate::geom::IRect;

/// A set of integer device-space spans.
///
/// Serialized field-by-field as an array of span rectangles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    spans: Arc<[IRect]>,
}

impl Region {
    /// Create a region from its span rectangles.
    pub fn new(spans: impl Into<Arc<[IRect]>>) -> Self {
        Self {
            spans: spans.into(),
        }
    }

    /// A region covering a single rectangle.
    pub fn from_rect(rect: IRect) -> Self {
        Self::new([rect].as_slice())
    }

    /// The region's spans.
    #[inline]
    pub fn spans(&self) -> &[IRect] {
        &self.spans
    }

    /// Returns `true` if the region covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(IRect::is_empty)
    }
}

/// How one cell of a lattice is painted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum LatticeRectType {
    /// Draw the image cell.
    #[default]
    Default = 0,
    /// Skip the cell entirely.
    Transparent = 1,
    /// Fill the cell with a solid color from the color array.
    FixedColor = 2,
}

impl LatticeRectType {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Default),
            1 => Some(Self::Transparent),
            2 => Some(Self::FixedColor),
            _ => None,
        }
    }
}

/// A stretchable nine-patch generalization: the image is divided into a
/// grid by X/Y pixel divisions, and each resulting cell is stretched,
/// skipped, or flood-filled when drawn into a destination rect.
///
/// Serialized field-by-field: nullable bounds, color array, the two i32
/// division arrays, then the per-cell type array as raw enum bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lattice {
    /// Sub-bounds of the image to divide, or `None` for the whole image.
    pub bounds: Option<IRect>,
    /// Fill colors for [`LatticeRectType::FixedColor`] cells.
    pub colors: Arc<[Color]>,
    /// X pixel coordinates of vertical division lines.
    pub x_divs: Arc<[i32]>,
    /// Y pixel coordinates of horizontal division lines.
    pub y_divs: Arc<[i32]>,
    /// Per-cell paint behavior, row-major over the divided grid.
    pub rect_types: Arc<[LatticeRectType]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_region() {
        assert!(Region::default().is_empty(), "no spans means empty");
        assert!(
            Region::from_rect(IRect::new(5, 5, 5, 9)).is_empty(),
            "degenerate span means empty"
        );
        assert!(
            !Region::from_rect(IRect::new(0, 0, 1, 1)).is_empty(),
            "a real span is not empty"
        );
    }
}
