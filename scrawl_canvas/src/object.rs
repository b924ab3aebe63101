// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference-counted resource objects referenced by canvas commands.
//!
//! With the exception of [`Image`] and [`Picture`], these types treat their
//! payload as an opaque canonical blob: the bytes come from the object's
//! producer (a font engine, a shader compiler, a text shaper) and the wire
//! format embeds them verbatim behind a length prefix. Scrawl never
//! interprets them; it only guarantees they survive a record/replay cycle
//! byte-for-byte.
//!
//! Everything here is `Arc`-backed and cheap to clone, so a decoded
//! temporary can be handed to a sink and dropped unconditionally afterward.

use alloc::sync::Arc;
use alloc::vec::Vec;

macro_rules! opaque_object {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            data: Arc<[u8]>,
        }

        impl $name {
            /// Wrap a canonical blob produced by the object's owner.
            pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
                Self { data: data.into() }
            }

            /// The canonical serialized form of this object.
            #[inline]
            pub fn canonical_bytes(&self) -> &[u8] {
                &self.data
            }

            /// Reconstruct from a canonical blob.
            #[inline]
            pub fn from_canonical(bytes: &[u8]) -> Option<Self> {
                Some(Self::new(bytes))
            }
        }
    };
}

opaque_object!(
    /// A typeface, serialized by the font backend.
    Typeface
);
opaque_object!(
    /// A shader (gradient, image shader, ...), serialized by its factory.
    Shader
);
opaque_object!(
    /// A color filter.
    ColorFilter
);
opaque_object!(
    /// An image filter.
    ImageFilter
);
opaque_object!(
    /// A mask filter.
    MaskFilter
);
opaque_object!(
    /// A path effect (dashing and friends).
    PathEffect
);
opaque_object!(
    /// A color space description.
    ColorSpace
);
opaque_object!(
    /// A shaped run of glyphs with positions.
    TextBlob
);
opaque_object!(
    /// A triangle mesh with optional colors and texture coordinates.
    Vertices
);
opaque_object!(
    /// A custom drawable, serialized via its own picture form.
    Drawable
);
opaque_object!(
    /// An uninterpreted byte payload, used by annotation commands.
    Data
);

/// A raster image: pixel dimensions plus an opaque pixel payload.
///
/// Decoding and encoding of compressed formats is the job of an external
/// bitmap pipeline; scrawl carries the payload untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Image {
    /// Create an image from dimensions and a pixel payload.
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel payload.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Serialize to the image's canonical byte form: width, height, then
    /// the length-framed pixel payload, all little-endian.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "payloads beyond u32 bytes are not representable in the blob format"
    )]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.pixels.len());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&(self.pixels.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.pixels);
        out
    }

    /// Parse a canonical blob; `None` when the blob is malformed.
    pub fn from_canonical(bytes: &[u8]) -> Option<Self> {
        let (header, payload) = bytes.split_at_checked(12)?;
        let width = u32::from_le_bytes(header[0..4].try_into().ok()?);
        let height = u32::from_le_bytes(header[4..8].try_into().ok()?);
        let len = u32::from_le_bytes(header[8..12].try_into().ok()?) as usize;
        if payload.len() != len {
            return None;
        }
        Some(Self::new(width, height, payload))
    }
}

/// A recorded command stream installed as a reusable resource.
///
/// A picture's canonical form *is* its command-buffer bytes; drawing one
/// replays a nested program. The canvas layer treats it as opaque.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Picture {
    data: Arc<[u8]>,
}

impl Picture {
    /// Wrap recorded command-stream bytes.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    /// The underlying command-stream bytes.
    #[inline]
    pub fn canonical_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reconstruct from command-stream bytes.
    #[inline]
    pub fn from_canonical(bytes: &[u8]) -> Option<Self> {
        Some(Self::new(bytes))
    }
}

/// An externally backed render target.
///
/// Surfaces are never serialized; a recorder lowers `draw_surface` to a
/// `draw_image` of the surface's current snapshot.
#[derive(Clone, Debug)]
pub struct Surface {
    image: Image,
}

impl Surface {
    /// Create a surface over its current contents.
    pub fn new(image: Image) -> Self {
        Self { image }
    }

    /// Capture the surface's current contents as an immutable image.
    pub fn snapshot(&self) -> Image {
        self.image.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_canonical_round_trip() {
        let image = Image::new(2, 2, [1_u8, 2, 3, 4].as_slice());
        let back = Image::from_canonical(&image.canonical_bytes()).expect("valid blob");
        assert_eq!(back, image, "image canonical bytes round-trip");
    }

    #[test]
    fn image_length_mismatch_is_rejected() {
        let mut bytes = Image::new(1, 1, [9_u8].as_slice()).canonical_bytes();
        bytes.push(0);
        assert!(
            Image::from_canonical(&bytes).is_none(),
            "payload longer than its frame must not parse"
        );
    }

    #[test]
    fn opaque_blob_is_carried_verbatim() {
        let blob = Shader::new([0xDE_u8, 0xAD, 0xBE, 0xEF].as_slice());
        let back = Shader::from_canonical(blob.canonical_bytes()).expect("opaque parse");
        assert_eq!(back, blob, "opaque payload untouched");
    }
}
