// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrawl Canvas: the drawing-surface contract and its POD data model.
//!
//! This crate defines the [`Canvas`] trait, the stable set of drawing
//! operations that sinks implement and that the recording layer captures,
//! together with the plain-old-data value types those operations carry:
//! geometry, colors, paints, and `Arc`-backed resource objects.
//!
//! # Position in the stack
//!
//! - **This crate**: the operation contract and value types. No
//!   serialization, no buffering; just the vocabulary.
//! - **`scrawl_wire`**: the primitive codec that gives every value type
//!   here an exact binary encode/decode.
//! - **`scrawl_record`**: the recording producer and the playback
//!   interpreter built on both.
//! - **Sinks**: concrete [`Canvas`] implementations: a rasterizer, a
//!   recorder, or the call-tracing reference sink in `scrawl_canvas_ref`.
//!
//! # Design constraints
//!
//! The data model is shaped by the wire format rather than the other way
//! around:
//!
//! - structs are field-ordered and `Copy` where possible, so the codec can
//!   write constituent fields in declaration order;
//! - every enum is `#[repr(u8)]` with a checked `from_raw`, because the
//!   format stores enums as one raw byte and enum *arrays* as raw byte
//!   runs;
//! - resource objects ([`Path`], [`Image`], [`TextBlob`], ...) own a
//!   canonical byte form so the codec can embed them as opaque
//!   length-prefixed blobs;
//! - everything a command references is cheaply clonable, so replay can
//!   hand a decoded temporary to a sink and drop it unconditionally.

#![no_std]

extern crate alloc;

mod canvas;
mod color;
mod geom;
mod object;
mod paint;
mod path;
mod region;

pub use canvas::{Canvas, ClipOp, PointMode, SaveLayerFlags};
pub use color::{Color, Color4f};
pub use geom::{IRect, Matrix, Point, Rect, RoundRect, RsTransform};
pub use object::{
    ColorFilter, ColorSpace, Data, Drawable, Image, ImageFilter, MaskFilter, PathEffect, Picture,
    Shader, Surface, TextBlob, Typeface, Vertices,
};
pub use paint::{
    BlendMode, FilterQuality, Font, FontEdging, FontHinting, Paint, PaintStyle, StrokeCap,
    StrokeJoin,
};
pub use path::{Path, PathEl, PathFillType};
pub use region::{Lattice, LatticeRectType, Region};
