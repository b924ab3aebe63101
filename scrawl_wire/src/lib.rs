// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrawl Wire: the binary codec underneath canvas command recording.
//!
//! This crate owns the byte-level rules of the command format and nothing
//! about commands themselves:
//!
//! - [`WireWrite`] / [`WireRead`]: the low-level channel contract of
//!   little-endian scalars, length-framed blobs, and bulk slice runs over
//!   a growable append-only buffer (writes) or a borrowed cursor (reads).
//! - [`RawWriter`] / [`RawReader`]: the production channel. Bare bytes,
//!   no metadata, self-delimiting only through the static operand schema.
//! - [`CheckedWriter`] / [`CheckedReader`]: the type-checked channel.
//!   Every scalar carries a type tag and every bulk operation an index
//!   and length, so an encode/decode asymmetry fails at the exact point
//!   of divergence instead of corrupting every later read. Development
//!   and test tool; roughly doubles stream size.
//! - [`value`]: the [`Wire`](value::Wire) trait and its implementation
//!   for every operand shape in the `scrawl_canvas` data model, generic
//!   over the channel so the same schema code drives both.
//!
//! The format is an in-process, same-build library format: no magic
//! numbers, no version negotiation, no checksums. Any [`WireError`] from
//! a decode means the buffer is permanently unusable.

#![no_std]

extern crate alloc;

mod channel;
mod checked;
mod error;
mod raw;
pub mod value;

pub use channel::{Tag, WireRead, WireWrite};
pub use checked::{CheckedReader, CheckedWriter};
pub use error::WireError;
pub use raw::{RawReader, RawWriter};
