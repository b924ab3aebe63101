// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wire error taxonomy.

use thiserror::Error;

use crate::channel::Tag;

/// Anything that can go wrong while encoding or decoding a command stream.
///
/// Every decode-side variant means the stream has diverged from its schema
/// and the buffer is permanently unusable: discard it and, if the producer
/// is still available, re-record. There is no partial recovery, because a
/// single misread makes every later byte misaligned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WireError {
    /// The stream ended inside a value.
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the current read required.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// A command tag outside the opcode set.
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    /// An enum byte outside its closed range.
    #[error("invalid {name} value {raw:#04x}")]
    InvalidEnum {
        /// Human-readable enum name.
        name: &'static str,
        /// The offending byte.
        raw: u8,
    },

    /// A string payload that is not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// Type-checked channel: the reader asked for one type, the stream
    /// recorded another.
    #[error("type tag mismatch at offset {offset}: expected {expected:?}, found {found:?}")]
    TagMismatch {
        /// Tag the reader expected.
        expected: Tag,
        /// Tag recorded in the stream.
        found: Tag,
        /// Byte offset of the tag in the checked stream.
        offset: usize,
    },

    /// Type-checked channel: a tag byte outside the tag set.
    #[error("unknown type tag {raw:#04x} at offset {offset}")]
    UnknownTag {
        /// The offending byte.
        raw: u8,
        /// Byte offset of the tag in the checked stream.
        offset: usize,
    },

    /// Type-checked channel: reader and writer disagree on how many
    /// operations preceded this one.
    #[error("operation index mismatch: reader at {expected}, stream recorded {found}")]
    IndexMismatch {
        /// The reader's running operation count.
        expected: u32,
        /// The count recorded by the writer.
        found: u32,
    },

    /// Type-checked channel: a bulk read of a different length than the
    /// bulk write that produced it.
    #[error("bulk length mismatch: reader asked for {expected} elements, stream recorded {found}")]
    LengthMismatch {
        /// Element count the reader asked for.
        expected: u32,
        /// Element count recorded by the writer.
        found: u32,
    },

    /// Encode-time: a payload or element count does not fit the u32 frame.
    #[error("value of {len} bytes exceeds the u32 wire frame")]
    Oversize {
        /// The unrepresentable length.
        len: usize,
    },

    /// An embedded object's canonical blob was rejected by its owner.
    #[error("malformed {kind} blob")]
    BadObject {
        /// Human-readable object kind.
        kind: &'static str,
    },

    /// A structurally invalid value (wrong fixed-array length and friends).
    #[error("malformed {what}")]
    Malformed {
        /// What was malformed.
        what: &'static str,
    },
}
