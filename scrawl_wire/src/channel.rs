// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The low-level read/write channel contract.
//!
//! Two interchangeable channel implementations exist: the raw channel
//! ([`RawWriter`](crate::RawWriter) / [`RawReader`](crate::RawReader)),
//! which is the production format, and the type-checked channel
//! ([`CheckedWriter`](crate::CheckedWriter) /
//! [`CheckedReader`](crate::CheckedReader)), which interleaves type and
//! shape metadata to catch encode/decode divergence at the exact byte
//! where it happens. The value-level codec in [`value`](crate::value) is
//! generic over these traits, so the same schema code drives both.
//!
//! All multi-byte values are little-endian.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::WireError;

/// Type tag used by the type-checked channel.
///
/// One byte per tag; scalar tags precede single values, bulk tags precede
/// an operation index, an element length, and the payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// A `bool` scalar.
    Bool = 1,
    /// A `u8` scalar.
    U8 = 2,
    /// An `i32` scalar.
    I32 = 3,
    /// A `u32` scalar.
    U32 = 4,
    /// An `f32` scalar.
    F32 = 5,
    /// A length-framed byte blob.
    Bytes = 6,
    /// A bulk run of `u8` elements.
    ArrayU8 = 7,
    /// A bulk run of `i32` elements.
    ArrayI32 = 8,
    /// A bulk run of `u32` elements.
    ArrayU32 = 9,
    /// A bulk run of `f32` elements.
    ArrayF32 = 10,
}

impl Tag {
    /// Decode a tag byte.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Bool),
            2 => Some(Self::U8),
            3 => Some(Self::I32),
            4 => Some(Self::U32),
            5 => Some(Self::F32),
            6 => Some(Self::Bytes),
            7 => Some(Self::ArrayU8),
            8 => Some(Self::ArrayI32),
            9 => Some(Self::ArrayU32),
            10 => Some(Self::ArrayF32),
            _ => None,
        }
    }
}

/// Append-only write half of a channel.
///
/// Writes are strictly additive: nothing previously written is read back
/// or mutated, and the buffer grows without a capacity ceiling. Scalar
/// writes are infallible; framed writes can fail when a length does not
/// fit the u32 frame, and that failure means the whole log the write was
/// part of must be discarded.
pub trait WireWrite {
    /// Write a `bool` as a single byte.
    fn write_bool(&mut self, v: bool);
    /// Write a raw byte.
    fn write_u8(&mut self, v: u8);
    /// Write an `i32`.
    fn write_i32(&mut self, v: i32);
    /// Write a `u32`.
    fn write_u32(&mut self, v: u32);
    /// Write an `f32`.
    fn write_f32(&mut self, v: f32);

    /// Write a length-framed byte blob.
    fn write_bytes(&mut self, v: &[u8]) -> Result<(), WireError>;

    /// Write a bulk run of bytes. The element count is framed by the
    /// caller; the checked channel additionally records it for
    /// verification.
    fn write_u8_slice(&mut self, v: &[u8]);
    /// Write a bulk run of `i32` elements.
    fn write_i32_slice(&mut self, v: &[i32]);
    /// Write a bulk run of `u32` elements.
    fn write_u32_slice(&mut self, v: &[u32]);
    /// Write a bulk run of `f32` elements.
    fn write_f32_slice(&mut self, v: &[f32]);

    /// Total bytes written so far.
    fn bytes_written(&self) -> usize;

    /// Write a length-framed UTF-8 string.
    fn write_str(&mut self, v: &str) -> Result<(), WireError> {
        self.write_bytes(v.as_bytes())
    }
}

/// Cursor-based read half of a channel.
///
/// Readers borrow a finished buffer and never mutate it; only the private
/// cursor advances, which is what makes concurrent playback of one shared
/// snapshot by independent readers safe.
pub trait WireRead {
    /// Read a `bool`.
    fn read_bool(&mut self) -> Result<bool, WireError>;
    /// Read a raw byte.
    fn read_u8(&mut self) -> Result<u8, WireError>;
    /// Read an `i32`.
    fn read_i32(&mut self) -> Result<i32, WireError>;
    /// Read a `u32`.
    fn read_u32(&mut self) -> Result<u32, WireError>;
    /// Read an `f32`.
    fn read_f32(&mut self) -> Result<f32, WireError>;

    /// Read a length-framed byte blob.
    fn read_bytes(&mut self) -> Result<Vec<u8>, WireError>;

    /// Read a bulk run of `len` bytes.
    fn read_u8_slice(&mut self, len: usize) -> Result<Vec<u8>, WireError>;
    /// Read a bulk run of `len` `i32` elements.
    fn read_i32_slice(&mut self, len: usize) -> Result<Vec<i32>, WireError>;
    /// Read a bulk run of `len` `u32` elements.
    fn read_u32_slice(&mut self, len: usize) -> Result<Vec<u32>, WireError>;
    /// Read a bulk run of `len` `f32` elements.
    fn read_f32_slice(&mut self, len: usize) -> Result<Vec<f32>, WireError>;

    /// Bytes not yet consumed.
    fn remaining(&self) -> usize;

    /// Returns `true` when the stream is exhausted.
    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read a length-framed UTF-8 string.
    fn read_str(&mut self) -> Result<String, WireError> {
        String::from_utf8(self.read_bytes()?).map_err(|_| WireError::InvalidUtf8)
    }
}
