// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The raw channel: the production wire format.
//!
//! Values are written as bare little-endian bytes with no metadata of any
//! kind. The stream is self-delimiting only because every command's
//! operand schema is statically known.

use alloc::vec::Vec;

use crate::channel::{WireRead, WireWrite};
use crate::error::WireError;

fn frame_len(len: usize) -> Result<u32, WireError> {
    u32::try_from(len).map_err(|_| WireError::Oversize { len })
}

/// Append-only raw byte writer over a growable buffer.
#[derive(Debug, Default)]
pub struct RawWriter {
    buf: Vec<u8>,
}

impl RawWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer, returning its buffer.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discard all written bytes, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl WireWrite for RawWriter {
    #[inline]
    fn write_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    #[inline]
    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    #[inline]
    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, v: &[u8]) -> Result<(), WireError> {
        let len = frame_len(v.len())?;
        self.write_u32(len);
        self.buf.extend_from_slice(v);
        Ok(())
    }

    fn write_u8_slice(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    fn write_i32_slice(&mut self, v: &[i32]) {
        for &e in v {
            self.write_i32(e);
        }
    }

    fn write_u32_slice(&mut self, v: &[u32]) {
        for &e in v {
            self.write_u32(e);
        }
    }

    fn write_f32_slice(&mut self, v: &[f32]) {
        for &e in v {
            self.write_f32(e);
        }
    }

    #[inline]
    fn bytes_written(&self) -> usize {
        self.buf.len()
    }
}

/// Cursor-based raw byte reader over a borrowed, finished buffer.
#[derive(Debug)]
pub struct RawReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RawReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.buf.len() - self.pos;
        if n > remaining {
            return Err(WireError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let raw = self.take(N)?;
        let mut out = [0_u8; N];
        out.copy_from_slice(raw);
        Ok(out)
    }
}

impl WireRead for RawReader<'_> {
    fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.take(1)?[0] != 0)
    }

    fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, WireError> {
        let len = self.read_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn read_u8_slice(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        Ok(self.take(len)?.to_vec())
    }

    fn read_i32_slice(&mut self, len: usize) -> Result<Vec<i32>, WireError> {
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_i32()?);
        }
        Ok(out)
    }

    fn read_u32_slice(&mut self, len: usize) -> Result<Vec<u32>, WireError> {
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_u32()?);
        }
        Ok(out)
    }

    fn read_f32_slice(&mut self, len: usize) -> Result<Vec<f32>, WireError> {
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_f32()?);
        }
        Ok(out)
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_round_trip() {
        let mut w = RawWriter::new();
        w.write_bool(true);
        w.write_u8(0xA5);
        w.write_i32(-7);
        w.write_u32(42);
        w.write_f32(1.5);

        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 1 + 1 + 4 + 4 + 4, "raw scalars carry no metadata");

        let mut r = RawReader::new(&bytes);
        assert!(r.read_bool().expect("bool"), "bool value");
        assert_eq!(r.read_u8().expect("u8"), 0xA5, "u8 value");
        assert_eq!(r.read_i32().expect("i32"), -7, "i32 value");
        assert_eq!(r.read_u32().expect("u32"), 42, "u32 value");
        assert_eq!(r.read_f32().expect("f32"), 1.5, "f32 value");
        assert!(r.is_empty(), "all bytes consumed");
    }

    #[test]
    fn truncated_read_reports_eof() {
        let mut w = RawWriter::new();
        w.write_u32(7);
        let bytes = w.into_bytes();

        let mut r = RawReader::new(&bytes[..2]);
        assert_eq!(
            r.read_u32(),
            Err(WireError::UnexpectedEof {
                needed: 4,
                remaining: 2
            }),
            "truncation is an eof error, not a silent zero"
        );
    }

    #[test]
    fn framed_bytes_round_trip() {
        let mut w = RawWriter::new();
        w.write_bytes(b"hello").expect("frame fits");
        w.write_str("wire").expect("frame fits");
        let bytes = w.into_bytes();

        let mut r = RawReader::new(&bytes);
        assert_eq!(r.read_bytes().expect("blob"), b"hello", "blob payload");
        assert_eq!(r.read_str().expect("string"), "wire", "string payload");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut w = RawWriter::new();
        w.write_bytes(&[0xFF, 0xFE]).expect("frame fits");
        let bytes = w.into_bytes();

        let mut r = RawReader::new(&bytes);
        assert_eq!(r.read_str(), Err(WireError::InvalidUtf8), "utf8 check");
    }

    #[test]
    fn bulk_slices_round_trip() {
        let mut w = RawWriter::new();
        w.write_i32_slice(&[1, -2, 3]);
        w.write_f32_slice(&[0.5, -0.25]);
        let bytes = w.into_bytes();

        let mut r = RawReader::new(&bytes);
        assert_eq!(r.read_i32_slice(3).expect("i32 run"), [1, -2, 3], "i32 run");
        assert_eq!(
            r.read_f32_slice(2).expect("f32 run"),
            [0.5, -0.25],
            "f32 run"
        );
    }
}
