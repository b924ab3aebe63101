// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The type-checked channel: a hardened codec for validating symmetry.
//!
//! Every scalar write is preceded by a one-byte [`Tag`]; byte blobs and
//! bulk slice writes additionally record a running operation index and the
//! element length. The paired reader verifies tag, index, and length
//! before touching payload bytes, so a forgotten or reordered field in the
//! value codec fails loudly at the first diverging operation instead of
//! corrupting every later read.
//!
//! The metadata roughly doubles stream size. This channel is a
//! development and test tool; the raw channel is the production format.

use alloc::vec::Vec;

use crate::channel::{Tag, WireRead, WireWrite};
use crate::error::WireError;

#[expect(
    clippy::cast_possible_truncation,
    reason = "bulk runs beyond u32 elements are not representable on the wire"
)]
fn bulk_len(len: usize) -> u32 {
    debug_assert!(len <= u32::MAX as usize, "bulk run exceeds the wire frame");
    len as u32
}

/// Tag-annotating writer over a growable buffer.
#[derive(Debug, Default)]
pub struct CheckedWriter {
    buf: Vec<u8>,
    ops: u32,
}

impl CheckedWriter {
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

    /// Discard all written bytes and reset the operation counter.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
        self.ops = 0;
    }

    fn scalar(&mut self, tag: Tag, value: &[u8]) {
        self.buf.push(tag as u8);
        self.buf.extend_from_slice(value);
        self.ops = self.ops.wrapping_add(1);
    }

    fn bulk(&mut self, tag: Tag, len: u32, payload: impl FnOnce(&mut Vec<u8>)) {
        self.buf.push(tag as u8);
        self.buf.extend_from_slice(&self.ops.to_le_bytes());
        self.buf.extend_from_slice(&len.to_le_bytes());
        payload(&mut self.buf);
        self.ops = self.ops.wrapping_add(1);
    }
}

impl WireWrite for CheckedWriter {
    fn write_bool(&mut self, v: bool) {
        self.scalar(Tag::Bool, &[u8::from(v)]);
    }

    fn write_u8(&mut self, v: u8) {
        self.scalar(Tag::U8, &[v]);
    }

    fn write_i32(&mut self, v: i32) {
        self.scalar(Tag::I32, &v.to_le_bytes());
    }

    fn write_u32(&mut self, v: u32) {
        self.scalar(Tag::U32, &v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.scalar(Tag::F32, &v.to_le_bytes());
    }

    fn write_bytes(&mut self, v: &[u8]) -> Result<(), WireError> {
        let len = u32::try_from(v.len()).map_err(|_| WireError::Oversize { len: v.len() })?;
        self.bulk(Tag::Bytes, len, |buf| buf.extend_from_slice(v));
        Ok(())
    }

    fn write_u8_slice(&mut self, v: &[u8]) {
        self.bulk(Tag::ArrayU8, bulk_len(v.len()), |buf| {
            buf.extend_from_slice(v);
        });
    }

    fn write_i32_slice(&mut self, v: &[i32]) {
        self.bulk(Tag::ArrayI32, bulk_len(v.len()), |buf| {
            for &e in v {
                buf.extend_from_slice(&e.to_le_bytes());
            }
        });
    }

    fn write_u32_slice(&mut self, v: &[u32]) {
        self.bulk(Tag::ArrayU32, bulk_len(v.len()), |buf| {
            for &e in v {
                buf.extend_from_slice(&e.to_le_bytes());
            }
        });
    }

    fn write_f32_slice(&mut self, v: &[f32]) {
        self.bulk(Tag::ArrayF32, bulk_len(v.len()), |buf| {
            for &e in v {
                buf.extend_from_slice(&e.to_le_bytes());
            }
        });
    }

    #[inline]
    fn bytes_written(&self) -> usize {
        self.buf.len()
    }
}

/// Tag-verifying reader over a borrowed, finished buffer.
#[derive(Debug)]
pub struct CheckedReader<'a> {
    buf: &'a [u8],
    pos: usize,
    ops: u32,
}

impl<'a> CheckedReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            ops: 0,
        }
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

    /// Consume and verify a tag byte.
    fn expect_tag(&mut self, expected: Tag) -> Result<(), WireError> {
        let offset = self.pos;
        let raw = self.take(1)?[0];
        let found = Tag::from_raw(raw).ok_or(WireError::UnknownTag { raw, offset })?;
        if found != expected {
            return Err(WireError::TagMismatch {
                expected,
                found,
                offset,
            });
        }
        Ok(())
    }

    fn take_u32(&mut self) -> Result<u32, WireError> {
        let raw = self.take(4)?;
        let mut arr = [0_u8; 4];
        arr.copy_from_slice(raw);
        Ok(u32::from_le_bytes(arr))
    }

    fn scalar<const N: usize>(&mut self, tag: Tag) -> Result<[u8; N], WireError> {
        self.expect_tag(tag)?;
        let raw = self.take(N)?;
        let mut out = [0_u8; N];
        out.copy_from_slice(raw);
        self.ops = self.ops.wrapping_add(1);
        Ok(out)
    }

    /// Verify a bulk header and return the recorded element length.
    fn bulk_header(&mut self, tag: Tag, expected_len: Option<u32>) -> Result<u32, WireError> {
        self.expect_tag(tag)?;
        let found_index = self.take_u32()?;
        if found_index != self.ops {
            return Err(WireError::IndexMismatch {
                expected: self.ops,
                found: found_index,
            });
        }
        let found_len = self.take_u32()?;
        if let Some(expected) = expected_len
            && expected != found_len
        {
            return Err(WireError::LengthMismatch {
                expected,
                found: found_len,
            });
        }
        Ok(found_len)
    }

    fn finish_op(&mut self) {
        self.ops = self.ops.wrapping_add(1);
    }
}

impl WireRead for CheckedReader<'_> {
    fn read_bool(&mut self) -> Result<bool, WireError> {
        let [b] = self.scalar::<1>(Tag::Bool)?;
        Ok(b != 0)
    }

    fn read_u8(&mut self) -> Result<u8, WireError> {
        let [b] = self.scalar::<1>(Tag::U8)?;
        Ok(b)
    }

    fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_le_bytes(self.scalar::<4>(Tag::I32)?))
    }

    fn read_u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.scalar::<4>(Tag::U32)?))
    }

    fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_le_bytes(self.scalar::<4>(Tag::F32)?))
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, WireError> {
        let len = self.bulk_header(Tag::Bytes, None)?;
        let out = self.take(len as usize)?.to_vec();
        self.finish_op();
        Ok(out)
    }

    fn read_u8_slice(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let expected = u32::try_from(len).map_err(|_| WireError::Oversize { len })?;
        self.bulk_header(Tag::ArrayU8, Some(expected))?;
        let out = self.take(len)?.to_vec();
        self.finish_op();
        Ok(out)
    }

    fn read_i32_slice(&mut self, len: usize) -> Result<Vec<i32>, WireError> {
        let expected = u32::try_from(len).map_err(|_| WireError::Oversize { len })?;
        self.bulk_header(Tag::ArrayI32, Some(expected))?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            let raw = self.take(4)?;
            let mut arr = [0_u8; 4];
            arr.copy_from_slice(raw);
            out.push(i32::from_le_bytes(arr));
        }
        self.finish_op();
        Ok(out)
    }

    fn read_u32_slice(&mut self, len: usize) -> Result<Vec<u32>, WireError> {
        let expected = u32::try_from(len).map_err(|_| WireError::Oversize { len })?;
        self.bulk_header(Tag::ArrayU32, Some(expected))?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.take_u32()?);
        }
        self.finish_op();
        Ok(out)
    }

    fn read_f32_slice(&mut self, len: usize) -> Result<Vec<f32>, WireError> {
        let expected = u32::try_from(len).map_err(|_| WireError::Oversize { len })?;
        self.bulk_header(Tag::ArrayF32, Some(expected))?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            let raw = self.take(4)?;
            let mut arr = [0_u8; 4];
            arr.copy_from_slice(raw);
            out.push(f32::from_le_bytes(arr));
        }
        self.finish_op();
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
    fn symmetric_pairs_verify_cleanly() {
        let mut w = CheckedWriter::new();
        w.write_bool(true);
        w.write_i32(-3);
        w.write_f32(2.5);
        w.write_i32_slice(&[1, 2, 3]);
        w.write_bytes(b"payload").expect("frame fits");
        let bytes = w.into_bytes();

        let mut r = CheckedReader::new(&bytes);
        assert!(r.read_bool().expect("bool"), "bool");
        assert_eq!(r.read_i32().expect("i32"), -3, "i32");
        assert_eq!(r.read_f32().expect("f32"), 2.5, "f32");
        assert_eq!(r.read_i32_slice(3).expect("run"), [1, 2, 3], "i32 run");
        assert_eq!(r.read_bytes().expect("blob"), b"payload", "blob");
        assert!(r.is_empty(), "all bytes consumed");
    }

    #[test]
    fn reordered_reads_fail_on_the_tag() {
        let mut w = CheckedWriter::new();
        w.write_i32(5);
        let bytes = w.into_bytes();

        let mut r = CheckedReader::new(&bytes);
        assert_eq!(
            r.read_f32(),
            Err(WireError::TagMismatch {
                expected: Tag::F32,
                found: Tag::I32,
                offset: 0,
            }),
            "reading the wrong type fails before any value is produced"
        );
    }

    #[test]
    fn flipped_tag_byte_is_detected() {
        let mut w = CheckedWriter::new();
        w.write_u32(1);
        let mut bytes = w.into_bytes();
        bytes[0] = Tag::Bool as u8;

        let mut r = CheckedReader::new(&bytes);
        assert!(
            matches!(r.read_u32(), Err(WireError::TagMismatch { .. })),
            "a corrupted tag is a mismatch, not a misread value"
        );
    }

    #[test]
    fn corrupted_bulk_length_is_detected() {
        let mut w = CheckedWriter::new();
        w.write_i32_slice(&[1, 2, 3]);
        let mut bytes = w.into_bytes();
        // Layout: tag, index u32, length u32, payload. Poke the length.
        bytes[5] = 4;

        let mut r = CheckedReader::new(&bytes);
        assert_eq!(
            r.read_i32_slice(3),
            Err(WireError::LengthMismatch {
                expected: 3,
                found: 4,
            }),
            "a corrupted length fails before the payload is read"
        );
    }

    #[test]
    fn skipped_operation_is_an_index_mismatch() {
        let mut w = CheckedWriter::new();
        w.write_u32(9);
        w.write_f32_slice(&[1.0]);
        let bytes = w.into_bytes();

        // Skip the scalar: the bulk header's recorded index no longer
        // matches the reader's count.
        let mut r = CheckedReader::new(&bytes[5..]);
        assert_eq!(
            r.read_f32_slice(1),
            Err(WireError::IndexMismatch {
                expected: 0,
                found: 1,
            }),
            "desynchronized streams fail at the first bulk operation"
        );
    }
}
