// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable command-buffer snapshots.

use alloc::sync::Arc;

use scrawl_canvas::Picture;

/// An immutable, independently owned snapshot of a command log.
///
/// A snapshot is a true byte-for-byte copy taken at a point in time:
/// recording that continues on the original log never changes it, and the
/// shared `Arc` backing makes handing it to other threads for concurrent
/// playback cheap and safe, since decoding only ever advances a reader's
/// private cursor. The backing allocation is released when the last clone
/// is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Arc<[u8]>,
}

impl CommandBuffer {
    /// Wrap finished command-stream bytes.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The recorded bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Recorded length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Install this buffer as a reusable picture resource.
    ///
    /// The backing bytes are shared, not copied.
    pub fn to_picture(&self) -> Picture {
        Picture::new(self.bytes.clone())
    }
}
