// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record and replay for the Scrawl canvas interface.
//!
//! A [`Recorder`] wraps any live [`Canvas`](scrawl_canvas::Canvas) and
//! serializes every call into a compact binary command log while
//! forwarding it unchanged. A [`CommandBuffer`] snapshot of that log can
//! then be replayed, any number of times and from any thread, through
//! [`play`].
//!
//! Two wire channels carry the log. The raw channel is the production
//! format: opcode byte plus operands, nothing else. The type-checked
//! channel tags every value and sequence-numbers every bulk operation, so
//! a recorder and player that disagree about a command's operand schema
//! fail with a precise error instead of silently misreading; build
//! hardened pipelines by pairing a `Recorder<CheckedWriter>` with
//! [`play_checked`].

#![no_std]

extern crate alloc;

mod buffer;
mod opcode;
mod playback;
mod recorder;

pub use buffer::CommandBuffer;
pub use opcode::Opcode;
pub use playback::{play, play_checked, play_from};
pub use recorder::{LogChannel, Recorder};

// Re-exported so recorder construction and error handling need only this
// crate in scope.
pub use scrawl_wire::{CheckedWriter, RawWriter, WireError};
