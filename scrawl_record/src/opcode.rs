// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The opcode schema: one tag per distinct operation signature.
//!
//! Overloads of the same verb with different operand shapes carry
//! different tags, because the operand schema that follows the tag is
//! what makes the stream self-delimiting. The set is closed: an
//! unrecognized tag is a fatal decode error, and tags are stable only for
//! the lifetime of one log; there is no cross-version negotiation.
//!
//! `draw_surface` has no tag: the recorder lowers it to [`Opcode::DrawImage`]
//! before anything reaches the log.

/// Command tag, the first byte of every recorded command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
#[expect(missing_docs, reason = "variants mirror the canvas methods one-to-one")]
pub enum Opcode {
    Save = 0,
    SaveLayer = 1,
    SaveLayerBounded = 2,
    SaveLayerRec = 3,
    Restore = 4,
    RestoreToCount = 5,
    Translate = 6,
    TranslatePoint = 7,
    Scale = 8,
    ScaleXy = 9,
    ScalePoint = 10,
    RotateDegrees = 11,
    RotateRadians = 12,
    Skew = 13,
    SkewPoint = 14,
    Concat = 15,
    SetMatrix = 16,
    ResetMatrix = 17,
    ClipRect = 18,
    ClipRoundRect = 19,
    ClipPath = 20,
    ClipRegion = 21,
    Clear = 22,
    Discard = 23,
    Flush = 24,
    DrawPaint = 25,
    DrawColor = 26,
    DrawLine = 27,
    DrawPoint = 28,
    DrawPoints = 29,
    DrawRect = 30,
    DrawRectCoords = 31,
    DrawOval = 32,
    DrawCircle = 33,
    DrawArc = 34,
    DrawRoundRect = 35,
    DrawRoundRectXy = 36,
    DrawRoundRectDifference = 37,
    DrawRegion = 38,
    DrawPath = 39,
    DrawImage = 40,
    DrawImageRect = 41,
    DrawImageRectSrc = 42,
    DrawImageLattice = 43,
    DrawImageNine = 44,
    DrawPicture = 45,
    DrawPictureMatrix = 46,
    DrawDrawable = 47,
    DrawTextBlob = 48,
    DrawVertices = 49,
    DrawPatch = 50,
    DrawAtlas = 51,
    DrawAnnotation = 52,
    DrawUrlAnnotation = 53,
    DrawNamedDestination = 54,
    DrawLinkDestination = 55,
}

impl Opcode {
    /// Every opcode, indexed by its wire byte.
    const ALL: [Self; 56] = [
        Self::Save,
        Self::SaveLayer,
        Self::SaveLayerBounded,
        Self::SaveLayerRec,
        Self::Restore,
        Self::RestoreToCount,
        Self::Translate,
        Self::TranslatePoint,
        Self::Scale,
        Self::ScaleXy,
        Self::ScalePoint,
        Self::RotateDegrees,
        Self::RotateRadians,
        Self::Skew,
        Self::SkewPoint,
        Self::Concat,
        Self::SetMatrix,
        Self::ResetMatrix,
        Self::ClipRect,
        Self::ClipRoundRect,
        Self::ClipPath,
        Self::ClipRegion,
        Self::Clear,
        Self::Discard,
        Self::Flush,
        Self::DrawPaint,
        Self::DrawColor,
        Self::DrawLine,
        Self::DrawPoint,
        Self::DrawPoints,
        Self::DrawRect,
        Self::DrawRectCoords,
        Self::DrawOval,
        Self::DrawCircle,
        Self::DrawArc,
        Self::DrawRoundRect,
        Self::DrawRoundRectXy,
        Self::DrawRoundRectDifference,
        Self::DrawRegion,
        Self::DrawPath,
        Self::DrawImage,
        Self::DrawImageRect,
        Self::DrawImageRectSrc,
        Self::DrawImageLattice,
        Self::DrawImageNine,
        Self::DrawPicture,
        Self::DrawPictureMatrix,
        Self::DrawDrawable,
        Self::DrawTextBlob,
        Self::DrawVertices,
        Self::DrawPatch,
        Self::DrawAtlas,
        Self::DrawAnnotation,
        Self::DrawUrlAnnotation,
        Self::DrawNamedDestination,
        Self::DrawLinkDestination,
    ];

    /// Decode a command tag byte.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }
}
