// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay: decode a command stream and drive a live canvas with it.

use alloc::vec::Vec;

use scrawl_canvas::{Canvas, Color, Point};
use scrawl_wire::value::{
    Wire, read_color_array, read_point_array, read_rect_array, read_rs_transform_array,
};
use scrawl_wire::{CheckedReader, RawReader, WireError, WireRead};

use crate::buffer::CommandBuffer;
use crate::opcode::Opcode;

/// Replay a recorded command stream onto `canvas`.
///
/// Commands are decoded and applied strictly in recorded order. Replay is
/// read-only with respect to the buffer: the same buffer can be played any
/// number of times, onto any number of canvases, including concurrently
/// from several threads.
///
/// On any decode error the canvas has received every command before the
/// failing one and nothing of the failing command itself; an operand is
/// never applied until the whole command decoded.
pub fn play(buffer: &CommandBuffer, canvas: &mut dyn Canvas) -> Result<(), WireError> {
    play_from(&mut RawReader::new(buffer.bytes()), canvas)
}

/// Replay a command stream recorded through a type-checked channel.
///
/// Every scalar read is verified against the tag the writer recorded and
/// every bulk read against its operation index and length, so a schema
/// divergence between recorder and player surfaces as a precise
/// [`WireError`] instead of garbage operands.
pub fn play_checked(buffer: &CommandBuffer, canvas: &mut dyn Canvas) -> Result<(), WireError> {
    play_from(&mut CheckedReader::new(buffer.bytes()), canvas)
}

/// Decode commands from any wire channel until it is exhausted.
pub fn play_from<R: WireRead>(r: &mut R, canvas: &mut dyn Canvas) -> Result<(), WireError> {
    while !r.is_empty() {
        let raw = r.read_u8()?;
        let op = Opcode::from_raw(raw).ok_or(WireError::UnknownOpcode(raw))?;
        apply(op, r, canvas)?;
    }
    Ok(())
}

/// Decode one command's operands and invoke the matching canvas method.
///
/// Operands are fully decoded into locals before the canvas sees anything,
/// so a truncated or corrupt command never half-applies.
fn apply<R: WireRead>(op: Opcode, r: &mut R, canvas: &mut dyn Canvas) -> Result<(), WireError> {
    match op {
        Opcode::Save => canvas.save(),
        Opcode::SaveLayer => {
            let paint = Wire::read(r)?;
            canvas.save_layer(Option::as_ref(&paint));
        }
        Opcode::SaveLayerBounded => {
            let bounds = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.save_layer_bounded(&bounds, Option::as_ref(&paint));
        }
        Opcode::SaveLayerRec => {
            let bounds = Wire::read(r)?;
            let paint = Wire::read(r)?;
            let flags = Wire::read(r)?;
            canvas.save_layer_rec(Option::as_ref(&bounds), Option::as_ref(&paint), flags);
        }
        Opcode::Restore => canvas.restore(),
        Opcode::RestoreToCount => {
            let count = Wire::read(r)?;
            canvas.restore_to_count(count);
        }
        Opcode::Translate => {
            let dx = Wire::read(r)?;
            let dy = Wire::read(r)?;
            canvas.translate(dx, dy);
        }
        Opcode::TranslatePoint => {
            let d = Wire::read(r)?;
            canvas.translate_point(d);
        }
        Opcode::Scale => {
            let s = Wire::read(r)?;
            canvas.scale(s);
        }
        Opcode::ScaleXy => {
            let sx = Wire::read(r)?;
            let sy = Wire::read(r)?;
            canvas.scale_xy(sx, sy);
        }
        Opcode::ScalePoint => {
            let s = Wire::read(r)?;
            canvas.scale_point(s);
        }
        Opcode::RotateDegrees => {
            let degrees = Wire::read(r)?;
            canvas.rotate_degrees(degrees);
        }
        Opcode::RotateRadians => {
            let radians = Wire::read(r)?;
            canvas.rotate_radians(radians);
        }
        Opcode::Skew => {
            let kx = Wire::read(r)?;
            let ky = Wire::read(r)?;
            canvas.skew(kx, ky);
        }
        Opcode::SkewPoint => {
            let k = Wire::read(r)?;
            canvas.skew_point(k);
        }
        Opcode::Concat => {
            let matrix = Wire::read(r)?;
            canvas.concat(&matrix);
        }
        Opcode::SetMatrix => {
            let matrix = Wire::read(r)?;
            canvas.set_matrix(&matrix);
        }
        Opcode::ResetMatrix => canvas.reset_matrix(),
        Opcode::ClipRect => {
            let rect = Wire::read(r)?;
            let op = Wire::read(r)?;
            let antialias = Wire::read(r)?;
            canvas.clip_rect(&rect, op, antialias);
        }
        Opcode::ClipRoundRect => {
            let rrect = Wire::read(r)?;
            let op = Wire::read(r)?;
            let antialias = Wire::read(r)?;
            canvas.clip_round_rect(&rrect, op, antialias);
        }
        Opcode::ClipPath => {
            let path = Wire::read(r)?;
            let op = Wire::read(r)?;
            let antialias = Wire::read(r)?;
            canvas.clip_path(&path, op, antialias);
        }
        Opcode::ClipRegion => {
            let region = Wire::read(r)?;
            let op = Wire::read(r)?;
            canvas.clip_region(&region, op);
        }
        Opcode::Clear => {
            let color = Wire::read(r)?;
            canvas.clear(color);
        }
        Opcode::Discard => canvas.discard(),
        Opcode::Flush => canvas.flush(),
        Opcode::DrawPaint => {
            let paint = Wire::read(r)?;
            canvas.draw_paint(&paint);
        }
        Opcode::DrawColor => {
            let color = Wire::read(r)?;
            let mode = Wire::read(r)?;
            canvas.draw_color(color, mode);
        }
        Opcode::DrawLine => {
            let x0 = Wire::read(r)?;
            let y0 = Wire::read(r)?;
            let x1 = Wire::read(r)?;
            let y1 = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_line(x0, y0, x1, y1, &paint);
        }
        Opcode::DrawPoint => {
            let x = Wire::read(r)?;
            let y = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_point(x, y, &paint);
        }
        Opcode::DrawPoints => {
            let mode = Wire::read(r)?;
            let points = required(read_point_array(r)?, "point array")?;
            let paint = Wire::read(r)?;
            canvas.draw_points(mode, &points, &paint);
        }
        Opcode::DrawRect => {
            let rect = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_rect(&rect, &paint);
        }
        Opcode::DrawRectCoords => {
            let x = Wire::read(r)?;
            let y = Wire::read(r)?;
            let w = Wire::read(r)?;
            let h = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_rect_coords(x, y, w, h, &paint);
        }
        Opcode::DrawOval => {
            let rect = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_oval(&rect, &paint);
        }
        Opcode::DrawCircle => {
            let cx = Wire::read(r)?;
            let cy = Wire::read(r)?;
            let radius = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_circle(cx, cy, radius, &paint);
        }
        Opcode::DrawArc => {
            let oval = Wire::read(r)?;
            let start_angle = Wire::read(r)?;
            let sweep_angle = Wire::read(r)?;
            let use_center = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_arc(&oval, start_angle, sweep_angle, use_center, &paint);
        }
        Opcode::DrawRoundRect => {
            let rrect = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_round_rect(&rrect, &paint);
        }
        Opcode::DrawRoundRectXy => {
            let rect = Wire::read(r)?;
            let rx = Wire::read(r)?;
            let ry = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_round_rect_xy(&rect, rx, ry, &paint);
        }
        Opcode::DrawRoundRectDifference => {
            let outer = Wire::read(r)?;
            let inner = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_round_rect_difference(&outer, &inner, &paint);
        }
        Opcode::DrawRegion => {
            let region = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_region(&region, &paint);
        }
        Opcode::DrawPath => {
            let path = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_path(&path, &paint);
        }
        Opcode::DrawImage => {
            let image = Wire::read(r)?;
            let x = Wire::read(r)?;
            let y = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_image(&image, x, y, Option::as_ref(&paint));
        }
        Opcode::DrawImageRect => {
            let image = Wire::read(r)?;
            let dst = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_image_rect(&image, &dst, Option::as_ref(&paint));
        }
        Opcode::DrawImageRectSrc => {
            let image = Wire::read(r)?;
            let src = Wire::read(r)?;
            let dst = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_image_rect_src(&image, Option::as_ref(&src), &dst, Option::as_ref(&paint));
        }
        Opcode::DrawImageLattice => {
            let image = Wire::read(r)?;
            let lattice = Wire::read(r)?;
            let dst = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_image_lattice(&image, &lattice, &dst, Option::as_ref(&paint));
        }
        Opcode::DrawImageNine => {
            let image = Wire::read(r)?;
            let center = Wire::read(r)?;
            let dst = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_image_nine(&image, &center, &dst, Option::as_ref(&paint));
        }
        Opcode::DrawPicture => {
            let picture = Wire::read(r)?;
            canvas.draw_picture(&picture);
        }
        Opcode::DrawPictureMatrix => {
            let picture = Wire::read(r)?;
            let matrix = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_picture_matrix(&picture, Option::as_ref(&matrix), Option::as_ref(&paint));
        }
        Opcode::DrawDrawable => {
            let drawable = Wire::read(r)?;
            let matrix = Wire::read(r)?;
            canvas.draw_drawable(&drawable, Option::as_ref(&matrix));
        }
        Opcode::DrawTextBlob => {
            let blob = Wire::read(r)?;
            let x = Wire::read(r)?;
            let y = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_text_blob(&blob, x, y, &paint);
        }
        Opcode::DrawVertices => {
            let vertices = Wire::read(r)?;
            let mode = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_vertices(&vertices, mode, &paint);
        }
        Opcode::DrawPatch => {
            let cubics: [Point; 12] = required(read_point_array(r)?, "patch cubics")?
                .try_into()
                .map_err(|_| WireError::Malformed {
                    what: "patch cubic count",
                })?;
            let colors = fixed_opt::<Color, 4>(read_color_array(r)?, "patch color count")?;
            let tex_coords = fixed_opt::<Point, 4>(read_point_array(r)?, "patch texture count")?;
            let mode = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_patch(
                &cubics,
                Option::as_ref(&colors),
                Option::as_ref(&tex_coords),
                mode,
                &paint,
            );
        }
        Opcode::DrawAtlas => {
            let atlas = Wire::read(r)?;
            let transforms = required(read_rs_transform_array(r)?, "atlas transforms")?;
            let tex_rects = required(read_rect_array(r)?, "atlas texture rects")?;
            let colors = read_color_array(r)?;
            if tex_rects.len() != transforms.len()
                || colors.as_ref().is_some_and(|c| c.len() != transforms.len())
            {
                return Err(WireError::Malformed {
                    what: "atlas array lengths",
                });
            }
            let mode = Wire::read(r)?;
            let cull_rect = Wire::read(r)?;
            let paint = Wire::read(r)?;
            canvas.draw_atlas(
                &atlas,
                &transforms,
                &tex_rects,
                colors.as_deref(),
                mode,
                Option::as_ref(&cull_rect),
                Option::as_ref(&paint),
            );
        }
        Opcode::DrawAnnotation => {
            let rect = Wire::read(r)?;
            let key = r.read_str()?;
            let value = Wire::read(r)?;
            canvas.draw_annotation(&rect, &key, Option::as_ref(&value));
        }
        Opcode::DrawUrlAnnotation => {
            let rect = Wire::read(r)?;
            let data = Wire::read(r)?;
            canvas.draw_url_annotation(&rect, &data);
        }
        Opcode::DrawNamedDestination => {
            let point = Wire::read(r)?;
            let data = Wire::read(r)?;
            canvas.draw_named_destination(point, &data);
        }
        Opcode::DrawLinkDestination => {
            let rect = Wire::read(r)?;
            let data = Wire::read(r)?;
            canvas.draw_link_destination(&rect, &data);
        }
    }
    Ok(())
}

/// Reject a null array where the schema requires one.
fn required<T>(v: Option<Vec<T>>, what: &'static str) -> Result<Vec<T>, WireError> {
    v.ok_or(WireError::Malformed { what })
}

/// Convert an optional decoded array to a fixed-size operand.
fn fixed_opt<T, const N: usize>(
    v: Option<Vec<T>>,
    what: &'static str,
) -> Result<Option<[T; N]>, WireError> {
    match v {
        None => Ok(None),
        Some(v) => v
            .try_into()
            .map(Some)
            .map_err(|_| WireError::Malformed { what }),
    }
}
