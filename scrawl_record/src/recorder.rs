// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recording producer: a canvas that logs while it forwards.

use scrawl_canvas::{
    BlendMode, Canvas, ClipOp, Color, Data, Drawable, IRect, Image, Lattice, Matrix, Paint, Path,
    Picture, Point, PointMode, Rect, Region, RoundRect, RsTransform, SaveLayerFlags, TextBlob,
    Vertices,
};
use scrawl_wire::value::{
    Wire, write_color_array, write_point_array, write_rect_array, write_rs_transform_array,
};
use scrawl_wire::{CheckedWriter, RawWriter, WireError, WireWrite};

use crate::buffer::CommandBuffer;
use crate::opcode::Opcode;

/// A wire channel a [`Recorder`] can keep its log in.
///
/// This adds the two abilities the channel traits deliberately leave out:
/// looking at the accumulated bytes (to snapshot them) and starting over.
pub trait LogChannel: WireWrite + Default {
    /// The bytes written so far.
    fn bytes(&self) -> &[u8];
    /// Discard everything written so far.
    fn reset(&mut self);
}

impl LogChannel for RawWriter {
    fn bytes(&self) -> &[u8] {
        self.as_slice()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl LogChannel for CheckedWriter {
    fn bytes(&self) -> &[u8] {
        self.as_slice()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// A [`Canvas`] that captures every call into a command log while
/// forwarding it, unchanged and in order, to a live backing sink.
///
/// Each method body is the same two-step decorator: encode the command,
/// then delegate. Because every state-mutating call reaches the live sink
/// synchronously, state queries ([`Canvas::save_count`],
/// [`Canvas::total_matrix`], [`Canvas::device_clip_bounds`]) delegate too
/// and stay accurate without ever decoding the log.
///
/// If an operand fails to encode, the failing command is not forwarded and
/// the log is poisoned: recording stops, [`Recorder::error`] reports the
/// failure, and [`Recorder::snapshot`] refuses to produce a buffer until
/// [`Recorder::reset`] starts a fresh log. A half-encoded command is never
/// observable.
///
/// The channel parameter selects the wire format: the default [`RawWriter`]
/// is the production format, while a [`CheckedWriter`]-backed recorder
/// paired with checked playback validates encode/decode symmetry
/// end-to-end.
pub struct Recorder<'a, W: LogChannel = RawWriter> {
    sink: &'a mut dyn Canvas,
    log: W,
    poison: Option<WireError>,
}

impl<W: LogChannel + core::fmt::Debug> core::fmt::Debug for Recorder<'_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The sink is an opaque trait object.
        f.debug_struct("Recorder")
            .field("log", &self.log)
            .field("poison", &self.poison)
            .finish_non_exhaustive()
    }
}

impl<'a, W: LogChannel> Recorder<'a, W> {
    /// Start recording over an empty log, forwarding to `sink`.
    pub fn new(sink: &'a mut dyn Canvas) -> Self {
        Self {
            sink,
            log: W::default(),
            poison: None,
        }
    }

    /// The first encode failure, if any. A poisoned log is must-discard.
    pub fn error(&self) -> Option<&WireError> {
        self.poison.as_ref()
    }

    /// Bytes recorded so far.
    pub fn bytes_recorded(&self) -> usize {
        self.log.bytes().len()
    }

    /// Copy the log-so-far into an immutable [`CommandBuffer`].
    ///
    /// Recording continues undisturbed; bytes written after this call are
    /// not part of the returned snapshot. Fails if the log was poisoned by
    /// an earlier encode failure.
    pub fn snapshot(&self) -> Result<CommandBuffer, WireError> {
        match &self.poison {
            Some(err) => Err(err.clone()),
            None => Ok(CommandBuffer::from_bytes(self.log.bytes())),
        }
    }

    /// Discard the current log (and any poisoning) and start empty.
    ///
    /// The live sink is untouched: its state still reflects everything
    /// already forwarded.
    pub fn reset(&mut self) {
        self.log.reset();
        self.poison = None;
    }

    /// Finish recording: take a final snapshot and release the recorder's
    /// borrow of the sink.
    pub fn finish(self) -> Result<CommandBuffer, WireError> {
        match self.poison {
            Some(err) => Err(err),
            None => Ok(CommandBuffer::from_bytes(self.log.bytes())),
        }
    }

    /// Append one command: the opcode byte, then operands in schema order.
    ///
    /// After a poisoning failure nothing more is appended; the stream
    /// would be misaligned anyway and must be discarded.
    fn command(&mut self, op: Opcode, operands: impl FnOnce(&mut W) -> Result<(), WireError>) {
        if self.poison.is_some() {
            return;
        }
        self.log.write_u8(op as u8);
        if let Err(err) = operands(&mut self.log) {
            self.poison = Some(err);
        }
    }
}

impl<W: LogChannel> Canvas for Recorder<'_, W> {
    fn save(&mut self) {
        self.command(Opcode::Save, |_| Ok(()));
        self.sink.save();
    }

    fn save_layer(&mut self, paint: Option<&Paint>) {
        self.command(Opcode::SaveLayer, |w| paint.cloned().write(w));
        self.sink.save_layer(paint);
    }

    fn save_layer_bounded(&mut self, bounds: &Rect, paint: Option<&Paint>) {
        self.command(Opcode::SaveLayerBounded, |w| {
            bounds.write(w)?;
            paint.cloned().write(w)
        });
        self.sink.save_layer_bounded(bounds, paint);
    }

    fn save_layer_rec(
        &mut self,
        bounds: Option<&Rect>,
        paint: Option<&Paint>,
        flags: SaveLayerFlags,
    ) {
        self.command(Opcode::SaveLayerRec, |w| {
            bounds.copied().write(w)?;
            paint.cloned().write(w)?;
            flags.write(w)
        });
        self.sink.save_layer_rec(bounds, paint, flags);
    }

    fn restore(&mut self) {
        self.command(Opcode::Restore, |_| Ok(()));
        self.sink.restore();
    }

    fn restore_to_count(&mut self, count: i32) {
        self.command(Opcode::RestoreToCount, |w| count.write(w));
        self.sink.restore_to_count(count);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.command(Opcode::Translate, |w| {
            dx.write(w)?;
            dy.write(w)
        });
        self.sink.translate(dx, dy);
    }

    fn translate_point(&mut self, d: Point) {
        self.command(Opcode::TranslatePoint, |w| d.write(w));
        self.sink.translate_point(d);
    }

    fn scale(&mut self, s: f32) {
        self.command(Opcode::Scale, |w| s.write(w));
        self.sink.scale(s);
    }

    fn scale_xy(&mut self, sx: f32, sy: f32) {
        self.command(Opcode::ScaleXy, |w| {
            sx.write(w)?;
            sy.write(w)
        });
        self.sink.scale_xy(sx, sy);
    }

    fn scale_point(&mut self, s: Point) {
        self.command(Opcode::ScalePoint, |w| s.write(w));
        self.sink.scale_point(s);
    }

    fn rotate_degrees(&mut self, degrees: f32) {
        self.command(Opcode::RotateDegrees, |w| degrees.write(w));
        self.sink.rotate_degrees(degrees);
    }

    fn rotate_radians(&mut self, radians: f32) {
        self.command(Opcode::RotateRadians, |w| radians.write(w));
        self.sink.rotate_radians(radians);
    }

    fn skew(&mut self, kx: f32, ky: f32) {
        self.command(Opcode::Skew, |w| {
            kx.write(w)?;
            ky.write(w)
        });
        self.sink.skew(kx, ky);
    }

    fn skew_point(&mut self, k: Point) {
        self.command(Opcode::SkewPoint, |w| k.write(w));
        self.sink.skew_point(k);
    }

    fn concat(&mut self, matrix: &Matrix) {
        self.command(Opcode::Concat, |w| matrix.write(w));
        self.sink.concat(matrix);
    }

    fn set_matrix(&mut self, matrix: &Matrix) {
        self.command(Opcode::SetMatrix, |w| matrix.write(w));
        self.sink.set_matrix(matrix);
    }

    fn reset_matrix(&mut self) {
        self.command(Opcode::ResetMatrix, |_| Ok(()));
        self.sink.reset_matrix();
    }

    fn clip_rect(&mut self, rect: &Rect, op: ClipOp, antialias: bool) {
        self.command(Opcode::ClipRect, |w| {
            rect.write(w)?;
            op.write(w)?;
            antialias.write(w)
        });
        self.sink.clip_rect(rect, op, antialias);
    }

    fn clip_round_rect(&mut self, rrect: &RoundRect, op: ClipOp, antialias: bool) {
        self.command(Opcode::ClipRoundRect, |w| {
            rrect.write(w)?;
            op.write(w)?;
            antialias.write(w)
        });
        self.sink.clip_round_rect(rrect, op, antialias);
    }

    fn clip_path(&mut self, path: &Path, op: ClipOp, antialias: bool) {
        self.command(Opcode::ClipPath, |w| {
            path.write(w)?;
            op.write(w)?;
            antialias.write(w)
        });
        self.sink.clip_path(path, op, antialias);
    }

    fn clip_region(&mut self, region: &Region, op: ClipOp) {
        self.command(Opcode::ClipRegion, |w| {
            region.write(w)?;
            op.write(w)
        });
        self.sink.clip_region(region, op);
    }

    fn clear(&mut self, color: Color) {
        self.command(Opcode::Clear, |w| color.write(w));
        self.sink.clear(color);
    }

    fn discard(&mut self) {
        self.command(Opcode::Discard, |_| Ok(()));
        self.sink.discard();
    }

    fn flush(&mut self) {
        self.command(Opcode::Flush, |_| Ok(()));
        self.sink.flush();
    }

    fn draw_paint(&mut self, paint: &Paint) {
        self.command(Opcode::DrawPaint, |w| paint.write(w));
        self.sink.draw_paint(paint);
    }

    fn draw_color(&mut self, color: Color, mode: BlendMode) {
        self.command(Opcode::DrawColor, |w| {
            color.write(w)?;
            mode.write(w)
        });
        self.sink.draw_color(color, mode);
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        self.command(Opcode::DrawLine, |w| {
            x0.write(w)?;
            y0.write(w)?;
            x1.write(w)?;
            y1.write(w)?;
            paint.write(w)
        });
        self.sink.draw_line(x0, y0, x1, y1, paint);
    }

    fn draw_point(&mut self, x: f32, y: f32, paint: &Paint) {
        self.command(Opcode::DrawPoint, |w| {
            x.write(w)?;
            y.write(w)?;
            paint.write(w)
        });
        self.sink.draw_point(x, y, paint);
    }

    fn draw_points(&mut self, mode: PointMode, points: &[Point], paint: &Paint) {
        self.command(Opcode::DrawPoints, |w| {
            mode.write(w)?;
            write_point_array(w, Some(points))?;
            paint.write(w)
        });
        self.sink.draw_points(mode, points, paint);
    }

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        self.command(Opcode::DrawRect, |w| {
            rect.write(w)?;
            paint.write(w)
        });
        self.sink.draw_rect(rect, paint);
    }

    fn draw_rect_coords(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
        self.command(Opcode::DrawRectCoords, |w| {
            x.write(w)?;
            y.write(w)?;
            width.write(w)?;
            height.write(w)?;
            paint.write(w)
        });
        self.sink.draw_rect_coords(x, y, width, height, paint);
    }

    fn draw_oval(&mut self, rect: &Rect, paint: &Paint) {
        self.command(Opcode::DrawOval, |w| {
            rect.write(w)?;
            paint.write(w)
        });
        self.sink.draw_oval(rect, paint);
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        self.command(Opcode::DrawCircle, |w| {
            cx.write(w)?;
            cy.write(w)?;
            radius.write(w)?;
            paint.write(w)
        });
        self.sink.draw_circle(cx, cy, radius, paint);
    }

    fn draw_arc(
        &mut self,
        oval: &Rect,
        start_angle: f32,
        sweep_angle: f32,
        use_center: bool,
        paint: &Paint,
    ) {
        self.command(Opcode::DrawArc, |w| {
            oval.write(w)?;
            start_angle.write(w)?;
            sweep_angle.write(w)?;
            use_center.write(w)?;
            paint.write(w)
        });
        self.sink
            .draw_arc(oval, start_angle, sweep_angle, use_center, paint);
    }

    fn draw_round_rect(&mut self, rrect: &RoundRect, paint: &Paint) {
        self.command(Opcode::DrawRoundRect, |w| {
            rrect.write(w)?;
            paint.write(w)
        });
        self.sink.draw_round_rect(rrect, paint);
    }

    fn draw_round_rect_xy(&mut self, rect: &Rect, rx: f32, ry: f32, paint: &Paint) {
        self.command(Opcode::DrawRoundRectXy, |w| {
            rect.write(w)?;
            rx.write(w)?;
            ry.write(w)?;
            paint.write(w)
        });
        self.sink.draw_round_rect_xy(rect, rx, ry, paint);
    }

    fn draw_round_rect_difference(&mut self, outer: &RoundRect, inner: &RoundRect, paint: &Paint) {
        self.command(Opcode::DrawRoundRectDifference, |w| {
            outer.write(w)?;
            inner.write(w)?;
            paint.write(w)
        });
        self.sink.draw_round_rect_difference(outer, inner, paint);
    }

    fn draw_region(&mut self, region: &Region, paint: &Paint) {
        self.command(Opcode::DrawRegion, |w| {
            region.write(w)?;
            paint.write(w)
        });
        self.sink.draw_region(region, paint);
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.command(Opcode::DrawPath, |w| {
            path.write(w)?;
            paint.write(w)
        });
        self.sink.draw_path(path, paint);
    }

    fn draw_image(&mut self, image: &Image, x: f32, y: f32, paint: Option<&Paint>) {
        self.command(Opcode::DrawImage, |w| {
            image.write(w)?;
            x.write(w)?;
            y.write(w)?;
            paint.cloned().write(w)
        });
        self.sink.draw_image(image, x, y, paint);
    }

    fn draw_image_rect(&mut self, image: &Image, dst: &Rect, paint: Option<&Paint>) {
        self.command(Opcode::DrawImageRect, |w| {
            image.write(w)?;
            dst.write(w)?;
            paint.cloned().write(w)
        });
        self.sink.draw_image_rect(image, dst, paint);
    }

    fn draw_image_rect_src(
        &mut self,
        image: &Image,
        src: Option<&Rect>,
        dst: &Rect,
        paint: Option<&Paint>,
    ) {
        self.command(Opcode::DrawImageRectSrc, |w| {
            image.write(w)?;
            src.copied().write(w)?;
            dst.write(w)?;
            paint.cloned().write(w)
        });
        self.sink.draw_image_rect_src(image, src, dst, paint);
    }

    fn draw_image_lattice(
        &mut self,
        image: &Image,
        lattice: &Lattice,
        dst: &Rect,
        paint: Option<&Paint>,
    ) {
        self.command(Opcode::DrawImageLattice, |w| {
            image.write(w)?;
            lattice.write(w)?;
            dst.write(w)?;
            paint.cloned().write(w)
        });
        self.sink.draw_image_lattice(image, lattice, dst, paint);
    }

    fn draw_image_nine(&mut self, image: &Image, center: &IRect, dst: &Rect, paint: Option<&Paint>) {
        self.command(Opcode::DrawImageNine, |w| {
            image.write(w)?;
            center.write(w)?;
            dst.write(w)?;
            paint.cloned().write(w)
        });
        self.sink.draw_image_nine(image, center, dst, paint);
    }

    fn draw_picture(&mut self, picture: &Picture) {
        self.command(Opcode::DrawPicture, |w| picture.write(w));
        self.sink.draw_picture(picture);
    }

    fn draw_picture_matrix(
        &mut self,
        picture: &Picture,
        matrix: Option<&Matrix>,
        paint: Option<&Paint>,
    ) {
        self.command(Opcode::DrawPictureMatrix, |w| {
            picture.write(w)?;
            matrix.copied().write(w)?;
            paint.cloned().write(w)
        });
        self.sink.draw_picture_matrix(picture, matrix, paint);
    }

    fn draw_drawable(&mut self, drawable: &Drawable, matrix: Option<&Matrix>) {
        self.command(Opcode::DrawDrawable, |w| {
            drawable.write(w)?;
            matrix.copied().write(w)
        });
        self.sink.draw_drawable(drawable, matrix);
    }

    fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint) {
        self.command(Opcode::DrawTextBlob, |w| {
            blob.write(w)?;
            x.write(w)?;
            y.write(w)?;
            paint.write(w)
        });
        self.sink.draw_text_blob(blob, x, y, paint);
    }

    fn draw_vertices(&mut self, vertices: &Vertices, mode: BlendMode, paint: &Paint) {
        self.command(Opcode::DrawVertices, |w| {
            vertices.write(w)?;
            mode.write(w)?;
            paint.write(w)
        });
        self.sink.draw_vertices(vertices, mode, paint);
    }

    fn draw_patch(
        &mut self,
        cubics: &[Point; 12],
        colors: Option<&[Color; 4]>,
        tex_coords: Option<&[Point; 4]>,
        mode: BlendMode,
        paint: &Paint,
    ) {
        self.command(Opcode::DrawPatch, |w| {
            write_point_array(w, Some(cubics.as_slice()))?;
            write_color_array(w, colors.map(|c| c.as_slice()))?;
            write_point_array(w, tex_coords.map(|t| t.as_slice()))?;
            mode.write(w)?;
            paint.write(w)
        });
        self.sink.draw_patch(cubics, colors, tex_coords, mode, paint);
    }

    fn draw_atlas(
        &mut self,
        atlas: &Image,
        transforms: &[RsTransform],
        tex_rects: &[Rect],
        colors: Option<&[Color]>,
        mode: BlendMode,
        cull_rect: Option<&Rect>,
        paint: Option<&Paint>,
    ) {
        self.command(Opcode::DrawAtlas, |w| {
            atlas.write(w)?;
            write_rs_transform_array(w, Some(transforms))?;
            write_rect_array(w, Some(tex_rects))?;
            write_color_array(w, colors)?;
            mode.write(w)?;
            cull_rect.copied().write(w)?;
            paint.cloned().write(w)
        });
        self.sink
            .draw_atlas(atlas, transforms, tex_rects, colors, mode, cull_rect, paint);
    }

    fn draw_annotation(&mut self, rect: &Rect, key: &str, value: Option<&Data>) {
        self.command(Opcode::DrawAnnotation, |w| {
            rect.write(w)?;
            w.write_str(key)?;
            value.cloned().write(w)
        });
        self.sink.draw_annotation(rect, key, value);
    }

    fn draw_url_annotation(&mut self, rect: &Rect, data: &Data) {
        self.command(Opcode::DrawUrlAnnotation, |w| {
            rect.write(w)?;
            data.write(w)
        });
        self.sink.draw_url_annotation(rect, data);
    }

    fn draw_named_destination(&mut self, point: Point, data: &Data) {
        self.command(Opcode::DrawNamedDestination, |w| {
            point.write(w)?;
            data.write(w)
        });
        self.sink.draw_named_destination(point, data);
    }

    fn draw_link_destination(&mut self, rect: &Rect, data: &Data) {
        self.command(Opcode::DrawLinkDestination, |w| {
            rect.write(w)?;
            data.write(w)
        });
        self.sink.draw_link_destination(rect, data);
    }

    // `draw_surface` is intentionally not overridden: the trait default
    // lowers it to a snapshot plus `draw_image`, which both encodes a
    // plain image draw and forwards one. The log never carries a surface.

    fn save_count(&self) -> i32 {
        self.sink.save_count()
    }

    fn total_matrix(&self) -> Matrix {
        self.sink.total_matrix()
    }

    fn device_clip_bounds(&self) -> Option<IRect> {
        self.sink.device_clip_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A sink that counts calls; detailed call equality lives in the
    /// integration tests against the reference sink.
    #[derive(Default)]
    struct CountingSink {
        calls: usize,
        saves: i32,
    }

    impl Canvas for CountingSink {
        fn save(&mut self) {
            self.calls += 1;
            self.saves += 1;
        }
        fn save_layer(&mut self, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn save_layer_bounded(&mut self, _: &Rect, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn save_layer_rec(&mut self, _: Option<&Rect>, _: Option<&Paint>, _: SaveLayerFlags) {
            self.calls += 1;
        }
        fn restore(&mut self) {
            self.calls += 1;
            self.saves -= 1;
        }
        fn restore_to_count(&mut self, _: i32) {
            self.calls += 1;
        }
        fn translate(&mut self, _: f32, _: f32) {
            self.calls += 1;
        }
        fn translate_point(&mut self, _: Point) {
            self.calls += 1;
        }
        fn scale(&mut self, _: f32) {
            self.calls += 1;
        }
        fn scale_xy(&mut self, _: f32, _: f32) {
            self.calls += 1;
        }
        fn scale_point(&mut self, _: Point) {
            self.calls += 1;
        }
        fn rotate_degrees(&mut self, _: f32) {
            self.calls += 1;
        }
        fn rotate_radians(&mut self, _: f32) {
            self.calls += 1;
        }
        fn skew(&mut self, _: f32, _: f32) {
            self.calls += 1;
        }
        fn skew_point(&mut self, _: Point) {
            self.calls += 1;
        }
        fn concat(&mut self, _: &Matrix) {
            self.calls += 1;
        }
        fn set_matrix(&mut self, _: &Matrix) {
            self.calls += 1;
        }
        fn reset_matrix(&mut self) {
            self.calls += 1;
        }
        fn clip_rect(&mut self, _: &Rect, _: ClipOp, _: bool) {
            self.calls += 1;
        }
        fn clip_round_rect(&mut self, _: &RoundRect, _: ClipOp, _: bool) {
            self.calls += 1;
        }
        fn clip_path(&mut self, _: &Path, _: ClipOp, _: bool) {
            self.calls += 1;
        }
        fn clip_region(&mut self, _: &Region, _: ClipOp) {
            self.calls += 1;
        }
        fn clear(&mut self, _: Color) {
            self.calls += 1;
        }
        fn discard(&mut self) {
            self.calls += 1;
        }
        fn flush(&mut self) {
            self.calls += 1;
        }
        fn draw_paint(&mut self, _: &Paint) {
            self.calls += 1;
        }
        fn draw_color(&mut self, _: Color, _: BlendMode) {
            self.calls += 1;
        }
        fn draw_line(&mut self, _: f32, _: f32, _: f32, _: f32, _: &Paint) {
            self.calls += 1;
        }
        fn draw_point(&mut self, _: f32, _: f32, _: &Paint) {
            self.calls += 1;
        }
        fn draw_points(&mut self, _: PointMode, _: &[Point], _: &Paint) {
            self.calls += 1;
        }
        fn draw_rect(&mut self, _: &Rect, _: &Paint) {
            self.calls += 1;
        }
        fn draw_rect_coords(&mut self, _: f32, _: f32, _: f32, _: f32, _: &Paint) {
            self.calls += 1;
        }
        fn draw_oval(&mut self, _: &Rect, _: &Paint) {
            self.calls += 1;
        }
        fn draw_circle(&mut self, _: f32, _: f32, _: f32, _: &Paint) {
            self.calls += 1;
        }
        fn draw_arc(&mut self, _: &Rect, _: f32, _: f32, _: bool, _: &Paint) {
            self.calls += 1;
        }
        fn draw_round_rect(&mut self, _: &RoundRect, _: &Paint) {
            self.calls += 1;
        }
        fn draw_round_rect_xy(&mut self, _: &Rect, _: f32, _: f32, _: &Paint) {
            self.calls += 1;
        }
        fn draw_round_rect_difference(&mut self, _: &RoundRect, _: &RoundRect, _: &Paint) {
            self.calls += 1;
        }
        fn draw_region(&mut self, _: &Region, _: &Paint) {
            self.calls += 1;
        }
        fn draw_path(&mut self, _: &Path, _: &Paint) {
            self.calls += 1;
        }
        fn draw_image(&mut self, _: &Image, _: f32, _: f32, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn draw_image_rect(&mut self, _: &Image, _: &Rect, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn draw_image_rect_src(&mut self, _: &Image, _: Option<&Rect>, _: &Rect, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn draw_image_lattice(&mut self, _: &Image, _: &Lattice, _: &Rect, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn draw_image_nine(&mut self, _: &Image, _: &IRect, _: &Rect, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn draw_picture(&mut self, _: &Picture) {
            self.calls += 1;
        }
        fn draw_picture_matrix(&mut self, _: &Picture, _: Option<&Matrix>, _: Option<&Paint>) {
            self.calls += 1;
        }
        fn draw_drawable(&mut self, _: &Drawable, _: Option<&Matrix>) {
            self.calls += 1;
        }
        fn draw_text_blob(&mut self, _: &TextBlob, _: f32, _: f32, _: &Paint) {
            self.calls += 1;
        }
        fn draw_vertices(&mut self, _: &Vertices, _: BlendMode, _: &Paint) {
            self.calls += 1;
        }
        fn draw_patch(
            &mut self,
            _: &[Point; 12],
            _: Option<&[Color; 4]>,
            _: Option<&[Point; 4]>,
            _: BlendMode,
            _: &Paint,
        ) {
            self.calls += 1;
        }
        fn draw_atlas(
            &mut self,
            _: &Image,
            _: &[RsTransform],
            _: &[Rect],
            _: Option<&[Color]>,
            _: BlendMode,
            _: Option<&Rect>,
            _: Option<&Paint>,
        ) {
            self.calls += 1;
        }
        fn draw_annotation(&mut self, _: &Rect, _: &str, _: Option<&Data>) {
            self.calls += 1;
        }
        fn draw_url_annotation(&mut self, _: &Rect, _: &Data) {
            self.calls += 1;
        }
        fn draw_named_destination(&mut self, _: Point, _: &Data) {
            self.calls += 1;
        }
        fn draw_link_destination(&mut self, _: &Rect, _: &Data) {
            self.calls += 1;
        }
        fn save_count(&self) -> i32 {
            self.saves + 1
        }
    }

    #[test]
    fn forwards_synchronously() {
        let mut sink = CountingSink::default();
        let mut recorder = Recorder::<RawWriter>::new(&mut sink);
        recorder.save();
        recorder.translate(1.0, 2.0);
        assert_eq!(recorder.save_count(), 2, "queries reflect the live sink");
        recorder.restore();
        assert_eq!(recorder.save_count(), 1, "restore reached the sink");
        drop(recorder);
        assert_eq!(sink.calls, 3, "every call was forwarded exactly once");
    }

    #[test]
    fn snapshot_excludes_later_writes() {
        let mut sink = CountingSink::default();
        let mut recorder = Recorder::<RawWriter>::new(&mut sink);
        recorder.save();
        let early = recorder.snapshot().expect("clean log");
        recorder.restore();
        let late = recorder.snapshot().expect("clean log");
        assert_eq!(early.len(), 1, "one opcode byte recorded");
        assert_eq!(late.len(), 2, "two opcode bytes recorded");
        assert_eq!(
            early.bytes(),
            &[Opcode::Save as u8],
            "snapshot is a frozen copy"
        );
    }

    #[test]
    fn reset_starts_an_empty_log() {
        let mut sink = CountingSink::default();
        let mut recorder = Recorder::<RawWriter>::new(&mut sink);
        recorder.save();
        recorder.reset();
        assert_eq!(recorder.bytes_recorded(), 0, "log discarded");
        let buffer = recorder.snapshot().expect("clean log");
        assert!(buffer.is_empty(), "fresh recording is empty");
    }

    #[test]
    fn lowered_surface_draw_records_an_image() {
        use scrawl_canvas::Surface;

        let mut sink = CountingSink::default();
        let mut recorder = Recorder::<RawWriter>::new(&mut sink);
        let surface = Surface::new(Image::new(1, 1, [0_u8, 0, 0, 0].as_slice()));
        recorder.draw_surface(&surface, 3.0, 4.0, None);

        let buffer = recorder.finish().expect("clean log");
        assert_eq!(
            buffer.bytes()[0],
            Opcode::DrawImage as u8,
            "surface draws are lowered before logging"
        );
        assert_eq!(sink.calls, 1, "the lowered draw was forwarded");
    }
}
