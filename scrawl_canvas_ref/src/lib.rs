// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrawl Canvas Reference Sink.
//!
//! This crate provides a small, stateful implementation of
//! [`Canvas`] for **call tracing and state inspection**.
//!
//! It is intentionally *not* a reference renderer:
//! - It does **not** rasterize to pixels.
//! - It does **not** establish golden rendering behavior across sinks.
//! - It is intended primarily for tests and debugging that want to assert
//!   on the exact sequence of canvas calls and on the transform/clip state
//!   at the time each call arrives.
//!
//! Every call is logged as an owned, comparable [`CanvasCall`], so a test
//! can drive two sinks through different routes (say, directly and through
//! a record/replay cycle) and assert the logs are equal.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Shape;
use scrawl_canvas::{
    BlendMode, Canvas, ClipOp, Color, Data, Drawable, IRect, Image, Lattice, Matrix, Paint, Path,
    Picture, Point, PointMode, Rect, Region, RoundRect, RsTransform, SaveLayerFlags, TextBlob,
    Vertices,
};

/// One canvas call with owned operands.
///
/// Borrowed operands are cloned on capture; `Arc`-backed objects make that
/// cheap. Variants correspond one-to-one with [`Canvas`] methods, except
/// that surface draws never appear: the default lowering turns them into
/// [`CanvasCall::DrawImage`] before any sink sees them.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCall {
    /// `save` was called.
    Save,
    /// `save_layer` was called.
    SaveLayer {
        /// Layer paint, if any.
        paint: Option<Paint>,
    },
    /// `save_layer_bounded` was called.
    SaveLayerBounded {
        /// Layer bounds hint.
        bounds: Rect,
        /// Layer paint, if any.
        paint: Option<Paint>,
    },
    /// `save_layer_rec` was called.
    SaveLayerRec {
        /// Layer bounds hint, if any.
        bounds: Option<Rect>,
        /// Layer paint, if any.
        paint: Option<Paint>,
        /// Layer behavior flags.
        flags: SaveLayerFlags,
    },
    /// `restore` was called.
    Restore,
    /// `restore_to_count` was called.
    RestoreToCount {
        /// Target save stack depth.
        count: i32,
    },
    /// `translate` was called.
    Translate {
        /// X offset.
        dx: f32,
        /// Y offset.
        dy: f32,
    },
    /// `translate_point` was called.
    TranslatePoint {
        /// Offset.
        d: Point,
    },
    /// `scale` was called.
    Scale {
        /// Uniform scale factor.
        s: f32,
    },
    /// `scale_xy` was called.
    ScaleXy {
        /// X scale factor.
        sx: f32,
        /// Y scale factor.
        sy: f32,
    },
    /// `scale_point` was called.
    ScalePoint {
        /// Per-axis scale factors.
        s: Point,
    },
    /// `rotate_degrees` was called.
    RotateDegrees {
        /// Rotation in degrees.
        degrees: f32,
    },
    /// `rotate_radians` was called.
    RotateRadians {
        /// Rotation in radians.
        radians: f32,
    },
    /// `skew` was called.
    Skew {
        /// X skew factor.
        kx: f32,
        /// Y skew factor.
        ky: f32,
    },
    /// `skew_point` was called.
    SkewPoint {
        /// Per-axis skew factors.
        k: Point,
    },
    /// `concat` was called.
    Concat {
        /// Matrix that was pre-concatenated.
        matrix: Matrix,
    },
    /// `set_matrix` was called.
    SetMatrix {
        /// Replacement transform.
        matrix: Matrix,
    },
    /// `reset_matrix` was called.
    ResetMatrix,
    /// `clip_rect` was called.
    ClipRect {
        /// Clip rectangle.
        rect: Rect,
        /// Combine operation.
        op: ClipOp,
        /// Antialiased clip edge requested.
        antialias: bool,
    },
    /// `clip_round_rect` was called.
    ClipRoundRect {
        /// Clip rounded rectangle.
        rrect: RoundRect,
        /// Combine operation.
        op: ClipOp,
        /// Antialiased clip edge requested.
        antialias: bool,
    },
    /// `clip_path` was called.
    ClipPath {
        /// Clip path.
        path: Path,
        /// Combine operation.
        op: ClipOp,
        /// Antialiased clip edge requested.
        antialias: bool,
    },
    /// `clip_region` was called.
    ClipRegion {
        /// Device-space clip region.
        region: Region,
        /// Combine operation.
        op: ClipOp,
    },
    /// `clear` was called.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// `discard` was called.
    Discard,
    /// `flush` was called.
    Flush,
    /// `draw_paint` was called.
    DrawPaint {
        /// Paint applied to the clip.
        paint: Paint,
    },
    /// `draw_color` was called.
    DrawColor {
        /// Fill color.
        color: Color,
        /// Blend mode.
        mode: BlendMode,
    },
    /// `draw_line` was called.
    DrawLine {
        /// Start X.
        x0: f32,
        /// Start Y.
        y0: f32,
        /// End X.
        x1: f32,
        /// End Y.
        y1: f32,
        /// Paint.
        paint: Paint,
    },
    /// `draw_point` was called.
    DrawPoint {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
        /// Paint.
        paint: Paint,
    },
    /// `draw_points` was called.
    DrawPoints {
        /// Interpretation of the point array.
        mode: PointMode,
        /// The points.
        points: Vec<Point>,
        /// Paint.
        paint: Paint,
    },
    /// `draw_rect` was called.
    DrawRect {
        /// Rectangle.
        rect: Rect,
        /// Paint.
        paint: Paint,
    },
    /// `draw_rect_coords` was called.
    DrawRectCoords {
        /// Origin X.
        x: f32,
        /// Origin Y.
        y: f32,
        /// Width.
        w: f32,
        /// Height.
        h: f32,
        /// Paint.
        paint: Paint,
    },
    /// `draw_oval` was called.
    DrawOval {
        /// Bounding rectangle of the oval.
        rect: Rect,
        /// Paint.
        paint: Paint,
    },
    /// `draw_circle` was called.
    DrawCircle {
        /// Center X.
        cx: f32,
        /// Center Y.
        cy: f32,
        /// Radius.
        radius: f32,
        /// Paint.
        paint: Paint,
    },
    /// `draw_arc` was called.
    DrawArc {
        /// Bounding rectangle of the full oval.
        oval: Rect,
        /// Start angle in degrees.
        start_angle: f32,
        /// Sweep angle in degrees.
        sweep_angle: f32,
        /// Wedge rather than open arc.
        use_center: bool,
        /// Paint.
        paint: Paint,
    },
    /// `draw_round_rect` was called.
    DrawRoundRect {
        /// Rounded rectangle.
        rrect: RoundRect,
        /// Paint.
        paint: Paint,
    },
    /// `draw_round_rect_xy` was called.
    DrawRoundRectXy {
        /// Rectangle.
        rect: Rect,
        /// Corner radius along X.
        rx: f32,
        /// Corner radius along Y.
        ry: f32,
        /// Paint.
        paint: Paint,
    },
    /// `draw_round_rect_difference` was called.
    DrawRoundRectDifference {
        /// Outer rounded rectangle.
        outer: RoundRect,
        /// Inner rounded rectangle.
        inner: RoundRect,
        /// Paint.
        paint: Paint,
    },
    /// `draw_region` was called.
    DrawRegion {
        /// Device-space region.
        region: Region,
        /// Paint.
        paint: Paint,
    },
    /// `draw_path` was called.
    DrawPath {
        /// Path.
        path: Path,
        /// Paint.
        paint: Paint,
    },
    /// `draw_image` was called.
    DrawImage {
        /// Image.
        image: Image,
        /// Destination X.
        x: f32,
        /// Destination Y.
        y: f32,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_image_rect` was called.
    DrawImageRect {
        /// Image.
        image: Image,
        /// Destination rectangle.
        dst: Rect,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_image_rect_src` was called.
    DrawImageRectSrc {
        /// Image.
        image: Image,
        /// Source sub-rectangle, if any.
        src: Option<Rect>,
        /// Destination rectangle.
        dst: Rect,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_image_lattice` was called.
    DrawImageLattice {
        /// Image.
        image: Image,
        /// Stretch lattice.
        lattice: Lattice,
        /// Destination rectangle.
        dst: Rect,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_image_nine` was called.
    DrawImageNine {
        /// Image.
        image: Image,
        /// Stretchable center in image coordinates.
        center: IRect,
        /// Destination rectangle.
        dst: Rect,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_picture` was called.
    DrawPicture {
        /// Picture.
        picture: Picture,
    },
    /// `draw_picture_matrix` was called.
    DrawPictureMatrix {
        /// Picture.
        picture: Picture,
        /// Transform under which to replay, if any.
        matrix: Option<Matrix>,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_drawable` was called.
    DrawDrawable {
        /// Drawable.
        drawable: Drawable,
        /// Transform under which to draw, if any.
        matrix: Option<Matrix>,
    },
    /// `draw_text_blob` was called.
    DrawTextBlob {
        /// Shaped text.
        blob: TextBlob,
        /// Baseline origin X.
        x: f32,
        /// Baseline origin Y.
        y: f32,
        /// Paint.
        paint: Paint,
    },
    /// `draw_vertices` was called.
    DrawVertices {
        /// Triangle mesh.
        vertices: Vertices,
        /// Blend mode between mesh colors and paint.
        mode: BlendMode,
        /// Paint.
        paint: Paint,
    },
    /// `draw_patch` was called.
    DrawPatch {
        /// Twelve cubic control points.
        cubics: [Point; 12],
        /// Corner colors, if any.
        colors: Option<[Color; 4]>,
        /// Corner texture coordinates, if any.
        tex_coords: Option<[Point; 4]>,
        /// Blend mode between colors and paint.
        mode: BlendMode,
        /// Paint.
        paint: Paint,
    },
    /// `draw_atlas` was called.
    DrawAtlas {
        /// Atlas image.
        atlas: Image,
        /// Per-sprite transforms.
        transforms: Vec<RsTransform>,
        /// Per-sprite texture rectangles.
        tex_rects: Vec<Rect>,
        /// Per-sprite colors, if any.
        colors: Option<Vec<Color>>,
        /// Blend mode between sprite colors and paint.
        mode: BlendMode,
        /// Cull rectangle hint, if any.
        cull_rect: Option<Rect>,
        /// Paint, if any.
        paint: Option<Paint>,
    },
    /// `draw_annotation` was called.
    DrawAnnotation {
        /// Annotated rectangle.
        rect: Rect,
        /// Annotation key.
        key: String,
        /// Annotation payload, if any.
        value: Option<Data>,
    },
    /// `draw_url_annotation` was called.
    DrawUrlAnnotation {
        /// Annotated rectangle.
        rect: Rect,
        /// URL payload.
        data: Data,
    },
    /// `draw_named_destination` was called.
    DrawNamedDestination {
        /// Destination point.
        point: Point,
        /// Destination name payload.
        data: Data,
    },
    /// `draw_link_destination` was called.
    DrawLinkDestination {
        /// Annotated rectangle.
        rect: Rect,
        /// Destination name payload.
        data: Data,
    },
}

/// Transform and clip state restored by `restore`.
#[derive(Clone, Debug)]
struct SavedState {
    matrix: Matrix,
    clip: Option<IRect>,
}

/// Call-tracing implementation of [`Canvas`].
///
/// This sink:
/// - Logs every call as an owned [`CanvasCall`], in order,
/// - Tracks the transform and a conservative device-space clip so the
///   state queries answer truthfully,
/// - Never touches pixels.
///
/// The clip tracking is deliberately coarse: `Intersect` clips shrink the
/// tracked bounds to the clip shape's transformed bounding box, while
/// `Difference` clips leave them unchanged. That matches the contract of
/// [`Canvas::device_clip_bounds`], which only promises a conservative
/// bound.
#[derive(Debug, Default)]
pub struct CallSink {
    calls: Vec<CanvasCall>,
    matrix: Matrix,
    /// `None` means unclipped; `Some` with an empty rect means clipped out.
    clip: Option<IRect>,
    stack: Vec<SavedState>,
}

impl CallSink {
    /// Create an empty sink with identity transform and no clip.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls received so far, in order.
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Take the call log, leaving the sink's state intact.
    pub fn take_calls(&mut self) -> Vec<CanvasCall> {
        core::mem::take(&mut self.calls)
    }

    /// Clear the call log but keep transform and clip state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn push_state(&mut self) {
        self.stack.push(SavedState {
            matrix: self.matrix,
            clip: self.clip,
        });
    }

    fn pop_state(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.matrix = saved.matrix;
            self.clip = saved.clip;
        }
    }

    /// Intersect the tracked clip with a device-space bound.
    fn intersect_clip(&mut self, bounds: IRect) {
        self.clip = Some(match self.clip {
            None => bounds,
            // An already-empty intersection stays pinned at empty.
            Some(clip) => clip.intersect(&bounds).unwrap_or(IRect::new(0, 0, 0, 0)),
        });
    }

    /// Map a user-space rectangle through the current transform and round
    /// the resulting bounding box outward to device pixels.
    fn device_bounds(&self, rect: &Rect) -> IRect {
        match self.matrix.to_kurbo() {
            Some(affine) => round_out(affine.transform_rect_bbox(rect.to_kurbo())),
            // Perspective transforms are not tracked; fall back to the
            // untransformed bounds, which keeps the result conservative
            // for the tests this sink serves.
            None => round_out(rect.to_kurbo()),
        }
    }
}

/// Round a kurbo rectangle outward to integer device coordinates.
#[expect(
    clippy::cast_possible_truncation,
    reason = "coordinates are clamped into i32 range before the cast"
)]
fn round_out(r: kurbo::Rect) -> IRect {
    let clamp = |v: f64| v.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    IRect::new(
        clamp(r.x0.floor()) as i32,
        clamp(r.y0.floor()) as i32,
        clamp(r.x1.ceil()) as i32,
        clamp(r.y1.ceil()) as i32,
    )
}

impl Canvas for CallSink {
    fn save(&mut self) {
        self.push_state();
        self.calls.push(CanvasCall::Save);
    }

    fn save_layer(&mut self, paint: Option<&Paint>) {
        self.push_state();
        self.calls.push(CanvasCall::SaveLayer {
            paint: paint.cloned(),
        });
    }

    fn save_layer_bounded(&mut self, bounds: &Rect, paint: Option<&Paint>) {
        self.push_state();
        self.calls.push(CanvasCall::SaveLayerBounded {
            bounds: *bounds,
            paint: paint.cloned(),
        });
    }

    fn save_layer_rec(
        &mut self,
        bounds: Option<&Rect>,
        paint: Option<&Paint>,
        flags: SaveLayerFlags,
    ) {
        self.push_state();
        self.calls.push(CanvasCall::SaveLayerRec {
            bounds: bounds.copied(),
            paint: paint.cloned(),
            flags,
        });
    }

    fn restore(&mut self) {
        self.pop_state();
        self.calls.push(CanvasCall::Restore);
    }

    fn restore_to_count(&mut self, count: i32) {
        let target = count.max(1);
        while self.save_count() > target {
            self.pop_state();
        }
        self.calls.push(CanvasCall::RestoreToCount { count });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.matrix = self.matrix.concat(&Matrix::from_translate(dx, dy));
        self.calls.push(CanvasCall::Translate { dx, dy });
    }

    fn translate_point(&mut self, d: Point) {
        self.matrix = self.matrix.concat(&Matrix::from_translate(d.x, d.y));
        self.calls.push(CanvasCall::TranslatePoint { d });
    }

    fn scale(&mut self, s: f32) {
        self.matrix = self.matrix.concat(&Matrix::from_scale(s, s));
        self.calls.push(CanvasCall::Scale { s });
    }

    fn scale_xy(&mut self, sx: f32, sy: f32) {
        self.matrix = self.matrix.concat(&Matrix::from_scale(sx, sy));
        self.calls.push(CanvasCall::ScaleXy { sx, sy });
    }

    fn scale_point(&mut self, s: Point) {
        self.matrix = self.matrix.concat(&Matrix::from_scale(s.x, s.y));
        self.calls.push(CanvasCall::ScalePoint { s });
    }

    fn rotate_degrees(&mut self, degrees: f32) {
        self.matrix = self
            .matrix
            .concat(&Matrix::from_rotate(degrees.to_radians()));
        self.calls.push(CanvasCall::RotateDegrees { degrees });
    }

    fn rotate_radians(&mut self, radians: f32) {
        self.matrix = self.matrix.concat(&Matrix::from_rotate(radians));
        self.calls.push(CanvasCall::RotateRadians { radians });
    }

    fn skew(&mut self, kx: f32, ky: f32) {
        self.matrix = self.matrix.concat(&Matrix::from_skew(kx, ky));
        self.calls.push(CanvasCall::Skew { kx, ky });
    }

    fn skew_point(&mut self, k: Point) {
        self.matrix = self.matrix.concat(&Matrix::from_skew(k.x, k.y));
        self.calls.push(CanvasCall::SkewPoint { k });
    }

    fn concat(&mut self, matrix: &Matrix) {
        self.matrix = self.matrix.concat(matrix);
        self.calls.push(CanvasCall::Concat { matrix: *matrix });
    }

    fn set_matrix(&mut self, matrix: &Matrix) {
        self.matrix = *matrix;
        self.calls.push(CanvasCall::SetMatrix { matrix: *matrix });
    }

    fn reset_matrix(&mut self) {
        self.matrix = Matrix::IDENTITY;
        self.calls.push(CanvasCall::ResetMatrix);
    }

    fn clip_rect(&mut self, rect: &Rect, op: ClipOp, antialias: bool) {
        if op == ClipOp::Intersect {
            let bounds = self.device_bounds(rect);
            self.intersect_clip(bounds);
        }
        self.calls.push(CanvasCall::ClipRect {
            rect: *rect,
            op,
            antialias,
        });
    }

    fn clip_round_rect(&mut self, rrect: &RoundRect, op: ClipOp, antialias: bool) {
        if op == ClipOp::Intersect {
            let bounds = self.device_bounds(&rrect.rect);
            self.intersect_clip(bounds);
        }
        self.calls.push(CanvasCall::ClipRoundRect {
            rrect: *rrect,
            op,
            antialias,
        });
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "f64 bounding box narrows back to the f32 coordinate space"
    )]
    fn clip_path(&mut self, path: &Path, op: ClipOp, antialias: bool) {
        if op == ClipOp::Intersect {
            let bbox = path.to_kurbo().bounding_box();
            let bounds = self.device_bounds(&Rect::new(
                bbox.x0 as f32,
                bbox.y0 as f32,
                bbox.x1 as f32,
                bbox.y1 as f32,
            ));
            self.intersect_clip(bounds);
        }
        self.calls.push(CanvasCall::ClipPath {
            path: path.clone(),
            op,
            antialias,
        });
    }

    fn clip_region(&mut self, region: &Region, op: ClipOp) {
        if op == ClipOp::Intersect {
            // Regions are already device-space; the transform does not apply.
            let bounds = region_bounds(region);
            self.intersect_clip(bounds);
        }
        self.calls.push(CanvasCall::ClipRegion {
            region: region.clone(),
            op,
        });
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(CanvasCall::Clear { color });
    }

    fn discard(&mut self) {
        self.calls.push(CanvasCall::Discard);
    }

    fn flush(&mut self) {
        self.calls.push(CanvasCall::Flush);
    }

    fn draw_paint(&mut self, paint: &Paint) {
        self.calls.push(CanvasCall::DrawPaint {
            paint: paint.clone(),
        });
    }

    fn draw_color(&mut self, color: Color, mode: BlendMode) {
        self.calls.push(CanvasCall::DrawColor { color, mode });
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawLine {
            x0,
            y0,
            x1,
            y1,
            paint: paint.clone(),
        });
    }

    fn draw_point(&mut self, x: f32, y: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawPoint {
            x,
            y,
            paint: paint.clone(),
        });
    }

    fn draw_points(&mut self, mode: PointMode, points: &[Point], paint: &Paint) {
        self.calls.push(CanvasCall::DrawPoints {
            mode,
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRect {
            rect: *rect,
            paint: paint.clone(),
        });
    }

    fn draw_rect_coords(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRectCoords {
            x,
            y,
            w,
            h,
            paint: paint.clone(),
        });
    }

    fn draw_oval(&mut self, rect: &Rect, paint: &Paint) {
        self.calls.push(CanvasCall::DrawOval {
            rect: *rect,
            paint: paint.clone(),
        });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawCircle {
            cx,
            cy,
            radius,
            paint: paint.clone(),
        });
    }

    fn draw_arc(
        &mut self,
        oval: &Rect,
        start_angle: f32,
        sweep_angle: f32,
        use_center: bool,
        paint: &Paint,
    ) {
        self.calls.push(CanvasCall::DrawArc {
            oval: *oval,
            start_angle,
            sweep_angle,
            use_center,
            paint: paint.clone(),
        });
    }

    fn draw_round_rect(&mut self, rrect: &RoundRect, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRoundRect {
            rrect: *rrect,
            paint: paint.clone(),
        });
    }

    fn draw_round_rect_xy(&mut self, rect: &Rect, rx: f32, ry: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRoundRectXy {
            rect: *rect,
            rx,
            ry,
            paint: paint.clone(),
        });
    }

    fn draw_round_rect_difference(&mut self, outer: &RoundRect, inner: &RoundRect, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRoundRectDifference {
            outer: *outer,
            inner: *inner,
            paint: paint.clone(),
        });
    }

    fn draw_region(&mut self, region: &Region, paint: &Paint) {
        self.calls.push(CanvasCall::DrawRegion {
            region: region.clone(),
            paint: paint.clone(),
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.calls.push(CanvasCall::DrawPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn draw_image(&mut self, image: &Image, x: f32, y: f32, paint: Option<&Paint>) {
        self.calls.push(CanvasCall::DrawImage {
            image: image.clone(),
            x,
            y,
            paint: paint.cloned(),
        });
    }

    fn draw_image_rect(&mut self, image: &Image, dst: &Rect, paint: Option<&Paint>) {
        self.calls.push(CanvasCall::DrawImageRect {
            image: image.clone(),
            dst: *dst,
            paint: paint.cloned(),
        });
    }

    fn draw_image_rect_src(
        &mut self,
        image: &Image,
        src: Option<&Rect>,
        dst: &Rect,
        paint: Option<&Paint>,
    ) {
        self.calls.push(CanvasCall::DrawImageRectSrc {
            image: image.clone(),
            src: src.copied(),
            dst: *dst,
            paint: paint.cloned(),
        });
    }

    fn draw_image_lattice(
        &mut self,
        image: &Image,
        lattice: &Lattice,
        dst: &Rect,
        paint: Option<&Paint>,
    ) {
        self.calls.push(CanvasCall::DrawImageLattice {
            image: image.clone(),
            lattice: lattice.clone(),
            dst: *dst,
            paint: paint.cloned(),
        });
    }

    fn draw_image_nine(
        &mut self,
        image: &Image,
        center: &IRect,
        dst: &Rect,
        paint: Option<&Paint>,
    ) {
        self.calls.push(CanvasCall::DrawImageNine {
            image: image.clone(),
            center: *center,
            dst: *dst,
            paint: paint.cloned(),
        });
    }

    fn draw_picture(&mut self, picture: &Picture) {
        self.calls.push(CanvasCall::DrawPicture {
            picture: picture.clone(),
        });
    }

    fn draw_picture_matrix(
        &mut self,
        picture: &Picture,
        matrix: Option<&Matrix>,
        paint: Option<&Paint>,
    ) {
        self.calls.push(CanvasCall::DrawPictureMatrix {
            picture: picture.clone(),
            matrix: matrix.copied(),
            paint: paint.cloned(),
        });
    }

    fn draw_drawable(&mut self, drawable: &Drawable, matrix: Option<&Matrix>) {
        self.calls.push(CanvasCall::DrawDrawable {
            drawable: drawable.clone(),
            matrix: matrix.copied(),
        });
    }

    fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint) {
        self.calls.push(CanvasCall::DrawTextBlob {
            blob: blob.clone(),
            x,
            y,
            paint: paint.clone(),
        });
    }

    fn draw_vertices(&mut self, vertices: &Vertices, mode: BlendMode, paint: &Paint) {
        self.calls.push(CanvasCall::DrawVertices {
            vertices: vertices.clone(),
            mode,
            paint: paint.clone(),
        });
    }

    fn draw_patch(
        &mut self,
        cubics: &[Point; 12],
        colors: Option<&[Color; 4]>,
        tex_coords: Option<&[Point; 4]>,
        mode: BlendMode,
        paint: &Paint,
    ) {
        self.calls.push(CanvasCall::DrawPatch {
            cubics: *cubics,
            colors: colors.copied(),
            tex_coords: tex_coords.copied(),
            mode,
            paint: paint.clone(),
        });
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
        self.calls.push(CanvasCall::DrawAtlas {
            atlas: atlas.clone(),
            transforms: transforms.to_vec(),
            tex_rects: tex_rects.to_vec(),
            colors: colors.map(<[Color]>::to_vec),
            mode,
            cull_rect: cull_rect.copied(),
            paint: paint.cloned(),
        });
    }

    fn draw_annotation(&mut self, rect: &Rect, key: &str, value: Option<&Data>) {
        self.calls.push(CanvasCall::DrawAnnotation {
            rect: *rect,
            key: key.to_string(),
            value: value.cloned(),
        });
    }

    fn draw_url_annotation(&mut self, rect: &Rect, data: &Data) {
        self.calls.push(CanvasCall::DrawUrlAnnotation {
            rect: *rect,
            data: data.clone(),
        });
    }

    fn draw_named_destination(&mut self, point: Point, data: &Data) {
        self.calls.push(CanvasCall::DrawNamedDestination {
            point,
            data: data.clone(),
        });
    }

    fn draw_link_destination(&mut self, rect: &Rect, data: &Data) {
        self.calls.push(CanvasCall::DrawLinkDestination {
            rect: *rect,
            data: data.clone(),
        });
    }

    fn save_count(&self) -> i32 {
        i32::try_from(self.stack.len()).unwrap_or(i32::MAX).saturating_add(1)
    }

    fn total_matrix(&self) -> Matrix {
        self.matrix
    }

    fn device_clip_bounds(&self) -> Option<IRect> {
        match self.clip {
            Some(clip) if clip.is_empty() => None,
            other => other,
        }
    }
}

/// Union of a region's spans, or an empty rect for an empty region.
fn region_bounds(region: &Region) -> IRect {
    let mut spans = region.spans().iter();
    let Some(first) = spans.next() else {
        return IRect::new(0, 0, 0, 0);
    };
    spans.fold(*first, |acc, span| {
        IRect::new(
            acc.left.min(span.left),
            acc.top.min(span.top),
            acc.right.max(span.right),
            acc.bottom.max(span.bottom),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Paint {
        Paint::with_color(Color::RED)
    }

    #[test]
    fn logs_calls_in_order() {
        let mut sink = CallSink::new();
        sink.save();
        sink.draw_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &red());
        sink.restore();

        assert_eq!(
            sink.calls(),
            &[
                CanvasCall::Save,
                CanvasCall::DrawRect {
                    rect: Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
                    paint: red(),
                },
                CanvasCall::Restore,
            ],
            "call log preserves order and operands"
        );
    }

    #[test]
    fn save_restore_rewinds_transform() {
        let mut sink = CallSink::new();
        sink.translate(5.0, 0.0);
        sink.save();
        sink.scale(2.0);
        assert_ne!(sink.total_matrix(), Matrix::from_translate(5.0, 0.0));
        sink.restore();
        assert_eq!(
            sink.total_matrix(),
            Matrix::from_translate(5.0, 0.0),
            "restore rewound to the saved transform"
        );
    }

    #[test]
    fn save_count_reflects_stack_depth() {
        let mut sink = CallSink::new();
        assert_eq!(sink.save_count(), 1, "fresh sink reports depth 1");
        sink.save();
        sink.save_layer(None);
        assert_eq!(sink.save_count(), 3, "saves and layers both count");
        sink.restore_to_count(1);
        assert_eq!(sink.save_count(), 1, "restore_to_count pops to target");
    }

    #[test]
    fn intersect_clip_tracks_translated_bounds() {
        let mut sink = CallSink::new();
        sink.translate(10.0, 20.0);
        sink.clip_rect(
            &Rect::from_xywh(0.0, 0.0, 5.0, 5.0),
            ClipOp::Intersect,
            false,
        );
        assert_eq!(
            sink.device_clip_bounds(),
            Some(IRect::new(10, 20, 15, 25)),
            "clip bounds are transformed into device space"
        );
    }

    #[test]
    fn difference_clip_leaves_bounds_unchanged() {
        let mut sink = CallSink::new();
        sink.clip_rect(
            &Rect::from_xywh(0.0, 0.0, 50.0, 50.0),
            ClipOp::Intersect,
            false,
        );
        sink.clip_rect(
            &Rect::from_xywh(10.0, 10.0, 5.0, 5.0),
            ClipOp::Difference,
            false,
        );
        assert_eq!(
            sink.device_clip_bounds(),
            Some(IRect::new(0, 0, 50, 50)),
            "difference clips only ever shrink coverage, bounds stay valid"
        );
    }

    #[test]
    fn disjoint_intersection_reports_empty_clip() {
        let mut sink = CallSink::new();
        sink.clip_rect(
            &Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
            ClipOp::Intersect,
            false,
        );
        sink.clip_rect(
            &Rect::from_xywh(100.0, 100.0, 10.0, 10.0),
            ClipOp::Intersect,
            false,
        );
        assert_eq!(
            sink.device_clip_bounds(),
            None,
            "an empty clip reports no bounds"
        );
    }

    #[test]
    fn path_clip_tracks_the_path_bounds() {
        let mut sink = CallSink::new();
        sink.translate(100.0, 0.0);
        sink.clip_path(
            &Path::rect(Rect::from_xywh(1.0, 2.0, 3.0, 4.0)),
            ClipOp::Intersect,
            false,
        );
        assert_eq!(
            sink.device_clip_bounds(),
            Some(IRect::new(101, 2, 104, 6)),
            "path clips shrink the bounds to the transformed path bounding box"
        );
    }

    #[test]
    fn region_clip_ignores_transform() {
        let mut sink = CallSink::new();
        sink.translate(100.0, 100.0);
        sink.clip_region(
            &Region::from_rect(IRect::new(2, 3, 8, 9)),
            ClipOp::Intersect,
        );
        assert_eq!(
            sink.device_clip_bounds(),
            Some(IRect::new(2, 3, 8, 9)),
            "region clips are device-space"
        );
    }

    #[test]
    fn take_calls_empties_the_log_only() {
        let mut sink = CallSink::new();
        sink.translate(1.0, 2.0);
        let calls = sink.take_calls();
        assert_eq!(calls.len(), 1, "one call captured");
        assert!(sink.calls().is_empty(), "log drained");
        assert_eq!(
            sink.total_matrix(),
            Matrix::from_translate(1.0, 2.0),
            "state survives draining the log"
        );
    }
}
