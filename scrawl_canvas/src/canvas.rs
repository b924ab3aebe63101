// Copyright 2026 the Scrawl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing-surface contract.

use bitflags::bitflags;

use crate::color::Color;
use crate::geom::{IRect, Matrix, Point, Rect, RoundRect, RsTransform};
use crate::object::{Data, Drawable, Image, Picture, Surface, TextBlob, Vertices};
use crate::paint::{BlendMode, Paint};
use crate::path::Path;
use crate::region::{Lattice, Region};

/// How a clip shape combines with the existing clip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ClipOp {
    /// Intersect the clip with the shape.
    #[default]
    Intersect = 0,
    /// Subtract the shape from the clip.
    Difference = 1,
}

impl ClipOp {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Intersect),
            1 => Some(Self::Difference),
            _ => None,
        }
    }
}

/// How [`Canvas::draw_points`] interprets its point array.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PointMode {
    /// Each point is drawn separately.
    #[default]
    Points = 0,
    /// Consecutive pairs form line segments.
    Lines = 1,
    /// Points form an open polygon.
    Polygon = 2,
}

impl PointMode {
    /// Decode from the single-byte wire representation.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Points),
            1 => Some(Self::Lines),
            2 => Some(Self::Polygon),
            _ => None,
        }
    }
}

bitflags! {
    /// Behavior flags for [`Canvas::save_layer_rec`].
    ///
    /// Encoded on the wire as a u32 scalar.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct SaveLayerFlags: u32 {
        /// The layer's initial contents are the prior layer's contents
        /// rather than transparent pixels.
        const INIT_WITH_PREVIOUS = 1 << 0;
        /// The layer may be rendered at full resolution regardless of the
        /// current transform.
        const FULL_SCREEN = 1 << 1;
    }
}

/// The drawing-surface contract: one method per distinct operation
/// signature.
///
/// Overloads of the same verb with different operand shapes are distinct
/// methods (`draw_rect` vs `draw_rect_coords`, `scale` vs `scale_xy`, ...)
/// because each shape is a distinct command on the wire. Implementations
/// must treat the method set as closed; the recording and replay layers
/// depend on every call being representable.
///
/// Drawing state (transform, clip, save stack) is stateful and ordered:
/// callers may assume each method takes effect before the next call is
/// observed.
pub trait Canvas {
    // --- Save stack ---

    /// Push the current state onto the save stack.
    fn save(&mut self);
    /// Push a new compositing layer with an optional paint.
    fn save_layer(&mut self, paint: Option<&Paint>);
    /// Push a new compositing layer bounded by `bounds`.
    fn save_layer_bounded(&mut self, bounds: &Rect, paint: Option<&Paint>);
    /// Push a new compositing layer with explicit behavior flags.
    fn save_layer_rec(&mut self, bounds: Option<&Rect>, paint: Option<&Paint>, flags: SaveLayerFlags);
    /// Pop the most recent save or layer.
    fn restore(&mut self);
    /// Pop until the save stack depth equals `count`.
    fn restore_to_count(&mut self, count: i32);

    // --- Transform ---

    /// Translate by `(dx, dy)`.
    fn translate(&mut self, dx: f32, dy: f32);
    /// Translate by a point's components.
    fn translate_point(&mut self, d: Point);
    /// Scale uniformly.
    fn scale(&mut self, s: f32);
    /// Scale by separate X/Y factors.
    fn scale_xy(&mut self, sx: f32, sy: f32);
    /// Scale by a point's components.
    fn scale_point(&mut self, s: Point);
    /// Rotate about the origin, in degrees.
    fn rotate_degrees(&mut self, degrees: f32);
    /// Rotate about the origin, in radians.
    fn rotate_radians(&mut self, radians: f32);
    /// Skew along the X and Y axes.
    fn skew(&mut self, kx: f32, ky: f32);
    /// Skew by a point's components.
    fn skew_point(&mut self, k: Point);
    /// Pre-concatenate a matrix onto the current transform.
    fn concat(&mut self, matrix: &Matrix);
    /// Replace the current transform.
    fn set_matrix(&mut self, matrix: &Matrix);
    /// Reset the current transform to identity.
    fn reset_matrix(&mut self);

    // --- Clip ---

    /// Combine a rectangle with the current clip.
    fn clip_rect(&mut self, rect: &Rect, op: ClipOp, antialias: bool);
    /// Combine a rounded rectangle with the current clip.
    fn clip_round_rect(&mut self, rrect: &RoundRect, op: ClipOp, antialias: bool);
    /// Combine a path with the current clip.
    fn clip_path(&mut self, path: &Path, op: ClipOp, antialias: bool);
    /// Combine a device-space region with the current clip.
    fn clip_region(&mut self, region: &Region, op: ClipOp);

    // --- Whole-surface operations ---

    /// Replace every pixel inside the clip with `color`.
    fn clear(&mut self, color: Color);
    /// Discard all pending and committed contents of the target.
    fn discard(&mut self);
    /// Flush pending work to the backing device.
    fn flush(&mut self);

    // --- Draw ---

    /// Fill the clip with the paint.
    fn draw_paint(&mut self, paint: &Paint);
    /// Fill the clip with a color and blend mode.
    fn draw_color(&mut self, color: Color, mode: BlendMode);
    /// Draw a line segment.
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: &Paint);
    /// Draw a single point.
    fn draw_point(&mut self, x: f32, y: f32, paint: &Paint);
    /// Draw a point array interpreted per `mode`.
    fn draw_points(&mut self, mode: PointMode, points: &[Point], paint: &Paint);
    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: &Rect, paint: &Paint);
    /// Draw a rectangle given as origin and size.
    fn draw_rect_coords(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint);
    /// Draw the oval inscribed in `rect`.
    fn draw_oval(&mut self, rect: &Rect, paint: &Paint);
    /// Draw a circle.
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);
    /// Draw an arc of the oval inscribed in `oval`.
    fn draw_arc(&mut self, oval: &Rect, start_angle: f32, sweep_angle: f32, use_center: bool, paint: &Paint);
    /// Draw a rounded rectangle.
    fn draw_round_rect(&mut self, rrect: &RoundRect, paint: &Paint);
    /// Draw a rounded rectangle given as a rect plus uniform corner radii.
    fn draw_round_rect_xy(&mut self, rect: &Rect, rx: f32, ry: f32, paint: &Paint);
    /// Fill the area between two nested rounded rectangles.
    fn draw_round_rect_difference(&mut self, outer: &RoundRect, inner: &RoundRect, paint: &Paint);
    /// Draw a device-space region.
    fn draw_region(&mut self, region: &Region, paint: &Paint);
    /// Draw a path.
    fn draw_path(&mut self, path: &Path, paint: &Paint);
    /// Draw an image with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, image: &Image, x: f32, y: f32, paint: Option<&Paint>);
    /// Draw an image scaled into `dst`.
    fn draw_image_rect(&mut self, image: &Image, dst: &Rect, paint: Option<&Paint>);
    /// Draw a sub-rectangle of an image scaled into `dst`.
    fn draw_image_rect_src(&mut self, image: &Image, src: Option<&Rect>, dst: &Rect, paint: Option<&Paint>);
    /// Draw an image stretched through a lattice into `dst`.
    fn draw_image_lattice(&mut self, image: &Image, lattice: &Lattice, dst: &Rect, paint: Option<&Paint>);
    /// Draw an image as a nine-patch with the given stretchable center.
    fn draw_image_nine(&mut self, image: &Image, center: &IRect, dst: &Rect, paint: Option<&Paint>);
    /// Replay a picture's command stream.
    fn draw_picture(&mut self, picture: &Picture);
    /// Replay a picture under an optional transform and paint.
    fn draw_picture_matrix(&mut self, picture: &Picture, matrix: Option<&Matrix>, paint: Option<&Paint>);
    /// Draw a custom drawable under an optional transform.
    fn draw_drawable(&mut self, drawable: &Drawable, matrix: Option<&Matrix>);
    /// Draw a shaped text blob at `(x, y)`.
    fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint);
    /// Draw a triangle mesh.
    fn draw_vertices(&mut self, vertices: &Vertices, mode: BlendMode, paint: &Paint);
    /// Draw a Coons patch.
    fn draw_patch(
        &mut self,
        cubics: &[Point; 12],
        colors: Option<&[Color; 4]>,
        tex_coords: Option<&[Point; 4]>,
        mode: BlendMode,
        paint: &Paint,
    );
    /// Draw sprites from an atlas image.
    fn draw_atlas(
        &mut self,
        atlas: &Image,
        transforms: &[RsTransform],
        tex_rects: &[Rect],
        colors: Option<&[Color]>,
        mode: BlendMode,
        cull_rect: Option<&Rect>,
        paint: Option<&Paint>,
    );
    /// Attach a keyed annotation payload to a rectangle.
    fn draw_annotation(&mut self, rect: &Rect, key: &str, value: Option<&Data>);
    /// Attach a URL annotation to a rectangle.
    fn draw_url_annotation(&mut self, rect: &Rect, data: &Data);
    /// Mark a named destination point for link annotations.
    fn draw_named_destination(&mut self, point: Point, data: &Data);
    /// Attach a link-to-destination annotation to a rectangle.
    fn draw_link_destination(&mut self, rect: &Rect, data: &Data);

    /// Draw another surface's current contents at `(x, y)`.
    ///
    /// The default lowers the surface to an image snapshot and forwards to
    /// [`Canvas::draw_image`]; GPU-backed implementations can override this
    /// with a direct copy. The lowering also makes the operation loggable:
    /// a recorder inherits this default, so the command stream carries a
    /// plain image draw.
    fn draw_surface(&mut self, surface: &Surface, x: f32, y: f32, paint: Option<&Paint>) {
        let snapshot = surface.snapshot();
        self.draw_image(&snapshot, x, y, paint);
    }

    // --- State queries ---

    /// Current save stack depth. A freshly constructed canvas reports 1.
    fn save_count(&self) -> i32 {
        1
    }

    /// The current total transform.
    fn total_matrix(&self) -> Matrix {
        Matrix::IDENTITY
    }

    /// Conservative device-space bounds of the current clip, or `None`
    /// when the clip is empty or the canvas does not track it.
    fn device_clip_bounds(&self) -> Option<IRect> {
        None
    }
}
