//! GPU seam for the sprite renderer.
//!
//! The engine core never talks to the graphics driver directly; everything
//! goes through [`RenderBackend`]. The real implementation is
//! [`RaylibBackend`](crate::render::raylib::RaylibBackend); headless runs
//! and tests use [`RecordingBackend`](crate::render::recording::RecordingBackend).
//!
//! GPU calls are fire-and-forget: allocation failures are not surfaced here
//! but by the surrounding frame loop's driver error check.

use crate::resources::bitmapstore::Bitmap;

/// Opaque handle to a GPU-resident texture.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct TextureHandle(pub u32);

/// Per-tile transform for the generic emission path.
///
/// Applied in order: translate to the rotation pivot, rotate, translate by
/// the flip-aware origin correction, scale a unit quad up to the sprite
/// size (negative x scale mirrors horizontally).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTransform {
    pub translate: (f32, f32),
    /// Rotation about the pivot, in degrees.
    pub angle: f32,
    pub offset: (f32, f32),
    pub scale: (f32, f32),
}

/// Draw operations the sprite engine needs from a graphics backend.
///
/// Textures are uploaded with nearest-neighbor filtering, repeat wrap on
/// both axes and no mipmaps; pixel data arrives in blue-red byte order.
pub trait RenderBackend {
    /// Upload a bitmap and return its handle.
    fn create_texture(&mut self, bitmap: &Bitmap) -> TextureHandle;

    /// Release a texture. Callers guarantee it is not the bound texture.
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Make `texture` active for subsequent textured draws.
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Disable texturing and reset any draw transform to identity.
    fn unbind_texture(&mut self);

    /// Alpha applied to subsequent draws, in [0, 1].
    fn set_alpha(&mut self, alpha: f32);

    /// Axis-aligned textured quad from (x1, y1) to (x2, y2) with texture
    /// coordinates running from (0, 0) to (tiles_x, tiles_y); repeat wrap
    /// renders the visual repetition.
    fn tiled_quad(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, tiles_x: i32, tiles_y: i32);

    /// One unit quad under the full per-tile transform.
    fn unit_quad(&mut self, quad: &QuadTransform);

    /// Untextured rectangle; callers unbind texturing first.
    fn flat_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
}
