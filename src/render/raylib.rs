//! Raylib (rlgl) implementation of the render backend.
//!
//! Uses rlgl's immediate-mode quads so the emission paths map one-to-one
//! onto the batched fixed-function-style pipeline: absolute vertices for
//! the tiled paths, a matrix push/translate/rotate/scale/pop around a unit
//! quad for the generic path. Must only be used between `begin_drawing`
//! and `end_drawing` on the thread that owns the raylib context.
//!
//! Driver errors are not checked here; the frame loop treats a failed
//! context as fatal.

use raylib::ffi;

use crate::render::backend::{QuadTransform, RenderBackend, TextureHandle};
use crate::resources::bitmapstore::Bitmap;

// rlgl texture parameter values (rlgl.h).
const RL_TEXTURE_MAG_FILTER: i32 = 0x2800;
const RL_TEXTURE_MIN_FILTER: i32 = 0x2801;
const RL_TEXTURE_WRAP_S: i32 = 0x2802;
const RL_TEXTURE_WRAP_T: i32 = 0x2803;
const RL_TEXTURE_FILTER_NEAREST: i32 = 0x2600;
const RL_TEXTURE_WRAP_REPEAT: i32 = 0x2901;
const RL_QUADS: i32 = 0x0007;

/// Backend drawing through the active raylib context.
pub struct RaylibBackend {
    alpha: f32,
}

impl Default for RaylibBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RaylibBackend {
    pub fn new() -> Self {
        Self { alpha: 1.0 }
    }

    /// Emit the four corners of a unit quad, texcoord equal to position.
    ///
    /// Reverses the winding when exactly one scale axis is negative, so
    /// mirrored sprites keep a front-facing winding under backface culling.
    unsafe fn unit_corners(mirrored: bool) {
        let corners: [(f32, f32); 4] = if mirrored {
            [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        } else {
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
        };
        for (u, v) in corners {
            unsafe {
                ffi::rlTexCoord2f(u, v);
                ffi::rlVertex2f(u, v);
            }
        }
    }
}

impl RenderBackend for RaylibBackend {
    fn create_texture(&mut self, bitmap: &Bitmap) -> TextureHandle {
        // rlgl has no blue-red upload path; swizzle to RGBA on the way in.
        let mut pixels = bitmap.data().to_vec();
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        let id = unsafe {
            ffi::rlLoadTexture(
                pixels.as_ptr() as *const std::ffi::c_void,
                bitmap.width(),
                bitmap.height(),
                ffi::PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32,
                1,
            )
        };
        unsafe {
            ffi::rlTextureParameters(id, RL_TEXTURE_MIN_FILTER, RL_TEXTURE_FILTER_NEAREST);
            ffi::rlTextureParameters(id, RL_TEXTURE_MAG_FILTER, RL_TEXTURE_FILTER_NEAREST);
            ffi::rlTextureParameters(id, RL_TEXTURE_WRAP_S, RL_TEXTURE_WRAP_REPEAT);
            ffi::rlTextureParameters(id, RL_TEXTURE_WRAP_T, RL_TEXTURE_WRAP_REPEAT);
        }
        TextureHandle(id)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        unsafe {
            ffi::rlUnloadTexture(texture.0);
        }
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        unsafe {
            ffi::rlSetTexture(texture.0);
        }
    }

    fn unbind_texture(&mut self) {
        // Texture 0 falls back to rlgl's default white texture.
        unsafe {
            ffi::rlSetTexture(0);
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn tiled_quad(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, tiles_x: i32, tiles_y: i32) {
        let (u, v) = (tiles_x as f32, tiles_y as f32);
        let (x1, y1, x2, y2) = (x1 as f32, y1 as f32, x2 as f32, y2 as f32);
        unsafe {
            ffi::rlBegin(RL_QUADS);
            ffi::rlColor4f(1.0, 1.0, 1.0, self.alpha);
            ffi::rlTexCoord2f(0.0, 0.0);
            ffi::rlVertex2f(x1, y1);
            ffi::rlTexCoord2f(0.0, v);
            ffi::rlVertex2f(x1, y2);
            ffi::rlTexCoord2f(u, v);
            ffi::rlVertex2f(x2, y2);
            ffi::rlTexCoord2f(u, 0.0);
            ffi::rlVertex2f(x2, y1);
            ffi::rlEnd();
        }
    }

    fn unit_quad(&mut self, quad: &QuadTransform) {
        let mirrored = (quad.scale.0 < 0.0) != (quad.scale.1 < 0.0);
        unsafe {
            ffi::rlPushMatrix();
            ffi::rlTranslatef(quad.translate.0, quad.translate.1, 0.0);
            ffi::rlRotatef(quad.angle, 0.0, 0.0, 1.0);
            ffi::rlTranslatef(quad.offset.0, quad.offset.1, 0.0);
            ffi::rlScalef(quad.scale.0, quad.scale.1, 1.0);
            ffi::rlBegin(RL_QUADS);
            ffi::rlColor4f(1.0, 1.0, 1.0, self.alpha);
            Self::unit_corners(mirrored);
            ffi::rlEnd();
            ffi::rlPopMatrix();
        }
    }

    fn flat_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (x1, y1, x2, y2) = (x1 as f32, y1 as f32, x2 as f32, y2 as f32);
        unsafe {
            ffi::rlBegin(RL_QUADS);
            ffi::rlColor4f(1.0, 1.0, 1.0, self.alpha);
            ffi::rlVertex2f(x1, y1);
            ffi::rlVertex2f(x1, y2);
            ffi::rlVertex2f(x2, y2);
            ffi::rlVertex2f(x2, y1);
            ffi::rlEnd();
        }
    }
}
