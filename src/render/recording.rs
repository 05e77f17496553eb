//! Headless backend that records draw calls instead of issuing them.
//!
//! Used by the test suite and handy for debugging emission paths: every
//! operation lands in [`RecordingBackend::calls`] in order.

use crate::render::backend::{QuadTransform, RenderBackend, TextureHandle};
use crate::resources::bitmapstore::Bitmap;

/// One recorded backend operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    CreateTexture {
        texture: TextureHandle,
        bitmap_id: u64,
        width: i32,
        height: i32,
    },
    DeleteTexture(TextureHandle),
    BindTexture(TextureHandle),
    UnbindTexture,
    SetAlpha(f32),
    TiledQuad {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        tiles_x: i32,
        tiles_y: i32,
    },
    UnitQuad(QuadTransform),
    FlatRect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
}

/// Backend that records operations and allocates sequential handles.
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<DrawCall>,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emitted quads (textured or unit), ignoring state changes.
    pub fn quad_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::TiledQuad { .. } | DrawCall::UnitQuad(_)))
            .count()
    }

    /// Textures created minus textures deleted.
    pub fn live_textures(&self) -> isize {
        self.calls.iter().fold(0, |acc, c| match c {
            DrawCall::CreateTexture { .. } => acc + 1,
            DrawCall::DeleteTexture(_) => acc - 1,
            _ => acc,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn create_texture(&mut self, bitmap: &Bitmap) -> TextureHandle {
        self.next_handle += 1;
        let texture = TextureHandle(self.next_handle);
        self.calls.push(DrawCall::CreateTexture {
            texture,
            bitmap_id: bitmap.id(),
            width: bitmap.width(),
            height: bitmap.height(),
        });
        texture
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.calls.push(DrawCall::DeleteTexture(texture));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.calls.push(DrawCall::BindTexture(texture));
    }

    fn unbind_texture(&mut self) {
        self.calls.push(DrawCall::UnbindTexture);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.calls.push(DrawCall::SetAlpha(alpha));
    }

    fn tiled_quad(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, tiles_x: i32, tiles_y: i32) {
        self.calls.push(DrawCall::TiledQuad {
            x1,
            y1,
            x2,
            y2,
            tiles_x,
            tiles_y,
        });
    }

    fn unit_quad(&mut self, quad: &QuadTransform) {
        self.calls.push(DrawCall::UnitQuad(*quad));
    }

    fn flat_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.calls.push(DrawCall::FlatRect { x1, y1, x2, y2 });
    }
}
