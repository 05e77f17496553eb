//! Bounded texture cache with FIFO eviction.
//!
//! Owns the GPU-resident textures keyed by bitmap identity. Textures are
//! created lazily on first bind and destroyed only by [`TextureCache::cleanup`]
//! (oldest-loaded first, not least-recently-used) or full teardown. A
//! last-bound marker makes repeated binds of the same bitmap free.
//!
//! Cleanup is meant to run between frames, never between a bind and the
//! draws that follow it, so an in-use texture cannot vanish mid-draw.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::render::backend::{RenderBackend, TextureHandle};
use crate::resources::bitmapstore::Bitmap;

/// GPU texture cache: bitmap identity to texture handle, bounded capacity.
#[derive(Resource)]
pub struct TextureCache {
    textures: FxHashMap<u64, TextureHandle>,
    /// Identities in load order; front is evicted first.
    load_order: VecDeque<u64>,
    last_bound: Option<u64>,
    max_textures: usize,
}

impl TextureCache {
    /// Cache with the given eviction capacity; values below 1 are clamped.
    pub fn new(max_textures: usize) -> Self {
        Self {
            textures: FxHashMap::default(),
            load_order: VecDeque::new(),
            last_bound: None,
            max_textures: max_textures.max(1),
        }
    }

    /// Number of resident textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn max_textures(&self) -> usize {
        self.max_textures
    }

    /// Identity of the currently bound bitmap, if any.
    pub fn bound(&self) -> Option<u64> {
        self.last_bound
    }

    /// Ensure a texture exists for the bitmap and make it active.
    ///
    /// A no-op when the bitmap is already the bound texture. First sight of
    /// an identity uploads the pixel data and records the load order.
    pub fn bind(&mut self, backend: &mut dyn RenderBackend, bitmap: &Bitmap) {
        if self.last_bound == Some(bitmap.id()) {
            return;
        }
        self.last_bound = Some(bitmap.id());
        let handle = match self.textures.get(&bitmap.id()) {
            Some(handle) => *handle,
            None => {
                let handle = backend.create_texture(bitmap);
                self.textures.insert(bitmap.id(), handle);
                self.load_order.push_back(bitmap.id());
                handle
            }
        };
        backend.bind_texture(handle);
    }

    /// Clear the active-texture marker and disable texturing; used before
    /// flat (untextured) drawing.
    pub fn unbind(&mut self, backend: &mut dyn RenderBackend) {
        self.last_bound = None;
        backend.unbind_texture();
    }

    /// Trim the cache to capacity, evicting the oldest-loaded entries.
    ///
    /// Idempotent and safe to call while under capacity. Cost is
    /// proportional to the overflow, so it is intended to run periodically
    /// between frames rather than every frame.
    pub fn cleanup(&mut self, backend: &mut dyn RenderBackend) {
        while self.load_order.len() > self.max_textures {
            let Some(id) = self.load_order.pop_front() else {
                break;
            };
            if self.last_bound == Some(id) {
                self.unbind(backend);
            }
            if let Some(handle) = self.textures.remove(&id) {
                debug!("Evicting texture for bitmap {:#x}", id);
                backend.delete_texture(handle);
            }
        }
    }

    /// Release every resident texture; used at graphics-context teardown.
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        if self.last_bound.is_some() {
            self.unbind(backend);
        }
        for (_, handle) in self.textures.drain() {
            backend.delete_texture(handle);
        }
        self.load_order.clear();
    }
}
