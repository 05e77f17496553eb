//! Decoded bitmaps and the keyed bitmap store.
//!
//! A [`Bitmap`] is an immutable decoded image as produced by the asset
//! archive: width, height, a stable identity used for texture cache lookup,
//! and a shared pixel buffer (4 channels, blue-red byte order). The
//! [`BitmapStore`] resource maps string keys to bitmaps so sprite
//! definitions can reference pixels by name.

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::Hasher;
use std::sync::Arc;

/// Bytes per pixel in a decoded bitmap (blue, green, red, alpha).
pub const BYTES_PER_PIXEL: usize = 4;

/// Immutable decoded image with a stable identity.
///
/// Cloning is cheap: the pixel buffer is shared. Two bitmaps with the same
/// identity are treated as the same texture by the cache.
#[derive(Clone, Debug)]
pub struct Bitmap {
    id: u64,
    width: i32,
    height: i32,
    data: Arc<[u8]>,
}

impl Bitmap {
    /// Create a bitmap from raw BGRA pixels, deriving the identity from the
    /// pixel contents.
    ///
    /// Returns an error if the buffer length does not match the dimensions.
    pub fn new(width: i32, height: i32, data: Vec<u8>) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!("invalid bitmap dimensions {}x{}", width, height));
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(format!(
                "bitmap buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            ));
        }
        let mut hasher = FxHasher::default();
        hasher.write(&data);
        hasher.write_i32(width);
        hasher.write_i32(height);
        // Identity 0 is reserved for "nothing bound".
        let id = hasher.finish().max(1);
        Ok(Self {
            id,
            width,
            height,
            data: data.into(),
        })
    }

    /// Create a bitmap with an identity supplied by the archive.
    pub fn with_id(
        id: u64,
        width: i32,
        height: i32,
        data: Vec<u8>,
    ) -> Result<Self, String> {
        let mut bitmap = Self::new(width, height, data)?;
        bitmap.id = id.max(1);
        Ok(bitmap)
    }

    /// Stable identity used for texture cache lookup and equality.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw pixel buffer, blue-red byte order, row-major, no padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Bitmaps keyed by name, filled from the asset archive at load time.
#[derive(Resource, Default)]
pub struct BitmapStore {
    map: FxHashMap<String, Bitmap>,
}

impl BitmapStore {
    pub fn insert(&mut self, key: impl Into<String>, bitmap: Bitmap) {
        self.map.insert(key.into(), bitmap);
    }

    pub fn get(&self, key: &str) -> Option<&Bitmap> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
