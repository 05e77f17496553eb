//! Viewport resource.
//!
//! Stores the visible world rectangle: origin (scroll position) and size.
//! Rendering reads it for relative placement and culling; the frame loop
//! updates the size on window resize and the origin when the view scrolls.

use bevy_ecs::prelude::Resource;

/// Current viewport origin and size in world units.
#[derive(Resource, Clone, Copy, Debug)]
pub struct View {
    /// World x of the viewport's left edge.
    pub x: i32,
    /// World y of the viewport's top edge.
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for View {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        }
    }
}

impl View {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}
