//! Draw flags and per-entity placement options for sprite rendering.

use bevy_ecs::prelude::Component;
use std::ops::{BitOr, BitOrAssign};

/// Composable draw flags for a sprite placement.
///
/// A small bitmask type with explicit union/contains operations; flags never
/// convert implicitly to or from integers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DrawFlags(u32);

impl DrawFlags {
    pub const NONE: DrawFlags = DrawFlags(0);
    /// Mirror horizontally about the origin.
    pub const FLIPPED: DrawFlags = DrawFlags(1);
    /// Offset by the viewport origin (world-space placement).
    pub const RELATIVE: DrawFlags = DrawFlags(1 << 1);
    /// Tile along the x axis.
    pub const TILE_X: DrawFlags = DrawFlags(1 << 2);
    /// Tile along the y axis.
    pub const TILE_Y: DrawFlags = DrawFlags(1 << 3);

    /// True when every flag in `other` is set in `self`.
    pub fn contains(self, other: DrawFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DrawFlags {
    type Output = DrawFlags;

    fn bitor(self, rhs: DrawFlags) -> DrawFlags {
        DrawFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for DrawFlags {
    fn bitor_assign(&mut self, rhs: DrawFlags) {
        self.0 |= rhs.0;
    }
}

/// How a sprite is placed on screen: draw flags plus per-axis tile pitch.
///
/// A pitch of 0 means "use the sprite's own size"; a negative pitch is taken
/// by absolute value. Pitch only matters on axes with tiling enabled.
#[derive(Component, Clone, Copy, Debug)]
pub struct SpritePlacement {
    pub flags: DrawFlags,
    pub pitch_x: i32,
    pub pitch_y: i32,
}

impl Default for SpritePlacement {
    fn default() -> Self {
        Self {
            flags: DrawFlags::NONE,
            pitch_x: 0,
            pitch_y: 0,
        }
    }
}

impl SpritePlacement {
    pub fn new(flags: DrawFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn with_pitch(flags: DrawFlags, pitch_x: i32, pitch_y: i32) -> Self {
        Self {
            flags,
            pitch_x,
            pitch_y,
        }
    }
}
