//! Z-index component for render ordering.
//!
//! Entities with higher z-index values are drawn on top of those with lower
//! values. Layer composition sorts drawables by this key before emission.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top). The render pass sorts by
/// `ZIndex` to achieve a painter's algorithm.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
