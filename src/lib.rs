//! Canopy Engine library.
//!
//! Sprite rendering and tiling core of a 2D game client: texture lifecycle
//! management, per-sprite animation state, movement modifiers, and the
//! tiling/clipping geometry that repeats bitmaps across the viewport. This
//! module exposes the components, resources, systems, and render backends
//! for use in integration tests and as a reusable library.

pub mod components;
pub mod render;
pub mod resources;
pub mod systems;
