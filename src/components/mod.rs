//! ECS components for entities.
//!
//! This module groups the component types that can be attached to entities
//! in the world: placement, sprite rendering state, and draw ordering.
//!
//! Submodules overview:
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`placement`] – draw flags and per-axis tile pitch for sprite placement
//! - [`sprite`] – sprite frame data and the animation state machine
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod mapposition;
pub mod placement;
pub mod sprite;
pub mod zindex;
