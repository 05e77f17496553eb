//! Engine systems.
//!
//! This module groups the ECS systems and exclusive passes that advance
//! simulation and rendering.
//!
//! Submodules overview
//! - [`animation`] – advance sprite frames based on per-frame delays
//! - [`render`] – z-sorted sprite emission and texture cache maintenance
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod render;
pub mod time;
