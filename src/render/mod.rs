//! Sprite rendering: geometry, emission, and the GPU seam.
//!
//! Submodules overview:
//! - [`backend`] – the [`RenderBackend`](backend::RenderBackend) trait and
//!   quad primitives the engine draws with
//! - [`draw`] – sprite draw emission (path selection, culling, flat rects)
//! - [`raylib`] – rlgl-backed implementation for the real window
//! - [`recording`] – headless backend recording calls for tests and tooling
//! - [`tiling`] – wraparound tile range math

pub mod backend;
pub mod draw;
pub mod raylib;
pub mod recording;
pub mod tiling;
