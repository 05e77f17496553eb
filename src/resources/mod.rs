//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! read or mutated by systems during execution.
//!
//! Overview
//! - `bitmapstore` – decoded bitmaps keyed by archive name
//! - `engineconfig` – settings loaded from the INI configuration file
//! - `texturecache` – bounded GPU texture cache with FIFO eviction
//! - `view` – viewport origin and size in world units
//! - `worldtime` – simulation time, delta, and frame counter

pub mod bitmapstore;
pub mod engineconfig;
pub mod texturecache;
pub mod view;
pub mod worldtime;
