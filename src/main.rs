//! Canopy Engine demo entry point.
//!
//! A 2D sprite/tiling render core using:
//! - **raylib** for windowing and the rlgl immediate-mode quads
//! - **bevy_ecs** for entity-component-system architecture
//!
//! This executable composites a small procedural scene: a tiled backdrop, a
//! scrolling cloud band with a movement modifier, and a handful of animated
//! markers, drawn through the texture cache and the z-sorted render pass.
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, open the raylib window, build the ECS world
//! 2. Spawn the demo entities from sprite specs
//! 3. Per frame: update time, advance animations, run the render pass
//!    inside the drawing scope, then trim the texture cache
//! 4. On exit, tear the texture cache down

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod render;
mod resources;
mod systems;

use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::{Color, RaylibDraw};
use std::path::PathBuf;

use crate::components::mapposition::MapPosition;
use crate::components::placement::{DrawFlags, SpritePlacement};
use crate::components::sprite::{Frame, Sprite, SpriteSpec};
use crate::components::zindex::ZIndex;
use crate::render::raylib::RaylibBackend;
use crate::resources::bitmapstore::{BYTES_PER_PIXEL, Bitmap, BitmapStore};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::texturecache::TextureCache;
use crate::resources::view::View;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animate_sprites;
use crate::systems::render::{cleanup_textures, render_pass};
use crate::systems::time::update_world_time;

/// Canopy Engine demo scene
#[derive(Parser)]
#[command(version, about = "Sprite/tiling render core demo")]
struct Cli {
    /// Path to the configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Solid-color bitmap with a darker one-pixel border, BGRA.
fn bordered(size: i32, b: u8, g: u8, r: u8) -> Bitmap {
    let n = size as usize;
    let mut data = vec![0u8; n * n * BYTES_PER_PIXEL];
    for y in 0..n {
        for x in 0..n {
            let i = (y * n + x) * BYTES_PER_PIXEL;
            let edge = x == 0 || y == 0 || x == n - 1 || y == n - 1;
            let dim = if edge { 2 } else { 1 };
            data[i] = b / dim;
            data[i + 1] = g / dim;
            data[i + 2] = r / dim;
            data[i + 3] = 0xFF;
        }
    }
    Bitmap::new(size, size, data).expect("bitmap dimensions are static")
}

fn build_bitmaps() -> BitmapStore {
    let mut store = BitmapStore::default();
    store.insert("ground", bordered(32, 40, 110, 60));
    store.insert("cloud", bordered(48, 230, 220, 210));
    store.insert("marker0", bordered(16, 60, 60, 220));
    store.insert("marker1", bordered(16, 60, 120, 220));
    store.insert("marker2", bordered(16, 60, 180, 220));
    store
}

fn spawn_scene(world: &mut World) {
    let bitmaps = build_bitmaps();

    // Backdrop: exact-fit tiling on both axes, screen-space.
    let ground = Sprite::still(Frame {
        bitmap: bitmaps.get("ground").expect("built above").clone(),
        origin: (0, 0),
        delay: 0.0,
        repeat: true,
        alpha: None,
        movement: None,
    });
    world.spawn((
        ground,
        MapPosition::new(0.0, 0.0),
        SpritePlacement::new(DrawFlags::TILE_X | DrawFlags::TILE_Y),
        ZIndex(0),
    ));

    // Cloud band: tiled along x with a wide pitch, oscillating vertically.
    let cloud_spec: SpriteSpec = serde_json::from_str(
        r#"{"bitmap": {"bitmap": "cloud",
                       "movement": {"kind": 2, "amp_y": 12.0, "period": 4000.0}}}"#,
    )
    .expect("static spec");
    world.spawn((
        Sprite::from_spec(&cloud_spec, &bitmaps),
        MapPosition::new(0.0, 90.0),
        SpritePlacement::with_pitch(DrawFlags::TILE_X, 160, 0),
        ZIndex(1),
    ));

    // Animated markers scattered over the backdrop, some flipped.
    let marker_spec: SpriteSpec = serde_json::from_str(
        r#"{"frames": [
            {"bitmap": "marker0", "delay": 180.0, "a0": 0.4, "a1": 1.0},
            {"bitmap": "marker1", "delay": 180.0},
            {"bitmap": "marker2", "delay": 180.0, "a0": 1.0, "a1": 0.4}
        ]}"#,
    )
    .expect("static spec");
    for i in 0..12 {
        let flags = if fastrand::bool() {
            DrawFlags::FLIPPED
        } else {
            DrawFlags::NONE
        };
        world.spawn((
            Sprite::from_spec(&marker_spec, &bitmaps),
            MapPosition::new(
                fastrand::i32(0..1200) as f32,
                fastrand::i32(0..680) as f32,
            ),
            SpritePlacement::new(flags),
            ZIndex(2 + i),
        ));
    }

    world.insert_resource(bitmaps);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    let mut builder = raylib::init();
    builder
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Canopy Engine");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(View::new(
        rl.get_screen_width(),
        rl.get_screen_height(),
    ));
    world.insert_resource(TextureCache::new(config.max_textures));
    world.insert_resource(config);
    spawn_scene(&mut world);

    let mut update = Schedule::default();
    update.add_systems(animate_sprites);
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    let mut backend = RaylibBackend::new();

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time() as f64;
        update_world_time(&mut world, dt);
        update.run(&mut world);

        if rl.is_window_resized() {
            let (w, h) = (rl.get_screen_width(), rl.get_screen_height());
            world.resource_mut::<View>().resize(w, h);
        }

        {
            let mut d = rl.begin_drawing(&thread);
            d.clear_background(Color::BLACK);
            render_pass(&mut world, &mut backend);
        }

        // Between frames, never mid-draw.
        cleanup_textures(&mut world, &mut backend);
    }

    world.resource_scope(|_, mut cache: Mut<TextureCache>| {
        cache.clear(&mut backend);
    });
}
