//! Render pass and texture cache maintenance.
//!
//! The pass collects drawable entities, sorts them by z-index (painter's
//! algorithm) and emits each sprite through
//! [`draw_sprite`](crate::render::draw::draw_sprite). It runs as an
//! exclusive pass because the backend lives outside the ECS world, mirrors
//! no state between frames, and must interleave with the platform's
//! begin/end drawing scope.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::components::placement::SpritePlacement;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::render::backend::RenderBackend;
use crate::render::draw::draw_sprite;
use crate::resources::texturecache::TextureCache;
use crate::resources::view::View;
use crate::resources::worldtime::WorldTime;

/// Frames between texture cache cleanups; eviction cost is proportional to
/// the overflow, so trimming every frame buys nothing.
const CLEANUP_INTERVAL_FRAMES: u64 = 128;

/// Draw every (sprite, position, placement, z-index) entity, back to front.
pub fn render_pass(world: &mut World, backend: &mut dyn RenderBackend) {
    let view = *world.resource::<View>();
    let elapsed = world.resource::<WorldTime>().elapsed;

    // Sprite clones are cheap: frame bitmaps are shared buffers.
    let mut to_draw: Vec<(Sprite, MapPosition, SpritePlacement, ZIndex)> = {
        let mut query = world.query::<(&Sprite, &MapPosition, &SpritePlacement, &ZIndex)>();
        query
            .iter(world)
            .map(|(sprite, pos, placement, z)| (sprite.clone(), *pos, *placement, *z))
            .collect()
    };
    to_draw.sort_by_key(|(_, _, _, z)| *z);

    world.resource_scope(|_, mut cache: Mut<TextureCache>| {
        for (sprite, pos, placement, _z) in &to_draw {
            draw_sprite(
                sprite,
                pos.pos.x as i32,
                pos.pos.y as i32,
                placement.flags,
                placement.pitch_x,
                placement.pitch_y,
                &view,
                elapsed,
                &mut cache,
                backend,
            );
        }
    });
}

/// Trim the texture cache between frames, every
/// [`CLEANUP_INTERVAL_FRAMES`] frames.
///
/// Call after the drawing scope ends so eviction can never interleave with
/// an in-progress bind/draw sequence.
pub fn cleanup_textures(world: &mut World, backend: &mut dyn RenderBackend) {
    let frame_count = world.resource::<WorldTime>().frame_count;
    if frame_count % CLEANUP_INTERVAL_FRAMES != 0 {
        return;
    }
    world.resource_scope(|_, mut cache: Mut<TextureCache>| {
        let before = cache.len();
        cache.cleanup(backend);
        if cache.len() < before {
            debug!("Texture cleanup evicted {} textures", before - cache.len());
        }
    });
}
