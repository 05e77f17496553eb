//! Animation system.
//!
//! Advances every animated [`Sprite`](crate::components::sprite::Sprite) by
//! the frame delta before the render pass runs, so within a frame all
//! animation state updates happen before the sprite is drawn.

use bevy_ecs::prelude::*;

use crate::components::sprite::Sprite;
use crate::resources::worldtime::WorldTime;

/// Advance sprite animation state by the elapsed frame time.
///
/// Reads [`WorldTime`] for the delta in seconds and feeds the sprites
/// milliseconds, the unit frame delays are configured in. Static and inert
/// sprites are unaffected.
pub fn animate_sprites(mut query: Query<&mut Sprite>, time: Res<WorldTime>) {
    let delta_ms = time.delta * 1000.0;
    for mut sprite in query.iter_mut() {
        sprite.advance(delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::{Frame, Sprite};
    use crate::resources::bitmapstore::{BYTES_PER_PIXEL, Bitmap};

    fn frame(delay: f64) -> Frame {
        Frame {
            bitmap: Bitmap::new(4, 4, vec![1; 16 * BYTES_PER_PIXEL]).unwrap(),
            origin: (0, 0),
            delay,
            repeat: false,
            alpha: None,
            movement: None,
        }
    }

    fn tick(world: &mut World, delta: f64) {
        world.resource_mut::<WorldTime>().delta = delta;
        let mut schedule = Schedule::default();
        schedule.add_systems(animate_sprites);
        schedule.run(world);
    }

    #[test]
    fn test_system_advances_animated_sprites() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let entity = world
            .spawn(Sprite::animated(vec![frame(100.0), frame(100.0)]))
            .id();
        tick(&mut world, 0.05);
        assert_eq!(world.get::<Sprite>(entity).unwrap().frame(), 0);
        tick(&mut world, 0.06);
        assert_eq!(world.get::<Sprite>(entity).unwrap().frame(), 1);
    }

    #[test]
    fn test_system_ignores_static_sprites() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let entity = world.spawn(Sprite::still(frame(10.0))).id();
        tick(&mut world, 1.0);
        assert_eq!(world.get::<Sprite>(entity).unwrap().frame(), 0);
    }
}
