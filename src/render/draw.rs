//! Sprite draw emission.
//!
//! Turns a sprite placement into backend quads. The anchor is corrected for
//! origin, flip, viewport-relative placement and the movement modifier,
//! then the tile ranges are computed and one of three emission strategies
//! runs:
//!
//! 1. exact double-tile: both axes tiled with pitch equal to the sprite
//!    size; one quad with texture coordinates scaled by the tile counts,
//! 2. exact single-axis tile: a strip of quads stepping the matching axis,
//! 3. generic per-tile: one unit quad per tile under the full transform
//!    (rotation and flip included).
//!
//! The current frame's texture is bound once per sprite, before emission.

use crate::components::placement::DrawFlags;
use crate::components::sprite::Sprite;
use crate::render::backend::{QuadTransform, RenderBackend};
use crate::render::tiling::{TileRange, resolve_pitch, tiled_axis};
use crate::resources::texturecache::TextureCache;
use crate::resources::view::View;

/// Draw one sprite anchored at (x, y).
///
/// `pitch_x`/`pitch_y` are the tile pitches (0 = sprite size, negative =
/// absolute value), `elapsed` is total running time in seconds for the
/// movement modifier. Inert sprites and placements fully outside the
/// viewport emit nothing.
#[allow(clippy::too_many_arguments)]
pub fn draw_sprite(
    sprite: &Sprite,
    x: i32,
    y: i32,
    flags: DrawFlags,
    pitch_x: i32,
    pitch_y: i32,
    view: &View,
    elapsed: f64,
    cache: &mut TextureCache,
    backend: &mut dyn RenderBackend,
) {
    let Some(bitmap) = sprite.bitmap() else {
        return;
    };
    let width = sprite.width();
    let height = sprite.height();
    let pitch_x = resolve_pitch(pitch_x, width);
    let pitch_y = resolve_pitch(pitch_y, height);
    let (origin_x, origin_y) = sprite.origin();

    let flipped = flags.contains(DrawFlags::FLIPPED);
    let mut x = if flipped {
        x - (width - origin_x)
    } else {
        x - origin_x
    };
    let mut y = y - origin_y;
    if flags.contains(DrawFlags::RELATIVE) {
        x -= view.x;
        y -= view.y;
    }

    // Movement shifts the anchor before the tiling math, so oscillation
    // moves the whole tiled field.
    let mut angle = 0.0;
    if let Some(movement) = sprite.movement() {
        let offset = movement.apply(elapsed);
        x += offset.dx;
        y += offset.dy;
        angle = offset.angle;
    }

    let x_range = if flags.contains(DrawFlags::TILE_X) {
        match tiled_axis(x, width, pitch_x, view.width) {
            Some(range) => range,
            None => return,
        }
    } else {
        TileRange::at(x)
    };
    let y_range = if flags.contains(DrawFlags::TILE_Y) {
        match tiled_axis(y, height, pitch_y, view.height) {
            Some(range) => range,
            None => return,
        }
    } else {
        TileRange::at(y)
    };

    // Viewport cull; coordinates are viewport-relative at this point.
    if x_range.end + width < 0 || x_range.begin > view.width {
        return;
    }
    if y_range.end + height < 0 || y_range.begin > view.height {
        return;
    }

    backend.set_alpha(sprite.alpha());
    cache.bind(backend, bitmap);

    if flags.contains(DrawFlags::TILE_X) && pitch_x == width {
        if flags.contains(DrawFlags::TILE_Y) && pitch_y == height {
            // Exact fit on both axes: one quad, repeat wrap does the rest.
            let x_end = x_range.end + pitch_x;
            let y_end = y_range.end + pitch_y;
            let tiles_x = (x_end - x_range.begin) / pitch_x;
            let tiles_y = (y_end - y_range.begin) / pitch_y;
            backend.tiled_quad(x_range.begin, y_range.begin, x_end, y_end, tiles_x, tiles_y);
        } else {
            let x_end = x_range.end + pitch_x;
            let tiles_x = (x_end - x_range.begin) / pitch_x;
            let mut y = y_range.begin;
            while y <= y_range.end {
                backend.tiled_quad(x_range.begin, y, x_end, y + height, tiles_x, 1);
                y += pitch_y;
            }
        }
    } else if flags.contains(DrawFlags::TILE_Y) && pitch_y == height {
        let y_end = y_range.end + pitch_y;
        let tiles_y = (y_end - y_range.begin) / pitch_y;
        let mut x = x_range.begin;
        while x <= x_range.end {
            backend.tiled_quad(x, y_range.begin, x + width, y_end, 1, tiles_y);
            x += pitch_x;
        }
    } else {
        let offset = if flipped {
            ((width - origin_x) as f32, -origin_y as f32)
        } else {
            (-origin_x as f32, -origin_y as f32)
        };
        let scale = if flipped {
            (-width as f32, height as f32)
        } else {
            (width as f32, height as f32)
        };
        let mut x = x_range.begin;
        while x <= x_range.end {
            let mut y = y_range.begin;
            while y <= y_range.end {
                backend.unit_quad(&QuadTransform {
                    translate: ((x + origin_x) as f32, (y + origin_y) as f32),
                    angle: angle as f32,
                    offset,
                    scale,
                });
                y += pitch_y;
            }
            x += pitch_x;
        }
    }
}

/// Draw a flat (untextured) rectangle, optionally offset by the viewport
/// origin. Unbinds texturing first and leaves the transform at identity.
pub fn draw_rect(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    relative: bool,
    view: &View,
    cache: &mut TextureCache,
    backend: &mut dyn RenderBackend,
) {
    cache.unbind(backend);
    let (dx, dy) = if relative { (-view.x, -view.y) } else { (0, 0) };
    backend.flat_rect(x1 + dx, y1 + dy, x2 + dx, y2 + dy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::{Frame, Movement, Sprite};
    use crate::render::recording::{DrawCall, RecordingBackend};
    use crate::resources::bitmapstore::{BYTES_PER_PIXEL, Bitmap};

    fn bitmap(width: i32, height: i32) -> Bitmap {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Bitmap::new(width, height, vec![0xAB; len]).unwrap()
    }

    fn frame(width: i32, height: i32) -> Frame {
        Frame {
            bitmap: bitmap(width, height),
            origin: (0, 0),
            delay: 100.0,
            repeat: false,
            alpha: None,
            movement: None,
        }
    }

    fn view_100() -> View {
        View {
            x: 0,
            y: 0,
            width: 100,
            height: 100,
        }
    }

    fn draw(
        sprite: &Sprite,
        x: i32,
        y: i32,
        flags: DrawFlags,
        pitch: (i32, i32),
        view: &View,
    ) -> RecordingBackend {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new(8);
        draw_sprite(
            sprite,
            x,
            y,
            flags,
            pitch.0,
            pitch.1,
            view,
            0.0,
            &mut cache,
            &mut backend,
        );
        backend
    }

    #[test]
    fn test_exact_double_tile_single_quad() {
        let sprite = Sprite::still(frame(32, 32));
        let flags = DrawFlags::TILE_X | DrawFlags::TILE_Y;
        let backend = draw(&sprite, 10, 10, flags, (32, 32), &view_100());
        assert_eq!(backend.quad_count(), 1);
        let quad = backend
            .calls
            .iter()
            .find(|c| matches!(c, DrawCall::TiledQuad { .. }))
            .unwrap();
        // 4x4 tiles covering the viewport; texcoords equal the tile counts.
        assert_eq!(
            *quad,
            DrawCall::TiledQuad {
                x1: -22,
                y1: -22,
                x2: 106,
                y2: 106,
                tiles_x: 4,
                tiles_y: 4,
            }
        );
    }

    #[test]
    fn test_exact_fit_texcoords_have_no_remainder() {
        let sprite = Sprite::still(frame(32, 32));
        let flags = DrawFlags::TILE_X | DrawFlags::TILE_Y;
        for anchor in [-70, -1, 0, 10, 31, 32, 99] {
            let backend = draw(&sprite, anchor, anchor, flags, (0, 0), &view_100());
            let Some(DrawCall::TiledQuad {
                x1,
                y1,
                x2,
                y2,
                tiles_x,
                tiles_y,
            }) = backend
                .calls
                .iter()
                .find(|c| matches!(c, DrawCall::TiledQuad { .. }))
            else {
                panic!("expected one tiled quad");
            };
            assert_eq!((x2 - x1), tiles_x * 32);
            assert_eq!((y2 - y1), tiles_y * 32);
        }
    }

    #[test]
    fn test_single_axis_strip() {
        let sprite = Sprite::still(frame(32, 16));
        // x tiled exact fit, y untiled: one strip row of full-width quads.
        let backend = draw(&sprite, 10, 40, DrawFlags::TILE_X, (32, 0), &view_100());
        assert_eq!(backend.quad_count(), 1);
        match backend.calls.last().unwrap() {
            DrawCall::TiledQuad {
                y1,
                y2,
                tiles_x,
                tiles_y,
                ..
            } => {
                assert_eq!(*tiles_y, 1);
                assert_eq!(*y2 - *y1, 16);
                assert_eq!(*tiles_x, 4);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_vertical_strip_steps_x() {
        let sprite = Sprite::still(frame(16, 32));
        // y tiled exact fit, x tiled with mismatched pitch: quads step x.
        let flags = DrawFlags::TILE_X | DrawFlags::TILE_Y;
        let backend = draw(&sprite, 0, 0, flags, (50, 32), &view_100());
        let strips = backend
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::TiledQuad { tiles_x: 1, .. }))
            .count();
        // x range normalizes to [0, 50] at pitch 50: strips at x = 0 and 50.
        assert_eq!(strips, 2);
        assert_eq!(backend.quad_count(), 2);
    }

    #[test]
    fn test_generic_path_emits_unit_quads() {
        let sprite = Sprite::still(frame(32, 32));
        // Mismatched pitch on both axes falls through to unit quads.
        let flags = DrawFlags::TILE_X | DrawFlags::TILE_Y;
        let backend = draw(&sprite, 0, 0, flags, (40, 40), &view_100());
        assert!(backend.quad_count() > 0);
        assert!(
            backend
                .calls
                .iter()
                .all(|c| !matches!(c, DrawCall::TiledQuad { .. }))
        );
    }

    #[test]
    fn test_untiled_draw_is_one_unit_quad() {
        let sprite = Sprite::still(frame(32, 32));
        let backend = draw(&sprite, 10, 10, DrawFlags::NONE, (0, 0), &view_100());
        assert_eq!(backend.quad_count(), 1);
        match backend.calls.last().unwrap() {
            DrawCall::UnitQuad(quad) => {
                assert_eq!(quad.translate, (10.0, 10.0));
                assert_eq!(quad.scale, (32.0, 32.0));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_flip_mirrors_scale_and_offset() {
        let mut f = frame(32, 32);
        f.origin = (4, 0);
        let sprite = Sprite::still(f);
        let backend = draw(&sprite, 50, 10, DrawFlags::FLIPPED, (0, 0), &view_100());
        match backend.calls.last().unwrap() {
            DrawCall::UnitQuad(quad) => {
                assert_eq!(quad.scale, (-32.0, 32.0));
                assert_eq!(quad.offset, (28.0, 0.0));
                // Anchor shifted by width - origin_x.
                assert_eq!(quad.translate, (50.0 - 28.0 + 4.0, 10.0));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_origin_shifts_anchor() {
        let mut f = frame(32, 32);
        f.origin = (16, 16);
        let sprite = Sprite::still(f);
        let backend = draw(&sprite, 50, 50, DrawFlags::NONE, (0, 0), &view_100());
        match backend.calls.last().unwrap() {
            DrawCall::UnitQuad(quad) => {
                // translate returns to the pivot; offset walks back.
                assert_eq!(quad.translate, (50.0, 50.0));
                assert_eq!(quad.offset, (-16.0, -16.0));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_relative_placement_subtracts_view_origin() {
        let sprite = Sprite::still(frame(32, 32));
        let mut view = view_100();
        view.scroll_to(30, 20);
        let backend = draw(&sprite, 50, 50, DrawFlags::RELATIVE, (0, 0), &view);
        match backend.calls.last().unwrap() {
            DrawCall::UnitQuad(quad) => {
                assert_eq!(quad.translate, (20.0, 30.0));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_offscreen_untiled_sprite_emits_nothing() {
        let sprite = Sprite::still(frame(32, 32));
        for (x, y) in [(-33, 10), (101, 10), (10, -33), (10, 101)] {
            let backend = draw(&sprite, x, y, DrawFlags::NONE, (0, 0), &view_100());
            assert!(backend.calls.is_empty(), "({}, {}) drew", x, y);
        }
    }

    #[test]
    fn test_sparse_tiling_outside_viewport_emits_nothing() {
        let sprite = Sprite::still(frame(32, 32));
        let backend = draw(&sprite, 200, 10, DrawFlags::TILE_X, (400, 0), &view_100());
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_inert_sprite_emits_nothing() {
        let sprite = Sprite::inert();
        let flags = DrawFlags::TILE_X | DrawFlags::TILE_Y;
        let backend = draw(&sprite, 0, 0, flags, (0, 0), &view_100());
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_texture_bound_once_before_emission() {
        let sprite = Sprite::still(frame(32, 16));
        let backend = draw(&sprite, 10, 40, DrawFlags::TILE_X, (32, 0), &view_100());
        let first_quad = backend
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::TiledQuad { .. }))
            .unwrap();
        let binds: Vec<_> = backend
            .calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, DrawCall::BindTexture(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(binds.len(), 1);
        assert!(binds[0] < first_quad);
    }

    #[test]
    fn test_movement_shifts_tiling_anchor() {
        let mut f = frame(32, 32);
        f.movement = Some(Movement {
            kind: 1,
            amp_x: 16.0,
            ..Movement::default()
        });
        let sprite = Sprite::still(f);
        let flags = DrawFlags::TILE_X | DrawFlags::TILE_Y;
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new(8);
        // sin(pi/2) = 1: anchor shifts by the full amplitude.
        draw_sprite(
            &sprite,
            0,
            0,
            flags,
            0,
            0,
            &view_100(),
            std::f64::consts::FRAC_PI_2,
            &mut cache,
            &mut backend,
        );
        match backend
            .calls
            .iter()
            .find(|c| matches!(c, DrawCall::TiledQuad { .. }))
            .unwrap()
        {
            DrawCall::TiledQuad { x1, .. } => assert_eq!(*x1, -16),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rotation_movement_sets_quad_angle() {
        let mut f = frame(32, 32);
        f.movement = Some(Movement {
            kind: 3,
            rate: 4.0,
            ..Movement::default()
        });
        let sprite = Sprite::still(f);
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new(8);
        draw_sprite(
            &sprite,
            50,
            50,
            DrawFlags::NONE,
            0,
            0,
            &view_100(),
            0.5,
            &mut cache,
            &mut backend,
        );
        match backend.calls.last().unwrap() {
            DrawCall::UnitQuad(quad) => {
                let expected = (500.0 * 180.0 / std::f64::consts::PI / 4.0) as f32;
                assert!((quad.angle - expected).abs() < 1e-3);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_alpha_set_before_bind() {
        let sprite = Sprite::still(frame(32, 32));
        let backend = draw(&sprite, 10, 10, DrawFlags::NONE, (0, 0), &view_100());
        assert!(matches!(backend.calls[0], DrawCall::SetAlpha(a) if (a - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_draw_rect_unbinds_first() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new(8);
        cache.bind(&mut backend, &bitmap(4, 4));
        draw_rect(5, 5, 20, 20, false, &view_100(), &mut cache, &mut backend);
        let unbind = backend
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::UnbindTexture))
            .unwrap();
        let rect = backend
            .calls
            .iter()
            .position(|c| matches!(c, DrawCall::FlatRect { .. }))
            .unwrap();
        assert!(unbind < rect);
        assert_eq!(cache.bound(), None);
    }

    #[test]
    fn test_draw_rect_relative_offsets_by_view() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new(8);
        let mut view = view_100();
        view.scroll_to(10, 5);
        draw_rect(5, 5, 20, 20, true, &view, &mut cache, &mut backend);
        assert_eq!(
            *backend.calls.last().unwrap(),
            DrawCall::FlatRect {
                x1: -5,
                y1: 0,
                x2: 10,
                y2: 15,
            }
        );
    }
}
