//! Sprite component: frame data and the animation state machine.
//!
//! A sprite is either *static* (one immutable frame, no timing), *animated*
//! (a frame sequence advanced by per-frame delays), or *inert* (no
//! resolvable bitmap; draws nothing and never fails). Frame attributes are
//! decoded from serde specs ([`SpriteSpec`]/[`FrameSpec`]) resolved against
//! the [`BitmapStore`](crate::resources::bitmapstore::BitmapStore).
//!
//! # Animation Flow
//!
//! 1. The archive loader deserializes a [`SpriteSpec`] and resolves it into
//!    a [`Sprite`] with [`Sprite::from_spec`].
//! 2. [`animate_sprites`](crate::systems::animation::animate_sprites) calls
//!    [`Sprite::advance`] once per tick with the elapsed milliseconds.
//! 3. The render pass reads the resolved frame (bitmap, size, origin,
//!    movement, alpha) and emits geometry.

use bevy_ecs::prelude::Component;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::resources::bitmapstore::{Bitmap, BitmapStore};

/// Display delay applied when a frame does not specify one, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: f64 = 100.0;

/// Periodic positional/rotational offset applied per draw.
///
/// `kind` is a raw data-driven tag: 0 none, 1 horizontal oscillation,
/// 2 vertical oscillation, 3 rotation. Unrecognized tags log a diagnostic
/// and apply no offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    #[serde(default)]
    pub kind: i32,
    /// Horizontal amplitude in world units.
    #[serde(default)]
    pub amp_x: f64,
    /// Vertical amplitude in world units.
    #[serde(default)]
    pub amp_y: f64,
    /// Oscillation period in milliseconds; 0 falls back to sin(t seconds).
    #[serde(default)]
    pub period: f64,
    /// Rotation rate divisor for kind 3.
    #[serde(default)]
    pub rate: f64,
}

/// Offset produced by evaluating a [`Movement`] at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveOffset {
    pub dx: i32,
    pub dy: i32,
    /// Draw rotation in degrees.
    pub angle: f64,
}

impl Movement {
    /// Evaluate the modifier at `elapsed` seconds of total running time.
    ///
    /// Oscillation uses the configured period when positive, otherwise a
    /// plain sin of the elapsed seconds. Evaluated from total time, not the
    /// per-frame delta, so the phase is continuous across frame changes.
    pub fn apply(&self, elapsed: f64) -> MoveOffset {
        let ms = elapsed * 1000.0;
        let mut offset = MoveOffset::default();
        match self.kind {
            0 => {}
            1 => {
                offset.dx = if self.period > 0.0 {
                    (self.amp_x * (ms * 2.0 * std::f64::consts::PI / self.period).sin()) as i32
                } else {
                    (self.amp_x * elapsed.sin()) as i32
                };
            }
            2 => {
                offset.dy = if self.period > 0.0 {
                    (self.amp_y * (ms * 2.0 * std::f64::consts::PI / self.period).sin()) as i32
                } else {
                    (self.amp_y * elapsed.sin()) as i32
                };
            }
            3 => {
                if self.rate != 0.0 {
                    offset.angle = ms * 180.0 / std::f64::consts::PI / self.rate;
                }
            }
            other => {
                warn!("Unknown move type: {}", other);
            }
        }
        offset
    }
}

/// One frame of a sprite definition, as decoded from the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Key into the bitmap store.
    pub bitmap: String,
    /// Offset subtracted from the draw position before placement.
    #[serde(default)]
    pub origin: (i32, i32),
    /// Display delay in milliseconds.
    #[serde(default = "default_delay")]
    pub delay: f64,
    #[serde(default)]
    pub repeat: bool,
    /// Alpha cross-fade start, in [0, 1].
    #[serde(default)]
    pub a0: Option<f64>,
    /// Alpha cross-fade end, in [0, 1].
    #[serde(default)]
    pub a1: Option<f64>,
    #[serde(default)]
    pub movement: Option<Movement>,
}

fn default_delay() -> f64 {
    DEFAULT_FRAME_DELAY_MS
}

/// Sprite definition: exactly one of a single bitmap or a frame sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteSpec {
    /// Non-animated sprite with a single implicit frame.
    Bitmap(FrameSpec),
    /// Animated frame sequence.
    Frames(Vec<FrameSpec>),
}

/// A resolved frame: bitmap plus display attributes.
#[derive(Debug, Clone)]
pub struct Frame {
    pub bitmap: Bitmap,
    pub origin: (i32, i32),
    pub delay: f64,
    pub repeat: bool,
    /// (a0, a1) endpoints; `None` renders fully opaque.
    pub alpha: Option<(f64, f64)>,
    pub movement: Option<Movement>,
}

impl Frame {
    fn from_spec(spec: &FrameSpec, bitmaps: &BitmapStore) -> Option<Frame> {
        let Some(bitmap) = bitmaps.get(&spec.bitmap) else {
            warn!("Sprite frame references missing bitmap {:?}", spec.bitmap);
            return None;
        };
        let alpha = match (spec.a0, spec.a1) {
            (None, None) => None,
            (a0, a1) => Some((a0.unwrap_or(0.0), a1.unwrap_or(0.0))),
        };
        Some(Frame {
            bitmap: bitmap.clone(),
            origin: spec.origin,
            delay: spec.delay,
            repeat: spec.repeat,
            alpha,
            movement: spec.movement,
        })
    }
}

/// Sprite rendering component with per-placement animation state.
///
/// Mutable state is the current frame index and the delay accumulator; the
/// resolved attributes of the current frame (bitmap, size, origin, movement,
/// alpha endpoints) are recomputed on every frame change.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    frames: Vec<Frame>,
    animated: bool,
    frame: usize,
    delay: f64,
    next_delay: f64,
    bitmap: Option<Bitmap>,
    width: i32,
    height: i32,
    origin: (i32, i32),
    movement: Option<Movement>,
    repeat: bool,
    a0: f64,
    a1: f64,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::inert()
    }
}

impl Sprite {
    /// A sprite with no resolvable bitmap; draws nothing, updates are no-ops.
    pub fn inert() -> Self {
        Self {
            frames: Vec::new(),
            animated: false,
            frame: 0,
            delay: 0.0,
            next_delay: DEFAULT_FRAME_DELAY_MS,
            bitmap: None,
            width: 0,
            height: 0,
            origin: (0, 0),
            movement: None,
            repeat: false,
            a0: 1.0,
            a1: 1.0,
        }
    }

    /// Non-animated sprite showing a single frame.
    pub fn still(frame: Frame) -> Self {
        let mut sprite = Self::inert();
        sprite.frames = vec![frame];
        sprite.animated = false;
        sprite.set_frame(0);
        sprite
    }

    /// Animated sprite cycling through `frames`; empty input yields an inert
    /// sprite.
    pub fn animated(frames: Vec<Frame>) -> Self {
        if frames.is_empty() {
            return Self::inert();
        }
        let mut sprite = Self::inert();
        sprite.frames = frames;
        sprite.animated = true;
        sprite.set_frame(0);
        sprite
    }

    /// Resolve a spec against the bitmap store.
    ///
    /// Frames whose bitmap key does not resolve are dropped with a warning;
    /// if nothing resolves the sprite is inert.
    pub fn from_spec(spec: &SpriteSpec, bitmaps: &BitmapStore) -> Self {
        match spec {
            SpriteSpec::Bitmap(frame) => match Frame::from_spec(frame, bitmaps) {
                Some(frame) => Self::still(frame),
                None => Self::inert(),
            },
            SpriteSpec::Frames(frames) => Self::animated(
                frames
                    .iter()
                    .filter_map(|f| Frame::from_spec(f, bitmaps))
                    .collect(),
            ),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.bitmap.is_none()
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Current frame index, always within `[0, frame_count)`.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Bitmap of the current frame, `None` for inert sprites.
    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    pub fn movement(&self) -> Option<&Movement> {
        self.movement.as_ref()
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Switch to frame `f`, wrapping to 0 when out of range, and recompute
    /// every attribute resolved from the frame. Movement modifiers are not
    /// inherited across frame changes.
    pub fn set_frame(&mut self, f: usize) {
        if self.frames.is_empty() {
            return;
        }
        self.frame = if f < self.frames.len() { f } else { 0 };
        if self.animated {
            self.delay = 0.0;
            self.next_delay = self.frames[self.frame].delay;
        }
        let frame = &self.frames[self.frame];
        self.width = frame.bitmap.width();
        self.height = frame.bitmap.height();
        self.origin = frame.origin;
        self.movement = frame.movement;
        self.repeat = frame.repeat;
        (self.a0, self.a1) = frame.alpha.unwrap_or((1.0, 1.0));
        self.bitmap = Some(frame.bitmap.clone());
    }

    /// Accumulate elapsed milliseconds and advance past the current frame's
    /// delay. Advancing past the last frame wraps to frame 0 and zeroes the
    /// accumulator.
    pub fn advance(&mut self, delta_ms: f64) {
        if !self.animated || self.frames.is_empty() {
            return;
        }
        self.delay += delta_ms;
        if self.delay > self.next_delay {
            self.set_frame(self.frame + 1);
        }
    }

    /// Instantaneous alpha: a linear cross-fade from `a0` to `a1` over the
    /// current frame's dwell time. Non-animated sprites are always opaque.
    pub fn alpha(&self) -> f32 {
        if !self.animated {
            return 1.0;
        }
        let frac = if self.next_delay > 0.0 {
            self.delay / self.next_delay
        } else {
            1.0
        };
        (frac * self.a1 + (1.0 - frac) * self.a0) as f32
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            kind: 0,
            amp_x: 0.0,
            amp_y: 0.0,
            period: 0.0,
            rate: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::bitmapstore::BYTES_PER_PIXEL;

    fn bitmap(width: i32, height: i32, byte: u8) -> Bitmap {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Bitmap::new(width, height, vec![byte; len]).unwrap()
    }

    fn frame(byte: u8, delay: f64) -> Frame {
        Frame {
            bitmap: bitmap(8, 8, byte),
            origin: (0, 0),
            delay,
            repeat: false,
            alpha: None,
            movement: None,
        }
    }

    #[test]
    fn test_inert_sprite_is_safe() {
        let mut sprite = Sprite::inert();
        assert!(sprite.is_inert());
        sprite.advance(1000.0);
        sprite.set_frame(3);
        assert_eq!(sprite.frame(), 0);
        assert!(sprite.bitmap().is_none());
    }

    #[test]
    fn test_still_sprite_has_no_timing() {
        let mut sprite = Sprite::still(frame(1, 50.0));
        assert!(!sprite.is_animated());
        sprite.advance(10_000.0);
        assert_eq!(sprite.frame(), 0);
    }

    #[test]
    fn test_advance_steps_frames_and_wraps() {
        let mut sprite = Sprite::animated(vec![frame(1, 100.0), frame(2, 100.0)]);
        assert_eq!(sprite.frame(), 0);
        sprite.advance(101.0);
        assert_eq!(sprite.frame(), 1);
        sprite.advance(101.0);
        assert_eq!(sprite.frame(), 0);
    }

    #[test]
    fn test_frame_index_stays_in_bounds() {
        let mut sprite = Sprite::animated(vec![
            frame(1, 10.0),
            frame(2, 20.0),
            frame(3, 30.0),
        ]);
        for _ in 0..1000 {
            sprite.advance(17.0);
            assert!(sprite.frame() < sprite.frame_count());
        }
    }

    #[test]
    fn test_wrap_zeroes_delay_accumulator() {
        let mut sprite = Sprite::animated(vec![frame(1, 100.0), frame(2, 100.0)]);
        sprite.advance(150.0);
        assert_eq!(sprite.frame(), 1);
        // Fresh frame starts with a fresh accumulator: a0 again.
        assert!((sprite.alpha() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_delay_below_threshold_does_not_advance() {
        let mut sprite = Sprite::animated(vec![frame(1, 100.0), frame(2, 100.0)]);
        sprite.advance(99.0);
        assert_eq!(sprite.frame(), 0);
    }

    #[test]
    fn test_per_frame_delay_is_respected() {
        let mut sprite = Sprite::animated(vec![frame(1, 50.0), frame(2, 200.0)]);
        sprite.advance(51.0);
        assert_eq!(sprite.frame(), 1);
        sprite.advance(150.0);
        assert_eq!(sprite.frame(), 1);
        sprite.advance(51.0);
        assert_eq!(sprite.frame(), 0);
    }

    #[test]
    fn test_alpha_crossfade_is_monotonic_within_dwell() {
        let mut frames = vec![frame(1, 100.0), frame(2, 100.0)];
        frames[0].alpha = Some((0.0, 1.0));
        let mut sprite = Sprite::animated(frames);
        let mut last = sprite.alpha();
        for _ in 0..9 {
            sprite.advance(10.0);
            let alpha = sprite.alpha();
            assert!(alpha >= last);
            last = alpha;
        }
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let sprite = Sprite::animated(vec![frame(1, 100.0)]);
        assert!((sprite.alpha() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_static_sprite_alpha_is_always_one() {
        let mut f = frame(1, 100.0);
        f.alpha = Some((0.2, 0.8));
        let mut sprite = Sprite::still(f);
        sprite.advance(5000.0);
        assert!((sprite.alpha() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_movement_not_inherited_across_frames() {
        let mut frames = vec![frame(1, 100.0), frame(2, 100.0)];
        frames[0].movement = Some(Movement {
            kind: 1,
            amp_x: 10.0,
            ..Movement::default()
        });
        let mut sprite = Sprite::animated(frames);
        assert!(sprite.movement().is_some());
        sprite.advance(101.0);
        assert!(sprite.movement().is_none());
    }

    #[test]
    fn test_set_frame_recomputes_size_and_origin() {
        let mut frames = vec![frame(1, 100.0), frame(2, 100.0)];
        frames[1].bitmap = bitmap(16, 4, 2);
        frames[1].origin = (3, 5);
        let mut sprite = Sprite::animated(frames);
        assert_eq!((sprite.width(), sprite.height()), (8, 8));
        sprite.set_frame(1);
        assert_eq!((sprite.width(), sprite.height()), (16, 4));
        assert_eq!(sprite.origin(), (3, 5));
    }

    #[test]
    fn test_from_spec_missing_bitmap_is_inert() {
        let store = BitmapStore::default();
        let spec = SpriteSpec::Bitmap(FrameSpec {
            bitmap: "missing".into(),
            origin: (0, 0),
            delay: DEFAULT_FRAME_DELAY_MS,
            repeat: false,
            a0: None,
            a1: None,
            movement: None,
        });
        assert!(Sprite::from_spec(&spec, &store).is_inert());
    }

    #[test]
    fn test_from_spec_deserialized_defaults() {
        let mut store = BitmapStore::default();
        store.insert("leaf", bitmap(8, 8, 1));
        let spec: SpriteSpec =
            serde_json::from_str(r#"{"frames": [{"bitmap": "leaf"}, {"bitmap": "leaf"}]}"#)
                .unwrap();
        let mut sprite = Sprite::from_spec(&spec, &store);
        assert!(sprite.is_animated());
        assert_eq!(sprite.frame_count(), 2);
        // Default delay is 100 ms.
        sprite.advance(99.0);
        assert_eq!(sprite.frame(), 0);
        sprite.advance(2.0);
        assert_eq!(sprite.frame(), 1);
    }

    #[test]
    fn test_movement_oscillation_with_zero_period() {
        let movement = Movement {
            kind: 1,
            amp_x: 10.0,
            ..Movement::default()
        };
        assert_eq!(movement.apply(0.0).dx, 0);
        assert_eq!(movement.apply(std::f64::consts::FRAC_PI_2).dx, 10);
    }

    #[test]
    fn test_movement_oscillation_with_period() {
        let movement = Movement {
            kind: 2,
            amp_y: 8.0,
            period: 1000.0,
            ..Movement::default()
        };
        // Quarter period: sin(pi/2) = 1.
        assert_eq!(movement.apply(0.25).dy, 8);
        assert_eq!(movement.apply(0.25).dx, 0);
    }

    #[test]
    fn test_movement_rotation_angle() {
        let movement = Movement {
            kind: 3,
            rate: 2.0,
            ..Movement::default()
        };
        let expected = 1000.0 * 180.0 / std::f64::consts::PI / 2.0;
        assert!((movement.apply(1.0).angle - expected).abs() < 1e-9);
    }

    #[test]
    fn test_movement_unknown_kind_applies_nothing() {
        let movement = Movement {
            kind: 9,
            amp_x: 10.0,
            amp_y: 10.0,
            ..Movement::default()
        };
        assert_eq!(movement.apply(1.0), MoveOffset::default());
    }
}
