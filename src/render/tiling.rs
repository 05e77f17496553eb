//! Tiling range computation with wraparound normalization.
//!
//! Given an anchor position, a sprite extent and a tile pitch, compute the
//! inclusive begin/end positions of the tiles that cover the viewport. The
//! modulo arithmetic is sign-corrected explicitly: Rust's `%` truncates
//! toward zero, so raw remainders of negative operands must be shifted back
//! into the expected range rather than used as-is.

/// Inclusive begin/end of a tiled axis, stepped by the pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRange {
    pub begin: i32,
    pub end: i32,
}

impl TileRange {
    /// Degenerate range for a non-tiled axis: the anchor itself.
    pub fn at(anchor: i32) -> Self {
        Self {
            begin: anchor,
            end: anchor,
        }
    }
}

/// Effective tile pitch: 0 means "use the sprite extent", negative pitch is
/// taken by absolute value.
pub fn resolve_pitch(pitch: i32, extent: i32) -> i32 {
    if pitch == 0 { extent } else { pitch.abs() }
}

/// Tile range covering the viewport along one axis.
///
/// `begin` is the anchor normalized into the principal tile whose right/top
/// edge is still visible at coordinate 0; `end` is normalized so the tile
/// starting there covers the viewport's far edge. Returns `None` when the
/// normalized end precedes the begin, meaning the sprite lies fully outside
/// the viewport on this axis.
pub fn tiled_axis(anchor: i32, extent: i32, pitch: i32, view_extent: i32) -> Option<TileRange> {
    debug_assert!(pitch > 0, "pitch must be resolved positive");
    let mut begin = anchor + extent;
    begin %= pitch;
    if begin <= 0 {
        begin += pitch;
    }
    begin -= extent;
    let mut end = anchor - view_extent;
    end %= pitch;
    if end >= 0 {
        end -= pitch;
    }
    end += view_extent;
    if end < begin {
        None
    } else {
        Some(TileRange { begin, end })
    }
}
