//! Scoring module - points, levels and gravity speed
//!
//! Rules:
//! - A landing that clears `n` rows awards `LINE_POINTS[n] * level`.
//! - A hard drop awards 2 points per row skipped.
//! - Level is `min(10, 1 + floor(score / 1000))`, but the session feeds it the
//!   score from *before* the clear being awarded, so the level trails the
//!   score by one landing.

use crate::types::{
    DROP_INTERVALS_MS, HARD_DROP_POINTS_PER_ROW, LEVEL_SCORE_STEP, LINE_POINTS, MAX_LEVEL,
    MIN_LEVEL, SCORE_DISPLAY_DIGITS,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// Zero rows, or more than four, score nothing.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    LINE_POINTS
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Points for a hard drop of `distance` rows
pub fn hard_drop_points(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level reached at `score`, bounded to 1..=10
pub fn level_for_score(score: u32) -> u32 {
    (MIN_LEVEL + score / LEVEL_SCORE_STEP).min(MAX_LEVEL)
}

/// Gravity period for `level`. Out-of-range levels are clamped.
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = level.clamp(MIN_LEVEL, MAX_LEVEL) - MIN_LEVEL;
    DROP_INTERVALS_MS[idx as usize]
}

/// Fixed-width, zero-padded score for display
pub fn format_score(score: u32) -> String {
    format!("{:0width$}", score, width = SCORE_DISPLAY_DIGITS)
}
