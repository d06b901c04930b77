//! Evenly spaced marker points beside an edge.

use glam::DVec2;

use crate::types::Segment;

/// Lateral multiples emitted at each walked position, in output order.
const SIDE_MULTIPLES: [f64; 6] = [-1.0, -2.0, -3.0, 1.0, 2.0, 3.0];

/// Upper bound on walked positions per segment.
pub const MAX_POSITIONS: usize = 10_000;

/// Walk `segment` from start to end in `step` increments (both ends
/// included when the length is a multiple of `step`) and emit six points
/// per position, offset along the perpendicular `(-uy, ux)` by
/// `-1, -2, -3, +1, +2, +3` times `offset`.
///
/// Zero-length segments, non-positive or non-finite steps, and steps so
/// small that the walk would exceed [`MAX_POSITIONS`] produce nothing.
pub fn side_points(segment: Segment, step: f64, offset: f64) -> Vec<DVec2> {
    let length = segment.length();
    if length == 0.0 || !length.is_finite() || !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let steps = (length / step).floor();
    if steps >= MAX_POSITIONS as f64 {
        return Vec::new();
    }
    let positions = steps as usize + 1;

    let unit = segment.delta() / length;
    let perp = unit.perp();

    let mut points = Vec::with_capacity(positions * SIDE_MULTIPLES.len());
    for i in 0..positions {
        let base = segment.start + unit * (i as f64 * step);
        for side in SIDE_MULTIPLES {
            points.push(base + perp * (side * offset));
        }
    }
    points
}
