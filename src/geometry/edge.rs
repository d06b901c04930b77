//! Trimmed anchor-to-anchor edges.

use glam::DVec2;

use crate::model::center_of;
use crate::types::Segment;

/// Segment between two anchors' footprints rather than their centers.
///
/// `start` and `end` are the anchors' top-left corners; each footprint is a
/// `size` x `size` square. Both endpoints move `size` along the center line
/// toward the other anchor. `edge_between(b, a, s)` is exactly
/// `edge_between(a, b, s).reversed()`.
///
/// Coincident centers have no direction; the result is the zero-length
/// segment at the shared center.
pub fn edge_between(start: DVec2, end: DVec2, size: f64) -> Segment {
    let start_center = center_of(start, size);
    let end_center = center_of(end, size);
    trim_centers(start_center, end_center, size)
}

/// Move each center `amount` toward the other.
pub fn trim_centers(start_center: DVec2, end_center: DVec2, amount: f64) -> Segment {
    let delta = end_center - start_center;
    let len = delta.length();
    if len == 0.0 {
        return Segment::new(start_center, end_center);
    }
    // Divide per component rather than via a reciprocal so that swapping the
    // endpoints yields exactly the negated unit vector.
    let unit = delta / len;
    Segment::new(start_center + unit * amount, end_center - unit * amount)
}
