//! Point-to-edge distance and the "tag is on this edge" check.

use glam::DVec2;

use crate::types::Segment;

/// Shortest distance from `point` to `segment`.
///
/// Projects onto the segment's line and clamps the projection parameter to
/// `[0, 1]`. A zero-length segment forces the parameter to `-1`, which
/// clamps to the start point.
pub fn distance_to_segment(point: DVec2, segment: Segment) -> f64 {
    let along = segment.delta();
    let len_sq = along.length_squared();
    let param = if len_sq != 0.0 {
        (point - segment.start).dot(along) / len_sq
    } else {
        -1.0
    };

    let closest = if param < 0.0 {
        segment.start
    } else if param > 1.0 {
        segment.end
    } else {
        segment.start + along * param
    };
    point.distance(closest)
}

/// Whether `point` is within `threshold` of `segment`.
pub fn is_near_segment(point: DVec2, segment: Segment, threshold: f64) -> bool {
    distance_to_segment(point, segment) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::PROXIMITY_THRESHOLD;
    use glam::dvec2;

    fn seg() -> Segment {
        Segment::from_coords(0.0, 0.0, 100.0, 0.0)
    }

    #[test]
    fn midpoint_is_on_segment() {
        let s = Segment::from_coords(10.0, 20.0, 110.0, 220.0);
        assert_eq!(distance_to_segment(s.midpoint(), s), 0.0);
        for threshold in [0.0, 1.0, PROXIMITY_THRESHOLD] {
            assert!(is_near_segment(s.midpoint(), s, threshold));
        }
    }

    #[test]
    fn perpendicular_distance_inside_span() {
        assert_eq!(distance_to_segment(dvec2(40.0, 30.0), seg()), 30.0);
    }

    #[test]
    fn beyond_ends_measures_to_endpoint() {
        assert_eq!(distance_to_segment(dvec2(-3.0, 4.0), seg()), 5.0);
        assert_eq!(distance_to_segment(dvec2(106.0, -8.0), seg()), 10.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_near_segment(dvec2(50.0, 25.0), seg(), PROXIMITY_THRESHOLD));
        assert!(!is_near_segment(dvec2(50.0, 25.5), seg(), PROXIMITY_THRESHOLD));
    }

    #[test]
    fn zero_length_segment_compares_to_start() {
        let point_seg = Segment::from_coords(5.0, 5.0, 5.0, 5.0);
        assert_eq!(distance_to_segment(dvec2(8.0, 9.0), point_seg), 5.0);
        assert!(is_near_segment(dvec2(5.0, 5.0), point_seg, 0.0));
    }
}
