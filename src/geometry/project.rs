//! Placing a tag along the line between its closest and reference anchors.

use glam::DVec2;

use crate::model::{AnchorId, PositionStore, center_of};

/// Point `distance` along the line from `origin` toward `toward`.
///
/// Interpolates at `distance / |toward - origin|` with no clamping, so a
/// distance longer than the line lands past `toward`. Coincident points have
/// no direction, so the result is `origin`.
pub fn point_along(origin: DVec2, toward: DVec2, distance: f64) -> DVec2 {
    let delta = toward - origin;
    let length = delta.length();
    if length == 0.0 {
        return origin;
    }
    origin + delta * (distance / length)
}

/// Inputs for one tag's projection.
#[derive(Clone, Copy, Debug)]
pub struct Projection<'a> {
    /// Anchor the tag is currently nearest to; the line starts at its center
    pub closest: &'a AnchorId,
    /// The tag's last-known closest anchor; the far end of the line
    pub reference: &'a AnchorId,
    /// Closest distance, already in screen units
    pub distance: f64,
}

impl Projection<'_> {
    /// Screen position for the tag, or `None` when either anchor has no
    /// position. A tag referencing its own closest anchor sits on that
    /// anchor's center.
    pub fn resolve(&self, anchors: &PositionStore<AnchorId>, anchor_size: f64) -> Option<DVec2> {
        let closest = center_of(anchors.get(self.closest)?, anchor_size);
        let reference = center_of(anchors.get(self.reference)?, anchor_size);
        Some(point_along(closest, reference, self.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn anchors() -> PositionStore<AnchorId> {
        let mut store = PositionStore::new();
        store.set(AnchorId::from("A"), dvec2(100.0, 300.0));
        store.set(AnchorId::from("B"), dvec2(500.0, 300.0));
        store
    }

    #[test]
    fn point_along_interpolates() {
        let p = point_along(dvec2(0.0, 0.0), dvec2(100.0, 0.0), 25.0);
        assert_eq!(p, dvec2(25.0, 0.0));
    }

    #[test]
    fn point_along_overshoots_without_clamping() {
        let p = point_along(dvec2(0.0, 0.0), dvec2(0.0, 100.0), 250.0);
        assert_eq!(p, dvec2(0.0, 250.0));
    }

    #[test]
    fn point_along_zero_length_stays_at_origin() {
        assert_eq!(point_along(dvec2(3.0, 4.0), dvec2(3.0, 4.0), 10.0), dvec2(3.0, 4.0));
    }

    #[test]
    fn projection_starts_at_closest_center() {
        let (a, b) = (AnchorId::from("A"), AnchorId::from("B"));
        let projection = Projection {
            closest: &b,
            reference: &a,
            distance: 100.0,
        };
        // centers (125, 325) and (525, 325)
        assert_eq!(projection.resolve(&anchors(), 50.0), Some(dvec2(425.0, 325.0)));
    }

    #[test]
    fn projection_is_deterministic() {
        let (a, b) = (AnchorId::from("A"), AnchorId::from("B"));
        let store = anchors();
        let projection = Projection {
            closest: &a,
            reference: &b,
            distance: 137.5,
        };
        let first = projection.resolve(&store, 50.0);
        for _ in 0..10 {
            assert_eq!(projection.resolve(&store, 50.0), first);
        }
        assert_eq!(first, Some(dvec2(262.5, 325.0)));
    }

    #[test]
    fn self_reference_lands_on_closest_center() {
        let a = AnchorId::from("A");
        let store = anchors();
        let same = Projection {
            closest: &a,
            reference: &a,
            distance: 200.0,
        };
        assert_eq!(same.resolve(&store, 50.0), Some(dvec2(125.0, 325.0)));
    }

    #[test]
    fn unknown_anchor_keeps_previous_position() {
        let (a, q) = (AnchorId::from("A"), AnchorId::from("Q"));
        let store = anchors();
        let unknown = Projection {
            closest: &q,
            reference: &a,
            distance: 200.0,
        };
        assert_eq!(unknown.resolve(&store, 50.0), None);
    }
}
