//! Screen-space geometry: edges, projection, proximity, sampling.

pub mod edge;
pub mod project;
pub mod proximity;
pub mod sample;

pub use edge::edge_between;
pub use project::{Projection, point_along};
pub use proximity::{distance_to_segment, is_near_segment};
pub use sample::side_points;

/// Round `value` to the nearest multiple of `grid`.
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_line() {
        assert_eq!(snap_to_grid(124.0, 50.0), 100.0);
        assert_eq!(snap_to_grid(125.0, 50.0), 150.0);
        assert_eq!(snap_to_grid(-30.0, 50.0), -50.0);
        assert_eq!(snap_to_grid(0.0, 50.0), 0.0);
    }
}
