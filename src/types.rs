//! Strongly-typed numeric primitives for beacon-track.
//!
//! - Reported distances are never a raw `f64` once they leave the wire
//! - "No reading" is `None`, not a magic zero
//! - Screen coordinates are `glam::DVec2`

use std::fmt;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate that a value is finite and strictly positive.
pub fn positive_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// A reported tag-to-anchor distance, in telemetry units.
///
/// Always finite and strictly positive. The wire format's `0` ("no reading")
/// maps to `Option::<Distance>::None`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[repr(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Create a Distance with validation
    #[inline]
    pub fn try_new(val: f64) -> Result<Distance, NumericError> {
        positive_finite(val).map(Distance)
    }

    /// Interpret a wire value: anything that is not a positive finite number
    /// means "no current reading".
    #[inline]
    pub fn from_wire(val: f64) -> Option<Distance> {
        Distance::try_new(val).ok()
    }

    /// Back to the wire encoding, `0` for unknown.
    #[inline]
    pub fn to_wire(distance: Option<Distance>) -> f64 {
        distance.map_or(0.0, Distance::raw)
    }

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Convert to screen units.
    #[inline]
    pub fn scaled(self, factor: f64) -> f64 {
        self.0 * factor
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde adapter that keeps the numeric-sentinel wire form for `Option<Distance>`.
pub mod wire_distance {
    use super::Distance;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Option<Distance>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(Distance::to_wire(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Distance>, D::Error> {
        let raw = Option::<f64>::deserialize(d)?;
        Ok(raw.and_then(Distance::from_wire))
    }
}

/// A directed line segment in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Segment { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Segment::new(dvec2(x1, y1), dvec2(x2, y2))
    }

    /// `(startX, startY, endX, endY)`, the form a renderer's line primitive takes.
    pub fn coords(self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    pub fn reversed(self) -> Self {
        Segment::new(self.end, self.start)
    }

    pub fn delta(self) -> DVec2 {
        self.end - self.start
    }

    pub fn length(self) -> f64 {
        self.delta().length()
    }

    pub fn midpoint(self) -> DVec2 {
        (self.start + self.end) * 0.5
    }
}

/// CSS color string; keep raw string, renderers pass it straight through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    /// Golden-angle hue walk so neighbouring indices get distinct hues.
    pub fn for_index(index: usize) -> Color {
        let hue = (index * 137) % 360;
        Color(format!("hsl({hue}, 70%, 60%)"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Distance tests ====================

    #[test]
    fn distance_try_new_valid() {
        assert_eq!(Distance::try_new(2.5).map(Distance::raw), Ok(2.5));
    }

    #[test]
    fn distance_try_new_rejects_zero() {
        assert_eq!(Distance::try_new(0.0), Err(NumericError::Zero));
    }

    #[test]
    fn distance_try_new_rejects_negative() {
        assert_eq!(Distance::try_new(-1.0), Err(NumericError::Negative));
    }

    #[test]
    fn distance_try_new_rejects_nan() {
        assert_eq!(Distance::try_new(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn distance_try_new_rejects_infinity() {
        assert_eq!(Distance::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn distance_from_wire_treats_zero_as_unknown() {
        assert_eq!(Distance::from_wire(0.0), None);
        assert_eq!(Distance::from_wire(3.0).map(Distance::raw), Some(3.0));
    }

    #[test]
    fn distance_to_wire_round_trips_sentinel() {
        assert_eq!(Distance::to_wire(None), 0.0);
        assert_eq!(Distance::to_wire(Distance::from_wire(4.0)), 4.0);
    }

    #[test]
    fn distance_scaled() {
        let d = Distance::try_new(2.0).unwrap();
        assert_eq!(d.scaled(100.0), 200.0);
    }

    // ==================== Segment tests ====================

    #[test]
    fn segment_length_and_midpoint() {
        let seg = Segment::from_coords(0.0, 0.0, 3.0, 4.0);
        assert_eq!(seg.length(), 5.0);
        assert_eq!(seg.midpoint(), dvec2(1.5, 2.0));
    }

    #[test]
    fn segment_reversed_swaps_endpoints() {
        let seg = Segment::from_coords(1.0, 2.0, 3.0, 4.0);
        assert_eq!(seg.reversed().coords(), (3.0, 4.0, 1.0, 2.0));
    }

    // ==================== Color tests ====================

    #[test]
    fn color_for_index_walks_hue() {
        assert_eq!(Color::for_index(0).as_str(), "hsl(0, 70%, 60%)");
        assert_eq!(Color::for_index(1).as_str(), "hsl(137, 70%, 60%)");
        assert_eq!(Color::for_index(10).as_str(), "hsl(290, 70%, 60%)");
    }
}
