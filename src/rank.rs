//! Closest / second-closest selection over distance readings.

use std::fmt;

use serde::Serialize;

use crate::defaults::NOT_AVAILABLE;
use crate::types::Distance;

/// An id together with the distance that ranked it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranked<K> {
    pub id: K,
    pub distance: Distance,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranking<K> {
    pub closest: Option<Ranked<K>>,
    pub second_closest: Option<Ranked<K>>,
}

impl<K> Default for Ranking<K> {
    fn default() -> Self {
        Ranking {
            closest: None,
            second_closest: None,
        }
    }
}

impl<K> Ranking<K> {
    pub fn closest_id(&self) -> Option<&K> {
        self.closest.as_ref().map(|r| &r.id)
    }

    pub fn second_closest_id(&self) -> Option<&K> {
        self.second_closest.as_ref().map(|r| &r.id)
    }

    /// Closest distance in screen units, `0` when there is none.
    pub fn closest_scaled(&self, factor: f64) -> f64 {
        scaled_or_zero(self.closest.as_ref(), factor)
    }

    pub fn second_closest_scaled(&self, factor: f64) -> f64 {
        scaled_or_zero(self.second_closest.as_ref(), factor)
    }
}

fn scaled_or_zero<K>(slot: Option<&Ranked<K>>, factor: f64) -> f64 {
    slot.map_or(0.0, |r| r.distance.scaled(factor))
}

/// Pick the two smallest positive readings in one left-to-right pass.
///
/// Unknown readings are skipped. Comparisons are strict, so among equal
/// distances the earlier entry keeps the better slot.
pub fn rank<K, I>(entries: I) -> Ranking<K>
where
    I: IntoIterator<Item = (K, Option<Distance>)>,
{
    let mut ranking = Ranking::default();
    for (id, distance) in entries {
        let Some(distance) = distance else {
            continue;
        };
        let candidate = Ranked { id, distance };
        match &ranking.closest {
            Some(closest) if candidate.distance >= closest.distance => {
                let beats_second = ranking
                    .second_closest
                    .as_ref()
                    .is_none_or(|second| candidate.distance < second.distance);
                if beats_second {
                    ranking.second_closest = Some(candidate);
                }
            }
            _ => {
                ranking.second_closest = ranking.closest.replace(candidate);
            }
        }
    }
    ranking
}

/// A ranking paired with the scale it is displayed at.
pub struct Scaled<'a, K> {
    ranking: &'a Ranking<K>,
    factor: f64,
}

impl<K> Ranking<K> {
    /// `closest=<id> (<scaled>), second=<id> (<scaled>)`, with `N/A (0)` for empty slots.
    pub fn display(&self, factor: f64) -> Scaled<'_, K> {
        Scaled {
            ranking: self,
            factor,
        }
    }
}

impl<K: fmt::Display> fmt::Display for Scaled<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("closest=")?;
        write_slot(f, self.ranking.closest.as_ref(), self.factor)?;
        f.write_str(", second=")?;
        write_slot(f, self.ranking.second_closest.as_ref(), self.factor)
    }
}

fn write_slot<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    slot: Option<&Ranked<K>>,
    factor: f64,
) -> fmt::Result {
    match slot {
        Some(r) => write!(f, "{} ({})", r.id, r.distance.scaled(factor)),
        None => write!(f, "{NOT_AVAILABLE} (0)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(raw: &[(&'static str, f64)]) -> Vec<(&'static str, Option<Distance>)> {
        raw.iter()
            .map(|&(id, d)| (id, Distance::from_wire(d)))
            .collect()
    }

    fn ids(r: &Ranking<&'static str>) -> (Option<&'static str>, Option<&'static str>) {
        (r.closest_id().copied(), r.second_closest_id().copied())
    }

    #[test]
    fn ties_favor_earlier_entry_and_zero_is_excluded() {
        let r = rank(entries(&[("a", 5.0), ("b", 3.0), ("c", 3.0), ("d", 0.0)]));
        assert_eq!(ids(&r), (Some("b"), Some("c")));
        assert_eq!(r.closest.as_ref().map(|c| c.distance.raw()), Some(3.0));
        assert_eq!(r.second_closest.as_ref().map(|c| c.distance.raw()), Some(3.0));
    }

    #[test]
    fn new_minimum_demotes_closest() {
        let r = rank(entries(&[("a", 4.0), ("b", 1.0)]));
        assert_eq!(ids(&r), (Some("b"), Some("a")));
    }

    #[test]
    fn later_entry_can_take_second_slot() {
        let r = rank(entries(&[("a", 1.0), ("b", 9.0), ("c", 2.0)]));
        assert_eq!(ids(&r), (Some("a"), Some("c")));
    }

    #[test]
    fn single_positive_entry_leaves_second_empty() {
        let r = rank(entries(&[("a", 0.0), ("b", 6.0), ("c", 0.0)]));
        assert_eq!(ids(&r), (Some("b"), None));
        assert_eq!(r.second_closest_scaled(100.0), 0.0);
    }

    #[test]
    fn all_unknown_is_empty() {
        let r = rank(entries(&[("a", 0.0), ("b", 0.0)]));
        assert_eq!(r, Ranking::default());
        assert_eq!(r.closest_scaled(100.0), 0.0);
    }

    #[test]
    fn closest_distance_is_scaled() {
        let r = rank(entries(&[("a", 2.0), ("b", 5.0)]));
        assert_eq!(r.closest_scaled(100.0), 200.0);
        assert_eq!(r.second_closest_scaled(100.0), 500.0);
    }

    #[test]
    fn display_marks_empty_slots() {
        let r = rank(entries(&[("a", 0.0), ("b", 1.25)]));
        insta::assert_snapshot!(r.display(100.0).to_string(), @"closest=b (125), second=N/A (0)");
    }
}
