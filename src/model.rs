//! Identifiers, the fixed id universe, and the position stores.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::Color;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Opaque id of a fixed reference point (the `beacon` field on the wire).
    AnchorId
}

string_id! {
    /// Opaque id of a mobile tag (the top-level snapshot key).
    TagId
}

/// The static anchor and tag id sets, in display order.
///
/// Everything downstream (table rows, ranking scan order, colors, default
/// layout) follows this order.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    anchors: Vec<AnchorId>,
    tags: Vec<TagId>,
}

impl Universe {
    /// Callers validate uniqueness (see `Config::validate`).
    pub fn new(anchors: Vec<AnchorId>, tags: Vec<TagId>) -> Self {
        Universe { anchors, tags }
    }

    pub fn anchors(&self) -> &[AnchorId] {
        &self.anchors
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn anchor(&self, id: &str) -> Option<&AnchorId> {
        self.anchors.iter().find(|a| a.as_str() == id)
    }

    pub fn tag(&self, id: &str) -> Option<&TagId> {
        self.tags.iter().find(|t| t.as_str() == id)
    }

    /// Unordered anchor pairs, smaller id first.
    pub fn anchor_pairs(&self) -> Vec<(&AnchorId, &AnchorId)> {
        let mut pairs = Vec::new();
        for a in &self.anchors {
            for b in &self.anchors {
                if a < b {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}

/// An anchor as handed to a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Anchor {
    pub id: AnchorId,
    /// Top-left corner of the square footprint
    pub position: DVec2,
    pub color: Color,
}

impl Anchor {
    pub fn center(&self, size: f64) -> DVec2 {
        center_of(self.position, size)
    }
}

/// Center of a square footprint whose top-left corner is `top_left`.
#[inline]
pub fn center_of(top_left: DVec2, size: f64) -> DVec2 {
    top_left + DVec2::splat(size / 2.0)
}

/// Last known screen position per id.
///
/// Owned by the scene and passed explicitly into projection so the geometry
/// stays free of ambient state.
#[derive(Clone, Debug)]
pub struct PositionStore<K> {
    positions: HashMap<K, DVec2>,
}

impl<K> Default for PositionStore<K> {
    fn default() -> Self {
        PositionStore {
            positions: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> PositionStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &K) -> Option<DVec2> {
        self.positions.get(id).copied()
    }

    /// Last write wins.
    pub fn set(&mut self, id: K, position: DVec2) {
        self.positions.insert(id, position);
    }

    pub fn contains(&self, id: &K) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn universe() -> Universe {
        Universe::new(
            vec!["B".into(), "A".into(), "C".into()],
            vec!["x".into(), "y".into()],
        )
    }

    #[test]
    fn anchor_pairs_are_unordered_and_sorted() {
        let u = universe();
        let pairs: Vec<_> = u
            .anchor_pairs()
            .into_iter()
            .map(|(a, b)| format!("{a}-{b}"))
            .collect();
        assert_eq!(pairs, ["B-C", "A-B", "A-C"]);
    }

    #[test]
    fn lookup_by_str() {
        let u = universe();
        assert_eq!(u.anchor("A"), Some(&AnchorId::from("A")));
        assert_eq!(u.anchor("Z"), None);
        assert_eq!(u.tag("y"), Some(&TagId::from("y")));
    }

    #[test]
    fn center_is_half_size_in() {
        assert_eq!(center_of(dvec2(100.0, 300.0), 50.0), dvec2(125.0, 325.0));
    }

    #[test]
    fn position_store_last_write_wins() {
        let mut store = PositionStore::new();
        let id = AnchorId::from("A");
        assert!(store.is_empty());
        store.set(id.clone(), dvec2(1.0, 2.0));
        store.set(id.clone(), dvec2(3.0, 4.0));
        assert_eq!(store.get(&id), Some(dvec2(3.0, 4.0)));
        assert_eq!(store.len(), 1);
    }
}
