//! Per-anchor, per-tag distance state.

use std::fmt;

use serde::Serialize;

use crate::model::{AnchorId, TagId, Universe};
use crate::types::{Distance, wire_distance};

/// One tag's last known distance to the owning anchor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceEntry {
    pub tag: TagId,
    #[serde(with = "wire_distance")]
    pub distance: Option<Distance>,
}

/// All tag entries for one anchor, in universe tag order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnchorRow {
    pub anchor: AnchorId,
    pub entries: Vec<DistanceEntry>,
}

impl AnchorRow {
    fn entry_mut(&mut self, tag: &TagId) -> Option<&mut DistanceEntry> {
        self.entries.iter_mut().find(|e| &e.tag == tag)
    }

    pub fn get(&self, tag: &TagId) -> Option<Distance> {
        self.entries
            .iter()
            .find(|e| &e.tag == tag)
            .and_then(|e| e.distance)
    }

    /// `(tag, distance)` pairs, the shape the ranker scans.
    pub fn readings(&self) -> impl Iterator<Item = (&TagId, Option<Distance>)> {
        self.entries.iter().map(|e| (&e.tag, e.distance))
    }
}

/// anchor id -> `[{tag, distance}]`.
///
/// Rows and entries are never removed. Every row holds exactly one entry
/// per universe tag once [`DistanceTable::pad`] has run, which both
/// constructors and the merge guarantee.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DistanceTable {
    rows: Vec<AnchorRow>,
}

impl DistanceTable {
    /// All-unknown table for `universe`.
    pub fn new(universe: &Universe) -> Self {
        let mut table = DistanceTable { rows: Vec::new() };
        table.pad(universe);
        table
    }

    pub fn rows(&self) -> &[AnchorRow] {
        &self.rows
    }

    pub fn row(&self, anchor: &AnchorId) -> Option<&AnchorRow> {
        self.rows.iter().find(|r| &r.anchor == anchor)
    }

    pub fn get(&self, anchor: &AnchorId, tag: &TagId) -> Option<Distance> {
        self.row(anchor).and_then(|r| r.get(tag))
    }

    /// Overwrite one entry. Returns `false` when the pair is not in the table.
    pub fn set(&mut self, anchor: &AnchorId, tag: &TagId, distance: Distance) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| &r.anchor == anchor) else {
            return false;
        };
        match row.entry_mut(tag) {
            Some(entry) => {
                entry.distance = Some(distance);
                true
            }
            None => false,
        }
    }

    /// One tag's distance to every anchor, in anchor row order.
    pub fn column<'a>(
        &'a self,
        tag: &'a TagId,
    ) -> impl Iterator<Item = (&'a AnchorId, Option<Distance>)> + 'a {
        self.rows.iter().map(move |r| (&r.anchor, r.get(tag)))
    }

    /// Add any missing anchor rows and tag entries as unknown.
    pub fn pad(&mut self, universe: &Universe) {
        for anchor in universe.anchors() {
            if self.row(anchor).is_none() {
                self.rows.push(AnchorRow {
                    anchor: anchor.clone(),
                    entries: Vec::new(),
                });
            }
        }
        for row in &mut self.rows {
            for tag in universe.tags() {
                if !row.entries.iter().any(|e| &e.tag == tag) {
                    row.entries.push(DistanceEntry {
                        tag: tag.clone(),
                        distance: None,
                    });
                }
            }
        }
    }

    /// Number of (anchor, tag) pairs with a known distance.
    pub fn known(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| &r.entries)
            .filter(|e| e.distance.is_some())
            .count()
    }
}

impl fmt::Display for DistanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}:", row.anchor)?;
            for entry in &row.entries {
                write!(f, " {}={}", entry.tag, Distance::to_wire(entry.distance))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Universe {
        Universe::new(
            vec!["A".into(), "B".into()],
            vec!["x".into(), "y".into(), "z".into()],
        )
    }

    fn d(v: f64) -> Distance {
        Distance::try_new(v).unwrap()
    }

    #[test]
    fn new_table_is_complete_and_unknown() {
        let table = DistanceTable::new(&universe());
        assert_eq!(table.rows().len(), 2);
        for row in table.rows() {
            let tags: Vec<_> = row.entries.iter().map(|e| e.tag.as_str()).collect();
            assert_eq!(tags, ["x", "y", "z"]);
            assert!(row.entries.iter().all(|e| e.distance.is_none()));
        }
        assert_eq!(table.known(), 0);
    }

    #[test]
    fn set_and_get() {
        let mut table = DistanceTable::new(&universe());
        assert!(table.set(&"A".into(), &"y".into(), d(2.0)));
        assert_eq!(table.get(&"A".into(), &"y".into()), Some(d(2.0)));
        assert_eq!(table.get(&"B".into(), &"y".into()), None);
        assert!(!table.set(&"Q".into(), &"y".into(), d(2.0)));
        assert!(!table.set(&"A".into(), &"q".into(), d(2.0)));
    }

    #[test]
    fn column_follows_anchor_order() {
        let mut table = DistanceTable::new(&universe());
        table.set(&"B".into(), &"x".into(), d(7.0));
        let x = TagId::from("x");
        let column: Vec<_> = table
            .column(&x)
            .map(|(a, d)| (a.as_str(), Distance::to_wire(d)))
            .collect();
        assert_eq!(column, [("A", 0.0), ("B", 7.0)]);
    }

    #[test]
    fn pad_is_idempotent() {
        let u = universe();
        let mut table = DistanceTable::new(&u);
        table.set(&"A".into(), &"x".into(), d(1.0));
        let before = table.clone();
        table.pad(&u);
        assert_eq!(table, before);
    }

    #[test]
    fn serializes_with_wire_sentinel() {
        let mut table = DistanceTable::new(&Universe::new(vec!["A".into()], vec!["x".into(), "y".into()]));
        table.set(&"A".into(), &"y".into(), d(1.5));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"[{"anchor":"A","entries":[{"tag":"x","distance":0.0},{"tag":"y","distance":1.5}]}]"#
        );
    }

    #[test]
    fn display_lists_rows() {
        let mut table = DistanceTable::new(&universe());
        table.set(&"A".into(), &"z".into(), d(3.0));
        insta::assert_snapshot!(table.to_string(), @r"
        A: x=0 y=0 z=3
        B: x=0 y=0 z=0
        ");
    }
}
