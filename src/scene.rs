//! The scene: distance table, rankings and positions for one display.
//!
//! A `Scene` is owned by a single driver. Telemetry goes in through
//! [`Scene::apply_snapshot`], user moves through [`Scene::move_anchor`],
//! [`Scene::drop_anchor`] and [`Scene::drag_tag`], and [`Scene::frame`]
//! recomputes tag positions from whatever the current anchor positions and
//! rankings are. Everything a renderer needs is read back through the
//! accessors or [`Scene::view`].

use glam::{DVec2, dvec2};
use serde::Serialize;

use crate::config::Config;
use crate::defaults::{self, NOT_AVAILABLE};
use crate::errors::{ConfigError, SceneError, SnapshotError};
use crate::geometry::{Projection, edge_between, is_near_segment, side_points, snap_to_grid};
use crate::log::debug;
#[cfg(feature = "tracing")]
use crate::log::info;
use crate::merge::{MergeReport, Snapshot, merge_into};
use crate::model::{Anchor, AnchorId, PositionStore, TagId, Universe};
use crate::rank::{Ranking, rank};
use crate::table::DistanceTable;
use crate::types::{Color, Segment};

/// Per-tag state that survives between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct TagState {
    pub id: TagId,
    pub color: Color,
    pub ranking: Ranking<AnchorId>,
    /// Last-known closest anchor; the far end of the projection line
    pub reference: Option<AnchorId>,
}

impl TagState {
    fn new(id: TagId, color: Color) -> Self {
        TagState {
            id,
            color,
            ranking: Ranking::default(),
            reference: None,
        }
    }

    /// Adopt a fresh ranking. When the closest anchor changes, the one it
    /// replaced becomes the reference; a tag without a reference takes its
    /// current closest.
    fn update_ranking(&mut self, ranking: Ranking<AnchorId>) {
        if let (Some(previous), Some(now)) = (self.ranking.closest_id(), ranking.closest_id()) {
            if previous != now {
                self.reference = Some(previous.clone());
            }
        }
        if self.reference.is_none() {
            self.reference = ranking.closest_id().cloned();
        }
        self.ranking = ranking;
    }

    fn projection(&self, distance_scale: f64) -> Option<Projection<'_>> {
        let closest = self.ranking.closest.as_ref()?;
        Some(Projection {
            closest: &closest.id,
            reference: self.reference.as_ref()?,
            distance: closest.distance.scaled(distance_scale),
        })
    }
}

/// An anchor-to-anchor edge, trimmed to the footprints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub start: AnchorId,
    pub end: AnchorId,
    pub segment: Segment,
}

/// Marker points beside one edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleGroup {
    /// `"<start> ↔ <end>"`
    pub pair: String,
    pub points: Vec<DVec2>,
}

/// A tag sitting on (within the proximity threshold of) an edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProximityWarning {
    pub tag: TagId,
    pub start: AnchorId,
    pub end: AnchorId,
    pub position: DVec2,
}

/// A tag as handed to a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TagView {
    pub id: TagId,
    pub color: Color,
    pub position: DVec2,
    pub closest: String,
    pub closest_distance: f64,
    pub second_closest: String,
    pub second_closest_distance: f64,
    pub reference: String,
}

/// Everything a renderer paints for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneView {
    pub anchors: Vec<Anchor>,
    pub edges: Vec<Edge>,
    pub tags: Vec<TagView>,
    pub samples: Vec<SampleGroup>,
}

pub struct Scene {
    config: Config,
    universe: Universe,
    table: DistanceTable,
    anchor_colors: Vec<Color>,
    anchor_positions: PositionStore<AnchorId>,
    tags: Vec<TagState>,
    tag_positions: PositionStore<TagId>,
}

impl Scene {
    /// Build a scene with every anchor at its default slot and every tag at
    /// the origin with no readings.
    pub fn new(config: Config) -> Result<Scene, ConfigError> {
        config.validate()?;
        let universe = config.universe();
        let table = DistanceTable::new(&universe);

        let mut anchor_positions = PositionStore::new();
        let mut anchor_colors = Vec::with_capacity(universe.anchors().len());
        for (index, id) in universe.anchors().iter().enumerate() {
            anchor_positions.set(id.clone(), default_anchor_position(index));
            anchor_colors.push(Color::for_index(index + 10));
        }

        let mut tag_positions = PositionStore::new();
        let mut tags = Vec::with_capacity(universe.tags().len());
        for (index, id) in universe.tags().iter().enumerate() {
            tag_positions.set(id.clone(), DVec2::ZERO);
            tags.push(TagState::new(id.clone(), Color::for_index(index)));
        }

        Ok(Scene {
            config,
            universe,
            table,
            anchor_colors,
            anchor_positions,
            tags,
            tag_positions,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub fn tags(&self) -> &[TagState] {
        &self.tags
    }

    pub fn tag(&self, id: &TagId) -> Option<&TagState> {
        self.tags.iter().find(|t| &t.id == id)
    }

    pub fn ranking(&self, id: &TagId) -> Option<&Ranking<AnchorId>> {
        self.tag(id).map(|t| &t.ranking)
    }

    pub fn tag_position(&self, id: &TagId) -> Option<DVec2> {
        self.tag_positions.get(id)
    }

    /// Top-left corner of an anchor's footprint.
    pub fn anchor_position(&self, id: &AnchorId) -> Option<DVec2> {
        self.anchor_positions.get(id)
    }

    pub fn anchors(&self) -> Vec<Anchor> {
        self.universe
            .anchors()
            .iter()
            .zip(&self.anchor_colors)
            .filter_map(|(id, color)| {
                Some(Anchor {
                    id: id.clone(),
                    position: self.anchor_positions.get(id)?,
                    color: color.clone(),
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Telemetry
    // ------------------------------------------------------------------

    /// Merge one snapshot and re-rank if anything was written.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> MergeReport {
        let report = merge_into(&mut self.table, snapshot, &self.universe);
        debug!(
            applied = report.applied,
            ignored = report.ignored,
            dropped = report.dropped,
            "merged snapshot"
        );
        if report.changed() {
            self.rerank();
        }
        report
    }

    /// Parse and merge a raw payload. A payload that can't be read leaves
    /// the scene untouched.
    pub fn apply_snapshot_json(&mut self, text: &str) -> Result<MergeReport, SnapshotError> {
        let snapshot = Snapshot::from_json(text)?;
        Ok(self.apply_snapshot(&snapshot))
    }

    fn rerank(&mut self) {
        for tag in &mut self.tags {
            let ranking = rank(self.table.column(&tag.id).map(|(a, d)| (a.clone(), d)));
            tag.update_ranking(ranking);
        }
    }

    /// One line per tag: `<tag> closest=<id> (<scaled>), second=<id> (<scaled>)`.
    pub fn ranking_summary(&self) -> String {
        let scale = self.config.distance_scale;
        self.tags
            .iter()
            .map(|t| format!("{} {}", t.id, t.ranking.display(scale)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Recompute every tag position, then report tags sitting on an edge.
    ///
    /// A tag with no closest anchor or no reference keeps its previous
    /// position. A tag whose reference is its closest anchor sits on that
    /// anchor's center.
    pub fn frame(&mut self) -> Vec<ProximityWarning> {
        let scale = self.config.distance_scale;
        let size = self.config.anchor_size;
        for tag in &self.tags {
            let Some(projection) = tag.projection(scale) else {
                continue;
            };
            if let Some(position) = projection.resolve(&self.anchor_positions, size) {
                self.tag_positions.set(tag.id.clone(), position);
            }
        }

        let edges = self.edges();
        let mut warnings = Vec::new();
        for tag in &self.tags {
            if let Some(position) = self.tag_positions.get(&tag.id) {
                warnings.extend(warnings_for(&tag.id, position, &edges, self.config.proximity_threshold));
            }
        }
        #[cfg(feature = "tracing")]
        for w in &warnings {
            info!(tag = %w.tag, start = %w.start, end = %w.end, x = w.position.x, y = w.position.y, "tag is on edge");
        }
        warnings
    }

    /// Proximity warnings for an arbitrary point.
    pub fn warnings_at(&self, tag: &TagId, point: DVec2) -> Vec<ProximityWarning> {
        warnings_for(tag, point, &self.edges(), self.config.proximity_threshold)
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Move an anchor as it is dragged. No snapping.
    pub fn move_anchor(&mut self, id: &AnchorId, position: DVec2) -> Result<(), SceneError> {
        if !self.anchor_positions.contains(id) {
            return Err(SceneError::UnknownAnchor {
                id: id.to_string(),
            });
        }
        self.anchor_positions.set(id.clone(), position);
        Ok(())
    }

    /// Finish an anchor drag: snap to the grid and store. Returns the snapped position.
    pub fn drop_anchor(&mut self, id: &AnchorId, position: DVec2) -> Result<DVec2, SceneError> {
        let grid = self.config.grid_size;
        let snapped = dvec2(snap_to_grid(position.x, grid), snap_to_grid(position.y, grid));
        self.move_anchor(id, snapped)?;
        Ok(snapped)
    }

    /// Move a tag by hand and report the edges it now sits on.
    ///
    /// The next [`Scene::frame`] re-projects the tag if it has a ranking.
    pub fn drag_tag(
        &mut self,
        id: &TagId,
        position: DVec2,
    ) -> Result<Vec<ProximityWarning>, SceneError> {
        if !self.tag_positions.contains(id) {
            return Err(SceneError::UnknownTag { id: id.to_string() });
        }
        self.tag_positions.set(id.clone(), position);
        let warnings = self.warnings_at(id, position);
        #[cfg(feature = "tracing")]
        for w in &warnings {
            info!(tag = %w.tag, start = %w.start, end = %w.end, x = position.x, y = position.y, "dragged tag is on edge");
        }
        Ok(warnings)
    }

    // ------------------------------------------------------------------
    // Derived display geometry
    // ------------------------------------------------------------------

    /// One edge per unordered anchor pair, smaller id at the start.
    pub fn edges(&self) -> Vec<Edge> {
        let size = self.config.anchor_size;
        self.universe
            .anchor_pairs()
            .into_iter()
            .filter_map(|(a, b)| {
                let segment =
                    edge_between(self.anchor_positions.get(a)?, self.anchor_positions.get(b)?, size);
                Some(Edge {
                    start: a.clone(),
                    end: b.clone(),
                    segment,
                })
            })
            .collect()
    }

    pub fn sample_groups(&self) -> Vec<SampleGroup> {
        let (step, offset) = (self.config.sample_step, self.config.sample_offset);
        self.edges()
            .into_iter()
            .map(|edge| SampleGroup {
                pair: format!("{} ↔ {}", edge.start, edge.end),
                points: side_points(edge.segment, step, offset),
            })
            .collect()
    }

    pub fn view(&self) -> SceneView {
        let scale = self.config.distance_scale;
        let tags = self
            .tags
            .iter()
            .map(|t| TagView {
                id: t.id.clone(),
                color: t.color.clone(),
                position: self.tag_positions.get(&t.id).unwrap_or(DVec2::ZERO),
                closest: label(t.ranking.closest_id()),
                closest_distance: t.ranking.closest_scaled(scale),
                second_closest: label(t.ranking.second_closest_id()),
                second_closest_distance: t.ranking.second_closest_scaled(scale),
                reference: label(t.reference.as_ref()),
            })
            .collect();

        SceneView {
            anchors: self.anchors(),
            edges: self.edges(),
            tags,
            samples: self.sample_groups(),
        }
    }
}

fn label(id: Option<&AnchorId>) -> String {
    id.map_or_else(|| NOT_AVAILABLE.to_string(), |a| a.to_string())
}

fn default_anchor_position(index: usize) -> DVec2 {
    dvec2(
        defaults::ANCHOR_ORIGIN_X + defaults::ANCHOR_SPACING * index as f64,
        defaults::ANCHOR_ORIGIN_Y,
    )
}

fn warnings_for(tag: &TagId, point: DVec2, edges: &[Edge], threshold: f64) -> Vec<ProximityWarning> {
    edges
        .iter()
        .filter(|e| is_near_segment(point, e.segment, threshold))
        .map(|e| ProximityWarning {
            tag: tag.clone(),
            start: e.start.clone(),
            end: e.end.clone(),
            position: point,
        })
        .collect()
}
