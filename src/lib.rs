//! Merge anchor/tag distance telemetry and place tags on anchor edges.
//!
//! Telemetry snapshots report each tag's distance to a fixed set of anchors.
//! [`Scene`] folds them into a [`DistanceTable`] that never forgets a known
//! reading, ranks each tag's closest anchors, and on every frame projects
//! the tag onto the line between its closest and reference anchors. The
//! geometry helpers in [`geometry`] are pure and usable on their own.
//!
//! ```
//! use beacon_track::{Config, Scene, TagId};
//!
//! let mut scene = Scene::new(Config::default()).unwrap();
//! scene
//!     .apply_snapshot_json(r#"{"282C02227F53": [{"beacon": "BC572913EA8B", "distance": 2}]}"#)
//!     .unwrap();
//! let ranking = scene.ranking(&TagId::from("282C02227F53")).unwrap();
//! assert_eq!(ranking.closest_scaled(100.0), 200.0);
//! scene.frame();
//! ```

pub mod config;
pub mod defaults;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod merge;
pub mod model;
pub mod rank;
pub mod scene;
pub mod table;
pub mod types;

pub use config::Config;
pub use errors::{ConfigError, SceneError, SnapshotError};
pub use merge::{DistanceReading, MergeReport, Snapshot, merge};
pub use model::{Anchor, AnchorId, PositionStore, TagId, Universe};
pub use rank::{Ranked, Ranking, rank};
pub use scene::{Edge, ProximityWarning, SampleGroup, Scene, SceneView, TagState, TagView};
pub use table::{AnchorRow, DistanceEntry, DistanceTable};
pub use types::{Color, Distance, NumericError, Segment};
