//! Default sizes and settings (screen units unless noted)

/// Side of an anchor's square footprint.
pub const ANCHOR_SIZE: f64 = 50.0;
/// Multiplier from reported distance to screen units.
pub const DISTANCE_SCALE: f64 = 100.0;
/// A point this close to an edge counts as "on" it.
pub const PROXIMITY_THRESHOLD: f64 = 25.0;
pub const SAMPLE_STEP: f64 = 50.0;
pub const SAMPLE_OFFSET: f64 = 30.0;
pub const GRID_SIZE: f64 = 50.0;

/// Telemetry poll period in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 100;
/// Display frame period in milliseconds (~60 Hz).
pub const FRAME_INTERVAL_MS: u64 = 16;

pub const ANCHOR_IDS: [&str; 3] = ["BC572913EA8B", "BC572905D5B3", "BC572905D5B9"];
pub const TAG_IDS: [&str; 3] = ["282C02227F53", "282C02227FDD", "282C02227F1A"];

/// First anchor's initial top-left corner; later anchors step right.
pub const ANCHOR_ORIGIN_X: f64 = 100.0;
pub const ANCHOR_ORIGIN_Y: f64 = 300.0;
pub const ANCHOR_SPACING: f64 = 100.0;

/// Label shown where a ranking slot is empty.
pub const NOT_AVAILABLE: &str = "N/A";
