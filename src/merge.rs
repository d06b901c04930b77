//! Folding telemetry snapshots into the distance table.
//!
//! Wire shape: `{ "<tag id>": [{ "beacon": "<anchor id>", "distance": <number> }] }`.
//! Entries that don't fit the shape or name ids outside the universe are
//! dropped one at a time; they never abort the rest of the merge.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::SnapshotError;
use crate::log::debug;
use crate::model::Universe;
use crate::table::DistanceTable;
use crate::types::Distance;

/// One well-formed `{beacon, distance}` entry. Ids are still unchecked here.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceReading {
    pub anchor: String,
    pub tag: String,
    /// Wire value; `0` means "no current reading"
    pub distance: f64,
}

/// A parsed telemetry payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    readings: Vec<DistanceReading>,
    /// Entries that did not have the `{beacon, distance}` shape
    malformed: usize,
}

impl Snapshot {
    pub fn from_readings(readings: Vec<DistanceReading>) -> Self {
        Snapshot {
            readings,
            malformed: 0,
        }
    }

    pub fn from_json(text: &str) -> Result<Snapshot, SnapshotError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| SnapshotError::InvalidJson { source })?;
        Snapshot::from_value(&value)
    }

    /// Only a non-object top level is an error; everything below it is lenient.
    pub fn from_value(value: &Value) -> Result<Snapshot, SnapshotError> {
        let Value::Object(tags) = value else {
            return Err(SnapshotError::NotAnObject {
                found: json_kind(value),
            });
        };

        let mut snapshot = Snapshot::default();
        for (tag, entries) in tags {
            let Value::Array(entries) = entries else {
                snapshot.malformed += 1;
                continue;
            };
            for entry in entries {
                match parse_entry(tag, entry) {
                    Some(reading) => snapshot.readings.push(reading),
                    None => snapshot.malformed += 1,
                }
            }
        }
        Ok(snapshot)
    }

    pub fn readings(&self) -> &[DistanceReading] {
        &self.readings
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// One `{beacon, distance}` entry as it appears on the wire.
#[derive(Deserialize)]
struct WireEntry {
    beacon: String,
    /// A null or absent distance reads as the "no reading" sentinel.
    #[serde(default)]
    distance: Option<f64>,
}

fn parse_entry(tag: &str, entry: &Value) -> Option<DistanceReading> {
    let entry = WireEntry::deserialize(entry).ok()?;
    Some(DistanceReading {
        anchor: entry.beacon,
        tag: tag.to_string(),
        distance: entry.distance.unwrap_or(0.0),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// What a merge did, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Positive readings written to the table
    pub applied: usize,
    /// Readings that carried the "no reading" sentinel (or any non-positive value)
    pub ignored: usize,
    /// Malformed entries and entries naming unknown ids
    pub dropped: usize,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Merge `snapshot` into a copy of `table`.
///
/// Positive readings overwrite; anything else leaves the stored value alone,
/// so a known distance survives gaps in telemetry. Pairs the snapshot does
/// not mention keep their value. The result is padded to the full universe.
pub fn merge(
    table: &DistanceTable,
    snapshot: &Snapshot,
    universe: &Universe,
) -> (DistanceTable, MergeReport) {
    let mut merged = table.clone();
    let report = merge_into(&mut merged, snapshot, universe);
    (merged, report)
}

/// In-place form of [`merge`].
pub fn merge_into(
    table: &mut DistanceTable,
    snapshot: &Snapshot,
    universe: &Universe,
) -> MergeReport {
    let mut report = MergeReport {
        dropped: snapshot.malformed,
        ..MergeReport::default()
    };

    for reading in &snapshot.readings {
        let (Some(anchor), Some(tag)) = (universe.anchor(&reading.anchor), universe.tag(&reading.tag))
        else {
            debug!(anchor = %reading.anchor, tag = %reading.tag, "dropping reading for unknown id");
            report.dropped += 1;
            continue;
        };

        match Distance::from_wire(reading.distance) {
            Some(distance) => {
                table.set(anchor, tag, distance);
                report.applied += 1;
            }
            None => report.ignored += 1,
        }
    }

    table.pad(universe);
    report
}
