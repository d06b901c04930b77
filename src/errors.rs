//! Error types with diagnostics using miette
//!
//! Nothing in the merge/projection core is fatal; these cover the edges
//! where outside input enters (snapshot payloads, configuration, move events).

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Snapshot Errors
// ============================================================================

/// A telemetry payload that could not be read at all.
///
/// Individual malformed entries never produce this; they are dropped.
#[derive(Error, Diagnostic, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON")]
    #[diagnostic(code(beacon_track::snapshot::invalid_json))]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot top level must be an object, found {found}")]
    #[diagnostic(
        code(beacon_track::snapshot::not_an_object),
        help("expected {{ \"<tag id>\": [{{ \"beacon\": \"<anchor id>\", \"distance\": <number> }}] }}")
    )]
    NotAnObject { found: &'static str },
}

// ============================================================================
// Config Errors
// ============================================================================

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(code(beacon_track::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid JSON")]
    #[diagnostic(code(beacon_track::config::invalid_json))]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("no {kind} ids configured")]
    #[diagnostic(
        code(beacon_track::config::empty_universe),
        help("list at least one id under `{kind}s`")
    )]
    EmptyUniverse { kind: &'static str },

    #[error("duplicate {kind} id: {id}")]
    #[diagnostic(code(beacon_track::config::duplicate_id))]
    DuplicateId { kind: &'static str, id: String },

    #[error("invalid value for `{field}`: {source}")]
    #[diagnostic(code(beacon_track::config::invalid_value))]
    InvalidValue {
        field: &'static str,
        #[source]
        source: NumericError,
    },
}

// ============================================================================
// Scene Errors
// ============================================================================

/// Move events that name something the scene does not know.
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum SceneError {
    #[error("unknown anchor: {id}")]
    #[diagnostic(code(beacon_track::scene::unknown_anchor))]
    UnknownAnchor { id: String },

    #[error("unknown tag: {id}")]
    #[diagnostic(code(beacon_track::scene::unknown_tag))]
    UnknownTag { id: String },
}
