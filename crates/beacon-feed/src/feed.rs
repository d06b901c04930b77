use std::future::Future;
use std::time::Duration;

use beacon_track::{MergeReport, Scene};
use tokio::time::{MissedTickBehavior, interval};

use crate::source::SnapshotSource;

const DUMP_INTERVAL: Duration = Duration::from_secs(1);

/// Result of one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Merged(MergeReport),
    /// The fetch itself failed; retried on the next tick
    TransportFailed,
    /// The payload was fetched but unreadable as a snapshot
    BadPayload,
}

/// Owns the scene and the source and drives both from one task.
pub struct Feed<S> {
    scene: Scene,
    source: S,
    emit: bool,
}

impl<S: SnapshotSource> Feed<S> {
    pub fn new(scene: Scene, source: S) -> Self {
        Self {
            scene,
            source,
            emit: false,
        }
    }

    /// Print the scene view as a JSON line on every dump tick.
    pub fn with_emit(mut self, emit: bool) -> Self {
        self.emit = emit;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch once and merge. Failures are logged and leave the scene as is.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("fetching snapshot: {e:#}");
                return PollOutcome::TransportFailed;
            }
        };
        match self.scene.apply_snapshot_json(&text) {
            Ok(report) => PollOutcome::Merged(report),
            Err(e) => {
                tracing::warn!("ignoring snapshot: {e}");
                PollOutcome::BadPayload
            }
        }
    }

    fn dump(&self) {
        tracing::debug!(table = %self.scene.table(), "distance table");
        if self.emit {
            match serde_json::to_string(&self.scene.view()) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!("serializing scene view: {e}"),
            }
        }
    }

    /// Poll, advance frames and dump until `shutdown` resolves.
    ///
    /// Everything runs on this one task, so each poll's merge completes
    /// before the next frame reads the scene.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> Self {
        let config = self.scene.config();
        let mut poll = interval(config.poll_interval());
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frame = interval(config.frame_interval());
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut dump = interval(DUMP_INTERVAL);
        dump.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutting down");
                    break;
                }
                _ = poll.tick() => {
                    if let PollOutcome::Merged(report) = self.poll_once().await {
                        if report.changed() {
                            tracing::debug!(
                                applied = report.applied,
                                ignored = report.ignored,
                                dropped = report.dropped,
                                "table updated"
                            );
                        }
                    }
                }
                _ = frame.tick() => {
                    // Warnings are logged inside the scene.
                    self.scene.frame();
                }
                _ = dump.tick() => self.dump(),
            }
        }
        self
    }
}
