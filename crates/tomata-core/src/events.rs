use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SegmentKind;

/// Every cycle transition produces an event. The controller records them in
/// order; the CLI logs them and tests assert on the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CycleEvent {
    WorkStarted {
        tag: String,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    WorkCompleted {
        tag: String,
        /// Consecutive completed work segments since the last long break.
        work_count: u32,
        at: DateTime<Utc>,
    },
    /// Work segment interrupted before completion. No counters move.
    WorkAborted {
        tag: String,
        at: DateTime<Utc>,
    },
    BreakStarted {
        kind: SegmentKind,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    BreakFinished {
        kind: SegmentKind,
        /// True when the break countdown was interrupted.
        aborted: bool,
        at: DateTime<Utc>,
    },
    Exited {
        at: DateTime<Utc>,
    },
}
