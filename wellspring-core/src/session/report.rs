//! Session output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cluster::ClusterId;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Exhaustion crossed the configured stop threshold
    Threshold,
    /// The maximum batch count was spent without crossing it
    Budget,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Budget => "budget",
        }
    }
}

/// One generated item, immutable once assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    pub embedding: Vec<f32>,
    /// The cluster this item was assigned to; write-once
    pub cluster: ClusterId,
}

/// Final output of a session
///
/// Snapshot of the frequency spectrum and the last exhaustion estimate at
/// the moment the session stopped, plus the full ordered item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub prompt: String,
    /// N: items assigned across the whole session
    pub total_items: u64,
    /// u: clusters observed
    pub observed_clusters: u64,
    /// f1: clusters seen exactly once
    pub singletons: u64,
    /// f2: clusters seen exactly twice
    pub doubletons: u64,
    /// T̂: Chao1-estimated total reachable clusters
    pub estimated_total: f64,
    pub exhaustion_pct: f64,
    pub stop_reason: StopReason,
    pub items: Vec<Item>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
