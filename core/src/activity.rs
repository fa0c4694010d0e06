//! The append-only activity log.
//!
//! RULE: the scheduler never reads the log. It exists only for
//! post-hoc ramp-time accounting.

use crate::phase::PhaseKind;
use crate::types::MemberId;
use serde::{Deserialize, Serialize};

/// What one tick of attention on a task was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Productive progress toward the phase target.
    Progress,
    /// Context-loading cost before productive progress starts.
    RampUp,
    /// Residual cost paid after the phase was stopped.
    RampDown,
}

/// One log entry per tick per (task, active members) pair.
/// Ramp entries carry negative signed amounts, progress entries
/// positive ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub phase:         PhaseKind,
    pub kind:          ActivityKind,
    pub members:       Vec<MemberId>,
    pub signed_amount: f64,
}
