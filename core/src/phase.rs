//! Phase kinds and per-phase configuration and progress counters.

use serde::{Deserialize, Serialize};

/// The ordered stages every task moves through. TEST may only progress
/// once WORK's target is reached; REVIEW only once TEST's is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Work,
    Test,
    Review,
}

impl PhaseKind {
    /// Prerequisite order. The scheduler advances the first phase in
    /// this order whose completion predicate is false.
    pub const ALL: [PhaseKind; 3] = [PhaseKind::Work, PhaseKind::Test, PhaseKind::Review];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Work   => "work",
            Self::Test   => "test",
            Self::Review => "review",
        }
    }
}

/// Static shape of one phase: how much productive progress it needs
/// and what the switching overhead costs on entry and exit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub target_amount:    f64,
    pub ramp_up_amount:   f64,
    pub ramp_down_amount: f64,
}

impl PhaseConfig {
    pub fn new(target_amount: f64, ramp_up_amount: f64, ramp_down_amount: f64) -> Self {
        Self {
            target_amount,
            ramp_up_amount,
            ramp_down_amount,
        }
    }
}

/// One phase configuration per kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseConfigSet {
    pub work:   PhaseConfig,
    pub test:   PhaseConfig,
    pub review: PhaseConfig,
}

impl PhaseConfigSet {
    pub fn get(&self, phase: PhaseKind) -> &PhaseConfig {
        match phase {
            PhaseKind::Work   => &self.work,
            PhaseKind::Test   => &self.test,
            PhaseKind::Review => &self.review,
        }
    }
}

/// Live per-phase counters on a task.
/// `ramp_down_remaining` starts at 0 and is armed only by an explicit
/// stop of the phase.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub progress:            f64,
    pub ramp_up_remaining:   f64,
    pub ramp_down_remaining: f64,
}
