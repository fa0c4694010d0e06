//! End-of-run aggregation.
//!
//! Everything here is derived from the final task set and the activity
//! logs. No live state, no side effects: aggregating twice over the
//! same tasks yields identical totals.

use crate::activity::ActivityKind;
use crate::phase::PhaseKind;
use crate::task::Task;
use serde::{Deserialize, Serialize};

/// Summed ramp costs for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseRampTotals {
    pub ramp_up:   f64,
    pub ramp_down: f64,
}

/// Per-phase ramp totals, for a single task or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RampTotals {
    pub work:   PhaseRampTotals,
    pub test:   PhaseRampTotals,
    pub review: PhaseRampTotals,
}

impl RampTotals {
    pub fn get(&self, phase: PhaseKind) -> &PhaseRampTotals {
        match phase {
            PhaseKind::Work   => &self.work,
            PhaseKind::Test   => &self.test,
            PhaseKind::Review => &self.review,
        }
    }

    pub fn get_mut(&mut self, phase: PhaseKind) -> &mut PhaseRampTotals {
        match phase {
            PhaseKind::Work   => &mut self.work,
            PhaseKind::Test   => &mut self.test,
            PhaseKind::Review => &mut self.review,
        }
    }

    pub fn absorb(&mut self, other: &RampTotals) {
        for phase in PhaseKind::ALL {
            let mine   = self.get_mut(phase);
            let theirs = other.get(phase);
            mine.ramp_up += theirs.ramp_up;
            mine.ramp_down += theirs.ramp_down;
        }
    }

    /// Derive one task's totals from its activity log. Ramp entries
    /// carry negative signed amounts, so the sums are negated.
    pub fn from_activity_log(task: &Task) -> RampTotals {
        let mut totals = RampTotals::default();
        for activity in task.activity_log() {
            let entry = totals.get_mut(activity.phase);
            match activity.kind {
                ActivityKind::RampUp   => entry.ramp_up -= activity.signed_amount,
                ActivityKind::RampDown => entry.ramp_down -= activity.signed_amount,
                ActivityKind::Progress => {}
            }
        }
        totals
    }
}

/// End-of-run report for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub completed_count:  usize,
    pub incomplete_count: usize,
    pub ramp_totals:      RampTotals,
}

pub fn count_completed(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_done()).count()
}

pub fn count_incomplete(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.is_done()).count()
}

pub fn total_ramp_times(tasks: &[Task]) -> RampTotals {
    let mut totals = RampTotals::default();
    for task in tasks {
        totals.absorb(&task.ramp_time_totals());
    }
    totals
}

pub fn build_report(tasks: &[Task]) -> ScenarioReport {
    ScenarioReport {
        completed_count:  count_completed(tasks),
        incomplete_count: count_incomplete(tasks),
        ramp_totals:      total_ramp_times(tasks),
    }
}
