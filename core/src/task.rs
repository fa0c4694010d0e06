//! The task phase state machine.
//!
//! Per phase, attention moves through ramping up, working and ramping
//! down, but only one phase is live at a time, gated by the
//! prerequisite order in `PhaseKind::ALL`. Ramp-up delays the start of
//! useful progress after a (re-)entry; ramp-down is the residual cost
//! armed by every stop.
//!
//! Tasks are pure state holders: they are owned by the scheduler's
//! task collection and mutated only through the scheduler's calls.
//! Forced worker release is therefore signalled back through
//! `AdvanceOutcome` instead of touching members directly.

use crate::{
    activity::{ActivityKind, ActivityRecord},
    error::{SimError, SimResult},
    phase::{PhaseConfigSet, PhaseKind, PhaseProgress},
    rng::StreamRng,
    types::{MemberId, TaskId},
};
use serde::{Deserialize, Serialize};

/// Task lifecycle. Open: unclaimed or between phases. InProgress:
/// actively advanced. Done: every phase predicate satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Open,
    InProgress,
    Done,
}

/// Cosmetic display tag, drawn from the color stream at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl TaskColor {
    const PALETTE: [TaskColor; 6] = [
        TaskColor::Red,
        TaskColor::Green,
        TaskColor::Yellow,
        TaskColor::Blue,
        TaskColor::Magenta,
        TaskColor::Cyan,
    ];

    pub fn pick(rng: &mut StreamRng) -> Self {
        Self::PALETTE[rng.next_u64_below(Self::PALETTE.len() as u64) as usize]
    }
}

/// What a single phase-step did. The scheduler acts on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Ramp-up cost was paid; no progress accrued.
    RampedUp,
    /// Ramp-down cost was paid and some remains.
    RampedDown,
    /// Ramp-down reached zero. The scheduler must clear every
    /// assignment on this task.
    RampDownFinished,
    /// Productive progress accrued.
    Progressed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id:       TaskId,
    /// Lower value = more important. Ties break on lower `id`.
    pub priority: i64,
    pub color:    TaskColor,
    state:        TaskState,
    configs:      PhaseConfigSet,
    work:         PhaseProgress,
    test:         PhaseProgress,
    review:       PhaseProgress,
    activity_log: Vec<ActivityRecord>,
}

impl Task {
    pub fn new(id: TaskId, priority: i64, color: TaskColor, configs: PhaseConfigSet) -> Self {
        Self {
            id,
            priority,
            color,
            state: TaskState::Open,
            configs,
            work: PhaseProgress::default(),
            test: PhaseProgress::default(),
            review: PhaseProgress::default(),
            activity_log: Vec::new(),
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn phase(&self, phase: PhaseKind) -> &PhaseProgress {
        match phase {
            PhaseKind::Work   => &self.work,
            PhaseKind::Test   => &self.test,
            PhaseKind::Review => &self.review,
        }
    }

    fn phase_mut(&mut self, phase: PhaseKind) -> &mut PhaseProgress {
        match phase {
            PhaseKind::Work   => &mut self.work,
            PhaseKind::Test   => &mut self.test,
            PhaseKind::Review => &mut self.review,
        }
    }

    pub fn activity_log(&self) -> &[ActivityRecord] {
        &self.activity_log
    }

    /// Begin or re-enter a phase. Valid only while Open; every
    /// (re-)entry arms the full ramp-up again.
    pub fn enter_phase(&mut self, phase: PhaseKind) -> SimResult<()> {
        if self.state != TaskState::Open {
            return Err(SimError::InvalidStateTransition {
                task:  self.id,
                op:    "enter_phase",
                state: self.state,
            });
        }
        self.phase_mut(phase).ramp_up_remaining = self.configs.get(phase).ramp_up_amount;
        self.state = TaskState::InProgress;
        Ok(())
    }

    /// One phase-step. Ramp-up drains first, then any armed ramp-down,
    /// then productive progress. Valid only while InProgress.
    pub fn advance_phase(
        &mut self,
        phase: PhaseKind,
        members: &[MemberId],
        step: f64,
    ) -> SimResult<AdvanceOutcome> {
        if self.state != TaskState::InProgress {
            return Err(SimError::InvalidStateTransition {
                task:  self.id,
                op:    "advance_phase",
                state: self.state,
            });
        }

        if self.phase(phase).ramp_up_remaining > 0.0 {
            let p = self.phase_mut(phase);
            p.ramp_up_remaining = (p.ramp_up_remaining - step).max(0.0);
            self.log(phase, ActivityKind::RampUp, members, -step);
            Ok(AdvanceOutcome::RampedUp)
        } else if self.phase(phase).ramp_down_remaining > 0.0 {
            let p = self.phase_mut(phase);
            p.ramp_down_remaining = (p.ramp_down_remaining - step).max(0.0);
            let finished = p.ramp_down_remaining == 0.0;
            self.log(phase, ActivityKind::RampDown, members, -step);
            if finished {
                Ok(AdvanceOutcome::RampDownFinished)
            } else {
                Ok(AdvanceOutcome::RampedDown)
            }
        } else {
            self.phase_mut(phase).progress += step;
            self.log(phase, ActivityKind::Progress, members, step);
            Ok(AdvanceOutcome::Progressed)
        }
    }

    /// Stop the live phase, arming its ramp-down and returning the
    /// task to Open. Used for both the clean stop (target reached) and
    /// the interrupted stop; both arm the same cost.
    pub fn stop_phase(&mut self, phase: PhaseKind) -> SimResult<()> {
        if self.state != TaskState::InProgress {
            return Err(SimError::InvalidStateTransition {
                task:  self.id,
                op:    "stop_phase",
                state: self.state,
            });
        }
        self.phase_mut(phase).ramp_down_remaining = self.configs.get(phase).ramp_down_amount;
        self.state = TaskState::Open;
        Ok(())
    }

    /// Transition to Done. Valid only once every predicate holds.
    pub fn finish(&mut self) -> SimResult<()> {
        if !self.is_done() {
            return Err(SimError::InvalidStateTransition {
                task:  self.id,
                op:    "finish",
                state: self.state,
            });
        }
        self.state = TaskState::Done;
        Ok(())
    }

    // Completion predicates. `work_done` uses >= while `tested` and
    // `reviewed` use strict >, so those phases need one step beyond
    // the target.

    pub fn work_done(&self) -> bool {
        self.work.progress >= self.configs.work.target_amount
    }

    pub fn tested(&self) -> bool {
        self.test.progress > self.configs.test.target_amount
    }

    pub fn reviewed(&self) -> bool {
        self.review.progress > self.configs.review.target_amount
    }

    pub fn is_done(&self) -> bool {
        self.work_done() && self.tested() && self.reviewed()
    }

    pub fn phase_satisfied(&self, phase: PhaseKind) -> bool {
        match phase {
            PhaseKind::Work   => self.work_done(),
            PhaseKind::Test   => self.tested(),
            PhaseKind::Review => self.reviewed(),
        }
    }

    /// First phase in prerequisite order whose predicate is false, or
    /// None when the task is complete.
    pub fn next_actionable_phase(&self) -> Option<PhaseKind> {
        PhaseKind::ALL
            .into_iter()
            .find(|&phase| !self.phase_satisfied(phase))
    }

    /// Derived ramp-time accounting from the activity log. Never
    /// consulted by the scheduler.
    pub fn ramp_time_totals(&self) -> crate::report::RampTotals {
        crate::report::RampTotals::from_activity_log(self)
    }

    fn log(&mut self, phase: PhaseKind, kind: ActivityKind, members: &[MemberId], signed_amount: f64) {
        self.activity_log.push(ActivityRecord {
            phase,
            kind,
            members: members.to_vec(),
            signed_amount,
        });
    }
}
