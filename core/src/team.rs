//! The team scheduler: one assignment pass and one advancement pass
//! per tick, always in that order.
//!
//! RULES:
//!   - Assignment is greedy and single-pass, in member-id order.
//!     No preemption, no re-balancing, no lookahead.
//!   - Exactly one phase transition attempt per claimed task per tick,
//!     regardless of how many members hold it.
//!   - A forced release becomes visible to the next tick's assignment
//!     pass, never the current one.

use crate::{
    error::{SimError, SimResult},
    member::Member,
    task::{AdvanceOutcome, Task, TaskState},
    types::{MemberId, TaskId, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Solo vs. mob work. `Mob` is a declared extension point: the step a
/// claimed task receives per tick stays 1.0 regardless of member
/// count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationMode {
    #[default]
    Alone,
    Mob,
}

pub struct Team {
    members: Vec<Member>,
    tasks:   Vec<Task>,
    /// Assignment table, task id -> claiming member ids, kept in sync
    /// with every member's `assigned_task` mirror.
    assignments: BTreeMap<TaskId, BTreeSet<MemberId>>,
    mode:        CollaborationMode,
}

impl Team {
    pub fn new(mut members: Vec<Member>, mut tasks: Vec<Task>, mode: CollaborationMode) -> Self {
        members.sort_by_key(|m| m.id);
        tasks.sort_by_key(|t| t.id);
        Self {
            members,
            tasks,
            assignments: BTreeMap::new(),
            mode,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn mode(&self) -> CollaborationMode {
        self.mode
    }

    /// Assignment pass: each idle member claims the eligible task with
    /// the minimum (priority, id) key. Eligible = not done and not
    /// claimed by any other member; a claim made earlier in this pass
    /// hides the task from later members in the same pass.
    pub fn assign_idle_workers(&mut self, tick: Tick) {
        for i in 0..self.members.len() {
            if !self.members[i].is_idle() {
                continue;
            }
            let pick = self
                .tasks
                .iter()
                .filter(|t| !t.is_done() && !self.is_claimed(t.id))
                .min_by_key(|t| (t.priority, t.id))
                .map(|t| t.id);
            if let Some(task_id) = pick {
                let member_id = self.members[i].id;
                self.members[i].assigned_task = Some(task_id);
                self.assignments.entry(task_id).or_default().insert(member_id);
                log::debug!(
                    "tick={tick} assign: member {member_id} ({}) claims task {task_id}",
                    self.members[i].name
                );
            }
        }
    }

    /// Advancement pass: exactly one phase transition attempt per
    /// claimed task, on the first phase whose predicate is false.
    pub fn advance_tick(&mut self, tick: Tick) -> SimResult<()> {
        let step = self.step_per_task();
        let claimed: Vec<TaskId> = self
            .assignments
            .iter()
            .filter(|(_, holders)| !holders.is_empty())
            .map(|(task_id, _)| *task_id)
            .collect();

        for task_id in claimed {
            let holders: Vec<MemberId> = self.assignments[&task_id].iter().copied().collect();
            let idx = self.task_index(task_id)?;

            match self.tasks[idx].next_actionable_phase() {
                None => {
                    // Every predicate holds: the task is done and its
                    // members return to the pool on the next tick's
                    // assignment pass.
                    self.tasks[idx].finish()?;
                    log::debug!("tick={tick} task {task_id} done, releasing {holders:?}");
                    self.release_all(task_id);
                }
                Some(phase) => {
                    if self.tasks[idx].state() == TaskState::Open {
                        self.tasks[idx].enter_phase(phase)?;
                    }
                    match self.tasks[idx].advance_phase(phase, &holders, step)? {
                        AdvanceOutcome::RampDownFinished => {
                            // Forced release. Lifecycle stays
                            // InProgress so the next claimant resumes
                            // without a fresh ramp-up.
                            log::debug!(
                                "tick={tick} task {task_id} ramp-down complete, releasing {holders:?}"
                            );
                            self.release_all(task_id);
                        }
                        AdvanceOutcome::Progressed => {
                            if self.tasks[idx].phase_satisfied(phase) {
                                log::debug!(
                                    "tick={tick} task {task_id} reached its {} target",
                                    phase.name()
                                );
                                self.tasks[idx].stop_phase(phase)?;
                            }
                        }
                        AdvanceOutcome::RampedUp | AdvanceOutcome::RampedDown => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Forcibly stop a claimed task's live phase, arming its
    /// ramp-down. The holders keep their assignment and pay the
    /// switching cost over the following ticks. This is the
    /// interruption path; the built-in policy never takes it.
    pub fn interrupt_task(&mut self, task_id: TaskId) -> SimResult<()> {
        let idx = self.task_index(task_id)?;
        let phase = self.tasks[idx]
            .next_actionable_phase()
            .unwrap_or(crate::phase::PhaseKind::Review);
        self.tasks[idx].stop_phase(phase)
    }

    fn is_claimed(&self, task_id: TaskId) -> bool {
        self.assignments
            .get(&task_id)
            .map_or(false, |holders| !holders.is_empty())
    }

    fn task_index(&self, task_id: TaskId) -> SimResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(SimError::TaskNotFound { task: task_id })
    }

    fn release_all(&mut self, task_id: TaskId) {
        if let Some(holders) = self.assignments.remove(&task_id) {
            for member_id in holders {
                if let Some(member) = self.members.iter_mut().find(|m| m.id == member_id) {
                    member.assigned_task = None;
                }
            }
        }
    }

    /// Step applied to each claimed task per tick. Members
    /// collaborate, they do not multiply throughput; a mob mode that
    /// scales the step by member count is the extension point here.
    fn step_per_task(&self) -> f64 {
        match self.mode {
            CollaborationMode::Alone => 1.0,
            CollaborationMode::Mob   => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{PhaseConfig, PhaseConfigSet};
    use crate::task::TaskColor;

    fn configs() -> PhaseConfigSet {
        PhaseConfigSet {
            work:   PhaseConfig::new(5.0, 1.0, 1.0),
            test:   PhaseConfig::new(1.0, 0.0, 0.0),
            review: PhaseConfig::new(1.0, 0.0, 0.0),
        }
    }

    fn team(member_count: u32, task_ids_and_priorities: &[(TaskId, i64)]) -> Team {
        let members = (0..member_count)
            .map(|i| Member::new(i, format!("m{i}")))
            .collect();
        let tasks = task_ids_and_priorities
            .iter()
            .map(|&(id, priority)| Task::new(id, priority, TaskColor::Cyan, configs()))
            .collect();
        Team::new(members, tasks, CollaborationMode::Alone)
    }

    #[test]
    fn assignment_table_mirrors_member_state() {
        let mut team = team(2, &[(0, 0), (1, 1)]);
        team.assign_idle_workers(1);

        for member in team.members() {
            let task_id = member.assigned_task.expect("both members should claim");
            assert!(
                team.assignments[&task_id].contains(&member.id),
                "table must mirror member {}",
                member.id
            );
        }

        team.release_all(0);
        assert!(team.members()[0].is_idle());
        assert!(!team.is_claimed(0));
    }

    #[test]
    fn interrupting_an_unclaimed_open_task_is_an_error() {
        let mut team = team(1, &[(0, 0)]);
        assert!(team.interrupt_task(0).is_err());
        assert!(matches!(
            team.interrupt_task(7),
            Err(SimError::TaskNotFound { task: 7 })
        ));
    }
}
