//! The simulation driver.
//!
//! TICK ORDER (fixed, never reordered):
//!   1. Clock advance
//!   2. Assignment pass  (idle members claim eligible tasks)
//!   3. Advancement pass (one phase-step per claimed task)
//!
//! RULES:
//!   - The two passes never interleave.
//!   - No early termination: ticks after the backlog empties are
//!     no-ops.
//!   - All randomness flows through the RngBank and is cosmetic.

use crate::{
    clock::SimClock,
    config::ScenarioConfig,
    error::SimResult,
    member::Member,
    name_generator::NameGenerator,
    report::{self, ScenarioReport},
    rng::{RngBank, StreamSlot},
    task::{Task, TaskColor},
    team::Team,
    types::{MemberId, RunId, TaskId, Tick},
};

pub struct SimEngine {
    pub run_id: RunId,
    pub clock:  SimClock,
    team:       Team,
}

impl SimEngine {
    /// Build a fully wired engine: validated config, minted tasks and
    /// members, seeded cosmetic streams.
    pub fn build(run_id: RunId, seed: u64, config: &ScenarioConfig) -> SimResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(seed);

        let mut color_rng = rng_bank.for_stream(StreamSlot::TaskColors);
        let tasks: Vec<Task> = (0..config.task_count)
            .map(|i| {
                Task::new(
                    i as TaskId,
                    config.priority_for(i),
                    TaskColor::pick(&mut color_rng),
                    config.phases,
                )
            })
            .collect();

        let mut name_rng = rng_bank.for_stream(StreamSlot::MemberNames);
        let members: Vec<Member> = (0..config.member_count)
            .map(|i| Member::new(i as MemberId, NameGenerator::first_name(&mut name_rng).to_string()))
            .collect();

        log::info!(
            "run {run_id}: {} members, {} tasks, {} ticks",
            config.member_count,
            config.task_count,
            config.duration_ticks
        );

        Ok(Self {
            clock: SimClock::new(run_id.clone()),
            team: Team::new(members, tasks, config.collaboration_mode),
            run_id,
        })
    }

    /// Advance one tick: assignment pass, then advancement pass.
    pub fn tick(&mut self) -> SimResult<Tick> {
        assert!(!self.clock.paused, "tick() called on paused engine");
        let current_tick = self.clock.advance();
        self.team.assign_idle_workers(current_tick);
        self.team.advance_tick(current_tick)?;
        Ok(current_tick)
    }

    /// Run n ticks in a loop. Ticks continue as no-ops once the
    /// backlog empties.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        self.clock.resume();
        for _ in 0..n {
            self.tick()?;
        }
        self.clock.pause();
        Ok(())
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Forcibly stop a task's live phase. See `Team::interrupt_task`.
    pub fn interrupt_task(&mut self, task_id: TaskId) -> SimResult<()> {
        self.team.interrupt_task(task_id)
    }

    /// Aggregate the end-of-run report from the final task set.
    /// Purely derived; calling it repeatedly yields identical totals.
    pub fn report(&self) -> ScenarioReport {
        report::build_report(self.team.tasks())
    }
}
