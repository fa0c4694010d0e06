//! Report aggregation: counts, run totals, idempotence.

use rampflow_core::{
    config::ScenarioConfig,
    engine::SimEngine,
    phase::{PhaseConfig, PhaseConfigSet},
    report,
    team::CollaborationMode,
};

fn scenario(member_count: usize, task_count: usize, phases: PhaseConfigSet) -> ScenarioConfig {
    ScenarioConfig {
        id: 1,
        description: "report scenario".into(),
        member_count,
        task_count,
        duration_ticks: 1000,
        priorities: None,
        collaboration_mode: CollaborationMode::Alone,
        phases,
    }
}

fn flat_phases(target: f64) -> PhaseConfigSet {
    PhaseConfigSet {
        work:   PhaseConfig::new(target, 0.0, 0.0),
        test:   PhaseConfig::new(target, 0.0, 0.0),
        review: PhaseConfig::new(target, 0.0, 0.0),
    }
}

#[test]
fn completed_and_incomplete_counts() {
    // With unit targets and no overhead, one task takes five working
    // ticks plus a release tick.
    let config = scenario(1, 3, flat_phases(1.0));
    let mut engine = SimEngine::build("report-counts".into(), 1, &config).expect("build");

    engine.run_ticks(8).expect("run");
    let mid = engine.report();
    assert_eq!(mid.completed_count, 1);
    assert_eq!(mid.incomplete_count, 2);

    engine.run_ticks(22).expect("run");
    let done = engine.report();
    assert_eq!(done.completed_count, 3);
    assert_eq!(done.incomplete_count, 0);
}

#[test]
fn aggregation_is_idempotent() {
    let phases = PhaseConfigSet {
        work:   PhaseConfig::new(5.0, 2.0, 1.0),
        test:   PhaseConfig::new(2.0, 1.0, 1.0),
        review: PhaseConfig::new(1.0, 1.0, 1.0),
    };
    let config = scenario(2, 4, phases);
    let mut engine = SimEngine::build("report-idem".into(), 1, &config).expect("build");
    engine.run_ticks(100).expect("run");

    assert_eq!(engine.report(), engine.report());
}

#[test]
fn run_totals_equal_the_sum_of_task_totals() {
    let phases = PhaseConfigSet {
        work:   PhaseConfig::new(6.0, 2.0, 2.0),
        test:   PhaseConfig::new(2.0, 1.0, 1.0),
        review: PhaseConfig::new(1.0, 1.0, 1.0),
    };
    let config = scenario(2, 5, phases);
    let mut engine = SimEngine::build("report-sums".into(), 1, &config).expect("build");
    engine.run_ticks(4).expect("run");
    engine.interrupt_task(0).expect("interrupt");
    engine.run_ticks(76).expect("run");

    let report = engine.report();
    let by_hand = report::total_ramp_times(engine.team().tasks());
    assert_eq!(report.ramp_totals, by_hand);

    let mut manual = report::RampTotals::default();
    for task in engine.team().tasks() {
        manual.absorb(&task.ramp_time_totals());
    }
    assert_eq!(report.ramp_totals, manual);
}

#[test]
fn ticks_continue_as_noops_after_the_backlog_empties() {
    let config = scenario(2, 2, flat_phases(1.0));
    let mut engine = SimEngine::build("report-noop".into(), 1, &config).expect("build");

    engine.run_ticks(50).expect("run");
    let drained = engine.report();
    assert_eq!(drained.completed_count, 2);

    engine.run_ticks(50).expect("run");
    assert_eq!(engine.report(), drained);
    assert_eq!(engine.clock.current_tick, 100);
}
