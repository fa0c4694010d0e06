//! Assignment-policy tests: greedy, single-pass, no preemption.

use rampflow_core::{
    member::Member,
    phase::{PhaseConfig, PhaseConfigSet, PhaseKind},
    task::{Task, TaskColor},
    team::{CollaborationMode, Team},
};

fn phases(target: f64, up: f64, down: f64) -> PhaseConfigSet {
    PhaseConfigSet {
        work:   PhaseConfig::new(target, up, down),
        test:   PhaseConfig::new(target, up, down),
        review: PhaseConfig::new(target, up, down),
    }
}

fn build_team(member_count: u32, specs: &[(u32, i64)], set: PhaseConfigSet) -> Team {
    let members = (0..member_count)
        .map(|i| Member::new(i, format!("member-{i}")))
        .collect();
    let tasks = specs
        .iter()
        .map(|&(id, priority)| Task::new(id, priority, TaskColor::Blue, set))
        .collect();
    Team::new(members, tasks, CollaborationMode::Alone)
}

fn run(team: &mut Team, ticks: u64) {
    for tick in 1..=ticks {
        team.assign_idle_workers(tick);
        team.advance_tick(tick).expect("advance");
    }
}

#[test]
fn lowest_priority_value_wins() {
    let mut team = build_team(1, &[(0, 5), (1, 2), (2, 9)], phases(3.0, 0.0, 0.0));
    team.assign_idle_workers(1);
    assert_eq!(team.members()[0].assigned_task, Some(1));
}

#[test]
fn equal_priorities_break_on_lowest_task_id() {
    let mut team = build_team(1, &[(3, 1), (1, 1), (2, 1)], phases(3.0, 0.0, 0.0));
    team.assign_idle_workers(1);
    assert_eq!(team.members()[0].assigned_task, Some(1));
}

#[test]
fn a_claim_hides_the_task_within_the_same_pass() {
    let mut team = build_team(2, &[(0, 0), (1, 1)], phases(3.0, 0.0, 0.0));
    team.assign_idle_workers(1);
    assert_eq!(team.members()[0].assigned_task, Some(0));
    assert_eq!(team.members()[1].assigned_task, Some(1));
}

#[test]
fn an_idle_member_never_displaces_an_existing_claim() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut team = build_team(2, &[(0, 0)], phases(10.0, 2.0, 1.0));
    team.assign_idle_workers(1);
    assert_eq!(team.members()[0].assigned_task, Some(0));
    assert!(team.members()[1].is_idle());

    // The claim holds over later passes; the second member stays idle
    // for as long as the backlog offers nothing unclaimed.
    for tick in 1..=5 {
        team.advance_tick(tick).expect("advance");
        team.assign_idle_workers(tick + 1);
        assert_eq!(team.members()[0].assigned_task, Some(0));
        assert!(team.members()[1].is_idle());
    }
}

#[test]
fn members_flow_to_the_next_task_after_completion() {
    let mut team = build_team(1, &[(0, 0), (1, 1)], phases(1.0, 0.0, 0.0));
    run(&mut team, 20);

    assert!(team.task(0).expect("task 0").is_done());
    assert!(team.task(1).expect("task 1").is_done());
    assert!(team.members()[0].is_idle(), "drained backlog leaves the member idle");
}

#[test]
fn test_phase_never_starts_before_the_work_target() {
    let mut team = build_team(2, &[(0, 0), (1, 1), (2, 2)], phases(4.0, 2.0, 1.0));

    for tick in 1..=200 {
        team.assign_idle_workers(tick);
        team.advance_tick(tick).expect("advance");

        for task in team.tasks() {
            if task.phase(PhaseKind::Test).progress > 0.0 {
                assert!(task.work_done(), "task {} tested before work done", task.id);
            }
            if task.phase(PhaseKind::Review).progress > 0.0 {
                assert!(task.tested(), "task {} reviewed before tested", task.id);
            }
        }
    }
}

#[test]
fn progress_never_decreases() {
    let mut team = build_team(1, &[(0, 0), (1, 1)], phases(5.0, 2.0, 2.0));
    let mut previous = vec![[0.0f64; 3]; 2];

    for tick in 1..=120 {
        team.assign_idle_workers(tick);
        team.advance_tick(tick).expect("advance");

        for (i, task) in team.tasks().iter().enumerate() {
            for (j, phase) in PhaseKind::ALL.into_iter().enumerate() {
                let progress = task.phase(phase).progress;
                assert!(
                    progress >= previous[i][j],
                    "task {} {} progress moved backwards at tick {tick}",
                    task.id,
                    phase.name()
                );
                previous[i][j] = progress;
            }
        }
    }
}
