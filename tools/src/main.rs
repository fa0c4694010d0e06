//! sim-runner: headless scenario runner for rampflow.
//!
//! Usage:
//!   sim-runner --seed 42
//!   sim-runner --members 2 --tasks 10 --ticks 4800
//!   sim-runner --ramp-up 7 --ramp-down 4
//!   sim-runner --config scenarios.json --json

use anyhow::Result;
use rampflow_core::{
    config::{self, ScenarioConfig},
    engine::SimEngine,
    phase::PhaseKind,
    report::ScenarioReport,
};
use std::env;
use std::path::Path;

#[derive(serde::Serialize)]
struct ReportLine<'a> {
    scenario_id: u32,
    description: &'a str,
    run_id:      &'a str,
    report:      &'a ScenarioReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let json_mode = args.iter().any(|a| a == "--json");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].clone());

    let mut scenarios = match &config_path {
        Some(path) => config::load_scenarios(Path::new(path))?,
        None       => builtin_scenarios(),
    };
    apply_overrides(&mut scenarios, &args);
    for scenario in &scenarios {
        scenario.validate()?;
    }

    if !json_mode {
        println!("rampflow sim-runner");
        println!("  seed:      {seed}");
        println!("  scenarios: {}", scenarios.len());
        println!("  started:   {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();
    }

    for scenario in &scenarios {
        let run_id = format!("run-{seed}-{}", uuid::Uuid::new_v4());
        let mut engine = SimEngine::build(run_id.clone(), seed, scenario)?;
        engine.run_ticks(scenario.duration_ticks)?;
        let report = engine.report();

        if json_mode {
            let line = ReportLine {
                scenario_id: scenario.id,
                description: &scenario.description,
                run_id:      &run_id,
                report:      &report,
            };
            println!("{}", serde_json::to_string(&line)?);
        } else {
            print_summary(scenario, &run_id, &report);
        }
    }

    Ok(())
}

/// The built-in scenario catalog: a ten-task backlog over 4800 ticks,
/// varied over member count and switching overhead.
fn builtin_scenarios() -> Vec<ScenarioConfig> {
    let base = |id, member_count, description: &str| ScenarioConfig {
        id,
        description: description.to_string(),
        member_count,
        task_count: 10,
        duration_ticks: 4800,
        priorities: None,
        collaboration_mode: Default::default(),
        phases: ScenarioConfig::default_phases(),
    };

    let mut no_overhead = base(3, 1, "One member, 10 tasks, no switching overhead");
    no_overhead.phases.work   = zero_ramp(no_overhead.phases.work);
    no_overhead.phases.test   = zero_ramp(no_overhead.phases.test);
    no_overhead.phases.review = zero_ramp(no_overhead.phases.review);

    let mut steep = base(4, 2, "Two members, 10 tasks, steep ramps");
    steep.phases.work.ramp_up_amount = 14.0;
    steep.phases.work.ramp_down_amount = 8.0;
    steep.phases.test.ramp_up_amount = 14.0;
    steep.phases.test.ramp_down_amount = 8.0;
    steep.phases.review.ramp_up_amount = 14.0;
    steep.phases.review.ramp_down_amount = 8.0;

    vec![
        base(1, 1, "One member, 10 tasks, default ramps"),
        base(2, 2, "Two members, 10 tasks, default ramps"),
        no_overhead,
        steep,
    ]
}

fn zero_ramp(mut config: rampflow_core::phase::PhaseConfig) -> rampflow_core::phase::PhaseConfig {
    config.ramp_up_amount = 0.0;
    config.ramp_down_amount = 0.0;
    config
}

fn apply_overrides(scenarios: &mut [ScenarioConfig], args: &[String]) {
    if let Some(ticks) = find_arg::<u64>(args, "--ticks") {
        for s in scenarios.iter_mut() {
            s.duration_ticks = ticks;
        }
    }
    if let Some(members) = find_arg::<usize>(args, "--members") {
        for s in scenarios.iter_mut() {
            s.member_count = members;
        }
    }
    if let Some(tasks) = find_arg::<usize>(args, "--tasks") {
        for s in scenarios.iter_mut() {
            s.task_count = tasks;
            s.priorities = None;
        }
    }
    if let Some(ramp_up) = find_arg::<f64>(args, "--ramp-up") {
        for s in scenarios.iter_mut() {
            s.phases.work.ramp_up_amount = ramp_up;
            s.phases.test.ramp_up_amount = ramp_up;
            s.phases.review.ramp_up_amount = ramp_up;
        }
    }
    if let Some(ramp_down) = find_arg::<f64>(args, "--ramp-down") {
        for s in scenarios.iter_mut() {
            s.phases.work.ramp_down_amount = ramp_down;
            s.phases.test.ramp_down_amount = ramp_down;
            s.phases.review.ramp_down_amount = ramp_down;
        }
    }
}

fn print_summary(scenario: &ScenarioConfig, run_id: &str, report: &ScenarioReport) {
    println!("=== SCENARIO {}: {} ===", scenario.id, scenario.description);
    println!("  run_id:     {run_id}");
    println!("  members:    {}", scenario.member_count);
    println!("  tasks:      {}", scenario.task_count);
    println!("  ticks:      {}", scenario.duration_ticks);
    println!("  completed:  {}", report.completed_count);
    println!("  incomplete: {}", report.incomplete_count);
    println!("  ramp totals (up / down):");
    for phase in PhaseKind::ALL {
        let totals = report.ramp_totals.get(phase);
        println!(
            "    {:<7} {:>8.1} / {:.1}",
            phase.name(),
            totals.ramp_up,
            totals.ramp_down
        );
    }
    println!();
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag).unwrap_or(default)
}

fn find_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
