//! Scenario configuration: the record a caller hands to the engine.
//!
//! RULE: no process-wide state. Every knob travels through this value,
//! and validation happens before the first tick.

use crate::{
    error::{SimError, SimResult},
    phase::{PhaseConfig, PhaseConfigSet, PhaseKind},
    team::CollaborationMode,
    types::Tick,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub id:             u32,
    pub description:    String,
    pub member_count:   usize,
    pub task_count:     usize,
    pub duration_ticks: Tick,
    /// One priority per task, lower = more important. When absent, the
    /// task id doubles as its priority.
    #[serde(default)]
    pub priorities: Option<Vec<i64>>,
    #[serde(default)]
    pub collaboration_mode: CollaborationMode,
    pub phases: PhaseConfigSet,
}

impl ScenarioConfig {
    /// Default phase set: an eight-hour work target with a tenth of
    /// it for testing and a twentieth for review.
    pub fn default_phases() -> PhaseConfigSet {
        PhaseConfigSet {
            work:   PhaseConfig::new(480.0, 7.0, 4.0),
            test:   PhaseConfig::new(48.0, 7.0, 4.0),
            review: PhaseConfig::new(24.0, 7.0, 4.0),
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.member_count == 0 {
            return Err(SimError::Configuration("member_count must be > 0".into()));
        }
        if self.task_count == 0 {
            return Err(SimError::Configuration("task_count must be > 0".into()));
        }
        if self.duration_ticks == 0 {
            return Err(SimError::Configuration("duration_ticks must be > 0".into()));
        }
        if let Some(priorities) = &self.priorities {
            if priorities.len() != self.task_count {
                return Err(SimError::Configuration(format!(
                    "priorities has {} entries for {} tasks",
                    priorities.len(),
                    self.task_count
                )));
            }
        }
        for phase in PhaseKind::ALL {
            let config = self.phases.get(phase);
            if config.target_amount < 0.0
                || config.ramp_up_amount < 0.0
                || config.ramp_down_amount < 0.0
            {
                return Err(SimError::Configuration(format!(
                    "{} phase amounts must be >= 0",
                    phase.name()
                )));
            }
        }
        Ok(())
    }

    pub fn priority_for(&self, task_index: usize) -> i64 {
        match &self.priorities {
            Some(priorities) => priorities[task_index],
            None             => task_index as i64,
        }
    }
}

/// Load a scenario catalog from a JSON file: either a single scenario
/// object or an array of them.
pub fn load_scenarios(path: &Path) -> SimResult<Vec<ScenarioConfig>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        SimError::Configuration(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_scenarios(&raw)
}

pub fn parse_scenarios(raw: &str) -> SimResult<Vec<ScenarioConfig>> {
    let scenarios: Vec<ScenarioConfig> = if raw.trim_start().starts_with('[') {
        serde_json::from_str(raw)?
    } else {
        vec![serde_json::from_str(raw)?]
    };
    for scenario in &scenarios {
        scenario.validate()?;
    }
    Ok(scenarios)
}
