use crate::task::TaskState;
use crate::types::TaskId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// A phase operation was invoked while the task was not in the
    /// required lifecycle state. The scheduler checks state before
    /// every dispatch, so this surfacing at all aborts the run.
    #[error("Invalid state transition: {op} on task {task} while {state:?}")]
    InvalidStateTransition {
        task:  TaskId,
        op:    &'static str,
        state: TaskState,
    },

    #[error("Task {task} not found")]
    TaskNotFound { task: TaskId },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
