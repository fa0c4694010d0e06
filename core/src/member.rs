//! A team member: an agent with at most one assigned task at a time.

use crate::types::{MemberId, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id:   MemberId,
    pub name: String,
    /// Non-owning reference into the scheduler's task collection.
    /// Maintained by the scheduler together with its assignment table.
    pub assigned_task: Option<TaskId>,
}

impl Member {
    pub fn new(id: MemberId, name: String) -> Self {
        Self {
            id,
            name,
            assigned_task: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.assigned_task.is_none()
    }
}
