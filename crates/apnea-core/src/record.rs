//! Session records handed to the log book when a session ends.

use serde::{Deserialize, Serialize};

use crate::plan::{PlanDescriptor, PlanId};

/// A named integer, used both for the plan arguments and for measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub name: String,
    pub value: i64,
}

impl RecordEntry {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Summary of what the user actually did during one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub plan_id: PlanId,
    pub plan_name: String,
    pub args: Vec<RecordEntry>,
    /// Measurements taken while running, e.g. the length of a max hold.
    #[serde(default)]
    pub details: Vec<RecordEntry>,
    /// `None` when the whole plan was completed.
    #[serde(default)]
    pub completed_reps: Option<u32>,
}

impl SessionRecord {
    pub fn new(desc: &PlanDescriptor, args: &[i64]) -> Self {
        Self {
            plan_id: desc.id,
            plan_name: desc.name.to_string(),
            args: desc
                .arg_names
                .iter()
                .zip(args)
                .map(|(name, value)| RecordEntry::new(*name, *value))
                .collect(),
            details: Vec::new(),
            completed_reps: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed_reps.is_none()
    }
}

/// What a plan reports about its own progress; the plan wrapper adds the
/// descriptor and arguments to turn it into a [`SessionRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub details: Vec<RecordEntry>,
    pub completed_reps: Option<u32>,
}

impl Progress {
    /// Completed reps, or `None` for a fully finished plan; suppressed
    /// entirely when nothing was done, even if the plan ran out of phases.
    pub(crate) fn reps(completed: u32, finished: bool) -> Option<Self> {
        if completed == 0 {
            return None;
        }
        if finished {
            return Some(Self::default());
        }
        Some(Self {
            details: Vec::new(),
            completed_reps: Some(completed),
        })
    }
}
