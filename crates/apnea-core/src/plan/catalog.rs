//! The fixed set of plans the app offers, in display order.

use serde::Serialize;
use tracing::warn;

use super::{Plan, PlanId};
use crate::error::PlanError;

/// Which state machine a catalog entry instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    O2Table,
    Co2Table,
    OneBreathCo2Table,
    MaxHold,
    Breathe,
}

/// Catalog entry: identity, display name and argument list of a plan.
#[derive(Debug, Serialize)]
pub struct PlanDescriptor {
    pub id: PlanId,
    pub name: &'static str,
    pub arg_names: &'static [&'static str],
    pub arg_defaults: &'static [i64],
    pub kind: PlanKind,
}

// Ids need not be sequential. Largest id in use: 6.
static CATALOG: [PlanDescriptor; 6] = [
    PlanDescriptor {
        id: PlanId(0),
        name: "O2 table",
        arg_names: &["reps", "start time (s)", "increment (s)", "rest time (s)"],
        arg_defaults: &[6, 120, 15, 120],
        kind: PlanKind::O2Table,
    },
    PlanDescriptor {
        id: PlanId(2),
        name: "O2 table (exhale)",
        arg_names: &["reps", "start time (s)", "increment (s)", "rest time (s)"],
        arg_defaults: &[7, 30, 10, 60],
        kind: PlanKind::O2Table,
    },
    PlanDescriptor {
        id: PlanId(4),
        name: "CO2 table",
        arg_names: &["reps", "time (s)", "starting rest time (s)", "increment (s)"],
        arg_defaults: &[6, 120, 120, 15],
        kind: PlanKind::Co2Table,
    },
    PlanDescriptor {
        id: PlanId(3),
        name: "One breath CO2 table",
        arg_names: &["reps", "time (s)"],
        arg_defaults: &[6, 95],
        kind: PlanKind::OneBreathCo2Table,
    },
    PlanDescriptor {
        id: PlanId(5),
        name: "Max hold",
        arg_names: &[],
        arg_defaults: &[],
        kind: PlanKind::MaxHold,
    },
    PlanDescriptor {
        id: PlanId(6),
        name: "Breathe",
        arg_names: &["reps", "inhale (s)", "exhale (s)"],
        arg_defaults: &[10, 4, 6],
        kind: PlanKind::Breathe,
    },
];

/// All plans, in display order.
pub fn list() -> &'static [PlanDescriptor] {
    &CATALOG
}

/// The plan used when nothing else is configured.
pub fn default_descriptor() -> &'static PlanDescriptor {
    &CATALOG[0]
}

pub fn lookup(id: PlanId) -> Result<&'static PlanDescriptor, PlanError> {
    CATALOG
        .iter()
        .find(|desc| desc.id == id)
        .ok_or(PlanError::UnknownPlanId(id))
}

/// The entry for a saved id, or the default entry when the id is gone.
pub fn resolve(id: PlanId) -> &'static PlanDescriptor {
    lookup(id).unwrap_or_else(|e| {
        warn!("Saved plan could not be restored ({e}); using default plan");
        default_descriptor()
    })
}

/// Rebuild a previously saved plan, falling back to the default plan when the
/// id is gone or the saved arguments no longer fit.
pub fn resurrect(id: PlanId, args: &[i64]) -> Plan {
    match lookup(id).and_then(|desc| desc.make(args)) {
        Ok(plan) => plan,
        Err(e) => {
            warn!("Saved plan could not be restored ({e}); using default plan");
            default_descriptor().make_default()
        }
    }
}

impl PlanDescriptor {
    pub fn make_default(&'static self) -> Plan {
        Plan::build(self, self.arg_defaults.to_vec())
    }

    /// # Errors
    ///
    /// Returns [`PlanError::InvalidArguments`] when `args` does not have one
    /// value per argument name.
    pub fn make(&'static self, args: &[i64]) -> Result<Plan, PlanError> {
        if args.len() != self.arg_names.len() {
            return Err(PlanError::InvalidArguments {
                plan: self.name,
                expected: self.arg_names.len(),
                actual: args.len(),
            });
        }
        Ok(Plan::build(self, args.to_vec()))
    }
}
