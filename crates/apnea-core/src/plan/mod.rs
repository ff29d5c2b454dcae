//! Training plans.
//!
//! A plan is a deterministic sequence of [`Phase`]s. The controller asks for
//! the next phase each time the current one ends; `None` means the plan is
//! finished and must not be asked again.
//!
//! ## Variants
//!
//! - O2 and CO2 tables alternate rest and hold, one growing the hold, the
//!   other shrinking the rest ([`Table`]).
//! - One breath CO2 tables alternate a hold with an open-ended breath.
//! - Max hold runs a fixed warm-up and finishes with an open-ended hold.
//! - Breathe alternates inhale and exhale.

pub mod catalog;
mod breathe;
mod max_hold;
mod one_breath;
mod phase;
mod table;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use breathe::Breathe;
pub use catalog::{PlanDescriptor, PlanKind};
pub use max_hold::MaxHold;
pub use one_breath::OneBreathCo2Table;
pub use phase::{Phase, PhaseDuration};
pub use table::Table;

use crate::record::{Progress, SessionRecord};

/// Stable identity of a catalog entry.
///
/// Ids are never reused: a plan whose phase sequence changes gets a new id so
/// that old saved configurations cannot resolve to different behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub u32);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Behaviour shared by every plan variant.
pub(crate) trait PhaseSequence {
    /// Advance to the next phase. `elapsed` is how long the phase that just
    /// ended actually ran.
    fn next_phase(&mut self, elapsed: Option<u64>) -> Option<Phase>;

    /// The user stopped the session `elapsed` seconds into the current phase.
    fn on_stop(&mut self, elapsed: u64);

    /// Progress worth recording, or `None` when nothing was done.
    fn progress(&self) -> Option<Progress>;
}

#[derive(Debug)]
enum Variant {
    O2Table(Table),
    Co2Table(Table),
    OneBreathCo2Table(OneBreathCo2Table),
    MaxHold(MaxHold),
    Breathe(Breathe),
}

impl Variant {
    fn sequence(&self) -> &dyn PhaseSequence {
        match self {
            Variant::O2Table(p) | Variant::Co2Table(p) => p,
            Variant::OneBreathCo2Table(p) => p,
            Variant::MaxHold(p) => p,
            Variant::Breathe(p) => p,
        }
    }

    fn sequence_mut(&mut self) -> &mut dyn PhaseSequence {
        match self {
            Variant::O2Table(p) | Variant::Co2Table(p) => p,
            Variant::OneBreathCo2Table(p) => p,
            Variant::MaxHold(p) => p,
            Variant::Breathe(p) => p,
        }
    }
}

/// A configured, running instance of a catalog entry.
#[derive(Debug)]
pub struct Plan {
    desc: &'static PlanDescriptor,
    args: Vec<i64>,
    variant: Variant,
    exhausted: bool,
}

impl Plan {
    /// Arguments must already match `desc.arg_names`; see [`PlanDescriptor::make`].
    pub(crate) fn build(desc: &'static PlanDescriptor, args: Vec<i64>) -> Self {
        debug_assert_eq!(args.len(), desc.arg_names.len());
        let variant = match desc.kind {
            PlanKind::O2Table => Variant::O2Table(Table::o2(args[0], args[1], args[2], args[3])),
            PlanKind::Co2Table => Variant::Co2Table(Table::co2(args[0], args[1], args[2], args[3])),
            PlanKind::OneBreathCo2Table => {
                Variant::OneBreathCo2Table(OneBreathCo2Table::new(args[0], args[1]))
            }
            PlanKind::MaxHold => Variant::MaxHold(MaxHold::new()),
            PlanKind::Breathe => Variant::Breathe(Breathe::new(args[0], args[1], args[2])),
        };
        Self {
            desc,
            args,
            variant,
            exhausted: false,
        }
    }

    pub fn descriptor(&self) -> &'static PlanDescriptor {
        self.desc
    }

    pub fn args(&self) -> &[i64] {
        &self.args
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Advance to the next phase.
    ///
    /// # Panics
    ///
    /// Panics if the plan already returned `None`.
    pub fn next_state(&mut self, elapsed: Option<u64>) -> Option<Phase> {
        assert!(
            !self.exhausted,
            "plan '{}' advanced after it was exhausted",
            self.desc.name
        );
        let next = self.variant.sequence_mut().next_phase(elapsed);
        if next.is_none() {
            self.exhausted = true;
        }
        next
    }

    /// A new instance with the same configuration and no progress.
    pub fn restart(&self) -> Plan {
        Plan::build(self.desc, self.args.clone())
    }

    /// Tell the plan the user stopped `elapsed` seconds into the current phase.
    pub fn on_stop(&mut self, elapsed: u64) {
        if !self.exhausted {
            self.variant.sequence_mut().on_stop(elapsed);
        }
    }

    /// The record to keep for this run, or `None` if nothing was achieved.
    pub fn record(&self) -> Option<SessionRecord> {
        let progress = self.variant.sequence().progress()?;
        let mut record = SessionRecord::new(self.desc, &self.args);
        record.details = progress.details;
        record.completed_reps = progress.completed_reps;
        Some(record)
    }
}

/// Repetition counts arrive as signed arguments; negatives mean none.
pub(crate) fn rep_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
