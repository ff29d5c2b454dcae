use super::{Phase, PhaseSequence};
use crate::record::{Progress, RecordEntry};

const WARM_UP_REST_SECS: i64 = 120;
const WARM_UP_HOLD_SECS: i64 = 120;
const REST_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    NotStarted,
    WarmUpRest,
    WarmUpHold,
    Rest,
    MaxHold,
    Done,
}

/// Warm-up rest, warm-up hold, long rest, then a single open-ended max hold.
#[derive(Debug)]
pub struct MaxHold {
    stage: Stage,
    details: Vec<RecordEntry>,
    held: bool,
}

impl MaxHold {
    pub fn new() -> Self {
        Self {
            stage: Stage::NotStarted,
            details: Vec::new(),
            held: false,
        }
    }

    fn log(&mut self, name: &str, secs: u64) {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        self.details.push(RecordEntry::new(name, secs));
    }
}

impl Default for MaxHold {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseSequence for MaxHold {
    fn next_phase(&mut self, elapsed: Option<u64>) -> Option<Phase> {
        let (stage, phase) = match self.stage {
            Stage::NotStarted => (
                Stage::WarmUpRest,
                Some(Phase::timed(WARM_UP_REST_SECS, "warm-up rest")),
            ),
            Stage::WarmUpRest => (
                Stage::WarmUpHold,
                Some(Phase::timed(WARM_UP_HOLD_SECS, "warm-up hold")),
            ),
            Stage::WarmUpHold => {
                self.log("warm-up hold (s)", elapsed.unwrap_or(WARM_UP_HOLD_SECS as u64));
                (Stage::Rest, Some(Phase::timed(REST_SECS, "rest")))
            }
            Stage::Rest => (Stage::MaxHold, Some(Phase::open_ended("max hold"))),
            Stage::MaxHold => {
                self.log("max hold (s)", elapsed.unwrap_or(0));
                self.held = true;
                (Stage::Done, None)
            }
            Stage::Done => (Stage::Done, None),
        };
        self.stage = stage;
        phase
    }

    fn on_stop(&mut self, elapsed: u64) {
        match self.stage {
            Stage::WarmUpHold => self.log("warm-up hold (s)", elapsed),
            Stage::MaxHold => {
                self.log("max hold (s)", elapsed);
                self.held = true;
            }
            _ => {}
        }
        self.stage = Stage::Done;
    }

    fn progress(&self) -> Option<Progress> {
        if self.details.is_empty() {
            return None;
        }
        Some(Progress {
            details: self.details.clone(),
            completed_reps: if self.held { None } else { Some(0) },
        })
    }
}
