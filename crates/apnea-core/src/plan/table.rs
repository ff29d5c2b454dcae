use super::{rep_count, Phase, PhaseSequence};
use crate::record::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Rest,
    Hold,
}

/// Rest/hold table: `rest -> hold` repeated `reps` times.
///
/// After each hold the hold length changes by `hold_step` and the rest length
/// by `rest_step`. An O2 table lengthens the hold, a CO2 table shortens the
/// rest. A rest that shrinks to zero or below waits for the user.
#[derive(Debug)]
pub struct Table {
    reps: u32,
    remaining: u32,
    hold_secs: i64,
    rest_secs: i64,
    hold_step: i64,
    rest_step: i64,
    current: Option<Step>,
    stopped_in_hold: bool,
    finished: bool,
}

impl Table {
    /// O2 table: fixed rest, hold grows by `increment` every round.
    pub fn o2(reps: i64, start_secs: i64, increment: i64, rest_secs: i64) -> Self {
        Self::new(reps, start_secs, rest_secs, increment, 0)
    }

    /// CO2 table: fixed hold, rest shrinks by `increment` every round.
    pub fn co2(reps: i64, hold_secs: i64, rest_secs: i64, increment: i64) -> Self {
        Self::new(reps, hold_secs, rest_secs, 0, increment.saturating_neg())
    }

    fn new(reps: i64, hold_secs: i64, rest_secs: i64, hold_step: i64, rest_step: i64) -> Self {
        let reps = rep_count(reps);
        Self {
            reps,
            remaining: reps,
            hold_secs,
            rest_secs,
            hold_step,
            rest_step,
            current: None,
            stopped_in_hold: false,
            finished: false,
        }
    }
}

impl PhaseSequence for Table {
    fn next_phase(&mut self, _elapsed: Option<u64>) -> Option<Phase> {
        if self.remaining == 0 {
            self.finished = true;
            self.current = None;
            return None;
        }

        if self.current == Some(Step::Rest) {
            let phase = Phase::timed(self.hold_secs, format!("hold ({})", self.remaining));
            self.current = Some(Step::Hold);
            self.remaining -= 1;
            self.hold_secs = self.hold_secs.saturating_add(self.hold_step);
            self.rest_secs = self.rest_secs.saturating_add(self.rest_step);
            Some(phase)
        } else {
            self.current = Some(Step::Rest);
            Some(Phase::timed(self.rest_secs, format!("rest ({})", self.remaining)))
        }
    }

    fn on_stop(&mut self, _elapsed: u64) {
        self.stopped_in_hold = self.current == Some(Step::Hold);
    }

    fn progress(&self) -> Option<Progress> {
        let completed = self.reps - self.remaining - u32::from(self.stopped_in_hold);
        Progress::reps(completed, self.finished)
    }
}
