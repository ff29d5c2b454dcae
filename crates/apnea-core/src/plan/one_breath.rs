use super::{rep_count, Phase, PhaseSequence};
use crate::record::{Progress, RecordEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Hold,
    Breath,
}

/// One breath CO2 table: `hold -> one breath` repeated `reps` times.
///
/// The breath is open-ended; how long the user took is kept as a detail, one
/// entry per breath.
#[derive(Debug)]
pub struct OneBreathCo2Table {
    remaining: u32,
    hold_secs: i64,
    current: Option<Step>,
    breaths: Vec<RecordEntry>,
    finished: bool,
}

impl OneBreathCo2Table {
    pub fn new(reps: i64, hold_secs: i64) -> Self {
        Self {
            remaining: rep_count(reps),
            hold_secs,
            current: None,
            breaths: Vec::new(),
            finished: false,
        }
    }

    fn log_breath(&mut self, secs: u64) {
        let n = self.breaths.len() + 1;
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        self.breaths.push(RecordEntry::new(format!("breath {n} (s)"), secs));
    }
}

impl PhaseSequence for OneBreathCo2Table {
    fn next_phase(&mut self, elapsed: Option<u64>) -> Option<Phase> {
        if self.current == Some(Step::Breath) {
            self.log_breath(elapsed.unwrap_or(0));
        }

        if self.remaining == 0 {
            self.finished = true;
            self.current = None;
            return None;
        }

        if self.current == Some(Step::Hold) {
            self.current = Some(Step::Breath);
            Some(Phase::open_ended(format!("one breath ({})", self.remaining + 1)))
        } else {
            let phase = Phase::timed(self.hold_secs, format!("hold ({})", self.remaining));
            self.current = Some(Step::Hold);
            self.remaining -= 1;
            Some(phase)
        }
    }

    fn on_stop(&mut self, elapsed: u64) {
        // The hold before this breath was finished; keep the partial breath.
        if self.current == Some(Step::Breath) {
            self.log_breath(elapsed);
            self.current = None;
        }
    }

    fn progress(&self) -> Option<Progress> {
        if self.breaths.is_empty() {
            return None;
        }
        let completed_reps = if self.finished {
            None
        } else {
            Some(u32::try_from(self.breaths.len()).unwrap_or(u32::MAX))
        };
        Some(Progress {
            details: self.breaths.clone(),
            completed_reps,
        })
    }
}
