use super::{rep_count, Phase, PhaseSequence};
use crate::record::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Inhale,
    Exhale,
}

/// Paced breathing: `inhale -> exhale` repeated `reps` times.
#[derive(Debug)]
pub struct Breathe {
    reps: u32,
    remaining: u32,
    inhale_secs: i64,
    exhale_secs: i64,
    current: Option<Step>,
    interrupted: bool,
    finished: bool,
}

impl Breathe {
    pub fn new(reps: i64, inhale_secs: i64, exhale_secs: i64) -> Self {
        let reps = rep_count(reps);
        Self {
            reps,
            remaining: reps,
            inhale_secs,
            exhale_secs,
            current: None,
            interrupted: false,
            finished: false,
        }
    }
}

impl PhaseSequence for Breathe {
    fn next_phase(&mut self, _elapsed: Option<u64>) -> Option<Phase> {
        if self.current == Some(Step::Inhale) {
            self.current = Some(Step::Exhale);
            return Some(Phase::timed(
                self.exhale_secs,
                format!("exhale ({})", self.remaining + 1),
            ));
        }

        if self.remaining == 0 {
            self.finished = true;
            self.current = None;
            return None;
        }
        let phase = Phase::timed(self.inhale_secs, format!("inhale ({})", self.remaining));
        self.current = Some(Step::Inhale);
        self.remaining -= 1;
        Some(phase)
    }

    fn on_stop(&mut self, _elapsed: u64) {
        self.interrupted = self.current.is_some();
    }

    fn progress(&self) -> Option<Progress> {
        let completed = self.reps - self.remaining - u32::from(self.interrupted);
        Progress::reps(completed, self.finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PhaseDuration;

    #[test]
    fn inhale_and_exhale_alternate() {
        let mut plan = Breathe::new(2, 4, 6);
        let labels: Vec<_> = std::iter::from_fn(|| plan.next_phase(None))
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, ["inhale (2)", "exhale (2)", "inhale (1)", "exhale (1)"]);
        assert!(plan.finished);
    }

    #[test]
    fn phase_lengths_follow_arguments() {
        let mut plan = Breathe::new(1, 4, 6);
        assert_eq!(plan.next_phase(None).unwrap().duration, PhaseDuration::Timed(4));
        assert_eq!(plan.next_phase(None).unwrap().duration, PhaseDuration::Timed(6));
        assert_eq!(plan.next_phase(None), None);
    }

    #[test]
    fn stop_counts_only_whole_breaths() {
        let mut plan = Breathe::new(5, 4, 6);
        for _ in 0..5 {
            plan.next_phase(None);
        }
        // third inhale in progress
        plan.on_stop(1);
        assert_eq!(plan.progress().unwrap().completed_reps, Some(2));
    }

    #[test]
    fn stop_in_first_breath_records_nothing() {
        let mut plan = Breathe::new(5, 4, 6);
        plan.next_phase(None);
        plan.next_phase(None);
        plan.on_stop(2);
        assert_eq!(plan.progress(), None);
    }

    #[test]
    fn zero_reps_finishes_without_record() {
        let mut plan = Breathe::new(0, 4, 6);
        assert_eq!(plan.next_phase(None), None);
        assert!(plan.finished);
        assert_eq!(plan.progress(), None);
    }
}
