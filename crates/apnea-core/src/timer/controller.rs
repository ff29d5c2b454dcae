//! Session controller.
//!
//! Drives one [`Plan`] with one clock. The clock is armed while a session is
//! in progress; the driver calls [`TimerController::tick`] every time it
//! fires.
//!
//! ## State Transitions
//!
//! ```text
//! Fresh -> Running <-> CountingUp -> Done
//! ```
//!
//! `Running` counts a timed phase down to zero. `CountingUp` is an open-ended
//! phase: the seconds count up until the user calls `advance()`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = TimerController::new(plan, clock, display, signal, store);
//! controller.start();
//! // Every second:
//! controller.tick();
//! // When the user is done with an open-ended phase:
//! controller.advance();
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::Clock;
use super::ports::{DisplayPort, SignalPort, StorePort};
use crate::plan::{Phase, PhaseDuration, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// First phase loaded, clock not started.
    Fresh,
    /// Counting a timed phase down.
    Running,
    /// Counting an open-ended phase up, waiting for the user.
    CountingUp,
    /// Stopped or finished. Nothing happens after this.
    Done,
}

/// What the display needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: SessionState,
    pub time_label: String,
    pub text_label: String,
    pub seconds: u64,
    /// `None` for an open-ended phase.
    pub phase_secs: Option<u64>,
}

pub struct TimerController<C: Clock> {
    plan: Plan,
    clock: C,
    display: Box<dyn DisplayPort>,
    signal: Box<dyn SignalPort>,
    store: Box<dyn StorePort>,
    state: SessionState,
    /// Remaining seconds while running, elapsed seconds while counting up.
    seconds: u64,
    phase: Phase,
}

impl<C: Clock> TimerController<C> {
    /// Load the plan's first phase without signalling.
    ///
    /// # Panics
    ///
    /// Panics if the plan has no phases or its first phase is open-ended.
    pub fn new(
        mut plan: Plan,
        clock: C,
        display: Box<dyn DisplayPort>,
        signal: Box<dyn SignalPort>,
        store: Box<dyn StorePort>,
    ) -> Self {
        let phase = first_phase(&mut plan);
        let seconds = phase.duration.secs().unwrap_or(0);
        Self {
            plan,
            clock,
            display,
            signal,
            store,
            state: SessionState::Fresh,
            seconds,
            phase,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// `minutes:seconds`, seconds always two digits.
    pub fn time_label(&self) -> String {
        format!("{}:{:02}", self.seconds / 60, self.seconds % 60)
    }

    pub fn text_label(&self) -> String {
        match self.state {
            SessionState::Done => "done".to_string(),
            _ => self.phase.label.clone(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            time_label: self.time_label(),
            text_label: self.text_label(),
            seconds: self.seconds,
            phase_secs: self.phase.duration.secs(),
        }
    }

    /// Seconds spent in the current phase so far.
    pub fn elapsed_in_phase(&self) -> u64 {
        match self.phase.duration {
            PhaseDuration::Timed(total) => total.saturating_sub(self.seconds),
            PhaseDuration::OpenEnded => self.seconds,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session, or re-arm the clock of a counting-up phase.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Fresh => {
                info!(plan = self.plan.descriptor().name, "Session started");
                self.display.on_session_start();
                self.state = SessionState::Running;
                self.clock.schedule();
                self.update_display();
            }
            SessionState::CountingUp => {
                if !self.clock.is_scheduled() {
                    self.clock.schedule();
                }
            }
            SessionState::Running | SessionState::Done => {
                debug!(state = ?self.state, "start ignored");
            }
        }
    }

    /// Stop the session early and log whatever was achieved.
    pub fn stop(&mut self) {
        match self.state {
            SessionState::Running | SessionState::CountingUp => {
                let elapsed = self.elapsed_in_phase();
                debug!(elapsed, label = %self.phase.label, "Stopped by user");
                self.plan.on_stop(elapsed);
                self.finish();
            }
            SessionState::Fresh | SessionState::Done => {
                debug!(state = ?self.state, "stop ignored");
            }
        }
    }

    /// The user ends an open-ended phase.
    pub fn advance(&mut self) {
        if self.state != SessionState::CountingUp {
            debug!(state = ?self.state, "advance ignored");
            return;
        }
        self.transition();
    }

    /// One second passed.
    ///
    /// # Panics
    ///
    /// Panics when called after the session is done.
    pub fn tick(&mut self) {
        match self.state {
            SessionState::Running => {
                self.seconds = self.seconds.saturating_sub(1);
                if self.seconds == 0 {
                    self.transition();
                } else {
                    self.update_display();
                }
            }
            SessionState::CountingUp => {
                self.seconds = self.seconds.saturating_add(1);
                self.update_display();
            }
            SessionState::Fresh => debug!("tick before start ignored"),
            SessionState::Done => panic!("tick after the session is done"),
        }
    }

    /// A fresh copy of this session's plan. Done is final; running the same
    /// configuration again means a new controller built from this.
    pub fn restart_plan(&self) -> Plan {
        self.plan.restart()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn transition(&mut self) {
        self.clock.cancel();
        self.signal.signal();

        let elapsed = self.elapsed_in_phase();
        match self.plan.next_state(Some(elapsed)) {
            Some(phase) => {
                debug!(label = %phase.label, duration = ?phase.duration, "Next phase");
                match phase.duration {
                    PhaseDuration::Timed(secs) => {
                        self.state = SessionState::Running;
                        self.seconds = secs;
                    }
                    PhaseDuration::OpenEnded => {
                        self.state = SessionState::CountingUp;
                        self.seconds = 0;
                    }
                }
                self.phase = phase;
                self.clock.schedule();
                self.update_display();
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.clock.cancel();
        self.state = SessionState::Done;
        match self.plan.record() {
            Some(record) => {
                info!(
                    plan = %record.plan_name,
                    completed_reps = ?record.completed_reps,
                    "Session ended, saving record"
                );
                self.store.append(record);
            }
            None => info!("Session ended without progress"),
        }
        self.display.on_session_end();
        self.update_display();
    }

    fn update_display(&mut self) {
        let snapshot = self.snapshot();
        self.display.update(&snapshot);
    }
}

fn first_phase(plan: &mut Plan) -> Phase {
    let phase = plan.next_state(None).unwrap_or_else(|| {
        panic!("plan '{}' has no phases", plan.descriptor().name)
    });
    assert!(
        !phase.duration.is_open_ended(),
        "plan '{}' starts with an open-ended phase",
        plan.descriptor().name
    );
    phase
}
