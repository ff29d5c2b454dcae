//! Integration tests driving whole sessions through the timer controller.

use std::cell::RefCell;
use std::rc::Rc;

use apnea_core::{
    catalog, Clock, Database, DisplayPort, ManualClock, MemoryStore, PlanId, SessionState, SignalPort,
    Snapshot, TimerController,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    SessionStart,
    SessionEnd,
    Update(String, String),
    Signal,
}

#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Recorder {
    fn count(&self, wanted: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == wanted).count()
    }

    fn signals(&self) -> usize {
        self.count(&Call::Signal)
    }

    fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for call in self.calls.borrow().iter() {
            if let Call::Update(_, text) = call {
                if labels.last() != Some(text) {
                    labels.push(text.clone());
                }
            }
        }
        labels
    }
}

impl DisplayPort for Recorder {
    fn on_session_start(&mut self) {
        self.calls.borrow_mut().push(Call::SessionStart);
    }

    fn on_session_end(&mut self) {
        self.calls.borrow_mut().push(Call::SessionEnd);
    }

    fn update(&mut self, snapshot: &Snapshot) {
        self.calls.borrow_mut().push(Call::Update(
            snapshot.time_label.clone(),
            snapshot.text_label.clone(),
        ));
    }
}

impl SignalPort for Recorder {
    fn signal(&mut self) {
        self.calls.borrow_mut().push(Call::Signal);
    }
}

fn session(id: u32, args: &[i64]) -> (TimerController<ManualClock>, Recorder, MemoryStore) {
    let plan = catalog::lookup(PlanId(id)).unwrap().make(args).unwrap();
    let recorder = Recorder::default();
    let store = MemoryStore::new();
    let controller = TimerController::new(
        plan,
        ManualClock::new(),
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
        Box::new(store.clone()),
    );
    (controller, recorder, store)
}

fn run_ticks(controller: &mut TimerController<ManualClock>, n: usize) {
    for _ in 0..n {
        controller.tick();
    }
}

#[test]
fn o2_table_runs_to_completion() {
    let (mut controller, recorder, store) = session(0, &[3, 10, 2, 5]);
    controller.start();
    // three rests of 5 plus holds of 10, 12, 14
    run_ticks(&mut controller, 5 + 10 + 5 + 12 + 5 + 14);

    assert_eq!(controller.state(), SessionState::Done);
    assert_eq!(controller.text_label(), "done");
    assert_eq!(
        recorder.labels(),
        [
            "rest (3)", "hold (3)", "rest (2)", "hold (2)", "rest (1)", "hold (1)", "done"
        ]
    );
    // five transitions between six phases, plus the one that ends the plan
    assert_eq!(recorder.signals(), 6);
    assert_eq!(recorder.count(&Call::SessionStart), 1);
    assert_eq!(recorder.count(&Call::SessionEnd), 1);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].completed_reps, None);
    assert!(!controller.clock().is_scheduled());
}

#[test]
fn start_does_not_signal() {
    let (mut controller, recorder, _) = session(0, &[3, 10, 2, 5]);
    controller.start();
    controller.tick();
    assert_eq!(recorder.signals(), 0);
    assert_eq!(
        recorder.calls.borrow()[0],
        Call::SessionStart,
        "display told about the session before the first update"
    );
}

#[test]
fn clock_is_cancelled_before_every_reschedule() {
    let (mut controller, _, _) = session(0, &[2, 3, 1, 2]);
    controller.start();
    run_ticks(&mut controller, 2 + 3);
    // start plus two transitions
    assert_eq!(controller.clock().schedules(), 3);
    assert_eq!(controller.clock().cancels(), 2);
    assert!(controller.clock().is_scheduled());
}

#[test]
fn every_tick_updates_the_display() {
    let (mut controller, recorder, _) = session(6, &[1, 3, 3]);
    controller.start();
    run_ticks(&mut controller, 2);
    let updates: Vec<_> = recorder
        .calls
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Update(time, _) => Some(time.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(updates, ["0:03", "0:02", "0:01"]);
}

#[test]
fn stop_twice_is_the_same_as_once() {
    let (mut controller, recorder, store) = session(0, &[3, 10, 2, 5]);
    controller.start();
    run_ticks(&mut controller, 5 + 10 + 2);
    controller.stop();
    controller.stop();

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].completed_reps, Some(1));
    assert_eq!(recorder.count(&Call::SessionEnd), 1);
    assert_eq!(controller.state(), SessionState::Done);
}

#[test]
fn stop_without_progress_saves_nothing() {
    let (mut controller, recorder, store) = session(0, &[3, 10, 2, 5]);
    controller.start();
    run_ticks(&mut controller, 3);
    controller.stop();
    assert!(store.is_empty());
    assert_eq!(recorder.count(&Call::SessionEnd), 1);
}

#[test]
fn one_breath_table_waits_for_user() {
    let (mut controller, recorder, store) = session(3, &[2, 30]);
    controller.start();
    run_ticks(&mut controller, 30);
    assert_eq!(controller.state(), SessionState::CountingUp);
    assert_eq!(controller.text_label(), "one breath (2)");

    // ticking never leaves an open-ended phase on its own
    run_ticks(&mut controller, 5);
    assert_eq!(controller.state(), SessionState::CountingUp);
    assert_eq!(controller.time_label(), "0:05");
    let signals = recorder.signals();

    controller.advance();
    assert_eq!(recorder.signals(), signals + 1);
    assert_eq!(controller.text_label(), "hold (1)");

    run_ticks(&mut controller, 30 + 7);
    controller.advance();

    assert_eq!(controller.state(), SessionState::Done);
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].completed_reps, None);
    let breaths: Vec<_> = records[0].details.iter().map(|d| d.value).collect();
    assert_eq!(breaths, vec![5, 7]);
}

#[test]
fn start_while_counting_up_does_not_advance() {
    let (mut controller, recorder, _) = session(3, &[2, 3]);
    controller.start();
    run_ticks(&mut controller, 3 + 2);
    let signals = recorder.signals();
    controller.start();
    assert_eq!(controller.state(), SessionState::CountingUp);
    assert_eq!(controller.seconds(), 2);
    assert_eq!(recorder.signals(), signals);
    assert_eq!(controller.clock().schedules(), 2);
}

#[test]
fn advance_is_ignored_during_countdown() {
    let (mut controller, recorder, _) = session(0, &[3, 10, 2, 5]);
    controller.start();
    controller.advance();
    assert_eq!(controller.text_label(), "rest (3)");
    assert_eq!(recorder.signals(), 0);
}

#[test]
fn max_hold_stopped_mid_hold_records_time() {
    let (mut controller, _, store) = session(5, &[]);
    controller.start();
    run_ticks(&mut controller, 120 + 120 + 300);
    assert_eq!(controller.text_label(), "max hold");
    run_ticks(&mut controller, 47);
    controller.stop();

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].details.iter().any(|d| d.value == 47));
}

#[test]
fn max_hold_stopped_in_warm_up_rest_saves_nothing() {
    let (mut controller, _, store) = session(5, &[]);
    controller.start();
    run_ticks(&mut controller, 60);
    controller.stop();
    assert!(store.is_empty());
}

#[test]
fn co2_table_shrinking_rest_waits_for_user() {
    let (mut controller, _, _) = session(4, &[4, 20, 10, 4]);
    controller.start();
    run_ticks(&mut controller, 10 + 20 + 6 + 20 + 2 + 20);
    assert_eq!(controller.text_label(), "rest (1)");
    assert_eq!(controller.state(), SessionState::CountingUp);
    controller.advance();
    assert_eq!(controller.text_label(), "hold (1)");
    assert_eq!(controller.seconds(), 20);
}

#[test]
fn records_land_in_the_log_book() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apnea.db");
    let plan = catalog::lookup(PlanId(6)).unwrap().make(&[2, 1, 1]).unwrap();
    let mut controller = TimerController::new(
        plan,
        ManualClock::new(),
        Box::new(apnea_core::Silent),
        Box::new(apnea_core::Silent),
        Box::new(Database::open_at(&path).unwrap()),
    );
    controller.start();
    run_ticks(&mut controller, 4);
    assert_eq!(controller.state(), SessionState::Done);
    drop(controller);

    let sessions = Database::open_at(&path).unwrap().sessions(10).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].record.plan_name, "Breathe");
    assert!(sessions[0].record.is_complete());
}
