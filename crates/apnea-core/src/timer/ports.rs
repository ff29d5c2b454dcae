//! Collaborators the controller talks to.
//!
//! All calls are one-way notifications. Implementations deal with their own
//! failures; nothing they do can change the controller's state.

use std::cell::RefCell;
use std::rc::Rc;

use super::controller::Snapshot;
use crate::record::SessionRecord;

/// Whatever shows the session to the user.
pub trait DisplayPort {
    fn on_session_start(&mut self);
    fn on_session_end(&mut self);
    /// Called after every tick and every phase transition.
    fn update(&mut self, snapshot: &Snapshot);
}

/// Beep, vibrate, flash: played once per phase transition.
pub trait SignalPort {
    fn signal(&mut self);
}

/// Log book that keeps finished sessions.
pub trait StorePort {
    fn append(&mut self, record: SessionRecord);
}

/// Discards everything. For sessions nobody watches.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl DisplayPort for Silent {
    fn on_session_start(&mut self) {}
    fn on_session_end(&mut self) {}
    fn update(&mut self, _snapshot: &Snapshot) {}
}

impl SignalPort for Silent {
    fn signal(&mut self) {}
}

impl StorePort for Silent {
    fn append(&mut self, _record: SessionRecord) {}
}

/// Keeps records in memory. Clones share the same list, so one handle can be
/// given to the controller and another kept for reading.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Rc<RefCell<Vec<SessionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl StorePort for MemoryStore {
    fn append(&mut self, record: SessionRecord) {
        self.records.borrow_mut().push(record);
    }
}
