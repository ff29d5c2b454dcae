//! # Apnea Core Library
//!
//! Interval timer logic for breath-hold training. A plan (O2 table, CO2
//! table, max hold, ...) describes a sequence of timed or open-ended phases;
//! the timer controller runs one plan at a time against a one-second clock
//! and hands a record of what was achieved to the log book when the session
//! ends.
//!
//! ## Architecture
//!
//! - **Plans**: a fixed catalog of plan kinds, each a small state machine
//!   producing phases on demand
//! - **Timer Controller**: drives the active plan, counting down timed phases
//!   and up through open-ended ones; talks to the outside through ports
//! - **Storage**: SQLite log book and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerController`]: Session state machine
//! - [`Plan`]: Configured plan instance
//! - [`Database`]: Log book persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod plan;
pub mod record;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, PlanError};
pub use plan::{catalog, Phase, PhaseDuration, Plan, PlanDescriptor, PlanId, PlanKind};
pub use record::{RecordEntry, SessionRecord};
pub use storage::{Config, Database, StoredSession};
pub use timer::{
    Clock, DisplayPort, IntervalClock, ManualClock, MemoryStore, SessionState, SignalPort,
    Silent, Snapshot, StorePort, TimerController,
};
