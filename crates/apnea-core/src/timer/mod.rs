mod clock;
mod controller;
mod ports;

pub use clock::{Clock, IntervalClock, ManualClock, TICK};
pub use controller::{SessionState, Snapshot, TimerController};
pub use ports::{DisplayPort, MemoryStore, SignalPort, Silent, StorePort};
