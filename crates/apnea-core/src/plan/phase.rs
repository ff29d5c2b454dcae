use serde::{Deserialize, Serialize};

/// How long a phase lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "secs", rename_all = "snake_case")]
pub enum PhaseDuration {
    /// Counts down from this many seconds.
    Timed(u64),
    /// Waits for the user; the controller counts up instead.
    OpenEnded,
}

impl PhaseDuration {
    /// Rest and hold lengths are signed while a plan computes them (a CO2 table
    /// shrinks its rest every round). Anything that is not a positive number of
    /// seconds becomes a wait for the user.
    pub fn from_secs(secs: i64) -> Self {
        if secs > 0 {
            PhaseDuration::Timed(secs as u64)
        } else {
            PhaseDuration::OpenEnded
        }
    }

    pub fn secs(self) -> Option<u64> {
        match self {
            PhaseDuration::Timed(secs) => Some(secs),
            PhaseDuration::OpenEnded => None,
        }
    }

    pub fn is_open_ended(self) -> bool {
        self == PhaseDuration::OpenEnded
    }
}

/// One segment of a plan: a duration and the text shown while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub duration: PhaseDuration,
    pub label: String,
}

impl Phase {
    pub fn timed(secs: i64, label: impl Into<String>) -> Self {
        Self {
            duration: PhaseDuration::from_secs(secs),
            label: label.into(),
        }
    }

    pub fn open_ended(label: impl Into<String>) -> Self {
        Self {
            duration: PhaseDuration::OpenEnded,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_seconds_count_down() {
        assert_eq!(PhaseDuration::from_secs(90), PhaseDuration::Timed(90));
        assert_eq!(Phase::timed(5, "rest (1)").duration.secs(), Some(5));
    }

    #[test]
    fn zero_and_negative_seconds_wait_for_user() {
        assert!(PhaseDuration::from_secs(0).is_open_ended());
        assert!(PhaseDuration::from_secs(-2).is_open_ended());
        assert_eq!(PhaseDuration::from_secs(-2).secs(), None);
    }
}
