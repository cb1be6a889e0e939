use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the host simulation's game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Tick {
    pub frame: u64,
}

/// Host simulation rate.
pub const TICRATE: u64 = 35;

impl Tick {
    pub fn new() -> Self {
        Tick { frame: 0 }
    }

    pub fn at(frame: u64) -> Self {
        Tick { frame }
    }

    pub fn next(&self) -> Self {
        Tick { frame: self.frame + 1 }
    }

    /// Ticks elapsed since `earlier`. Saturates at zero if the clock was reset.
    pub fn since(&self, earlier: Tick) -> u64 {
        self.frame.saturating_sub(earlier.frame)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame)
    }
}
