use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::kernel::time::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// No log directory configured; sessions never start.
    Idle,
    /// Directory configured, waiting for the next session start.
    Armed,
    Recording,
}

impl RecorderState {
    pub fn as_str(self) -> &'static str {
        match self {
            RecorderState::Idle => "idle",
            RecorderState::Armed => "armed",
            RecorderState::Recording => "recording",
        }
    }
}

/// Session state delta. The only way `SessionState` mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionDelta {
    Armed(PathBuf),
    /// Directory cleared; recording stops and cannot restart until re-armed.
    Disarmed,
    Started { begin: Tick, beacons: bool },
    Stopped,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    log_dir: Option<PathBuf>,
    recording: bool,
    begin_tick: Tick,
    beacons: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, delta: SessionDelta) {
        match delta {
            SessionDelta::Armed(dir) => {
                self.log_dir = Some(dir);
            }
            SessionDelta::Disarmed => {
                self.log_dir = None;
                self.recording = false;
            }
            SessionDelta::Started { begin, beacons } => {
                // A session cannot start without somewhere to write it.
                if self.log_dir.is_some() {
                    self.recording = true;
                    self.begin_tick = begin;
                    self.beacons = beacons;
                }
            }
            SessionDelta::Stopped => {
                self.recording = false;
            }
        }
    }

    pub fn state(&self) -> RecorderState {
        match (&self.log_dir, self.recording) {
            (None, _) => RecorderState::Idle,
            (Some(_), false) => RecorderState::Armed,
            (Some(_), true) => RecorderState::Recording,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.log_dir.as_ref()
    }

    pub fn begin_tick(&self) -> Tick {
        self.begin_tick
    }

    pub fn beacons_enabled(&self) -> bool {
        self.beacons
    }
}

/// Log directory with exactly one trailing separator appended if missing.
/// A blank directory means logging is not configured.
pub fn normalize_log_dir(dir: &str) -> Option<PathBuf> {
    if dir.trim().is_empty() {
        return None;
    }
    let mut dir = dir.to_string();
    if !dir.ends_with(MAIN_SEPARATOR) && !dir.ends_with('/') {
        dir.push(MAIN_SEPARATOR);
    }
    Some(PathBuf::from(dir))
}
