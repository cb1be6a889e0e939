#![allow(dead_code)]

use std::path::Path;

use wdlstats::telemetry::{Team, Vec3};
use wdlstats::{GameMode, LevelInfo, PlayerRef, RecorderConfig, SimulationHost, StatsRecorder, Tick};

/// Scripted simulation: tests poke the fields between calls.
pub struct MockHost {
    pub in_game: bool,
    pub tick: u64,
    pub mode: GameMode,
    pub team_spawns: bool,
    pub beacons: bool,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            in_game: true,
            tick: 100,
            mode: GameMode::Deathmatch,
            team_spawns: false,
            beacons: false,
        }
    }
}

impl SimulationHost for MockHost {
    fn in_game(&self) -> bool {
        self.in_game
    }

    fn tick(&self) -> Tick {
        Tick::at(self.tick)
    }

    fn level(&self) -> LevelInfo {
        LevelInfo {
            number: 7,
            name: "MAP07".to_string(),
            hash: "A1B2C3".to_string(),
        }
    }

    fn game_mode(&self) -> GameMode {
        self.mode
    }

    fn team_spawns(&self) -> bool {
        self.team_spawns
    }

    fn player_beacons(&self) -> bool {
        self.beacons
    }
}

pub fn player(id: u32, name: &str) -> PlayerRef<'_> {
    PlayerRef {
        id,
        name,
        team: Team::None,
        body: Some(Vec3::new(id as i32 * 100, 0, 0)),
    }
}

pub fn armed_recorder(dir: &Path) -> StatsRecorder {
    StatsRecorder::new(RecorderConfig {
        log_dir: Some(dir.to_path_buf()),
        ..Default::default()
    })
}

/// Recorder that is already recording into `dir`.
pub fn recording(dir: &Path, host: &MockHost) -> StatsRecorder {
    let mut recorder = armed_recorder(dir);
    assert!(recorder.start_session(host));
    recorder
}
