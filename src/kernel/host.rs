//! What the recorder needs from the simulation that drives it.
//!
//! The recorder never holds on to simulation objects. Entry points take the
//! borrowed views below and copy the scalars they need before returning.

use crate::kernel::time::Tick;
use crate::telemetry::event::Vec3;
use crate::telemetry::kinds::Team;

/// Game mode as the host numbers it; the number is what lands in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Cooperative,
    Deathmatch,
    TeamDeathmatch,
    CaptureTheFlag,
    Horde,
}

impl GameMode {
    pub fn code(self) -> i32 {
        match self {
            GameMode::Cooperative => 0,
            GameMode::Deathmatch => 1,
            GameMode::TeamDeathmatch => 2,
            GameMode::CaptureTheFlag => 3,
            GameMode::Horde => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<GameMode> {
        match code {
            0 => Some(GameMode::Cooperative),
            1 => Some(GameMode::Deathmatch),
            2 => Some(GameMode::TeamDeathmatch),
            3 => Some(GameMode::CaptureTheFlag),
            4 => Some(GameMode::Horde),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Cooperative => "cooperative",
            GameMode::Deathmatch => "deathmatch",
            GameMode::TeamDeathmatch => "team deathmatch",
            GameMode::CaptureTheFlag => "capture the flag",
            GameMode::Horde => "horde",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelInfo {
    pub number: i32,
    pub name: String,
    pub hash: String,
}

/// Simulation state the recorder queries. Implemented by the host.
pub trait SimulationHost {
    /// True once warmup is over and the round is being played.
    fn in_game(&self) -> bool;

    fn tick(&self) -> Tick;

    fn level(&self) -> LevelInfo;

    fn game_mode(&self) -> GameMode;

    /// Team-specific player starts are honoured.
    fn team_spawns(&self) -> bool;

    /// Player beacon events are wanted.
    fn player_beacons(&self) -> bool;
}

/// A connected player. `body` is absent while the player is dead or spectating.
#[derive(Debug, Clone, Copy)]
pub struct PlayerRef<'a> {
    pub id: u32,
    pub name: &'a str,
    pub team: Team,
    pub body: Option<Vec3>,
}

impl<'a> PlayerRef<'a> {
    pub fn position(&self) -> Vec3 {
        self.body.unwrap_or(Vec3::ZERO)
    }
}

/// Any simulation object. `player` is set when the object is a player body.
#[derive(Debug, Clone, Copy)]
pub struct ActorRef<'a> {
    pub doomednum: u16,
    pub pos: Vec3,
    pub player: Option<PlayerRef<'a>>,
}

/// A thing placement from the map, read at level load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapThing {
    pub doomednum: u16,
    pub pos: Vec3,
}
