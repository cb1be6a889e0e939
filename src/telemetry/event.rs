use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kernel::time::Tick;

/// Per-table identity of a player, spawn point, item spawn or flag location.
/// `Handle::NONE` stands in for an absent activator or target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Handle(pub u32);

impl Handle {
    pub const NONE: Handle = Handle(0);

    pub fn is_none(self) -> bool {
        self == Handle::NONE
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer map position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Fractional bits in the host's fixed-point coordinates.
pub const FRACBITS: u32 = 16;

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0, y: 0, z: 0 };

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Truncate 16.16 fixed-point coordinates to whole map units.
    pub fn from_fixed(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: x >> FRACBITS,
            y: y >> FRACBITS,
            z: z >> FRACBITS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Damage,
    CarrierDamage,
    Kill,
    CarrierKill,
    EnviroDamage,
    EnviroCarrierDamage,
    EnviroKill,
    EnviroCarrierKill,
    Touch,
    PickupTouch,
    Capture,
    PickupCapture,
    Assist,
    ReturnFlag,
    PickupItem,
    SpreadAccuracy,
    SsAccuracy,
    TracerAccuracy,
    ProjAccuracy,
    SpawnPlayer,
    SpawnItem,
    JoinGame,
    Disconnect,
    PlayerBeacon,
    ProjFire,
    TeleportPlayer,
}

impl EventKind {
    pub const ALL: [EventKind; 26] = [
        EventKind::Damage,
        EventKind::CarrierDamage,
        EventKind::Kill,
        EventKind::CarrierKill,
        EventKind::EnviroDamage,
        EventKind::EnviroCarrierDamage,
        EventKind::EnviroKill,
        EventKind::EnviroCarrierKill,
        EventKind::Touch,
        EventKind::PickupTouch,
        EventKind::Capture,
        EventKind::PickupCapture,
        EventKind::Assist,
        EventKind::ReturnFlag,
        EventKind::PickupItem,
        EventKind::SpreadAccuracy,
        EventKind::SsAccuracy,
        EventKind::TracerAccuracy,
        EventKind::ProjAccuracy,
        EventKind::SpawnPlayer,
        EventKind::SpawnItem,
        EventKind::JoinGame,
        EventKind::Disconnect,
        EventKind::PlayerBeacon,
        EventKind::ProjFire,
        EventKind::TeleportPlayer,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<EventKind> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Damage => "DAMAGE",
            EventKind::CarrierDamage => "CARRIERDAMAGE",
            EventKind::Kill => "KILL",
            EventKind::CarrierKill => "CARRIERKILL",
            EventKind::EnviroDamage => "ENVIRODAMAGE",
            EventKind::EnviroCarrierDamage => "ENVIROCARRIERDAMAGE",
            EventKind::EnviroKill => "ENVIROKILL",
            EventKind::EnviroCarrierKill => "ENVIROCARRIERKILL",
            EventKind::Touch => "TOUCH",
            EventKind::PickupTouch => "PICKUPTOUCH",
            EventKind::Capture => "CAPTURE",
            EventKind::PickupCapture => "PICKUPCAPTURE",
            EventKind::Assist => "ASSIST",
            EventKind::ReturnFlag => "RETURNFLAG",
            EventKind::PickupItem => "PICKUPITEM",
            EventKind::SpreadAccuracy => "SPREADACCURACY",
            EventKind::SsAccuracy => "SSACCURACY",
            EventKind::TracerAccuracy => "TRACERACCURACY",
            EventKind::ProjAccuracy => "PROJACCURACY",
            EventKind::SpawnPlayer => "SPAWNPLAYER",
            EventKind::SpawnItem => "SPAWNITEM",
            EventKind::JoinGame => "JOINGAME",
            EventKind::Disconnect => "DISCONNECT",
            EventKind::PlayerBeacon => "PLAYERBEACON",
            EventKind::ProjFire => "PROJFIRE",
            EventKind::TeleportPlayer => "TELEPORTPLAYER",
        }
    }

    /// Name for a raw code, `UNKNOWN` when out of range.
    pub fn name_of(code: i32) -> &'static str {
        Self::from_code(code).map_or("UNKNOWN", EventKind::name)
    }

    pub fn is_accuracy(self) -> bool {
        matches!(
            self,
            EventKind::SpreadAccuracy
                | EventKind::SsAccuracy
                | EventKind::TracerAccuracy
                | EventKind::ProjAccuracy
        )
    }

    pub fn is_kill(self) -> bool {
        matches!(
            self,
            EventKind::Kill
                | EventKind::CarrierKill
                | EventKind::EnviroKill
                | EventKind::EnviroCarrierKill
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One buffered gameplay event. Field order matches the `events` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: EventKind,
    pub activator: Handle,
    pub target: Handle,
    pub tick: Tick,
    pub activator_pos: Vec3,
    pub target_pos: Vec3,
    pub args: [i32; 4],
}

impl EventRecord {
    /// Event with no participants, positions or payload yet.
    pub fn new(kind: EventKind, tick: Tick) -> Self {
        Self {
            kind,
            activator: Handle::NONE,
            target: Handle::NONE,
            tick,
            activator_pos: Vec3::ZERO,
            target_pos: Vec3::ZERO,
            args: [0; 4],
        }
    }
}

impl fmt::Display for EventRecord {
    /// `ev,ac,tg,gt,ax,ay,az,tx,ty,tz,a0,a1,a2,a3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.kind.code(),
            self.activator,
            self.target,
            self.tick,
            self.activator_pos.x,
            self.activator_pos.y,
            self.activator_pos.z,
            self.target_pos.x,
            self.target_pos.y,
            self.target_pos.z,
            self.args[0],
            self.args[1],
            self.args[2],
            self.args[3],
        )
    }
}
