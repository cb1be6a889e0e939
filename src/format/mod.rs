//! The durable session record.
//!
//! One UTF-8 text file per committed session, consumed by offline tooling.
//! The layout is a stable contract; bump `RECORD_VERSION` whenever a row
//! changes shape.
//!
//! ```text
//! version=6
//! time=2020-05-01T21:14:03+0200
//! levelnum=1
//! levelname=MAP01
//! levelhash=...
//! gametype=3
//! duration=<ticks recorded>
//! endgametic=<tick at commit>
//! players
//! id,team,name
//! itemspawns
//! id,x,y,z,item
//! playerspawns
//! id,team,x,y,z
//! flaglocations          (capture the flag only)
//! team,x,y,z
//! events
//! ev,ac,tg,gt,ax,ay,az,tx,ty,tz,a0,a1,a2,a3
//! ```

mod reader;
mod writer;

pub use reader::{
    parse_record, read_record, FlagLocationRow, ItemSpawnRow, ParsedRecord, PlayerRow,
    PlayerSpawnRow,
};
pub use writer::{iso8601, record_file_name, write_record, RecordView};

pub const RECORD_VERSION: i32 = 6;

pub const SECTION_PLAYERS: &str = "players";
pub const SECTION_ITEM_SPAWNS: &str = "itemspawns";
pub const SECTION_PLAYER_SPAWNS: &str = "playerspawns";
pub const SECTION_FLAG_LOCATIONS: &str = "flaglocations";
pub const SECTION_EVENTS: &str = "events";

/// Metadata block at the top of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub version: i32,
    pub time: String,
    pub level_num: i32,
    pub level_name: String,
    pub level_hash: String,
    pub game_mode: i32,
    pub duration: u64,
    pub end_tick: u64,
}
