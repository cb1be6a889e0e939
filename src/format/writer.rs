use std::io::{self, Write};

use chrono::{DateTime, Local};

use super::{
    RecordHeader, SECTION_EVENTS, SECTION_FLAG_LOCATIONS, SECTION_ITEM_SPAWNS,
    SECTION_PLAYERS, SECTION_PLAYER_SPAWNS,
};
use crate::telemetry::event::EventRecord;
use crate::telemetry::identity::{
    single_line, FlagLocationTable, ItemSpawnTable, PlayerSpawnTable, PlayerTable,
};

/// Borrowed view of everything a record file contains.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    pub header: &'a RecordHeader,
    pub players: &'a PlayerTable,
    pub item_spawns: &'a ItemSpawnTable,
    pub player_spawns: &'a PlayerSpawnTable,
    /// Written only for capture-the-flag sessions.
    pub flag_locations: Option<&'a FlagLocationTable>,
    pub events: &'a [EventRecord],
}

pub fn write_record<W: Write>(w: &mut W, view: &RecordView<'_>) -> io::Result<()> {
    let h = view.header;
    writeln!(w, "version={}", h.version)?;
    writeln!(w, "time={}", h.time)?;
    writeln!(w, "levelnum={}", h.level_num)?;
    writeln!(w, "levelname={}", single_line(&h.level_name))?;
    writeln!(w, "levelhash={}", single_line(&h.level_hash))?;
    writeln!(w, "gametype={}", h.game_mode)?;
    writeln!(w, "duration={}", h.duration)?;
    writeln!(w, "endgametic={}", h.end_tick)?;

    writeln!(w, "{}", SECTION_PLAYERS)?;
    for p in view.players {
        writeln!(w, "{},{},{}", p.handle, p.key.team.code(), single_line(&p.key.name))?;
    }

    writeln!(w, "{}", SECTION_ITEM_SPAWNS)?;
    for s in view.item_spawns {
        let k = &s.key;
        writeln!(w, "{},{},{},{},{}", s.handle, k.pos.x, k.pos.y, k.pos.z, k.item.code())?;
    }

    writeln!(w, "{}", SECTION_PLAYER_SPAWNS)?;
    for s in view.player_spawns {
        let k = &s.key;
        writeln!(w, "{},{},{},{},{}", s.handle, k.team.code(), k.pos.x, k.pos.y, k.pos.z)?;
    }

    if let Some(flags) = view.flag_locations {
        writeln!(w, "{}", SECTION_FLAG_LOCATIONS)?;
        for f in flags {
            let k = &f.key;
            writeln!(w, "{},{},{},{}", k.team.code(), k.pos.x, k.pos.y, k.pos.z)?;
        }
    }

    writeln!(w, "{}", SECTION_EVENTS)?;
    for ev in view.events {
        writeln!(w, "{}", ev)?;
    }
    Ok(())
}

/// `<prefix>YYYY.MM.DD.HH.MM.SS.log`. Dots instead of ISO separators keep the
/// name valid on every filesystem.
pub fn record_file_name(prefix: &str, now: &DateTime<Local>) -> String {
    format!("{}{}.log", prefix, now.format("%Y.%m.%d.%H.%M.%S"))
}

/// In-file timestamp, ISO-8601 with numeric offset.
pub fn iso8601(now: &DateTime<Local>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%z").to_string()
}
