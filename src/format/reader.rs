use std::fs;
use std::iter::{Enumerate, Peekable};
use std::path::Path;
use std::str::{FromStr, Lines};

use super::{
    RecordHeader, RECORD_VERSION, SECTION_EVENTS, SECTION_FLAG_LOCATIONS, SECTION_ITEM_SPAWNS,
    SECTION_PLAYERS, SECTION_PLAYER_SPAWNS,
};
use crate::error::FormatError;
use crate::kernel::time::Tick;
use crate::telemetry::event::{EventKind, EventRecord, Handle, Vec3};
use crate::telemetry::kinds::{ItemKind, Team};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub handle: Handle,
    pub team: Team,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpawnRow {
    pub handle: Handle,
    pub pos: Vec3,
    pub item: ItemKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSpawnRow {
    pub handle: Handle,
    pub team: Team,
    pub pos: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagLocationRow {
    pub team: Team,
    pub pos: Vec3,
}

/// A record file read back into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub header: RecordHeader,
    pub players: Vec<PlayerRow>,
    pub item_spawns: Vec<ItemSpawnRow>,
    pub player_spawns: Vec<PlayerSpawnRow>,
    /// `None` when the section was not written (not a capture-the-flag game).
    pub flag_locations: Option<Vec<FlagLocationRow>>,
    pub events: Vec<EventRecord>,
}

pub fn read_record(path: &Path) -> Result<ParsedRecord, FormatError> {
    let text = fs::read_to_string(path)?;
    parse_record(&text)
}

pub fn parse_record(text: &str) -> Result<ParsedRecord, FormatError> {
    let mut cur = Cursor::new(text);
    let header = parse_header(&mut cur)?;

    cur.expect_section(SECTION_PLAYERS)?;
    let players = cur
        .rows()
        .into_iter()
        .map(|(line, row)| -> Result<PlayerRow, FormatError> {
            let f = split_fields(line, row, 3)?;
            Ok(PlayerRow {
                handle: Handle(int(line, f[0])?),
                team: team(line, f[1])?,
                name: f[2].to_string(),
            })
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    cur.expect_section(SECTION_ITEM_SPAWNS)?;
    let item_spawns = cur
        .rows()
        .into_iter()
        .map(|(line, row)| -> Result<ItemSpawnRow, FormatError> {
            let f = split_fields(line, row, 5)?;
            Ok(ItemSpawnRow {
                handle: Handle(int(line, f[0])?),
                pos: Vec3::new(int(line, f[1])?, int(line, f[2])?, int(line, f[3])?),
                item: ItemKind::from_code(int(line, f[4])?),
            })
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    cur.expect_section(SECTION_PLAYER_SPAWNS)?;
    let player_spawns = cur
        .rows()
        .into_iter()
        .map(|(line, row)| -> Result<PlayerSpawnRow, FormatError> {
            let f = split_fields(line, row, 5)?;
            Ok(PlayerSpawnRow {
                handle: Handle(int(line, f[0])?),
                team: team(line, f[1])?,
                pos: Vec3::new(int(line, f[2])?, int(line, f[3])?, int(line, f[4])?),
            })
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    let flag_locations = if cur.at_section(SECTION_FLAG_LOCATIONS) {
        cur.expect_section(SECTION_FLAG_LOCATIONS)?;
        let rows = cur
            .rows()
            .into_iter()
            .map(|(line, row)| -> Result<FlagLocationRow, FormatError> {
                let f = split_fields(line, row, 4)?;
                Ok(FlagLocationRow {
                    team: team(line, f[0])?,
                    pos: Vec3::new(int(line, f[1])?, int(line, f[2])?, int(line, f[3])?),
                })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;
        Some(rows)
    } else {
        None
    };

    cur.expect_section(SECTION_EVENTS)?;
    let events = cur
        .rows()
        .into_iter()
        .map(|(line, row)| parse_event(line, row))
        .collect::<Result<Vec<_>, FormatError>>()?;

    Ok(ParsedRecord {
        header,
        players,
        item_spawns,
        player_spawns,
        flag_locations,
        events,
    })
}

fn parse_header(cur: &mut Cursor<'_>) -> Result<RecordHeader, FormatError> {
    let (line, version) = cur.field("version")?;
    let version: i32 = int(line, version)?;
    if version != RECORD_VERSION {
        return Err(FormatError::Version(version));
    }
    let time = cur.field("time")?.1.to_string();
    let (line, level_num) = cur.field("levelnum")?;
    let level_num = int(line, level_num)?;
    let level_name = cur.field("levelname")?.1.to_string();
    let level_hash = cur.field("levelhash")?.1.to_string();
    let (line, game_mode) = cur.field("gametype")?;
    let game_mode = int(line, game_mode)?;
    let (line, duration) = cur.field("duration")?;
    let duration = int(line, duration)?;
    let (line, end_tick) = cur.field("endgametic")?;
    let end_tick = int(line, end_tick)?;

    Ok(RecordHeader {
        version,
        time,
        level_num,
        level_name,
        level_hash,
        game_mode,
        duration,
        end_tick,
    })
}

fn parse_event(line: usize, row: &str) -> Result<EventRecord, FormatError> {
    let f = split_fields(line, row, 14)?;
    let kind = EventKind::from_code(int(line, f[0])?).ok_or_else(|| FormatError::BadInteger {
        line,
        value: f[0].to_string(),
    })?;
    let mut n = [0i32; 10];
    for (slot, field) in n.iter_mut().zip(&f[4..]) {
        *slot = int(line, field)?;
    }
    Ok(EventRecord {
        kind,
        activator: Handle(int(line, f[1])?),
        target: Handle(int(line, f[2])?),
        tick: Tick::at(int(line, f[3])?),
        activator_pos: Vec3::new(n[0], n[1], n[2]),
        target_pos: Vec3::new(n[3], n[4], n[5]),
        args: [n[6], n[7], n[8], n[9]],
    })
}

fn team(line: usize, value: &str) -> Result<Team, FormatError> {
    Team::from_code(int(line, value)?).ok_or_else(|| FormatError::BadInteger {
        line,
        value: value.to_string(),
    })
}

/// Exactly `count` comma-separated fields; the last one keeps any commas.
fn split_fields(line: usize, row: &str, count: usize) -> Result<Vec<&str>, FormatError> {
    let fields: Vec<&str> = row.splitn(count, ',').collect();
    if fields.len() != count {
        return Err(FormatError::FieldCount {
            line,
            expected: count,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn int<T: FromStr>(line: usize, value: &str) -> Result<T, FormatError> {
    value.trim().parse().map_err(|_| FormatError::BadInteger {
        line,
        value: value.to_string(),
    })
}

const SECTIONS: [&str; 5] = [
    SECTION_PLAYERS,
    SECTION_ITEM_SPAWNS,
    SECTION_PLAYER_SPAWNS,
    SECTION_FLAG_LOCATIONS,
    SECTION_EVENTS,
];

struct Cursor<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    last_line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            last_line: 0,
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let (i, l) = self.lines.next()?;
        self.last_line = i + 1;
        Some((i + 1, l.trim_end_matches('\r')))
    }

    /// Value of a `key=value` header line.
    fn field(&mut self, key: &'static str) -> Result<(usize, &'a str), FormatError> {
        let missing = FormatError::MissingHeader {
            line: self.last_line + 1,
            field: key,
        };
        let Some((line, text)) = self.next_line() else {
            return Err(missing);
        };
        match text.split_once('=') {
            Some((k, v)) if k == key => Ok((line, v)),
            _ => Err(missing),
        }
    }

    fn at_section(&mut self, name: &str) -> bool {
        matches!(self.lines.peek(), Some((_, l)) if l.trim_end_matches('\r') == name)
    }

    fn expect_section(&mut self, name: &'static str) -> Result<(), FormatError> {
        if self.at_section(name) {
            self.next_line();
            Ok(())
        } else {
            Err(FormatError::MissingSection {
                line: self.last_line + 1,
                expected: name,
            })
        }
    }

    /// Rows up to (not including) the next section sentinel or end of input.
    fn rows(&mut self) -> Vec<(usize, &'a str)> {
        let mut out = Vec::new();
        loop {
            let at_boundary = match self.lines.peek() {
                None => true,
                Some((_, l)) => SECTIONS.contains(&l.trim_end_matches('\r')),
            };
            if at_boundary {
                break;
            }
            if let Some((line, row)) = self.next_line() {
                if !row.is_empty() {
                    out.push((line, row));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "version=6
time=2021-03-04T05:06:07+0000
levelnum=7
levelname=MAP07
levelhash=ABCDEF
gametype=3
duration=350
endgametic=1400
players
1,0,alpha
2,1,bravo, the second
itemspawns
1,128,-64,0,1
playerspawns
1,3,0,0,0
flaglocations
0,10,20,0
1,-10,-20,0
events
0,1,2,1100,1,2,3,4,5,6,45,0,3,0
14,1,0,1101,0,0,0,128,-64,0,1,1,0,0
";

    #[test]
    fn parses_every_section() {
        let rec = parse_record(SAMPLE).unwrap();
        assert_eq!(rec.header.level_name, "MAP07");
        assert_eq!(rec.header.duration, 350);
        assert_eq!(rec.players.len(), 2);
        assert_eq!(rec.players[1].name, "bravo, the second");
        assert_eq!(rec.players[1].team, Team::Red);
        assert_eq!(rec.item_spawns[0].item, ItemKind::MegaSphere);
        assert_eq!(rec.player_spawns[0].team, Team::None);
        assert_eq!(rec.flag_locations.as_ref().map(Vec::len), Some(2));
        assert_eq!(rec.events.len(), 2);
        assert_eq!(rec.events[0].kind, EventKind::Damage);
        assert_eq!(rec.events[0].args, [45, 0, 3, 0]);
        assert_eq!(rec.events[1].target_pos, Vec3::new(128, -64, 0));
    }

    #[test]
    fn flag_section_is_optional() {
        let text = SAMPLE.replace("flaglocations\n0,10,20,0\n1,-10,-20,0\n", "");
        let rec = parse_record(&text).unwrap();
        assert!(rec.flag_locations.is_none());
        assert_eq!(rec.events.len(), 2);
    }

    #[test]
    fn rejects_other_versions() {
        let text = SAMPLE.replacen("version=6", "version=5", 1);
        assert!(matches!(parse_record(&text), Err(FormatError::Version(5))));
    }

    #[test]
    fn reports_line_of_bad_row() {
        let text = SAMPLE.replace("1,128,-64,0,1", "1,128,x,0,1");
        match parse_record(&text) {
            Err(FormatError::BadInteger { line, value }) => {
                assert_eq!(line, 13);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ticks_past_i32_range_parse() {
        let text = SAMPLE.replace(",1100,", ",3000000000,");
        let rec = parse_record(&text).unwrap();
        assert_eq!(rec.events[0].tick, Tick::at(3_000_000_000));
    }

    #[test]
    fn unknown_team_code_is_rejected() {
        let text = SAMPLE.replace("2,1,bravo", "2,9,bravo");
        match parse_record(&text) {
            Err(FormatError::BadInteger { line, value }) => {
                assert_eq!(line, 11);
                assert_eq!(value, "9");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_section_is_an_error() {
        let text = SAMPLE.replace("playerspawns\n", "");
        assert!(matches!(
            parse_record(&text),
            Err(FormatError::FieldCount { .. }) | Err(FormatError::MissingSection { .. })
        ));
    }
}
