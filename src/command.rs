//! Console control surface: `wdlstats <dir>` arms the recorder, `wdlinfo ...`
//! inspects it.

use std::fmt::Write as _;

use crate::error::CommandError;
use crate::telemetry::event::EventRecord;
use crate::telemetry::StatsRecorder;

const WDLSTATS_USAGE: &str = "usage: wdlstats <logdir>";
const WDLINFO_USAGE: &str = "usage: wdlinfo <size|state|tail|event <index>|players>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the log directory; recording starts with the next session.
    Arm(String),
    Info(InfoQuery),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoQuery {
    Size,
    State,
    Tail,
    Event(usize),
    Players,
}

impl Command {
    pub fn parse_line(line: &str) -> Result<Command, CommandError> {
        let args: Vec<&str> = line.split_whitespace().collect();
        Self::parse(&args)
    }

    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, CommandError> {
        let mut it = args.iter().map(AsRef::as_ref);
        match it.next() {
            Some("wdlstats") => match it.next() {
                Some(dir) => Ok(Command::Arm(dir.to_string())),
                None => Err(CommandError::Usage(WDLSTATS_USAGE)),
            },
            Some("wdlinfo") => {
                let query = match it.next() {
                    Some("size") => InfoQuery::Size,
                    Some("state") => InfoQuery::State,
                    Some("tail") => InfoQuery::Tail,
                    Some("players") => InfoQuery::Players,
                    Some("event") => {
                        let index = it
                            .next()
                            .and_then(|s| s.parse::<usize>().ok())
                            .ok_or(CommandError::Usage(WDLINFO_USAGE))?;
                        InfoQuery::Event(index)
                    }
                    _ => return Err(CommandError::Usage(WDLINFO_USAGE)),
                };
                Ok(Command::Info(query))
            }
            Some(other) => Err(CommandError::Unknown(other.to_string())),
            None => Err(CommandError::Usage(WDLINFO_USAGE)),
        }
    }

    /// Run against a recorder and return the console text.
    pub fn execute(&self, recorder: &mut StatsRecorder) -> String {
        match self {
            Command::Arm(dir) => {
                let dir = recorder.arm(dir);
                format!("Log directory set to \"{}\"; logging starts on the next map.", dir.display())
            }
            Command::Info(query) => info(*query, recorder),
        }
    }
}

fn info(query: InfoQuery, recorder: &StatsRecorder) -> String {
    let mut out = String::new();
    match query {
        InfoQuery::Size => {
            let _ = write!(out, "{} events", recorder.events().len());
        }
        InfoQuery::State => {
            let session = recorder.session();
            let dir = session
                .log_dir()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            let _ = writeln!(out, "State: {}", recorder.state().as_str());
            let _ = writeln!(
                out,
                "Currently recording?: {}",
                if session.is_recording() { "Yes" } else { "No" }
            );
            let _ = writeln!(out, "Directory to write logs to: \"{}\"", dir);
            let _ = write!(out, "Log starting gametic: {}", session.begin_tick().frame);
        }
        InfoQuery::Tail => {
            let events = recorder.events();
            let n = recorder.config().tail_len;
            let start = events.len().saturating_sub(n);
            let lines: Vec<String> = events
                .tail(n)
                .iter()
                .enumerate()
                .map(|(i, ev)| describe(start + i, ev))
                .collect();
            out = lines.join("\n");
        }
        InfoQuery::Event(index) => {
            out = match recorder.events().get(index) {
                Some(ev) => describe(index, ev),
                None => format!("Event {} not found", index),
            };
        }
        InfoQuery::Players => {
            let lines: Vec<String> = recorder
                .players()
                .iter()
                .map(|p| format!("{}: {} (team {}, slot {})", p.handle, p.key.name, p.key.team.code(), p.payload.0))
                .collect();
            out = lines.join("\n");
        }
    }
    out
}

fn describe(index: usize, ev: &EventRecord) -> String {
    format!(
        "{}: {} ac={} tg={} gt={} a=({}, {}, {}) t=({}, {}, {}) args=[{}, {}, {}, {}]",
        index,
        ev.kind.name(),
        ev.activator,
        ev.target,
        ev.tick.frame,
        ev.activator_pos.x,
        ev.activator_pos.y,
        ev.activator_pos.z,
        ev.target_pos.x,
        ev.target_pos.y,
        ev.target_pos.z,
        ev.args[0],
        ev.args[1],
        ev.args[2],
        ev.args[3],
    )
}
