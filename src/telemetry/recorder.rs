use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::buffer::{coalesce_policy, AppendOutcome, CoalescePolicy, EventBuffer, Occurrence};
use super::event::{EventKind, EventRecord, Handle, Vec3};
use super::identity::{
    FlagLocationKey, FlagLocationTable, ItemSpawnKey, ItemSpawnTable, PlayerKey, PlayerSlot,
    PlayerSpawnKey, PlayerSpawnTable, PlayerTable,
};
use super::kinds::{ItemKind, MeansOfDeath, Team};
use crate::config::RecorderConfig;
use crate::error::RecorderError;
use crate::format::{self, RecordHeader, RecordView, RECORD_VERSION};
use crate::kernel::host::{ActorRef, GameMode, MapThing, PlayerRef, SimulationHost};
use crate::kernel::session::{normalize_log_dir, RecorderState, SessionDelta, SessionState};

/// Per-simulation stats recorder.
///
/// Owns the identity tables, the event buffer and the session state. The host
/// keeps one per running simulation and calls the `log_*` entry points from
/// its tick loop. Entry points never fail: outside a recording session they
/// do nothing, and missing participants are recorded as `Handle::NONE` at the
/// origin.
#[derive(Debug)]
pub struct StatsRecorder {
    config: RecorderConfig,
    session: SessionState,
    players: PlayerTable,
    player_spawns: PlayerSpawnTable,
    item_spawns: ItemSpawnTable,
    flag_locations: FlagLocationTable,
    events: EventBuffer,
}

impl StatsRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        let mut recorder = Self {
            config,
            session: SessionState::new(),
            players: PlayerTable::new(),
            player_spawns: PlayerSpawnTable::new(),
            item_spawns: ItemSpawnTable::new(),
            flag_locations: FlagLocationTable::new(),
            events: EventBuffer::new(),
        };
        if let Some(dir) = recorder.config.log_dir.clone() {
            recorder.arm(&dir.to_string_lossy());
        }
        recorder
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    // === Session control ===

    /// Set the directory records are written to. Takes effect at the next
    /// `start_session`. A blank directory disables logging and drops any
    /// session in progress.
    pub fn arm(&mut self, dir: &str) -> &Path {
        match normalize_log_dir(dir) {
            Some(dir) => {
                info!(dir = %dir.display(), "stats logging enabled, will log on next map start");
                self.session.reduce(SessionDelta::Armed(dir));
            }
            None => {
                info!("stats logging disabled");
                self.session.reduce(SessionDelta::Disarmed);
            }
        }
        self.session.log_dir().map_or(Path::new(""), PathBuf::as_path)
    }

    /// Begin recording if a directory is configured and the round is live.
    ///
    /// Clears the player table and the event buffer. Spawn-point and flag
    /// tables are filled at level load and kept; item spawns carry over too.
    pub fn start_session(&mut self, host: &dyn SimulationHost) -> bool {
        if self.session.log_dir().is_none() {
            return false;
        }
        if !host.in_game() {
            debug!("round not in progress, stats session not started");
            self.session.reduce(SessionDelta::Stopped);
            return false;
        }

        self.players.clear();
        self.events.clear();

        let begin = host.tick();
        self.session.reduce(SessionDelta::Started {
            begin,
            beacons: host.player_beacons(),
        });
        info!(
            dir = %self.session.log_dir().map(|d| d.display().to_string()).unwrap_or_default(),
            tick = %begin,
            "stats session started"
        );
        true
    }

    /// End the session and write its record.
    ///
    /// Recording stops whatever the outcome. `Ok(None)` means nothing was
    /// written: no session was running or it saw no events. On error the
    /// tables and buffer are left intact, and a partially written file is
    /// removed.
    pub fn commit_session(&mut self, host: &dyn SimulationHost) -> Result<Option<PathBuf>, RecorderError> {
        self.commit_session_at(host, Local::now())
    }

    fn commit_session_at(
        &mut self,
        host: &dyn SimulationHost,
        now: DateTime<Local>,
    ) -> Result<Option<PathBuf>, RecorderError> {
        if !self.session.is_recording() {
            return Ok(None);
        }
        self.session.reduce(SessionDelta::Stopped);

        if self.events.is_empty() {
            debug!("stats session ended with no events, nothing saved");
            return Ok(None);
        }
        let Some(dir) = self.session.log_dir().cloned() else {
            return Ok(None);
        };

        let path = dir.join(format::record_file_name(&self.config.file_prefix, &now));
        let end = host.tick();
        let level = host.level();
        let game_mode = host.game_mode();
        let header = RecordHeader {
            version: RECORD_VERSION,
            time: format::iso8601(&now),
            level_num: level.number,
            level_name: level.name,
            level_hash: level.hash,
            game_mode: game_mode.code(),
            duration: end.since(self.session.begin_tick()),
            end_tick: end.frame,
        };
        let view = RecordView {
            header: &header,
            players: &self.players,
            item_spawns: &self.item_spawns,
            player_spawns: &self.player_spawns,
            flag_locations: (game_mode == GameMode::CaptureTheFlag).then_some(&self.flag_locations),
            events: self.events.as_slice(),
        };

        let file = File::create(&path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "could not save stats record");
            RecorderError::Open { path: path.clone(), source }
        })?;
        let mut writer = BufWriter::new(file);
        let written = format::write_record(&mut writer, &view).and_then(|_| writer.flush());
        drop(writer);
        discard_on_failure(&path, written)?;

        info!(path = %path.display(), events = self.events.len(), "stats record saved");
        Ok(Some(path))
    }

    // === Ingestion ===

    /// Log a gameplay event between two (optional) players.
    ///
    /// Damage between two present players on the same tick accumulates into
    /// one record. Returns `None` when nothing was considered for the buffer.
    pub fn log_event(
        &mut self,
        host: &dyn SimulationHost,
        kind: EventKind,
        activator: Option<PlayerRef<'_>>,
        target: Option<PlayerRef<'_>>,
        args: [i32; 4],
    ) -> Option<AppendOutcome> {
        if !self.session.is_recording() {
            return None;
        }
        if kind == EventKind::PlayerBeacon && !self.session.beacons_enabled() {
            return None;
        }

        let mut ev = EventRecord::new(kind, host.tick());
        (ev.activator, ev.activator_pos) = self.resolve_player(activator);
        (ev.target, ev.target_pos) = self.resolve_player(target);
        ev.args = args;

        let mut policy = coalesce_policy(kind, Occurrence::Generic);
        if activator.is_none() || target.is_none() {
            policy = CoalescePolicy::Append;
        }
        Some(self.events.append(ev, policy))
    }

    /// Log an event between simulation actors. Only player bodies resolve to
    /// players; any other actor counts as absent.
    pub fn log_actor_event(
        &mut self,
        host: &dyn SimulationHost,
        kind: EventKind,
        activator: Option<&ActorRef<'_>>,
        target: Option<&ActorRef<'_>>,
        args: [i32; 3],
    ) -> Option<AppendOutcome> {
        if !self.session.is_recording() {
            return None;
        }
        let activator = activator.and_then(|a| a.player);
        let target = target.and_then(|t| t.player);
        self.log_event(host, kind, activator, target, [args[0], args[1], args[2], 0])
    }

    /// A player picked up an item. The item's spawn point is interned and its
    /// handle written to arg1; arg0 holds the item kind.
    pub fn log_pickup(
        &mut self,
        host: &dyn SimulationHost,
        activator: Option<PlayerRef<'_>>,
        item: Option<&ActorRef<'_>>,
        kind: ItemKind,
    ) -> Option<AppendOutcome> {
        if !self.session.is_recording() {
            return None;
        }

        let mut ev = EventRecord::new(EventKind::PickupItem, host.tick());
        (ev.activator, ev.activator_pos) = self.resolve_player(activator);

        let mut spawn = Handle::NONE;
        if let Some(item) = item {
            ev.target_pos = item.pos;
            spawn = self.item_spawns.intern(ItemSpawnKey { pos: item.pos, item: kind }, ());
        }
        ev.args = [kind.code(), spawn.0 as i32, 0, 0];
        Some(self.events.append(ev, coalesce_policy(ev.kind, Occurrence::Generic)))
    }

    /// An item reappeared at its spawn point.
    pub fn log_item_respawn(
        &mut self,
        host: &dyn SimulationHost,
        item: Option<&ActorRef<'_>>,
    ) -> Option<AppendOutcome> {
        if !self.session.is_recording() {
            return None;
        }

        let mut ev = EventRecord::new(EventKind::SpawnItem, host.tick());
        if let Some(item) = item {
            let kind = ItemKind::from_doomednum(item.doomednum);
            let spawn = self.item_spawns.intern(ItemSpawnKey { pos: item.pos, item: kind }, ());
            ev.activator_pos = item.pos;
            ev.args = [kind.code(), spawn.0 as i32, 0, 0];
        }
        Some(self.events.append(ev, coalesce_policy(ev.kind, Occurrence::Generic)))
    }

    /// Register a player start. Runs during level load, recording or not.
    pub fn log_player_spawn(&mut self, host: &dyn SimulationHost, thing: &MapThing) -> Handle {
        let team = if host.team_spawns() {
            Team::from_spawn_doomednum(thing.doomednum)
        } else {
            Team::None
        };
        self.player_spawns.intern(PlayerSpawnKey { pos: thing.pos, team }, ())
    }

    /// Register a flag pedestal. Runs during level load, recording or not.
    pub fn log_flag_location(&mut self, thing: &MapThing, team: Team) -> Handle {
        self.flag_locations.intern(FlagLocationKey { team, pos: thing.pos }, ())
    }

    /// Handle of a registered player start, if any.
    pub fn player_spawn(&self, pos: Vec3, team: Team) -> Option<Handle> {
        self.player_spawns.find(&PlayerSpawnKey { pos, team })
    }

    /// Follow a player's rename so later events attribute to the same handle.
    /// Refused when the new name is already tracked on that team.
    pub fn rename_player(&mut self, team: Team, old: &str, new: &str) -> bool {
        if !self.session.is_recording() {
            return false;
        }
        let old = PlayerKey::new(old, team);
        let new = PlayerKey::new(new, team);
        let renamed = self.players.rekey(&old, new);
        if !renamed {
            debug!(name = %old.name, "rename ignored");
        }
        renamed
    }

    /// A player fired. Logged at most once per player, kind and tick.
    pub fn log_shot(
        &mut self,
        host: &dyn SimulationHost,
        kind: EventKind,
        activator: Option<PlayerRef<'_>>,
        means: MeansOfDeath,
        angle: i32,
    ) -> Option<AppendOutcome> {
        if !self.session.is_recording() {
            return None;
        }

        let mut ev = EventRecord::new(kind, host.tick());
        (ev.activator, ev.activator_pos) = self.resolve_player(activator);
        ev.args = [angle, means.code(), 0, means.max_shots()];
        Some(self.events.append(ev, coalesce_policy(kind, Occurrence::ShotAttempt)))
    }

    /// A shot landed `hits` times on `target`. Claims this tick's open shot
    /// record when there is one, otherwise opens a record of its own.
    pub fn log_hit(
        &mut self,
        host: &dyn SimulationHost,
        kind: EventKind,
        activator: Option<PlayerRef<'_>>,
        target: Option<PlayerRef<'_>>,
        means: MeansOfDeath,
        hits: i32,
    ) -> Option<AppendOutcome> {
        if !self.session.is_recording() {
            return None;
        }

        let mut ev = EventRecord::new(kind, host.tick());
        (ev.activator, ev.activator_pos) = self.resolve_player(activator);
        (ev.target, ev.target_pos) = self.resolve_player(target);
        ev.args = [0, means.code(), hits, means.max_shots()];
        Some(self.events.append(ev, coalesce_policy(kind, Occurrence::ShotHit)))
    }

    fn resolve_player(&mut self, player: Option<PlayerRef<'_>>) -> (Handle, Vec3) {
        match player {
            Some(p) => {
                let key = PlayerKey::new(p.name, p.team);
                (self.players.intern(key, PlayerSlot(p.id)), p.position())
            }
            None => (Handle::NONE, Vec3::ZERO),
        }
    }

    // === Queries ===

    pub fn state(&self) -> RecorderState {
        self.session.state()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn events(&self) -> &EventBuffer {
        &self.events
    }

    pub fn players(&self) -> &PlayerTable {
        &self.players
    }

    pub fn player_spawns(&self) -> &PlayerSpawnTable {
        &self.player_spawns
    }

    pub fn item_spawns(&self) -> &ItemSpawnTable {
        &self.item_spawns
    }

    pub fn flag_locations(&self) -> &FlagLocationTable {
        &self.flag_locations
    }
}

/// Map a failed write to `RecorderError::Write`, removing the truncated file so
/// it never sits next to complete records.
fn discard_on_failure(path: &Path, written: std::io::Result<()>) -> Result<(), RecorderError> {
    written.map_err(|source| {
        warn!(path = %path.display(), error = %source, "stats record write failed");
        if let Err(e) = fs::remove_file(path) {
            debug!(path = %path.display(), error = %e, "could not remove partial record");
        }
        RecorderError::Write { path: path.to_path_buf(), source }
    })
}
