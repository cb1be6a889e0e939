use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use wdlstats::format::read_record;
use wdlstats::telemetry::{compute_snapshot, EventKind, ItemKind, MeansOfDeath, Team, Vec3};
use wdlstats::{
    ActorRef, Command, GameMode, LevelInfo, MapThing, PlayerRef, RecorderConfig, SimulationHost,
    StatsRecorder, Tick, TICRATE,
};

const USAGE: &str = "usage: wdlstats inspect <record.log>\n       wdlstats demo <logdir> [config.json]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("inspect") => {
            let path = args.get(1).context(USAGE)?;
            inspect(Path::new(path))
        }
        Some("demo") => {
            let dir = args.get(1).context(USAGE)?;
            let config = match args.get(2) {
                Some(path) => RecorderConfig::load(Path::new(path))?,
                None => RecorderConfig::default(),
            };
            demo(dir, config)
        }
        _ => bail!(USAGE),
    }
}

fn inspect(path: &Path) -> Result<()> {
    let record = read_record(path).with_context(|| format!("reading {}", path.display()))?;
    let h = &record.header;
    let mode = GameMode::from_code(h.game_mode).map_or("unknown", GameMode::as_str);

    println!("{} ({}) recorded {}", h.level_name, mode, h.time);
    println!(
        "duration: {} tics ({:.1}s), ended at tic {}",
        h.duration,
        h.duration as f64 / TICRATE as f64,
        h.end_tick
    );

    let snap = compute_snapshot(&record.events);
    println!("events: {}", snap.total_events);
    for kind in EventKind::ALL {
        let n = snap.count(kind);
        if n > 0 {
            println!("  {:<20} {}", kind.name(), n);
        }
    }
    println!(
        "damage: {} ({} records, {:.1} avg), environment: {}, kills: {}",
        snap.damage_stats.total_damage,
        snap.damage_stats.records,
        snap.damage_stats.avg_damage_per_record,
        snap.damage_stats.environment_damage,
        snap.damage_stats.kills
    );

    println!("players:");
    for p in &record.players {
        let stats = snap.players.get(&p.handle).cloned().unwrap_or_default();
        println!(
            "  {:>3} {:<16} team {} dealt {:>5} taken {:>5} K/D {}/{}",
            p.handle,
            p.name,
            p.team.code(),
            stats.damage_dealt,
            stats.damage_taken,
            stats.kills,
            stats.deaths
        );
    }

    if !snap.accuracy.is_empty() {
        println!("accuracy:");
        for (weapon, acc) in &snap.accuracy {
            println!(
                "  {:<14} {:>4}/{:<4} {:.1}%",
                format!("{:?}", weapon),
                acc.hits,
                acc.possible_hits,
                acc.ratio() * 100.0
            );
        }
    }
    Ok(())
}

/// Scripted host for the demo round.
struct DemoHost {
    tick: u64,
}

impl SimulationHost for DemoHost {
    fn in_game(&self) -> bool {
        true
    }

    fn tick(&self) -> Tick {
        Tick::at(self.tick)
    }

    fn level(&self) -> LevelInfo {
        LevelInfo {
            number: 1,
            name: "MAP01".to_string(),
            hash: "DEMO".to_string(),
        }
    }

    fn game_mode(&self) -> GameMode {
        GameMode::Deathmatch
    }

    fn team_spawns(&self) -> bool {
        false
    }

    fn player_beacons(&self) -> bool {
        false
    }
}

fn demo(dir: &str, config: RecorderConfig) -> Result<()> {
    let mut recorder = StatsRecorder::new(config);
    println!("{}", Command::parse_line(&format!("wdlstats {}", dir))?.execute(&mut recorder));

    let mut host = DemoHost { tick: 0 };
    let spawn = MapThing { doomednum: 1, pos: Vec3::new(64, 64, 0) };
    recorder.log_player_spawn(&host, &spawn);
    recorder.start_session(&host);

    let alice = PlayerRef { id: 0, name: "alice", team: Team::None, body: Some(Vec3::new(64, 64, 0)) };
    let bob = PlayerRef { id: 1, name: "bob", team: Team::None, body: Some(Vec3::new(512, 64, 0)) };
    let ssg = MeansOfDeath::SuperShotgun;

    for player in [alice, bob] {
        recorder.log_event(&host, EventKind::JoinGame, Some(player), None, [0; 4]);
    }

    host.tick = TICRATE;
    let shell_box = ActorRef { doomednum: 2049, pos: Vec3::new(128, 0, 0), player: None };
    recorder.log_pickup(&host, Some(alice), Some(&shell_box), ItemKind::ShellBox);

    host.tick = 2 * TICRATE;
    recorder.log_shot(&host, EventKind::SpreadAccuracy, Some(alice), ssg, 0);
    recorder.log_hit(&host, EventKind::SpreadAccuracy, Some(alice), Some(bob), ssg, 14);
    for _ in 0..14 {
        recorder.log_event(&host, EventKind::Damage, Some(alice), Some(bob), [10, 0, ssg.code(), 0]);
    }
    recorder.log_event(&host, EventKind::Kill, Some(alice), Some(bob), [ssg.code(), 0, 0, 0]);

    host.tick = 32 * TICRATE;
    recorder.log_item_respawn(&host, Some(&shell_box));

    for line in ["wdlinfo state", "wdlinfo size", "wdlinfo players", "wdlinfo tail"] {
        println!("{}", Command::parse_line(line)?.execute(&mut recorder));
    }

    host.tick = 60 * TICRATE;
    match recorder.commit_session(&host)? {
        Some(path) => inspect(&path),
        None => bail!("demo round produced no record"),
    }
}
