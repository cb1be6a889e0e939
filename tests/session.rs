mod common;

use common::{armed_recorder, player, recording, MockHost};
use wdlstats::telemetry::{EventKind, ItemKind, MeansOfDeath, Team, Vec3};
use wdlstats::{ActorRef, MapThing, RecorderConfig, RecorderState, StatsRecorder};

#[test]
fn idle_recorder_never_starts() {
    let host = MockHost::default();
    let mut rec = StatsRecorder::new(RecorderConfig::default());
    assert_eq!(rec.state(), RecorderState::Idle);
    assert!(!rec.start_session(&host));
    assert_eq!(rec.state(), RecorderState::Idle);
}

#[test]
fn warmup_keeps_recorder_armed_and_tables_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MockHost::default();
    let mut rec = recording(dir.path(), &host);
    rec.log_event(&host, EventKind::JoinGame, Some(player(1, "a")), None, [0; 4]);
    rec.commit_session(&host).unwrap();

    host.in_game = false;
    assert!(!rec.start_session(&host));
    assert_eq!(rec.state(), RecorderState::Armed);
    assert_eq!(rec.events().len(), 1);
    assert_eq!(rec.players().len(), 1);
}

#[test]
fn entry_points_are_inert_outside_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let host = MockHost::default();
    let mut rec = armed_recorder(dir.path());
    let (a, b) = (player(1, "a"), player(2, "b"));
    let item = ActorRef { doomednum: 2011, pos: Vec3::new(1, 2, 3), player: None };
    let actor = ActorRef { doomednum: 1, pos: Vec3::ZERO, player: Some(a) };

    assert_eq!(rec.log_event(&host, EventKind::Damage, Some(a), Some(b), [5, 0, 0, 0]), None);
    assert_eq!(rec.log_actor_event(&host, EventKind::Kill, Some(&actor), None, [0; 3]), None);
    assert_eq!(rec.log_pickup(&host, Some(a), Some(&item), ItemKind::Stimpack), None);
    assert_eq!(rec.log_item_respawn(&host, Some(&item)), None);
    assert_eq!(rec.log_shot(&host, EventKind::SpreadAccuracy, Some(a), MeansOfDeath::Shotgun, 0), None);
    assert_eq!(rec.log_hit(&host, EventKind::SpreadAccuracy, Some(a), Some(b), MeansOfDeath::Shotgun, 3), None);
    assert!(!rec.rename_player(Team::None, "a", "z"));

    assert!(rec.events().is_empty());
    assert!(rec.players().is_empty());
    assert!(rec.item_spawns().is_empty());
}

#[test]
fn level_load_registration_works_before_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MockHost { team_spawns: true, ..Default::default() };
    let mut rec = armed_recorder(dir.path());

    let red = MapThing { doomednum: 5081, pos: Vec3::new(10, 20, 0) };
    let plain = MapThing { doomednum: 1, pos: Vec3::new(30, 40, 0) };
    let h_red = rec.log_player_spawn(&host, &red);
    let h_plain = rec.log_player_spawn(&host, &plain);
    assert_eq!(rec.log_player_spawn(&host, &red), h_red);
    assert_eq!(rec.player_spawn(red.pos, Team::Red), Some(h_red));
    assert_eq!(rec.player_spawn(plain.pos, Team::None), Some(h_plain));
    assert_eq!(rec.player_spawn(red.pos, Team::Blue), None);

    host.team_spawns = false;
    let untyped = rec.log_player_spawn(&host, &red);
    assert_ne!(untyped, h_red, "without team spawns the start is teamless");

    rec.log_flag_location(&MapThing { doomednum: 5130, pos: Vec3::new(0, 0, 0) }, Team::Blue);
    assert_eq!(rec.flag_locations().len(), 1);

    assert!(rec.start_session(&host));
    assert_eq!(rec.player_spawns().len(), 3, "spawn table survives session start");
    assert_eq!(rec.flag_locations().len(), 1);
}

#[test]
fn start_clears_players_and_events_only() {
    let dir = tempfile::tempdir().unwrap();
    let host = MockHost::default();
    let mut rec = recording(dir.path(), &host);
    let item = ActorRef { doomednum: 2011, pos: Vec3::new(1, 2, 3), player: None };

    rec.log_pickup(&host, Some(player(1, "a")), Some(&item), ItemKind::Stimpack);
    assert_eq!((rec.events().len(), rec.players().len(), rec.item_spawns().len()), (1, 1, 1));

    assert!(rec.start_session(&host));
    assert_eq!((rec.events().len(), rec.players().len(), rec.item_spawns().len()), (0, 0, 1));
}

#[test]
fn beacons_follow_the_setting_at_session_start() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MockHost::default();
    let mut rec = recording(dir.path(), &host);
    let a = player(1, "a");

    host.beacons = true;
    assert_eq!(rec.log_event(&host, EventKind::PlayerBeacon, Some(a), None, [0; 4]), None);

    assert!(rec.start_session(&host));
    host.beacons = false;
    assert!(rec.log_event(&host, EventKind::PlayerBeacon, Some(a), None, [0; 4]).is_some());
}

#[test]
fn actor_events_resolve_only_player_bodies() {
    let dir = tempfile::tempdir().unwrap();
    let host = MockHost::default();
    let mut rec = recording(dir.path(), &host);
    let a = player(1, "a");
    let body = ActorRef { doomednum: 1, pos: Vec3::new(100, 0, 0), player: Some(a) };
    let barrel = ActorRef { doomednum: 2035, pos: Vec3::new(5, 5, 0), player: None };

    rec.log_actor_event(&host, EventKind::EnviroKill, Some(&barrel), Some(&body), [19, 0, 0]);
    let ev = rec.events().get(0).unwrap();
    assert!(ev.activator.is_none());
    assert_eq!(ev.activator_pos, Vec3::ZERO);
    assert_eq!(ev.target_pos, Vec3::new(100, 0, 0));
    assert_eq!(ev.args, [19, 0, 0, 0]);
}

#[test]
fn pickups_and_respawns_share_item_spawn_handles() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MockHost::default();
    let mut rec = recording(dir.path(), &host);
    let shells = ActorRef { doomednum: 2008, pos: Vec3::new(64, -32, 8), player: None };

    rec.log_pickup(&host, Some(player(1, "a")), Some(&shells), ItemKind::Shells);
    host.tick += 30 * 35;
    rec.log_item_respawn(&host, Some(&shells));

    let pickup = *rec.events().get(0).unwrap();
    let respawn = *rec.events().get(1).unwrap();
    assert_eq!(pickup.kind, EventKind::PickupItem);
    assert_eq!(pickup.target_pos, shells.pos);
    assert_eq!(pickup.args[0], ItemKind::Shells.code());
    assert_eq!(respawn.kind, EventKind::SpawnItem);
    assert_eq!(respawn.activator_pos, shells.pos);
    assert_eq!(respawn.args[..2], pickup.args[..2]);
    assert_eq!(rec.item_spawns().len(), 1);
}

#[test]
fn rename_keeps_attribution() {
    let dir = tempfile::tempdir().unwrap();
    let host = MockHost::default();
    let mut rec = recording(dir.path(), &host);

    rec.log_event(&host, EventKind::JoinGame, Some(player(1, "old")), None, [0; 4]);
    assert!(rec.rename_player(Team::None, "old", "new"));
    rec.log_event(&host, EventKind::Disconnect, Some(player(1, "new")), None, [0; 4]);

    assert_eq!(rec.players().len(), 1);
    let handles: Vec<_> = rec.events().iter().map(|e| e.activator).collect();
    assert_eq!(handles[0], handles[1]);
}

#[test]
fn blank_log_dir_never_records() {
    let host = MockHost::default();
    let mut rec = StatsRecorder::new(RecorderConfig::default());
    rec.arm("");
    assert_eq!(rec.state(), RecorderState::Idle);
    assert!(!rec.start_session(&host));
    assert!(rec.log_event(&host, EventKind::JoinGame, Some(player(1, "a")), None, [0; 4]).is_none());
    assert!(rec.commit_session(&host).unwrap().is_none());
}
