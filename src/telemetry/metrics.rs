use std::collections::BTreeMap;

use super::event::{EventKind, EventRecord, Handle};
use super::kinds::{MeansOfDeath, WeaponKind};

/// Aggregates over one session's events. Read-only; nothing in the recorder
/// consults it.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub total_events: u64,
    pub per_kind: BTreeMap<i32, u64>,
    pub damage_stats: DamageStats,
    pub players: BTreeMap<Handle, PlayerStats>,
    pub accuracy: BTreeMap<WeaponKind, AccuracyStats>,
}

#[derive(Debug, Clone, Default)]
pub struct DamageStats {
    pub records: u64,
    pub total_damage: i64,
    pub environment_damage: i64,
    pub kills: u64,
    pub avg_damage_per_record: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub kills: u64,
    pub deaths: u64,
    pub pickups: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracyStats {
    pub attacks: u64,
    pub possible_hits: u64,
    pub hits: u64,
}

impl AccuracyStats {
    pub fn ratio(&self) -> f64 {
        if self.possible_hits == 0 {
            0.0
        } else {
            self.hits as f64 / self.possible_hits as f64
        }
    }
}

impl TelemetrySnapshot {
    pub fn count(&self, kind: EventKind) -> u64 {
        self.per_kind.get(&kind.code()).copied().unwrap_or(0)
    }
}

pub fn compute_snapshot<'a, I>(events: I) -> TelemetrySnapshot
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut snap = TelemetrySnapshot::default();

    for ev in events {
        snap.total_events += 1;
        *snap.per_kind.entry(ev.kind.code()).or_default() += 1;

        match ev.kind {
            EventKind::Damage | EventKind::CarrierDamage => {
                let amount = i64::from(ev.args[0]);
                snap.damage_stats.records += 1;
                snap.damage_stats.total_damage += amount;
                if !ev.activator.is_none() {
                    snap.players.entry(ev.activator).or_default().damage_dealt += amount;
                }
                if !ev.target.is_none() {
                    snap.players.entry(ev.target).or_default().damage_taken += amount;
                }
            }
            EventKind::EnviroDamage | EventKind::EnviroCarrierDamage => {
                let amount = i64::from(ev.args[0]);
                snap.damage_stats.environment_damage += amount;
                if !ev.target.is_none() {
                    snap.players.entry(ev.target).or_default().damage_taken += amount;
                }
            }
            EventKind::PickupItem => {
                if !ev.activator.is_none() {
                    snap.players.entry(ev.activator).or_default().pickups += 1;
                }
            }
            kind if kind.is_kill() => {
                snap.damage_stats.kills += 1;
                if !ev.activator.is_none() && ev.activator != ev.target {
                    snap.players.entry(ev.activator).or_default().kills += 1;
                }
                if !ev.target.is_none() {
                    snap.players.entry(ev.target).or_default().deaths += 1;
                }
            }
            kind if kind.is_accuracy() => {
                // arg1 = means of death, arg2 = hits, arg3 = possible hits per attack
                let weapon = MeansOfDeath::from_code(ev.args[1]).weapon();
                let acc = snap.accuracy.entry(weapon).or_default();
                acc.attacks += 1;
                acc.possible_hits += ev.args[3].max(0) as u64;
                acc.hits += ev.args[2].max(0) as u64;
            }
            _ => {}
        }
    }

    if snap.damage_stats.records > 0 {
        snap.damage_stats.avg_damage_per_record =
            snap.damage_stats.total_damage as f64 / snap.damage_stats.records as f64;
    }

    snap
}
