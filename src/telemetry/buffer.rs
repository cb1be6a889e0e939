//! Tick-ordered event log with same-tick coalescing.
//!
//! Records are only ever appended in call order, so every record that can
//! still coalesce with a new candidate sits in a contiguous run at the tail:
//! the records stamped with the candidate's tick. Every policy scans that run
//! newest-first and stops at the first record from an earlier tick.

use tracing::debug;

use super::event::{EventKind, EventRecord, Handle};

/// Which ingestion path produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Generic gameplay fact with up to four integer arguments.
    Generic,
    /// A player fired; logged once per player, kind and tick.
    ShotAttempt,
    /// A fired shot connected with a target.
    ShotHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoalescePolicy {
    /// Always a new record.
    Append,
    /// Same kind/activator/target this tick absorbs arg0 and arg1.
    Accumulate,
    /// Same kind/activator (and target, if `match_target`) this tick means the
    /// candidate is dropped.
    Suppress { match_target: bool },
    /// Same kind/activator this tick with an unset or equal target is claimed
    /// by the candidate; a different target opens a new record.
    Claim,
}

/// Coalescing policy for a candidate of `kind` arriving through `occurrence`.
pub fn coalesce_policy(kind: EventKind, occurrence: Occurrence) -> CoalescePolicy {
    match occurrence {
        Occurrence::ShotAttempt => CoalescePolicy::Suppress { match_target: false },
        Occurrence::ShotHit => CoalescePolicy::Claim,
        Occurrence::Generic => match kind {
            EventKind::Damage | EventKind::CarrierDamage => CoalescePolicy::Accumulate,
            k if k.is_accuracy() => CoalescePolicy::Suppress { match_target: true },
            _ => CoalescePolicy::Append,
        },
    }
}

/// What happened to a candidate. Indices are 0-based buffer positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended(usize),
    Merged(usize),
    Suppressed(usize),
}

impl AppendOutcome {
    pub fn index(self) -> usize {
        match self {
            AppendOutcome::Appended(i) | AppendOutcome::Merged(i) | AppendOutcome::Suppressed(i) => i,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventBuffer {
    events: Vec<EventRecord>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, candidate: EventRecord, policy: CoalescePolicy) -> AppendOutcome {
        let found = match policy {
            CoalescePolicy::Append => None,
            CoalescePolicy::Accumulate | CoalescePolicy::Suppress { match_target: true } => {
                self.find_same_tick(&candidate, |r| r.target == candidate.target)
            }
            CoalescePolicy::Suppress { match_target: false } => self.find_same_tick(&candidate, |_| true),
            CoalescePolicy::Claim => self.find_same_tick(&candidate, |r| {
                r.target == candidate.target || r.target == Handle::NONE
            }),
        };

        let Some(index) = found else {
            self.events.push(candidate);
            return AppendOutcome::Appended(self.events.len() - 1);
        };

        let record = &mut self.events[index];
        match policy {
            CoalescePolicy::Accumulate => {
                record.args[0] = record.args[0].saturating_add(candidate.args[0]);
                record.args[1] = record.args[1].saturating_add(candidate.args[1]);
                debug!(kind = %record.kind, index, "accumulated into same-tick event");
                AppendOutcome::Merged(index)
            }
            CoalescePolicy::Claim => {
                record.target = candidate.target;
                record.target_pos = candidate.target_pos;
                record.args[2] = record.args[2].saturating_add(candidate.args[2]);
                debug!(kind = %record.kind, index, target = %record.target, "hit claimed accuracy slot");
                AppendOutcome::Merged(index)
            }
            CoalescePolicy::Suppress { .. } | CoalescePolicy::Append => AppendOutcome::Suppressed(index),
        }
    }

    /// Newest record on the candidate's tick with the same kind and activator
    /// that also satisfies `accept`.
    fn find_same_tick<F>(&self, candidate: &EventRecord, accept: F) -> Option<usize>
    where
        F: Fn(&EventRecord) -> bool,
    {
        self.events
            .iter()
            .enumerate()
            .rev()
            .take_while(|(_, r)| r.tick == candidate.tick)
            .find(|(_, r)| r.kind == candidate.kind && r.activator == candidate.activator && accept(r))
            .map(|(i, _)| i)
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.events.get(index)
    }

    /// Up to the last `n` records, oldest first.
    pub fn tail(&self, n: usize) -> &[EventRecord] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }

    pub fn as_slice(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
