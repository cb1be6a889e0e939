//! Append-only dedup registries.
//!
//! Each table maps a structural key to a 1-based handle assigned in first-seen
//! order. Tables are small (bounded by map content and roster size), so
//! lookups are a linear scan over insertion order.

use serde::{Deserialize, Serialize};

use super::event::{Handle, Vec3};
use super::kinds::{ItemKind, Team};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord<K, P> {
    pub handle: Handle,
    pub key: K,
    pub payload: P,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityTable<K, P = ()> {
    records: Vec<IdentityRecord<K, P>>,
}

impl<K, P> Default for IdentityTable<K, P> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<K: PartialEq, P> IdentityTable<K, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `key`, inserting it with `payload` on first sight.
    /// An existing record keeps its original payload.
    pub fn intern(&mut self, key: K, payload: P) -> Handle {
        if let Some(handle) = self.find(&key) {
            return handle;
        }
        let handle = Handle(self.records.len() as u32 + 1);
        self.records.push(IdentityRecord { handle, key, payload });
        handle
    }

    pub fn find(&self, key: &K) -> Option<Handle> {
        self.records.iter().find(|r| &r.key == key).map(|r| r.handle)
    }

    pub fn get(&self, handle: Handle) -> Option<&IdentityRecord<K, P>> {
        let index = (handle.0 as usize).checked_sub(1)?;
        self.records.get(index)
    }

    /// Replace the key of the record holding `old`, keeping its handle.
    ///
    /// Refuses (returns false) when `old` is absent or `new` already belongs
    /// to another record, so keys stay unique.
    pub fn rekey(&mut self, old: &K, new: K) -> bool {
        if self.find(&new).is_some() {
            return false;
        }
        match self.records.iter_mut().find(|r| &r.key == old) {
            Some(record) => {
                record.key = new;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IdentityRecord<K, P>> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a, K, P> IntoIterator for &'a IdentityTable<K, P> {
    type Item = &'a IdentityRecord<K, P>;
    type IntoIter = std::slice::Iter<'a, IdentityRecord<K, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A player is tracked per (name, team): a team switch is a new identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerKey {
    pub name: String,
    pub team: Team,
}

impl PlayerKey {
    /// Key for a client-supplied name. Line breaks become spaces so a name
    /// always stays on its own record row.
    pub fn new(name: &str, team: Team) -> Self {
        Self {
            name: single_line(name),
            team,
        }
    }
}

/// `text` with every CR and LF replaced by a space.
pub fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Host connection id the player was first seen with. Not written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerSlot(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSpawnKey {
    pub pos: Vec3,
    pub team: Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSpawnKey {
    pub pos: Vec3,
    pub item: ItemKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagLocationKey {
    pub team: Team,
    pub pos: Vec3,
}

pub type PlayerTable = IdentityTable<PlayerKey, PlayerSlot>;
pub type PlayerSpawnTable = IdentityTable<PlayerSpawnKey>;
pub type ItemSpawnTable = IdentityTable<ItemSpawnKey>;
pub type FlagLocationTable = IdentityTable<FlagLocationKey>;
