//! Name interning: every person name is stored once and referenced by a dense
//! `PersonId`. Ids double as bitmap members, so they must stay `u32` and
//! dense (assigned in first-seen order).

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Interned person id (4 bytes instead of 24+ for String)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PersonId(u32);

impl PersonId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Name interner: maps names to compact ids
#[derive(Debug)]
pub struct NameInterner {
    /// Name to id mapping
    name_to_id: DashMap<String, PersonId>,
    /// Id to name mapping (for reverse lookup)
    id_to_name: DashMap<PersonId, String>,
    /// Next available id
    next_id: AtomicU32,
}

impl NameInterner {
    pub fn new() -> Self {
        Self {
            name_to_id: DashMap::new(),
            id_to_name: DashMap::new(),
            next_id: AtomicU32::new(0),
        }
    }

    /// Intern a name, returning its id
    pub fn intern(&self, name: &str) -> PersonId {
        if let Some(id) = self.name_to_id.get(name) {
            return *id;
        }

        // `entry` keeps two racing writers from minting two ids for one name.
        *self
            .name_to_id
            .entry(name.to_string())
            .or_insert_with(|| {
                let id = PersonId(self.next_id.fetch_add(1, Ordering::SeqCst));
                self.id_to_name.insert(id, name.to_string());
                id
            })
    }

    /// Look up an existing id for a name without inserting.
    pub fn id_of(&self, name: &str) -> Option<PersonId> {
        self.name_to_id.get(name).map(|id| *id)
    }

    /// Look up a name by id
    pub fn lookup(&self, id: PersonId) -> Option<String> {
        self.id_to_name.get(&id).map(|s| s.clone())
    }

    pub fn len(&self) -> usize {
        self.next_id.load(Ordering::SeqCst) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}
