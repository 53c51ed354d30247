//! Marriage list.
//!
//! The model is monogamous: each person is assumed to appear in at most one
//! marriage. That is a precondition of the fact base, not something this
//! store enforces. When it is violated, `spouse_of` answers with the first
//! marriage in list order, and `validate` reports the violation.

use ahash::AHashMap;
use serde::Serialize;

use crate::PersonId;

/// An unordered pair of two distinct people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Marriage {
    pub a: PersonId,
    pub b: PersonId,
}

impl Marriage {
    /// The other member of the pair, if `person` is a member.
    pub fn other(&self, person: PersonId) -> Option<PersonId> {
        if self.a == person {
            Some(self.b)
        } else if self.b == person {
            Some(self.a)
        } else {
            None
        }
    }

    fn same_pair(&self, other: &Marriage) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MarriageStore {
    /// Marriages in declaration order
    marriages: Vec<Marriage>,
    /// person -> indexes into `marriages`, ascending
    by_person: AHashMap<PersonId, Vec<usize>>,
}

impl MarriageStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a marriage. Re-declaring an existing pair (in either order) is
    /// a no-op.
    pub(crate) fn add(&mut self, marriage: Marriage) {
        if let Some(existing) = self.by_person.get(&marriage.a) {
            if existing
                .iter()
                .any(|&idx| self.marriages[idx].same_pair(&marriage))
            {
                return;
            }
        }
        let idx = self.marriages.len();
        self.marriages.push(marriage);
        self.by_person.entry(marriage.a).or_default().push(idx);
        self.by_person.entry(marriage.b).or_default().push(idx);
    }

    /// First spouse of `person` in list order.
    pub(crate) fn spouse_of(&self, person: PersonId) -> Option<PersonId> {
        let idx = *self.by_person.get(&person)?.first()?;
        self.marriages[idx].other(person)
    }

    /// Every spouse of `person`, in list order.
    pub(crate) fn spouses_of(&self, person: PersonId) -> Vec<PersonId> {
        self.by_person
            .get(&person)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&idx| self.marriages[idx].other(person))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn all(&self) -> &[Marriage] {
        &self.marriages
    }
}
