//! Kindred fact store: a static kinship knowledge base.
//!
//! Three base relations are stored, all keyed by interned person ids:
//!
//! 1. **Genders**: a column plus a `Gender -> bitmap` index
//! 2. **Parent edges**: `child -> father`, `child -> mother`, with backward
//!    `parent -> children` bitmaps per role
//! 3. **Marriages**: an ordered list of unordered pairs
//!
//! A `FactBase` is assembled once through [`FactBaseBuilder`] and never
//! mutated afterwards; every lookup is a pure read.
//!
//! Absence is not an error here: a child without a recorded father simply has
//! no father. The only lookup that fails is [`FactBase::gender_of`], because a
//! person without a gender entry is not a person the fact base knows.

pub mod builder;
pub mod error;
pub mod fixtures;
mod interner;
mod lineage;
mod marriage;
mod people;
pub mod validate;

use roaring::RoaringBitmap;
use std::collections::BTreeSet;

pub use builder::FactBaseBuilder;
pub use error::FactError;
pub use fixtures::FactBaseName;
pub use interner::{NameInterner, PersonId};
pub use lineage::ParentEdge;
pub use marriage::Marriage;
pub use people::{Gender, ParentRole, PersonView};
pub use validate::{FactIssue, Reference, Severity};

use lineage::LineageStore;
use marriage::MarriageStore;
use people::PersonStore;

// ============================================================================
// FactBase: The Complete Store
// ============================================================================

#[derive(Debug)]
pub struct FactBase {
    interner: NameInterner,
    people: PersonStore,
    lineage: LineageStore,
    marriages: MarriageStore,
    /// Soft diagnostics computed once at build time.
    issues: Vec<FactIssue>,
}

impl FactBase {
    pub fn builder() -> FactBaseBuilder {
        FactBaseBuilder::new()
    }

    /// Number of interned names, including people without a gender entry.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.len() == 0
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Id of an interned name. Interned does not mean known: see [`FactBase::known_id`].
    pub fn person_id(&self, name: &str) -> Option<PersonId> {
        self.interner.id_of(name)
    }

    /// Id of a person with a gender entry.
    pub fn known_id(&self, name: &str) -> Result<PersonId, FactError> {
        self.person_id(name)
            .filter(|&id| self.people.gender(id).is_some())
            .ok_or_else(|| FactError::UnknownPerson {
                name: name.to_string(),
            })
    }

    pub fn name_of(&self, id: PersonId) -> Option<String> {
        self.interner.lookup(id)
    }

    /// Resolve a bitmap of ids into a sorted set of names.
    pub fn names(&self, people: &RoaringBitmap) -> BTreeSet<String> {
        people
            .iter()
            .filter_map(|raw| self.name_of(PersonId::new(raw)))
            .collect()
    }

    /// Every interned person, in id order.
    pub fn people(&self) -> Vec<PersonView> {
        (0..self.len() as u32)
            .map(PersonId::new)
            .filter_map(|id| {
                Some(PersonView {
                    id,
                    name: self.name_of(id)?,
                    gender: self.people.gender(id),
                })
            })
            .collect()
    }

    // ========================================================================
    // Genders
    // ========================================================================

    pub fn gender(&self, id: PersonId) -> Option<Gender> {
        self.people.gender(id)
    }

    /// Gender of a named person; fails with `UnknownPerson` when there is no
    /// gender entry.
    pub fn gender_of(&self, name: &str) -> Result<Gender, FactError> {
        let id = self.known_id(name)?;
        self.people
            .gender(id)
            .ok_or_else(|| FactError::UnknownPerson {
                name: name.to_string(),
            })
    }

    /// The gender-indexed partition: everyone recorded with `gender`.
    pub fn people_with_gender(&self, gender: Gender) -> RoaringBitmap {
        self.people.by_gender(gender).cloned().unwrap_or_default()
    }

    /// Everyone with a gender entry.
    pub fn known_people(&self) -> RoaringBitmap {
        self.people.known()
    }

    // ========================================================================
    // Parent edges
    // ========================================================================

    pub fn parent(&self, child: PersonId, role: ParentRole) -> Option<PersonId> {
        self.lineage.parent(child, role)
    }

    pub fn father_of(&self, name: &str) -> Option<String> {
        self.parent_name(name, ParentRole::Father)
    }

    pub fn mother_of(&self, name: &str) -> Option<String> {
        self.parent_name(name, ParentRole::Mother)
    }

    fn parent_name(&self, name: &str, role: ParentRole) -> Option<String> {
        let child = self.person_id(name)?;
        self.name_of(self.parent(child, role)?)
    }

    /// Children linked to `parent` through `role`.
    pub fn children(&self, parent: PersonId, role: ParentRole) -> RoaringBitmap {
        self.lineage
            .children(parent, role)
            .cloned()
            .unwrap_or_default()
    }

    /// Children linked to `parent` through either role.
    pub fn children_any(&self, parent: PersonId) -> RoaringBitmap {
        let mut out = RoaringBitmap::new();
        for role in ParentRole::ALL {
            if let Some(kids) = self.lineage.children(parent, role) {
                out |= kids;
            }
        }
        out
    }

    pub fn parent_edges(&self) -> Vec<ParentEdge> {
        self.lineage.edges()
    }

    // ========================================================================
    // Marriages
    // ========================================================================

    /// Spouse of `person`: the other member of the first marriage in list
    /// order that contains them.
    pub fn spouse(&self, person: PersonId) -> Option<PersonId> {
        self.marriages.spouse_of(person)
    }

    pub fn spouse_of(&self, name: &str) -> Option<String> {
        let id = self.person_id(name)?;
        self.name_of(self.spouse(id)?)
    }

    /// All spouses of `person` in list order (more than one only when the
    /// monogamy precondition is violated).
    pub fn spouses(&self, person: PersonId) -> Vec<PersonId> {
        self.marriages.spouses_of(person)
    }

    pub fn marriages(&self) -> &[Marriage] {
        self.marriages.all()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Soft diagnostics found when the fact base was built.
    pub fn issues(&self) -> &[FactIssue] {
        &self.issues
    }
}
