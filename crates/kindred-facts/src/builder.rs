//! Assembling a `FactBase`.
//!
//! Hard invariants (one father and one mother per child, no self edges, no
//! ancestry cycles, one gender per person) are rejected here. Soft ones
//! (missing genders, role/gender mismatches, monogamy) are left to
//! [`crate::validate`] and only logged.

use crate::error::FactError;
use crate::interner::NameInterner;
use crate::lineage::LineageStore;
use crate::marriage::{Marriage, MarriageStore};
use crate::people::{Gender, ParentRole, PersonStore};
use crate::{validate, FactBase, PersonId};

#[derive(Debug, Default)]
pub struct FactBaseBuilder {
    interner: NameInterner,
    people: PersonStore,
    lineage: LineageStore,
    marriages: MarriageStore,
}

impl FactBaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> PersonId {
        let id = self.interner.intern(name);
        self.people.ensure(id);
        id
    }

    fn name(&self, id: PersonId) -> String {
        self.interner.lookup(id).unwrap_or_else(|| id.to_string())
    }

    /// Declare a person's gender.
    pub fn person(&mut self, name: &str, gender: Gender) -> Result<&mut Self, FactError> {
        let id = self.intern(name);
        self.people
            .set_gender(id, gender)
            .map_err(|existing| FactError::ConflictingGender {
                name: name.to_string(),
                existing,
                gender,
            })?;
        Ok(self)
    }

    pub fn father(&mut self, child: &str, father: &str) -> Result<&mut Self, FactError> {
        self.parent(child, ParentRole::Father, father)
    }

    pub fn mother(&mut self, child: &str, mother: &str) -> Result<&mut Self, FactError> {
        self.parent(child, ParentRole::Mother, mother)
    }

    /// Link `child` to `parent` in `role`.
    pub fn parent(
        &mut self,
        child: &str,
        role: ParentRole,
        parent: &str,
    ) -> Result<&mut Self, FactError> {
        if child == parent {
            return Err(FactError::SelfParent {
                name: child.to_string(),
                role,
            });
        }
        let child_id = self.intern(child);
        let parent_id = self.intern(parent);
        if let Err(existing) = self.lineage.set_parent(child_id, role, parent_id) {
            return Err(FactError::ConflictingParent {
                child: child.to_string(),
                role,
                existing: self.name(existing),
                parent: parent.to_string(),
            });
        }
        Ok(self)
    }

    /// Record a marriage between two distinct people.
    pub fn marry(&mut self, a: &str, b: &str) -> Result<&mut Self, FactError> {
        if a == b {
            return Err(FactError::SelfMarriage {
                name: a.to_string(),
            });
        }
        let a = self.intern(a);
        let b = self.intern(b);
        self.marriages.add(Marriage { a, b });
        Ok(self)
    }

    pub fn build(self) -> Result<FactBase, FactError> {
        if let Some(on_cycle) = self.lineage.find_cycle(self.people.len()) {
            return Err(FactError::AncestryCycle {
                name: self.name(on_cycle),
            });
        }

        let mut base = FactBase {
            interner: self.interner,
            people: self.people,
            lineage: self.lineage,
            marriages: self.marriages,
            issues: Vec::new(),
        };
        base.issues = validate::validate(&base);

        for issue in &base.issues {
            tracing::warn!(severity = ?issue.severity(), "{issue}");
        }
        tracing::debug!(
            people = base.len(),
            parent_edges = base.lineage.edge_count(),
            marriages = base.marriages().len(),
            issues = base.issues.len(),
            "built fact base"
        );

        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains_and_builds() -> Result<(), FactError> {
        let mut b = FactBaseBuilder::new();
        b.person("George", Gender::Male)?
            .person("Bob", Gender::Male)?
            .father("Bob", "George")?;
        let base = b.build()?;

        assert_eq!(base.father_of("Bob").as_deref(), Some("George"));
        assert_eq!(base.mother_of("Bob"), None);
        Ok(())
    }

    #[test]
    fn conflicting_father_is_rejected() {
        let mut b = FactBaseBuilder::new();
        b.father("Bob", "George").unwrap();
        let err = b.father("Bob", "Dave").unwrap_err();
        assert_eq!(
            err,
            FactError::ConflictingParent {
                child: "Bob".to_string(),
                role: ParentRole::Father,
                existing: "George".to_string(),
                parent: "Dave".to_string(),
            }
        );
    }

    #[test]
    fn self_edges_are_rejected() {
        let mut b = FactBaseBuilder::new();
        assert!(matches!(
            b.mother("Eve", "Eve"),
            Err(FactError::SelfParent { .. })
        ));
        assert!(matches!(
            b.marry("Eve", "Eve"),
            Err(FactError::SelfMarriage { .. })
        ));
    }

    #[test]
    fn ancestry_cycle_fails_build() {
        let mut b = FactBaseBuilder::new();
        b.father("A", "B").unwrap().father("B", "C").unwrap();
        b.mother("C", "A").unwrap();
        assert!(matches!(b.build(), Err(FactError::AncestryCycle { .. })));
    }

    #[test]
    fn conflicting_gender_is_rejected() {
        let mut b = FactBaseBuilder::new();
        b.person("Jackie", Gender::Female).unwrap();
        assert!(matches!(
            b.person("Jackie", Gender::Male),
            Err(FactError::ConflictingGender { .. })
        ));
    }
}
