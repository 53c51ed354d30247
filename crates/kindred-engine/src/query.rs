//! Query API: one entry point per named relation, keyed by person name.

use kindred_facts::{FactBase, Gender, ParentRole, PersonId};
use roaring::RoaringBitmap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::derive;
use crate::error::KinshipError;
use crate::expr::KinExpr;
use crate::trace::TraceEvent;
use crate::relation::Relation;

/// Read-only query engine over a shared, immutable fact base.
///
/// Cloning is cheap and clones share the same facts, so a `Kinship` can be
/// handed to any number of threads.
#[derive(Debug, Clone)]
pub struct Kinship {
    facts: Arc<FactBase>,
}

/// A relation answer together with how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub relation: Relation,
    pub person: String,
    pub expr: String,
    pub relatives: BTreeSet<String>,
    pub trace: Vec<TraceEvent>,
}

impl Kinship {
    pub fn new(facts: FactBase) -> Self {
        Self {
            facts: Arc::new(facts),
        }
    }

    pub fn from_shared(facts: Arc<FactBase>) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &FactBase {
        &self.facts
    }

    fn resolve(&self, name: &str) -> Result<PersonId, KinshipError> {
        self.facts
            .known_id(name)
            .map_err(|_| KinshipError::UnknownPerson {
                name: name.to_string(),
            })
    }

    fn single(&self, name: &str) -> Result<RoaringBitmap, KinshipError> {
        let id = self.resolve(name)?;
        Ok(std::iter::once(id.raw()).collect())
    }

    // ========================================================================
    // Named relations
    // ========================================================================

    /// Everyone standing in `relation` to `name`.
    pub fn relatives(&self, relation: Relation, name: &str) -> Result<BTreeSet<String>, KinshipError> {
        tracing::debug!(%relation, person = name, "kinship query");
        let input = self.single(name)?;
        let out = relation.expr().evaluate(&self.facts, &input);
        Ok(self.facts.names(&out))
    }

    /// Like [`Kinship::relatives`], with the expression and per-step trace.
    pub fn explain(&self, relation: Relation, name: &str) -> Result<Explanation, KinshipError> {
        let input = self.single(name)?;
        let expr = relation.expr();
        let traced = expr.evaluate_traced(&self.facts, &input);
        Ok(Explanation {
            relation,
            person: name.to_string(),
            expr: expr.to_string(),
            relatives: self.facts.names(&traced.value),
            trace: traced.trace,
        })
    }

    /// Evaluate an arbitrary expression for `name`.
    pub fn evaluate(&self, expr: &KinExpr, name: &str) -> Result<BTreeSet<String>, KinshipError> {
        let input = self.single(name)?;
        Ok(self.facts.names(&expr.evaluate(&self.facts, &input)))
    }

    // ========================================================================
    // Functional lookups
    // ========================================================================

    pub fn gender_of(&self, name: &str) -> Result<Gender, KinshipError> {
        let id = self.resolve(name)?;
        self.facts
            .gender(id)
            .ok_or_else(|| KinshipError::UnknownPerson {
                name: name.to_string(),
            })
    }

    /// The role-checked father, if any.
    pub fn father_of(&self, name: &str) -> Result<Option<String>, KinshipError> {
        self.parent_of(name, ParentRole::Father)
    }

    /// The role-checked mother, if any.
    pub fn mother_of(&self, name: &str) -> Result<Option<String>, KinshipError> {
        self.parent_of(name, ParentRole::Mother)
    }

    fn parent_of(&self, name: &str, role: ParentRole) -> Result<Option<String>, KinshipError> {
        let input = self.single(name)?;
        let parents = derive::parents_in_role(&self.facts, &input, role);
        Ok(parents
            .min()
            .and_then(|raw| self.facts.name_of(PersonId::new(raw))))
    }

    /// First-listed spouse, of either gender.
    pub fn spouse_of(&self, name: &str) -> Result<Option<String>, KinshipError> {
        let id = self.resolve(name)?;
        Ok(self
            .facts
            .spouse(id)
            .and_then(|spouse| self.facts.name_of(spouse)))
    }

    // ========================================================================
    // Leveled lookups
    // ========================================================================

    /// Ancestors `level` generations up ending in `role`; `level <= 0` is empty.
    pub fn ancestors_at_level(
        &self,
        name: &str,
        role: ParentRole,
        level: i64,
    ) -> Result<BTreeSet<String>, KinshipError> {
        let input = self.single(name)?;
        let out = derive::ancestors_at_level(&self.facts, &input, role, level);
        Ok(self.facts.names(&out))
    }

    /// Descendants `level` generations down; `gender` filters the last
    /// generation only.
    pub fn descendants_at_level(
        &self,
        name: &str,
        level: i64,
        gender: Option<Gender>,
    ) -> Result<BTreeSet<String>, KinshipError> {
        let input = self.single(name)?;
        let out = derive::descendants_at_level(&self.facts, &input, level, gender);
        Ok(self.facts.names(&out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_facts::fixtures;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn kinship_is_shareable_across_threads() {
        assert_send_sync::<Kinship>();
    }

    #[test]
    fn unknown_name_fails_every_entry_point() {
        let kin = Kinship::new(fixtures::extended().unwrap());
        let unknown = KinshipError::UnknownPerson {
            name: "Zzz".to_string(),
        };

        for relation in Relation::ALL {
            assert_eq!(kin.relatives(relation, "Zzz"), Err(unknown.clone()));
        }
        assert_eq!(kin.father_of("Zzz"), Err(unknown.clone()));
        assert_eq!(kin.spouse_of("Zzz"), Err(unknown.clone()));
        assert_eq!(kin.gender_of("Zzz"), Err(unknown.clone()));
        assert_eq!(
            kin.ancestors_at_level("Zzz", ParentRole::Mother, 1),
            Err(unknown.clone())
        );
        assert_eq!(kin.descendants_at_level("Zzz", 1, None), Err(unknown));
    }

    #[test]
    fn functional_lookups_return_single_or_none() {
        let kin = Kinship::new(fixtures::extended().unwrap());

        assert_eq!(kin.father_of("Jackie").unwrap().as_deref(), Some("Dave"));
        assert_eq!(kin.mother_of("Eve").unwrap(), None);
        assert_eq!(kin.spouse_of("Alice").unwrap().as_deref(), Some("Dave"));
        assert_eq!(kin.spouse_of("Pete").unwrap(), None);
        assert_eq!(kin.gender_of("Jean").unwrap(), Gender::Male);
    }

    #[test]
    fn explanation_matches_plain_answer() {
        let kin = Kinship::new(fixtures::extended().unwrap());
        let plain = kin.relatives(Relation::StepFather, "Alice").unwrap();
        let explained = kin.explain(Relation::StepFather, "Alice").unwrap();

        assert_eq!(explained.relatives, plain);
        assert!(!explained.trace.is_empty());
        assert_eq!(explained.trace.last().unwrap().people, plain);
    }
}
