//! Soft diagnostics over a built fact base.
//!
//! These describe preconditions the derivation engine assumes but never
//! enforces. A fact base with issues still answers queries; the affected
//! relations just come back smaller (for example a father edge that points at
//! a FEMALE person is silently skipped by father lookups).

use serde::Serialize;
use std::fmt;

use crate::people::{Gender, ParentRole};
use crate::{FactBase, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Good to know; queries are unaffected unless they name this person
    Info,
    /// Some derived relations will silently drop people
    Warning,
}

/// How an ungendered person is referenced in the fact base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference {
    Parent,
    Spouse,
    Child,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reference::Parent => "parent",
            Reference::Spouse => "spouse",
            Reference::Child => "child",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactIssue {
    /// Referenced in a relation but has no gender entry.
    MissingGender {
        person: String,
        referenced_as: Reference,
    },
    /// A father edge to a FEMALE person or a mother edge to a MALE one.
    RoleGenderMismatch {
        child: String,
        role: ParentRole,
        parent: String,
        gender: Gender,
    },
    /// Appears in more than one marriage.
    MultipleMarriages {
        person: String,
        spouses: Vec<String>,
    },
}

impl FactIssue {
    pub fn severity(&self) -> Severity {
        match self {
            FactIssue::MissingGender {
                referenced_as: Reference::Child,
                ..
            } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for FactIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactIssue::MissingGender {
                person,
                referenced_as,
            } => write!(f, "`{person}` is referenced as a {referenced_as} but has no gender"),
            FactIssue::RoleGenderMismatch {
                child,
                role,
                parent,
                gender,
            } => write!(
                f,
                "`{parent}` is recorded as {role} of `{child}` but is {gender}"
            ),
            FactIssue::MultipleMarriages { person, spouses } => write!(
                f,
                "`{person}` appears in {} marriages ({}); only the first is used",
                spouses.len(),
                spouses.join(", ")
            ),
        }
    }
}

/// Collect every soft issue, ordered by person id.
pub fn validate(facts: &FactBase) -> Vec<FactIssue> {
    let mut issues = Vec::new();
    let name = |id: PersonId| facts.name_of(id).unwrap_or_else(|| id.to_string());

    for person in facts.people() {
        let id = person.id;
        let is_parent = ParentRole::ALL
            .iter()
            .any(|&role| !facts.children(id, role).is_empty());
        let spouses = facts.spouses(id);

        if person.gender.is_none() {
            let referenced_as = if is_parent {
                Reference::Parent
            } else if !spouses.is_empty() {
                Reference::Spouse
            } else {
                Reference::Child
            };
            issues.push(FactIssue::MissingGender {
                person: person.name.clone(),
                referenced_as,
            });
        }

        for role in ParentRole::ALL {
            let Some(parent) = facts.parent(id, role) else {
                continue;
            };
            let Some(gender) = facts.gender(parent) else {
                continue;
            };
            if gender != role.expected_gender() {
                issues.push(FactIssue::RoleGenderMismatch {
                    child: person.name.clone(),
                    role,
                    parent: name(parent),
                    gender,
                });
            }
        }

        if spouses.len() > 1 {
            issues.push(FactIssue::MultipleMarriages {
                person: person.name.clone(),
                spouses: spouses.into_iter().map(name).collect(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FactBaseBuilder;

    #[test]
    fn well_formed_base_has_no_issues() {
        let mut b = FactBaseBuilder::new();
        b.person("George", Gender::Male)
            .unwrap()
            .person("Mary", Gender::Female)
            .unwrap()
            .person("Bob", Gender::Male)
            .unwrap();
        b.father("Bob", "George").unwrap().mother("Bob", "Mary").unwrap();
        b.marry("George", "Mary").unwrap();
        let base = b.build().unwrap();
        assert!(base.issues().is_empty());
    }

    #[test]
    fn mismatched_role_and_missing_gender_are_reported() {
        let mut b = FactBaseBuilder::new();
        b.person("Kim", Gender::Female).unwrap();
        b.father("Lee", "Kim").unwrap();
        let base = b.build().unwrap();

        assert_eq!(
            base.issues(),
            &[
                FactIssue::MissingGender {
                    person: "Lee".to_string(),
                    referenced_as: Reference::Child,
                },
                FactIssue::RoleGenderMismatch {
                    child: "Lee".to_string(),
                    role: ParentRole::Father,
                    parent: "Kim".to_string(),
                    gender: Gender::Female,
                },
            ]
        );
        assert_eq!(base.issues()[0].severity(), Severity::Info);
        assert_eq!(base.issues()[1].severity(), Severity::Warning);
    }

    #[test]
    fn polygamy_is_reported_not_rejected() {
        let mut b = FactBaseBuilder::new();
        for (name, gender) in [("A", Gender::Male), ("B", Gender::Female), ("C", Gender::Female)] {
            b.person(name, gender).unwrap();
        }
        b.marry("A", "B").unwrap().marry("C", "A").unwrap();
        let base = b.build().unwrap();

        let issue = base
            .issues()
            .iter()
            .find(|i| matches!(i, FactIssue::MultipleMarriages { .. }))
            .expect("monogamy violation reported");
        assert_eq!(
            issue,
            &FactIssue::MultipleMarriages {
                person: "A".to_string(),
                spouses: vec!["B".to_string(), "C".to_string()],
            }
        );
        assert_eq!(base.spouse_of("A").as_deref(), Some("B"));
    }
}
