//! Expected answers for the built-in fact bases.
//!
//! These tables are the behavioural contract of the engine: every row must
//! reproduce exactly, including the empty answers (`Brother(Dave)` has no
//! members) and the multi-generation descendant answers, which pass each
//! generation forward as one collapsed set.

use kindred_facts::{FactBaseName, Gender, ParentRole};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::query::Kinship;
use crate::relation::Relation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuiteQuery {
    Relation { relation: Relation },
    Ancestors { role: ParentRole, level: i64 },
    Descendants { level: i64, gender: Option<Gender> },
}

impl fmt::Display for SuiteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteQuery::Relation { relation } => write!(f, "{relation}"),
            SuiteQuery::Ancestors { role, level } => write!(f, "{role}@{level}"),
            SuiteQuery::Descendants {
                level,
                gender: None,
            } => write!(f, "descendants@{level}"),
            SuiteQuery::Descendants {
                level,
                gender: Some(gender),
            } => write!(f, "descendants@{level}[{gender}]"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Expectation {
    pub query: SuiteQuery,
    pub person: &'static str,
    pub expected: &'static [&'static str],
}

const fn rel(relation: Relation, person: &'static str, expected: &'static [&'static str]) -> Expectation {
    Expectation {
        query: SuiteQuery::Relation { relation },
        person,
        expected,
    }
}

/// Answers for the first fact base (no marriages).
pub const CLASSIC: &[Expectation] = &[
    rel(Relation::Parent, "Alice", &["George", "Jane"]),
    rel(Relation::GrandFather, "Cindy", &["George"]),
    rel(Relation::GrandMother, "Cindy", &["Mary"]),
    rel(Relation::Children, "Bob", &["Cindy", "Dave"]),
    rel(Relation::Children, "George", &["Alice", "Bob", "Eve"]),
    rel(Relation::Siblings, "Bob", &["Alice", "Eve"]),
    rel(Relation::Siblings, "Alice", &["Bob", "Eve"]),
    rel(Relation::GrandChild, "George", &["Cindy", "Dave", "Jean"]),
    rel(Relation::GrandChild, "Mary", &["Cindy", "Dave"]),
    rel(Relation::GrandGrandChild, "George", &["Pete", "Jackie"]),
    rel(Relation::GrandParent, "Cindy", &["George", "Mary"]),
    rel(Relation::UncleOrAunt, "Dave", &["Alice", "Eve"]),
    rel(Relation::UncleOrAunt, "Cindy", &["Alice", "Eve"]),
    rel(Relation::Brother, "Cindy", &["Dave"]),
    rel(Relation::Brother, "Dave", &[]),
    rel(Relation::Sister, "Cindy", &[]),
    rel(Relation::Sister, "Dave", &["Cindy"]),
    rel(Relation::Aunt, "Dave", &["Alice", "Eve"]),
    rel(Relation::Uncle, "Dave", &[]),
    rel(Relation::Son, "George", &["Bob"]),
    rel(Relation::Daughter, "George", &["Alice", "Eve"]),
    Expectation {
        query: SuiteQuery::Ancestors {
            role: ParentRole::Father,
            level: 3,
        },
        person: "Pete",
        expected: &["George"],
    },
    rel(Relation::GrandGrandSon, "George", &["Pete"]),
    rel(Relation::GrandGrandSon, "Mary", &["Pete"]),
    rel(Relation::GrandGrandDaughter, "Mary", &["Jackie"]),
    rel(Relation::GrandSon, "George", &["Dave", "Jean"]),
    rel(Relation::GrandDaughter, "Mary", &["Cindy"]),
    rel(Relation::GrandDaughter, "George", &["Cindy"]),
    rel(Relation::Niece, "Alice", &["Cindy"]),
    rel(Relation::Nephew, "Alice", &["Dave"]),
    rel(Relation::Cousin, "Jean", &["Dave", "Cindy"]),
];

/// Answers for the second fact base (Jackie's mother, marriages).
pub const EXTENDED: &[Expectation] = &[
    rel(Relation::Parent, "Alice", &["George", "Jane"]),
    rel(Relation::GrandFather, "Cindy", &["George"]),
    rel(Relation::GrandMother, "Cindy", &["Mary"]),
    rel(Relation::Children, "Bob", &["Cindy", "Dave"]),
    rel(Relation::Children, "Jane", &["Alice", "Jackie"]),
    rel(Relation::Siblings, "Alice", &["Bob", "Eve", "Jackie"]),
    rel(Relation::Siblings, "Jackie", &["Alice"]),
    rel(Relation::GrandChild, "Jane", &["Jean"]),
    rel(Relation::Cousin, "Jean", &["Cindy", "Dave"]),
    rel(Relation::Niece, "Alice", &["Cindy"]),
    rel(Relation::Wife, "George", &["Mary"]),
    rel(Relation::Wife, "Dave", &["Alice"]),
    rel(Relation::Wife, "Eve", &[]),
    rel(Relation::Husband, "Mary", &["George"]),
    rel(Relation::Husband, "Alice", &["Dave"]),
    rel(Relation::Husband, "George", &[]),
    rel(Relation::SisterInLaw, "Alice", &["Cindy"]),
    rel(Relation::SisterInLaw, "Sue", &["Alice", "Eve"]),
    rel(Relation::SisterInLaw, "Mary", &[]),
    rel(Relation::BrotherInLaw, "Dave", &["Bob"]),
    rel(Relation::BrotherInLaw, "Sue", &[]),
    rel(Relation::MotherInLaw, "Sue", &["Mary"]),
    rel(Relation::MotherInLaw, "Dave", &["Jane"]),
    rel(Relation::MotherInLaw, "Alice", &[]),
    rel(Relation::FatherInLaw, "Alice", &["Bob"]),
    rel(Relation::FatherInLaw, "Sue", &["George"]),
    rel(Relation::StepMother, "Alice", &["Mary"]),
    rel(Relation::StepMother, "Bob", &["Jane"]),
    rel(Relation::StepMother, "Jackie", &[]),
    rel(Relation::StepFather, "Alice", &["Dave"]),
    rel(Relation::StepFather, "Jackie", &["George"]),
    rel(Relation::StepFather, "Bob", &[]),
    Expectation {
        query: SuiteQuery::Descendants {
            level: 3,
            gender: Some(Gender::Female),
        },
        person: "Mary",
        expected: &["Jackie"],
    },
];

pub fn expectations_for(name: FactBaseName) -> &'static [Expectation] {
    match name {
        FactBaseName::Classic => CLASSIC,
        FactBaseName::Extended => EXTENDED,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub query: SuiteQuery,
    pub person: String,
    pub expected: BTreeSet<String>,
    /// The engine's answer, or the error it raised.
    pub actual: Result<BTreeSet<String>, String>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.actual.as_ref() == Ok(&self.expected)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub cases: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|c| !c.passed())
    }
}

/// Run every expectation against `kinship`.
pub fn run(kinship: &Kinship, expectations: &[Expectation]) -> SuiteReport {
    let cases = expectations
        .iter()
        .map(|e| {
            let actual = match e.query {
                SuiteQuery::Relation { relation } => kinship.relatives(relation, e.person),
                SuiteQuery::Ancestors { role, level } => {
                    kinship.ancestors_at_level(e.person, role, level)
                }
                SuiteQuery::Descendants { level, gender } => {
                    kinship.descendants_at_level(e.person, level, gender)
                }
            };
            CaseOutcome {
                query: e.query,
                person: e.person.to_string(),
                expected: e.expected.iter().map(|s| s.to_string()).collect(),
                actual: actual.map_err(|err| err.to_string()),
            }
        })
        .collect();

    let report = SuiteReport { cases };
    tracing::debug!(
        passed = report.passed(),
        failed = report.failed(),
        "ran kinship expectations"
    );
    report
}
