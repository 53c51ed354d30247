//! The two hand-authored fact bases.
//!
//! `classic` is the first version: parent edges and genders only.
//! `extended` adds Jackie's mother edge and three marriages, which is what
//! the in-law and step-parent relations are exercised against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FactError;
use crate::people::Gender;
use crate::{FactBase, FactBaseBuilder};

const FATHERS: &[(&str, &str)] = &[
    ("Bob", "George"),
    ("Alice", "George"),
    ("Cindy", "Bob"),
    ("Dave", "Bob"),
    ("Jackie", "Dave"),
    ("Eve", "George"),
];

const MOTHERS: &[(&str, &str)] = &[
    ("Bob", "Mary"),
    ("Cindy", "Sue"),
    ("Alice", "Jane"),
    ("Pete", "Cindy"),
    ("Jean", "Alice"),
];

const GENDERS: &[(&str, Gender)] = &[
    ("Bob", Gender::Male),
    ("George", Gender::Male),
    ("Dave", Gender::Male),
    ("Mary", Gender::Female),
    ("Sue", Gender::Female),
    ("Jane", Gender::Female),
    ("Alice", Gender::Female),
    ("Cindy", Gender::Female),
    ("Eve", Gender::Female),
    ("Pete", Gender::Male),
    ("Jean", Gender::Male),
    ("Jackie", Gender::Female),
];

const EXTENDED_MOTHERS: &[(&str, &str)] = &[("Jackie", "Jane")];

const MARRIAGES: &[(&str, &str)] = &[("George", "Mary"), ("Alice", "Dave"), ("Bob", "Sue")];

fn classic_builder() -> Result<FactBaseBuilder, FactError> {
    let mut b = FactBaseBuilder::new();
    for &(name, gender) in GENDERS {
        b.person(name, gender)?;
    }
    for &(child, father) in FATHERS {
        b.father(child, father)?;
    }
    for &(child, mother) in MOTHERS {
        b.mother(child, mother)?;
    }
    Ok(b)
}

/// First version: parents and genders.
pub fn classic() -> Result<FactBase, FactError> {
    classic_builder()?.build()
}

/// Second version: `classic` plus Jackie's mother and the marriages.
pub fn extended() -> Result<FactBase, FactError> {
    let mut b = classic_builder()?;
    for &(child, mother) in EXTENDED_MOTHERS {
        b.mother(child, mother)?;
    }
    for &(a, c) in MARRIAGES {
        b.marry(a, c)?;
    }
    b.build()
}

/// Selector for the built-in fact bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactBaseName {
    Classic,
    #[default]
    Extended,
}

impl FactBaseName {
    pub const ALL: [FactBaseName; 2] = [FactBaseName::Classic, FactBaseName::Extended];

    pub fn load(self) -> Result<FactBase, FactError> {
        match self {
            FactBaseName::Classic => classic(),
            FactBaseName::Extended => extended(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FactBaseName::Classic => "classic",
            FactBaseName::Extended => "extended",
        }
    }
}

impl fmt::Display for FactBaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactBaseName {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(FactBaseName::Classic),
            "extended" => Ok(FactBaseName::Extended),
            _ => Err(FactError::UnknownFactBase {
                value: s.to_string(),
            }),
        }
    }
}
