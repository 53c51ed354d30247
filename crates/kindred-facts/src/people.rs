//! Columnar person storage: a gender column plus a gender index.

use ahash::AHashMap;
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FactError;
use crate::PersonId;

/// Closed gender enum of the fact base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(FactError::UnknownGender {
                value: s.to_string(),
            }),
        }
    }
}

/// Which parent edge is being traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentRole {
    Father,
    Mother,
}

impl ParentRole {
    pub const ALL: [ParentRole; 2] = [ParentRole::Father, ParentRole::Mother];

    /// Gender a parent in this role is recorded with in well-formed data.
    pub fn expected_gender(self) -> Gender {
        match self {
            ParentRole::Father => Gender::Male,
            ParentRole::Mother => Gender::Female,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParentRole::Father => "father",
            ParentRole::Mother => "mother",
        }
    }
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParentRole {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "father" => Ok(ParentRole::Father),
            "mother" => Ok(ParentRole::Mother),
            _ => Err(FactError::UnknownRole {
                value: s.to_string(),
            }),
        }
    }
}

/// Person view with the name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonView {
    pub id: PersonId,
    pub name: String,
    pub gender: Option<Gender>,
}

/// Columnar person storage
#[derive(Debug, Default)]
pub(crate) struct PersonStore {
    /// Gender column: person_id -> gender (None until declared)
    genders: Vec<Option<Gender>>,
    /// Gender index: gender -> bitmap of person ids
    gender_index: AHashMap<Gender, RoaringBitmap>,
}

impl PersonStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make sure the column covers `id`.
    pub(crate) fn ensure(&mut self, id: PersonId) {
        if id.index() >= self.genders.len() {
            self.genders.resize(id.index() + 1, None);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.genders.len()
    }

    /// Record a gender. Returns the previously recorded gender if it differs.
    pub(crate) fn set_gender(&mut self, id: PersonId, gender: Gender) -> Result<(), Gender> {
        self.ensure(id);
        match self.genders[id.index()] {
            Some(existing) if existing != gender => Err(existing),
            Some(_) => Ok(()),
            None => {
                self.genders[id.index()] = Some(gender);
                self.gender_index
                    .entry(gender)
                    .or_insert_with(RoaringBitmap::new)
                    .insert(id.raw());
                Ok(())
            }
        }
    }

    pub(crate) fn gender(&self, id: PersonId) -> Option<Gender> {
        self.genders.get(id.index()).copied().flatten()
    }

    /// All people recorded with `gender`.
    pub(crate) fn by_gender(&self, gender: Gender) -> Option<&RoaringBitmap> {
        self.gender_index.get(&gender)
    }

    /// Everyone with a gender entry, i.e. every person a query may name.
    pub(crate) fn known(&self) -> RoaringBitmap {
        let mut out = RoaringBitmap::new();
        for bitmap in self.gender_index.values() {
            out |= bitmap;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_index_partitions_people() {
        let mut store = PersonStore::new();
        store.set_gender(PersonId::new(0), Gender::Male).unwrap();
        store.set_gender(PersonId::new(1), Gender::Female).unwrap();
        store.ensure(PersonId::new(2));

        assert_eq!(store.len(), 3);
        assert!(store.by_gender(Gender::Male).unwrap().contains(0));
        assert!(store.by_gender(Gender::Female).unwrap().contains(1));
        assert_eq!(store.gender(PersonId::new(2)), None);
        assert_eq!(store.known().len(), 2);
    }

    #[test]
    fn conflicting_gender_reports_existing_value() {
        let mut store = PersonStore::new();
        store.set_gender(PersonId::new(0), Gender::Male).unwrap();
        assert!(store.set_gender(PersonId::new(0), Gender::Male).is_ok());
        assert_eq!(
            store.set_gender(PersonId::new(0), Gender::Female),
            Err(Gender::Male)
        );
    }

    #[test]
    fn gender_and_role_parse_case_insensitively() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
        assert_eq!("Mother".parse::<ParentRole>().unwrap(), ParentRole::Mother);
        assert_eq!(ParentRole::Father.expected_gender(), Gender::Male);
    }
}
