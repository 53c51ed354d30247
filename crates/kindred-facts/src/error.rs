use thiserror::Error;

use crate::people::{Gender, ParentRole};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactError {
    /// The name has no gender entry, so the fact base does not know it.
    #[error("unknown person `{name}`")]
    UnknownPerson { name: String },

    #[error("`{child}` already has {role} `{existing}`, cannot also link `{parent}`")]
    ConflictingParent {
        child: String,
        role: ParentRole,
        existing: String,
        parent: String,
    },

    #[error("`{name}` is already recorded as {existing}, cannot redeclare as {gender}")]
    ConflictingGender {
        name: String,
        existing: Gender,
        gender: Gender,
    },

    #[error("`{name}` cannot be their own {role}")]
    SelfParent { name: String, role: ParentRole },

    #[error("`{name}` cannot marry themself")]
    SelfMarriage { name: String },

    #[error("parent edges form a cycle through `{name}`")]
    AncestryCycle { name: String },

    #[error("unknown gender `{value}` (expected male or female)")]
    UnknownGender { value: String },

    #[error("unknown parent role `{value}` (expected father or mother)")]
    UnknownRole { value: String },

    #[error("unknown fact base `{value}` (expected classic or extended)")]
    UnknownFactBase { value: String },
}
