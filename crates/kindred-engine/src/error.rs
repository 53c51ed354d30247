use thiserror::Error;

/// Query failures.
///
/// A relation with no matching relatives is *not* an error; it is an empty
/// set. Only a name the fact base does not know fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KinshipError {
    #[error("unknown person `{name}`")]
    UnknownPerson { name: String },

    #[error("unknown relation `{name}`")]
    UnknownRelation { name: String },
}
