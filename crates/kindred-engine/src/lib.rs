//! Kindred derivation engine.
//!
//! Answers "who stands in relation R to person P" over a [`FactBase`]:
//!
//! 1. **Primitives** ([`derive`]): parents, children, siblings, spouses and
//!    gender filters, each a function from a set of people to a set of people
//! 2. **Expressions** ([`KinExpr`]): every named relation is a tree of those
//!    primitives joined by union and difference
//! 3. **Queries** ([`Kinship`]): name in, sorted names out, optionally with a
//!    per-step [`TraceEvent`] account of the evaluation
//!
//! Answers are sets. An empty set means "nobody"; only an unknown person name
//! is an error.

pub mod derive;
pub mod error;
pub mod expr;
pub mod query;
pub mod relation;
pub mod suite;
pub mod trace;

pub use error::KinshipError;
pub use expr::KinExpr;
pub use query::{Explanation, Kinship};
pub use relation::Relation;
pub use suite::{CaseOutcome, Expectation, SuiteQuery, SuiteReport};
pub use trace::TraceEvent;

pub use kindred_facts::{FactBase, FactBaseName, Gender, ParentRole, PersonId};
