//! First-match and single-match lookups.
//!
//! [`SequenceExt`] works over anything iterable and stops pulling as soon as
//! the answer is known. [`Query`] does the same over a [`QuerySource`] that
//! evaluates filters and limits itself.

/// Error types for lookup resolution.
pub mod error;
/// Predicates that carry their own textual form.
pub mod predicate;
/// Lookups over deferred query sources.
pub mod query;
/// Lookups over pull-based sequences.
pub mod sequence;

pub use error::LookupError;
pub use predicate::Predicate;
pub use query::{Query, QueryPlan, QuerySource, VecSource};
pub use sequence::SequenceExt;
