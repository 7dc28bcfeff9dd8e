//! Guards that run ahead of lookups: error-tolerant iteration and
//! null-safe accessor chains.

/// Named accessor chains that report where they hit a null link.
pub mod access;
/// Iteration that keeps going past failed elements.
pub mod attempt;
/// Error types for guarded access.
pub mod error;

pub use access::AccessChain;
pub use attempt::{AttemptCatch, AttemptCatchExt, AttemptCatchWhere};
pub use error::NullLink;
