//! Value types for optional and single-match lookups.

/// Optional values that keep "absent" apart from "present null".
pub mod element;
/// Error types for element resolution.
pub mod error;
/// Null-equivalence for element payloads.
pub mod nullable;
/// Three-way outcome of single-match lookups.
pub mod single;

pub use element::{ABSENT_HASH, Element, NULL_HASH};
pub use error::{ElementError, Result};
pub use nullable::Nullable;
pub use single::{Cardinality, SingleElementResult};
