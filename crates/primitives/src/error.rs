//! Error types for element resolution.

use thiserror::Error;

/// Errors raised while resolving an [`Element`](crate::Element) or a
/// [`SingleElementResult`](crate::SingleElementResult) into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
	/// A supplier was needed to produce a default but none was given.
	#[error("missing required argument `{0}`")]
	MissingArgument(&'static str),

	/// The element was unwrapped while not holding exactly one value.
	#[error("cannot convert element in state '{state}' to type '{target}'")]
	InvalidCast {
		/// Display name of the state the element was in.
		state: &'static str,
		/// Fully qualified name of the requested payload type.
		target: &'static str,
	},
}

/// Result type for element resolution.
pub type Result<T> = std::result::Result<T, ElementError>;
