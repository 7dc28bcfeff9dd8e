//! Error types for lookup resolution.

use std::convert::Infallible;

use pluck_primitives::ElementError;
use thiserror::Error;

/// Errors raised when a lookup cannot be resolved into a value.
///
/// `E` is the error type of a deferred query source. In-memory sequence
/// lookups use the default, [`Infallible`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError<E = Infallible> {
	/// Nothing matched the predicate.
	#[error("No match found for {predicate}.")]
	NoMatch {
		/// Textual form of the predicate.
		predicate: String,
	},

	/// More than one element matched a predicate expected to match once.
	#[error("More than one match found for {predicate}.")]
	MultipleMatches {
		/// Textual form of the predicate.
		predicate: String,
	},

	/// A default was needed and could not be produced.
	#[error(transparent)]
	Element(#[from] ElementError),

	/// The query source failed to evaluate the query.
	#[error(transparent)]
	Source(E),
}

impl<E> LookupError<E> {
	pub(crate) fn no_match(predicate: &str) -> Self {
		Self::NoMatch {
			predicate: predicate.to_owned(),
		}
	}

	pub(crate) fn multiple_matches(predicate: &str) -> Self {
		Self::MultipleMatches {
			predicate: predicate.to_owned(),
		}
	}
}

/// Calls an optional ambiguity error factory, reporting it missing when
/// absent.
pub(crate) fn raise_on_multiple<F, E>(factory: Option<F>) -> E
where
	F: FnOnce() -> E,
	E: From<ElementError>,
{
	match factory {
		Some(raise) => raise(),
		None => ElementError::MissingArgument("multiple_match_error").into(),
	}
}
