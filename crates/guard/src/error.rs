//! Error types for guarded access.

use thiserror::Error;

/// An [`AccessChain`](crate::AccessChain) walk stopped at a link that
/// produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path} is null")]
pub struct NullLink {
	/// Dotted path up to and including the null link, e.g.
	/// `order.customer.address`.
	pub path: String,
}
