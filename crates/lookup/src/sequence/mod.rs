//! Lookups over pull-based sequences.
//!
//! Every lookup drives the iterator once, in source order, and stops as soon
//! as the outcome is decided: first-match lookups stop at the first match,
//! single-match lookups stop at the second. The predicate runs exactly once
//! per element pulled. Nothing here catches panics from the predicate or the
//! iterator.

use pluck_primitives::{Element, ElementError, SingleElementResult};

use crate::error::{LookupError, raise_on_multiple};
use crate::predicate::Predicate;


/// First and single-match lookups for anything iterable.
///
/// Implemented for every [`IntoIterator`], including infinite iterators and
/// borrowed collections.
///
/// ```
/// use pluck_lookup::SequenceExt;
/// use pluck_primitives::{Element, SingleElementResult};
///
/// assert_eq!(vec![1, 2, 3].first_element(|x| *x > 1), Element::present(2));
/// assert_eq!((1..).single_element(|x| *x > 1), SingleElementResult::multiple());
/// ```
pub trait SequenceExt: IntoIterator + Sized {
	/// Returns the first element matching `predicate`.
	fn first_element<P>(self, predicate: P) -> Element<Self::Item>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		self.into_iter().find(predicate).into()
	}

	/// Classifies how many elements match `predicate`.
	///
	/// Scanning stops at the second match; that match is dropped.
	fn single_element<P>(self, mut predicate: P) -> SingleElementResult<Self::Item>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		let mut iter = self.into_iter();
		let Some(first) = iter.find(&mut predicate) else {
			return SingleElementResult::none();
		};
		if iter.find(&mut predicate).is_some() {
			tracing::trace!("second match found, stopping scan");
			return SingleElementResult::multiple();
		}
		SingleElementResult::one(first)
	}

	/// Like [`single_element`](Self::single_element), but fails with
	/// `on_multiple()` the moment a second match is found.
	///
	/// The returned result is never [`Cardinality::Multiple`]. `on_multiple`
	/// is called at most once, and only on ambiguity.
	///
	/// [`Cardinality::Multiple`]: pluck_primitives::Cardinality::Multiple
	fn single_element_or_throw_on_multiple<P, E>(
		self,
		mut predicate: P,
		on_multiple: impl FnOnce() -> E,
	) -> Result<SingleElementResult<Self::Item>, E>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		let mut iter = self.into_iter();
		let Some(first) = iter.find(&mut predicate) else {
			return Ok(SingleElementResult::none());
		};
		if iter.find(&mut predicate).is_some() {
			tracing::trace!("second match found, raising caller error");
			return Err(on_multiple());
		}
		Ok(SingleElementResult::one(first))
	}

	/// Like [`single_element_or_throw_on_multiple`], with an optional error
	/// factory.
	///
	/// The factory is only inspected once a second match is found; a missing
	/// factory then fails with [`ElementError::MissingArgument`].
	///
	/// [`single_element_or_throw_on_multiple`]: Self::single_element_or_throw_on_multiple
	/// [`ElementError::MissingArgument`]: pluck_primitives::ElementError::MissingArgument
	fn single_element_or_supplied_error<P, F, E>(
		self,
		predicate: P,
		on_multiple: Option<F>,
	) -> Result<SingleElementResult<Self::Item>, E>
	where
		P: FnMut(&Self::Item) -> bool,
		F: FnOnce() -> E,
		E: From<ElementError>,
	{
		self.single_element_or_throw_on_multiple(predicate, || raise_on_multiple(on_multiple))
	}

	/// Returns the first match or `default`.
	fn first_or<P>(self, predicate: P, default: Self::Item) -> Self::Item
	where
		P: FnMut(&Self::Item) -> bool,
	{
		self.first_element(predicate).value_or(default)
	}

	/// Returns the first match, or calls `default` when nothing matches.
	fn first_or_else<P>(self, predicate: P, default: impl FnOnce() -> Self::Item) -> Self::Item
	where
		P: FnMut(&Self::Item) -> bool,
	{
		self.first_element(predicate).value_or_else(default)
	}

	/// Returns the first match.
	///
	/// # Errors
	///
	/// Returns [`LookupError::NoMatch`] naming the predicate when nothing
	/// matches.
	fn first_or_throw<P>(self, predicate: Predicate<P>) -> Result<Self::Item, LookupError>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		let (text, test) = predicate.into_parts();
		self.first_element(test)
			.into_option()
			.ok_or_else(|| LookupError::no_match(&text))
	}

	/// Returns the first match, or fails with exactly `on_none()`.
	fn first_or_throw_with<P, E>(
		self,
		predicate: P,
		on_none: impl FnOnce() -> E,
	) -> Result<Self::Item, E>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		self.first_element(predicate).into_option().ok_or_else(on_none)
	}

	/// Returns the single match or `default` when nothing matches.
	///
	/// # Errors
	///
	/// Returns [`LookupError::MultipleMatches`] naming the predicate when more
	/// than one element matches.
	fn single_or<P>(self, predicate: Predicate<P>, default: Self::Item) -> Result<Self::Item, LookupError>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		self.single_or_else(predicate, || default)
	}

	/// Returns the single match, or calls `default` when nothing matches.
	///
	/// # Errors
	///
	/// Returns [`LookupError::MultipleMatches`] naming the predicate when more
	/// than one element matches. `default` is not called in that case.
	fn single_or_else<P>(
		self,
		predicate: Predicate<P>,
		default: impl FnOnce() -> Self::Item,
	) -> Result<Self::Item, LookupError>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		let (text, test) = predicate.into_parts();
		let result = self.single_element(test);
		if result.is_multiple() {
			return Err(LookupError::multiple_matches(&text));
		}
		Ok(result.value_or_else(default))
	}

	/// Returns the single match, or the result of an optional supplier when
	/// nothing matches.
	///
	/// # Errors
	///
	/// Returns [`LookupError::MultipleMatches`] on ambiguity, and
	/// [`LookupError::Element`] when the supplier is needed but missing.
	fn single_or_supplier<P, F>(
		self,
		predicate: Predicate<P>,
		supplier: Option<F>,
	) -> Result<Self::Item, LookupError>
	where
		P: FnMut(&Self::Item) -> bool,
		F: FnOnce() -> Self::Item,
	{
		let (text, test) = predicate.into_parts();
		let result = self.single_element(test);
		if result.is_multiple() {
			return Err(LookupError::multiple_matches(&text));
		}
		Ok(result.value_or_supplier(supplier)?)
	}

	/// Returns the single match.
	///
	/// Pass [`Predicate::always`] to require that the whole sequence holds
	/// exactly one element.
	///
	/// # Errors
	///
	/// Returns [`LookupError::NoMatch`] or [`LookupError::MultipleMatches`],
	/// each naming the predicate.
	fn single_or_throw<P>(self, predicate: Predicate<P>) -> Result<Self::Item, LookupError>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		let (text, test) = predicate.into_parts();
		self.single_element_or_throw_on_multiple(test, || LookupError::multiple_matches(&text))?
			.into_element()
			.into_option()
			.ok_or_else(|| LookupError::no_match(&text))
	}

	/// Returns the single match, failing with exactly `on_none()` or
	/// `on_multiple()`.
	fn single_or_throw_with<P, E>(
		self,
		predicate: P,
		on_none: impl FnOnce() -> E,
		on_multiple: impl FnOnce() -> E,
	) -> Result<Self::Item, E>
	where
		P: FnMut(&Self::Item) -> bool,
	{
		self.single_element_or_throw_on_multiple(predicate, on_multiple)?
			.into_element()
			.into_option()
			.ok_or_else(on_none)
	}
}

impl<I: IntoIterator> SequenceExt for I {}
