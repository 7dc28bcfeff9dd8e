//! Lookups over deferred query sources.
//!
//! A [`Query`] records filters and a result cap without touching the data.
//! Lookups push their predicate into the plan, cap it at the number of
//! results needed to decide the outcome (one for first-match, two for
//! single-match), and let the [`QuerySource`] do the filtering. Provider
//! errors are returned unchanged.

mod source;


use std::fmt;

use pluck_primitives::{Cardinality, Element, ElementError, SingleElementResult};

pub use self::source::{QueryPlan, QuerySource, VecSource};
use crate::error::{LookupError, raise_on_multiple};
use crate::predicate::Predicate;

/// A query under construction over a borrowed [`QuerySource`].
pub struct Query<'q, S: QuerySource> {
	source: &'q S,
	plan: QueryPlan<'q, S::Item>,
}

impl<'q, S: QuerySource> Query<'q, S> {
	/// Starts an unfiltered query over `source`.
	pub fn new(source: &'q S) -> Self {
		Self {
			source,
			plan: QueryPlan::new(),
		}
	}

	/// Adds a filter to the plan.
	pub fn filter<P>(mut self, predicate: Predicate<P>) -> Self
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		self.plan.push_filter(predicate);
		self
	}

	/// Caps the number of results.
	pub fn take(mut self, limit: usize) -> Self {
		self.plan.limit_to(limit);
		self
	}

	/// Returns the recorded plan.
	pub fn plan(&self) -> &QueryPlan<'q, S::Item> {
		&self.plan
	}

	/// Hands the plan to the source and collects its results.
	pub fn realize(self) -> Result<Vec<S::Item>, S::Error> {
		tracing::trace!(plan = %self.plan, "executing query");
		self.source.execute(&self.plan)
	}

	/// Returns the first element matching `predicate`.
	///
	/// The source is asked for at most one result.
	pub fn first_element<P>(self, predicate: Predicate<P>) -> Result<Element<S::Item>, S::Error>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		let found = self.filter(predicate).take(1).realize()?;
		Ok(found.into_iter().next().into())
	}

	/// Classifies how many elements match `predicate`.
	///
	/// The source is asked for at most two results.
	pub fn single_element<P>(
		self,
		predicate: Predicate<P>,
	) -> Result<SingleElementResult<S::Item>, S::Error>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		let found = self.filter(predicate).take(2).realize()?;
		Ok(classify(found))
	}

	/// Like [`single_element`](Self::single_element), but fails with
	/// `on_multiple()` when more than one element matches.
	///
	/// Source errors are converted into `E` unchanged.
	pub fn single_element_or_throw_on_multiple<P, E>(
		self,
		predicate: Predicate<P>,
		on_multiple: impl FnOnce() -> E,
	) -> Result<SingleElementResult<S::Item>, E>
	where
		P: Fn(&S::Item) -> bool + 'q,
		E: From<S::Error>,
	{
		let result = self.single_element(predicate)?;
		if result.is_multiple() {
			return Err(on_multiple());
		}
		Ok(result)
	}

	/// Like [`single_element_or_throw_on_multiple`], with an optional error
	/// factory.
	///
	/// The factory is only inspected once ambiguity is confirmed; a missing
	/// factory then fails with [`ElementError::MissingArgument`].
	///
	/// [`single_element_or_throw_on_multiple`]: Self::single_element_or_throw_on_multiple
	pub fn single_element_or_supplied_error<P, F, E>(
		self,
		predicate: Predicate<P>,
		on_multiple: Option<F>,
	) -> Result<SingleElementResult<S::Item>, E>
	where
		P: Fn(&S::Item) -> bool + 'q,
		F: FnOnce() -> E,
		E: From<S::Error> + From<ElementError>,
	{
		let result = self.single_element(predicate)?;
		if result.is_multiple() {
			return Err(raise_on_multiple(on_multiple));
		}
		Ok(result)
	}

	/// Returns the first match or `default`.
	pub fn first_or<P>(self, predicate: Predicate<P>, default: S::Item) -> Result<S::Item, S::Error>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		Ok(self.first_element(predicate)?.value_or(default))
	}

	/// Returns the first match, or calls `default` when nothing matches.
	pub fn first_or_else<P>(
		self,
		predicate: Predicate<P>,
		default: impl FnOnce() -> S::Item,
	) -> Result<S::Item, S::Error>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		Ok(self.first_element(predicate)?.value_or_else(default))
	}

	/// Returns the first match.
	///
	/// # Errors
	///
	/// [`LookupError::NoMatch`] when nothing matches, [`LookupError::Source`]
	/// when the source fails.
	pub fn first_or_throw<P>(self, predicate: Predicate<P>) -> Result<S::Item, LookupError<S::Error>>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		let text = predicate.text().to_owned();
		self.first_element(predicate)
			.map_err(LookupError::Source)?
			.into_option()
			.ok_or_else(|| LookupError::no_match(&text))
	}

	/// Returns the first match, or fails with exactly `on_none()`.
	pub fn first_or_throw_with<P, E>(
		self,
		predicate: Predicate<P>,
		on_none: impl FnOnce() -> E,
	) -> Result<S::Item, E>
	where
		P: Fn(&S::Item) -> bool + 'q,
		E: From<S::Error>,
	{
		self.first_element(predicate)?.into_option().ok_or_else(on_none)
	}

	/// Returns the single match or `default` when nothing matches.
	///
	/// # Errors
	///
	/// [`LookupError::MultipleMatches`] on ambiguity, [`LookupError::Source`]
	/// when the source fails.
	pub fn single_or<P>(
		self,
		predicate: Predicate<P>,
		default: S::Item,
	) -> Result<S::Item, LookupError<S::Error>>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		self.single_or_else(predicate, || default)
	}

	/// Returns the single match, or calls `default` when nothing matches.
	///
	/// # Errors
	///
	/// Same as [`single_or`](Self::single_or).
	pub fn single_or_else<P>(
		self,
		predicate: Predicate<P>,
		default: impl FnOnce() -> S::Item,
	) -> Result<S::Item, LookupError<S::Error>>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		let text = predicate.text().to_owned();
		let result = self.single_element(predicate).map_err(LookupError::Source)?;
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
	/// [`LookupError::MultipleMatches`] on ambiguity, [`LookupError::Element`]
	/// when the supplier is needed but missing, [`LookupError::Source`] when
	/// the source fails.
	pub fn single_or_supplier<P, F>(
		self,
		predicate: Predicate<P>,
		supplier: Option<F>,
	) -> Result<S::Item, LookupError<S::Error>>
	where
		P: Fn(&S::Item) -> bool + 'q,
		F: FnOnce() -> S::Item,
	{
		let text = predicate.text().to_owned();
		let result = self.single_element(predicate).map_err(LookupError::Source)?;
		if result.is_multiple() {
			return Err(LookupError::multiple_matches(&text));
		}
		Ok(result.value_or_supplier(supplier)?)
	}

	/// Returns the single match.
	///
	/// # Errors
	///
	/// [`LookupError::NoMatch`] or [`LookupError::MultipleMatches`] naming the
	/// predicate, or [`LookupError::Source`] when the source fails.
	pub fn single_or_throw<P>(self, predicate: Predicate<P>) -> Result<S::Item, LookupError<S::Error>>
	where
		P: Fn(&S::Item) -> bool + 'q,
	{
		let text = predicate.text().to_owned();
		self.single_element(predicate)
			.map_err(LookupError::Source)?
			.into_result()
			.map_err(|cardinality| match cardinality {
				Cardinality::Multiple => LookupError::multiple_matches(&text),
				_ => LookupError::no_match(&text),
			})
	}

	/// Returns the single match, failing with exactly `on_none()` or
	/// `on_multiple()`.
	pub fn single_or_throw_with<P, E>(
		self,
		predicate: Predicate<P>,
		on_none: impl FnOnce() -> E,
		on_multiple: impl FnOnce() -> E,
	) -> Result<S::Item, E>
	where
		P: Fn(&S::Item) -> bool + 'q,
		E: From<S::Error>,
	{
		self.single_element_or_throw_on_multiple(predicate, on_multiple)?
			.into_element()
			.into_option()
			.ok_or_else(on_none)
	}
}

impl<S: QuerySource> fmt::Debug for Query<'_, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Query").field("plan", &self.plan).finish_non_exhaustive()
	}
}

/// Classifies the (at most two) results of a capped single-match query.
fn classify<T>(found: Vec<T>) -> SingleElementResult<T> {
	let mut found = found.into_iter();
	match (found.next(), found.next()) {
		(None, _) => SingleElementResult::none(),
		(Some(first), None) => SingleElementResult::one(first),
		(Some(_), Some(_)) => SingleElementResult::multiple(),
	}
}
