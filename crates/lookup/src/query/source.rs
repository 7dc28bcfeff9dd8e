use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;

use crate::predicate::Predicate;
use crate::query::Query;

/// A data source that evaluates query plans itself.
///
/// Implementations receive the recorded filters and limit and are expected
/// to return, in their own order, at most [`QueryPlan::limit`] items that
/// satisfy [`QueryPlan::matches`]. Filters may be evaluated any number of
/// times per candidate.
pub trait QuerySource {
	/// The element type produced by the source.
	type Item;
	/// The error raised when evaluation fails.
	type Error: std::error::Error + 'static;

	/// Evaluates `plan` and returns the matching items.
	fn execute(&self, plan: &QueryPlan<'_, Self::Item>) -> Result<Vec<Self::Item>, Self::Error>;

	/// Starts an unfiltered query over this source.
	fn query(&self) -> Query<'_, Self>
	where
		Self: Sized,
	{
		Query::new(self)
	}
}

impl<S: QuerySource + ?Sized> QuerySource for &S {
	type Item = S::Item;
	type Error = S::Error;

	fn execute(&self, plan: &QueryPlan<'_, Self::Item>) -> Result<Vec<Self::Item>, Self::Error> {
		(**self).execute(plan)
	}
}

struct Filter<'q, T> {
	text: Cow<'static, str>,
	test: Box<dyn Fn(&T) -> bool + 'q>,
}

/// Filters and limit recorded by a [`Query`], handed to a [`QuerySource`].
pub struct QueryPlan<'q, T> {
	filters: Vec<Filter<'q, T>>,
	limit: Option<usize>,
}

impl<'q, T> QueryPlan<'q, T> {
	/// Creates a plan that selects everything.
	pub fn new() -> Self {
		Self {
			filters: Vec::new(),
			limit: None,
		}
	}

	/// Adds a filter; items must satisfy every filter.
	pub fn push_filter<P>(&mut self, predicate: Predicate<P>)
	where
		P: Fn(&T) -> bool + 'q,
	{
		let (text, test) = predicate.into_parts();
		self.filters.push(Filter {
			text,
			test: Box::new(test),
		});
	}

	/// Caps the number of results, keeping any tighter existing cap.
	pub fn limit_to(&mut self, limit: usize) {
		self.limit = Some(self.limit.map_or(limit, |current| current.min(limit)));
	}

	/// Returns true if `item` passes every filter.
	pub fn matches(&self, item: &T) -> bool {
		self.filters.iter().all(|filter| (filter.test)(item))
	}

	/// Returns the result cap, if any.
	#[inline]
	pub fn limit(&self) -> Option<usize> {
		self.limit
	}

	/// Returns the filter descriptions in the order they were added.
	pub fn filters(&self) -> impl Iterator<Item = &str> + '_ {
		self.filters.iter().map(|filter| filter.text.as_ref())
	}

	/// Returns true if no filter was recorded.
	#[inline]
	pub fn is_unfiltered(&self) -> bool {
		self.filters.is_empty()
	}
}

impl<T> Default for QueryPlan<'_, T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for QueryPlan<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QueryPlan")
			.field("filters", &self.filters().collect::<Vec<_>>())
			.field("limit", &self.limit)
			.finish()
	}
}

impl<T> fmt::Display for QueryPlan<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_unfiltered() {
			f.write_str("all")?;
		} else {
			f.write_str("where ")?;
			for (i, text) in self.filters().enumerate() {
				if i > 0 {
					f.write_str(" and ")?;
				}
				f.write_str(text)?;
			}
		}
		if let Some(limit) = self.limit {
			write!(f, " take {limit}")?;
		}
		Ok(())
	}
}

/// An in-memory source that evaluates plans by scanning its items in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecSource<T> {
	items: Vec<T>,
}

impl<T> VecSource<T> {
	/// Wraps `items`.
	pub fn new(items: Vec<T>) -> Self {
		Self { items }
	}

	/// Returns the stored items.
	pub fn items(&self) -> &[T] {
		&self.items
	}
}

impl<T> FromIterator<T> for VecSource<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<T: Clone> QuerySource for VecSource<T> {
	type Item = T;
	type Error = Infallible;

	fn execute(&self, plan: &QueryPlan<'_, T>) -> Result<Vec<T>, Infallible> {
		let limit = plan.limit().unwrap_or(usize::MAX);
		Ok(self
			.items
			.iter()
			.filter(|item| plan.matches(item))
			.take(limit)
			.cloned()
			.collect())
	}
}
