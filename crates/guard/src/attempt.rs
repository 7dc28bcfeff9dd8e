//! Iteration that keeps going past failed elements.
//!
//! [`AttemptCatchExt`] adapts any iterator of `Result`s so that errors are
//! handed to a callback instead of ending the caller's loop. The adapters are
//! lazy and compose ahead of the lookups in `pluck-lookup`.

use std::fmt;
use std::iter::FusedIterator;

/// Error-tolerant adapters for iterators of `Result`s.
///
/// ```
/// use pluck_guard::AttemptCatchExt;
///
/// let mut failures = Vec::new();
/// let parsed: Vec<u8> = ["1", "x", "3"]
/// 	.into_iter()
/// 	.map(str::parse::<u8>)
/// 	.attempt_catch(|err| failures.push(err))
/// 	.collect();
/// assert_eq!(parsed, [1, 3]);
/// assert_eq!(failures.len(), 1);
/// ```
pub trait AttemptCatchExt<T, E>: Iterator<Item = Result<T, E>> + Sized {
	/// Yields the `Ok` values, passing every error to `handler` and moving on.
	fn attempt_catch<H>(self, handler: H) -> AttemptCatch<Self, H>
	where
		H: FnMut(E),
	{
		AttemptCatch { iter: self, handler }
	}

	/// Passes errors for which `category` holds to `handler` and skips them.
	///
	/// Any other error is yielded unchanged, as is every `Ok`.
	fn attempt_catch_where<C, H>(self, category: C, handler: H) -> AttemptCatchWhere<Self, C, H>
	where
		C: FnMut(&E) -> bool,
		H: FnMut(E),
	{
		AttemptCatchWhere {
			iter: self,
			category,
			handler,
		}
	}
}

impl<I, T, E> AttemptCatchExt<T, E> for I where I: Iterator<Item = Result<T, E>> {}

/// Iterator returned by [`AttemptCatchExt::attempt_catch`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct AttemptCatch<I, H> {
	iter: I,
	handler: H,
}

impl<I, H, T, E> Iterator for AttemptCatch<I, H>
where
	I: Iterator<Item = Result<T, E>>,
	H: FnMut(E),
{
	type Item = T;

	fn next(&mut self) -> Option<T> {
		loop {
			match self.iter.next()? {
				Ok(item) => return Some(item),
				Err(err) => {
					tracing::debug!(error = std::any::type_name::<E>(), "swallowed error");
					(self.handler)(err);
				}
			}
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, self.iter.size_hint().1)
	}
}

impl<I, H, T, E> FusedIterator for AttemptCatch<I, H>
where
	I: FusedIterator<Item = Result<T, E>>,
	H: FnMut(E),
{
}

impl<I: fmt::Debug, H> fmt::Debug for AttemptCatch<I, H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AttemptCatch").field("iter", &self.iter).finish_non_exhaustive()
	}
}

/// Iterator returned by [`AttemptCatchExt::attempt_catch_where`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct AttemptCatchWhere<I, C, H> {
	iter: I,
	category: C,
	handler: H,
}

impl<I, C, H, T, E> Iterator for AttemptCatchWhere<I, C, H>
where
	I: Iterator<Item = Result<T, E>>,
	C: FnMut(&E) -> bool,
	H: FnMut(E),
{
	type Item = Result<T, E>;

	fn next(&mut self) -> Option<Result<T, E>> {
		loop {
			match self.iter.next()? {
				Err(err) if (self.category)(&err) => {
					tracing::debug!(error = std::any::type_name::<E>(), "swallowed error");
					(self.handler)(err);
				}
				other => return Some(other),
			}
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, self.iter.size_hint().1)
	}
}

impl<I, C, H, T, E> FusedIterator for AttemptCatchWhere<I, C, H>
where
	I: FusedIterator<Item = Result<T, E>>,
	C: FnMut(&E) -> bool,
	H: FnMut(E),
{
}

impl<I: fmt::Debug, C, H> fmt::Debug for AttemptCatchWhere<I, C, H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AttemptCatchWhere")
			.field("iter", &self.iter)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[derive(Debug, Clone, PartialEq, Eq)]
	enum Fault {
		Transient(u8),
		Fatal(u8),
	}

	fn is_transient(fault: &Fault) -> bool {
		matches!(fault, Fault::Transient(_))
	}

	#[test]
	fn skips_every_error_in_order() {
		let mut seen = Vec::new();
		let out: Vec<i32> = vec![Ok(1), Err("a"), Ok(2), Err("b"), Ok(3)]
			.into_iter()
			.attempt_catch(|err| seen.push(err))
			.collect();
		assert_eq!(out, [1, 2, 3]);
		assert_eq!(seen, ["a", "b"]);
	}

	#[test]
	fn stays_lazy() {
		let pulled = Cell::new(0);
		let mut iter = (0..10)
			.inspect(|_| pulled.set(pulled.get() + 1))
			.map(|n| if n % 2 == 0 { Err(n) } else { Ok(n) })
			.attempt_catch(drop);
		assert_eq!(iter.next(), Some(1));
		assert_eq!(pulled.get(), 2);
	}

	#[test]
	fn only_errors_yields_nothing() {
		let handled = Cell::new(0);
		let mut iter = [Err::<(), _>(1), Err(2)]
			.into_iter()
			.attempt_catch(|_| handled.set(handled.get() + 1));
		assert_eq!(iter.next(), None);
		assert_eq!(iter.next(), None);
		assert_eq!(handled.get(), 2);
	}

	#[rstest]
	#[case(vec![Ok(1), Err(Fault::Transient(0)), Ok(2)], vec![Ok(1), Ok(2)])]
	#[case(vec![Err(Fault::Fatal(1)), Ok(2)], vec![Err(Fault::Fatal(1)), Ok(2)])]
	#[case(
		vec![Err(Fault::Transient(1)), Err(Fault::Fatal(2)), Err(Fault::Transient(3))],
		vec![Err(Fault::Fatal(2))]
	)]
	#[case(vec![], vec![])]
	fn category_filters_what_is_swallowed(
		#[case] source: Vec<Result<i32, Fault>>,
		#[case] expected: Vec<Result<i32, Fault>>,
	) {
		let out: Vec<_> = source.into_iter().attempt_catch_where(is_transient, drop).collect();
		assert_eq!(out, expected);
	}

	#[test]
	fn category_handler_sees_only_matching_errors() {
		let mut handled = Vec::new();
		let out: Vec<_> = vec![Err(Fault::Transient(1)), Err(Fault::Fatal(2)), Ok(3)]
			.into_iter()
			.attempt_catch_where(is_transient, |fault| handled.push(fault))
			.collect();
		assert_eq!(handled, [Fault::Transient(1)]);
		assert_eq!(out, [Err(Fault::Fatal(2)), Ok(3)]);
	}

	#[test]
	fn size_hint_drops_lower_bound() {
		let iter = vec![Ok::<_, ()>(1), Ok(2)].into_iter().attempt_catch(drop);
		assert_eq!(iter.size_hint(), (0, Some(2)));
		let iter = vec![Ok::<_, ()>(1)].into_iter().attempt_catch_where(|_| true, drop);
		assert_eq!(iter.size_hint(), (0, Some(1)));
	}

	proptest! {
		#[test]
		fn partitions_results(source in prop::collection::vec(any::<Result<u8, u8>>(), 0..64)) {
			let mut errors = Vec::new();
			let oks: Vec<u8> = source.clone().into_iter().attempt_catch(|e| errors.push(e)).collect();

			let expected_oks: Vec<u8> = source.iter().filter_map(|r| r.ok()).collect();
			let expected_errs: Vec<u8> = source.iter().filter_map(|r| r.err()).collect();
			prop_assert_eq!(oks, expected_oks);
			prop_assert_eq!(errors, expected_errs);
		}

		#[test]
		fn catching_nothing_is_identity(source in prop::collection::vec(any::<Result<u8, u8>>(), 0..64)) {
			let out: Vec<_> = source.clone().into_iter().attempt_catch_where(|_| false, drop).collect();
			prop_assert_eq!(out, source);
		}
	}
}
