//! Predicates that carry their own textual form.

use std::borrow::Cow;
use std::fmt;

/// A predicate closure paired with the text used to describe it in errors
/// and query plans.
///
/// ```
/// use pluck_lookup::{Predicate, SequenceExt};
///
/// let err = vec![1, 1]
/// 	.single_or(Predicate::new("(x == 1)", |x: &i32| *x == 1), 0)
/// 	.unwrap_err();
/// assert_eq!(err.to_string(), "More than one match found for (x == 1).");
/// ```
#[derive(Clone)]
pub struct Predicate<F> {
	text: Cow<'static, str>,
	test: F,
}

impl<F> Predicate<F> {
	/// Creates a predicate from its description and test.
	pub fn new(text: impl Into<Cow<'static, str>>, test: F) -> Self {
		Self {
			text: text.into(),
			test,
		}
	}

	/// Returns the textual form.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Evaluates the predicate against `item`.
	#[inline]
	pub fn test<T: ?Sized>(&mut self, item: &T) -> bool
	where
		F: FnMut(&T) -> bool,
	{
		(self.test)(item)
	}

	/// Splits into description and test.
	#[inline]
	pub fn into_parts(self) -> (Cow<'static, str>, F) {
		(self.text, self.test)
	}
}

fn always<T: ?Sized>(_: &T) -> bool {
	true
}

impl<T: ?Sized> Predicate<fn(&T) -> bool> {
	/// A predicate that matches everything, described as `true`.
	pub fn always() -> Self {
		Self::new("true", always::<T> as fn(&T) -> bool)
	}
}

impl<F> fmt::Debug for Predicate<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Predicate").field(&self.text).finish()
	}
}

impl<F> fmt::Display for Predicate<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

/// Builds a [`Predicate`] whose text is the closure body.
///
/// ```
/// use pluck_lookup::predicate;
///
/// let mut p = predicate!(|name: &str| name.is_empty());
/// assert_eq!(p.text(), "name.is_empty()");
/// assert!(p.test(""));
/// ```
#[macro_export]
macro_rules! predicate {
	(|$arg:ident : $ty:ty| $body:expr) => {
		$crate::Predicate::new(stringify!($body), |$arg: $ty| $body)
	};
	(|$arg:ident| $body:expr) => {
		$crate::Predicate::new(stringify!($body), |$arg| $body)
	};
}
