use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::element::{ABSENT_HASH, Element, NULL_HASH, salt};
use crate::error::{ElementError, Result};
use crate::nullable::Nullable;


/// How many elements matched a single-match lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
	/// Nothing matched.
	None,
	/// Exactly one element matched.
	One,
	/// At least two elements matched.
	Multiple,
}

impl Cardinality {
	/// Returns the variant name.
	pub const fn name(self) -> &'static str {
		match self {
			Self::None => "None",
			Self::One => "One",
			Self::Multiple => "Multiple",
		}
	}
}

impl fmt::Display for Cardinality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Outcome of a lookup that expects exactly one match.
///
/// Ambiguity ([`Cardinality::Multiple`]) is reported apart from absence
/// ([`Cardinality::None`]). Only [`Cardinality::One`] carries a payload; the
/// second match seen while proving ambiguity is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleElementResult<T> {
	cardinality: Cardinality,
	element: Element<T>,
}

impl<T> SingleElementResult<T> {
	/// The result of a lookup that matched nothing.
	pub const NO_ELEMENTS: Self = Self::none();

	/// The result of a lookup that matched more than once.
	pub const MULTIPLE_ELEMENTS: Self = Self::multiple();

	/// Creates a result holding the single match.
	#[inline]
	pub const fn one(value: T) -> Self {
		Self {
			cardinality: Cardinality::One,
			element: Element::present(value),
		}
	}

	/// Creates a result for a lookup with no match.
	#[inline]
	pub const fn none() -> Self {
		Self {
			cardinality: Cardinality::None,
			element: Element::absent(),
		}
	}

	/// Creates a result for an ambiguous lookup.
	#[inline]
	pub const fn multiple() -> Self {
		Self {
			cardinality: Cardinality::Multiple,
			element: Element::absent(),
		}
	}

	/// Returns how many elements matched.
	#[inline]
	pub const fn cardinality(&self) -> Cardinality {
		self.cardinality
	}

	/// Returns true if nothing matched.
	#[inline]
	pub const fn is_none(&self) -> bool {
		matches!(self.cardinality, Cardinality::None)
	}

	/// Returns true if exactly one element matched.
	#[inline]
	pub const fn is_one(&self) -> bool {
		matches!(self.cardinality, Cardinality::One)
	}

	/// Returns true if more than one element matched.
	#[inline]
	pub const fn is_multiple(&self) -> bool {
		matches!(self.cardinality, Cardinality::Multiple)
	}

	/// Borrows the embedded element; absent unless [`Cardinality::One`].
	#[inline]
	pub fn element(&self) -> &Element<T> {
		&self.element
	}

	/// Borrows the single match, if any.
	#[inline]
	pub fn value(&self) -> Option<&T> {
		self.element.value()
	}

	/// Converts into the embedded element, treating ambiguity as absence.
	#[inline]
	pub fn into_element(self) -> Element<T> {
		self.element
	}

	/// Converts `&SingleElementResult<T>` into `SingleElementResult<&T>`.
	pub fn as_ref(&self) -> SingleElementResult<&T> {
		SingleElementResult {
			cardinality: self.cardinality,
			element: self.element.as_ref(),
		}
	}

	/// Maps the single match, keeping the cardinality.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SingleElementResult<U> {
		SingleElementResult {
			cardinality: self.cardinality,
			element: self.element.map(f),
		}
	}

	/// Returns the single match, or the cardinality that prevented one.
	pub fn into_result(self) -> std::result::Result<T, Cardinality> {
		let cardinality = self.cardinality;
		self.element.into_option().ok_or(cardinality)
	}

	/// Returns the single match, or `default` for both no match and
	/// ambiguity.
	#[inline]
	pub fn value_or(self, default: T) -> T {
		self.element.value_or(default)
	}

	/// Returns the single match, or calls `default` for both no match and
	/// ambiguity.
	#[inline]
	pub fn value_or_else(self, default: impl FnOnce() -> T) -> T {
		self.element.value_or_else(default)
	}

	/// Returns the single match, with separate defaults for no match and
	/// ambiguity. Only the default that is needed gets called.
	pub fn value_or_else_multiple(
		self,
		none_default: impl FnOnce() -> T,
		multiple_default: impl FnOnce() -> T,
	) -> T {
		match self.cardinality {
			Cardinality::Multiple => multiple_default(),
			_ => self.element.value_or_else(none_default),
		}
	}

	/// Returns the single match, or the result of an optional supplier
	/// used for both no match and ambiguity.
	///
	/// # Errors
	///
	/// Returns [`ElementError::MissingArgument`] when a default is needed and
	/// `supplier` is `None`.
	pub fn value_or_supplier<F>(self, supplier: Option<F>) -> Result<T>
	where
		F: FnOnce() -> T,
	{
		self.element.value_or_supplier(supplier)
	}

	/// Returns the single match, or the result of the optional supplier for
	/// the actual cardinality.
	///
	/// Only the supplier that is needed gets inspected.
	///
	/// # Errors
	///
	/// Returns [`ElementError::MissingArgument`] naming the needed supplier
	/// when it is `None`.
	pub fn value_or_suppliers<F, G>(
		self,
		none_supplier: Option<F>,
		multiple_supplier: Option<G>,
	) -> Result<T>
	where
		F: FnOnce() -> T,
		G: FnOnce() -> T,
	{
		match (self.cardinality, self.element.into_option()) {
			(Cardinality::One, Some(value)) => Ok(value),
			(Cardinality::Multiple, _) => multiple_supplier
				.map(|supply| supply())
				.ok_or(ElementError::MissingArgument("multiple_default_supplier")),
			_ => none_supplier
				.map(|supply| supply())
				.ok_or(ElementError::MissingArgument("none_default_supplier")),
		}
	}

	/// Unwraps the single match.
	///
	/// # Errors
	///
	/// Returns [`ElementError::InvalidCast`] naming the cardinality and `T`
	/// unless exactly one element matched.
	pub fn try_unwrap(self) -> Result<T> {
		let cardinality = self.cardinality;
		self.element
			.into_option()
			.ok_or_else(|| ElementError::InvalidCast {
				state: cardinality.name(),
				target: type_name::<T>(),
			})
	}
}

impl<T: Hash + Nullable> SingleElementResult<T> {
	/// Returns a deterministic hash code.
	///
	/// No match hashes to `0`, ambiguity to `1`; a single match salts the
	/// element's own code away from both.
	pub fn hash_code(&self) -> u64 {
		match self.cardinality {
			Cardinality::None => ABSENT_HASH,
			Cardinality::Multiple => NULL_HASH,
			Cardinality::One => salt(self.element.hash_code()),
		}
	}
}

impl<U: fmt::Display> SingleElementResult<Option<U>> {
	/// Renders the result with [`Element::describe`] unless it is ambiguous.
	pub fn describe(&self) -> String {
		match self.cardinality {
			Cardinality::Multiple => self.cardinality.to_string(),
			_ => self.element.describe(),
		}
	}
}

impl<T> Default for SingleElementResult<T> {
	fn default() -> Self {
		Self::none()
	}
}

impl<T: Hash + Nullable> Hash for SingleElementResult<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.hash_code());
	}
}

impl<T: fmt::Display + Nullable> fmt::Display for SingleElementResult<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.cardinality {
			Cardinality::Multiple => fmt::Display::fmt(&self.cardinality, f),
			_ => fmt::Display::fmt(&self.element, f),
		}
	}
}
