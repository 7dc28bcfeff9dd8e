use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::{ElementError, Result};
use crate::nullable::Nullable;


/// Hash code of an absent element.
pub const ABSENT_HASH: u64 = 0;

/// Hash code of a present element whose payload is null.
pub const NULL_HASH: u64 = 1;

const HASH_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// State name reported when an absent element is unwrapped.
pub(crate) const ABSENT_STATE: &str = "Does not exist";

/// Rendering of a present element whose payload is null.
pub(crate) const NULL_STATE: &str = "Exists";

/// Mixes a payload hash so the result never lands on a sentinel.
///
/// Sentinels are [`ABSENT_HASH`] and [`NULL_HASH`]; salted codes start at 2.
#[inline]
pub(crate) fn salt(hash: u64) -> u64 {
	let salted = (hash ^ HASH_SALT).rotate_left(17);
	if salted <= NULL_HASH { salted + 2 } else { salted }
}

/// A value that either exists or does not.
///
/// `Element` is the result of a first-match lookup. It keeps "no value"
/// apart from "a present null": `Element<Option<U>>::present(None)` exists,
/// compares equal to other present nulls, and never equals
/// [`Element::absent`].
///
/// Reading the payload goes through an explicit path: [`try_unwrap`],
/// one of the `value_or*` defaults, or [`into_option`].
///
/// [`try_unwrap`]: Element::try_unwrap
/// [`into_option`]: Element::into_option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<T> {
	value: Option<T>,
}

impl<T> Element<T> {
	/// Creates an element holding `value`.
	#[inline]
	pub const fn present(value: T) -> Self {
		Self { value: Some(value) }
	}

	/// Creates an element holding nothing.
	#[inline]
	pub const fn absent() -> Self {
		Self { value: None }
	}

	/// Returns true if a value exists.
	#[inline]
	pub const fn is_present(&self) -> bool {
		self.value.is_some()
	}

	/// Returns true if no value exists.
	#[inline]
	pub const fn is_absent(&self) -> bool {
		self.value.is_none()
	}

	/// Borrows the payload, if any.
	#[inline]
	pub fn value(&self) -> Option<&T> {
		self.value.as_ref()
	}

	/// Converts `&Element<T>` into `Element<&T>`.
	#[inline]
	pub fn as_ref(&self) -> Element<&T> {
		Element { value: self.value.as_ref() }
	}

	/// Maps the payload, leaving an absent element absent.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Element<U> {
		Element { value: self.value.map(f) }
	}

	/// Converts into the equivalent `Option`.
	#[inline]
	pub fn into_option(self) -> Option<T> {
		self.value
	}

	/// Returns the payload or `default`.
	#[inline]
	pub fn value_or(self, default: T) -> T {
		self.value.unwrap_or(default)
	}

	/// Returns the payload, or the result of `default` when absent.
	///
	/// `default` is only called when needed.
	#[inline]
	pub fn value_or_else(self, default: impl FnOnce() -> T) -> T {
		self.value.unwrap_or_else(default)
	}

	/// Returns the payload, or `T::default()` when absent.
	#[inline]
	pub fn value_or_default(self) -> T
	where
		T: Default,
	{
		self.value.unwrap_or_default()
	}

	/// Returns the payload, or the result of an optional supplier.
	///
	/// The supplier is only inspected when the element is absent, so a
	/// caller holding a value never has to provide one.
	///
	/// # Errors
	///
	/// Returns [`ElementError::MissingArgument`] when the element is absent
	/// and `supplier` is `None`.
	pub fn value_or_supplier<F>(self, supplier: Option<F>) -> Result<T>
	where
		F: FnOnce() -> T,
	{
		match self.value {
			Some(value) => Ok(value),
			None => supplier
				.map(|supply| supply())
				.ok_or(ElementError::MissingArgument("default_supplier")),
		}
	}

	/// Calls `action` with the payload if one exists.
	pub fn when_present(&self, action: impl FnOnce(&T)) {
		if let Some(value) = &self.value {
			action(value);
		}
	}

	/// Unwraps the payload.
	///
	/// # Errors
	///
	/// Returns [`ElementError::InvalidCast`] naming `T` when absent.
	pub fn try_unwrap(self) -> Result<T> {
		self.value.ok_or_else(|| ElementError::InvalidCast {
			state: ABSENT_STATE,
			target: type_name::<T>(),
		})
	}
}

impl<T: Hash + Nullable> Element<T> {
	/// Returns a deterministic hash code.
	///
	/// Absent elements hash to [`ABSENT_HASH`], present nulls to
	/// [`NULL_HASH`]. Every other payload hashes through [`FxHasher`] and is
	/// salted away from both sentinels.
	pub fn hash_code(&self) -> u64 {
		match &self.value {
			None => ABSENT_HASH,
			Some(value) if value.is_null() => NULL_HASH,
			Some(value) => {
				let mut hasher = FxHasher::default();
				value.hash(&mut hasher);
				salt(hasher.finish())
			}
		}
	}
}

impl<U: fmt::Display> Element<Option<U>> {
	/// Renders the element the way [`Display`](fmt::Display) would if
	/// `Option<U>` were displayable: a present `None` reads "Exists".
	pub fn describe(&self) -> String {
		match &self.value {
			None => ABSENT_STATE.to_owned(),
			Some(None) => NULL_STATE.to_owned(),
			Some(Some(value)) => value.to_string(),
		}
	}
}

impl<T> Default for Element<T> {
	fn default() -> Self {
		Self::absent()
	}
}

impl<T: Hash + Nullable> Hash for Element<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.hash_code());
	}
}

impl<T> From<Option<T>> for Element<T> {
	#[inline]
	fn from(value: Option<T>) -> Self {
		Self { value }
	}
}

impl<T> From<Element<T>> for Option<T> {
	#[inline]
	fn from(element: Element<T>) -> Self {
		element.value
	}
}

impl<T: fmt::Display + Nullable> fmt::Display for Element<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.value {
			None => f.write_str(ABSENT_STATE),
			Some(value) if value.is_null() => f.write_str(NULL_STATE),
			Some(value) => fmt::Display::fmt(value, f),
		}
	}
}

// Present nulls serialize as `null` and read back as absent.
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Element<T> {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.value.serialize(serializer)
	}
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Element<T> {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Option::<T>::deserialize(deserializer).map(Self::from)
	}
}
