//! Null-equivalence for element payloads.

use std::rc::Rc;
use std::sync::Arc;

/// Payloads that may represent "null" while still being present.
///
/// An [`Element`](crate::Element) holding a null payload hashes to
/// [`NULL_HASH`](crate::element::NULL_HASH) and displays as `"Exists"`.
/// Most types are never null; implement the trait with an empty body to
/// opt a type in.
pub trait Nullable {
	/// Returns true if this value stands for null.
	fn is_null(&self) -> bool {
		false
	}
}

impl<T> Nullable for Option<T> {
	#[inline]
	fn is_null(&self) -> bool {
		self.is_none()
	}
}

impl<T: Nullable + ?Sized> Nullable for &T {
	#[inline]
	fn is_null(&self) -> bool {
		(**self).is_null()
	}
}

impl<T: Nullable + ?Sized> Nullable for &mut T {
	#[inline]
	fn is_null(&self) -> bool {
		(**self).is_null()
	}
}

impl<T: Nullable + ?Sized> Nullable for Box<T> {
	#[inline]
	fn is_null(&self) -> bool {
		(**self).is_null()
	}
}

impl<T: Nullable + ?Sized> Nullable for Rc<T> {
	#[inline]
	fn is_null(&self) -> bool {
		(**self).is_null()
	}
}

impl<T: Nullable + ?Sized> Nullable for Arc<T> {
	#[inline]
	fn is_null(&self) -> bool {
		(**self).is_null()
	}
}

impl<T> Nullable for Vec<T> {}
impl<T> Nullable for [T] {}

macro_rules! never_null {
	($($ty:ty),* $(,)?) => {
		$(impl Nullable for $ty {})*
	};
}

never_null!(
	(),
	bool,
	char,
	i8,
	i16,
	i32,
	i64,
	i128,
	isize,
	u8,
	u16,
	u32,
	u64,
	u128,
	usize,
	f32,
	f64,
	str,
	String,
);
