//! Named accessor chains that report where they hit a null link.

use std::borrow::Cow;
use std::fmt;

use pluck_primitives::Element;

use crate::error::NullLink;

/// Walks from the root to the target; on failure returns the index of the
/// name of the link that produced nothing.
type Walk<R, T> = Box<dyn for<'a> Fn(&'a R) -> Result<&'a T, usize>>;

/// Pins a closure to the higher-ranked walk signature.
fn walk<R: ?Sized, T: ?Sized, F>(f: F) -> F
where
	F: for<'a> Fn(&'a R) -> Result<&'a T, usize>,
{
	f
}

/// An ordered chain of named accessors from a root of type `R` down to a
/// target of type `T`.
///
/// Each link may produce nothing. Walking stops at the first such link and
/// reports its dotted path.
///
/// ```
/// use pluck_guard::AccessChain;
///
/// struct Order {
/// 	customer: Option<Customer>,
/// }
/// struct Customer {
/// 	email: Option<String>,
/// }
///
/// let email = AccessChain::root("order")
/// 	.then("customer", |o: &Order| o.customer.as_ref())
/// 	.then("email", |c: &Customer| c.email.as_deref());
///
/// let order = Order { customer: Some(Customer { email: None }) };
/// let err = email.get(&order).unwrap_err();
/// assert_eq!(err.to_string(), "order.customer.email is null");
/// ```
pub struct AccessChain<R: ?Sized, T: ?Sized> {
	names: Vec<Cow<'static, str>>,
	walk: Walk<R, T>,
}

impl<R: ?Sized + 'static> AccessChain<R, R> {
	/// Starts a chain at a root named `name`.
	pub fn root(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			names: vec![name.into()],
			walk: Box::new(walk(|root: &R| Ok(root))),
		}
	}
}

impl<R: ?Sized + 'static, T: ?Sized + 'static> AccessChain<R, T> {
	/// Extends the chain with a link named `name`.
	pub fn then<U, F>(self, name: impl Into<Cow<'static, str>>, accessor: F) -> AccessChain<R, U>
	where
		U: ?Sized + 'static,
		F: Fn(&T) -> Option<&U> + 'static,
	{
		let Self { mut names, walk: parent } = self;
		let depth = names.len();
		names.push(name.into());
		AccessChain {
			names,
			walk: Box::new(walk(move |root: &R| {
				let value = parent(root)?;
				accessor(value).ok_or(depth)
			})),
		}
	}

	/// Returns the full dotted path of the chain.
	pub fn path(&self) -> String {
		self.names.join(".")
	}

	/// Returns the number of links after the root.
	#[inline]
	pub fn depth(&self) -> usize {
		self.names.len() - 1
	}

	/// Walks the chain from `root`.
	///
	/// # Errors
	///
	/// Returns [`NullLink`] naming the first link that produced nothing.
	pub fn get<'a>(&self, root: &'a R) -> Result<&'a T, NullLink> {
		(self.walk)(root).map_err(|depth| {
			let path = self.names[..=depth].join(".");
			tracing::trace!(%path, "access chain stopped at null link");
			NullLink { path }
		})
	}

	/// Walks the chain, returning an absent element on a null link.
	pub fn find<'a>(&self, root: &'a R) -> Element<&'a T> {
		self.get(root).ok().into()
	}

	/// Walks the chain, returning `default` on a null link.
	pub fn get_or<'a>(&self, root: &'a R, default: &'a T) -> &'a T {
		self.get(root).unwrap_or(default)
	}

	/// Returns true when every link resolves.
	///
	/// Otherwise calls `on_null` with the dotted path of the null link and
	/// returns false.
	pub fn check(&self, root: &R, on_null: impl FnOnce(&str)) -> bool {
		match self.get(root) {
			Ok(_) => true,
			Err(NullLink { path }) => {
				on_null(&path);
				false
			}
		}
	}
}

impl<R: ?Sized, T: ?Sized> fmt::Debug for AccessChain<R, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AccessChain").field(&self.names.join(".")).finish()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[derive(Debug, Default)]
	struct Order {
		customer: Option<Customer>,
	}

	#[derive(Debug, Default)]
	struct Customer {
		name: String,
		address: Option<Box<Address>>,
	}

	#[derive(Debug, Default)]
	struct Address {
		city: Option<String>,
	}

	fn city() -> AccessChain<Order, str> {
		AccessChain::root("order")
			.then("customer", |o: &Order| o.customer.as_ref())
			.then("address", |c: &Customer| c.address.as_deref())
			.then("city", |a: &Address| a.city.as_deref())
	}

	fn order(customer: bool, address: bool, city: Option<&str>) -> Order {
		let address = address.then(|| {
			Box::new(Address {
				city: city.map(str::to_owned),
			})
		});
		Order {
			customer: customer.then(|| Customer {
				name: "ada".into(),
				address,
			}),
		}
	}

	#[test]
	fn path_joins_names() {
		assert_eq!(city().path(), "order.customer.address.city");
		assert_eq!(city().depth(), 3);
		assert_eq!(format!("{:?}", city()), "AccessChain(\"order.customer.address.city\")");
	}

	#[test]
	fn resolves_full_chain() {
		let order = order(true, true, Some("Lyon"));
		assert_eq!(city().get(&order), Ok("Lyon"));
		assert_eq!(city().find(&order), Element::present("Lyon"));
	}

	#[rstest]
	#[case(false, false, None, "order.customer")]
	#[case(true, false, None, "order.customer.address")]
	#[case(true, true, None, "order.customer.address.city")]
	fn reports_first_null_link(
		#[case] customer: bool,
		#[case] address: bool,
		#[case] name: Option<&str>,
		#[case] expected: &str,
	) {
		let order = order(customer, address, name);
		let err = city().get(&order).unwrap_err();
		assert_eq!(err.path, expected);
		assert_eq!(err.to_string(), format!("{expected} is null"));
		assert!(city().find(&order).is_absent());
	}

	#[test]
	fn get_or_falls_back() {
		let order = order(true, false, None);
		assert_eq!(city().get_or(&order, "unknown"), "unknown");
	}

	#[test]
	fn check_reports_path_once() {
		let mut reported = Vec::new();
		assert!(!city().check(&order(true, false, None), |path| reported.push(path.to_owned())));
		assert_eq!(reported, ["order.customer.address"]);

		assert!(city().check(&order(true, true, Some("Oslo")), |_| unreachable!()));
	}

	#[test]
	fn root_alone_always_resolves() {
		let chain = AccessChain::<Order, Order>::root("order");
		let order = Order::default();
		assert!(chain.get(&order).is_ok());
		assert_eq!(chain.path(), "order");
		assert_eq!(chain.depth(), 0);
	}

	#[test]
	fn links_may_project_plain_fields() {
		let name = AccessChain::root("order")
			.then("customer", |o: &Order| o.customer.as_ref())
			.then("name", |c: &Customer| Some(c.name.as_str()));
		assert_eq!(name.get(&order(true, false, None)), Ok("ada"));
	}
}
