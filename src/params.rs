//! Named parameters extracted from a matched URL.

use std::collections::HashMap;

/// Named groups captured by a route matcher.
///
/// A group name is always present once the template declared it, but its
/// captured value may be absent (e.g. an optional group the URL did not
/// supply), hence the `Option<String>` values. Static routes always carry an
/// empty parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, Option<String>>);

impl Params {
	/// Creates an empty parameter set.
	pub fn empty() -> Self {
		Self(HashMap::new())
	}

	/// Returns the captured value for `name`, flattening absent captures.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).and_then(|v| v.as_deref())
	}

	/// Returns whether the template declared a group named `name`,
	/// regardless of whether it captured a value.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Number of declared groups.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether no groups were declared.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over `(name, captured value)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
	}
}

impl From<HashMap<String, Option<String>>> for Params {
	fn from(map: HashMap<String, Option<String>>) -> Self {
		Self(map)
	}
}

impl FromIterator<(String, Option<String>)> for Params {
	fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}
