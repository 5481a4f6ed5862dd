//! Keyword arguments in, resolved values out.

use indexmap::IndexMap;

use crate::error::ParamError;
use crate::value::{FromParamValue, ParamValue};

/// Keyword arguments supplied to a construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
	values: IndexMap<String, ParamValue>,
}

impl Args {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.set(name, value);
		self
	}

	/// Sets an argument, returning the previous value.
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
		self.values.insert(name.into(), value.into())
	}

	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.values.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Args {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}

/// Resolved parameter values of a configurable type.
///
/// Values are kept in resolution order. Handlers see the instance while it is
/// being built and may read any parameter they declared a dependency on;
/// callers only ever receive fully resolved instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
	type_name: &'static str,
	values: IndexMap<String, ParamValue>,
}

impl Instance {
	pub(crate) fn new(type_name: &'static str, capacity: usize) -> Self {
		Self {
			type_name,
			values: IndexMap::with_capacity(capacity),
		}
	}

	pub(crate) fn assign(&mut self, name: &str, value: ParamValue) {
		self.values.insert(name.to_string(), value);
	}

	/// Name of the configurable type this instance belongs to.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn get(&self, name: &str) -> Option<&ParamValue> {
		self.values.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Gets a resolved value, failing with [`ParamError::Unresolved`] if it is
	/// not on the instance.
	pub fn require(&self, name: &str) -> Result<&ParamValue, ParamError> {
		self.values.get(name).ok_or_else(|| self.unresolved(name))
	}

	/// Gets a resolved value converted to `T`.
	pub fn get_as<T: FromParamValue>(&self, name: &str) -> Result<T, ParamError> {
		let value = self.require(name)?;
		T::from_param(value.clone()).ok_or_else(|| self.mismatch::<T>(name, value))
	}

	pub fn int(&self, name: &str) -> Result<i64, ParamError> {
		self.get_as(name)
	}

	pub fn bool(&self, name: &str) -> Result<bool, ParamError> {
		self.get_as(name)
	}

	pub fn float(&self, name: &str) -> Result<f64, ParamError> {
		self.get_as(name)
	}

	pub fn str(&self, name: &str) -> Result<&str, ParamError> {
		let value = self.require(name)?;
		value.as_str().ok_or_else(|| self.mismatch::<String>(name, value))
	}

	/// Moves a resolved value out, converted to `T`.
	///
	/// Used by [`Configurable::from_instance`](crate::Configurable::from_instance)
	/// to fill struct fields without cloning.
	pub fn take<T: FromParamValue>(&mut self, name: &str) -> Result<T, ParamError> {
		let value = self.values.shift_remove(name).ok_or_else(|| self.unresolved(name))?;
		let got = value.type_name();
		T::from_param(value).ok_or_else(|| ParamError::TypeMismatch {
			type_name: self.type_name,
			param: name.to_string(),
			expected: T::expected().to_string(),
			got,
		})
	}

	/// Parameter names in resolution order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	fn unresolved(&self, name: &str) -> ParamError {
		ParamError::Unresolved {
			type_name: self.type_name,
			param: name.to_string(),
		}
	}

	fn mismatch<T: FromParamValue>(&self, name: &str, value: &ParamValue) -> ParamError {
		ParamError::TypeMismatch {
			type_name: self.type_name,
			param: name.to_string(),
			expected: T::expected().to_string(),
			got: value.type_name(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn resolved() -> Instance {
		let mut inst = Instance::new("T", 2);
		inst.assign("port", ParamValue::Int(80));
		inst.assign("host", ParamValue::from("example.org"));
		inst
	}

	#[test]
	fn args_collect_from_pairs() {
		let args: Args = [("a", 1), ("b", 2)].into_iter().collect();
		assert_eq!(args.len(), 2);
		assert_eq!(args.get("b"), Some(&ParamValue::Int(2)));
		assert!(!args.contains("c"));
	}

	#[test]
	fn take_moves_value_out() {
		let mut inst = resolved();
		assert_eq!(inst.take::<i64>("port").unwrap(), 80);
		assert!(!inst.contains("port"));
		let err = inst.take::<i64>("port").unwrap_err();
		assert!(matches!(&err, ParamError::Unresolved { param, .. } if param == "port"));
	}

	#[test]
	fn wrong_shape_is_a_type_mismatch() {
		let mut inst = resolved();
		let err = inst.take::<bool>("host").unwrap_err();
		assert_eq!(err.to_string(), "'T' parameter 'host' must be bool, got string");
		assert!(matches!(inst.str("port"), Err(ParamError::TypeMismatch { got: "int", .. })));
	}

	#[test]
	fn names_follow_assignment_order() {
		assert_eq!(resolved().names().collect::<Vec<_>>(), ["port", "host"]);
	}
}
