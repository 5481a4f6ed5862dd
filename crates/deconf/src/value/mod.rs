//! Dynamic parameter values and the type checks applied to them.
//!
//! [`ParamValue`] is what flows from [`Args`](crate::Args) through handlers into an
//! [`Instance`](crate::Instance). [`ExpectedType`] is the capability check a
//! parameter may declare; it runs before the handler sees the value.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// The value of a parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// Neutral absent marker; the implicit default of optional parameters.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Ordered list of values.
	List(Vec<ParamValue>),
}

impl ParamValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ParamValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			ParamValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			ParamValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ParamValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the items if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[ParamValue]> {
		match self {
			ParamValue::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, ParamValue::Null)
	}

	/// Returns the type tag of this value.
	pub fn param_type(&self) -> ParamType {
		match self {
			ParamValue::Null => ParamType::Null,
			ParamValue::Bool(_) => ParamType::Bool,
			ParamValue::Int(_) => ParamType::Int,
			ParamValue::Float(_) => ParamType::Float,
			ParamValue::String(_) => ParamType::String,
			ParamValue::List(_) => ParamType::List,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		self.param_type().name()
	}

	/// Returns true if this value matches the given type.
	pub fn matches_type(&self, ty: ParamType) -> bool {
		self.param_type() == ty
	}
}

impl From<bool> for ParamValue {
	fn from(v: bool) -> Self {
		ParamValue::Bool(v)
	}
}

impl From<i64> for ParamValue {
	fn from(v: i64) -> Self {
		ParamValue::Int(v)
	}
}

impl From<i32> for ParamValue {
	fn from(v: i32) -> Self {
		ParamValue::Int(i64::from(v))
	}
}

impl From<f64> for ParamValue {
	fn from(v: f64) -> Self {
		ParamValue::Float(v)
	}
}

impl From<String> for ParamValue {
	fn from(v: String) -> Self {
		ParamValue::String(v)
	}
}

impl From<&str> for ParamValue {
	fn from(v: &str) -> Self {
		ParamValue::String(v.to_string())
	}
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
	fn from(v: Vec<T>) -> Self {
		ParamValue::List(v.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(v: Option<T>) -> Self {
		v.map_or(ParamValue::Null, Into::into)
	}
}

/// The type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
	Null,
	Bool,
	Int,
	Float,
	String,
	List,
}

impl ParamType {
	pub fn name(self) -> &'static str {
		match self {
			ParamType::Null => "null",
			ParamType::Bool => "bool",
			ParamType::Int => "int",
			ParamType::Float => "float",
			ParamType::String => "string",
			ParamType::List => "list",
		}
	}
}

impl core::fmt::Display for ParamType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// Predicate used by [`ExpectedType::Custom`].
pub type TypePredicate = fn(&ParamValue) -> bool;

/// Type constraint checked against a parameter's working value.
///
/// Tags are compared exactly: an `Int` never satisfies `Bool` or `Float`.
/// Use [`ExpectedType::OneOf`] to accept several shapes, or
/// [`ExpectedType::Custom`] for anything structural.
#[derive(Debug, Clone, Copy)]
pub enum ExpectedType {
	/// Value must carry exactly this tag.
	Is(ParamType),
	/// Value must carry any of these tags.
	OneOf(&'static [ParamType]),
	/// Value must satisfy the predicate; `name` is used in error messages.
	Custom { name: &'static str, check: TypePredicate },
}

impl ExpectedType {
	/// Returns true if `value` satisfies this constraint.
	pub fn accepts(&self, value: &ParamValue) -> bool {
		match self {
			ExpectedType::Is(ty) => value.matches_type(*ty),
			ExpectedType::OneOf(tys) => tys.iter().any(|ty| value.matches_type(*ty)),
			ExpectedType::Custom { check, .. } => check(value),
		}
	}
}

impl From<ParamType> for ExpectedType {
	fn from(ty: ParamType) -> Self {
		ExpectedType::Is(ty)
	}
}

impl core::fmt::Display for ExpectedType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			ExpectedType::Is(ty) => write!(f, "{ty}"),
			ExpectedType::OneOf(tys) => {
				for (i, ty) in tys.iter().enumerate() {
					if i > 0 {
						f.write_str(" | ")?;
					}
					write!(f, "{ty}")?;
				}
				Ok(())
			}
			ExpectedType::Custom { name, .. } => f.write_str(name),
		}
	}
}

// Seal the FromParamValue trait to prevent external implementations.
mod sealed {
	pub trait Sealed {}
	impl Sealed for bool {}
	impl Sealed for i64 {}
	impl Sealed for f64 {}
	impl Sealed for String {}
	impl Sealed for Vec<super::ParamValue> {}
	impl Sealed for super::ParamValue {}
	impl<T: Sealed> Sealed for Option<T> {}
}

/// Trait for types that can be extracted from a [`ParamValue`].
pub trait FromParamValue: sealed::Sealed + Sized {
	/// Extracts the value, returning `None` if the shape doesn't match.
	fn from_param(value: ParamValue) -> Option<Self>;

	/// Name of the expected shape, used in mismatch errors.
	fn expected() -> &'static str;
}

impl FromParamValue for bool {
	fn from_param(value: ParamValue) -> Option<Self> {
		value.as_bool()
	}

	fn expected() -> &'static str {
		ParamType::Bool.name()
	}
}

impl FromParamValue for i64 {
	fn from_param(value: ParamValue) -> Option<Self> {
		value.as_int()
	}

	fn expected() -> &'static str {
		ParamType::Int.name()
	}
}

impl FromParamValue for f64 {
	fn from_param(value: ParamValue) -> Option<Self> {
		value.as_float()
	}

	fn expected() -> &'static str {
		ParamType::Float.name()
	}
}

impl FromParamValue for String {
	fn from_param(value: ParamValue) -> Option<Self> {
		match value {
			ParamValue::String(s) => Some(s),
			_ => None,
		}
	}

	fn expected() -> &'static str {
		ParamType::String.name()
	}
}

impl FromParamValue for Vec<ParamValue> {
	fn from_param(value: ParamValue) -> Option<Self> {
		match value {
			ParamValue::List(items) => Some(items),
			_ => None,
		}
	}

	fn expected() -> &'static str {
		ParamType::List.name()
	}
}

impl FromParamValue for ParamValue {
	fn from_param(value: ParamValue) -> Option<Self> {
		Some(value)
	}

	fn expected() -> &'static str {
		"any"
	}
}

/// `Null` maps to `None`; anything else must match `T`.
impl<T: FromParamValue> FromParamValue for Option<T> {
	fn from_param(value: ParamValue) -> Option<Self> {
		match value {
			ParamValue::Null => Some(None),
			other => T::from_param(other).map(Some),
		}
	}

	fn expected() -> &'static str {
		T::expected()
	}
}
