//! Parameter declarations.

use crate::error::HandlerError;
use crate::instance::Instance;
use crate::value::{ExpectedType, ParamType, ParamValue, TypePredicate};

/// Handler invoked with the instance under construction and the working value.
///
/// Sibling parameters this one depends on are already resolved on the
/// instance when the handler runs.
pub type ParamHandler = fn(&Instance, &ParamValue) -> Result<HandlerOutcome, HandlerError>;

/// Validator run after the type check and before the handler.
pub type ValueValidator = fn(&ParamValue) -> Result<(), String>;

/// Result of a successful handler call.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
	/// Store the working value unchanged.
	PassThrough,
	/// Store this value instead.
	Replace(ParamValue),
}

impl HandlerOutcome {
	pub fn replace(value: impl Into<ParamValue>) -> Self {
		HandlerOutcome::Replace(value.into())
	}
}

/// Stock handler that stores the working value unchanged.
pub fn pass_through(_: &Instance, _: &ParamValue) -> Result<HandlerOutcome, HandlerError> {
	Ok(HandlerOutcome::PassThrough)
}

/// Declaration of a single keyword parameter.
///
/// Parameters are required unless [`default`](Self::default) or
/// [`optional`](Self::optional) is used.
///
/// ```
/// use deconf::{HandlerOutcome, ParamSpec, ParamType};
///
/// let age = ParamSpec::new("age").expect(ParamType::Int);
/// let can_vote = ParamSpec::new("can_vote")
/// 	.optional()
/// 	.depends_on(["age"])
/// 	.handler(|inst, _| Ok(HandlerOutcome::replace(inst.int("age")? >= 18)));
/// assert!(age.is_required());
/// assert!(!can_vote.is_required());
/// ```
#[derive(Clone)]
pub struct ParamSpec {
	pub name: String,
	pub handler: ParamHandler,
	pub required: bool,
	pub default: Option<ParamValue>,
	pub depends_on: Vec<String>,
	pub expected_type: Option<ExpectedType>,
	pub validator: Option<ValueValidator>,
	/// Accept [`ParamValue::Null`] without running the type check or validator.
	pub nullable: bool,
	pub description: &'static str,
}

impl core::fmt::Debug for ParamSpec {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ParamSpec")
			.field("name", &self.name)
			.field("required", &self.required)
			.field("default", &self.default)
			.field("depends_on", &self.depends_on)
			.field("expected_type", &self.expected_type.map(|t| t.to_string()))
			.field("nullable", &self.nullable)
			.field("description", &self.description)
			.finish_non_exhaustive()
	}
}

impl ParamSpec {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			handler: pass_through,
			required: true,
			default: None,
			depends_on: Vec::new(),
			expected_type: None,
			validator: None,
			nullable: false,
			description: "",
		}
	}

	pub fn handler(mut self, handler: ParamHandler) -> Self {
		self.handler = handler;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Marks the parameter as not required; absent values resolve to the
	/// default, or [`ParamValue::Null`] when none is set.
	///
	/// That `Null` is still type-checked. Combine with
	/// [`nullable`](Self::nullable) when a typed parameter may be left unset.
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	/// Lets [`ParamValue::Null`] through whether it was supplied or defaulted.
	///
	/// The expected type and validator only see non-null values.
	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	/// Sets the value used when the parameter is absent.
	pub fn default(mut self, value: impl Into<ParamValue>) -> Self {
		self.default = Some(value.into());
		self.required = false;
		self
	}

	/// Declares parameters that must be resolved before this one, in order.
	pub fn depends_on<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.depends_on = names.into_iter().map(Into::into).collect();
		self
	}

	pub fn expect(mut self, ty: ParamType) -> Self {
		self.expected_type = Some(ExpectedType::Is(ty));
		self
	}

	pub fn expect_one_of(mut self, tys: &'static [ParamType]) -> Self {
		self.expected_type = Some(ExpectedType::OneOf(tys));
		self
	}

	pub fn expect_with(mut self, name: &'static str, check: TypePredicate) -> Self {
		self.expected_type = Some(ExpectedType::Custom { name, check });
		self
	}

	pub fn validator(mut self, validator: ValueValidator) -> Self {
		self.validator = Some(validator);
		self
	}

	pub fn describe(mut self, description: &'static str) -> Self {
		self.description = description;
		self
	}

	/// Returns true if construction fails when the parameter is absent.
	pub fn is_required(&self) -> bool {
		self.required && self.default.is_none()
	}

	/// Value used when the parameter is absent, or `None` if it is required.
	pub fn fallback(&self) -> Option<ParamValue> {
		if self.is_required() {
			return None;
		}
		Some(self.default.clone().unwrap_or_default())
	}
}
