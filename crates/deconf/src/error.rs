use std::error::Error as StdError;

/// Error returned by a parameter handler.
///
/// Any error type converts into this with `?`. Boxed [`ParamError`]s are
/// unwrapped again by the engine, so a handler can fail with
/// [`ParamError::invalid`] or forward a nested construction failure as-is.
pub type HandlerError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised while resolving a dependency order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DependencyError {
	/// A `depends_on` entry names no registered parameter.
	#[error("'{type_name}' parameter '{param}' depends on unknown parameter '{missing}'")]
	Unknown {
		type_name: &'static str,
		param: String,
		missing: String,
	},
	/// A parameter transitively depends on itself.
	#[error("'{type_name}' cyclical dependency discovered while processing '{param}': {}", .chain.join(" -> "))]
	Cycle {
		type_name: &'static str,
		param: String,
		/// Cyclic path, starting and ending with the same name.
		chain: Vec<String>,
	},
}

impl DependencyError {
	/// Name of the parameter whose dependency could not be resolved.
	pub fn param(&self) -> &str {
		match self {
			DependencyError::Unknown { param, .. } | DependencyError::Cycle { param, .. } => param,
		}
	}
}

/// Errors raised while building a [`ParamTable`](crate::ParamTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("'{type_name}' declares a parameter with an empty name")]
	EmptyName { type_name: &'static str },

	/// Redeclaration under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
	#[error("'{type_name}' declares parameter '{param}' more than once")]
	Duplicate { type_name: &'static str, param: String },
}

/// Errors raised while constructing an [`Instance`](crate::Instance).
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
	#[error("'{type_name}' object missing required '{param}' parameter")]
	MissingRequired { type_name: &'static str, param: String },

	/// Read of a parameter that is not on the instance: a handler reading a
	/// sibling it does not depend on, or a name that was never declared.
	#[error("'{type_name}' parameter '{param}' has not been resolved")]
	Unresolved { type_name: &'static str, param: String },

	#[error("'{type_name}' parameter '{param}' must be {expected}, got {got}")]
	TypeMismatch {
		type_name: &'static str,
		param: String,
		expected: String,
		got: &'static str,
	},

	#[error("'{type_name}' parameter '{param}' has an invalid value: {reason}")]
	InvalidValue {
		type_name: &'static str,
		param: String,
		reason: String,
	},

	/// Argument naming no declared parameter, under [`UnknownArgs::Reject`](crate::UnknownArgs::Reject).
	#[error("'{type_name}' got an unexpected argument '{arg}'")]
	UnknownArgument { type_name: &'static str, arg: String },

	#[error(transparent)]
	Dependency(#[from] DependencyError),

	/// Error raised by a handler, surfaced with its own message and source chain.
	#[error(transparent)]
	Handler(HandlerError),
}

impl ParamError {
	/// Builds an [`InvalidValue`](ParamError::InvalidValue) error for use inside handlers.
	pub fn invalid(type_name: &'static str, param: impl Into<String>, reason: impl Into<String>) -> Self {
		ParamError::InvalidValue {
			type_name,
			param: param.into(),
			reason: reason.into(),
		}
	}

	/// Returns the offending parameter or argument name, if the error carries one.
	pub fn param(&self) -> Option<&str> {
		match self {
			ParamError::MissingRequired { param, .. }
			| ParamError::Unresolved { param, .. }
			| ParamError::TypeMismatch { param, .. }
			| ParamError::InvalidValue { param, .. } => Some(param),
			ParamError::UnknownArgument { arg, .. } => Some(arg),
			ParamError::Dependency(err) => Some(err.param()),
			ParamError::Handler(_) => None,
		}
	}

	/// Returns the handler's original error if it is of type `E`.
	pub fn downcast_handler<E: StdError + 'static>(&self) -> Option<&E> {
		match self {
			ParamError::Handler(err) => err.downcast_ref::<E>(),
			_ => None,
		}
	}

	/// Lifts a handler failure, unwrapping boxed `ParamError`s.
	pub(crate) fn from_handler(err: HandlerError) -> Self {
		match err.downcast::<ParamError>() {
			Ok(inner) => *inner,
			Err(other) => ParamError::Handler(other),
		}
	}
}
