//! Construction engine.
//!
//! Resolves every declared parameter of a [`ParamTable`] in dependency order.
//! For each parameter:
//!
//! 1. Take the supplied argument, or fall back to the default (`Null` for
//!    optional parameters without one). Required parameters with neither fail
//!    with [`ParamError::MissingRequired`].
//! 2. Check the expected type, then the validator, against that working value.
//!    `Null` skips both only on [`nullable`](ParamSpec::nullable) parameters.
//!    Neither the handler nor any later parameter runs after a failure.
//! 3. Run the handler against the partially built instance and assign either
//!    its replacement or the working value.
//!
//! The instance is only handed out once every parameter resolved.

use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::instance::{Args, Instance};
use crate::spec::{HandlerOutcome, ParamSpec};
use crate::table::ParamTable;
use crate::value::ParamValue;


/// What to do with arguments that name no declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownArgs {
	/// Skip them, logging at debug level.
	#[default]
	Ignore,
	/// Skip them, logging a warning.
	Warn,
	/// Fail with [`ParamError::UnknownArgument`].
	Reject,
}

/// Knobs for a construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructPolicy {
	pub unknown_args: UnknownArgs,
}

impl ConstructPolicy {
	/// Policy that rejects unexpected arguments.
	pub fn strict() -> Self {
		Self {
			unknown_args: UnknownArgs::Reject,
		}
	}
}

impl ParamTable {
	/// Resolves every parameter from `args` under the default policy.
	pub fn construct(&self, args: &Args) -> Result<Instance, ParamError> {
		self.construct_with(args, &ConstructPolicy::default())
	}

	/// Resolves every parameter from `args`.
	pub fn construct_with(&self, args: &Args, policy: &ConstructPolicy) -> Result<Instance, ParamError> {
		let order = self.resolution_order()?;
		self.check_unknown_args(args, policy)?;

		let mut instance = Instance::new(self.type_name(), order.len());
		for spec in order.iter().filter_map(|&i| self.spec_at(i)) {
			let value = self.resolve_param(spec, args, &instance)?;
			instance.assign(&spec.name, value);
		}
		Ok(instance)
	}

	fn check_unknown_args(&self, args: &Args, policy: &ConstructPolicy) -> Result<(), ParamError> {
		for (arg, _) in args.iter().filter(|(arg, _)| !self.contains(arg)) {
			match policy.unknown_args {
				UnknownArgs::Ignore => {
					tracing::debug!(domain = "params", type_name = self.type_name(), arg, "ignoring unknown argument");
				}
				UnknownArgs::Warn => {
					tracing::warn!(domain = "params", type_name = self.type_name(), arg, "ignoring unknown argument");
				}
				UnknownArgs::Reject => {
					return Err(ParamError::UnknownArgument {
						type_name: self.type_name(),
						arg: arg.to_string(),
					});
				}
			}
		}
		Ok(())
	}

	fn resolve_param(&self, spec: &ParamSpec, args: &Args, instance: &Instance) -> Result<ParamValue, ParamError> {
		let type_name = self.type_name();
		let (working, supplied) = match args.get(&spec.name) {
			Some(value) => (value.clone(), true),
			None => {
				let fallback = spec.fallback().ok_or_else(|| ParamError::MissingRequired {
					type_name,
					param: spec.name.clone(),
				})?;
				(fallback, false)
			}
		};

		let checked = !(spec.nullable && working.is_null());
		if let Some(expected) = spec.expected_type
			&& checked
			&& !expected.accepts(&working)
		{
			return Err(ParamError::TypeMismatch {
				type_name,
				param: spec.name.clone(),
				expected: expected.to_string(),
				got: working.type_name(),
			});
		}

		if let Some(validator) = spec.validator
			&& checked
		{
			validator(&working).map_err(|reason| ParamError::InvalidValue {
				type_name,
				param: spec.name.clone(),
				reason,
			})?;
		}

		let outcome = (spec.handler)(instance, &working).map_err(|err| {
			tracing::debug!(domain = "params", type_name, param = %spec.name, error = %err, "parameter handler failed");
			ParamError::from_handler(err)
		})?;
		let resolved = match outcome {
			HandlerOutcome::PassThrough => working,
			HandlerOutcome::Replace(value) => value,
		};
		tracing::trace!(domain = "params", type_name, param = %spec.name, supplied, value = ?resolved, "parameter resolved");
		Ok(resolved)
	}
}
