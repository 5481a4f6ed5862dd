//! Per-type parameter tables.
//!
//! A [`ParamTable`] is the registry of one configurable type: its declared
//! [`ParamSpec`]s in declaration order plus the cached resolution order. Tables
//! are assembled once through [`TableBuilder`], usually inside a `static
//! LazyLock`, and are read-only afterwards.
//!
//! # Redeclaration
//!
//! Declaring a name twice is resolved by [`DuplicatePolicy`]. The default,
//! [`DuplicatePolicy::LastWins`], keeps the original position and replaces the
//! declaration, which is also how a child table overrides an inherited
//! parameter.
//!
//! # Inheritance
//!
//! [`TableBuilder::extends`] copies a parent's declarations before the child's
//! own, so the effective table accumulates along the chain.

use std::sync::OnceLock;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

use crate::error::{DependencyError, RegistryError};
use crate::order;
use crate::spec::ParamSpec;

#[cfg(test)]
mod tests;

/// How a redeclared parameter name is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// Overwrite with the last declaration seen.
	#[default]
	LastWins,
	/// Keep the first declaration seen.
	FirstWins,
	/// Fail the build.
	Reject,
}

/// Result of a declaration insert.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Name was new; declaration inserted.
	InsertedNew,
	/// Name existed; kept the existing declaration.
	KeptExisting,
	/// Name existed; replaced with the new declaration.
	ReplacedExisting,
}

/// Registry of the parameters declared by one configurable type.
pub struct ParamTable {
	type_name: &'static str,
	specs: IndexMap<String, ParamSpec>,
	order: OnceLock<Result<Box<[usize]>, DependencyError>>,
}

impl core::fmt::Debug for ParamTable {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ParamTable")
			.field("type_name", &self.type_name)
			.field("params", &self.specs.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl ParamTable {
	pub fn builder(type_name: &'static str) -> TableBuilder {
		TableBuilder::new(type_name)
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn get(&self, name: &str) -> Option<&ParamSpec> {
		self.specs.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.specs.contains_key(name)
	}

	/// Declarations in declaration order.
	pub fn specs(&self) -> impl Iterator<Item = &ParamSpec> {
		self.specs.values()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.specs.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.specs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.specs.is_empty()
	}

	/// Returns declaration indices in resolution order.
	///
	/// Computed on first use and cached, including a failure: a table with an
	/// unknown dependency or a cycle stays unusable.
	pub fn resolution_order(&self) -> Result<&[usize], DependencyError> {
		self.order
			.get_or_init(|| {
				let specs: Vec<&ParamSpec> = self.specs.values().collect();
				order::resolve(self.type_name, &specs).map(Vec::into_boxed_slice)
			})
			.as_deref()
			.map_err(Clone::clone)
	}

	/// Parameter names in resolution order.
	pub fn resolution_names(&self) -> Result<Vec<&str>, DependencyError> {
		Ok(self
			.resolution_order()?
			.iter()
			.filter_map(|&i| self.spec_at(i))
			.map(|spec| spec.name.as_str())
			.collect())
	}

	/// Checks the dependency graph eagerly instead of at first construction.
	pub fn validate(&self) -> Result<(), DependencyError> {
		self.resolution_order().map(|_| ())
	}

	pub(crate) fn spec_at(&self, index: usize) -> Option<&ParamSpec> {
		self.specs.get_index(index).map(|(_, spec)| spec)
	}
}

/// Builder for a [`ParamTable`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
	type_name: &'static str,
	specs: IndexMap<String, ParamSpec>,
	policy: DuplicatePolicy,
	duplicate: Option<String>,
}

impl TableBuilder {
	pub fn new(type_name: &'static str) -> Self {
		Self {
			type_name,
			specs: IndexMap::new(),
			policy: DuplicatePolicy::default(),
			duplicate: None,
		}
	}

	/// Sets how redeclared names are handled.
	pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Copies every declaration of `parent`, in its declaration order.
	///
	/// Names the builder already declares are not overwritten; declarations
	/// made afterwards override inherited ones under the builder's policy.
	pub fn extends(mut self, parent: &ParamTable) -> Self {
		for spec in parent.specs() {
			self.specs
				.entry(spec.name.clone())
				.or_insert_with(|| spec.clone());
		}
		self
	}

	/// Declares a parameter.
	pub fn param(mut self, spec: ParamSpec) -> Self {
		self.insert(spec);
		self
	}

	/// Declares a parameter, reporting what happened to an existing one.
	pub fn insert(&mut self, spec: ParamSpec) -> InsertAction {
		match self.specs.entry(spec.name.clone()) {
			Entry::Vacant(slot) => {
				slot.insert(spec);
				InsertAction::InsertedNew
			}
			Entry::Occupied(mut slot) => match self.policy {
				DuplicatePolicy::LastWins => {
					tracing::debug!(
						domain = "params",
						type_name = self.type_name,
						param = %spec.name,
						"parameter redeclared; later declaration wins",
					);
					slot.insert(spec);
					InsertAction::ReplacedExisting
				}
				DuplicatePolicy::FirstWins => InsertAction::KeptExisting,
				DuplicatePolicy::Reject => {
					if self.duplicate.is_none() {
						self.duplicate = Some(spec.name);
					}
					InsertAction::KeptExisting
				}
			},
		}
	}

	/// Finishes the table.
	///
	/// Dependency names are not checked here; see
	/// [`ParamTable::resolution_order`].
	pub fn build(self) -> Result<ParamTable, RegistryError> {
		if let Some(param) = self.duplicate {
			return Err(RegistryError::Duplicate {
				type_name: self.type_name,
				param,
			});
		}
		if self.specs.keys().any(|name| name.is_empty()) {
			return Err(RegistryError::EmptyName {
				type_name: self.type_name,
			});
		}
		tracing::trace!(
			domain = "params",
			type_name = self.type_name,
			count = self.specs.len(),
			"parameter table built",
		);
		Ok(ParamTable {
			type_name: self.type_name,
			specs: self.specs,
			order: OnceLock::new(),
		})
	}
}
