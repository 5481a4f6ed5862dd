//! Declarative keyword-parameter resolution.
//!
//! A configurable type declares its keyword parameters once, in a
//! [`ParamTable`]. Each [`ParamSpec`] names a handler, whether the parameter is
//! required, its default, its expected type, and the parameters it depends on.
//! Constructing from [`Args`] resolves every parameter in dependency order and
//! yields an [`Instance`], which [`Configurable`] types turn into their own
//! struct.
//!
//! # Modules
//!
//! - [`value`] - Dynamic values, type tags and type checks
//! - [`spec`] - Parameter declarations and handlers
//! - [`table`] - Per-type parameter tables and inheritance
//! - [`engine`] - Construction policy and the resolution loop
//! - [`error`] - Error taxonomy

mod configurable;
pub mod engine;
pub mod error;
mod instance;
mod order;
pub mod spec;
pub mod table;
pub mod value;

pub use configurable::Configurable;
pub use engine::{ConstructPolicy, UnknownArgs};
pub use error::{DependencyError, HandlerError, ParamError, RegistryError};
pub use instance::{Args, Instance};
pub use spec::{HandlerOutcome, ParamHandler, ParamSpec, ValueValidator, pass_through};
pub use table::{DuplicatePolicy, InsertAction, ParamTable, TableBuilder};
pub use value::{ExpectedType, FromParamValue, ParamType, ParamValue, TypePredicate};
