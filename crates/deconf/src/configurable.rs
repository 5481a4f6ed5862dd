use crate::engine::ConstructPolicy;
use crate::error::ParamError;
use crate::instance::{Args, Instance};
use crate::table::ParamTable;

/// A type whose construction is driven by a [`ParamTable`].
///
/// ```
/// use std::sync::LazyLock;
///
/// use deconf::{Args, Configurable, Instance, ParamError, ParamSpec, ParamTable, ParamType};
///
/// struct Server {
/// 	host: String,
/// 	port: i64,
/// }
///
/// static SERVER: LazyLock<ParamTable> = LazyLock::new(|| {
/// 	ParamTable::builder("Server")
/// 		.param(ParamSpec::new("host").default("localhost"))
/// 		.param(ParamSpec::new("port").expect(ParamType::Int))
/// 		.build()
/// 		.expect("valid table")
/// });
///
/// impl Configurable for Server {
/// 	fn params() -> &'static ParamTable {
/// 		&SERVER
/// 	}
///
/// 	fn from_instance(mut inst: Instance) -> Result<Self, ParamError> {
/// 		Ok(Self {
/// 			host: inst.take("host")?,
/// 			port: inst.take("port")?,
/// 		})
/// 	}
/// }
///
/// let server = Server::configure(&Args::new().with("port", 8080)).unwrap();
/// assert_eq!((server.host.as_str(), server.port), ("localhost", 8080));
/// ```
pub trait Configurable: Sized {
	/// The type's parameter table.
	fn params() -> &'static ParamTable;

	/// Builds the type from a fully resolved instance.
	fn from_instance(instance: Instance) -> Result<Self, ParamError>;

	/// Resolves `args` against [`params`](Self::params) and builds the type.
	fn configure(args: &Args) -> Result<Self, ParamError> {
		Self::configure_with(args, &ConstructPolicy::default())
	}

	fn configure_with(args: &Args, policy: &ConstructPolicy) -> Result<Self, ParamError> {
		let instance = Self::params().construct_with(args, policy)?;
		Self::from_instance(instance)
	}
}
