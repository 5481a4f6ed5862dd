use pretty_assertions::assert_eq;

use super::*;
use crate::spec::HandlerOutcome;
use crate::value::{ParamType, ParamValue};
use crate::{Args, HandlerError, Instance};

fn shout(_: &Instance, value: &ParamValue) -> Result<HandlerOutcome, HandlerError> {
	Ok(HandlerOutcome::replace(value.as_str().unwrap_or_default().to_uppercase()))
}

fn base() -> ParamTable {
	ParamTable::builder("Base")
		.param(ParamSpec::new("name"))
		.param(ParamSpec::new("level").default(1))
		.build()
		.unwrap()
}

#[test]
fn builder_keeps_declaration_order() {
	let table = ParamTable::builder("T")
		.param(ParamSpec::new("b"))
		.param(ParamSpec::new("a"))
		.param(ParamSpec::new("c"))
		.build()
		.unwrap();

	assert_eq!(table.names().collect::<Vec<_>>(), ["b", "a", "c"]);
	assert_eq!(table.len(), 3);
	assert!(table.contains("a"));
	assert!(table.get("z").is_none());
}

#[test]
fn redeclaration_last_wins_in_place() {
	let mut builder = ParamTable::builder("T");
	assert_eq!(builder.insert(ParamSpec::new("name")), InsertAction::InsertedNew);
	assert_eq!(builder.insert(ParamSpec::new("other")), InsertAction::InsertedNew);
	assert_eq!(
		builder.insert(ParamSpec::new("name").handler(shout).expect(ParamType::String)),
		InsertAction::ReplacedExisting
	);
	let table = builder.build().unwrap();

	assert_eq!(table.names().collect::<Vec<_>>(), ["name", "other"]);
	let inst = table.construct(&Args::new().with("name", "ada").with("other", 1)).unwrap();
	assert_eq!(inst.str("name").unwrap(), "ADA");
}

#[test]
fn first_wins_policy_keeps_original() {
	let mut builder = ParamTable::builder("T").duplicate_policy(DuplicatePolicy::FirstWins);
	builder.insert(ParamSpec::new("name"));
	assert_eq!(builder.insert(ParamSpec::new("name").handler(shout)), InsertAction::KeptExisting);
	let table = builder.build().unwrap();

	let inst = table.construct(&Args::new().with("name", "ada")).unwrap();
	assert_eq!(inst.str("name").unwrap(), "ada");
}

#[test]
fn reject_policy_fails_build() {
	let err = ParamTable::builder("T")
		.duplicate_policy(DuplicatePolicy::Reject)
		.param(ParamSpec::new("name"))
		.param(ParamSpec::new("name"))
		.build()
		.unwrap_err();

	assert_eq!(
		err,
		RegistryError::Duplicate {
			type_name: "T",
			param: "name".into(),
		}
	);
}

#[test]
fn empty_name_fails_build() {
	let err = ParamTable::builder("T").param(ParamSpec::new("")).build().unwrap_err();
	assert_eq!(err, RegistryError::EmptyName { type_name: "T" });
}

#[test]
fn extends_accumulates_parent_params() {
	let parent = base();
	let child = ParamTable::builder("Child")
		.extends(&parent)
		.param(ParamSpec::new("extra").optional())
		.build()
		.unwrap();

	assert_eq!(child.names().collect::<Vec<_>>(), ["name", "level", "extra"]);
	assert_eq!(parent.len(), 2, "parent is untouched");
}

#[test]
fn child_overrides_parent_by_name() {
	let parent = base();
	let child = ParamTable::builder("Child")
		.extends(&parent)
		.param(ParamSpec::new("level").default(5))
		.build()
		.unwrap();

	assert_eq!(child.names().collect::<Vec<_>>(), ["name", "level"]);
	let inst = child.construct(&Args::new().with("name", "x")).unwrap();
	assert_eq!(inst.int("level").unwrap(), 5);

	let inst = parent.construct(&Args::new().with("name", "x")).unwrap();
	assert_eq!(inst.int("level").unwrap(), 1);
}

#[test]
fn declarations_made_before_extends_are_kept() {
	let child = ParamTable::builder("Child")
		.param(ParamSpec::new("level").default(9))
		.extends(&base())
		.build()
		.unwrap();

	assert_eq!(child.names().collect::<Vec<_>>(), ["level", "name"]);
	assert_eq!(child.get("level").and_then(|s| s.default.clone()), Some(ParamValue::Int(9)));
}

#[test]
fn unknown_dependency_is_not_a_build_error() {
	let table = ParamTable::builder("T")
		.param(ParamSpec::new("a").depends_on(["later"]))
		.build()
		.expect("dependencies are checked lazily");

	let err = table.validate().unwrap_err();
	assert_eq!(err.param(), "a");
}

#[test]
fn dependency_failure_is_cached() {
	let table = ParamTable::builder("T")
		.param(ParamSpec::new("a").depends_on(["b"]))
		.param(ParamSpec::new("b").depends_on(["a"]))
		.build()
		.unwrap();

	let first = table.validate().unwrap_err();
	let second = table.resolution_order().unwrap_err();
	assert_eq!(first, second);
}

#[test]
fn resolution_names_follow_dependencies() {
	let table = ParamTable::builder("T")
		.param(ParamSpec::new("can_vote").depends_on(["age"]))
		.param(ParamSpec::new("age"))
		.build()
		.unwrap();

	assert_eq!(table.resolution_names().unwrap(), ["age", "can_vote"]);
}

#[test]
fn duplicate_policy_deserializes_snake_case() {
	let policy: DuplicatePolicy = serde_json::from_str(r#""first_wins""#).unwrap();
	assert_eq!(policy, DuplicatePolicy::FirstWins);
}

#[test]
fn descriptions_are_kept_for_introspection() {
	let table = ParamTable::builder("T")
		.param(ParamSpec::new("port").default(80).describe("listen port"))
		.param(ParamSpec::new("host"))
		.build()
		.unwrap();

	let described: Vec<(&str, &str)> = table.specs().map(|s| (s.name.as_str(), s.description)).collect();
	assert_eq!(described, [("port", "listen port"), ("host", "")]);

	let debug = format!("{:?}", table.get("port").unwrap());
	assert!(debug.contains(r#"description: "listen port""#), "{debug}");
}
