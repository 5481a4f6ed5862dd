use rstest::rstest;

use super::*;

#[rstest]
#[case(ParamValue::Null, ParamType::Null)]
#[case(ParamValue::Bool(false), ParamType::Bool)]
#[case(ParamValue::Int(0), ParamType::Int)]
#[case(ParamValue::Float(0.0), ParamType::Float)]
#[case(ParamValue::String(String::new()), ParamType::String)]
#[case(ParamValue::List(vec![]), ParamType::List)]
fn param_type_tags(#[case] value: ParamValue, #[case] expected: ParamType) {
	assert_eq!(value.param_type(), expected);
	assert!(value.matches_type(expected));
}

#[test]
fn int_and_bool_do_not_satisfy_each_other() {
	let int = ExpectedType::Is(ParamType::Int);
	let boolean = ExpectedType::Is(ParamType::Bool);

	assert!(!int.accepts(&ParamValue::Bool(true)));
	assert!(!boolean.accepts(&ParamValue::Int(1)));
	assert!(!ExpectedType::Is(ParamType::Float).accepts(&ParamValue::Int(1)));
}

#[test]
fn one_of_accepts_any_listed_tag() {
	const NUMBER: &[ParamType] = &[ParamType::Int, ParamType::Float];
	let ty = ExpectedType::OneOf(NUMBER);

	assert!(ty.accepts(&ParamValue::Int(3)));
	assert!(ty.accepts(&ParamValue::Float(3.5)));
	assert!(!ty.accepts(&ParamValue::from("3")));
	assert_eq!(ty.to_string(), "int | float");
}

#[test]
fn custom_predicate_is_named_in_display() {
	fn is_int_list(v: &ParamValue) -> bool {
		v.as_list()
			.is_some_and(|items| items.iter().all(|i| i.matches_type(ParamType::Int)))
	}
	let ty = ExpectedType::Custom {
		name: "list<int>",
		check: is_int_list,
	};

	assert!(ty.accepts(&ParamValue::from(vec![1i64, 2, 3])));
	assert!(!ty.accepts(&ParamValue::from(vec!["a"])));
	assert_eq!(ty.to_string(), "list<int>");
}

#[test]
fn option_conversion_maps_none_to_null() {
	assert_eq!(ParamValue::from(None::<i64>), ParamValue::Null);
	assert_eq!(ParamValue::from(Some("x")), ParamValue::String("x".into()));
}

#[test]
fn from_param_extracts_matching_shapes_only() {
	assert_eq!(i64::from_param(ParamValue::Int(7)), Some(7));
	assert_eq!(i64::from_param(ParamValue::from("7")), None);
	assert_eq!(String::from_param(ParamValue::from("")), Some(String::new()));
	assert_eq!(Option::<bool>::from_param(ParamValue::Null), Some(None));
	assert_eq!(Option::<bool>::from_param(ParamValue::Bool(false)), Some(Some(false)));
	assert_eq!(Option::<bool>::from_param(ParamValue::Int(0)), None);
}

#[test]
fn values_deserialize_untagged() {
	let value: ParamValue = serde_json::from_str(r#"[null, true, 3, 1.5, "x"]"#).expect("valid json");
	assert_eq!(
		value,
		ParamValue::List(vec![
			ParamValue::Null,
			ParamValue::Bool(true),
			ParamValue::Int(3),
			ParamValue::Float(1.5),
			ParamValue::String("x".into()),
		])
	);
}
