//! Parameter schema: rule records and their normalization.
//!
//! Rules arrive in two surface forms. In code, [`Rule::new`] plus builder
//! methods produce the canonical record directly. As JSON data, a rule is
//! either a shorthand single-pair object (`{"email": "string"}`) or a full
//! descriptor (`{"name": "age", "type": "integer", "coerce": true}`); both
//! are normalized once by [`Rule::from_value`], so the validation engine
//! only ever sees the canonical shape.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use crate::error::SchemaError;

/// Boolean predicate over a decoded parameter value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Supported parameter types.
///
/// Governs both optional coercion and the type check. Any other tag in a
/// rule is a configuration error, not a per-request rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
	String,
	Object,
	Array,
	Number,
	Integer,
	Boolean,
}

impl ParamType {
	/// Checks a decoded value against this type.
	///
	/// `Integer` is satisfied by any numeric value; no integrality test is
	/// enforced. Legacy behavior that schema authors rely on, kept as-is.
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use typed_params::ParamType;
	///
	/// assert!(ParamType::String.matches(&json!("hello")));
	/// assert!(ParamType::Integer.matches(&json!(1.5)));
	/// assert!(!ParamType::Boolean.matches(&json!("true")));
	/// ```
	pub fn matches(&self, value: &Value) -> bool {
		match self {
			Self::String => value.is_string(),
			Self::Object => value.is_object(),
			Self::Array => value.is_array(),
			Self::Number | Self::Integer => value.is_number(),
			Self::Boolean => value.is_boolean(),
		}
	}

	/// The lowercase tag used in schemas and messages.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Object => "object",
			Self::Array => "array",
			Self::Number => "number",
			Self::Integer => "integer",
			Self::Boolean => "boolean",
		}
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ParamType {
	type Err = SchemaError;

	/// # Examples
	///
	/// ```
	/// use typed_params::ParamType;
	///
	/// assert_eq!("integer".parse::<ParamType>().unwrap(), ParamType::Integer);
	/// assert!("float".parse::<ParamType>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"string" => Ok(Self::String),
			"object" => Ok(Self::Object),
			"array" => Ok(Self::Array),
			"number" => Ok(Self::Number),
			"integer" => Ok(Self::Integer),
			"boolean" => Ok(Self::Boolean),
			other => Err(SchemaError::UnsupportedType(other.to_string())),
		}
	}
}

/// One schema entry describing an expected parameter.
#[derive(Clone)]
pub struct Rule {
	pub(crate) name: String,
	pub(crate) ty: ParamType,
	pub(crate) coerce: bool,
	pub(crate) optional: bool,
	pub(crate) validator: Option<Predicate>,
	pub(crate) custom_validator: Option<Predicate>,
	pub(crate) fail_msg: Option<String>,
}

impl Rule {
	/// Creates a required, non-coercing rule for `name` with the given type.
	///
	/// # Examples
	///
	/// ```
	/// use typed_params::{ParamType, Rule};
	///
	/// let rule = Rule::new("email", ParamType::String);
	/// assert_eq!(rule.name(), "email");
	/// assert_eq!(rule.ty(), ParamType::String);
	/// ```
	pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
		Self {
			name: name.into(),
			ty,
			coerce: false,
			optional: false,
			validator: None,
			custom_validator: None,
			fail_msg: None,
		}
	}

	/// Enables best-effort conversion of the raw value before the type check.
	pub fn coerce(mut self, coerce: bool) -> Self {
		self.coerce = coerce;
		self
	}

	/// Marks the parameter as optional: a missing value skips every
	/// remaining check for this rule.
	pub fn optional(mut self, optional: bool) -> Self {
		self.optional = optional;
		self
	}

	/// Attaches a validation predicate, run after the type check.
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use typed_params::{ParamType, Rule, Schema, validate_params};
	///
	/// let schema = Schema::from(vec![
	/// 	Rule::new("email", ParamType::String)
	/// 		.validator(|v| v.as_str().is_some_and(|s| s.contains('@'))),
	/// ]);
	/// let params = json!({"email": "not-an-address"});
	/// let err = validate_params(params.as_object().unwrap(), &schema).unwrap_err();
	/// assert_eq!(err.to_string(), "email failed to validate");
	/// ```
	pub fn validator(mut self, pred: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
		self.validator = Some(Arc::new(pred));
		self
	}

	/// Attaches a second, independent validation predicate.
	///
	/// Both gates run; either failing rejects the request with the same
	/// message policy.
	pub fn custom_validator(
		mut self,
		pred: impl Fn(&Value) -> bool + Send + Sync + 'static,
	) -> Self {
		self.custom_validator = Some(Arc::new(pred));
		self
	}

	/// Overrides the message used when either predicate fails.
	pub fn fail_msg(mut self, msg: impl Into<String>) -> Self {
		self.fail_msg = Some(msg.into());
		self
	}

	/// The key this rule looks up in the parameter map.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The declared parameter type.
	pub fn ty(&self) -> ParamType {
		self.ty
	}

	/// Whether a missing value is tolerated.
	pub fn is_optional(&self) -> bool {
		self.optional
	}

	/// Normalizes a JSON-shaped rule into the canonical record.
	///
	/// A single-pair object is read as shorthand (`key` is the name, its
	/// string value the type tag). Anything else must be a full descriptor
	/// with `name` and `type` fields; `coerce`, `optional` and `failMsg`
	/// are honored when present. Predicates cannot be expressed in data
	/// and are attached afterwards via the builder.
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use typed_params::{ParamType, Rule};
	///
	/// let rule = Rule::from_value(&json!({"email": "string"})).unwrap();
	/// assert_eq!(rule.name(), "email");
	///
	/// let rule = Rule::from_value(&json!({
	/// 	"name": "age", "type": "integer", "coerce": true
	/// }))
	/// .unwrap();
	/// assert_eq!(rule.ty(), ParamType::Integer);
	/// ```
	pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
		let obj = value
			.as_object()
			.ok_or_else(|| SchemaError::InvalidRule("rule must be a JSON object".to_string()))?;

		if obj.len() == 1
			&& let Some((key, tag)) = obj.iter().next()
		{
			let tag = tag.as_str().ok_or_else(|| {
				SchemaError::InvalidRule(format!("shorthand type for `{key}` must be a string"))
			})?;
			return Ok(Self::new(key.clone(), tag.parse()?));
		}

		let name = obj
			.get("name")
			.and_then(Value::as_str)
			.ok_or(SchemaError::MissingName)?;
		let tag = match obj.get("type") {
			Some(Value::String(tag)) => tag.as_str(),
			Some(other) => return Err(SchemaError::UnsupportedType(other.to_string())),
			None => return Err(SchemaError::UnsupportedType("<missing>".to_string())),
		};

		let mut rule = Self::new(name, tag.parse()?);
		rule.coerce = obj.get("coerce").and_then(Value::as_bool).unwrap_or(false);
		rule.optional = obj.get("optional").and_then(Value::as_bool).unwrap_or(false);
		rule.fail_msg = obj
			.get("failMsg")
			.and_then(Value::as_str)
			.map(str::to_owned);
		Ok(rule)
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Rule")
			.field("name", &self.name)
			.field("ty", &self.ty)
			.field("coerce", &self.coerce)
			.field("optional", &self.optional)
			.field("validator", &self.validator.is_some())
			.field("custom_validator", &self.custom_validator.is_some())
			.field("fail_msg", &self.fail_msg)
			.finish()
	}
}

/// Ordered list of rules, evaluated first to last with fail-fast semantics.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	rules: Vec<Rule>,
}

impl Schema {
	/// Creates an empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a rule, preserving evaluation order.
	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(rule);
		self
	}

	/// Normalizes a JSON array of rules (shorthand or descriptor form).
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use typed_params::{Schema, SchemaError};
	///
	/// let schema = Schema::from_value(&json!([
	/// 	{"email": "string"},
	/// 	{"name": "age", "type": "integer", "coerce": true},
	/// ]))
	/// .unwrap();
	/// assert_eq!(schema.len(), 2);
	///
	/// let err = Schema::from_value(&json!([{"type": "string", "coerce": true}])).unwrap_err();
	/// assert_eq!(err, SchemaError::MissingName);
	/// ```
	pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
		let items = value
			.as_array()
			.ok_or_else(|| SchemaError::InvalidRule("schema must be a JSON array".to_string()))?;
		items.iter().map(Rule::from_value).collect()
	}

	/// The rules in evaluation order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

impl From<Vec<Rule>> for Schema {
	fn from(rules: Vec<Rule>) -> Self {
		Self { rules }
	}
}

impl FromIterator<Rule> for Schema {
	fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
		Self {
			rules: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("string", ParamType::String)]
	#[case("object", ParamType::Object)]
	#[case("array", ParamType::Array)]
	#[case("number", ParamType::Number)]
	#[case("integer", ParamType::Integer)]
	#[case("boolean", ParamType::Boolean)]
	fn test_param_type_from_str(#[case] tag: &str, #[case] expected: ParamType) {
		assert_eq!(tag.parse::<ParamType>().unwrap(), expected);
	}

	#[rstest]
	#[case("float")]
	#[case("String")]
	#[case("")]
	fn test_param_type_unsupported_tag(#[case] tag: &str) {
		assert_eq!(
			tag.parse::<ParamType>().unwrap_err(),
			SchemaError::UnsupportedType(tag.to_string())
		);
	}

	#[rstest]
	fn test_integer_matches_any_number() {
		// Deliberate: integer mirrors number, no integrality test.
		assert!(ParamType::Integer.matches(&json!(30)));
		assert!(ParamType::Integer.matches(&json!(30.5)));
		assert!(!ParamType::Integer.matches(&json!("30")));
	}

	#[rstest]
	fn test_shorthand_normalization() {
		let rule = Rule::from_value(&json!({"email": "string"})).unwrap();
		assert_eq!(rule.name(), "email");
		assert_eq!(rule.ty(), ParamType::String);
		assert!(!rule.coerce);
		assert!(!rule.is_optional());
	}

	#[rstest]
	fn test_descriptor_normalization() {
		let rule = Rule::from_value(&json!({
			"name": "age",
			"type": "integer",
			"coerce": true,
			"optional": true,
			"failMsg": "age looks wrong",
		}))
		.unwrap();
		assert_eq!(rule.name(), "age");
		assert_eq!(rule.ty(), ParamType::Integer);
		assert!(rule.coerce);
		assert!(rule.is_optional());
		assert_eq!(rule.fail_msg.as_deref(), Some("age looks wrong"));
	}

	#[rstest]
	fn test_descriptor_missing_name_is_config_error() {
		let err = Rule::from_value(&json!({"type": "string", "coerce": true})).unwrap_err();
		assert_eq!(err, SchemaError::MissingName);
	}

	#[rstest]
	fn test_descriptor_unsupported_type_is_config_error() {
		let err = Rule::from_value(&json!({"name": "x", "type": "float"})).unwrap_err();
		assert_eq!(err, SchemaError::UnsupportedType("float".to_string()));
	}

	#[rstest]
	fn test_shorthand_with_non_string_type() {
		let err = Rule::from_value(&json!({"email": 7})).unwrap_err();
		assert!(matches!(err, SchemaError::InvalidRule(_)));
	}

	#[rstest]
	fn test_schema_from_value_preserves_order() {
		let schema = Schema::from_value(&json!([
			{"email": "string"},
			{"name": "age", "type": "integer"},
		]))
		.unwrap();
		let names: Vec<&str> = schema.rules().iter().map(Rule::name).collect();
		assert_eq!(names, ["email", "age"]);
	}

	#[rstest]
	fn test_schema_from_value_rejects_non_array() {
		let err = Schema::from_value(&json!({"email": "string"})).unwrap_err();
		assert!(matches!(err, SchemaError::InvalidRule(_)));
	}

	#[rstest]
	fn test_param_type_serde_tags_match_from_str() {
		let ty: ParamType = serde_json::from_value(json!("integer")).unwrap();
		assert_eq!(ty, ParamType::Integer);
		assert_eq!(serde_json::to_value(ParamType::Boolean).unwrap(), json!("boolean"));
		assert!(serde_json::from_value::<ParamType>(json!("float")).is_err());
	}

	#[rstest]
	fn test_rule_debug_hides_predicates() {
		let rule = Rule::new("n", ParamType::Number).validator(|v| v.is_number());
		let repr = format!("{rule:?}");
		assert!(repr.contains("validator: true"));
		assert!(repr.contains("custom_validator: false"));
	}
}
