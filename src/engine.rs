//! The rule-scan validation engine.
//!
//! A linear scan over the schema with fail-fast semantics: the first rule
//! that rejects ends the call. The input map is never mutated; coerced
//! values are written into a fresh copy that is returned on full success,
//! with undeclared keys carried through untouched.

use serde_json::{Map, Value};

use crate::coerce::coerce;
use crate::error::ValidateError;
use crate::schema::{ParamType, Rule, Schema};

/// Applies `schema` to a decoded parameter map.
///
/// Per rule, in order: presence check, optional coercion, type check,
/// then the `validator` and `custom_validator` predicates as independent
/// gates. Evaluation stops at the first failure; no errors are aggregated.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use typed_params::{ParamType, Rule, Schema, validate_params};
///
/// let schema = Schema::from(vec![
/// 	Rule::new("email", ParamType::String),
/// 	Rule::new("age", ParamType::Integer).coerce(true),
/// ]);
/// let params = json!({"email": "a@b.com", "age": "30"});
///
/// let validated = validate_params(params.as_object().unwrap(), &schema).unwrap();
/// assert_eq!(validated["email"], json!("a@b.com"));
/// assert_eq!(validated["age"], json!(30));
/// ```
pub fn validate_params(
	params: &Map<String, Value>,
	schema: &Schema,
) -> Result<Map<String, Value>, ValidateError> {
	let mut validated = params.clone();

	for rule in schema.rules() {
		let Some(current) = validated.get(rule.name()) else {
			if rule.is_optional() {
				continue;
			}
			return Err(missing(rule));
		};
		if is_falsy_missing(current, rule.ty()) {
			if rule.is_optional() {
				continue;
			}
			return Err(missing(rule));
		}

		let value = if rule.coerce {
			coerce(current, rule.ty())
		} else {
			current.clone()
		};

		if !rule.ty().matches(&value) {
			tracing::debug!(param = rule.name(), expected = %rule.ty(), "type check failed");
			return Err(ValidateError::WrongType {
				name: rule.name().to_string(),
				expected: rule.ty(),
			});
		}

		// Independent gates: both run, first failure wins.
		for pred in [&rule.validator, &rule.custom_validator] {
			if let Some(pred) = pred
				&& !pred(&value)
			{
				let msg = rule
					.fail_msg
					.clone()
					.unwrap_or_else(|| format!("{} failed to validate", rule.name()));
				return Err(ValidateError::FailedValidation(msg));
			}
		}

		validated.insert(rule.name().to_string(), value);
	}

	Ok(validated)
}

fn missing(rule: &Rule) -> ValidateError {
	tracing::debug!(param = rule.name(), "required param missing");
	ValidateError::MissingParam(rule.name().to_string())
}

/// A value counts as missing when falsy, except for the type-specific
/// falsy-but-valid cases: an actual boolean for boolean-typed rules
/// (including `false`) and any number for number/integer-typed rules
/// (including `0`).
fn is_falsy_missing(value: &Value, ty: ParamType) -> bool {
	match value {
		Value::Bool(_) if ty == ParamType::Boolean => false,
		Value::Number(_) if matches!(ty, ParamType::Number | ParamType::Integer) => false,
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
		Value::String(s) => s.is_empty(),
		Value::Object(_) | Value::Array(_) => false,
	}
}
