//! Best-effort value coercion toward a rule's declared type.
//!
//! Coercion never fails: an unconvertible value passes through unchanged
//! and the subsequent type check rejects it. All conversions are stable,
//! so re-coercing an already coerced value is a no-op.

use serde_json::{Number, Value};

use crate::schema::ParamType;

/// Converts `value` toward `ty` where a sensible conversion exists.
pub(crate) fn coerce(value: &Value, ty: ParamType) -> Value {
	match ty {
		ParamType::String => coerce_string(value),
		ParamType::Number | ParamType::Integer => coerce_number(value),
		ParamType::Boolean => coerce_boolean(value),
		// No sensible scalar conversion exists for compound types.
		ParamType::Object | ParamType::Array => value.clone(),
	}
}

fn coerce_string(value: &Value) -> Value {
	match value {
		Value::Number(n) => Value::String(n.to_string()),
		other => other.clone(),
	}
}

fn coerce_number(value: &Value) -> Value {
	match value {
		Value::Number(_) => value.clone(),
		Value::String(s) => {
			let s = s.trim();
			if let Ok(i) = s.parse::<i64>() {
				Value::Number(Number::from(i))
			} else if let Ok(f) = s.parse::<f64>()
				&& let Some(n) = Number::from_f64(f)
			{
				Value::Number(n)
			} else {
				value.clone()
			}
		}
		Value::Bool(b) => Value::Number(Number::from(i64::from(*b))),
		other => other.clone(),
	}
}

fn coerce_boolean(value: &Value) -> Value {
	// Only the literal string "true" (or an actual true) coerces to true.
	let truthy = matches!(value, Value::Bool(true))
		|| matches!(value, Value::String(s) if s == "true");
	Value::Bool(truthy)
}
