//! Body decoders for the supported content encodings.

use serde_json::{Map, Value};

use crate::error::ValidateError;

/// Decodes a fully buffered request body into a parameter map.
pub trait Parser {
	/// The full MIME string this parser handles.
	fn media_type(&self) -> &'static str;

	/// Decodes `body` into a flat key-value parameter map.
	fn parse(&self, body: &[u8]) -> Result<Map<String, Value>, ValidateError>;
}

/// Parser for `application/x-www-form-urlencoded` bodies.
///
/// Standard query-string semantics: values are strings and duplicate keys
/// fold into arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormParser;

impl Parser for FormParser {
	fn media_type(&self) -> &'static str {
		"application/x-www-form-urlencoded"
	}

	fn parse(&self, body: &[u8]) -> Result<Map<String, Value>, ValidateError> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
			.map_err(|err| ValidateError::Decode(Box::new(err)))?;

		let mut params = Map::new();
		for (key, value) in pairs {
			match params.get_mut(&key) {
				None => {
					params.insert(key, Value::String(value));
				}
				Some(Value::Array(items)) => items.push(Value::String(value)),
				Some(existing) => {
					let first = existing.take();
					*existing = Value::Array(vec![first, Value::String(value)]);
				}
			}
		}
		Ok(params)
	}
}

/// Strict parser for `application/json` bodies.
///
/// The top level must be a JSON object; anything else (including an empty
/// body) surfaces the parse error as [`ValidateError::Decode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JSONParser;

impl Parser for JSONParser {
	fn media_type(&self) -> &'static str {
		"application/json"
	}

	fn parse(&self, body: &[u8]) -> Result<Map<String, Value>, ValidateError> {
		serde_json::from_slice(body).map_err(ValidateError::from)
	}
}
