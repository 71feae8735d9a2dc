//! The validator façade: content-type gate, body collection, decoding,
//! then the rule-scan engine.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::collector::BodyCollector;
use crate::engine::validate_params;
use crate::error::{SchemaError, ValidateError};
use crate::parsers::{FormParser, JSONParser, Parser};
use crate::request::Request;
use crate::schema::Schema;

/// Default body-size ceiling in bytes.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1_000_000;

/// The content encodings a validator can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
	/// `application/x-www-form-urlencoded`
	Form,
	/// `application/json`
	Json,
}

impl ContentType {
	/// The full MIME string the request header must exactly match.
	pub fn as_mime(&self) -> &'static str {
		match self {
			Self::Form => FormParser.media_type(),
			Self::Json => JSONParser.media_type(),
		}
	}
}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_mime())
	}
}

impl FromStr for ContentType {
	type Err = SchemaError;

	/// Accepts the short tags and the full MIME strings.
	///
	/// # Examples
	///
	/// ```
	/// use typed_params::ContentType;
	///
	/// assert_eq!("form".parse::<ContentType>().unwrap(), ContentType::Form);
	/// assert_eq!(
	/// 	"application/json".parse::<ContentType>().unwrap(),
	/// 	ContentType::Json
	/// );
	/// assert!("text/xml".parse::<ContentType>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"form" | "application/x-www-form-urlencoded" => Ok(Self::Form),
			"json" | "application/json" => Ok(Self::Json),
			other => Err(SchemaError::UnsupportedContentType(other.to_string())),
		}
	}
}

/// Validates request bodies against a parameter schema.
///
/// Configuration is fixed at construction and read-only afterwards, so a
/// single instance (or an `Arc` of one) is freely shared across
/// concurrent requests; each [`validate`](Self::validate) call owns its
/// own buffer and parameter map.
///
/// # Examples
///
/// ```
/// use typed_params::{ContentType, RequestValidator};
///
/// let validator = RequestValidator::new(ContentType::Json).with_max_body_size(64 * 1024);
/// assert_eq!(validator.max_body_size(), 65536);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestValidator {
	content_type: ContentType,
	max_body_size: usize,
}

impl RequestValidator {
	/// Creates a validator for the given encoding with the default
	/// 1,000,000-byte body ceiling.
	pub fn new(content_type: ContentType) -> Self {
		Self {
			content_type,
			max_body_size: DEFAULT_MAX_BODY_SIZE,
		}
	}

	/// Creates a validator from a content-type tag.
	///
	/// Anything but `form`, `json` or their full MIME strings is a
	/// configuration error, reported here rather than at request time.
	///
	/// # Examples
	///
	/// ```
	/// use typed_params::RequestValidator;
	///
	/// assert!(RequestValidator::from_content_type("form").is_ok());
	/// assert!(RequestValidator::from_content_type("multipart/form-data").is_err());
	/// ```
	pub fn from_content_type(tag: &str) -> Result<Self, SchemaError> {
		Ok(Self::new(tag.parse()?))
	}

	/// Overrides the body-size ceiling.
	pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
		self.max_body_size = max_body_size;
		self
	}

	pub fn content_type(&self) -> ContentType {
		self.content_type
	}

	pub fn max_body_size(&self) -> usize {
		self.max_body_size
	}

	/// Compares the request's declared content type against the
	/// configured one. Exact string match, no charset or parameter
	/// tolerance; a missing header is a mismatch.
	pub fn check_content_type(&self, request: &Request) -> Result<(), ValidateError> {
		match request.content_type() {
			Some(declared) if declared == self.content_type.as_mime() => Ok(()),
			declared => {
				tracing::debug!(?declared, expected = %self.content_type, "content type mismatch");
				Err(ValidateError::ContentType {
					expected: self.content_type.as_mime().to_string(),
				})
			}
		}
	}

	/// Validates a request body against `schema`.
	///
	/// Checks the content type before reading any body data, collects the
	/// stream under the size ceiling, decodes the buffer, and runs the
	/// rule scan. Resolves with the validated (coercion-applied)
	/// parameter map, ready for direct use.
	pub async fn validate(
		&self,
		request: Request,
		schema: &Schema,
	) -> Result<Map<String, Value>, ValidateError> {
		self.check_content_type(&request)?;

		let body = BodyCollector::new(self.max_body_size)
			.collect(request.into_body())
			.await?;
		let params = match self.content_type {
			ContentType::Form => FormParser.parse(&body)?,
			ContentType::Json => JSONParser.parse(&body)?,
		};

		validate_params(&params, schema)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("form", ContentType::Form)]
	#[case("application/x-www-form-urlencoded", ContentType::Form)]
	#[case("json", ContentType::Json)]
	#[case("application/json", ContentType::Json)]
	fn test_content_type_from_str(#[case] tag: &str, #[case] expected: ContentType) {
		assert_eq!(tag.parse::<ContentType>().unwrap(), expected);
	}

	#[rstest]
	#[case("multipart/form-data")]
	#[case("JSON")]
	#[case("")]
	fn test_content_type_unsupported(#[case] tag: &str) {
		assert_eq!(
			tag.parse::<ContentType>().unwrap_err(),
			SchemaError::UnsupportedContentType(tag.to_string())
		);
	}

	#[rstest]
	fn test_default_max_body_size() {
		let validator = RequestValidator::new(ContentType::Json);
		assert_eq!(validator.max_body_size(), 1_000_000);
	}

	#[rstest]
	fn test_check_content_type_exact_match_only() {
		let validator = RequestValidator::new(ContentType::Json);

		let request = Request::builder()
			.header("content-type", "application/json")
			.build()
			.unwrap();
		assert!(validator.check_content_type(&request).is_ok());

		// No charset suffix tolerance.
		let request = Request::builder()
			.header("content-type", "application/json; charset=utf-8")
			.build()
			.unwrap();
		let err = validator.check_content_type(&request).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Invalid content type: expected application/json"
		);
	}

	#[rstest]
	fn test_check_content_type_missing_header_is_mismatch() {
		let validator = RequestValidator::new(ContentType::Form);
		let request = Request::builder().build().unwrap();
		let err = validator.check_content_type(&request).unwrap_err();
		assert!(matches!(err, ValidateError::ContentType { .. }));
	}
}
