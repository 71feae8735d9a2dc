//! Error types for schema construction and request validation.
//!
//! Two distinct failure domains:
//!
//! - [`SchemaError`]: the caller misconfigured the validator or a rule.
//!   Raised eagerly from constructors and `FromStr`/`from_value`, never
//!   during request processing.
//! - [`ValidateError`]: a single request was rejected. Client-facing
//!   variants carry an HTTP status via [`ValidateError::status`]; stream
//!   and decode failures do not, leaving the status choice to the caller.

use http::StatusCode;

use crate::schema::ParamType;

/// Boxed error used for underlying stream and decode failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration mistakes in a schema or validator setup.
///
/// These signal programmer error and surface as soon as the offending
/// schema or validator is built, before any request is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	/// The rule's `type` tag is not one of the six supported tags.
	#[error(
		"unsupported param type `{0}` (expected one of: string, object, array, number, integer, boolean)"
	)]
	UnsupportedType(String),

	/// A multi-field rule descriptor has no usable `name` field.
	#[error("rule descriptor is missing a `name` field")]
	MissingName,

	/// The rule value has a shape that cannot be normalized at all.
	#[error("invalid rule shape: {0}")]
	InvalidRule(String),

	/// The configured content type is not one of the supported encodings.
	#[error(
		"unsupported content type `{0}` (expected one of: form, json, \
		 application/x-www-form-urlencoded, application/json)"
	)]
	UnsupportedContentType(String),
}

/// Per-request rejection reasons.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
	/// The `content-type` header did not exactly match the configured type
	/// (a missing header counts as a mismatch).
	#[error("Invalid content type: expected {expected}")]
	ContentType {
		/// Full MIME string the validator was configured with.
		expected: String,
	},

	/// The accumulated body crossed the configured byte ceiling.
	#[error("Body exceeded max size of {limit} bytes")]
	BodyTooLarge {
		/// Configured ceiling in bytes.
		limit: usize,
	},

	/// A required parameter was absent or falsy.
	#[error("Missing {0} param")]
	MissingParam(String),

	/// The (possibly coerced) value did not match the declared type.
	#[error("{name} param must be a {expected}")]
	WrongType {
		/// Parameter name from the rule.
		name: String,
		/// Declared type the value failed to match.
		expected: ParamType,
	},

	/// A `validator` or `custom_validator` predicate returned false.
	#[error("{0}")]
	FailedValidation(String),

	/// The underlying request stream yielded an error.
	#[error("request stream failed: {0}")]
	Stream(#[source] BoxError),

	/// The buffered body could not be decoded as the configured encoding.
	#[error("failed to decode request body: {0}")]
	Decode(#[source] BoxError),
}

impl ValidateError {
	/// HTTP status for client-facing rejections.
	///
	/// Returns `None` for stream and decode failures: those are not
	/// client-error-typed, and the caller decides how to surface them.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use typed_params::ValidateError;
	///
	/// let err = ValidateError::MissingParam("email".to_string());
	/// assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
	///
	/// let err = ValidateError::BodyTooLarge { limit: 1024 };
	/// assert_eq!(err.status(), Some(StatusCode::PAYLOAD_TOO_LARGE));
	/// ```
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::BodyTooLarge { .. } => Some(StatusCode::PAYLOAD_TOO_LARGE),
			Self::ContentType { .. }
			| Self::MissingParam(_)
			| Self::WrongType { .. }
			| Self::FailedValidation(_) => Some(StatusCode::BAD_REQUEST),
			Self::Stream(_) | Self::Decode(_) => None,
		}
	}

	/// True for rejections meant to be relayed to the client as-is.
	pub fn is_client_error(&self) -> bool {
		self.status().is_some()
	}
}

impl From<serde_json::Error> for ValidateError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(Box::new(err))
	}
}
