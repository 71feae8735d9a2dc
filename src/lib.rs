//! # typed-params
//!
//! Declarative validation and type coercion for HTTP request bodies.
//!
//! A [`RequestValidator`] reads a raw request stream fully into memory
//! under a byte ceiling, decodes it as form-urlencoded or JSON, and runs
//! an ordered rule list over the decoded parameters: presence policy,
//! optional coercion, type check, and custom predicate gates, rejecting
//! on the first failure with a client-facing message.
//!
//! ## Modules
//!
//! - **schema**: [`Rule`] / [`Schema`] records and JSON-shape normalization
//! - **engine**: the fail-fast rule scan over a parameter map
//! - **coerce**: best-effort conversion toward a rule's declared type
//! - **parsers**: [`FormParser`] and [`JSONParser`] body decoders
//! - **request** / **collector**: the stream collaborator and its bounded
//!   buffering
//! - **validator**: the [`RequestValidator`] façade wiring it all together
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use typed_params::{ContentType, ParamType, Request, RequestValidator, Rule, Schema};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let validator = RequestValidator::new(ContentType::Form);
//! let schema = Schema::from(vec![
//! 	Rule::new("email", ParamType::String),
//! 	Rule::new("age", ParamType::Integer).coerce(true),
//! ]);
//!
//! let request = Request::builder()
//! 	.header("content-type", "application/x-www-form-urlencoded")
//! 	.body("email=a%40b.com&age=30")
//! 	.build()
//! 	.unwrap();
//!
//! let params = validator.validate(request, &schema).await.unwrap();
//! assert_eq!(params["email"], json!("a@b.com"));
//! assert_eq!(params["age"], json!(30));
//! # }
//! ```

pub mod collector;
pub mod engine;
pub mod error;
pub mod parsers;
pub mod request;
pub mod schema;
pub mod validator;

mod coerce;

pub use collector::BodyCollector;
pub use engine::validate_params;
pub use error::{BoxError, SchemaError, ValidateError};
pub use parsers::{FormParser, JSONParser, Parser};
pub use request::{BodyStream, Request, RequestBuilder};
pub use schema::{ParamType, Predicate, Rule, Schema};
pub use validator::{ContentType, DEFAULT_MAX_BODY_SIZE, RequestValidator};
