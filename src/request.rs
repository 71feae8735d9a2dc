//! The request collaborator consumed by the validator.
//!
//! A [`Request`] is just a header map plus a chunked byte stream: zero or
//! more `Bytes` chunks followed by end-of-stream, or an `Err` item for an
//! underlying transport failure. Hosts adapt their own request type at
//! this boundary; tests build one directly with the builder.

use std::fmt;

use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};

use crate::error::BoxError;

/// Chunked request body: data chunks, then end-of-stream or one error.
pub type BodyStream = BoxStream<'static, Result<Bytes, BoxError>>;

/// An incoming request: headers plus an unread body stream.
pub struct Request {
	headers: HeaderMap,
	body: BodyStream,
}

impl Request {
	/// Starts building a request.
	///
	/// # Examples
	///
	/// ```
	/// use typed_params::Request;
	///
	/// let request = Request::builder()
	/// 	.header("content-type", "application/json")
	/// 	.body(r#"{"active": true}"#)
	/// 	.build()
	/// 	.unwrap();
	/// assert_eq!(request.content_type(), Some("application/json"));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// The declared `content-type` header, if present and readable.
	pub fn content_type(&self) -> Option<&str> {
		self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
	}

	pub(crate) fn into_body(self) -> BodyStream {
		self.body
	}
}

impl fmt::Debug for Request {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Request")
			.field("headers", &self.headers)
			.field("body", &"<stream>")
			.finish()
	}
}

/// Builder for [`Request`].
///
/// Header parse failures are deferred to [`RequestBuilder::build`], the
/// same way `http::request::Builder` reports them.
pub struct RequestBuilder {
	headers: Result<HeaderMap, http::Error>,
	body: Option<BodyStream>,
}

impl RequestBuilder {
	fn new() -> Self {
		Self {
			headers: Ok(HeaderMap::new()),
			body: None,
		}
	}

	/// Sets a header, replacing any previous value for the same name.
	pub fn header(mut self, name: &str, value: &str) -> Self {
		self.headers = self.headers.and_then(|mut headers| {
			let name: HeaderName = name.parse()?;
			let value: HeaderValue = value.parse()?;
			headers.insert(name, value);
			Ok(headers)
		});
		self
	}

	/// Uses an already buffered body, emitted as a single chunk.
	pub fn body(self, body: impl Into<Bytes>) -> Self {
		let chunk = body.into();
		self.body_stream(stream::once(async move { Ok::<_, BoxError>(chunk) }))
	}

	/// Uses a chunked body stream.
	pub fn body_stream<S>(mut self, body: S) -> Self
	where
		S: Stream<Item = Result<Bytes, BoxError>> + Send + 'static,
	{
		self.body = Some(body.boxed());
		self
	}

	/// Finishes the request; an omitted body reads as empty.
	pub fn build(self) -> Result<Request, http::Error> {
		Ok(Request {
			headers: self.headers?,
			body: self.body.unwrap_or_else(|| stream::empty().boxed()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::StreamExt;
	use rstest::rstest;

	#[rstest]
	fn test_missing_content_type_reads_as_none() {
		let request = Request::builder().build().unwrap();
		assert_eq!(request.content_type(), None);
	}

	#[rstest]
	fn test_invalid_header_fails_at_build() {
		let result = Request::builder().header("bad header", "x").build();
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_body_is_a_single_chunk() {
		let request = Request::builder().body("hello").build().unwrap();
		let chunks: Vec<_> = request.into_body().collect().await;
		assert_eq!(chunks.len(), 1);
		assert_eq!(chunks[0].as_ref().unwrap(), &Bytes::from("hello"));
	}

	#[tokio::test]
	async fn test_omitted_body_is_empty_stream() {
		let request = Request::builder().build().unwrap();
		let chunks: Vec<_> = request.into_body().collect().await;
		assert!(chunks.is_empty());
	}
}
