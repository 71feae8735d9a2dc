//! Bounded accumulation of a request body stream.

use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use crate::error::ValidateError;
use crate::request::BodyStream;

/// Reads a body stream fully into memory, enforcing a byte ceiling.
#[derive(Debug, Clone, Copy)]
pub struct BodyCollector {
	max_body_size: usize,
}

impl BodyCollector {
	pub fn new(max_body_size: usize) -> Self {
		Self { max_body_size }
	}

	/// Accumulates chunks until end-of-stream.
	///
	/// The total size is re-checked after every chunk; crossing the
	/// ceiling returns [`ValidateError::BodyTooLarge`] at once, and the
	/// stream is dropped so no further chunks are polled. An `Err` item
	/// surfaces as [`ValidateError::Stream`].
	pub async fn collect(&self, mut body: BodyStream) -> Result<Bytes, ValidateError> {
		let mut buf = BytesMut::new();
		while let Some(chunk) = body.next().await {
			let chunk = chunk.map_err(ValidateError::Stream)?;
			buf.extend_from_slice(&chunk);
			if buf.len() > self.max_body_size {
				tracing::debug!(
					size = buf.len(),
					limit = self.max_body_size,
					"request body exceeded size ceiling"
				);
				return Err(ValidateError::BodyTooLarge {
					limit: self.max_body_size,
				});
			}
		}
		tracing::trace!(size = buf.len(), "request body collected");
		Ok(buf.freeze())
	}
}
