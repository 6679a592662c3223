use thiserror::Error;

use crate::field::BoxError;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors produced while decoding, encoding, and reading field documents.
#[derive(Debug, Error)]
pub enum FieldError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Active decode function rejected a non-null field literal.
	///
	/// The codec's own error is kept as the [`std::error::Error::source`].
	#[error("decode: {0}")]
	Decode(#[source] BoxError),
	/// Active encode function failed for a non-null value.
	#[error("encode: {0}")]
	Encode(#[source] BoxError),
	/// Document text is not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Document parsed but its top level is not an object.
	#[error("expected a JSON object, got {kind}")]
	NotAnObject {
		/// JSON kind found at the top level.
		kind: &'static str,
	},
	/// More than one input named `-`; stdin can only be read once.
	#[error("stdin (`-`) can only be used for one input")]
	StdinReused,
	/// Codec name did not match a known [`crate::field::CodecKind`].
	#[error("unknown codec: {name} (expected compact or pretty)")]
	UnknownCodec {
		/// User-provided codec name.
		name: String,
	},
}

impl FieldError {
	/// Return the codec error behind a decode or encode failure.
	pub fn codec_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
		match self {
			Self::Decode(err) | Self::Encode(err) => Some(&**err),
			_ => None,
		}
	}

	/// Consume the error, returning the codec error behind a decode or encode failure.
	pub fn into_codec_error(self) -> Option<BoxError> {
		match self {
			Self::Decode(err) | Self::Encode(err) => Some(err),
			_ => None,
		}
	}
}
