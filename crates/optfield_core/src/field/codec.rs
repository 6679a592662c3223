//! Swappable encode/decode functions used for present field values.
//!
//! The process-wide codec lives in an [`ArcSwap`] slot. Each encode or decode loads one snapshot and
//! uses it for the whole call, so a swap from another thread never tears a call in progress. Which
//! codec an in-flight call on another thread observes is unspecified.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::field::FieldError;

/// Boxed error returned by codec functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Encode function signature: JSON bytes for a non-null value.
pub type EncodeFn = dyn Fn(&dyn EncodeSource) -> Result<Vec<u8>, BoxError> + Send + Sync;

/// Decode function signature: populate `target` from a non-null field literal.
pub type DecodeFn = dyn Fn(&[u8], &mut dyn DecodeTarget) -> Result<(), BoxError> + Send + Sync;

static ACTIVE: LazyLock<ArcSwap<Codec>> = LazyLock::new(|| ArcSwap::from_pointee(Codec::compact()));

/// Object-safe view of a value handed to an encode function.
pub trait EncodeSource {
	/// Compact `serde_json` encoding.
	fn to_json_vec(&self) -> serde_json::Result<Vec<u8>>;
	/// Pretty-printed `serde_json` encoding.
	fn to_json_vec_pretty(&self) -> serde_json::Result<Vec<u8>>;
	/// Encode into a [`serde_json::Value`] tree.
	fn to_json_value(&self) -> serde_json::Result<serde_json::Value>;
	/// Concrete value, for encoders that special-case types.
	fn as_any(&self) -> &dyn Any;
}

impl<T: Serialize + Any> EncodeSource for T {
	fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
		serde_json::to_vec(self)
	}

	fn to_json_vec_pretty(&self) -> serde_json::Result<Vec<u8>> {
		serde_json::to_vec_pretty(self)
	}

	fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
		serde_json::to_value(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Object-safe view of the slot a decode function populates.
pub trait DecodeTarget {
	/// Replace the target with the `serde_json` decoding of `bytes`.
	fn fill_from_slice(&mut self, bytes: &[u8]) -> serde_json::Result<()>;
	/// Replace the target with the decoding of an already-parsed tree.
	fn fill_from_value(&mut self, value: serde_json::Value) -> serde_json::Result<()>;
	/// Concrete target, for decoders that write it directly.
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: DeserializeOwned + Any> DecodeTarget for T {
	fn fill_from_slice(&mut self, bytes: &[u8]) -> serde_json::Result<()> {
		*self = serde_json::from_slice(bytes)?;
		Ok(())
	}

	fn fill_from_value(&mut self, value: serde_json::Value) -> serde_json::Result<()> {
		*self = serde_json::from_value(value)?;
		Ok(())
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Built-in codec selection, parsable from configuration text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
	/// `serde_json` compact output.
	#[default]
	Compact,
	/// `serde_json` pretty-printed output.
	Pretty,
}

impl CodecKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Compact => "compact",
			Self::Pretty => "pretty",
		}
	}
}

impl fmt::Display for CodecKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for CodecKind {
	type Err = FieldError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"compact" => Ok(Self::Compact),
			"pretty" => Ok(Self::Pretty),
			_ => Err(FieldError::UnknownCodec { name: value.to_owned() }),
		}
	}
}

/// Encode/decode function pair.
#[derive(Clone)]
pub struct Codec {
	label: &'static str,
	encoder: Arc<EncodeFn>,
	decoder: Arc<DecodeFn>,
}

impl Codec {
	/// Build a codec from custom functions.
	pub fn new<E, D>(encoder: E, decoder: D) -> Self
	where
		E: Fn(&dyn EncodeSource) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
		D: Fn(&[u8], &mut dyn DecodeTarget) -> Result<(), BoxError> + Send + Sync + 'static,
	{
		Self {
			label: "custom",
			encoder: Arc::new(encoder),
			decoder: Arc::new(decoder),
		}
	}

	/// Default codec: `serde_json` compact encode and decode.
	pub fn compact() -> Self {
		Self {
			label: "compact",
			encoder: Arc::new(encode_compact),
			decoder: Arc::new(decode_json),
		}
	}

	/// `serde_json` pretty-printed encode, standard decode.
	pub fn pretty() -> Self {
		Self {
			label: "pretty",
			encoder: Arc::new(encode_pretty),
			decoder: Arc::new(decode_json),
		}
	}

	/// Codec for a configured [`CodecKind`].
	pub fn from_kind(kind: CodecKind) -> Self {
		match kind {
			CodecKind::Compact => Self::compact(),
			CodecKind::Pretty => Self::pretty(),
		}
	}

	/// Replace the encode function, keeping the decoder.
	pub fn with_encoder<E>(self, encoder: E) -> Self
	where
		E: Fn(&dyn EncodeSource) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
	{
		Self {
			label: "custom",
			encoder: Arc::new(encoder),
			decoder: self.decoder,
		}
	}

	/// Replace the decode function, keeping the encoder.
	pub fn with_decoder<D>(self, decoder: D) -> Self
	where
		D: Fn(&[u8], &mut dyn DecodeTarget) -> Result<(), BoxError> + Send + Sync + 'static,
	{
		Self {
			label: "custom",
			encoder: self.encoder,
			decoder: Arc::new(decoder),
		}
	}

	/// Short label: `compact`, `pretty`, or `custom`.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Run the encode function.
	pub fn encode(&self, source: &dyn EncodeSource) -> Result<Vec<u8>, BoxError> {
		(self.encoder)(source)
	}

	/// Run the decode function.
	pub fn decode(&self, bytes: &[u8], target: &mut dyn DecodeTarget) -> Result<(), BoxError> {
		(self.decoder)(bytes, target)
	}
}

impl Default for Codec {
	fn default() -> Self {
		Self::compact()
	}
}

impl fmt::Debug for Codec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Codec").field("label", &self.label).finish_non_exhaustive()
	}
}

/// Restores the previously active codec when dropped.
#[derive(Debug)]
#[must_use = "the previous codec is restored as soon as the scope is dropped"]
pub struct CodecScope {
	previous: Arc<Codec>,
}

impl Drop for CodecScope {
	fn drop(&mut self) {
		tracing::debug!(codec = self.previous.label, "restoring field codec");
		ACTIVE.store(Arc::clone(&self.previous));
	}
}

/// Snapshot of the process-wide codec.
pub fn current() -> Arc<Codec> {
	ACTIVE.load_full()
}

/// Replace both process-wide functions at once.
pub fn install(codec: Codec) {
	tracing::debug!(codec = codec.label, "installing field codec");
	ACTIVE.store(Arc::new(codec));
}

/// Restore the default compact codec.
pub fn reset() {
	install(Codec::compact());
}

/// Install `codec` until the returned guard is dropped.
pub fn scoped(codec: Codec) -> CodecScope {
	tracing::debug!(codec = codec.label, "installing scoped field codec");
	let previous = ACTIVE.swap(Arc::new(codec));
	CodecScope { previous }
}

/// Replace the process-wide encode function.
///
/// Affects every later encode of a non-null container, whichever instance it is.
pub fn set_encoder<E>(encoder: E)
where
	E: Fn(&dyn EncodeSource) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
{
	let encoder: Arc<EncodeFn> = Arc::new(encoder);
	ACTIVE.rcu(|active| Codec {
		label: "custom",
		encoder: Arc::clone(&encoder),
		decoder: Arc::clone(&active.decoder),
	});
	tracing::debug!("field encoder replaced");
}

/// Replace the process-wide decode function.
///
/// Affects every later decode of a non-empty, non-null literal.
pub fn set_decoder<D>(decoder: D)
where
	D: Fn(&[u8], &mut dyn DecodeTarget) -> Result<(), BoxError> + Send + Sync + 'static,
{
	let decoder: Arc<DecodeFn> = Arc::new(decoder);
	ACTIVE.rcu(|active| Codec {
		label: "custom",
		encoder: Arc::clone(&active.encoder),
		decoder: Arc::clone(&decoder),
	});
	tracing::debug!("field decoder replaced");
}

fn encode_compact(source: &dyn EncodeSource) -> Result<Vec<u8>, BoxError> {
	Ok(source.to_json_vec()?)
}

fn encode_pretty(source: &dyn EncodeSource) -> Result<Vec<u8>, BoxError> {
	Ok(source.to_json_vec_pretty()?)
}

fn decode_json(bytes: &[u8], target: &mut dyn DecodeTarget) -> Result<(), BoxError> {
	Ok(target.fill_from_slice(bytes)?)
}

#[cfg(test)]
mod tests;
