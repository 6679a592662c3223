use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::field::codec::{self, Codec};
use crate::field::{FieldError, Presence, Result};

/// Literal emitted for null containers and recognized, byte for byte, on decode.
pub const NULL_LITERAL: &[u8] = b"null";

/// A value that is absent, explicitly `null`, or present.
///
/// Embed it in a serde record with `#[serde(default)]` so that a missing field stays
/// [`Presence::Absent`], and with `skip_serializing_if = "Optional::is_absent"` to omit it again on
/// output.
///
/// Decoding empty bytes is a no-op. That is what an object driver hands over for a missing field,
/// so decoding a second document onto a populated container only overwrites what the document
/// actually carries (see [`crate::field::RawObject`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Optional<T> {
	value: T,
	presence: Presence,
}

impl<T> Optional<T> {
	/// Build a container from a value and a null flag.
	///
	/// A non-null container built this way is not marked set: [`Optional::is_set`] stays false while
	/// [`Optional::encode`] still emits `value`. A null container is [`Presence::Null`], which counts
	/// as set.
	pub fn new(value: T, null: bool) -> Self {
		let presence = if null { Presence::Null } else { Presence::Absent };
		Self { value, presence }
	}

	/// Present container holding `value`.
	pub fn present(value: T) -> Self {
		Self {
			value,
			presence: Presence::Present,
		}
	}

	/// True if the field was explicitly `null`.
	pub fn is_set_null(&self) -> bool {
		self.presence == Presence::Null
	}

	/// True if the field was present at all, null or not.
	pub fn is_set(&self) -> bool {
		self.presence.is_set()
	}

	/// True if the field was never set.
	pub fn is_absent(&self) -> bool {
		self.presence == Presence::Absent
	}

	/// Current presence state.
	pub fn presence(&self) -> Presence {
		self.presence
	}

	/// Held value, whatever the presence state.
	pub fn value(&self) -> &T {
		&self.value
	}

	/// Mutable access to the held value. Does not change the presence state.
	pub fn value_mut(&mut self) -> &mut T {
		&mut self.value
	}

	/// Consume the container, returning the held value.
	pub fn into_value(self) -> T {
		self.value
	}

	/// Borrow the value only when it is present.
	pub fn as_option(&self) -> Option<&T> {
		match self.presence {
			Presence::Present => Some(&self.value),
			Presence::Absent | Presence::Null => None,
		}
	}

	/// Consume the container, keeping the value only when it is present.
	pub fn into_option(self) -> Option<T> {
		match self.presence {
			Presence::Present => Some(self.value),
			Presence::Absent | Presence::Null => None,
		}
	}

	/// Store a present value.
	pub fn set(&mut self, value: T) {
		self.value = value;
		self.presence = Presence::Present;
	}
}

impl<T: Default> Optional<T> {
	/// Unset container holding `T::default()`.
	pub fn absent() -> Self {
		Self::default()
	}

	/// Explicitly null container.
	pub fn null() -> Self {
		Self {
			value: T::default(),
			presence: Presence::Null,
		}
	}

	/// Mark the field explicitly null and reset the value.
	pub fn set_null(&mut self) {
		self.value = T::default();
		self.presence = Presence::Null;
	}

	/// Return to the unset state with a default value.
	pub fn clear(&mut self) {
		self.value = T::default();
		self.presence = Presence::Absent;
	}
}

impl<T: DeserializeOwned + Default + 'static> Optional<T> {
	/// Decode one field literal using the process-wide codec.
	pub fn decode(&mut self, bytes: &[u8]) -> Result<()> {
		self.decode_with(&codec::current(), bytes)
	}

	/// Decode one field literal using `codec`.
	///
	/// Empty input leaves the container untouched. Any other input marks it set and resets the
	/// value first; exactly `null` marks it null without consulting the codec, and anything else is
	/// handed to the codec's decode function. On a codec error the container stays set, non-null,
	/// and holds the default value.
	pub fn decode_with(&mut self, codec: &Codec, bytes: &[u8]) -> Result<()> {
		if bytes.is_empty() {
			tracing::trace!("field absent, keeping previous state");
			return Ok(());
		}

		self.value = T::default();
		self.presence = Presence::Present;

		if bytes == NULL_LITERAL {
			self.presence = Presence::Null;
			tracing::trace!("field null, codec skipped");
			return Ok(());
		}

		codec.decode(bytes, &mut self.value).map_err(|err| {
			tracing::debug!(codec = codec.label(), error = %err, "field decode failed");
			FieldError::Decode(err)
		})
	}
}

impl<T: Serialize + 'static> Optional<T> {
	/// Encode using the process-wide codec.
	pub fn encode(&self) -> Result<Vec<u8>> {
		self.encode_with(&codec::current())
	}

	/// Encode using `codec`.
	///
	/// A null container always yields [`NULL_LITERAL`]. Otherwise the codec encodes the held value,
	/// set or not.
	pub fn encode_with(&self, codec: &Codec) -> Result<Vec<u8>> {
		if self.is_set_null() {
			return Ok(NULL_LITERAL.to_vec());
		}

		codec.encode(&self.value).map_err(FieldError::Encode)
	}
}

impl<T> From<Option<T>> for Optional<T>
where
	T: Default,
{
	fn from(value: Option<T>) -> Self {
		match value {
			Some(value) => Self::present(value),
			None => Self::null(),
		}
	}
}
