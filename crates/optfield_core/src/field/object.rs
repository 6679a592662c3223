use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::field::{Codec, FieldError, Optional, Result};

/// Top-level JSON object split into `key -> raw literal` without decoding the values.
///
/// Lookups for missing keys yield empty bytes, which [`Optional::decode`] treats as "leave the
/// container alone". Duplicate keys keep the last occurrence.
#[derive(Debug, Clone, Default)]
pub struct RawObject {
	fields: BTreeMap<String, Box<RawValue>>,
}

impl RawObject {
	/// Parse a JSON object document.
	///
	/// Empty or whitespace-only input and a top-level `null` yield an object with no fields.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		if bytes.iter().all(|&byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r')) {
			return Ok(Self::default());
		}

		let raw: Box<RawValue> = serde_json::from_slice(bytes)?;
		let text = raw.get();
		match text.as_bytes().first() {
			Some(b'{') => {}
			Some(b'n') => return Ok(Self::default()),
			first => return Err(FieldError::NotAnObject { kind: json_kind(first.copied()) }),
		}

		let fields = serde_json::from_str(text)?;
		Ok(Self { fields })
	}

	/// Raw literal for `key`, if present.
	pub fn get(&self, key: &str) -> Option<&RawValue> {
		self.fields.get(key).map(|raw| &**raw)
	}

	/// Raw literal bytes for `key`, or empty bytes when the key is missing.
	pub fn field_bytes(&self, key: &str) -> &[u8] {
		self.get(key).map(|raw| raw.get().as_bytes()).unwrap_or_default()
	}

	/// True if the document carries `key`, null or not.
	pub fn contains(&self, key: &str) -> bool {
		self.fields.contains_key(key)
	}

	/// Keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.fields.keys().map(String::as_str)
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// True if the document has no keys.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Decode `key` into `slot` with the process-wide codec. Missing keys leave `slot` untouched.
	pub fn decode_field<T>(&self, key: &str, slot: &mut Optional<T>) -> Result<()>
	where
		T: DeserializeOwned + Default + 'static,
	{
		slot.decode(self.field_bytes(key))
	}

	/// Decode `key` into `slot` with `codec`.
	pub fn decode_field_with<T>(&self, codec: &Codec, key: &str, slot: &mut Optional<T>) -> Result<()>
	where
		T: DeserializeOwned + Default + 'static,
	{
		slot.decode_with(codec, self.field_bytes(key))
	}
}

/// Records that can be updated in place from a [`RawObject`].
///
/// Implementations decode each of their [`Optional`] fields with [`RawObject::decode_field`] so
/// that only the keys present in the document overwrite existing state.
pub trait Patch {
	/// Apply the fields carried by `object`.
	fn patch_from(&mut self, object: &RawObject) -> Result<()>;
}

/// Parse `bytes` as an object document and apply it to `target`.
///
/// The first field error aborts the patch; fields decoded before it keep their new state.
pub fn patch<P: Patch + ?Sized>(target: &mut P, bytes: &[u8]) -> Result<()> {
	let object = RawObject::parse(bytes)?;
	target.patch_from(&object)
}

fn json_kind(first: Option<u8>) -> &'static str {
	match first {
		Some(b'[') => "array",
		Some(b'"') => "string",
		Some(b't' | b'f') => "boolean",
		Some(b'n') => "null",
		Some(_) => "number",
		None => "nothing",
	}
}
