//! Serde glue: containers travel as raw JSON text so the field codec sees the exact literal.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::field::Optional;

impl<T: Serialize + 'static> Serialize for Optional<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let bytes = self.encode().map_err(S::Error::custom)?;
		let text = String::from_utf8(bytes).map_err(S::Error::custom)?;
		let raw = RawValue::from_string(text).map_err(S::Error::custom)?;
		raw.serialize(serializer)
	}
}

impl<'de, T: DeserializeOwned + Default + 'static> Deserialize<'de> for Optional<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = Box::<RawValue>::deserialize(deserializer)?;
		let mut out = Self::absent();
		out.decode(raw.get().as_bytes()).map_err(D::Error::custom)?;
		Ok(out)
	}
}
