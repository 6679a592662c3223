use std::path::{Path, PathBuf};

use optfield::field::{FieldError, Optional, Presence, RawObject, Result};
use serde_json::{Map, Value};

use crate::cmd::util::{emit_bytes, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// Base JSON object document, or `-` for stdin.
	pub base: PathBuf,
	/// Patch JSON object document, or `-` for stdin.
	pub patch: PathBuf,
	/// Remove fields the patch sets to null instead of writing null.
	#[arg(long)]
	pub drop_null: bool,
}

/// Merge the patch onto the base and print the result through the active codec.
pub fn run(args: Args) -> Result<()> {
	let Args { base, patch, drop_null } = args;
	check_inputs(&base, &patch)?;

	let base = read_object(&RawObject::parse(&read_input(&base)?)?)?;
	let patch = RawObject::parse(&read_input(&patch)?)?;
	let merged = merge_objects(base, &patch, drop_null)?;

	let encoded = Optional::present(Value::Object(merged)).encode()?;
	emit_bytes(&encoded)
}

/// Reject reading stdin for both documents; the second read would always be empty.
pub(crate) fn check_inputs(base: &Path, patch: &Path) -> Result<()> {
	if base.as_os_str() == "-" && patch.as_os_str() == "-" {
		return Err(FieldError::StdinReused);
	}
	Ok(())
}

/// Decode every field of `object` into a JSON map.
pub(crate) fn read_object(object: &RawObject) -> Result<Map<String, Value>> {
	let mut out = Map::new();
	for key in object.keys() {
		let mut slot = Optional::<Value>::absent();
		object.decode_field(key, &mut slot)?;
		out.insert(key.to_owned(), slot.into_value());
	}
	Ok(out)
}

/// Overwrite `base` with each field `patch` carries; fields the patch omits are kept.
pub(crate) fn merge_objects(mut base: Map<String, Value>, patch: &RawObject, drop_null: bool) -> Result<Map<String, Value>> {
	for key in patch.keys() {
		let mut slot = Optional::<Value>::absent();
		patch.decode_field(key, &mut slot)?;
		tracing::debug!(field = key, state = slot.presence().as_str(), "merging field");

		match slot.presence() {
			Presence::Present => {
				base.insert(key.to_owned(), slot.into_value());
			}
			Presence::Null if drop_null => {
				base.remove(key);
			}
			Presence::Null => {
				base.insert(key.to_owned(), Value::Null);
			}
			Presence::Absent => {}
		}
	}

	Ok(base)
}
