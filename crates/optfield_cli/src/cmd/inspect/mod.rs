use std::path::PathBuf;

use optfield::field::{Codec, Optional, Presence, RawObject, Result};
use serde_json::Value;

use crate::cmd::util::{emit_json, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// JSON object document, or `-` for stdin.
	pub path: PathBuf,
	/// Field to report (repeatable). Defaults to every key in the document.
	#[arg(long = "field", value_name = "NAME")]
	pub fields: Vec<String>,
	/// Emit the report as JSON.
	#[arg(long)]
	pub json: bool,
}

/// Presence state of one field.
#[derive(Debug, serde::Serialize)]
pub(crate) struct FieldReport {
	pub field: String,
	pub state: &'static str,
	#[serde(skip_serializing_if = "Optional::is_absent")]
	pub value: Optional<Value>,
}

/// Print the presence state of the requested fields.
pub fn run(args: Args) -> Result<()> {
	let Args { path, fields, json } = args;

	let object = RawObject::parse(&read_input(&path)?)?;
	let reports = inspect_fields(&object, &fields)?;

	if json {
		return emit_json(&reports);
	}

	let compact = Codec::compact();
	for report in &reports {
		println!("{}", render_line(report, &compact)?);
	}

	Ok(())
}

/// One text report line. Present values use `codec`, which must keep them on a single line.
pub(crate) fn render_line(report: &FieldReport, codec: &Codec) -> Result<String> {
	match report.value.presence() {
		Presence::Present => {
			let literal = report.value.encode_with(codec)?;
			Ok(format!("{}: present {}", report.field, String::from_utf8_lossy(&literal)))
		}
		Presence::Null | Presence::Absent => Ok(format!("{}: {}", report.field, report.state)),
	}
}

pub(crate) fn inspect_fields(object: &RawObject, fields: &[String]) -> Result<Vec<FieldReport>> {
	let names: Vec<String> = if fields.is_empty() {
		object.keys().map(str::to_owned).collect()
	} else {
		fields.to_vec()
	};

	names
		.into_iter()
		.map(|field| {
			let mut value = Optional::<Value>::absent();
			object.decode_field(&field, &mut value)?;
			Ok(FieldReport {
				state: value.presence().as_str(),
				field,
				value,
			})
		})
		.collect()
}
