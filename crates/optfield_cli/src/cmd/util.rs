use std::io::{Read, Write};
use std::path::Path;

use optfield::field::Result;

/// Read a document from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
	if path.as_os_str() == "-" {
		let mut buf = Vec::new();
		std::io::stdin().read_to_end(&mut buf)?;
		return Ok(buf);
	}

	Ok(std::fs::read(path)?)
}

/// Print a pretty JSON payload on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload)?;
	println!("{text}");
	Ok(())
}

/// Print already-encoded bytes on stdout, newline terminated.
pub(crate) fn emit_bytes(bytes: &[u8]) -> Result<()> {
	let mut out = std::io::stdout().lock();
	out.write_all(bytes)?;
	out.write_all(b"\n")?;
	Ok(())
}
