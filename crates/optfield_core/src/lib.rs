//! Tri-state optional values for JSON interchange.
//!
//! A field decoded through [`field::Optional`] remembers whether it was absent from the input,
//! explicitly `null`, or present with a value, and encodes back to the same distinction.

/// Tri-state container, swappable codec, and object field driver.
pub mod field;
