pub mod codec;
mod error;
mod object;
mod optional;
mod presence;
mod serde_impl;

#[cfg(test)]
mod test_support;

/// Codec values and object-safe encode/decode views.
pub use codec::{BoxError, Codec, CodecKind, CodecScope, DecodeTarget, EncodeSource};
/// Error and result aliases.
pub use error::{FieldError, Result};
/// Raw object field access and patch helpers.
pub use object::{Patch, RawObject, patch};
/// Tri-state container and the `null` literal it emits.
pub use optional::{NULL_LITERAL, Optional};
/// Presence state of a container.
pub use presence::Presence;
