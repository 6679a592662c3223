/// Which of the three field states a container is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence {
	/// Field was missing from the input, or never decoded.
	#[default]
	Absent,
	/// Field was present with the literal `null`.
	Null,
	/// Field was present with a non-null literal.
	Present,
}

impl Presence {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Absent => "absent",
			Self::Null => "null",
			Self::Present => "present",
		}
	}

	/// True for [`Presence::Null`] and [`Presence::Present`].
	pub fn is_set(self) -> bool {
		!matches!(self, Self::Absent)
	}
}
