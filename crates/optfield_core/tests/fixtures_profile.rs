#![allow(missing_docs)]

use optfield::field::{Optional, Patch, Presence, RawObject, Result, patch};
use optfield_testkit::{fixture_bytes, fixture_json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
struct Profile {
	#[serde(default, skip_serializing_if = "Optional::is_absent")]
	name: Optional<String>,
	#[serde(default, skip_serializing_if = "Optional::is_absent")]
	email: Optional<String>,
	#[serde(default, skip_serializing_if = "Optional::is_absent")]
	age: Optional<u32>,
	#[serde(default, skip_serializing_if = "Optional::is_absent")]
	tags: Optional<Vec<String>>,
	#[serde(default, skip_serializing_if = "Optional::is_absent")]
	nickname: Optional<String>,
}

impl Patch for Profile {
	fn patch_from(&mut self, object: &RawObject) -> Result<()> {
		object.decode_field("name", &mut self.name)?;
		object.decode_field("email", &mut self.email)?;
		object.decode_field("age", &mut self.age)?;
		object.decode_field("tags", &mut self.tags)?;
		object.decode_field("nickname", &mut self.nickname)
	}
}

#[test]
fn base_profile_round_trips_through_serde() {
	let profile: Profile = serde_json::from_slice(&fixture_bytes("profile_base.json")).expect("base decodes");
	assert_eq!(profile.name.as_option().map(String::as_str), Some("Ada"));
	assert!(profile.nickname.is_absent());

	let encoded = serde_json::to_value(&profile).expect("profile encodes");
	assert_eq!(encoded, fixture_json("profile_base.json"));
}

#[test]
fn patch_fixtures_merge_onto_existing_profile() {
	let mut profile = Profile::default();
	patch(&mut profile, &fixture_bytes("profile_base.json")).expect("base applies");
	patch(&mut profile, &fixture_bytes("profile_patch.json")).expect("patch applies");

	assert_eq!(profile.name.value(), "Ada");
	assert_eq!(profile.email.presence(), Presence::Null);
	assert_eq!(profile.email.value(), "");
	assert_eq!(profile.age.as_option(), Some(&37));
	assert_eq!(profile.tags.value(), &vec![String::from("math")]);
	assert_eq!(profile.nickname.value(), "countess");

	patch(&mut profile, &fixture_bytes("profile_empty.json")).expect("empty patch applies");
	assert_eq!(profile.age.as_option(), Some(&37));
	assert!(profile.email.is_set_null());

	let encoded = serde_json::to_value(&profile).expect("profile encodes");
	assert_eq!(
		encoded,
		serde_json::json!({
			"name": "Ada",
			"email": null,
			"age": 37,
			"tags": ["math"],
			"nickname": "countess",
		})
	);
}

#[test]
fn non_object_fixture_is_rejected() {
	let mut profile = Profile::default();
	assert!(patch(&mut profile, &fixture_bytes("not_object.json")).is_err());
	assert!(profile.name.is_absent());
}
