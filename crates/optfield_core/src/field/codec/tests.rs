use std::collections::BTreeMap;

use crate::field::codec::{self, Codec, CodecKind};
use crate::field::test_support::codec_lock;
use crate::field::{FieldError, Optional};

#[test]
fn codec_kind_parses_labels() {
	assert_eq!("compact".parse::<CodecKind>().expect("compact parses"), CodecKind::Compact);
	assert_eq!(" Pretty ".parse::<CodecKind>().expect("pretty parses"), CodecKind::Pretty);

	let err = "yaml".parse::<CodecKind>().expect_err("unknown codec fails");
	assert!(matches!(err, FieldError::UnknownCodec { ref name } if name == "yaml"));

	let kind: CodecKind = serde_json::from_str(r#""pretty""#).expect("kind deserializes");
	assert_eq!(kind, CodecKind::Pretty);
	assert_eq!(CodecKind::default().to_string(), "compact");
}

#[test]
fn pretty_codec_indents_output() {
	let mut map = BTreeMap::new();
	map.insert("a", 1);
	map.insert("b", 2);
	let item = Optional::present(map);

	let compact = item.encode_with(&Codec::from_kind(CodecKind::Compact)).expect("compact encodes");
	let pretty = item.encode_with(&Codec::from_kind(CodecKind::Pretty)).expect("pretty encodes");

	assert_eq!(compact, br#"{"a":1,"b":2}"#);
	assert_eq!(String::from_utf8(pretty).expect("utf8"), "{\n  \"a\": 1,\n  \"b\": 2\n}");
}

#[test]
fn scoped_codec_restores_previous() {
	let _lock = codec_lock();
	codec::reset();

	{
		let _scope = codec::scoped(Codec::pretty());
		assert_eq!(codec::current().label(), "pretty");

		let _inner = codec::scoped(Codec::compact().with_encoder(|_| Ok(b"0".to_vec())));
		assert_eq!(codec::current().label(), "custom");
		assert_eq!(Optional::present("x").encode().expect("encodes"), b"0");
	}

	assert_eq!(codec::current().label(), "compact");
	assert_eq!(Optional::present("x").encode().expect("encodes"), br#""x""#);
}

#[test]
fn install_replaces_both_functions() {
	let _lock = codec_lock();
	let _restore = codec::scoped(Codec::compact());

	codec::install(Codec::new(|_| Ok(b"1".to_vec()), |_, _| Err("rejected".into())));
	assert_eq!(Optional::present(true).encode().expect("encodes"), b"1");

	let mut item = Optional::<bool>::absent();
	let err = item.decode(b"true").expect_err("decoder rejects");
	assert_eq!(err.to_string(), "decode: rejected");

	codec::reset();
	item.decode(b"true").expect("default decoder accepts");
	assert_eq!(item.as_option(), Some(&true));
}

#[test]
fn set_encoder_keeps_active_decoder() {
	let _lock = codec_lock();
	let _restore = codec::scoped(Codec::compact());

	codec::set_decoder(|_, _| Err("decoder kept".into()));
	codec::set_encoder(|source| source.to_json_vec_pretty().map_err(Into::into));

	let mut item = Optional::<u8>::absent();
	let err = item.decode(b"1").expect_err("custom decoder still active");
	assert_eq!(err.to_string(), "decode: decoder kept");
}

#[test]
fn encoder_can_special_case_concrete_types() {
	let codec = Codec::compact().with_encoder(|source| {
		if let Some(flag) = source.as_any().downcast_ref::<bool>() {
			return Ok(if *flag { b"1".to_vec() } else { b"0".to_vec() });
		}
		let value = source.to_json_value()?;
		Ok(serde_json::to_vec(&value)?)
	});

	assert_eq!(Optional::present(true).encode_with(&codec).expect("encodes"), b"1");
	assert_eq!(Optional::present(vec![1, 2]).encode_with(&codec).expect("encodes"), b"[1,2]");
	assert_eq!(format!("{codec:?}"), "Codec { label: \"custom\", .. }");
}

#[test]
fn concurrent_swaps_never_tear_a_call() {
	let _lock = codec_lock();
	let _restore = codec::scoped(Codec::compact());

	std::thread::scope(|scope| {
		let swapper = scope.spawn(|| {
			for round in 0..200 {
				if round % 2 == 0 {
					codec::set_encoder(|_| Ok(br#""fixed""#.to_vec()));
				} else {
					codec::reset();
				}
			}
		});

		for _ in 0..4 {
			scope.spawn(|| {
				for _ in 0..200 {
					let out = Optional::present("value").encode().expect("encodes");
					assert!(out == br#""value""# || out == br#""fixed""#, "unexpected output {out:?}");
				}
			});
		}

		swapper.join().expect("swapper finishes");
	});
}
