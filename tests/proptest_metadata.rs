//! Property-based testing for the metadata record.
//!
//! Uses proptest to generate arbitrary field sets and verify the identity
//! hash and normalization invariants hold for inputs no fixture page would
//! ever exercise.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use pagemeta::extraction::ExtractedFields;
use pagemeta::{Image, Metadata};

/// Strategy for generating field-ish strings, including awkward whitespace
fn arb_field() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(" line\nbreak\r mixed ".to_string()),
        "[ -~]{0,40}",
        "\\PC{0,20}",
    ]
}

fn arb_image() -> impl Strategy<Value = Option<Image>> {
    prop_oneof![
        Just(None),
        arb_field().prop_map(|url| Some(Image::Guessed(url))),
        arb_field().prop_map(|url| Some(Image::Confirmed(url))),
    ]
}

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

prop_compose! {
    fn arb_metadata()(
        site in arb_field(),
        title in arb_field(),
        image in arb_image(),
        description in arb_field(),
        keywords in prop::collection::vec("[a-z ]{0,12}", 0..6),
        canonical in arb_field(),
        icon in arb_field(),
        author in arb_field(),
        copyright in arb_field(),
        amphtml in arb_field(),
        language in arb_field(),
        scraped in arb_timestamp(),
    ) -> Metadata {
        Metadata {
            site, title, image, description, keywords, canonical,
            icon, author, copyright, amphtml, language, scraped,
        }
    }
}

proptest! {
    #[test]
    fn hash_is_pure(meta in arb_metadata()) {
        prop_assert_eq!(meta.hash(), meta.hash());
        prop_assert_eq!(meta.hash(), meta.clone().hash());
    }

    #[test]
    fn hash_is_32_lowercase_hex_chars(meta in arb_metadata()) {
        let hash = meta.hash();
        prop_assert_eq!(hash.len(), 32);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn hash_ignores_scraped(meta in arb_metadata(), other in arb_timestamp()) {
        let mut moved = meta.clone();
        moved.scraped = other;
        prop_assert_eq!(meta.hash(), moved.hash());
    }

    #[test]
    fn id_always_equals_hash(meta in arb_metadata()) {
        prop_assert_eq!(meta.id(), meta.hash());
    }

    #[test]
    fn serialization_never_fails(meta in arb_metadata()) {
        let json = meta.to_json();
        prop_assert!(json.is_ok());
    }

    #[test]
    fn roundtrip_preserves_identity(meta in arb_metadata()) {
        let json = meta.to_json().unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.hash(), meta.hash());
    }

    #[test]
    fn normalize_is_idempotent(
        title in arb_field(),
        description in arb_field(),
        icon in arb_field(),
        keywords in prop::collection::vec("[ a-z]{0,12}", 0..6),
    ) {
        let mut fields = ExtractedFields {
            title, description, icon, keywords,
            ..Default::default()
        };
        fields.normalize();
        let once = fields.clone();
        fields.normalize();
        prop_assert_eq!(fields, once);
    }

    #[test]
    fn normalized_fields_carry_no_newlines(title in arb_field()) {
        let mut fields = ExtractedFields { title, ..Default::default() };
        fields.normalize();
        prop_assert!(!fields.title.contains('\n'));
        prop_assert!(!fields.title.contains('\r'));
        prop_assert_eq!(fields.title.trim(), fields.title.as_str());
    }
}
