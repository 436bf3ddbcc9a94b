//! Metadata record contract tests
//!
//! These tests pin down the serialized shape of a record and the behavior of
//! its derived identity hash, independent of any network activity.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use pagemeta::{Image, Metadata};

fn record() -> Metadata {
    Metadata {
        site: "x.com".to_string(),
        title: "A page".to_string(),
        image: Some(Image::Guessed("https://x.com/img.png".to_string())),
        description: "Summary".to_string(),
        keywords: vec!["alpha".to_string(), "beta".to_string()],
        canonical: "https://x.com/a".to_string(),
        icon: "https://x.com/favicon.ico".to_string(),
        author: "Jane".to_string(),
        copyright: "2024".to_string(),
        amphtml: String::new(),
        language: "en".to_string(),
        scraped: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn serialized_form_is_a_flat_object_with_every_field() {
    let value: serde_json::Value = serde_json::from_str(&record().to_json().unwrap()).unwrap();

    for key in [
        "hash",
        "id",
        "site",
        "title",
        "image",
        "description",
        "keywords",
        "canonical",
        "icon",
        "author",
        "copyright",
        "amphtml",
        "language",
        "scraped",
    ] {
        assert!(value.get(key).is_some(), "missing field {key}");
    }
}

#[test]
fn guessed_image_serializes_as_plain_url() {
    let value: serde_json::Value = serde_json::from_str(&record().to_json().unwrap()).unwrap();
    assert_eq!(value["image"], "https://x.com/img.png");
}

#[test]
fn confirmed_image_serializes_as_tagged_object() {
    let mut meta = record();
    meta.image = Some(Image::Confirmed("https://x.com/og.png".to_string()));

    let value: serde_json::Value = serde_json::from_str(&meta.to_json().unwrap()).unwrap();
    assert_eq!(value["image"]["url"], "https://x.com/og.png");
}

#[test]
fn absent_image_serializes_as_null() {
    let mut meta = record();
    meta.image = None;

    let value: serde_json::Value = serde_json::from_str(&meta.to_json().unwrap()).unwrap();
    assert!(value["image"].is_null());
}

#[test]
fn scraped_is_serialized_but_excluded_from_identity() {
    let a = record();
    let mut b = record();
    b.scraped = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    let a_json: serde_json::Value = serde_json::from_str(&a.to_json().unwrap()).unwrap();
    let b_json: serde_json::Value = serde_json::from_str(&b.to_json().unwrap()).unwrap();

    assert_ne!(a_json["scraped"], b_json["scraped"]);
    assert_eq!(a_json["hash"], b_json["hash"]);
}

#[test]
fn every_content_field_participates_in_the_hash() {
    let base = record();

    let variants: Vec<Metadata> = vec![
        Metadata {
            site: "other.com".to_string(),
            ..record()
        },
        Metadata {
            title: "Other".to_string(),
            ..record()
        },
        Metadata {
            image: None,
            ..record()
        },
        Metadata {
            description: "Other".to_string(),
            ..record()
        },
        Metadata {
            keywords: vec![],
            ..record()
        },
        Metadata {
            canonical: "https://x.com/b".to_string(),
            ..record()
        },
        Metadata {
            icon: String::new(),
            ..record()
        },
        Metadata {
            author: "Other".to_string(),
            ..record()
        },
        Metadata {
            copyright: "1999".to_string(),
            ..record()
        },
        Metadata {
            amphtml: "https://x.com/amp".to_string(),
            ..record()
        },
        Metadata {
            language: "fr".to_string(),
            ..record()
        },
    ];

    for variant in variants {
        assert_ne!(base.hash(), variant.hash(), "variant {variant:?}");
    }
}

#[test]
fn keyword_order_is_significant() {
    let a = record();
    let mut b = record();
    b.keywords = vec!["beta".to_string(), "alpha".to_string()];

    assert_ne!(a.hash(), b.hash());
}

#[test]
fn hash_survives_a_serialization_roundtrip() {
    let meta = record();
    let back: Metadata = serde_json::from_str(&meta.to_json().unwrap()).unwrap();
    assert_eq!(meta.hash(), back.hash());
}
