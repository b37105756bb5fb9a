//! Reconciliation between stored package rows and the public API shape.
//!
//! Reads are total: whatever historical shape (or garbage) a row carries, the
//! result is a well-formed [`PublicPackage`] with `inclusion` and `summary`
//! fully populated and every media path absolute. Writes go the other way,
//! re-deriving the legacy `included`/`excluded` columns from the combined
//! `inclusion` input and leaving stored paths untouched.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::media::resolver;
use crate::models::package::{
    Inclusion, PackageInput, PackageRow, PackageWrite, PublicPackage, Summary,
};
use crate::packages::codec;

/// Projects a stored row into the public package shape. Never fails;
/// malformed stored fields decode to their documented defaults.
pub fn normalize_for_read(row: PackageRow, base_url: &str) -> PublicPackage {
    let images = codec::decode_text(row.images.as_deref(), json!([]));
    let itinerary = codec::decode_text(row.itinerary.as_deref(), json!([]));

    // Priority-ordered decode: combined inclusion wins whenever the column
    // is non-NULL (even if it holds "{}"); the legacy split pair is
    // consulted only when the combined column is entirely absent.
    let inclusion = if row.inclusion.is_some() {
        decode_struct::<Inclusion>(row.inclusion.as_deref())
    } else if row.included.is_some() || row.excluded.is_some() {
        Inclusion {
            included: codec::decode_string_list(row.included.as_deref()),
            excluded: codec::decode_string_list(row.excluded.as_deref()),
            // No legacy source for these two.
            ..Inclusion::default()
        }
    } else {
        Inclusion::default()
    };

    // No legacy split source exists for summary.
    let summary = decode_struct::<Summary>(row.summary.as_deref());

    let name = row
        .name
        .filter(|n| !n.is_empty())
        .or(row.title)
        .unwrap_or_default();

    PublicPackage {
        id: row.id,
        name,
        slug: row.slug,
        country: row.country,
        days: row.days,
        image: resolver::resolve(row.image.as_deref().unwrap_or(""), base_url),
        price: row.price,
        stars: row.stars,
        description: row.description,
        images: absolutize_images(images, base_url),
        itinerary: absolutize_itinerary(itinerary, base_url),
        inclusion,
        summary,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Maps validated input onto `packages` column values. Mapping only: the
/// handler has already checked required fields. `inclusion` is split back
/// into the `included`/`excluded` columns; `booking_information` and
/// `cancellation_policy` have no column and are dropped here.
pub fn split_for_write(input: &PackageInput) -> PackageWrite {
    let inclusion = input.inclusion.clone().unwrap_or_default();

    PackageWrite {
        name: input
            .name
            .clone()
            .or_else(|| input.title.clone())
            .unwrap_or_default(),
        slug: input.slug.clone().unwrap_or_default(),
        country: input.country.clone().unwrap_or_default(),
        days: input.days.unwrap_or_default(),
        // Stored verbatim: absolutization happens only when serving.
        image: input.image.clone(),
        price: input.price,
        stars: input.stars,
        description: input.description.clone(),
        itinerary: input.itinerary.as_ref().and_then(codec::encode),
        included: codec::encode_as(&inclusion.included),
        excluded: codec::encode_as(&inclusion.excluded),
        summary: input.summary.as_ref().and_then(codec::encode),
        images: input.images.as_ref().and_then(codec::encode),
    }
}

/// Tolerant typed decode: missing members take their defaults, a wholly
/// mistyped value falls back to the documented default shape.
fn decode_struct<T: DeserializeOwned + Default>(raw: Option<&str>) -> T {
    match raw {
        None => T::default(),
        Some(text) => serde_json::from_str(text).unwrap_or_default(),
    }
}

/// Rewrites image entries: bare strings are absolutized directly, objects
/// get their `url` member absolutized, anything else passes through.
fn absolutize_images(images: Value, base_url: &str) -> Value {
    match images {
        Value::Array(entries) => Value::Array(
            entries
                .into_iter()
                .map(|entry| match entry {
                    Value::String(path) => Value::String(resolver::resolve(&path, base_url)),
                    Value::Object(mut members) => {
                        if let Some(Value::String(url)) = members.get("url") {
                            let absolute = resolver::resolve(url, base_url);
                            members.insert("url".to_string(), Value::String(absolute));
                        }
                        Value::Object(members)
                    }
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Rewrites each itinerary day's `image` and its `highlight[].img` members;
/// unrecognized shapes are left untouched rather than dropped.
fn absolutize_itinerary(itinerary: Value, base_url: &str) -> Value {
    let Value::Array(days) = itinerary else {
        return itinerary;
    };

    Value::Array(
        days.into_iter()
            .map(|day| {
                let mut members = match day {
                    Value::Object(members) => members,
                    other => return other,
                };

                if let Some(Value::String(path)) = members.get("image") {
                    let absolute = resolver::resolve(path, base_url);
                    members.insert("image".to_string(), Value::String(absolute));
                }

                match members.remove("highlight") {
                    Some(Value::Array(highlights)) => {
                        let rewritten = highlights
                            .into_iter()
                            .map(|entry| match entry {
                                Value::Object(mut highlight) => {
                                    if let Some(Value::String(img)) = highlight.get("img") {
                                        let absolute = resolver::resolve(img, base_url);
                                        highlight
                                            .insert("img".to_string(), Value::String(absolute));
                                    }
                                    Value::Object(highlight)
                                }
                                other => other,
                            })
                            .collect();
                        members.insert("highlight".to_string(), Value::Array(rewritten));
                    }
                    // A non-array highlight is an unrecognized shape; keep it.
                    Some(other) => {
                        members.insert("highlight".to_string(), other);
                    }
                    None => {}
                }

                Value::Object(members)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const BASE: &str = "https://site.test";

    fn row() -> PackageRow {
        PackageRow {
            id: 1,
            name: Some("Highlands Escape".to_string()),
            title: None,
            slug: "highlands-escape".to_string(),
            country: "Scotland".to_string(),
            days: 7,
            image: None,
            price: Some(1299.0),
            stars: Some(4),
            description: None,
            itinerary: None,
            inclusion: None,
            included: None,
            excluded: None,
            summary: None,
            images: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bare_row_yields_fully_defaulted_blocks() {
        let pkg = normalize_for_read(row(), BASE);
        assert_eq!(pkg.inclusion, Inclusion::default());
        assert_eq!(pkg.summary, Summary::default());
        assert_eq!(pkg.images, json!([]));
        assert_eq!(pkg.itinerary, json!([]));
        assert_eq!(pkg.image, "");
    }

    #[test]
    fn test_legacy_included_excluded_builds_inclusion() {
        let mut r = row();
        r.included = Some(r#"["Breakfast"]"#.to_string());
        r.excluded = Some(r#"["Lunch"]"#.to_string());

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(
            pkg.inclusion,
            Inclusion {
                included: vec!["Breakfast".to_string()],
                excluded: vec!["Lunch".to_string()],
                booking_information: String::new(),
                cancellation_policy: String::new(),
            }
        );
    }

    #[test]
    fn test_combined_inclusion_wins_over_legacy_pair() {
        let mut r = row();
        r.inclusion = Some(r#"{"included":["Guide"],"booking_information":"Pay on arrival"}"#.to_string());
        r.included = Some(r#"["Breakfast"]"#.to_string());
        r.excluded = Some(r#"["Lunch"]"#.to_string());

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(pkg.inclusion.included, vec!["Guide"]);
        assert!(pkg.inclusion.excluded.is_empty());
        assert_eq!(pkg.inclusion.booking_information, "Pay on arrival");
    }

    #[test]
    fn test_empty_combined_inclusion_still_wins() {
        let mut r = row();
        r.inclusion = Some("{}".to_string());
        r.included = Some(r#"["Breakfast"]"#.to_string());

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(pkg.inclusion, Inclusion::default());
    }

    #[test]
    fn test_malformed_stored_fields_decode_to_defaults() {
        let mut r = row();
        r.inclusion = Some("{broken".to_string());
        r.summary = Some("nope".to_string());
        r.images = Some("[[".to_string());
        r.itinerary = Some("42garbage".to_string());

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(pkg.inclusion, Inclusion::default());
        assert_eq!(pkg.summary, Summary::default());
        assert_eq!(pkg.images, json!([]));
        assert_eq!(pkg.itinerary, json!([]));
    }

    #[test]
    fn test_summary_partial_members_are_defaulted() {
        let mut r = row();
        r.summary = Some(r#"{"description":"A week in the glens"}"#.to_string());

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(pkg.summary.description, "A week in the glens");
        assert!(pkg.summary.activities.is_empty());
        assert!(pkg.summary.locations.is_empty());
    }

    #[test]
    fn test_name_falls_back_to_legacy_title() {
        let mut r = row();
        r.name = None;
        r.title = Some("Old Title".to_string());
        assert_eq!(normalize_for_read(r, BASE).name, "Old Title");

        let mut r = row();
        r.name = Some(String::new());
        r.title = Some("Old Title".to_string());
        assert_eq!(normalize_for_read(r, BASE).name, "Old Title");
    }

    #[test]
    fn test_main_image_is_absolutized() {
        let mut r = row();
        r.image = Some("/assets/x.jpg".to_string());
        assert_eq!(
            normalize_for_read(r, BASE).image,
            "https://site.test/assets/x.jpg"
        );
    }

    #[test]
    fn test_images_entries_rewritten_by_shape() {
        let mut r = row();
        r.images = Some(
            r#"["/a.png", {"url": "/b.png", "caption": "sunset"}, {"alt": "no url"}, 7]"#
                .to_string(),
        );

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(
            pkg.images,
            json!([
                "https://site.test/a.png",
                {"url": "https://site.test/b.png", "caption": "sunset"},
                {"alt": "no url"},
                7
            ])
        );
    }

    #[test]
    fn test_itinerary_day_and_highlight_images_rewritten() {
        let mut r = row();
        r.itinerary = Some(
            r#"[
                {"day": 1, "image": "/d1.png", "highlight": [{"img": "/h1.png", "text": "castle"}, "plain"]},
                {"day": 2, "highlight": "not a list"},
                "opaque"
            ]"#
            .to_string(),
        );

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(
            pkg.itinerary,
            json!([
                {"day": 1, "image": "https://site.test/d1.png",
                 "highlight": [{"img": "https://site.test/h1.png", "text": "castle"}, "plain"]},
                {"day": 2, "highlight": "not a list"},
                "opaque"
            ])
        );
    }

    #[test]
    fn test_non_array_highlight_survives_untouched() {
        let mut r = row();
        r.itinerary = Some(
            r#"[{"day": 1, "highlight": "sunset walk"}, {"day": 2, "highlight": {"img": 3}}]"#
                .to_string(),
        );

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(
            pkg.itinerary,
            json!([
                {"day": 1, "highlight": "sunset walk"},
                {"day": 2, "highlight": {"img": 3}}
            ])
        );
    }

    #[test]
    fn test_already_absolute_paths_survive_normalization() {
        let mut r = row();
        r.image = Some("https://cdn.test/x.jpg".to_string());
        r.images = Some(r#"["https://cdn.test/y.jpg"]"#.to_string());

        let pkg = normalize_for_read(r, BASE);
        assert_eq!(pkg.image, "https://cdn.test/x.jpg");
        assert_eq!(pkg.images, json!(["https://cdn.test/y.jpg"]));
    }

    fn input() -> PackageInput {
        PackageInput {
            name: Some("Highlands Escape".to_string()),
            slug: Some("highlands-escape".to_string()),
            country: Some("Scotland".to_string()),
            days: Some(7),
            ..PackageInput::default()
        }
    }

    #[test]
    fn test_write_derives_included_excluded_from_inclusion() {
        let mut i = input();
        i.inclusion = Some(Inclusion {
            included: vec!["Breakfast".to_string()],
            excluded: vec!["Lunch".to_string()],
            booking_information: "Pay on arrival".to_string(),
            cancellation_policy: "48h".to_string(),
        });

        let write = split_for_write(&i);
        assert_eq!(write.included, Some(r#"["Breakfast"]"#.to_string()));
        assert_eq!(write.excluded, Some(r#"["Lunch"]"#.to_string()));
        // Intentional data-loss boundary: no column for these two.
        let stored = format!("{:?}", write);
        assert!(!stored.contains("Pay on arrival"));
        assert!(!stored.contains("48h"));
    }

    #[test]
    fn test_write_empty_structured_fields_become_null() {
        let mut i = input();
        i.inclusion = Some(Inclusion::default());
        i.itinerary = Some(json!([]));
        i.images = Some(json!([]));
        i.summary = Some(json!({"description": "", "activities": [], "locations": []}));

        let write = split_for_write(&i);
        assert_eq!(write.included, None);
        assert_eq!(write.excluded, None);
        assert_eq!(write.itinerary, None);
        assert_eq!(write.images, None);
        assert_eq!(write.summary, None);
    }

    #[test]
    fn test_write_encodes_structured_fields_wholesale() {
        let mut i = input();
        i.itinerary = Some(json!([{"day": 1, "image": "/d1.png"}]));
        i.summary = Some(json!({"description": "A week", "activities": ["hiking"]}));

        let write = split_for_write(&i);
        assert_eq!(
            write.itinerary.as_deref().map(|t| serde_json::from_str::<Value>(t).unwrap()),
            Some(json!([{"day": 1, "image": "/d1.png"}]))
        );
        assert!(write.summary.is_some());
    }

    #[test]
    fn test_write_never_absolutizes_paths() {
        let mut i = input();
        i.image = Some("/assets/x.jpg".to_string());
        let write = split_for_write(&i);
        assert_eq!(write.image, Some("/assets/x.jpg".to_string()));
    }

    #[test]
    fn test_write_name_falls_back_to_title() {
        let mut i = input();
        i.name = None;
        i.title = Some("Old Title".to_string());
        assert_eq!(split_for_write(&i).name, "Old Title");
    }
}
