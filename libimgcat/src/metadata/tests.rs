use super::*;
use crate::record::RawImage;
use chrono::NaiveDate;
use serde_json::json;

const IMAGE_ID: &str = "8b9d1a6e-2d4f-4a7c-9f0e-6f1b2c3d4e5f";

fn minimal_image() -> RawImage {
    RawImage::default()
        .with("id", IMAGE_ID)
        .with("status", "active")
        .with("owner", "p1")
        .with("visibility", "private")
}

fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test]
fn test_translate_minimal_record_has_no_properties() {
    let metadata = translate(&minimal_image()).unwrap();

    assert!(metadata.properties.is_empty());
    assert_eq!(metadata.id, IMAGE_ID);
    assert_eq!(metadata.status, "active");
    assert_eq!(metadata.owner, "p1");
    assert_eq!(metadata.visibility, "private");
    assert!(metadata.size.is_null());
    assert!(metadata.created_at.is_none());
    assert!(metadata.schema.is_null());
}

#[test]
fn test_translate_serializes_every_fixed_key() {
    let value = translate(&minimal_image()).unwrap().to_value();
    let object = value.as_object().unwrap();

    for name in IMAGE_ATTRIBUTES {
        assert!(object.contains_key(name), "missing {}", name);
    }
    assert!(object.contains_key(SCHEMA_ATTRIBUTE));
    assert_eq!(object["properties"], json!({}));
    assert_eq!(object.len(), IMAGE_ATTRIBUTES.len() + 2);
    assert!(object["name"].is_null());
}

#[test]
fn test_extract_buckets_unknown_attributes() {
    let image = minimal_image()
        .with("kernel_id", "k1")
        .with("hw_disk_bus", "scsi");

    let extracted = extract_attributes(&image);

    assert_eq!(extracted.properties.len(), 2);
    assert_eq!(extracted.properties["kernel_id"], "k1");
    assert_eq!(extracted.properties["hw_disk_bus"], "scsi");
    assert_eq!(extracted.attributes.len(), IMAGE_ATTRIBUTES.len() + 1);
    assert!(extracted.attributes["checksum"].is_null());
}

#[test]
fn test_extract_never_buckets_schema() {
    let image = minimal_image().with("schema", "/v2/schemas/image");

    let extracted = extract_attributes(&image);

    assert!(extracted.properties.is_empty());
    assert_eq!(extracted.attributes["schema"], "/v2/schemas/image");
}

#[test]
fn test_extract_keeps_present_null_property() {
    let image = minimal_image().with("ramdisk_id", Value::Null);

    let extracted = extract_attributes(&image);

    assert_eq!(extracted.properties.get("ramdisk_id"), Some(&Value::Null));
}

#[test]
fn test_convert_timestamps_normalizes_to_utc() {
    let image = minimal_image()
        .with("created_at", "2024-03-01T12:00:00Z")
        .with("updated_at", "2024-03-01T12:00:00+02:00")
        .with("deleted_at", "");

    let metadata = translate(&image).unwrap();

    assert_eq!(metadata.created_at, Some(naive(2024, 3, 1, 12, 0, 0)));
    assert_eq!(metadata.updated_at, Some(naive(2024, 3, 1, 10, 0, 0)));
    assert_eq!(metadata.deleted_at, None);
}

#[test]
fn test_convert_timestamps_null_is_none() {
    let image = minimal_image().with("deleted_at", Value::Null);

    let metadata = translate(&image).unwrap();

    assert_eq!(metadata.deleted_at, None);
}

#[test]
fn test_convert_timestamps_malformed_text_fails() {
    let image = minimal_image().with("created_at", "last tuesday");

    let err = translate(&image).unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Timestamp { ref attribute, source: Some(_), .. } if attribute == "created_at"
    ));
}

#[test]
fn test_convert_timestamps_non_text_fails() {
    let image = minimal_image().with("updated_at", 1709294400);

    let err = translate(&image).unwrap_err();

    assert!(matches!(err, CatalogError::Timestamp { source: None, .. }));
}

#[test]
fn test_convert_timestamps_unset_values_are_none() {
    let image = minimal_image()
        .with("created_at", 0)
        .with("updated_at", false)
        .with("deleted_at", "");

    let metadata = translate(&image).unwrap();

    assert_eq!(metadata.created_at, None);
    assert_eq!(metadata.updated_at, None);
    assert_eq!(metadata.deleted_at, None);
}

#[test]
fn test_convert_timestamps_true_is_malformed() {
    let image = minimal_image().with("deleted_at", true);

    let err = translate(&image).unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Timestamp { ref value, source: None, .. } if value == "true"
    ));
}

#[test]
fn test_parse_isotime_accepts_common_spellings() {
    let expected = naive(2024, 3, 1, 12, 0, 0);

    assert_eq!(parse_isotime("2024-03-01T12:00:00Z").unwrap(), expected);
    assert_eq!(parse_isotime("2024-03-01T12:00:00").unwrap(), expected);
    assert_eq!(parse_isotime("2024-03-01 12:00:00").unwrap(), expected);
    assert_eq!(parse_isotime("2024-03-01T13:00:00+0100").unwrap(), expected);
    assert_eq!(
        parse_isotime("2024-03-01").unwrap(),
        naive(2024, 3, 1, 0, 0, 0)
    );
    assert_eq!(parse_isotime("2024-03-01T14:00:00+02").unwrap(), expected);
    assert_eq!(parse_isotime("2024-03-01T12:00Z").unwrap(), expected);
    assert_eq!(parse_isotime("2024-03-01T12Z").unwrap(), expected);
    assert_eq!(parse_isotime("20240301T120000Z").unwrap(), expected);
    assert_eq!(parse_isotime("20240301T1030-0130").unwrap(), expected);
    assert_eq!(parse_isotime("2024-03-01 12:00").unwrap(), expected);
    assert_eq!(
        parse_isotime("20240301").unwrap(),
        naive(2024, 3, 1, 0, 0, 0)
    );
}

#[test]
fn test_parse_isotime_comma_fraction() {
    let ts = parse_isotime("2024-03-01T12:00:00,5+00:00").unwrap();
    assert_eq!(ts.and_utc().timestamp_subsec_millis(), 500);
}

#[test]
fn test_parse_isotime_rejects_garbage() {
    assert!(parse_isotime("last tuesday").is_err());
    assert!(parse_isotime("2024-03-01T25:00:00").is_err());
    assert!(parse_isotime("2024-03-01T12:00:00+2").is_err());
}

#[test]
fn test_parse_isotime_keeps_fraction() {
    let ts = parse_isotime("2024-03-01T12:00:00.250000Z").unwrap();
    assert_eq!(ts.and_utc().timestamp_subsec_millis(), 250);
}

#[test]
fn test_decode_block_device_mapping() {
    let image = minimal_image().with("block_device_mapping", r#"{"a":1}"#);

    let metadata = translate(&image).unwrap();

    assert_eq!(metadata.properties["block_device_mapping"], json!({"a": 1}));
}

#[test]
fn test_decode_mappings_list() {
    let image = minimal_image().with(
        "mappings",
        r#"[{"virtual": "root", "device": "/dev/vda"}]"#,
    );

    let metadata = translate(&image).unwrap();

    assert_eq!(
        metadata.properties["mappings"],
        json!([{"virtual": "root", "device": "/dev/vda"}])
    );
}

#[test]
fn test_decode_leaves_structured_values_alone() {
    let image = minimal_image().with("block_device_mapping", json!([{"boot_index": 0}]));

    let metadata = translate(&image).unwrap();

    assert_eq!(
        metadata.properties["block_device_mapping"],
        json!([{"boot_index": 0}])
    );
}

#[test]
fn test_decode_ignores_other_text_properties() {
    let image = minimal_image().with("os_distro", r#"{"not": "decoded"}"#);

    let metadata = translate(&image).unwrap();

    assert_eq!(metadata.properties["os_distro"], r#"{"not": "decoded"}"#);
}

#[test]
fn test_decode_malformed_json_fails() {
    let image = minimal_image().with("mappings", "{not json");

    let err = translate(&image).unwrap_err();

    assert!(matches!(err, CatalogError::Json { ref property, .. } if property == "mappings"));
}

#[test]
fn test_decode_does_not_mutate_input() {
    let mut original = ImageMetadata::default();
    original
        .properties
        .insert("block_device_mapping".to_string(), json!(r#"{"a":1}"#));

    let decoded = decode_nested_properties(&original).unwrap();

    assert_eq!(original.properties["block_device_mapping"], r#"{"a":1}"#);
    assert_eq!(decoded.properties["block_device_mapping"], json!({"a": 1}));
}

#[test]
fn test_translate_accepts_plain_map() {
    let map = minimal_image().into_inner();

    let metadata = translate(&map).unwrap();

    assert_eq!(metadata.id, IMAGE_ID);
}

#[test]
fn test_metadata_round_trips_through_json() {
    let image = minimal_image()
        .with("created_at", "2024-03-01T12:00:00Z")
        .with("kernel_id", "k1");
    let metadata = translate(&image).unwrap();

    let text = serde_json::to_string(&metadata).unwrap();
    let parsed: ImageMetadata = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, metadata);
}
