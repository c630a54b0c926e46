//! Translation of raw catalog records into canonical image metadata.
//!
//! [`translate`] runs three stages in order:
//!
//! 1. [`extract_attributes`] copies the fixed attribute set off the record and
//!    buckets everything else under `properties`.
//! 2. [`convert_timestamps`] parses the timestamp attributes into naive UTC
//!    date-times.
//! 3. [`decode_nested_properties`] decodes properties that the catalog stores
//!    as JSON text.

use crate::error::{CatalogError, Result};
use crate::record::ImageRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
mod tests;

/// Attributes copied verbatim from the catalog record.
pub const IMAGE_ATTRIBUTES: [&str; 18] = [
    "size",
    "disk_format",
    "owner",
    "container_format",
    "checksum",
    "id",
    "name",
    "created_at",
    "updated_at",
    "deleted_at",
    "deleted",
    "status",
    "min_disk",
    "min_ram",
    "tags",
    "visibility",
    "protected",
    "file",
];

/// Schema attribute. Always copied, never treated as a property.
pub const SCHEMA_ATTRIBUTE: &str = "schema";

/// Properties the catalog stores as JSON-encoded text.
pub const JSON_PROPERTIES: [&str; 2] = ["block_device_mapping", "mappings"];

/// Output of the extraction stage.
///
/// `attributes` holds every fixed attribute plus `schema`, with `null` for
/// anything the record did not carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedImage {
    pub attributes: Map<String, Value>,
    pub properties: Map<String, Value>,
}

/// Canonical, flattened image metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageMetadata {
    pub size: Value,
    pub disk_format: Value,
    pub owner: Value,
    pub container_format: Value,
    pub checksum: Value,
    pub id: Value,
    pub name: Value,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
    pub deleted: Value,
    pub status: Value,
    pub min_disk: Value,
    pub min_ram: Value,
    pub tags: Value,
    pub visibility: Value,
    pub protected: Value,
    pub file: Value,
    pub schema: Value,
    pub properties: Map<String, Value>,
}

impl ImageMetadata {
    /// Returns the metadata as a JSON object keyed by attribute name.
    pub fn to_value(&self) -> Value {
        // A struct of JSON values and date-times always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Converts a catalog record into canonical metadata.
///
/// # Examples
///
/// ```
/// use libimgcat::metadata::translate;
/// use libimgcat::record::RawImage;
///
/// let image = RawImage::default()
///     .with("id", "8b9d1a6e-2d4f-4a7c-9f0e-6f1b2c3d4e5f")
///     .with("status", "active")
///     .with("kernel_id", "k1");
///
/// let metadata = translate(&image).unwrap();
/// assert_eq!(metadata.status, "active");
/// assert_eq!(metadata.properties["kernel_id"], "k1");
/// assert!(metadata.name.is_null());
/// ```
pub fn translate<R: ImageRecord + ?Sized>(image: &R) -> Result<ImageMetadata> {
    let extracted = extract_attributes(image);
    let metadata = convert_timestamps(extracted)?;
    decode_nested_properties(&metadata)
}

/// Splits a record into fixed attributes and free-form properties.
pub fn extract_attributes<R: ImageRecord + ?Sized>(image: &R) -> ExtractedImage {
    let mut attributes = Map::new();
    for name in IMAGE_ATTRIBUTES {
        attributes.insert(name.to_string(), lookup(image, name));
    }
    // Some clients only expose the schema through direct lookup.
    attributes.insert(SCHEMA_ATTRIBUTE.to_string(), lookup(image, SCHEMA_ATTRIBUTE));

    let properties = image
        .attribute_names()
        .filter(|name| *name != SCHEMA_ATTRIBUTE && !IMAGE_ATTRIBUTES.contains(name))
        .map(|name| (name.to_string(), lookup(image, name)))
        .collect();

    ExtractedImage {
        attributes,
        properties,
    }
}

/// Builds [`ImageMetadata`] from extracted attributes, parsing timestamps.
///
/// Unset timestamps (null, empty text, `false`, zero, empty containers)
/// become `None`. Anything else must be ISO-8601 text; values without an
/// offset are taken as UTC.
pub fn convert_timestamps(extracted: ExtractedImage) -> Result<ImageMetadata> {
    let ExtractedImage {
        mut attributes,
        properties,
    } = extracted;

    let mut take = |name: &str| attributes.remove(name).unwrap_or(Value::Null);

    let created_at = parse_timestamp("created_at", take("created_at"))?;
    let updated_at = parse_timestamp("updated_at", take("updated_at"))?;
    let deleted_at = parse_timestamp("deleted_at", take("deleted_at"))?;

    Ok(ImageMetadata {
        size: take("size"),
        disk_format: take("disk_format"),
        owner: take("owner"),
        container_format: take("container_format"),
        checksum: take("checksum"),
        id: take("id"),
        name: take("name"),
        created_at,
        updated_at,
        deleted_at,
        deleted: take("deleted"),
        status: take("status"),
        min_disk: take("min_disk"),
        min_ram: take("min_ram"),
        tags: take("tags"),
        visibility: take("visibility"),
        protected: take("protected"),
        file: take("file"),
        schema: take(SCHEMA_ATTRIBUTE),
        properties,
    })
}

/// Returns a copy of `metadata` with JSON-text properties decoded.
///
/// Only [`JSON_PROPERTIES`] are touched, and only when they hold a string.
pub fn decode_nested_properties(metadata: &ImageMetadata) -> Result<ImageMetadata> {
    let mut metadata = metadata.clone();
    for name in JSON_PROPERTIES {
        if let Some(Value::String(text)) = metadata.properties.get(name) {
            tracing::trace!(property = name, "decoding JSON property");
            let decoded: Value =
                serde_json::from_str(text).map_err(|e| CatalogError::json(name, e))?;
            metadata.properties.insert(name.to_string(), decoded);
        }
    }
    Ok(metadata)
}

/// Parses an ISO-8601 timestamp into a naive UTC date-time.
///
/// Extended (`2024-03-01T12:00:00`) and basic (`20240301T120000`) forms are
/// accepted, with `T` or a space between date and time. Minutes and seconds
/// may be left off, the fraction may use `.` or `,`, and the offset may be
/// `Z`, `±HH`, `±HHMM` or `±HH:MM`. Values without an offset are taken as UTC.
///
/// # Examples
///
/// ```
/// use libimgcat::metadata::parse_isotime;
///
/// let ts = parse_isotime("2024-03-01T12:00:00+02:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01 10:00:00");
///
/// let ts = parse_isotime("20240301T1200+02").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01 10:00:00");
/// ```
pub fn parse_isotime(text: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }

    let Some((date, time)) = text.split_once(['T', ' ']) else {
        return NaiveDate::parse_from_str(&extended_date(text), "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN));
    };

    let (clock, offset) = split_offset(time);
    let stamp = format!("{}T{}", extended_date(date), extended_clock(clock));
    match offset {
        Some(offset) => DateTime::parse_from_str(&(stamp + &offset), "%Y-%m-%dT%H:%M:%S%.f%:z")
            .map(|dt| dt.with_timezone(&Utc).naive_utc()),
        None => NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M:%S%.f"),
    }
}

/// `YYYYMMDD` becomes `YYYY-MM-DD`; anything else is left alone.
fn extended_date(date: &str) -> String {
    if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
    } else {
        date.to_string()
    }
}

/// Rewrites a clock reading as `HH:MM:SS[.f]`, filling in missing fields.
fn extended_clock(clock: &str) -> String {
    let (whole, fraction) = match clock.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (clock, None),
    };

    let mut fields: Vec<&str> = if whole.contains(':') || !whole.is_ascii() {
        whole.split(':').collect()
    } else {
        // Basic form: HH[MM[SS]]
        whole
            .as_bytes()
            .chunks(2)
            .filter_map(|pair| std::str::from_utf8(pair).ok())
            .collect()
    };
    while fields.len() < 3 {
        fields.push("00");
    }

    let mut out = fields.join(":");
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Splits a trailing UTC offset off `time`, normalized to `±HH:MM`.
fn split_offset(time: &str) -> (&str, Option<String>) {
    if let Some(clock) = time.strip_suffix('Z') {
        return (clock, Some("+00:00".to_string()));
    }

    let Some(at) = time.rfind(['+', '-']) else {
        return (time, None);
    };
    let (clock, offset) = time.split_at(at);
    let (sign, digits) = offset.split_at(1);
    let digits = digits.replace(':', "");

    let offset = match digits.len() {
        _ if !digits.is_ascii() => offset.to_string(),
        2 => format!("{sign}{digits}:00"),
        4 => format!("{sign}{}:{}", &digits[..2], &digits[2..]),
        _ => offset.to_string(),
    };
    (clock, Some(offset))
}

/// Null, `false`, zero and empty values carry no timestamp.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn parse_timestamp(name: &str, value: Value) -> Result<Option<NaiveDateTime>> {
    if is_unset(&value) {
        return Ok(None);
    }

    match value {
        Value::String(text) => match parse_isotime(&text) {
            Ok(ts) => Ok(Some(ts)),
            Err(e) => Err(CatalogError::timestamp(name, text.as_str(), Some(e))),
        },
        other => Err(CatalogError::timestamp(name.to_string(), other.to_string(), None)),
    }
}

fn lookup<R: ImageRecord + ?Sized>(image: &R, name: &str) -> Value {
    image.attribute(name).cloned().unwrap_or(Value::Null)
}
