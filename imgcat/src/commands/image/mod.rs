use crate::format::{self, Formattable};
use libimgcat::metadata::ImageMetadata;
use libimgcat::{
    ImageRecord, RawImage, RequestContext, is_image_active, is_image_available, parse_image_id,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

pub mod handlers;

/// Result of parsing an image reference
#[derive(Debug, Serialize)]
pub struct ParsedReference {
    /// Reference as given on the command line
    pub reference: String,
    /// Image identifier extracted from the reference
    pub image_id: String,
}

impl Formattable for ParsedReference {
    fn format_pretty(&self) -> String {
        self.image_id.clone()
    }
}

/// Policy verdicts for one image and caller
#[derive(Debug, Serialize)]
pub struct ImageCheck {
    /// Image identifier, if the record carried one
    pub id: Option<String>,
    /// Whether the caller may use the image
    pub available: bool,
    /// Whether the image is active
    pub active: bool,
}

impl Formattable for ImageCheck {
    fn format_pretty(&self) -> String {
        format!(
            "Image: {}\nAvailable: {} {}\nActive: {} {}",
            self.id.as_deref().unwrap_or("N/A"),
            format::verdict(self.available),
            yes_no(self.available),
            format::verdict(self.active),
            yes_no(self.active),
        )
    }
}

impl Formattable for ImageMetadata {
    fn format_pretty(&self) -> String {
        let mut output = String::new();
        let Value::Object(mut fields) = self.to_value() else {
            return output;
        };

        let properties = fields.remove("properties");
        for (key, value) in &fields {
            output.push_str(&format!("{}: {}\n", key, display_value(value)));
        }

        match properties {
            Some(Value::Object(props)) if !props.is_empty() => {
                output.push_str("properties:\n");
                for (key, value) in &props {
                    output.push_str(&format!("  {}: {}\n", key, display_value(value)));
                }
            }
            _ => output.push_str("properties: {}\n"),
        }

        output.trim_end().to_string()
    }
}

/// Parse an image reference into its identifier
pub fn parse_reference(reference: &str) -> Result<ParsedReference, String> {
    let image_id = parse_image_id(reference).map_err(|e| e.to_string())?;
    Ok(ParsedReference {
        reference: reference.to_string(),
        image_id,
    })
}

/// Read a raw image record from a file, or from stdin when `input` is `-`
pub fn read_record(input: &str) -> Result<RawImage, String> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(input).map_err(|e| format!("Failed to read {}: {}", input, e))?
    };
    parse_record(&text)
}

/// Parse a raw image record from JSON text
pub fn parse_record(text: &str) -> Result<RawImage, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("Invalid image record JSON: {}", e))?;
    RawImage::from_value(value).ok_or_else(|| "Image record must be a JSON object".to_string())
}

/// Evaluate the usage policies for `image` on behalf of `context`
pub fn check_record(image: &RawImage, context: &RequestContext) -> ImageCheck {
    ImageCheck {
        id: image
            .attribute("id")
            .and_then(Value::as_str)
            .map(str::to_string),
        available: is_image_available(context, image),
        active: is_image_active(image),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
