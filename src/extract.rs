//! Boundary with the external vision/extraction service.
//!
//! The service receives an image and the tag vocabulary and answers with a
//! JSON object mapping tags to raw string values. This module is the only
//! place the crate can fail hard: a response that cannot be parsed as the
//! exchange format is an [`ExtractionError`], distinct from the soft
//! sentinel degradation of [`crate::normalize`]. Raw values must pass
//! through [`merge_extracted`] before being trusted into a [`FieldSet`].

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::elements::{Element, FieldSet, MandatoryElement, OptionalElement};
use crate::normalize;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unparseable extraction response: {0}")]
    Unparseable(#[from] serde_json::Error),

    #[error("extraction response is not a JSON object")]
    NotAnObject,

    #[error("empty extraction response")]
    Empty,
}

/// Tag → description hints handed to the extraction service so it knows
/// which fields to look for.
pub fn field_vocabulary() -> BTreeMap<&'static str, &'static str> {
    Element::all()
        .map(|element| (element.string_id(), element.description()))
        .collect()
}

/// Parses the service response into a tag → raw value map.
///
/// Model responses sometimes wrap the object in prose or code fences, so
/// the outermost `{...}` span is sliced out before parsing. Null and empty
/// values are dropped; numbers are accepted and stringified.
pub fn parse_response(body: &str) -> Result<BTreeMap<String, String>, ExtractionError> {
    let trimmed = body.trim();
    let json = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    };

    let value: Value = serde_json::from_str(json)?;
    let object = value.as_object().ok_or(ExtractionError::NotAnObject)?;

    let mut fields = BTreeMap::new();
    for (tag, value) in object {
        let text = match value {
            Value::String(s) => s.trim().to_owned(),
            Value::Number(n) => n.to_string(),
            Value::Null => continue,
            other => other.to_string(),
        };
        if text.is_empty() {
            continue;
        }
        fields.insert(tag.trim().to_ascii_uppercase(), text);
    }

    if fields.is_empty() {
        return Err(ExtractionError::Empty);
    }

    debug!(count = fields.len(), "parsed extraction response");
    Ok(fields)
}

/// Normalizes each extracted value for its tag and merges it into the
/// field set. Tags outside the vocabulary are preserved verbatim.
pub fn merge_extracted(fields: &mut FieldSet, extracted: BTreeMap<String, String>) {
    for (tag, raw) in extracted {
        match Element::from_tag(&tag) {
            Some(element) => {
                fields.set_element(element, normalized(element, &raw));
            }
            None => {
                warn!(%tag, "unrecognized tag in extraction response");
                fields.set(&tag, raw);
            }
        }
    }
}

fn normalized(element: Element, raw: &str) -> String {
    match element {
        Element::Mandatory(MandatoryElement::Height) => normalize::normalize_height(raw),
        Element::Mandatory(
            MandatoryElement::ExpirationDate
            | MandatoryElement::IssueDate
            | MandatoryElement::DateOfBirth,
        ) => normalize::normalize_date(raw),
        Element::Optional(OptionalElement::Weight) => normalize::normalize_weight(raw),
        Element::Mandatory(_) => normalize::sanitize_text(raw, normalize::NONE_PLACEHOLDER),
        Element::Optional(_) => normalize::sanitize_text(raw, normalize::UNAVAILABLE),
    }
}
