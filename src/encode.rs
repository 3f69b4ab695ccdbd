//! Assembly of the wire record: 21-character header, 10-character subfile
//! designator, tagged subfile body.

use serde::{Deserialize, Serialize};

use crate::elements::{Element, FieldSet, MandatoryElement, OptionalElement};
use crate::normalize;

pub(crate) const DATA_ELEMENT_SEPARATOR: char = '\n';
pub(crate) const RECORD_SEPARATOR: char = '\x1e';
pub(crate) const SEGMENT_TERMINATOR: char = '\r';

pub(crate) const PREFIX: &str = "@\n\x1e\rANSI ";

/// 2020 revision of the standard.
pub(crate) const STANDARD_VERSION: &str = "10";

/// Single-subfile records only.
const ENTRY_COUNT: &str = "01";

/// Where the subfile starts when one designator follows the header.
pub(crate) const SUBFILE_OFFSET: usize = 31;

const TRUNCATION_INDICATORS: [OptionalElement; 3] = [
    OptionalElement::FamilyNameTruncation,
    OptionalElement::FirstNameTruncation,
    OptionalElement::MiddleNameTruncation,
];

const OPTIONAL_IF_PRESENT: [OptionalElement; 5] = [
    OptionalElement::NameSuffix,
    OptionalElement::ComplianceType,
    OptionalElement::OrganDonorIndicator,
    OptionalElement::Weight,
    OptionalElement::HairColor,
];

/// Encodes a field set into the exact record string carried by the PDF417
/// symbol.
///
/// Total: absent mandatory values degrade to their placeholder and absent
/// optional values are omitted. The output for a logically identical field
/// set is byte-stable regardless of insertion order.
pub fn encode(fields: &FieldSet) -> String {
    let body = encode_body(fields);
    let subfile_type = fields.subfile_type().prefix();
    let subfile_length = subfile_type.len() + body.len();

    let mut record = String::with_capacity(SUBFILE_OFFSET + subfile_length);

    // header
    record.push_str(PREFIX);
    record.push_str(&issuer_id(fields.issuer_id()));
    record.push_str(STANDARD_VERSION);
    record.push_str(&format!("{:02}", fields.jurisdiction_version() % 100));
    record.push_str(ENTRY_COUNT);

    // subfile designator
    record.push_str(subfile_type);
    record.push_str(&format!("{SUBFILE_OFFSET:04}"));
    record.push_str(&format!("{subfile_length:04}"));

    // subfile
    record.push_str(subfile_type);
    record.push_str(&body);

    record
}

/// Tagged subfields joined by the data element separator, terminated by the
/// segment terminator. The subfile-type prefix is not included.
fn encode_body(fields: &FieldSet) -> String {
    let mut entries: Vec<(&str, String)> = Vec::with_capacity(Element::COUNT);

    for element in MandatoryElement::LIST {
        entries.push((element.string_id(), mandatory_value(fields, element)));
    }

    for element in TRUNCATION_INDICATORS {
        let raw = fields.get(Element::Optional(element)).unwrap_or("N");
        entries.push((element.string_id(), normalize::sanitize_text(raw, "N")));
    }

    for element in OPTIONAL_IF_PRESENT {
        if let Some(raw) = fields.get(Element::Optional(element)) {
            if raw.is_empty() {
                continue;
            }
            entries.push((element.string_id(), optional_value(element, raw)));
        }
    }

    for (tag, value) in fields.unknown() {
        entries.push((tag, value.to_owned()));
    }

    let mut body = String::new();
    let last = entries.len() - 1;
    for (i, (tag, value)) in entries.iter().enumerate() {
        body.push_str(tag);
        body.push_str(value);
        body.push(if i == last {
            SEGMENT_TERMINATOR
        } else {
            DATA_ELEMENT_SEPARATOR
        });
    }

    body
}

fn mandatory_value(fields: &FieldSet, element: MandatoryElement) -> String {
    let raw = fields.get(Element::Mandatory(element)).unwrap_or("");
    match element {
        MandatoryElement::Height => normalize::normalize_height(raw),
        _ => normalize::sanitize_text(raw, normalize::NONE_PLACEHOLDER),
    }
}

fn optional_value(element: OptionalElement, raw: &str) -> String {
    match element {
        OptionalElement::Weight => normalize::normalize_weight(raw),
        _ => normalize::sanitize_text(raw, normalize::UNAVAILABLE),
    }
}

/// Issuer identification number, exactly 6 characters: longer input is
/// truncated, shorter input left-padded with zeros.
fn issuer_id(id: &str) -> String {
    let truncated: String = id.trim().chars().take(6).collect();
    format!("{truncated:0>6}")
}

/// Parameters handed to the external PDF417 renderer together with the
/// encoded record. This crate never touches pixels; the renderer consumes
/// the record string and these knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbologyParams {
    /// Symbol type identifier.
    pub symbology: String,
    /// Reed-Solomon error correction level.
    pub error_correction_level: u8,
    /// Data columns; `None` lets the renderer auto-size rows and columns.
    pub columns: Option<u16>,
    /// Quiet-zone padding, in modules.
    pub quiet_zone: u8,
}

impl Default for SymbologyParams {
    fn default() -> Self {
        Self {
            symbology: "PDF417".to_owned(),
            error_correction_level: 5,
            columns: None,
            quiet_zone: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{FieldSet, SubfileType};

    fn minimal_fields() -> FieldSet {
        let mut fields = FieldSet::new(SubfileType::Dl, "636014", 0);
        fields.set("DCS", "SMITH");
        fields.set("DAC", "JOHN");
        fields.set("DBB", "01151990");
        fields.set("DBA", "01152030");
        fields.set("DAJ", "CA");
        fields.set("DAQ", "D1234567");
        fields
    }

    #[test]
    fn header_layout() {
        let record = encode(&minimal_fields());
        assert_eq!(&record[..21], "@\n\x1e\rANSI 636014100001");
        assert_eq!(&record[21..27], "DL0031");
    }

    #[test]
    fn designator_length_counts_the_subfile() {
        let record = encode(&minimal_fields());
        let length: usize = record[27..31].parse().unwrap();
        assert_eq!(length, record.len() - SUBFILE_OFFSET);
        assert!(record.ends_with('\r'));
    }

    #[test]
    fn issuer_id_is_always_six_characters() {
        assert_eq!(issuer_id("636014"), "636014");
        assert_eq!(issuer_id("636014999"), "636014");
        assert_eq!(issuer_id("77"), "000077");
    }

    #[test]
    fn repeated_encodes_are_identical() {
        let first = encode(&minimal_fields());

        // same logical content, different insertion order
        let mut fields = FieldSet::new(SubfileType::Dl, "636014", 0);
        fields.set("DAQ", "D1234567");
        fields.set("DAJ", "CA");
        fields.set("DBA", "01152030");
        fields.set("DBB", "01151990");
        fields.set("DAC", "JOHN");
        fields.set("DCS", "SMITH");

        assert_eq!(encode(&fields), first);
    }

    #[test]
    fn absent_height_degrades_to_the_sentinel() {
        let record = encode(&minimal_fields());
        assert!(record.contains("DAUunavl\n"));
    }
}
