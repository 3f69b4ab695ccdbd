//! Structural and semantic validation of raw records.
//!
//! Validation is advisory: nothing here returns an error. Every
//! inconsistency, from a malformed header to a value breaking its format
//! rule, is carried as data inside the [`ValidationReport`].

use serde::Serialize;

use crate::elements::{Element, FieldSet, MandatoryElement};
use crate::encode::{
    DATA_ELEMENT_SEPARATOR, PREFIX, RECORD_SEPARATOR, SEGMENT_TERMINATOR, STANDARD_VERSION,
    SUBFILE_OFFSET,
};
use crate::rules;

const SEPARATORS: [char; 3] = [DATA_ELEMENT_SEPARATOR, RECORD_SEPARATOR, SEGMENT_TERMINATOR];

/// Reconciliation outcome for one rule-table tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldStatus {
    /// Scanned value agrees with the expected value (or nothing disagrees).
    Match,
    /// Scanned value disagrees with the expected value.
    Mismatch,
    /// Tag absent from the scan although the rule requires it.
    MissingInScan,
    /// Scanned value breaks the tag's format rule.
    FormatError,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldResult {
    pub tag: String,
    pub description: String,
    /// Value from the expected/form side, when one was supplied.
    pub expected: Option<String>,
    /// Value extracted from the raw record; `None` when not found.
    pub scanned: Option<String>,
    pub status: FieldStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub header_valid: bool,
    pub header_errors: Vec<String>,
    /// The raw input, echoed for diagnostics.
    pub raw: String,
    /// One result per rule-table tag, in report order.
    pub fields: Vec<FieldResult>,
    /// Body lines with tags outside the vocabulary, preserved verbatim and
    /// never format-checked.
    pub unknown: Vec<(String, String)>,
    /// 0–100; forced to 0 when the header failed validation.
    pub score: u8,
}

impl ValidationReport {
    pub fn matched(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.status == FieldStatus::Match)
            .count()
    }
}

/// Record validator.
///
/// The default (strict) variant checks the control separators, version
/// marker and designator offset at their fixed byte positions; the lenient
/// variant only requires the compliance indicator and the file type
/// marker, for records produced by nonconforming writers.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    strict: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self { strict: true }
    }

    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Parses `raw`, checks every rule-table tag and reconciles against
    /// `expected`. Total; all failures are data in the report.
    pub fn validate(&self, raw: &str, expected: &FieldSet) -> ValidationReport {
        let mut header_errors = Vec::new();
        self.check_header(raw, &mut header_errors);
        let header_valid = header_errors.is_empty();

        let (lines, sliced) = candidate_lines(raw);

        let mut fields = Vec::with_capacity(Element::COUNT);
        for element in Element::all() {
            fields.push(check_element(element, &lines, expected));
        }

        let unknown = if sliced {
            lines
                .iter()
                .filter(|line| line.len() >= 3 && line.is_char_boundary(3))
                .filter(|line| Element::from_tag(&line[..3]).is_none())
                .map(|line| (line[..3].to_owned(), line[3..].to_owned()))
                .collect()
        } else {
            Vec::new()
        };

        let matched = fields
            .iter()
            .filter(|f| f.status == FieldStatus::Match)
            .count();
        let score = if header_valid {
            ((matched * 100) as f32 / Element::COUNT as f32).round() as u8
        } else {
            0
        };

        ValidationReport {
            header_valid,
            header_errors,
            raw: raw.to_owned(),
            fields,
            unknown,
            score,
        }
    }

    fn check_header(&self, raw: &str, errors: &mut Vec<String>) {
        let bytes = raw.as_bytes();

        if !raw.starts_with('@') {
            errors.push("missing compliance indicator `@`".to_owned());
        }

        if !raw.contains("ANSI ") {
            errors.push("missing file type marker `ANSI `".to_owned());
        }

        if !self.strict {
            return;
        }

        if bytes.len() < SUBFILE_OFFSET {
            errors.push("record shorter than header and subfile designator".to_owned());
            return;
        }

        if bytes.get(..PREFIX.len()) != Some(PREFIX.as_bytes()) {
            errors.push("malformed control separator sequence".to_owned());
        }

        if bytes.get(15..17) != Some(STANDARD_VERSION.as_bytes()) {
            errors.push("unsupported standard version".to_owned());
        }

        if bytes.get(23..27) != Some(b"0031".as_slice()) {
            errors.push("unexpected subfile offset".to_owned());
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits the record into candidate subfield lines.
///
/// In a conforming record the first subfield shares its line with the
/// 2-character subfile-type prefix, so when the 21+10 layout is plausible
/// the body is sliced at the designated offset and the prefix stripped;
/// otherwise the whole string is tokenized as a best effort. The second
/// return value reports whether the slice was taken.
fn candidate_lines(raw: &str) -> (Vec<&str>, bool) {
    if raw.starts_with('@') && raw.len() > SUBFILE_OFFSET && raw.is_char_boundary(SUBFILE_OFFSET) {
        let body = &raw[SUBFILE_OFFSET..];
        let body = body
            .strip_prefix("DL")
            .or_else(|| body.strip_prefix("ID"))
            .unwrap_or(body);
        (
            body.split(SEPARATORS).filter(|l| !l.is_empty()).collect(),
            true,
        )
    } else {
        (
            raw.split(SEPARATORS).filter(|l| !l.is_empty()).collect(),
            false,
        )
    }
}

fn check_element(element: Element, lines: &[&str], expected: &FieldSet) -> FieldResult {
    let rule = rules::lookup(element);
    let expected_value = expected.get(element);

    let line = lines
        .iter()
        .find(|line| line.as_bytes().get(..3) == Some(element.id().as_slice()));

    let (scanned, status) = match line {
        None => {
            let status = if rule.accepts_absence() {
                FieldStatus::Match
            } else {
                FieldStatus::MissingInScan
            };
            (None, status)
        }
        Some(line) => {
            let value = &line[3..];
            let status = if !rule.matches(value) {
                FieldStatus::FormatError
            } else {
                match expected_value {
                    Some(expected) => compare(element, expected, value),
                    None => FieldStatus::Match,
                }
            };
            (Some(value.to_owned()), status)
        }
    };

    FieldResult {
        tag: element.string_id().to_owned(),
        description: element.description().to_owned(),
        expected: expected_value.map(str::to_owned),
        scanned,
        status,
    }
}

/// Prefix containment check over normalized values: the scanned value must
/// contain the first 3 characters of the normalized expected value.
///
/// Known weak spot: short values with a shared prefix can false-match
/// ("SMITH" vs "SMITHSON"). Kept as-is for compatibility with deployed
/// readers of these reports.
fn compare(element: Element, expected: &str, scanned: &str) -> FieldStatus {
    // heights match whenever both sides carry a numeric component,
    // whatever the unit spelling
    if element == Element::Mandatory(MandatoryElement::Height)
        && has_digit(expected)
        && has_digit(scanned)
    {
        return FieldStatus::Match;
    }

    let expected = normalize_for_compare(expected);
    let scanned = normalize_for_compare(scanned);
    let probe: String = expected.chars().take(3).collect();

    if scanned.contains(&probe) {
        FieldStatus::Match
    } else {
        FieldStatus::Mismatch
    }
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

fn normalize_for_compare(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '\'')
        .flat_map(char::to_uppercase)
        .collect()
}
