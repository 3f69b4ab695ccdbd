//! Canonicalization of free-form values into the representations the card
//! design standard mandates.
//!
//! Every function here is total: ambiguous input degrades to a sentinel
//! value instead of failing. The sentinels are part of the contract and
//! show up verbatim in encoded records.

use chrono::NaiveDate;

/// Sentinel for an optional value that could not be recovered.
pub const UNAVAILABLE: &str = "unavl";

/// Placeholder for a mandatory element with no value.
pub const NONE_PLACEHOLDER: &str = "NONE";

const DATE_FORMATS: [&str; 8] = [
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Canonicalizes a height into the `NNN IN` form.
///
/// Accepts a feet-inches form (`5-11`, `5'11"`, `5'-11"`) or a plain
/// numeral (already-total inches, including this function's own output).
/// Returns [`UNAVAILABLE`] when no digits can be extracted. Idempotent on
/// its own output.
pub fn normalize_height(raw: &str) -> String {
    let components: Vec<String> = raw
        .split(['\'', '-'])
        .map(digits)
        .filter(|part| !part.is_empty())
        .collect();

    if components.len() >= 2 {
        if let (Ok(feet), Ok(inches)) = (components[0].parse::<u32>(), components[1].parse::<u32>())
        {
            return format!("{:03} IN", feet * 12 + inches);
        }
    }

    let numeral = digits(raw);
    if numeral.is_empty() {
        UNAVAILABLE.to_owned()
    } else {
        format!("{numeral:0>3} IN")
    }
}

/// Canonicalizes a weight into the `NNN LB` form, or [`UNAVAILABLE`] when
/// the input carries no digits.
pub fn normalize_weight(raw: &str) -> String {
    let numeral = digits(raw);
    if numeral.is_empty() {
        UNAVAILABLE.to_owned()
    } else {
        format!("{numeral:0>3} LB")
    }
}

/// Uppercases, strips everything outside printable ASCII, trims. An empty
/// result becomes the supplied placeholder.
pub fn sanitize_text(raw: &str, placeholder: &str) -> String {
    let cleaned: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| (' '..='~').contains(c))
        .collect();
    let trimmed = cleaned.trim();

    if trimmed.is_empty() {
        placeholder.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Canonicalizes an externally-sourced date into 8 characters, MMDDYYYY.
///
/// An 8-digit input passes through unchanged. Anything else goes through a
/// generic date parse; as a last resort the digit string is zero-padded and
/// truncated to 8. The result always has 8 characters but is only
/// guaranteed to be a real date when one of the first two paths applied.
/// Callers treat a result that fails a later digit-only check as a soft
/// quality signal, not an error.
pub fn normalize_date(raw: &str) -> String {
    let numeral = digits(raw);
    if numeral.len() == 8 {
        return numeral;
    }

    let cleaned = raw.trim().replace(',', "");
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return date.format("%m%d%Y").to_string();
        }
    }

    format!("{numeral:0>8}").chars().take(8).collect()
}
