//! Static per-tag format rules.
//!
//! Each known element maps to one immutable [`Rule`]: a character-class and
//! length constraint, or a closed value set. The table is built once and
//! never written afterwards; tags outside the vocabulary have no rule and
//! are never format-checked.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::elements::{Element, MandatoryElement, OptionalElement};

/// ASCII character class, as the standard writes its A/N/ANS field specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Uppercase letters.
    Alpha,
    /// Digits.
    Numeric,
    /// The full printable range, 0x20–0x7E.
    AlphaNumericSpecial,
    /// Uppercase letters plus space, hyphen and apostrophe (name fields).
    NamePunct,
    /// Uppercase letters and digits plus space and hyphen (ID numbers).
    IdPunct,
}

impl CharClass {
    pub fn contains(self, c: u8) -> bool {
        match self {
            Self::Alpha => c.is_ascii_uppercase(),
            Self::Numeric => c.is_ascii_digit(),
            Self::AlphaNumericSpecial => (0x20..=0x7e).contains(&c),
            Self::NamePunct => c.is_ascii_uppercase() || matches!(c, b' ' | b'-' | b'\''),
            Self::IdPunct => {
                c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, b' ' | b'-')
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Every byte in `class`, length within `min..=max`.
    Chars {
        class: CharClass,
        min: usize,
        max: usize,
    },
    /// Exactly one of the listed values.
    OneOf(&'static [&'static str]),
}

/// Format rule for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub constraint: Constraint,
    /// When set, the element may be absent from a record without being
    /// reported missing.
    pub optional: bool,
}

impl Rule {
    const fn chars(class: CharClass, min: usize, max: usize) -> Self {
        Self {
            constraint: Constraint::Chars { class, min, max },
            optional: false,
        }
    }

    const fn one_of(values: &'static [&'static str]) -> Self {
        Self {
            constraint: Constraint::OneOf(values),
            optional: false,
        }
    }

    const fn or_absent(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn accepts_absence(&self) -> bool {
        self.optional
    }

    pub fn matches(&self, value: &str) -> bool {
        match self.constraint {
            Constraint::Chars { class, min, max } => {
                value.len() >= min
                    && value.len() <= max
                    && value.bytes().all(|b| class.contains(b))
            }
            Constraint::OneOf(values) => values.contains(&value),
        }
    }
}

use CharClass::{Alpha, AlphaNumericSpecial as Ans, NamePunct, Numeric};

const TABLE: [(Element, Rule); Element::COUNT] = [
    (
        Element::Mandatory(MandatoryElement::VehicleClass),
        Rule::chars(Ans, 1, 6),
    ),
    (
        Element::Mandatory(MandatoryElement::RestrictionCodes),
        Rule::chars(Ans, 1, 12),
    ),
    (
        Element::Mandatory(MandatoryElement::EndorsementCodes),
        Rule::chars(Ans, 1, 5),
    ),
    (
        Element::Mandatory(MandatoryElement::ExpirationDate),
        Rule::chars(Numeric, 8, 8),
    ),
    (
        Element::Mandatory(MandatoryElement::FamilyName),
        Rule::chars(NamePunct, 1, 40),
    ),
    (
        Element::Mandatory(MandatoryElement::FirstName),
        Rule::chars(NamePunct, 1, 40),
    ),
    (
        Element::Mandatory(MandatoryElement::MiddleName),
        Rule::chars(NamePunct, 1, 40),
    ),
    (
        Element::Mandatory(MandatoryElement::IssueDate),
        Rule::chars(Numeric, 8, 8),
    ),
    (
        Element::Mandatory(MandatoryElement::DateOfBirth),
        Rule::chars(Numeric, 8, 8),
    ),
    (
        Element::Mandatory(MandatoryElement::Sex),
        Rule::one_of(&["1", "2", "9"]),
    ),
    (
        Element::Mandatory(MandatoryElement::EyeColor),
        Rule::chars(Alpha, 3, 3),
    ),
    (
        Element::Mandatory(MandatoryElement::Height),
        Rule::chars(Ans, 6, 6),
    ),
    (
        Element::Mandatory(MandatoryElement::StreetAddress),
        Rule::chars(Ans, 1, 35),
    ),
    (
        Element::Mandatory(MandatoryElement::City),
        Rule::chars(Ans, 1, 20),
    ),
    (
        Element::Mandatory(MandatoryElement::JurisdictionCode),
        Rule::chars(Alpha, 2, 2),
    ),
    (
        Element::Mandatory(MandatoryElement::PostalCode),
        Rule::chars(Ans, 1, 11),
    ),
    (
        Element::Mandatory(MandatoryElement::CustomerIdNumber),
        Rule::chars(CharClass::IdPunct, 1, 25),
    ),
    (
        Element::Mandatory(MandatoryElement::DocumentDiscriminator),
        Rule::chars(Ans, 1, 25),
    ),
    (
        Element::Mandatory(MandatoryElement::Country),
        Rule::one_of(&["USA", "CAN"]),
    ),
    (
        Element::Optional(OptionalElement::FamilyNameTruncation),
        Rule::one_of(&["T", "N", "U"]).or_absent(),
    ),
    (
        Element::Optional(OptionalElement::FirstNameTruncation),
        Rule::one_of(&["T", "N", "U"]).or_absent(),
    ),
    (
        Element::Optional(OptionalElement::MiddleNameTruncation),
        Rule::one_of(&["T", "N", "U"]).or_absent(),
    ),
    (
        Element::Optional(OptionalElement::NameSuffix),
        Rule::chars(Ans, 1, 5).or_absent(),
    ),
    (
        Element::Optional(OptionalElement::ComplianceType),
        Rule::one_of(&["F", "N"]).or_absent(),
    ),
    (
        Element::Optional(OptionalElement::OrganDonorIndicator),
        Rule::one_of(&["1"]).or_absent(),
    ),
    (
        // accepts the canonical `NNN LB` form the encoder writes
        Element::Optional(OptionalElement::Weight),
        Rule::chars(Ans, 1, 6).or_absent(),
    ),
    (
        Element::Optional(OptionalElement::HairColor),
        Rule::chars(Alpha, 1, 12).or_absent(),
    ),
];

lazy_static! {
    static ref RULES: HashMap<Element, Rule> = TABLE.into_iter().collect();
}

/// Looks up the rule for a known element. Every vocabulary element has one.
pub fn lookup(element: Element) -> &'static Rule {
    &RULES[&element]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_element_has_a_rule() {
        for element in Element::all() {
            let _ = lookup(element);
        }
    }

    #[test]
    fn id_number_constraint() {
        let rule = lookup(Element::Mandatory(MandatoryElement::CustomerIdNumber));
        assert!(rule.matches("D1234567"));
        assert!(rule.matches("D-123 456"));
        assert!(!rule.matches(""));
        assert!(!rule.matches("d1234567"));
        assert!(!rule.matches(&"9".repeat(26)));
    }

    #[test]
    fn name_constraint() {
        let rule = lookup(Element::Mandatory(MandatoryElement::FamilyName));
        assert!(rule.matches("O'BRIEN-SMITH"));
        assert!(rule.matches("NONE"));
        assert!(!rule.matches("SMITH3"));
    }

    #[test]
    fn date_constraint() {
        let rule = lookup(Element::Mandatory(MandatoryElement::DateOfBirth));
        assert!(rule.matches("01151990"));
        assert!(!rule.matches("0115199"));
        assert!(!rule.matches("0115199A"));
    }

    #[test]
    fn closed_sets() {
        let sex = lookup(Element::Mandatory(MandatoryElement::Sex));
        assert!(sex.matches("1") && sex.matches("2") && sex.matches("9"));
        assert!(!sex.matches("3") && !sex.matches("NONE"));

        let country = lookup(Element::Mandatory(MandatoryElement::Country));
        assert!(country.matches("USA") && country.matches("CAN"));
        assert!(!country.matches("MEX"));
    }

    #[test]
    fn optional_rules_accept_absence() {
        assert!(lookup(Element::Optional(OptionalElement::Weight)).accepts_absence());
        assert!(lookup(Element::Optional(OptionalElement::NameSuffix)).accepts_absence());
        assert!(!lookup(Element::Mandatory(MandatoryElement::EyeColor)).accepts_absence());
    }

    #[test]
    fn canonical_height_and_weight_forms_pass() {
        assert!(lookup(Element::Mandatory(MandatoryElement::Height)).matches("071 IN"));
        assert!(lookup(Element::Optional(OptionalElement::Weight)).matches("185 LB"));
    }
}
