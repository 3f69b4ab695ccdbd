//! Data element vocabulary of the 2020 card design standard, and the
//! [`FieldSet`] bag consumed by the encoder and the validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::macros::data_elements_enum;

data_elements_enum! {
    /// Mandatory data elements, declared in the order they are written to
    /// the subfile body.
    pub enum MandatoryElement {
        /// Jurisdiction-specific vehicle class (DCA).
        VehicleClass: b"DCA" = "Vehicle class",

        /// Jurisdiction-specific restriction codes (DCB).
        RestrictionCodes: b"DCB" = "Restriction codes",

        /// Jurisdiction-specific endorsement codes (DCD).
        EndorsementCodes: b"DCD" = "Endorsement codes",

        /// Document Expiration Date (DBA).
        ExpirationDate: b"DBA" = "Document expiration date",

        /// Customer Family Name (DCS).
        FamilyName: b"DCS" = "Family name",

        /// Customer First Name (DAC).
        FirstName: b"DAC" = "First name",

        /// Customer Middle Name(s) (DAD).
        MiddleName: b"DAD" = "Middle name",

        /// Document Issue Date (DBD).
        IssueDate: b"DBD" = "Document issue date",

        /// Date of Birth (DBB).
        DateOfBirth: b"DBB" = "Date of birth",

        /// Physical Description – Sex (DBC).
        Sex: b"DBC" = "Sex",

        /// Physical Description – Eye Color (DAY).
        EyeColor: b"DAY" = "Eye color",

        /// Physical Description – Height (DAU).
        Height: b"DAU" = "Height",

        /// Address – Street 1 (DAG).
        StreetAddress: b"DAG" = "Street address",

        /// Address – City (DAI).
        City: b"DAI" = "City",

        /// Address – Jurisdiction Code (DAJ).
        JurisdictionCode: b"DAJ" = "State",

        /// Address – Postal Code (DAK).
        PostalCode: b"DAK" = "Postal code",

        /// Customer ID Number (DAQ).
        CustomerIdNumber: b"DAQ" = "License or ID number",

        /// Document Discriminator (DCF).
        DocumentDiscriminator: b"DCF" = "Document discriminator",

        /// Country Identification (DCG).
        Country: b"DCG" = "Country"
    }
}

data_elements_enum! {
    /// Optional and conditional data elements, in emit order. The three
    /// truncation indicators are conditional: the encoder always writes
    /// them, defaulting to `N`.
    pub enum OptionalElement {
        /// Family name truncation (DDE).
        FamilyNameTruncation: b"DDE" = "Family name truncation",

        /// First name truncation (DDF).
        FirstNameTruncation: b"DDF" = "First name truncation",

        /// Middle name truncation (DDG).
        MiddleNameTruncation: b"DDG" = "Middle name truncation",

        /// Name Suffix (DCU).
        NameSuffix: b"DCU" = "Name suffix",

        /// DHS compliance indicator (DDA).
        ComplianceType: b"DDA" = "REAL ID compliance",

        /// Organ donor = "1" (DDK).
        OrganDonorIndicator: b"DDK" = "Organ donor indicator",

        /// Cardholder weight in pounds (DAW).
        Weight: b"DAW" = "Weight",

        /// Hair color (DAZ).
        HairColor: b"DAZ" = "Hair color"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Mandatory(MandatoryElement),
    Optional(OptionalElement),
}

impl Element {
    pub fn from_id(id: &[u8; 3]) -> Option<Self> {
        MandatoryElement::from_id(id)
            .map(Self::Mandatory)
            .or_else(|| OptionalElement::from_id(id).map(Self::Optional))
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        <[u8; 3]>::try_from(tag.as_bytes())
            .ok()
            .and_then(|id| Self::from_id(&id))
    }

    pub fn id(&self) -> &'static [u8; 3] {
        match self {
            Self::Mandatory(e) => e.id(),
            Self::Optional(e) => e.id(),
        }
    }

    pub fn string_id(&self) -> &'static str {
        match self {
            Self::Mandatory(e) => e.string_id(),
            Self::Optional(e) => e.string_id(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Mandatory(e) => e.description(),
            Self::Optional(e) => e.description(),
        }
    }

    /// Every known element, mandatory first, in report order.
    pub fn all() -> impl Iterator<Item = Self> {
        MandatoryElement::LIST
            .into_iter()
            .map(Self::Mandatory)
            .chain(OptionalElement::LIST.into_iter().map(Self::Optional))
    }

    pub const COUNT: usize = MandatoryElement::COUNT + OptionalElement::COUNT;
}

/// Record subtype, naming the subfile carried by the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubfileType {
    /// Driver's license.
    Dl,
    /// Identification card.
    Id,
}

impl SubfileType {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Dl => "DL",
            Self::Id => "ID",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "DL" => Some(Self::Dl),
            "ID" => Some(Self::Id),
            _ => None,
        }
    }
}

/// An ordered bag of tagged values plus the record metadata.
///
/// Known tags live in a closed map keyed by [`Element`]; tags outside the
/// vocabulary are preserved verbatim in a side map and are never validated
/// against the rule table. Both maps iterate in a stable order, so encoding
/// the same logical field set twice produces the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    issuer_id: String,
    jurisdiction_version: u8,
    subfile_type: SubfileType,
    known: BTreeMap<Element, String>,
    unknown: BTreeMap<String, String>,
}

impl FieldSet {
    pub fn new(
        subfile_type: SubfileType,
        issuer_id: impl Into<String>,
        jurisdiction_version: u8,
    ) -> Self {
        Self {
            issuer_id: issuer_id.into(),
            jurisdiction_version,
            subfile_type,
            known: BTreeMap::new(),
            unknown: BTreeMap::new(),
        }
    }

    pub fn subfile_type(&self) -> SubfileType {
        self.subfile_type
    }

    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    pub fn jurisdiction_version(&self) -> u8 {
        self.jurisdiction_version
    }

    /// Sets a value by tag, routing it to the known map when the tag is in
    /// the vocabulary and to the unknown side map otherwise.
    pub fn set(&mut self, tag: &str, value: impl Into<String>) {
        match Element::from_tag(tag) {
            Some(element) => self.set_element(element, value),
            None => {
                self.unknown.insert(tag.to_owned(), value.into());
            }
        }
    }

    pub fn set_element(&mut self, element: Element, value: impl Into<String>) {
        self.known.insert(element, value.into());
    }

    pub fn get(&self, element: Element) -> Option<&str> {
        self.known.get(&element).map(String::as_str)
    }

    pub fn get_tag(&self, tag: &str) -> Option<&str> {
        match Element::from_tag(tag) {
            Some(element) => self.get(element),
            None => self.unknown.get(tag).map(String::as_str),
        }
    }

    pub fn known(&self) -> impl Iterator<Item = (Element, &str)> {
        self.known.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn unknown(&self) -> impl Iterator<Item = (&str, &str)> {
        self.unknown.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for element in Element::all() {
            assert_eq!(Element::from_id(element.id()), Some(element));
            assert_eq!(element.string_id().len(), 3);
        }
    }

    #[test]
    fn vocabulary_count() {
        assert_eq!(MandatoryElement::COUNT, 19);
        assert_eq!(OptionalElement::COUNT, 8);
        assert_eq!(Element::all().count(), Element::COUNT);
    }

    #[test]
    fn unknown_tags_are_kept_aside() {
        let mut fields = FieldSet::new(SubfileType::Dl, "636014", 0);
        fields.set("DCS", "SMITH");
        fields.set("ZVA", "JURISDICTION DATA");

        assert_eq!(
            fields.get(Element::Mandatory(MandatoryElement::FamilyName)),
            Some("SMITH")
        );
        assert_eq!(fields.get_tag("ZVA"), Some("JURISDICTION DATA"));
        assert_eq!(fields.unknown().count(), 1);
    }
}
