//! Codec for the AAMVA DL/ID Card Design Standard (2020) PDF417 data
//! record: encoding a set of named fields into the exact tag-delimited
//! string the standard requires, validating and reconciling a scanned
//! record against an expected field set, and normalizing free-form values
//! into the standard's canonical forms.
//!
//! See: <https://www.aamva.org/assets/best-practices,-guides,-standards,-manuals,-whitepapers/aamva-dl-id-card-design-standard-(2020)>
//!
//! The codec itself is total and pure. Encoding and validation never fail;
//! normalization degrades to sentinel values. Every call is a function of
//! its inputs and safe to run concurrently without coordination. The only
//! hard-failure surface is the external extraction boundary in
//! [`extract`].
mod macros;

pub mod elements;
pub mod encode;
pub mod extract;
pub mod normalize;
pub mod rules;
pub mod validate;

pub use elements::{Element, FieldSet, MandatoryElement, OptionalElement, SubfileType};
pub use encode::{encode, SymbologyParams};
pub use extract::ExtractionError;
pub use validate::{FieldResult, FieldStatus, ValidationReport, Validator};
