use aamva_dlid::{encode, Element, FieldSet, FieldStatus, MandatoryElement, SubfileType, Validator};

/// A field set with every mandatory element populated, values as a
/// jurisdiction form would supply them.
fn full_fields() -> FieldSet {
    let mut fields = FieldSet::new(SubfileType::Dl, "636014", 0);
    fields.set("DCA", "C");
    fields.set("DCB", "NONE");
    fields.set("DCD", "NONE");
    fields.set("DBA", "04192030");
    fields.set("DCS", "SMITH");
    fields.set("DAC", "JOHN");
    fields.set("DAD", "NONE");
    fields.set("DBD", "01012024");
    fields.set("DBB", "04191988");
    fields.set("DBC", "1");
    fields.set("DAY", "BRO");
    fields.set("DAU", "5-9");
    fields.set("DAG", "123 MAIN ST");
    fields.set("DAI", "ANYVILLE");
    fields.set("DAJ", "UT");
    fields.set("DAK", "84111");
    fields.set("DAQ", "F987654321");
    fields.set("DCF", "UTODOCDISCRIM");
    fields.set("DCG", "USA");
    fields
}

#[test]
fn round_trip_fully_matches() {
    let fields = full_fields();
    let report = Validator::new().validate(&encode(&fields), &fields);

    assert!(report.header_valid, "{:?}", report.header_errors);
    assert_eq!(report.score, 100);
    for field in &report.fields {
        assert_eq!(
            field.status,
            FieldStatus::Match,
            "{} ({:?} vs {:?})",
            field.tag,
            field.expected,
            field.scanned
        );
    }
}

#[test]
fn designator_length_matches_the_subfile() {
    for fields in [full_fields(), {
        let mut f = full_fields();
        f.set("DAW", "185 lbs");
        f.set("DAZ", "BLK");
        f.set("ZVA", "01");
        f
    }] {
        let record = encode(&fields);
        let length: usize = record[27..31].parse().unwrap();
        assert_eq!(length, record.len() - 31);
    }
}

#[test]
fn designator_offset_is_31() {
    let record = encode(&full_fields());
    assert_eq!(&record[23..27], "0031");
}

#[test]
fn subfile_body_carries_tagged_subfields() {
    // a minimally filled form; everything else defaults
    let mut fields = FieldSet::new(SubfileType::Dl, "636014", 0);
    fields.set("DCS", "SMITH");
    fields.set("DAC", "JOHN");
    fields.set("DBB", "01151990");
    fields.set("DBA", "01152030");
    fields.set("DAJ", "CA");
    fields.set("DAQ", "D1234567");

    let record = encode(&fields);

    for fragment in [
        "DCSSMITH\n",
        "DACJOHN\n",
        "DBB01151990\n",
        "DBA01152030\n",
        "DAJCA\n",
        "DAQD1234567\n",
    ] {
        assert!(record.contains(fragment), "missing {fragment:?}");
    }
    assert!(record.ends_with("DDGN\r"));
}

#[test]
fn empty_mandatory_family_name_encodes_the_placeholder() {
    let mut fields = full_fields();
    fields.set("DCS", "");

    let record = encode(&fields);
    assert!(record.contains("DCSNONE\n"));

    // the placeholder passes the name rule, so the record still reconciles
    let report = Validator::new().validate(&record, &fields);
    let name = report.fields.iter().find(|f| f.tag == "DCS").unwrap();
    assert_eq!(name.status, FieldStatus::Match);
    assert_eq!(report.score, 100);
}

#[test]
fn missing_compliance_indicator_zeroes_the_score() {
    let fields = full_fields();
    let record = encode(&fields);
    let report = Validator::new().validate(&record[1..], &fields);

    assert!(!report.header_valid);
    assert_eq!(report.score, 0);
}

#[test]
fn abbreviated_eye_color_still_matches() {
    // scanned `BRO` against an expected form value of `BROWN`
    let fields = full_fields();
    let record = encode(&fields);

    let mut expected = full_fields();
    expected.set("DAY", "BROWN");

    let report = Validator::new().validate(&record, &expected);
    let eye = report.fields.iter().find(|f| f.tag == "DAY").unwrap();
    assert_eq!(eye.status, FieldStatus::Match);
    assert_eq!(report.score, 100);
}

#[test]
fn disagreeing_name_is_a_mismatch() {
    let record = encode(&full_fields());

    let mut expected = full_fields();
    expected.set("DCS", "JONES");

    let report = Validator::new().validate(&record, &expected);
    let name = report.fields.iter().find(|f| f.tag == "DCS").unwrap();
    assert_eq!(name.status, FieldStatus::Mismatch);
    assert!(report.score < 100);
}

#[test]
fn unknown_tags_survive_the_round_trip() {
    let mut fields = full_fields();
    fields.set("ZVA", "JURISDICTION DATA");

    let record = encode(&fields);
    assert!(record.contains("ZVAJURISDICTION DATA"));

    let report = Validator::new().validate(&record, &fields);
    assert_eq!(
        report.unknown,
        vec![("ZVA".to_owned(), "JURISDICTION DATA".to_owned())]
    );
    // unknown tags are never scored
    assert_eq!(report.score, 100);
}

#[test]
fn optional_elements_are_emitted_when_present() {
    let mut fields = full_fields();
    fields.set("DAW", "185 lbs");
    fields.set("DDK", "1");

    let record = encode(&fields);
    assert!(record.contains("DAW185 LB"));
    assert!(record.contains("DDK1"));

    let report = Validator::new().validate(&record, &fields);
    assert_eq!(report.score, 100);
}

#[test]
fn identification_card_subfile() {
    let mut fields = full_fields();
    let mut id_fields = FieldSet::new(SubfileType::Id, fields.issuer_id(), 0);
    for (element, value) in fields.known() {
        id_fields.set_element(element, value);
    }
    fields = id_fields;

    let record = encode(&fields);
    assert_eq!(&record[21..23], "ID");
    assert_eq!(&record[31..33], "ID");

    let report = Validator::new().validate(&record, &fields);
    assert!(report.header_valid);
    assert_eq!(report.score, 100);
}

#[test]
fn height_reconciles_across_spellings() {
    // the encoded side carries `069 IN`; the form side kept `5-9`
    let fields = full_fields();
    let record = encode(&fields);
    assert!(record.contains("DAU069 IN\n"));

    let report = Validator::new().validate(&record, &fields);
    let height = report
        .fields
        .iter()
        .find(|f| f.tag == MandatoryElement::Height.string_id())
        .unwrap();
    assert_eq!(height.status, FieldStatus::Match);
}

#[test]
fn every_rule_table_tag_is_reported() {
    let fields = full_fields();
    let report = Validator::new().validate(&encode(&fields), &fields);

    assert_eq!(report.fields.len(), Element::COUNT);
    assert_eq!(report.fields[0].tag, "DCA");
}
