// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardbatch::error::ParseError;
use cardbatch::parsers::{FileFormat, mime_for_path, parse_csv, parse_json, parse_xml};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn csv_parses_rows_after_header() {
    let content = "cardNumber,timestamp,amount\n4242,2025-01-01T00:00:00Z,100.50\n5555,2025-01-02T12:30:00Z,-25.00";
    let records = parse_csv(content).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].card_number, "4242");
    assert_eq!(records[0].timestamp, "2025-01-01T00:00:00Z");
    assert_eq!(records[0].amount, Some(dec("100.50")));
    assert_eq!(records[0].original_record, "4242,2025-01-01T00:00:00Z,100.50");
    assert_eq!(records[1].amount, Some(dec("-25.00")));
    assert_eq!(records[1].original_record, "5555,2025-01-02T12:30:00Z,-25.00");
}

#[test]
fn csv_empty_and_header_only_yield_nothing() {
    assert!(parse_csv("").unwrap().is_empty());
    assert!(parse_csv("cardNumber,timestamp,amount").unwrap().is_empty());
}

#[test]
fn csv_skips_blank_lines() {
    let content = "cardNumber,timestamp,amount\n\n4242,2025-01-01T00:00:00Z,100.50\n   \n";
    let records = parse_csv(content).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original_record, "4242,2025-01-01T00:00:00Z,100.50");
}

#[test]
fn csv_handles_crlf_line_endings() {
    let content = "cardNumber,timestamp,amount\r\n4242,2025-01-01T00:00:00Z,100.50\r\n";
    let records = parse_csv(content).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original_record, "4242,2025-01-01T00:00:00Z,100.50");
}

#[test]
fn csv_bad_amount_and_short_rows_are_not_parse_errors() {
    let content = "h1,h2,h3\n4242,2025-01-01T00:00:00Z,abc\n4242,2025-01-01T00:00:00Z\n";
    let records = parse_csv(content).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].amount, None);
    assert_eq!(records[0].original_record, "4242,2025-01-01T00:00:00Z,abc");
    assert_eq!(records[1].amount, None);
}

#[test]
fn csv_quote_is_an_ordinary_character() {
    let content = "id,ts,amt\n4111111111111111,\"2025-01-01T00:00:00Z,10\n4242424242424242,2025-01-01T00:00:00Z,1\n5555555555554444,2025-01-02T00:00:00Z,2\n";
    let records = parse_csv(content).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].timestamp, "\"2025-01-01T00:00:00Z");
    assert_eq!(records[0].original_record, "4111111111111111,\"2025-01-01T00:00:00Z,10");
    assert_eq!(records[1].card_number, "4242424242424242");
    assert_eq!(records[1].amount, Some(dec("1")));
    assert_eq!(records[2].card_number, "5555555555554444");
    assert_eq!(records[2].amount, Some(dec("2")));
}

#[test]
fn csv_empty_fields_line_is_still_a_record() {
    let content = "id,ts,amt\n,,\n , , \n4242424242424242,2025-01-01T00:00:00Z,1\n";
    let records = parse_csv(content).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].original_record, ",,");
    assert_eq!(records[0].card_number, "");
    assert_eq!(records[0].amount, None);
    assert_eq!(records[1].original_record, " , , ");
    assert_eq!(records[2].card_number, "4242424242424242");
}

#[test]
fn json_parses_array_with_canonical_fragment() {
    let content = r#"[{"cardNumber":"5555","timestamp":"2025-01-02T12:00:00Z","amount":-50}]"#;
    let records = parse_json(content).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].card_number, "5555");
    assert_eq!(records[0].timestamp, "2025-01-02T12:00:00Z");
    assert_eq!(records[0].amount, Some(dec("-50")));
    assert_eq!(
        records[0].original_record,
        r#"{"amount":-50,"cardNumber":"5555","timestamp":"2025-01-02T12:00:00Z"}"#
    );
}

#[test]
fn json_fragment_decodes_back_to_same_fields() {
    let content = r#"[{"timestamp":"2025-03-04T05:06:07Z","amount":"12.34","cardNumber":"4242424242424242"}]"#;
    let first = parse_json(content).unwrap();
    let again = parse_json(&format!("[{}]", first[0].original_record)).unwrap();
    assert_eq!(again[0].card_number, first[0].card_number);
    assert_eq!(again[0].timestamp, first[0].timestamp);
    assert_eq!(again[0].amount, first[0].amount);
    assert_eq!(again[0].amount, Some(dec("12.34")));
}

#[test]
fn json_numeric_card_number_and_missing_amount() {
    let content = r#"[{"cardNumber":4242424242424242,"timestamp":"2025-01-01T00:00:00Z"}]"#;
    let records = parse_json(content).unwrap();
    assert_eq!(records[0].card_number, "4242424242424242");
    assert_eq!(records[0].amount, None);
}

#[test]
fn json_empty_array_yields_nothing() {
    assert!(parse_json("[]").unwrap().is_empty());
}

#[test]
fn json_malformed_is_error() {
    assert!(matches!(
        parse_json(r#"[{"cardNumber":]"#),
        Err(ParseError::Json(_))
    ));
}

#[test]
fn json_top_level_object_is_not_an_array() {
    let content = r#"{"cardNumber":"5555","timestamp":"2025-01-02T12:00:00Z","amount":-50}"#;
    let err = parse_json(content).unwrap_err();
    assert!(matches!(err, ParseError::NotAnArray));
    assert_eq!(err.to_string(), "JSON data is not an array of transactions");
}

#[test]
fn json_non_object_element_fails_whole_file() {
    let content = r#"[{"cardNumber":"5555","timestamp":"2025-01-02T12:00:00Z","amount":1}, 7]"#;
    assert!(matches!(
        parse_json(content),
        Err(ParseError::NotAnObject { index: 1 })
    ));
}

const TWO_XML: &str = r#"
    <transactions>
        <transaction>
            <cardNumber>3333</cardNumber>
            <timestamp>2025-01-03T10:00:00Z</timestamp>
            <amount>250.75</amount>
        </transaction>
        <transaction>
            <cardNumber>6666</cardNumber>
            <timestamp>2025-01-04T11:00:00Z</timestamp>
            <amount>-50.25</amount>
        </transaction>
    </transactions>
"#;

#[test]
fn xml_parses_multiple_transactions() {
    let records = parse_xml(TWO_XML).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].card_number, "3333");
    assert_eq!(records[0].amount, Some(dec("250.75")));
    assert_eq!(records[1].card_number, "6666");
    assert_eq!(records[1].amount, Some(dec("-50.25")));
}

#[test]
fn xml_single_child_is_not_special() {
    let content = r#"
        <transactions>
            <transaction>
                <cardNumber>3333</cardNumber>
                <timestamp>2025-01-03T10:00:00Z</timestamp>
                <amount>250.75</amount>
            </transaction>
        </transactions>
    "#;
    let records = parse_xml(content).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].card_number, "3333");
    assert_eq!(records[0].timestamp, "2025-01-03T10:00:00Z");
    assert_eq!(records[0].amount, Some(dec("250.75")));
}

#[test]
fn xml_fragment_is_compact_and_ordered() {
    let content = "<?xml version=\"1.0\"?><transactions><transaction>\n  <amount>1.00</amount>\n  <cardNumber>4242</cardNumber>\n  <timestamp>2025-01-01T00:00:00Z</timestamp>\n</transaction></transactions>";
    let records = parse_xml(content).unwrap();
    assert_eq!(
        records[0].original_record,
        "<transaction><cardNumber>4242</cardNumber><timestamp>2025-01-01T00:00:00Z</timestamp><amount>1.00</amount></transaction>"
    );
}

#[test]
fn xml_fragment_decodes_back_to_same_fields() {
    let records = parse_xml(TWO_XML).unwrap();
    for record in &records {
        let wrapped = format!("<transactions>{}</transactions>", record.original_record);
        let again = parse_xml(&wrapped).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].card_number, record.card_number);
        assert_eq!(again[0].timestamp, record.timestamp);
        assert_eq!(again[0].amount, record.amount);
        assert_eq!(again[0].original_record, record.original_record);
    }
}

#[test]
fn xml_escapes_text_in_fragment() {
    let content = "<transactions><transaction><cardNumber>4&amp;2</cardNumber></transaction></transactions>";
    let records = parse_xml(content).unwrap();
    assert_eq!(records[0].card_number, "4&2");
    assert!(records[0].original_record.contains("4&amp;2"));
    assert_eq!(records[0].amount, None);
}

#[test]
fn xml_malformed_is_error() {
    assert!(parse_xml("<transactions><transaction>").is_err());
    assert!(parse_xml("").is_err());
}

#[test]
fn xml_empty_or_foreign_root_yields_nothing() {
    assert!(parse_xml("<transactions></transactions>").unwrap().is_empty());
    assert!(parse_xml("<transactions/>").unwrap().is_empty());
    let foreign = "<data><transaction><cardNumber>4242</cardNumber></transaction></data>";
    assert!(parse_xml(foreign).unwrap().is_empty());
}

#[test]
fn mime_table_resolves_known_tags() {
    assert_eq!(FileFormat::from_mime("text/csv"), Some(FileFormat::Csv));
    assert_eq!(FileFormat::from_mime("application/json"), Some(FileFormat::Json));
    assert_eq!(FileFormat::from_mime("text/xml"), Some(FileFormat::Xml));
    assert_eq!(FileFormat::from_mime("application/xml"), Some(FileFormat::Xml));
    assert_eq!(
        FileFormat::from_mime(" Text/CSV; charset=utf-8"),
        Some(FileFormat::Csv)
    );
    assert_eq!(FileFormat::from_mime("application/pdf"), None);
}

#[test]
fn mime_guessed_from_extension() {
    assert_eq!(mime_for_path(Path::new("a/b.CSV")), "text/csv");
    assert_eq!(mime_for_path(Path::new("x.json")), "application/json");
    assert_eq!(mime_for_path(Path::new("x.xml")), "application/xml");
    assert_eq!(mime_for_path(Path::new("x.pdf")), "application/octet-stream");
    assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
}
