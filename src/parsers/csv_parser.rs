// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ParseError;
use crate::models::ParsedRecord;
use crate::utils::parse_amount;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Positional `cardNumber,timestamp,amount` rows after a header line.
///
/// Quotes are ordinary characters, so every line is its own record. Field
/// counts are not checked: short or long rows flow through and are judged
/// by the validator. An unreadable amount becomes `None`.
pub fn parse_csv(content: &str) -> Result<Vec<ParsedRecord>, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());
    rdr.headers()?;

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    loop {
        let start = rdr.position().byte() as usize;
        if !rdr.read_record(&mut row)? {
            break;
        }
        let end = rdr.position().byte() as usize;
        let original = content
            .get(start..end)
            .unwrap_or_default()
            .trim_matches(|c: char| c == '\r' || c == '\n');
        if original.trim().is_empty() {
            continue;
        }

        records.push(ParsedRecord {
            card_number: row.get(0).unwrap_or("").to_string(),
            timestamp: row.get(1).unwrap_or("").to_string(),
            amount: row.get(2).and_then(parse_amount),
            original_record: original.to_string(),
        });
    }
    Ok(records)
}
