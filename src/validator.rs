// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Rejection;
use crate::models::{CardType, ParsedRecord, Transaction};
use crate::utils::parse_timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));

/// Leading digit -> card network. Checked in order; first match wins.
pub const CARD_PREFIXES: &[(&str, CardType)] = &[
    ("3", CardType::Amex),
    ("4", CardType::Visa),
    ("5", CardType::Mastercard),
    ("6", CardType::Discover),
];

/// Mod-10 checksum. Anything other than ASCII digits fails.
pub fn is_valid_luhn(card_number: &str) -> bool {
    if !DIGITS.is_match(card_number) {
        return false;
    }
    let sum: u32 = card_number
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}

pub fn card_type_for(card_number: &str) -> Option<CardType> {
    CARD_PREFIXES
        .iter()
        .find(|(prefix, _)| card_number.starts_with(prefix))
        .map(|(_, card_type)| *card_type)
}

/// Accept or reject one parsed record.
///
/// Rules run in order: required fields and a readable amount and timestamp,
/// then the Luhn check (unless `skip_luhn`), then the card network lookup.
pub fn validate(record: &ParsedRecord, skip_luhn: bool) -> Result<Transaction, Rejection> {
    if record.card_number.is_empty() || record.timestamp.is_empty() {
        return Err(Rejection::Malformed);
    }
    let amount = record.amount.ok_or(Rejection::Malformed)?;
    let timestamp = parse_timestamp(&record.timestamp).ok_or(Rejection::Malformed)?;

    if !skip_luhn && !is_valid_luhn(&record.card_number) {
        return Err(Rejection::ChecksumFailed);
    }

    let card_type = card_type_for(&record.card_number).ok_or(Rejection::UnrecognizedCardType)?;

    Ok(Transaction {
        card_number: record.card_number.clone(),
        card_type,
        timestamp,
        day: timestamp.date_naive(),
        amount,
    })
}
