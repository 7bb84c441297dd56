// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ParseError;
use crate::models::ParsedRecord;
use crate::utils::parse_amount;
use rust_decimal::Decimal;
use serde_json::Value;

pub fn parse_json(content: &str) -> Result<Vec<ParsedRecord>, ParseError> {
    let data: Value = serde_json::from_str(content)?;
    let Value::Array(items) = data else {
        return Err(ParseError::NotAnArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(fields) = item else {
                return Err(ParseError::NotAnObject { index });
            };
            Ok(ParsedRecord {
                card_number: text_field(fields.get("cardNumber")),
                timestamp: text_field(fields.get("timestamp")),
                amount: fields.get("amount").and_then(amount_field),
                // serde_json maps are key-sorted, so this is a canonical form
                original_record: serde_json::to_string(item)?,
            })
        })
        .collect()
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn amount_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(s.trim()),
        _ => None,
    }
}
