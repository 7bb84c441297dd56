// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card network, derived from the leading digit of the card number.
///
/// Declared in alphabetical order so the derived `Ord` matches the
/// ordering of the stored names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
    Amex,
    Discover,
    Mastercard,
    Visa,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Amex => "AMEX",
            CardType::Discover => "DISCOVER",
            CardType::Mastercard => "MASTERCARD",
            CardType::Visa => "VISA",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AMEX" => Ok(CardType::Amex),
            "DISCOVER" => Ok(CardType::Discover),
            "MASTERCARD" => Ok(CardType::Mastercard),
            "VISA" => Ok(CardType::Visa),
            other => Err(anyhow::anyhow!("Unknown card type '{}'", other)),
        }
    }
}

/// One record as produced by a format parser, before validation.
///
/// `amount` is `None` when the source value could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub card_number: String,
    pub timestamp: String,
    pub amount: Option<Decimal>,
    pub original_record: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub card_number: String,
    pub card_type: CardType,
    pub timestamp: DateTime<Utc>,
    pub day: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRejected {
    pub original_record: String,
    pub rejection_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub id: i64,
    pub original_record: String,
    pub rejection_reason: String,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub processed: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTypeSummary {
    pub card_type: CardType,
    pub total_volume: Decimal,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    pub total_volume: Decimal,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub card_number: String,
    pub card_type: CardType,
    pub total_volume: Decimal,
    pub transaction_count: i64,
}
