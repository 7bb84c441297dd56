// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side summaries over accepted transactions.
//!
//! Amounts are stored as decimal text and summed here with `Decimal`, since
//! SQLite's `SUM` would go through floating point.

use crate::models::{CardSummary, CardType, CardTypeSummary, DailySummary, RejectedRecord};
use crate::utils::parse_decimal;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

struct Row {
    card_number: String,
    card_type: CardType,
    day: NaiveDate,
    amount: Decimal,
}

fn load_rows(conn: &Connection) -> Result<Vec<Row>> {
    let mut stmt =
        conn.prepare("SELECT card_number, card_type, day, amount FROM transactions ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (card_number, card_type, day, amount) = row?;
        out.push(Row {
            card_type: card_type.parse()?,
            day: NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                .with_context(|| format!("Invalid stored day '{}'", day))?,
            amount: parse_decimal(&amount)?,
            card_number,
        });
    }
    Ok(out)
}

/// Add one amount to a running (volume, count) pair.
fn accumulate(entry: &mut (Decimal, i64), amount: Decimal) -> Result<()> {
    entry.0 = entry
        .0
        .checked_add(amount)
        .ok_or_else(|| anyhow!("Total volume overflowed adding {}", amount))?;
    entry.1 += 1;
    Ok(())
}

pub fn summary_by_card_type(conn: &Connection) -> Result<Vec<CardTypeSummary>> {
    let mut agg: BTreeMap<CardType, (Decimal, i64)> = BTreeMap::new();
    for row in load_rows(conn)? {
        let entry = agg.entry(row.card_type).or_insert((Decimal::ZERO, 0));
        accumulate(entry, row.amount)?;
    }
    Ok(agg
        .into_iter()
        .map(|(card_type, (total_volume, transaction_count))| CardTypeSummary {
            card_type,
            total_volume,
            transaction_count,
        })
        .collect())
}

pub fn summary_by_day(conn: &Connection) -> Result<Vec<DailySummary>> {
    let mut agg: BTreeMap<NaiveDate, (Decimal, i64)> = BTreeMap::new();
    for row in load_rows(conn)? {
        let entry = agg.entry(row.day).or_insert((Decimal::ZERO, 0));
        accumulate(entry, row.amount)?;
    }
    Ok(agg
        .into_iter()
        .map(|(day, (total_volume, transaction_count))| DailySummary {
            day,
            total_volume,
            transaction_count,
        })
        .collect())
}

/// Largest total volume first; ties go to the lower card number.
pub fn summary_by_card(conn: &Connection) -> Result<Vec<CardSummary>> {
    let mut agg: HashMap<(String, CardType), (Decimal, i64)> = HashMap::new();
    for row in load_rows(conn)? {
        let entry = agg
            .entry((row.card_number, row.card_type))
            .or_insert((Decimal::ZERO, 0));
        accumulate(entry, row.amount)?;
    }
    let mut items: Vec<CardSummary> = agg
        .into_iter()
        .map(
            |((card_number, card_type), (total_volume, transaction_count))| CardSummary {
                card_number,
                card_type,
                total_volume,
                transaction_count,
            },
        )
        .collect();
    items.sort_by(|a, b| {
        b.total_volume
            .cmp(&a.total_volume)
            .then_with(|| a.card_number.cmp(&b.card_number))
            .then_with(|| a.card_type.cmp(&b.card_type))
    });
    Ok(items)
}

/// Most recently processed first.
pub fn rejected_transactions(conn: &Connection) -> Result<Vec<RejectedRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, original_record, rejection_reason, processed_at
         FROM rejected_transactions
         ORDER BY processed_at DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, original_record, rejection_reason, at) = row?;
        let processed_at = DateTime::parse_from_rfc3339(&at)
            .with_context(|| format!("Invalid processed_at '{}' on rejection {}", at, id))?
            .with_timezone(&Utc);
        out.push(RejectedRecord {
            id,
            original_record,
            rejection_reason,
            processed_at,
        });
    }
    Ok(out)
}
