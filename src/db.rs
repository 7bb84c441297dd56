// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewRejected, Transaction};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Cardbatch", "cardbatch"));

pub const DB_ENV: &str = "CARDBATCH_DB";

/// Datastore location: `CARDBATCH_DB` if set, else the platform data dir.
pub fn db_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("cardbatch.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_number TEXT NOT NULL,
        card_type TEXT NOT NULL CHECK(card_type IN ('AMEX','DISCOVER','MASTERCARD','VISA')),
        timestamp TEXT NOT NULL,
        day TEXT NOT NULL, -- YYYY-MM-DD, UTC
        amount TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_day ON transactions(day);
    CREATE INDEX IF NOT EXISTS idx_transactions_card ON transactions(card_number);

    CREATE TABLE IF NOT EXISTS rejected_transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        original_record TEXT NOT NULL,
        rejection_reason TEXT NOT NULL,
        processed_at TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Drop every accepted and rejected record.
pub fn reset_data(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM transactions", [])
        .context("Clear transactions")?;
    conn.execute("DELETE FROM rejected_transactions", [])
        .context("Clear rejected transactions")?;
    Ok(())
}

pub fn insert_transactions(conn: &Connection, rows: &[Transaction]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut stmt = conn.prepare(
        "INSERT INTO transactions(card_number, card_type, timestamp, day, amount) \
         VALUES (?1,?2,?3,?4,?5)",
    )?;
    for t in rows {
        stmt.execute(params![
            t.card_number,
            t.card_type.as_str(),
            t.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            t.day.to_string(),
            t.amount.to_string(),
        ])?;
    }
    Ok(())
}

pub fn insert_rejected(
    conn: &Connection,
    rows: &[NewRejected],
    processed_at: DateTime<Utc>,
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut stmt = conn.prepare(
        "INSERT INTO rejected_transactions(original_record, rejection_reason, processed_at) \
         VALUES (?1,?2,?3)",
    )?;
    // fixed-width so the TEXT column sorts chronologically
    let at = processed_at.to_rfc3339_opts(SecondsFormat::Micros, true);
    for r in rows {
        stmt.execute(params![r.original_record, r.rejection_reason, at])?;
    }
    Ok(())
}
