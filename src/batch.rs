// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One upload in, one fresh dataset out.

use crate::db;
use crate::error::Rejection;
use crate::models::{BatchResult, NewRejected, ParsedRecord, Transaction};
use crate::parsers::FileFormat;
use crate::validator::validate;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info, warn};

/// A file as handed over by the transport.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Accepted and rejected partitions of one batch, not yet stored.
#[derive(Debug, Default)]
pub struct Outcome {
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<NewRejected>,
}

impl Outcome {
    fn file_rejected(upload: &Upload, reason: Rejection) -> Self {
        Outcome {
            accepted: Vec::new(),
            rejected: vec![NewRejected {
                original_record: format!("File: {}", upload.file_name),
                rejection_reason: reason.to_string(),
            }],
        }
    }

    pub fn result(&self) -> BatchResult {
        BatchResult {
            processed: self.accepted.len(),
            rejected: self.rejected.len(),
        }
    }
}

/// Run every record through the validator under one `skip_luhn` setting.
pub fn partition(records: Vec<ParsedRecord>, skip_luhn: bool) -> Outcome {
    let mut outcome = Outcome::default();
    for record in records {
        match validate(&record, skip_luhn) {
            Ok(txn) => outcome.accepted.push(txn),
            Err(reason) => {
                debug!(record = %record.original_record, %reason, "record rejected");
                outcome.rejected.push(NewRejected {
                    original_record: record.original_record,
                    rejection_reason: reason.to_string(),
                });
            }
        }
    }
    outcome
}

/// Parse and validate an upload without touching the datastore.
///
/// Unknown formats and unparseable files come back as a single file-level
/// rejection rather than an error.
pub fn evaluate(upload: &Upload, skip_luhn: bool) -> Outcome {
    let Some(format) = FileFormat::from_mime(&upload.mime_type) else {
        warn!(file = %upload.file_name, mime = %upload.mime_type, "unsupported file type");
        return Outcome::file_rejected(
            upload,
            Rejection::UnsupportedFileType(upload.mime_type.clone()),
        );
    };

    let content = String::from_utf8_lossy(&upload.bytes);
    match format.parse(&content) {
        Ok(records) => partition(records, skip_luhn),
        Err(err) => {
            warn!(file = %upload.file_name, error = %err, "failed to parse file");
            Outcome::file_rejected(upload, Rejection::ParseFailure(err))
        }
    }
}

/// Replace the stored dataset with the outcome of this upload.
///
/// Only datastore failures are returned as errors; the reset and both bulk
/// writes share one SQLite transaction.
pub fn process_upload(conn: &mut Connection, upload: &Upload, skip_luhn: bool) -> Result<BatchResult> {
    let outcome = evaluate(upload, skip_luhn);

    let tx = conn.transaction()?;
    db::reset_data(&tx)?;
    db::insert_transactions(&tx, &outcome.accepted).context("Store accepted transactions")?;
    db::insert_rejected(&tx, &outcome.rejected, Utc::now())
        .context("Store rejected transactions")?;
    tx.commit()?;

    let result = outcome.result();
    info!(
        file = %upload.file_name,
        processed = result.processed,
        rejected = result.rejected,
        skip_luhn,
        "batch processed"
    );
    Ok(result)
}

/// Unconditional full reset of both collections.
pub fn reset(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    db::reset_data(&tx)?;
    tx.commit()?;
    info!("dataset reset");
    Ok(())
}
