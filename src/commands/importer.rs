// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::batch::{Upload, process_upload};
use crate::models::BatchResult;
use crate::parsers::mime_for_path;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Uploads above this size are refused outright.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<BatchResult> {
    let path = Path::new(
        m.get_one::<String>("path")
            .context("--path is required")?
            .trim(),
    );
    let skip_luhn = m.get_flag("skip_luhn");
    let upload = read_upload(path, m.get_one::<String>("format").map(|s| s.trim()))?;

    let result = process_upload(conn, &upload, skip_luhn)?;
    if !maybe_print_json(m.get_flag("json"), false, &result)? {
        println!(
            "{}",
            pretty_table(
                &["File", "Processed", "Rejected"],
                vec![vec![
                    upload.file_name.clone(),
                    result.processed.to_string(),
                    result.rejected.to_string(),
                ]],
            )
        );
    }
    Ok(result)
}

pub fn read_upload(path: &Path, format: Option<&str>) -> Result<Upload> {
    let meta = fs::metadata(path).with_context(|| format!("Open {}", path.display()))?;
    if meta.len() > MAX_UPLOAD_BYTES {
        return Err(anyhow!(
            "File {} is {} bytes; the limit is {} bytes",
            path.display(),
            meta.len(),
            MAX_UPLOAD_BYTES
        ));
    }
    let bytes = fs::read(path).with_context(|| format!("Read {}", path.display()))?;
    let mime_type = match format.filter(|f| !f.is_empty()) {
        Some(f) => f.to_string(),
        None => mime_for_path(path).to_string(),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Upload {
        file_name,
        mime_type,
        bytes,
    })
}
