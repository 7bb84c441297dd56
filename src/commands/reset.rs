// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection) -> Result<()> {
    crate::batch::reset(conn)?;
    println!("Dataset reset");
    Ok(())
}
