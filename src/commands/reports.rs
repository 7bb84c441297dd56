// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::reports;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("by-card-type", sub)) => by_card_type(conn, sub)?,
        Some(("by-day", sub)) => by_day(conn, sub)?,
        Some(("by-card", sub)) => by_card(conn, sub)?,
        Some(("rejected", sub)) => rejected(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn by_card_type(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = reports::summary_by_card_type(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.card_type.to_string(),
                    fmt_money(&s.total_volume),
                    s.transaction_count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Card Type", "Volume", "Count"], rows));
    }
    Ok(())
}

fn by_day(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = reports::summary_by_day(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.day.to_string(),
                    fmt_money(&s.total_volume),
                    s.transaction_count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "Volume", "Count"], rows));
    }
    Ok(())
}

fn by_card(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = reports::summary_by_card(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.card_number.clone(),
                    s.card_type.to_string(),
                    fmt_money(&s.total_volume),
                    s.transaction_count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Card", "Card Type", "Volume", "Count"], rows)
        );
    }
    Ok(())
}

fn rejected(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = reports::rejected_transactions(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.processed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    r.rejection_reason.clone(),
                    r.original_record.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Processed", "Reason", "Original Record"], rows)
        );
    }
    Ok(())
}
