// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ParseError;
use crate::models::ParsedRecord;
use crate::utils::parse_amount;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;

const ROOT: &str = "transactions";
const ITEM: &str = "transaction";
const FIELDS: [&str; 3] = ["cardNumber", "timestamp", "amount"];

type Fields = Vec<(String, String)>;

/// `<transactions>` wrapping any number of `<transaction>` elements.
///
/// One child and many children go through the same path. A root that is not
/// `<transactions>`, or has no `<transaction>` children, yields no records.
pub fn parse_xml(content: &str) -> Result<Vec<ParsedRecord>, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut current: Option<Fields> = None;
    let mut records = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e);
                open_element(&stack, &name, &mut saw_root, &mut current)?;
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                open_element(&stack, &name, &mut saw_root, &mut current)?;
                if in_item(&stack) {
                    // <transaction/> closes immediately
                    if let Some(fields) = current.take() {
                        records.push(to_record(fields)?);
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                append_text(&stack, &mut current, &text)?;
            }
            Event::CData(c) => {
                let bytes = c.into_inner();
                append_text(&stack, &mut current, &String::from_utf8_lossy(&bytes))?;
            }
            Event::End(_) => {
                let name = stack
                    .pop()
                    .ok_or_else(|| ParseError::Xml("unexpected closing tag".into()))?;
                if name == ITEM && in_item(&stack) {
                    if let Some(fields) = current.take() {
                        records.push(to_record(fields)?);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement(open));
    }
    if !saw_root {
        return Err(ParseError::MissingRoot);
    }
    Ok(records)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// True when `stack` is exactly `[transactions]`, i.e. the next element
/// down is a record.
fn in_item(stack: &[String]) -> bool {
    stack.len() == 1 && stack[0] == ROOT
}

fn open_element(
    stack: &[String],
    name: &str,
    saw_root: &mut bool,
    current: &mut Option<Fields>,
) -> Result<(), ParseError> {
    if stack.is_empty() {
        if *saw_root {
            return Err(ParseError::Xml("multiple root elements".into()));
        }
        *saw_root = true;
    } else if name == ITEM && in_item(stack) {
        *current = Some(Vec::new());
    } else if stack.len() == 2 && stack[1] == ITEM {
        if let Some(fields) = current.as_mut() {
            fields.push((name.to_string(), String::new()));
        }
    }
    Ok(())
}

fn append_text(
    stack: &[String],
    current: &mut Option<Fields>,
    text: &str,
) -> Result<(), ParseError> {
    if stack.is_empty() && !text.trim().is_empty() {
        return Err(ParseError::Xml("text outside the root element".into()));
    }
    if stack.len() == 3 && stack[1] == ITEM {
        if let Some((_, value)) = current.as_mut().and_then(|f| f.last_mut()) {
            value.push_str(text);
        }
    }
    Ok(())
}

fn field<'a>(fields: &'a Fields, name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn to_record(fields: Fields) -> Result<ParsedRecord, ParseError> {
    Ok(ParsedRecord {
        card_number: field(&fields, "cardNumber").unwrap_or("").to_string(),
        timestamp: field(&fields, "timestamp").unwrap_or("").to_string(),
        amount: field(&fields, "amount").and_then(|a| parse_amount(a.trim())),
        original_record: fragment(&fields)?,
    })
}

/// Compact `<transaction>` fragment: known fields first in a fixed order,
/// then any other children sorted by name. First occurrence wins.
fn fragment(fields: &Fields) -> Result<String, ParseError> {
    let mut names: Vec<&str> = FIELDS
        .iter()
        .copied()
        .filter(|name| field(fields, name).is_some())
        .collect();
    let mut extras: Vec<&str> = fields
        .iter()
        .map(|(key, _)| key.as_str())
        .filter(|key| !FIELDS.contains(key))
        .collect();
    extras.sort_unstable();
    extras.dedup();
    names.extend(extras);

    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Start(BytesStart::new(ITEM)))
        .map_err(write_error)?;
    for name in names {
        let value = field(fields, name).unwrap_or("");
        writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(write_error)?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(ITEM)))
        .map_err(write_error)?;

    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn write_error(err: impl Display) -> ParseError {
    ParseError::Xml(err.to_string())
}
