//! INI text parser.
//!
//! Dialect:
//! - `;` and `#` start comment lines
//! - `[a.b.c]` opens a nested section, `\.` keeps a literal dot
//! - `key = value`, bare `key` means `true`
//! - `key[] = value` appends to an array
//! - `true`, `false` and `null` are typed, everything else is a string

use serde_json::{Map, Value};

use crate::error::IniError;

/// Parse INI text into a JSON object tree.
pub fn parse_str(text: &str) -> Result<Value, IniError> {
    let mut root = Map::new();
    let mut section: Vec<String> = Vec::new();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| IniError::syntax(line_no, "unterminated section header"))?;
            section = split_section(name.trim());
            if section.iter().any(|part| part.is_empty()) {
                return Err(IniError::syntax(line_no, format!("empty section name in [{}]", name)));
            }
            section_table(&mut root, &section, line_no)?;
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (unquote_key(key.trim()), parse_value(value)),
            None => (unquote_key(line), Value::Bool(true)),
        };
        if key.is_empty() {
            return Err(IniError::syntax(line_no, "assignment without a key"));
        }

        let table = section_table(&mut root, &section, line_no)?;
        if key.ends_with("[]") {
            push_value(table, &key[..key.len() - 2], value);
        } else {
            table.insert(key, value);
        }
    }

    Ok(Value::Object(root))
}

/// Walk (creating as needed) the table for a section path.
fn section_table<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
    line: usize,
) -> Result<&'a mut Map<String, Value>, IniError> {
    let mut table = root;
    for part in path {
        let entry = table
            .entry(part.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        table = match entry {
            Value::Object(map) => map,
            _ => {
                return Err(IniError::SectionConflict {
                    line,
                    section: path.join("."),
                })
            }
        };
    }
    Ok(table)
}

fn push_value(table: &mut Map<String, Value>, key: &str, value: Value) {
    let slot = table
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    match slot {
        Value::Array(items) => items.push(value),
        existing => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
    }
}

fn split_section(name: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts.into_iter().map(|p| p.trim().to_string()).collect()
}

fn unquote_key(key: &str) -> String {
    match quoted_inner(key) {
        Some(inner) => inner.to_string(),
        None => key.to_string(),
    }
}

fn quoted_inner(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    let quote = text.chars().next()?;
    if (quote == '"' || quote == '\'') && text.ends_with(quote) {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();

    if raw.starts_with('"') && raw.len() >= 2 && raw.ends_with('"') {
        let text = serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw[1..raw.len() - 1].to_string());
        return Value::String(text);
    }
    if let Some(inner) = quoted_inner(raw).filter(|_| raw.starts_with('\'')) {
        return Value::String(inner.to_string());
    }

    match strip_inline_comment(raw) {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        text => Value::String(text.to_string()),
    }
}

/// Drop a trailing `; ...` or `# ...` comment (the marker must follow whitespace).
fn strip_inline_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if (*b == b';' || *b == b'#') && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return raw[..i].trim_end();
        }
    }
    raw
}
