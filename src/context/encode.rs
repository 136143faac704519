// src/context/encode.rs
use super::WindowContext;
use crate::config::Limits;
use anyhow::{Context, Result};
use std::io::Write;

/// Escapes `input` for use inside a double-quoted JSON string literal.
///
/// Only `\`, `"`, newline, carriage return and tab are escaped; everything
/// else is copied through as is. `max_output_len` is a buffer capacity that
/// reserves one slot for a terminator, so at most `max_output_len - 1` bytes
/// come back. The scan stops at the first character that no longer fits and
/// never splits a UTF-8 sequence.
pub fn escape_for_json(input: &str, max_output_len: usize) -> String {
    let limit = max_output_len.saturating_sub(1);
    let mut escaped = String::with_capacity(input.len().min(limit));

    for c in input.chars() {
        let escape = match c {
            '\\' => Some('\\'),
            '"' => Some('"'),
            '\n' => Some('n'),
            '\r' => Some('r'),
            '\t' => Some('t'),
            _ => None,
        };
        let needed = if escape.is_some() { 2 } else { c.len_utf8() };
        if escaped.len() + needed > limit {
            break;
        }
        match escape {
            Some(e) => {
                escaped.push('\\');
                escaped.push(e);
            }
            None => escaped.push(c),
        }
    }

    escaped
}

/// Longest prefix of `text` that fits a buffer of `capacity` bytes (terminator included).
pub fn truncate_to_capacity(text: &str, capacity: usize) -> &str {
    let limit = capacity.saturating_sub(1);
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Writes `context` as one `{"appName":..,"windowTitle":..}` line and flushes.
pub fn write_record<W: Write>(out: &mut W, context: &WindowContext, limits: &Limits) -> Result<()> {
    let app_name = escape_for_json(&context.app_name, limits.escaped_app_name_capacity);
    let window_title = escape_for_json(&context.window_title, limits.escaped_title_capacity);

    writeln!(
        out,
        r#"{{"appName":"{app_name}","windowTitle":"{window_title}"}}"#
    )
    .context("Failed to write window context to stdout")?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}
