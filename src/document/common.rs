//! Common utilities for document generation.
//!
//! Shared helpers for XML escaping, tool diagnostics and bundled asset paths.

use std::path::Path;
use std::process::Output;

/// Longest diagnostic text kept from a failing tool, in characters.
const MAX_DIAGNOSTICS_CHARS: usize = 2000;

/// Escape a value for use as XML element content or attribute value.
///
/// The five reserved characters become entities. Characters that XML 1.0
/// does not allow at all (C0 controls except tab, LF and CR) are dropped.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Human-readable diagnostics from a finished tool process.
///
/// Prefers stderr, falls back to stdout, and truncates long output.
pub fn tool_diagnostics(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    let text = text.trim();

    if text.is_empty() {
        return "no diagnostic output".to_string();
    }

    if text.chars().count() > MAX_DIAGNOSTICS_CHARS {
        let truncated: String = text.chars().take(MAX_DIAGNOSTICS_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

/// Get the bundled assets directory path (XSLT stylesheet).
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Get the directory served to browsers (landing page, form script).
pub fn get_public_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/public"))
}
