//! Localized text decoding.
//!
//! Display strings arrive either as plain quoted text or wrapped in the
//! editor's localization macros:
//!
//! ```text
//! "Target"
//! NSLOCTEXT("K2Node", "Target", "Target")
//! INVTEXT("Location")
//! LOCGEN_FORMAT_NAMED(NSLOCTEXT("KismetSchema", "SplitPinFriendlyNameFormat",
//!     "{PinDisplayName} {ProtoPinDisplayName}"),
//!     "PinDisplayName", NSLOCTEXT("", "6BA2", "Out Hit"),
//!     "ProtoPinDisplayName", NSLOCTEXT("", "8C11", "Blocking Hit"))
//! ```
//!
//! The raw value is parsed into a small expression tree, then resolved.
//! Anything that doesn't resolve is returned unchanged.

use crate::text::parse_string;
use std::collections::HashMap;
use winnow::ascii::multispace0;
use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Namespace that marks the format string of a `LOCGEN_FORMAT_NAMED` call.
pub const SCHEMA_FORMAT_NAMESPACE: &str = "KismetSchema";

/// Deepest call nesting the parser follows. Editor output nests two deep.
const MAX_CALL_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq)]
enum TextExpr {
    /// `"..."`, escapes resolved.
    Literal(String),
    /// An unquoted token.
    Bare(String),
    /// `NAME(arg, ...)`.
    Call { name: String, args: Vec<TextExpr> },
}

// ─── Parser ──────────────────────────────────────────────────────────────

fn skip_ws(input: &mut &str) {
    let _: Result<&str, ErrMode<ContextError>> = multispace0.parse_next(input);
}

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    if !input.starts_with('"') {
        return backtrack();
    }
    let mut escaped = false;
    for (i, ch) in input.char_indices().skip(1) {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                let literal = parse_string(&input[..=i]);
                *input = &input[i + 1..];
                return Ok(literal);
            }
            _ => {}
        }
    }
    backtrack()
}

fn call(input: &mut &str, depth: usize) -> ModalResult<TextExpr> {
    if depth >= MAX_CALL_DEPTH {
        return backtrack();
    }
    let name = take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .parse_next(input)?;
    skip_ws(input);
    let _ = '('.parse_next(input)?;

    let mut args = Vec::new();
    loop {
        skip_ws(input);
        if let Some(rest) = input.strip_prefix(')') {
            *input = rest;
            break;
        }
        args.push(text_expr(input, depth + 1)?);
        skip_ws(input);
        if let Some(rest) = input.strip_prefix(',') {
            *input = rest;
        } else {
            let _ = ')'.parse_next(input)?;
            break;
        }
    }

    Ok(TextExpr::Call {
        name: name.to_string(),
        args,
    })
}

fn bare(input: &mut &str) -> ModalResult<TextExpr> {
    take_till(1.., [',', ')'])
        .map(|s: &str| TextExpr::Bare(s.trim().to_string()))
        .parse_next(input)
}

fn text_expr(input: &mut &str, depth: usize) -> ModalResult<TextExpr> {
    skip_ws(input);
    alt((
        quoted.map(TextExpr::Literal),
        |i: &mut &str| call(i, depth),
        bare,
    ))
    .parse_next(input)
}

// ─── Resolution ──────────────────────────────────────────────────────────

fn resolve(expr: &TextExpr, format_namespace: &str) -> Option<String> {
    match expr {
        TextExpr::Literal(s) => Some(s.clone()),
        TextExpr::Bare(_) => None,
        TextExpr::Call { name, args } => match name.as_str() {
            // NSLOCTEXT(namespace, key, source) / LOCTEXT(key, source)
            "NSLOCTEXT" | "LOCTEXT" => args.last().and_then(|a| resolve(a, format_namespace)),
            "INVTEXT" => args.first().and_then(|a| resolve(a, format_namespace)),
            "LOCGEN_FORMAT_NAMED" => resolve_format_named(args, format_namespace),
            "LOCGEN_FORMAT_ORDERED" => resolve_format_ordered(args, format_namespace),
            _ => None,
        },
    }
}

/// The format string of a formatting call: its first argument must be an
/// `NSLOCTEXT` in the schema-format namespace.
fn format_string(expr: &TextExpr, format_namespace: &str) -> Option<String> {
    match expr {
        TextExpr::Call { name, args } if name == "NSLOCTEXT" => match args.first() {
            Some(TextExpr::Literal(ns)) if ns == format_namespace => {
                resolve(expr, format_namespace)
            }
            _ => None,
        },
        _ => None,
    }
}

fn resolve_format_named(args: &[TextExpr], format_namespace: &str) -> Option<String> {
    let (format, rest) = args.split_first()?;
    let format = format_string(format, format_namespace)?;

    let mut values = HashMap::new();
    for pair in rest.chunks(2) {
        if let [TextExpr::Literal(placeholder), value] = pair {
            if let Some(value) = resolve(value, format_namespace) {
                values.insert(placeholder.as_str(), value);
            }
        }
    }

    Some(substitute(&format, |name| values.get(name).cloned()))
}

fn resolve_format_ordered(args: &[TextExpr], format_namespace: &str) -> Option<String> {
    let (format, rest) = args.split_first()?;
    let format = format_string(format, format_namespace)?;
    let values: Vec<Option<String>> = rest.iter().map(|a| resolve(a, format_namespace)).collect();

    Some(substitute(&format, |name| {
        let index: usize = name.parse().ok()?;
        values.get(index).cloned().flatten()
    }))
}

/// Replace `{placeholder}` tokens in one pass. Placeholders without a value
/// are kept verbatim.
fn substitute(format: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Resolve a raw localized-text value to its display string.
///
/// `format_namespace` is the namespace that marks the format string of a
/// `LOCGEN_FORMAT_NAMED` call (normally [`SCHEMA_FORMAT_NAMESPACE`]).
/// Values that don't parse or resolve are returned unchanged.
pub fn decode_localized_text(raw: &str, format_namespace: &str) -> String {
    let mut input = raw.trim();
    match text_expr(&mut input, 0) {
        Ok(expr) if input.trim().is_empty() => {
            resolve(&expr, format_namespace).unwrap_or_else(|| raw.to_string())
        }
        _ => raw.to_string(),
    }
}
