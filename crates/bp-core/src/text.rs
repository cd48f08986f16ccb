//! Primitive decoders shared by the attribute setters: quoted strings,
//! booleans, trailing-zero stripping, display names.

use winnow::ascii::{digit0, digit1};
use winnow::combinator::opt;
use winnow::prelude::*;
use winnow::token::one_of;

/// Unwrap a double-quoted value and resolve its escapes.
///
/// Unquoted values come back trimmed but otherwise untouched.
pub fn parse_string(value: &str) -> String {
    let value = value.trim();
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => unescape(inner),
        None => value.to_string(),
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// `True`/`False` in any casing, quoted or not. Anything else is false.
pub fn parse_bool(value: &str) -> bool {
    parse_string(value).eq_ignore_ascii_case("true")
}

fn decimal<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (opt(one_of(['+', '-'])), digit1, opt(('.', digit0)))
        .take()
        .parse_next(input)
}

/// Whether `s` is a plain decimal number such as `-12.500000`.
pub fn is_decimal(s: &str) -> bool {
    decimal.parse(s).is_ok()
}

/// Drop insignificant trailing zeros from a decimal: `1.000000` → `1`,
/// `1.500000` → `1.5`. Non-numeric text is returned unchanged.
pub fn strip_trailing_zeros(s: &str) -> String {
    let trimmed = s.trim();
    if !trimmed.contains('.') || !is_decimal(trimmed) {
        return s.to_string();
    }
    let stripped = trimmed.trim_end_matches('0').trim_end_matches('.');
    match stripped {
        "-0" | "+0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Turn an identifier-style pin name into display text:
/// `ReturnValue` → `Return Value`, `HTTPRequest` → `HTTP Request`,
/// `then_0` → `then 0`.
pub fn prettify_text(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push(' ');
            continue;
        }
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Short class name from an object reference, as shown on object pins:
/// `/Script/Engine.Actor` → `Actor`,
/// `BlueprintGeneratedClass'/Game/BP_Door.BP_Door_C'` → `BP_Door`.
/// `None` and empty references give `None`.
pub fn class_friendly_name(reference: &str) -> Option<String> {
    let reference = parse_string(reference);
    if reference.is_empty() || reference == "None" {
        return None;
    }

    let path = match reference.find('\'') {
        Some(start) => reference[start + 1..]
            .trim_end_matches('\'')
            .trim_matches('"'),
        None => reference.as_str(),
    };

    let name = path.rsplit(['.', '/', ':']).next().unwrap_or(path);
    let name = name.strip_prefix("Default__").unwrap_or(name);
    let name = name.strip_suffix("_C").unwrap_or(name);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_string_unwraps_quotes() {
        assert_eq!(parse_string("\"self\""), "self");
        assert_eq!(parse_string("  \"spaced\"  "), "spaced");
        assert_eq!(parse_string("bare"), "bare");
        assert_eq!(parse_string("\""), "\"");
        assert_eq!(parse_string("\"\""), "");
    }

    #[test]
    fn parse_string_resolves_escapes() {
        assert_eq!(
            parse_string(r#""Target\nSelf Object Reference""#),
            "Target\nSelf Object Reference"
        );
        assert_eq!(parse_string(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(parse_string(r#""keep \q""#), "keep \\q");
    }

    #[test]
    fn booleans_ignore_case() {
        assert!(parse_bool("True"));
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("\"True\""));
        assert!(!parse_bool("False"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn decimal_recognition() {
        assert!(is_decimal("1"));
        assert!(is_decimal("-1.5"));
        assert!(is_decimal("+3."));
        assert!(!is_decimal("1.2.3"));
        assert!(!is_decimal("abc"));
        assert!(!is_decimal(""));
        assert!(!is_decimal("X=1.0"));
    }

    #[test]
    fn trailing_zeros_are_stripped() {
        assert_eq!(strip_trailing_zeros("1.000000"), "1");
        assert_eq!(strip_trailing_zeros("1.500000"), "1.5");
        assert_eq!(strip_trailing_zeros("0.000000"), "0");
        assert_eq!(strip_trailing_zeros("-0.000000"), "0");
        assert_eq!(strip_trailing_zeros("100.0"), "100");
        assert_eq!(strip_trailing_zeros("-12.250"), "-12.25");
    }

    #[test]
    fn trailing_zero_strip_leaves_other_text() {
        assert_eq!(strip_trailing_zeros("100"), "100");
        assert_eq!(strip_trailing_zeros("v1.00a"), "v1.00a");
        assert_eq!(strip_trailing_zeros("Hello"), "Hello");
    }

    #[test]
    fn trailing_zero_strip_is_idempotent() {
        for input in ["1.000000", "1.500000", "0.0", "42", "text", "-3.140"] {
            let once = strip_trailing_zeros(input);
            assert_eq!(strip_trailing_zeros(&once), once, "input {input}");
        }
    }

    #[test]
    fn prettify_splits_words() {
        assert_eq!(prettify_text("ReturnValue"), "Return Value");
        assert_eq!(prettify_text("HTTPRequest"), "HTTP Request");
        assert_eq!(prettify_text("then_0"), "then 0");
        assert_eq!(prettify_text("self"), "self");
        assert_eq!(prettify_text("Vector2D"), "Vector2D");
        assert_eq!(prettify_text("In String"), "In String");
    }

    #[test]
    fn class_names_from_references() {
        assert_eq!(
            class_friendly_name("/Script/Engine.Actor").as_deref(),
            Some("Actor")
        );
        assert_eq!(
            class_friendly_name("BlueprintGeneratedClass'/Game/BP_Door.BP_Door_C'").as_deref(),
            Some("BP_Door")
        );
        assert_eq!(
            class_friendly_name("Class'\"/Script/Engine.PointLight\"'").as_deref(),
            Some("PointLight")
        );
        assert_eq!(
            class_friendly_name("\"/Script/Engine.Default__KismetSystemLibrary\"").as_deref(),
            Some("KismetSystemLibrary")
        );
        assert_eq!(class_friendly_name("None"), None);
        assert_eq!(class_friendly_name(""), None);
    }
}
