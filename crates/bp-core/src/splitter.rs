//! Attribute splitter: one pin attribute list → `(key, raw value)` pairs.
//!
//! The value grammar is irregular (bare tokens, quoted strings, tuples,
//! `NSLOCTEXT(...)` calls), so a comma only separates attributes when it
//! sits outside quotes at paren depth 0. `ScanState` tracks exactly that.

use crate::issue::DecodeIssue;
use winnow::ascii::multispace0;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

/// One `key=value` pair. `value` is raw: quotes and parens are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

// ─── Value scanner ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Top level of a value (or between values).
    Outside,
    /// Inside `"..."`; `depth` is the paren depth to return to.
    InQuotes { depth: usize, escaped: bool },
    /// Inside `(...)` at the given depth (≥ 1).
    InParens(usize),
}

/// Byte offset of the first separator in `s`: a comma at depth 0 outside
/// quotes. Returns `s.len()` when there is none.
pub fn scan_value_end(s: &str) -> usize {
    scan_until(s, ',')
}

fn scan_until(s: &str, separator: char) -> usize {
    let mut state = ScanState::Outside;

    for (i, ch) in s.char_indices() {
        state = match state {
            ScanState::Outside => match ch {
                c if c == separator => return i,
                '"' => ScanState::InQuotes {
                    depth: 0,
                    escaped: false,
                },
                '(' => ScanState::InParens(1),
                // An unbalanced ')' at the top is just a character.
                _ => ScanState::Outside,
            },
            ScanState::InQuotes { depth, escaped } => match ch {
                _ if escaped => ScanState::InQuotes {
                    depth,
                    escaped: false,
                },
                '\\' => ScanState::InQuotes {
                    depth,
                    escaped: true,
                },
                '"' if depth == 0 => ScanState::Outside,
                '"' => ScanState::InParens(depth),
                _ => state,
            },
            ScanState::InParens(depth) => match ch {
                '"' => ScanState::InQuotes {
                    depth,
                    escaped: false,
                },
                '(' => ScanState::InParens(depth + 1),
                ')' if depth == 1 => ScanState::Outside,
                ')' => ScanState::InParens(depth - 1),
                _ => state,
            },
        };
    }

    s.len()
}

/// Split `s` on commas that sit at depth 0 outside quotes.
/// Segments are trimmed; empty segments are kept so callers can decide.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    loop {
        let end = scan_until(rest, ',');
        parts.push(rest[..end].trim());
        if end >= rest.len() {
            break;
        }
        rest = &rest[end + 1..];
    }
    parts
}

/// Split `key=value` at the first `=` outside quotes and parens.
pub fn split_key_value(s: &str) -> Option<(&str, &str)> {
    let eq = scan_until(s, '=');
    if eq >= s.len() {
        return None;
    }
    Some((s[..eq].trim(), s[eq + 1..].trim()))
}

// ─── Attribute iterator ──────────────────────────────────────────────────

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn parse_key<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., is_key_char).parse_next(input)
}

fn skip_ws(input: &mut &str) {
    let _: Result<&str, winnow::error::ErrMode<ContextError>> = multispace0.parse_next(input);
}

/// Parse `key \s* = \s*` from the front of a fragment.
fn parse_key_prefix<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    skip_ws(input);
    let key = parse_key.parse_next(input)?;
    skip_ws(input);
    let _ = '='.parse_next(input)?;
    skip_ws(input);
    Ok(key)
}

/// Iterator over the attributes of one pin attribute list.
///
/// Malformed fragments are reported and skipped; every step consumes at
/// least one fragment, so the iterator always terminates.
#[derive(Debug, Clone)]
pub struct AttributeSplitter<'a> {
    rest: &'a str,
}

impl<'a> AttributeSplitter<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Cut the next fragment (up to the next top-level comma) off `rest`.
    fn next_fragment(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = scan_value_end(self.rest);
        let fragment = &self.rest[..end];
        self.rest = if end < self.rest.len() {
            &self.rest[end + 1..]
        } else {
            ""
        };
        Some(fragment)
    }
}

impl<'a> Iterator for AttributeSplitter<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(fragment) = self.next_fragment() {
            if fragment.trim().is_empty() {
                continue;
            }

            let mut input = fragment;
            match parse_key_prefix.parse_next(&mut input) {
                Ok(key) => {
                    return Some(Attribute {
                        key,
                        value: input.trim_end(),
                    });
                }
                Err(_) => {
                    DecodeIssue::UnparsableFragment {
                        fragment: fragment.trim().to_string(),
                    }
                    .report();
                }
            }
        }
        None
    }
}

/// Split one attribute list into its `(key, raw value)` pairs, in order.
#[must_use]
pub fn split_attributes(input: &str) -> Vec<Attribute<'_>> {
    AttributeSplitter::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(input: &str) -> Vec<(&str, &str)> {
        split_attributes(input)
            .into_iter()
            .map(|a| (a.key, a.value))
            .collect()
    }

    #[test]
    fn splits_bare_quoted_and_tuple_values() {
        let input = r#"PinId=ABC,PinName="self",LinkedTo=(Node_0 1A2B,)"#;
        assert_eq!(
            pairs(input),
            vec![
                ("PinId", "ABC"),
                ("PinName", "\"self\""),
                ("LinkedTo", "(Node_0 1A2B,)"),
            ]
        );
    }

    #[test]
    fn commas_inside_quotes_are_literal() {
        let input = r#"PinToolTip="A, B (and C)",bHidden=False"#;
        assert_eq!(
            pairs(input),
            vec![("PinToolTip", "\"A, B (and C)\""), ("bHidden", "False")]
        );
    }

    #[test]
    fn escaped_quotes_do_not_close_strings() {
        let input = r#"PinToolTip="say \"a,b\" now",PinId=1"#;
        assert_eq!(
            pairs(input),
            vec![("PinToolTip", r#""say \"a,b\" now""#), ("PinId", "1")]
        );
    }

    #[test]
    fn macro_calls_stay_whole() {
        let input = r#"PinFriendlyName=NSLOCTEXT("K2Node", "Target", "Target"),PinId=X"#;
        assert_eq!(
            pairs(input),
            vec![
                ("PinFriendlyName", r#"NSLOCTEXT("K2Node", "Target", "Target")"#),
                ("PinId", "X"),
            ]
        );
    }

    #[test]
    fn nested_calls_with_parens_in_strings() {
        let input = r#"PinFriendlyName=LOCGEN_FORMAT_NAMED(NSLOCTEXT("KismetSchema", "K", "{A} (x)"), "A", NSLOCTEXT("", "B", "b, c")),bHidden=True"#;
        let got = pairs(input);
        assert_eq!(got.len(), 2);
        assert!(got[0].1.starts_with("LOCGEN_FORMAT_NAMED("));
        assert!(got[0].1.ends_with("\"b, c\"))"));
        assert_eq!(got[1], ("bHidden", "True"));
    }

    #[test]
    fn whitespace_around_separators_is_skipped() {
        let input = " PinId = ABC ,  bHidden=False ";
        assert_eq!(pairs(input), vec![("PinId", "ABC"), ("bHidden", "False")]);
    }

    #[test]
    fn dotted_keys() {
        let input = r#"PinType.PinCategory="bool",PinType.bIsConst=False"#;
        assert_eq!(
            pairs(input),
            vec![
                ("PinType.PinCategory", "\"bool\""),
                ("PinType.bIsConst", "False")
            ]
        );
    }

    #[test]
    fn malformed_fragments_are_skipped() {
        let input = r#"PinId=A,=orphan,NoEquals,!!!=x,PinName="b""#;
        assert_eq!(pairs(input), vec![("PinId", "A"), ("PinName", "\"b\"")]);
    }

    #[test]
    fn trailing_and_repeated_commas() {
        assert_eq!(pairs("PinId=A,,bHidden=True,"), vec![("PinId", "A"), ("bHidden", "True")]);
        assert!(pairs("").is_empty());
        assert!(pairs(",,,").is_empty());
    }

    #[test]
    fn empty_value_is_kept() {
        assert_eq!(
            pairs("DefaultValue=,PinId=A"),
            vec![("DefaultValue", ""), ("PinId", "A")]
        );
    }

    #[test]
    fn unterminated_input_terminates() {
        assert_eq!(pairs("PinToolTip=\"never closed, PinId=A"), vec![(
            "PinToolTip",
            "\"never closed, PinId=A"
        )]);
        assert_eq!(pairs("LinkedTo=(A 1,B 2"), vec![("LinkedTo", "(A 1,B 2")]);
    }

    #[test]
    fn stray_close_paren_is_literal() {
        assert_eq!(pairs("A=x),B=y"), vec![("A", "x)"), ("B", "y")]);
    }

    #[test]
    fn rejoining_reconstructs_input() {
        let input = r#"PinId=4F1D,PinName="ReturnValue",PinFriendlyName=NSLOCTEXT("K2Node","Target","Target"),PinType.PinCategory="struct",DefaultValue=(X=1.000000,Y=2.000000,Z=0.000000),LinkedTo=(K2Node_A 11AA,K2Node_B 22BB,),bHidden=False"#;
        let rejoined = split_attributes(input)
            .iter()
            .map(|a| format!("{}={}", a.key, a.value))
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(rejoined, input);
    }

    #[test]
    fn top_level_split_helpers() {
        assert_eq!(
            split_top_level("X=1, Y=(a,b), Z=\"c,d\""),
            vec!["X=1", "Y=(a,b)", "Z=\"c,d\""]
        );
        assert_eq!(split_top_level(""), vec![""]);
        assert_eq!(split_key_value("R=0.5"), Some(("R", "0.5")));
        assert_eq!(split_key_value("K=(A=1)"), Some(("K", "(A=1)")));
        assert_eq!(split_key_value("1.0"), None);
    }
}
