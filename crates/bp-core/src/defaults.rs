//! Default values: category dispatch, struct decoders, backfill.

use crate::config::DecodeConfig;
use crate::issue::DecodeIssue;
use crate::loctext::decode_localized_text;
use crate::model::{DefaultValue, LinearColor, PinCategory, PinProperty, StructField, SubCategoryObject};
use crate::splitter::{split_key_value, split_top_level};
use crate::text::{class_friendly_name, parse_bool, parse_string, strip_trailing_zeros};

const VECTOR_AXES: [&str; 3] = ["X", "Y", "Z"];

// ─── Sub-category object ─────────────────────────────────────────────────

/// Decode `PinType.PinSubCategoryObject`.
///
/// Accepts `Type'path'`, `Type'"path"'`, the long form
/// `/Script/CoreUObject.ScriptStruct'/Script/CoreUObject.Vector'`, and a bare
/// object path. `None` and empty values give `None`.
pub fn parse_sub_category_object(raw: &str) -> Option<SubCategoryObject> {
    let value = parse_string(raw);
    if value.is_empty() || value == "None" {
        return None;
    }

    match value.find('\'') {
        Some(quote) => {
            let type_path = &value[..quote];
            let class = value[quote + 1..].trim_end_matches('\'').trim_matches('"');
            Some(SubCategoryObject {
                type_name: short_name(type_path).to_string(),
                class: class.to_string(),
            })
        }
        None => Some(SubCategoryObject {
            type_name: String::new(),
            class: value,
        }),
    }
}

/// Last segment of an object path: `/Script/CoreUObject.Vector` → `Vector`.
fn short_name(path: &str) -> &str {
    path.rsplit(['.', '/']).next().unwrap_or(path)
}

// ─── Struct decoders ─────────────────────────────────────────────────────

/// Strip quotes, then one pair of enclosing parens.
fn struct_body(raw: &str) -> String {
    let value = parse_string(raw);
    match value
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => inner.to_string(),
        None => value,
    }
}

/// `(X=1.000000,Y=2.000000,Z=0.000000)`, `"0, 0, 0"` → `[X=1, Y=2, Z=0]`.
///
/// Components are mapped by position, so axis labels in the source are
/// not checked.
pub fn decode_vector(raw: &str) -> Vec<StructField> {
    let body = struct_body(raw);
    split_top_level(&body)
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .zip(VECTOR_AXES)
        .map(|(segment, axis)| {
            let number = split_key_value(segment).map_or(segment, |(_, v)| v);
            StructField::new(axis, strip_trailing_zeros(&parse_string(number)))
        })
        .collect()
}

/// Key/value decoding for any struct: `(A=1.500000,B=(C=2))` →
/// `[A=1.5, B=(C=2)]`. Segments without a key are keyed by position.
pub fn decode_struct_fields(raw: &str) -> Vec<StructField> {
    let body = struct_body(raw);
    split_top_level(&body)
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| match split_key_value(segment) {
            Some((key, value)) => StructField::new(key, strip_trailing_zeros(&parse_string(value))),
            None => StructField::new(i.to_string(), strip_trailing_zeros(&parse_string(segment))),
        })
        .collect()
}

/// `(R=1.000000,G=0.500000,B=0.000000,A=1.000000)` → color.
///
/// The first four numeric components are read as R, G, B, A in that order.
/// Missing channels are 0, a missing alpha is 1.
pub fn decode_linear_color(raw: &str) -> LinearColor {
    let channels: Vec<f32> = decode_struct_fields(raw)
        .iter()
        .filter_map(|field| field.value.parse::<f32>().ok())
        .take(4)
        .collect();
    let channel = |i: usize, fallback: f32| channels.get(i).copied().unwrap_or(fallback);

    LinearColor::from_linear(channel(0, 0.0), channel(1, 0.0), channel(2, 0.0), channel(3, 1.0))
}

/// Pick the struct decoder for `class`.
fn decode_struct(sub_object: Option<&SubCategoryObject>, raw: &str) -> DefaultValue {
    let class = sub_object.map_or("", |o| o.class.as_str());
    match short_name(class) {
        "Vector" | "Vector3f" | "Rotator" => DefaultValue::Struct(decode_vector(raw)),
        "LinearColor" => DefaultValue::Color(decode_linear_color(raw)),
        _ => {
            DecodeIssue::AmbiguousDefault {
                class: class.to_string(),
            }
            .report();
            DefaultValue::Struct(decode_struct_fields(raw))
        }
    }
}

// ─── Dispatch ────────────────────────────────────────────────────────────

/// Decode a raw `DefaultValue` for a pin of the given category.
///
/// A pin whose category isn't known yet decodes as plain text.
pub fn decode_default_value(
    category: Option<&PinCategory>,
    sub_object: Option<&SubCategoryObject>,
    raw: &str,
    config: &DecodeConfig,
) -> DefaultValue {
    match category {
        Some(c) if c.is_floating_point() => {
            DefaultValue::Text(strip_trailing_zeros(&parse_string(raw)))
        }
        Some(PinCategory::Bool) => DefaultValue::Bool(parse_bool(raw)),
        Some(PinCategory::Struct) => decode_struct(sub_object, raw),
        Some(PinCategory::Byte) => {
            let value = parse_string(raw);
            match sub_object.filter(|o| o.is_enum()) {
                Some(enum_object) => {
                    let display = config
                        .enums
                        .display_name(&enum_object.class, &value)
                        .map(str::to_string);
                    if display.is_none() {
                        log::debug!(
                            "no display name for `{value}` in enum `{}`",
                            enum_object.class
                        );
                    }
                    DefaultValue::Text(display.unwrap_or(value))
                }
                None => DefaultValue::Text(value),
            }
        }
        _ => DefaultValue::Text(parse_string(raw)),
    }
}

/// `DefaultObject` → the referenced class's short name. `None` references
/// give no default.
pub fn decode_default_object(raw: &str) -> Option<DefaultValue> {
    class_friendly_name(raw).map(DefaultValue::Text)
}

/// `DefaultTextValue` → its resolved localized text.
pub fn decode_default_text(raw: &str, config: &DecodeConfig) -> DefaultValue {
    DefaultValue::Text(decode_localized_text(raw, &config.format_namespace))
}

// ─── Backfill ────────────────────────────────────────────────────────────

/// Fill in the implicit default of a pin that had no default attribute.
///
/// The editor omits `DefaultValue` when it equals the type's zero value.
/// Existing defaults are never touched.
pub fn backfill_default(pin: &mut PinProperty) {
    if pin.default_value.is_some() {
        return;
    }

    let backfill = match &pin.category {
        Some(PinCategory::Bool) => Some(DefaultValue::Bool(false)),
        Some(PinCategory::String) => Some(DefaultValue::Text(String::new())),
        Some(PinCategory::Struct)
            if pin.sub_category_class().map(short_name) == Some("Vector2D") =>
        {
            Some(DefaultValue::Struct(vec![
                StructField::new("X", "0"),
                StructField::new("Y", "0"),
            ]))
        }
        _ => None,
    };

    if let (Some(value), Some(category)) = (backfill, &pin.category) {
        DecodeIssue::MissingDefault {
            pin: pin.name.clone(),
            category: category.to_string(),
        }
        .report();
        pin.default_value = Some(value);
    }
}
