//! Decoded pin records.
//!
//! A `PinProperty` is the strongly-typed form of one
//! `CustomProperties Pin (...)` attribute list. It is built by the pin
//! parser, attribute by attribute, and handed to the node assembler as a
//! finished value. The default value is a tagged variant whose kind decides
//! which editor control presents it, so payload and control can't drift.

use crate::id::NodeName;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

// ─── Pin type ────────────────────────────────────────────────────────────

/// Primary data category of a pin (`PinType.PinCategory`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PinCategory {
    Exec,
    Object,
    Int,
    Int64,
    /// UE5 floating point category; the precision lives in the sub-category.
    Real,
    Float,
    String,
    Text,
    Name,
    Struct,
    Class,
    SoftObject,
    SoftClass,
    Interface,
    Bool,
    Byte,
    Delegate,
    MulticastDelegate,
    Wildcard,
    /// A category this decoder doesn't know, kept verbatim.
    Other(String),
}

impl PinCategory {
    /// Map a category token (already unquoted) to its variant.
    pub fn from_token(token: &str) -> Self {
        match token {
            "exec" => PinCategory::Exec,
            "object" => PinCategory::Object,
            "int" => PinCategory::Int,
            "int64" => PinCategory::Int64,
            "real" => PinCategory::Real,
            "float" => PinCategory::Float,
            "string" => PinCategory::String,
            "text" => PinCategory::Text,
            "name" => PinCategory::Name,
            "struct" => PinCategory::Struct,
            "class" => PinCategory::Class,
            "softobject" => PinCategory::SoftObject,
            "softclass" => PinCategory::SoftClass,
            "interface" => PinCategory::Interface,
            "bool" => PinCategory::Bool,
            "byte" => PinCategory::Byte,
            "delegate" => PinCategory::Delegate,
            "mcdelegate" => PinCategory::MulticastDelegate,
            "wildcard" => PinCategory::Wildcard,
            other => PinCategory::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PinCategory::Exec => "exec",
            PinCategory::Object => "object",
            PinCategory::Int => "int",
            PinCategory::Int64 => "int64",
            PinCategory::Real => "real",
            PinCategory::Float => "float",
            PinCategory::String => "string",
            PinCategory::Text => "text",
            PinCategory::Name => "name",
            PinCategory::Struct => "struct",
            PinCategory::Class => "class",
            PinCategory::SoftObject => "softobject",
            PinCategory::SoftClass => "softclass",
            PinCategory::Interface => "interface",
            PinCategory::Bool => "bool",
            PinCategory::Byte => "byte",
            PinCategory::Delegate => "delegate",
            PinCategory::MulticastDelegate => "mcdelegate",
            PinCategory::Wildcard => "wildcard",
            PinCategory::Other(s) => s,
        }
    }

    /// Categories whose default value is a decimal number.
    pub fn is_floating_point(&self) -> bool {
        matches!(self, PinCategory::Float | PinCategory::Real)
    }

    /// Categories that may carry a sub-category object worth keeping.
    pub fn uses_sub_category_object(&self) -> bool {
        matches!(self, PinCategory::Struct | PinCategory::Byte)
    }
}

impl fmt::Display for PinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PinCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PinCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PinCategory::from_token(&s))
    }
}

/// Which side of the node the pin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PinDirection {
    #[default]
    Input,
    Output,
}

impl PinDirection {
    /// `EGPD_Output` is an output; everything else, including a missing or
    /// garbled value, is an input.
    pub fn from_token(token: &str) -> Self {
        match token {
            "EGPD_Output" => PinDirection::Output,
            _ => PinDirection::Input,
        }
    }
}

/// `PinType.ContainerType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerType {
    #[default]
    None,
    Array,
    Set,
    Map,
}

impl ContainerType {
    /// Returns `None` for tokens that are not a container kind at all.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "" | "None" => Some(ContainerType::None),
            "Array" => Some(ContainerType::Array),
            "Set" => Some(ContainerType::Set),
            "Map" => Some(ContainerType::Map),
            _ => None,
        }
    }
}

/// Secondary type reference qualifying a struct or byte pin, e.g.
/// `ScriptStruct'"/Script/CoreUObject.Vector"'` → type `ScriptStruct`,
/// class `/Script/CoreUObject.Vector`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubCategoryObject {
    /// Short class name of the referenced object (`ScriptStruct`, `Enum`, ...).
    pub type_name: String,
    /// Object path of the referenced struct or enum.
    pub class: String,
}

impl SubCategoryObject {
    /// Native and user-defined enums both qualify.
    pub fn is_enum(&self) -> bool {
        self.type_name.ends_with("Enum")
    }
}

// ─── Links ───────────────────────────────────────────────────────────────

/// A connection target: the pin `pin_id` on node `node_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinLink {
    pub node_name: NodeName,
    pub pin_id: String,
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit sRGB color, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// A `LinearColor` default value.
///
/// `r`, `g`, `b` are the linear components scaled to 0..=255, `a` stays in
/// 0..=1. `display` is the gamma-corrected color an editor swatch shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub display: Rgba8,
}

impl LinearColor {
    /// Build from linear components in 0..=1 (as written in the source text).
    pub fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        let (r, g, b) = (r * 255.0, g * 255.0, b * 255.0);
        Self {
            r,
            g,
            b,
            a,
            display: Rgba8 {
                r: encode_srgb(r / 255.0),
                g: encode_srgb(g / 255.0),
                b: encode_srgb(b / 255.0),
                a: (a.clamp(0.0, 1.0) * 255.0).round() as u8,
            },
        }
    }
}

/// sRGB transfer function for one linear channel in 0..=1.
fn encode_srgb(linear: f32) -> u8 {
    let c = linear.clamp(0.0, 1.0);
    let encoded = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Default values ──────────────────────────────────────────────────────

/// One `key=value` member of a struct default (`X=1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub key: String,
    pub value: String,
}

impl StructField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Editor widget that presents a decoded default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlTag {
    Text,
    Checkbox,
    StructBox,
    ColorBox,
}

/// A decoded default value. The variant fixes the control tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Text(String),
    Bool(bool),
    Struct(Vec<StructField>),
    Color(LinearColor),
}

impl DefaultValue {
    pub fn control(&self) -> ControlTag {
        match self {
            DefaultValue::Text(_) => ControlTag::Text,
            DefaultValue::Bool(_) => ControlTag::Checkbox,
            DefaultValue::Struct(_) => ControlTag::StructBox,
            DefaultValue::Color(_) => ControlTag::ColorBox,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DefaultValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DefaultValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&[StructField]> {
        match self {
            DefaultValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

// ─── Pin record ──────────────────────────────────────────────────────────

/// Everything decoded from one pin attribute list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PinProperty {
    /// Name of the node that owns this pin. Supplied by the caller.
    pub node_name: NodeName,
    pub id: String,
    pub name: String,
    pub friendly_name: Option<String>,
    pub category: Option<PinCategory>,
    pub direction: PinDirection,
    pub tool_tip: Option<String>,
    pub sub_category: Option<String>,
    /// Only kept for struct and byte pins.
    pub sub_category_object: Option<SubCategoryObject>,

    pub is_reference: bool,
    pub is_const: bool,
    pub is_weak_pointer: bool,
    pub is_uobject_wrapper: bool,
    pub hidden: bool,
    pub default_value_is_ignored: bool,
    pub default_value_is_read_only: bool,
    pub advanced_view: bool,
    pub orphaned_pin: bool,
    pub not_connectable: bool,

    pub default_value: Option<DefaultValue>,
    pub autogenerated_default_value: Option<String>,
    pub persistent_guid: Option<String>,
    pub container_type: ContainerType,
    /// Value type of a map container (`PinValueType.TerminalCategory`).
    pub value_type: Option<String>,
    /// Connection targets in source order.
    pub linked_to: SmallVec<[PinLink; 2]>,
}

impl PinProperty {
    pub fn new(node_name: NodeName) -> Self {
        Self {
            node_name,
            ..Self::default()
        }
    }

    /// Control tag of the decoded default, if there is one.
    pub fn default_value_control_tag(&self) -> Option<ControlTag> {
        self.default_value.as_ref().map(DefaultValue::control)
    }

    /// Friendly name when present, otherwise the pin name.
    pub fn display_name(&self) -> &str {
        match &self.friendly_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }

    pub fn is_exec(&self) -> bool {
        self.category == Some(PinCategory::Exec)
    }

    pub fn is_linked(&self) -> bool {
        !self.linked_to.is_empty()
    }

    /// Class path of the sub-category object, if any.
    pub fn sub_category_class(&self) -> Option<&str> {
        self.sub_category_object.as_ref().map(|o| o.class.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tokens_roundtrip() {
        for token in ["exec", "bool", "struct", "byte", "real", "mcdelegate"] {
            assert_eq!(PinCategory::from_token(token).as_str(), token);
        }
        assert_eq!(
            PinCategory::from_token("fieldpath"),
            PinCategory::Other("fieldpath".into())
        );
    }

    #[test]
    fn direction_defaults_to_input() {
        assert_eq!(PinDirection::from_token("EGPD_Output"), PinDirection::Output);
        assert_eq!(PinDirection::from_token("EGPD_Input"), PinDirection::Input);
        assert_eq!(PinDirection::from_token("sideways"), PinDirection::Input);
    }

    #[test]
    fn control_tag_follows_variant() {
        assert_eq!(DefaultValue::Text("1".into()).control(), ControlTag::Text);
        assert_eq!(DefaultValue::Bool(true).control(), ControlTag::Checkbox);
        assert_eq!(DefaultValue::Struct(vec![]).control(), ControlTag::StructBox);
        let red = LinearColor::from_linear(1.0, 0.0, 0.0, 1.0);
        assert_eq!(DefaultValue::Color(red).control(), ControlTag::ColorBox);
    }

    #[test]
    fn accessors_match_only_their_variant() {
        let text = DefaultValue::Text("Hello".into());
        let flag = DefaultValue::Bool(true);
        let vector = DefaultValue::Struct(vec![StructField::new("X", "1")]);

        assert_eq!(text.as_text(), Some("Hello"));
        assert_eq!(text.as_bool(), None);
        assert_eq!(flag.as_bool(), Some(true));
        assert_eq!(flag.as_text(), None);
        assert_eq!(vector.fields(), Some(&[StructField::new("X", "1")][..]));
        assert_eq!(vector.as_text(), None);
        assert_eq!(text.fields(), None);
    }

    #[test]
    fn linear_color_extremes() {
        let c = LinearColor::from_linear(1.0, 0.0, 0.0, 1.0);
        assert_eq!(c.r, 255.0);
        assert_eq!(c.display, Rgba8::rgb(255, 0, 0));
        assert_eq!(c.display.to_hex(), "#FF0000");
    }

    #[test]
    fn gamma_brightens_midtones() {
        let c = LinearColor::from_linear(0.5, 0.5, 0.5, 0.5);
        assert!(c.display.r > 180 && c.display.r < 192, "got {}", c.display.r);
        assert_eq!(c.display.a, 128);
        assert_eq!(c.display.to_hex().len(), 9);
    }

    #[test]
    fn display_name_prefers_friendly_name() {
        let mut pin = PinProperty::new(NodeName::intern("K2Node_0"));
        pin.name = "self".into();
        assert_eq!(pin.display_name(), "self");
        pin.friendly_name = Some("Target".into());
        assert_eq!(pin.display_name(), "Target");
    }

    #[test]
    fn sub_category_object_enum_detection() {
        let native = SubCategoryObject {
            type_name: "Enum".into(),
            class: "/Script/Engine.ECollisionChannel".into(),
        };
        let user = SubCategoryObject {
            type_name: "UserDefinedEnum".into(),
            class: "/Game/Enums/E_State.E_State".into(),
        };
        let strukt = SubCategoryObject {
            type_name: "ScriptStruct".into(),
            class: "/Script/CoreUObject.Vector".into(),
        };
        assert!(native.is_enum());
        assert!(user.is_enum());
        assert!(!strukt.is_enum());
    }
}
