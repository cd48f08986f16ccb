//! Attribute registry: every pin attribute key this decoder understands,
//! and what each one does to the pin record.

use crate::config::DecodeConfig;
use crate::defaults::{
    decode_default_object, decode_default_text, decode_default_value, decode_struct_fields,
    parse_sub_category_object,
};
use crate::issue::DecodeIssue;
use crate::links::parse_linked_to;
use crate::loctext::decode_localized_text;
use crate::model::{ContainerType, PinCategory, PinDirection, PinProperty};
use crate::text::{parse_bool, parse_string, prettify_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    PinId,
    PinName,
    PinFriendlyName,
    PinToolTip,
    Direction,
    PinCategory,
    PinSubCategory,
    PinSubCategoryObject,
    PinSubCategoryMemberReference,
    PinValueType,
    ContainerType,
    IsReference,
    IsConst,
    IsWeakPointer,
    IsUObjectWrapper,
    SerializeAsSinglePrecisionFloat,
    DefaultValue,
    DefaultObject,
    DefaultTextValue,
    AutogeneratedDefaultValue,
    LinkedTo,
    SubPins,
    ParentPin,
    ReferencePassThroughConnection,
    PersistentGuid,
    Hidden,
    NotConnectable,
    DefaultValueIsReadOnly,
    DefaultValueIsIgnored,
    AdvancedView,
    OrphanedPin,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 31] = [
        AttributeKind::PinId,
        AttributeKind::PinName,
        AttributeKind::PinFriendlyName,
        AttributeKind::PinToolTip,
        AttributeKind::Direction,
        AttributeKind::PinCategory,
        AttributeKind::PinSubCategory,
        AttributeKind::PinSubCategoryObject,
        AttributeKind::PinSubCategoryMemberReference,
        AttributeKind::PinValueType,
        AttributeKind::ContainerType,
        AttributeKind::IsReference,
        AttributeKind::IsConst,
        AttributeKind::IsWeakPointer,
        AttributeKind::IsUObjectWrapper,
        AttributeKind::SerializeAsSinglePrecisionFloat,
        AttributeKind::DefaultValue,
        AttributeKind::DefaultObject,
        AttributeKind::DefaultTextValue,
        AttributeKind::AutogeneratedDefaultValue,
        AttributeKind::LinkedTo,
        AttributeKind::SubPins,
        AttributeKind::ParentPin,
        AttributeKind::ReferencePassThroughConnection,
        AttributeKind::PersistentGuid,
        AttributeKind::Hidden,
        AttributeKind::NotConnectable,
        AttributeKind::DefaultValueIsReadOnly,
        AttributeKind::DefaultValueIsIgnored,
        AttributeKind::AdvancedView,
        AttributeKind::OrphanedPin,
    ];

    /// Look up a key exactly as written (case-sensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "PinId" => AttributeKind::PinId,
            "PinName" => AttributeKind::PinName,
            "PinFriendlyName" => AttributeKind::PinFriendlyName,
            "PinToolTip" => AttributeKind::PinToolTip,
            "Direction" => AttributeKind::Direction,
            "PinType.PinCategory" => AttributeKind::PinCategory,
            "PinType.PinSubCategory" => AttributeKind::PinSubCategory,
            "PinType.PinSubCategoryObject" => AttributeKind::PinSubCategoryObject,
            "PinType.PinSubCategoryMemberReference" => AttributeKind::PinSubCategoryMemberReference,
            "PinType.PinValueType" => AttributeKind::PinValueType,
            "PinType.ContainerType" => AttributeKind::ContainerType,
            "PinType.bIsReference" => AttributeKind::IsReference,
            "PinType.bIsConst" => AttributeKind::IsConst,
            "PinType.bIsWeakPointer" => AttributeKind::IsWeakPointer,
            "PinType.bIsUObjectWrapper" => AttributeKind::IsUObjectWrapper,
            "PinType.bSerializeAsSinglePrecisionFloat" => {
                AttributeKind::SerializeAsSinglePrecisionFloat
            }
            "DefaultValue" => AttributeKind::DefaultValue,
            "DefaultObject" => AttributeKind::DefaultObject,
            "DefaultTextValue" => AttributeKind::DefaultTextValue,
            "AutogeneratedDefaultValue" => AttributeKind::AutogeneratedDefaultValue,
            "LinkedTo" => AttributeKind::LinkedTo,
            "SubPins" => AttributeKind::SubPins,
            "ParentPin" => AttributeKind::ParentPin,
            "ReferencePassThroughConnection" => AttributeKind::ReferencePassThroughConnection,
            "PersistentGuid" => AttributeKind::PersistentGuid,
            "bHidden" => AttributeKind::Hidden,
            "bNotConnectable" => AttributeKind::NotConnectable,
            "bDefaultValueIsReadOnly" => AttributeKind::DefaultValueIsReadOnly,
            "bDefaultValueIsIgnored" => AttributeKind::DefaultValueIsIgnored,
            "bAdvancedView" => AttributeKind::AdvancedView,
            "bOrphanedPin" => AttributeKind::OrphanedPin,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            AttributeKind::PinId => "PinId",
            AttributeKind::PinName => "PinName",
            AttributeKind::PinFriendlyName => "PinFriendlyName",
            AttributeKind::PinToolTip => "PinToolTip",
            AttributeKind::Direction => "Direction",
            AttributeKind::PinCategory => "PinType.PinCategory",
            AttributeKind::PinSubCategory => "PinType.PinSubCategory",
            AttributeKind::PinSubCategoryObject => "PinType.PinSubCategoryObject",
            AttributeKind::PinSubCategoryMemberReference => "PinType.PinSubCategoryMemberReference",
            AttributeKind::PinValueType => "PinType.PinValueType",
            AttributeKind::ContainerType => "PinType.ContainerType",
            AttributeKind::IsReference => "PinType.bIsReference",
            AttributeKind::IsConst => "PinType.bIsConst",
            AttributeKind::IsWeakPointer => "PinType.bIsWeakPointer",
            AttributeKind::IsUObjectWrapper => "PinType.bIsUObjectWrapper",
            AttributeKind::SerializeAsSinglePrecisionFloat => {
                "PinType.bSerializeAsSinglePrecisionFloat"
            }
            AttributeKind::DefaultValue => "DefaultValue",
            AttributeKind::DefaultObject => "DefaultObject",
            AttributeKind::DefaultTextValue => "DefaultTextValue",
            AttributeKind::AutogeneratedDefaultValue => "AutogeneratedDefaultValue",
            AttributeKind::LinkedTo => "LinkedTo",
            AttributeKind::SubPins => "SubPins",
            AttributeKind::ParentPin => "ParentPin",
            AttributeKind::ReferencePassThroughConnection => "ReferencePassThroughConnection",
            AttributeKind::PersistentGuid => "PersistentGuid",
            AttributeKind::Hidden => "bHidden",
            AttributeKind::NotConnectable => "bNotConnectable",
            AttributeKind::DefaultValueIsReadOnly => "bDefaultValueIsReadOnly",
            AttributeKind::DefaultValueIsIgnored => "bDefaultValueIsIgnored",
            AttributeKind::AdvancedView => "bAdvancedView",
            AttributeKind::OrphanedPin => "bOrphanedPin",
        }
    }

    /// Apply one raw value to the pin. Later calls for the same kind
    /// overwrite earlier ones.
    pub fn apply(self, pin: &mut PinProperty, raw: &str, config: &DecodeConfig) {
        match self {
            AttributeKind::PinId => pin.id = parse_string(raw),
            AttributeKind::PinName => {
                let name = parse_string(raw);
                pin.name = if config.prettify_names {
                    prettify_text(&name)
                } else {
                    name
                };
            }
            AttributeKind::PinFriendlyName => {
                let name = decode_localized_text(raw, &config.format_namespace);
                pin.friendly_name = Some(if config.prettify_names {
                    prettify_text(&name)
                } else {
                    name
                });
            }
            AttributeKind::PinToolTip => pin.tool_tip = Some(parse_string(raw)),
            AttributeKind::Direction => {
                pin.direction = PinDirection::from_token(&parse_string(raw));
            }
            AttributeKind::PinCategory => {
                let token = parse_string(raw);
                pin.category = (!token.is_empty()).then(|| PinCategory::from_token(&token));
            }
            AttributeKind::PinSubCategory => {
                pin.sub_category = Some(parse_string(raw)).filter(|s| !s.is_empty());
            }
            AttributeKind::PinSubCategoryObject => {
                pin.sub_category_object = parse_sub_category_object(raw);
            }
            AttributeKind::PinSubCategoryMemberReference => {
                self.note_if_interesting(pin, raw, "()");
            }
            AttributeKind::PinValueType => {
                self.note_if_interesting(pin, raw, "()");
                pin.value_type = decode_struct_fields(raw)
                    .into_iter()
                    .find(|f| f.key == "TerminalCategory")
                    .map(|f| f.value)
                    .filter(|v| !v.is_empty());
            }
            AttributeKind::ContainerType => {
                self.note_if_interesting(pin, raw, "None");
                let token = parse_string(raw);
                pin.container_type = ContainerType::from_token(&token).unwrap_or_else(|| {
                    log::debug!("unknown container type `{token}`, treating as none");
                    ContainerType::None
                });
            }
            AttributeKind::IsReference => pin.is_reference = parse_bool(raw),
            AttributeKind::IsConst => pin.is_const = parse_bool(raw),
            AttributeKind::IsWeakPointer => pin.is_weak_pointer = parse_bool(raw),
            AttributeKind::IsUObjectWrapper => pin.is_uobject_wrapper = parse_bool(raw),
            AttributeKind::DefaultValue => {
                pin.default_value = Some(decode_default_value(
                    pin.category.as_ref(),
                    pin.sub_category_object.as_ref(),
                    raw,
                    config,
                ));
            }
            AttributeKind::DefaultObject => {
                if let Some(value) = decode_default_object(raw) {
                    pin.default_value = Some(value);
                }
            }
            AttributeKind::DefaultTextValue => {
                pin.default_value = Some(decode_default_text(raw, config));
            }
            AttributeKind::AutogeneratedDefaultValue => {
                pin.autogenerated_default_value = Some(parse_string(raw));
            }
            AttributeKind::LinkedTo => pin.linked_to = parse_linked_to(raw),
            AttributeKind::PersistentGuid => pin.persistent_guid = Some(parse_string(raw)),
            AttributeKind::Hidden => pin.hidden = parse_bool(raw),
            AttributeKind::NotConnectable => pin.not_connectable = parse_bool(raw),
            AttributeKind::DefaultValueIsReadOnly => pin.default_value_is_read_only = parse_bool(raw),
            AttributeKind::DefaultValueIsIgnored => pin.default_value_is_ignored = parse_bool(raw),
            AttributeKind::AdvancedView => pin.advanced_view = parse_bool(raw),
            AttributeKind::OrphanedPin => pin.orphaned_pin = parse_bool(raw),
            AttributeKind::SerializeAsSinglePrecisionFloat
            | AttributeKind::SubPins
            | AttributeKind::ParentPin
            | AttributeKind::ReferencePassThroughConnection => {
                log::debug!("ignoring pin attribute `{}`={raw}", self.key());
            }
        }
    }

    /// Report a value that differs from the one this attribute nearly always has.
    fn note_if_interesting(self, pin: &PinProperty, raw: &str, usual: &str) {
        let value = raw.trim();
        if !value.is_empty() && value != usual {
            DecodeIssue::InterestingValue {
                key: self.key(),
                value: value.to_string(),
                pin: pin.name.clone(),
            }
            .report();
        }
    }
}
