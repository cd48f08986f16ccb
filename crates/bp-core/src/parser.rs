//! Pin property parser: attribute list text → `PinProperty`.
//!
//! Orchestrates the other modules: the splitter yields `(key, value)`
//! pairs in source order, each known key is applied through
//! `AttributeKind`, then the record is finished (default backfill and
//! type-dependent cleanup). Parsing never fails; anything unusable is
//! reported through `DecodeIssue` and skipped.

use crate::attribute::AttributeKind;
use crate::config::DecodeConfig;
use crate::defaults::backfill_default;
use crate::id::NodeName;
use crate::issue::DecodeIssue;
use crate::model::{ContainerType, PinProperty};
use crate::splitter::{Attribute, AttributeSplitter};

/// Decodes pin attribute lists with a fixed configuration.
#[derive(Debug, Clone, Copy)]
pub struct PinPropertyParser<'c> {
    config: &'c DecodeConfig,
}

impl Default for PinPropertyParser<'static> {
    fn default() -> Self {
        Self::new(DecodeConfig::shared())
    }
}

impl<'c> PinPropertyParser<'c> {
    pub fn new(config: &'c DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'c DecodeConfig {
        self.config
    }

    /// Decode one attribute list (the text inside `CustomProperties Pin (...)`)
    /// for a pin owned by `node_name`.
    #[must_use = "parsing result should be used"]
    pub fn parse(&self, attributes: &str, node_name: &str) -> PinProperty {
        let mut pin = PinProperty::new(NodeName::intern(node_name));

        for Attribute { key, value } in AttributeSplitter::new(attributes) {
            match AttributeKind::from_key(key) {
                Some(kind) => kind.apply(&mut pin, value, self.config),
                None => DecodeIssue::UnrecognizedAttribute {
                    key: key.to_string(),
                }
                .report(),
            }
        }

        finish(&mut pin);
        pin
    }
}

/// Post-pass once every attribute has been applied.
fn finish(pin: &mut PinProperty) {
    backfill_default(pin);

    if !pin
        .category
        .as_ref()
        .is_some_and(|c| c.uses_sub_category_object())
    {
        pin.sub_category_object = None;
    }
    if pin.container_type == ContainerType::None {
        pin.value_type = None;
    }
}

/// Decode an attribute list with the default configuration.
#[must_use = "parsing result should be used"]
pub fn parse_pin(attributes: &str, node_name: &str) -> PinProperty {
    PinPropertyParser::default().parse(attributes, node_name)
}

/// Decode an attribute list with an explicit configuration.
#[must_use = "parsing result should be used"]
pub fn parse_pin_with(attributes: &str, node_name: &str, config: &DecodeConfig) -> PinProperty {
    PinPropertyParser::new(config).parse(attributes, node_name)
}

/// Inner attribute list of a `CustomProperties Pin (...)` line, as found in
/// clipboard text. Returns `None` for any other line.
pub fn strip_pin_wrapper(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("CustomProperties")?;
    let rest = rest.trim_start().strip_prefix("Pin")?;
    let rest = rest.trim_start().strip_prefix('(')?;
    rest.strip_suffix(')')
}
