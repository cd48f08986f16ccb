pub mod attribute;
pub mod config;
pub mod defaults;
pub mod id;
pub mod issue;
pub mod links;
pub mod loctext;
pub mod model;
pub mod palette;
pub mod parser;
pub mod splitter;
pub mod text;

pub use attribute::AttributeKind;
pub use config::{ConfigError, DecodeConfig, EnumMember, EnumRegistry};
pub use defaults::{backfill_default, decode_default_value, parse_sub_category_object};
pub use id::NodeName;
pub use issue::DecodeIssue;
pub use links::parse_linked_to;
pub use loctext::decode_localized_text;
pub use model::*;
pub use palette::pin_color;
pub use parser::{PinPropertyParser, parse_pin, parse_pin_with, strip_pin_wrapper};
pub use splitter::{Attribute, AttributeSplitter, split_attributes};
