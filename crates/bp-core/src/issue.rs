//! Recoverable conditions met while decoding a pin.
//!
//! None of these abort a parse. Each one is logged at a fixed level and the
//! pin record keeps whatever was decoded successfully.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    /// The key has no setter.
    #[error("no decoder for pin attribute `{key}`, skipped")]
    UnrecognizedAttribute { key: String },

    /// No key could be read from a fragment of the attribute list.
    #[error("skipped pin attribute fragment without a valid key: `{fragment}`")]
    UnparsableFragment { fragment: String },

    /// A struct default whose class has no dedicated decoder.
    #[error("struct `{class}` has no dedicated decoder, using key/value decoding")]
    AmbiguousDefault { class: String },

    /// No default attribute was present; a type default was filled in.
    #[error("pin `{pin}` has no default value, filled in the {category} default")]
    MissingDefault { pin: String, category: String },

    /// An attribute this decoder reads but rarely sees with a non-empty value.
    #[error("found attribute `{key}` set to `{value}` [pin-name: {pin}]")]
    InterestingValue {
        key: &'static str,
        value: String,
        pin: String,
    },
}

impl DecodeIssue {
    /// Log the issue at the level its kind calls for.
    pub fn report(&self) {
        match self {
            DecodeIssue::UnrecognizedAttribute { .. } | DecodeIssue::InterestingValue { .. } => {
                log::info!("{self}")
            }
            DecodeIssue::UnparsableFragment { .. } => log::warn!("{self}"),
            DecodeIssue::AmbiguousDefault { .. } | DecodeIssue::MissingDefault { .. } => {
                log::debug!("{self}")
            }
        }
    }
}
