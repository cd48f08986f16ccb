use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global interner for node names. Pins of the same node, and every
/// `LinkedTo` entry pointing at it, share one entry.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned name of a graph node (e.g. `K2Node_CallFunction_0`).
/// 4 bytes, Copy, O(1) Eq/Hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeName(Spur);

impl NodeName {
    /// Intern a node name, or return the existing handle.
    pub fn intern(s: &str) -> Self {
        NodeName(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the interned text.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for NodeName {
    fn default() -> Self {
        Self::intern("")
    }
}

impl fmt::Debug for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeName::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeName::intern("K2Node_CallFunction_0");
        let b = NodeName::intern("K2Node_CallFunction_0");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "K2Node_CallFunction_0");
    }

    #[test]
    fn distinct_names_differ() {
        assert_ne!(NodeName::intern("K2Node_A"), NodeName::intern("K2Node_B"));
    }

    #[test]
    fn default_is_empty() {
        assert!(NodeName::default().is_empty());
    }

    #[test]
    fn debug_quotes_display_does_not() {
        let name = NodeName::intern("K2Node_Knot_2");
        assert_eq!(format!("{name:?}"), "\"K2Node_Knot_2\"");
        assert_eq!(name.to_string(), "K2Node_Knot_2");
        assert_eq!(format!("{:?}", NodeName::default()), "\"\"");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeName::intern("K2Node_Event_3")).unwrap();
        assert_eq!(json, "\"K2Node_Event_3\"");
        let back: NodeName = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "K2Node_Event_3");
    }
}
