//! `LinkedTo=(K2Node_A 11AA,K2Node_B 22BB,)` → ordered `PinLink`s.

use crate::id::NodeName;
use crate::model::PinLink;
use smallvec::SmallVec;

/// Decode a `LinkedTo` value. Entries that are not exactly
/// `<nodeName> <pinId>` with one space between are dropped; order follows
/// the source.
pub fn parse_linked_to(value: &str) -> SmallVec<[PinLink; 2]> {
    let value = value.trim();
    let inner = value.strip_prefix('(').unwrap_or(value);
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    inner
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.trim().split(' ');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(node), Some(pin_id), None) if !node.is_empty() && !pin_id.is_empty() => {
                    Some(PinLink {
                        node_name: NodeName::intern(node),
                        pin_id: pin_id.to_string(),
                    })
                }
                _ => None,
            }
        })
        .collect()
}
