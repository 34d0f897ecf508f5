//! repat_printer: Structural serialization of pattern syntax trees.
//!
//! Produces the nested key/value form used by golden-file tests: per node
//! its variant tag, span, and variant-specific fields. Parent handles are
//! navigation aids, not structural data, and are omitted.

use repat_ast::{NodeId, NodeKind, PatternArena};
use serde_json::{json, Value};

/// Serialize the tree rooted at `id` to a JSON value.
pub fn to_json(arena: &PatternArena, id: NodeId) -> Value {
    let node = arena.node(id);
    let mut value = match &node.kind {
        NodeKind::Pattern { alternatives } => json!({
            "type": "Pattern",
            "alternatives": children(arena, alternatives),
        }),
        NodeKind::Alternative { elements } => json!({
            "type": "Alternative",
            "elements": children(arena, elements),
        }),
        NodeKind::Character { value } => json!({
            "type": "Character",
            "value": value,
        }),
        NodeKind::AnyCharacterSet => json!({
            "type": "AnyCharacterSet",
        }),
        NodeKind::CharacterClass { negate, elements } => json!({
            "type": "CharacterClass",
            "negate": negate,
            "elements": children(arena, elements),
        }),
        NodeKind::CharacterClassRange { min, max } => json!({
            "type": "CharacterClassRange",
            "min": to_json(arena, *min),
            "max": to_json(arena, *max),
        }),
        NodeKind::Quantifier {
            min,
            max,
            greedy,
            element,
        } => json!({
            "type": "Quantifier",
            "min": min,
            "max": max,
            "greedy": greedy,
            "element": to_json(arena, *element),
        }),
    };
    // Spans are common to every variant.
    if let Value::Object(map) = &mut value {
        map.insert("start".to_string(), json!(node.loc.start));
        map.insert("end".to_string(), json!(node.loc.end));
    }
    value
}

/// Serialize to a pretty-printed JSON string, for fixture files.
pub fn to_json_string(arena: &PatternArena, id: NodeId) -> String {
    let value = to_json(arena, id);
    // A Value never fails to serialize.
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

fn children(arena: &PatternArena, ids: &[NodeId]) -> Vec<Value> {
    ids.iter().map(|&id| to_json(arena, id)).collect()
}
