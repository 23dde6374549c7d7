use super::types::ListKind;
use log::debug;
use serde_json::Value;

/// Maximum number of wrapper levels the extractor will descend through.
/// Natural envelopes are one or two levels deep; the cap guards against
/// pathological nesting from an untrusted backend.
pub const MAX_ENVELOPE_DEPTH: usize = 8;

/// Wrapper keys recognized as envelope levels, tried in order.
const WRAPPER_KEYS: [&str; 2] = ["data", "metadata"];

/// Find the first node in `root` accepted by `matcher`.
///
/// The node itself is tested first; if it does not match, descent continues
/// through `data` and then `metadata` wrapper fields. Nodes that are not
/// objects never match field-shaped matchers and are never descended into.
/// Absence of a match is `None`; extraction has no error cases.
pub fn extract_payload<'a, F>(root: &'a Value, matcher: F) -> Option<&'a Value>
where
    F: Fn(&Value) -> bool,
{
    descend(root, &matcher, MAX_ENVELOPE_DEPTH)
}

fn descend<'a, F>(node: &'a Value, matcher: &F, remaining: usize) -> Option<&'a Value>
where
    F: Fn(&Value) -> bool,
{
    if matcher(node) {
        return Some(node);
    }

    let map = node.as_object()?;

    if remaining == 0 {
        debug!(
            "envelope descent stopped at depth cap ({})",
            MAX_ENVELOPE_DEPTH
        );
        return None;
    }

    for key in WRAPPER_KEYS {
        if let Some(inner) = map.get(key) {
            if let Some(found) = descend(inner, matcher, remaining - 1) {
                return Some(found);
            }
        }
    }

    None
}

/// Extract a list payload of the given kind from anywhere inside `root`.
///
/// A sequence-valued `plural_key` field anywhere in the envelope takes
/// precedence; a single-entity `singular_key` object is used as a fallback
/// and wrapped into a one-element vector. With neither present the result
/// is an empty vector, never an error.
pub fn extract_list(root: &Value, kind: ListKind) -> Vec<Value> {
    let plural = kind.plural_key();

    if let Some(node) = extract_payload(root, |n| n.get(plural).is_some_and(Value::is_array)) {
        if let Some(items) = node.get(plural).and_then(Value::as_array) {
            return items.to_vec();
        }
    }

    if let Some(entity) = extract_entity(root, kind) {
        debug!("no {} sequence found, using singular fallback", kind.name());
        return vec![entity.clone()];
    }

    Vec::new()
}

/// Extract a single entity of the given kind, unwrapped.
pub fn extract_entity<'a>(root: &'a Value, kind: ListKind) -> Option<&'a Value> {
    let singular = kind.singular_key();
    let node = extract_payload(root, |n| n.get(singular).is_some_and(Value::is_object))?;
    node.get(singular)
}

/// Extract a session object: any node carrying both `id` and `sessionNumber`.
pub fn extract_session(root: &Value) -> Option<&Value> {
    extract_payload(root, |n| {
        n.get("id").is_some() && n.get("sessionNumber").is_some()
    })
}
