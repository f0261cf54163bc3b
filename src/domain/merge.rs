//! Non-destructive tree merge of a synthesized document into existing content.
//!
//! Mapping keys merge recursively, sequences merge element-wise by identity,
//! and scalars are overwritten. Content only present on the existing side is
//! preserved in place, which is what lets hand-edited manifests survive a
//! regeneration.

use std::mem;

use serde_yaml::{Mapping, Value};

use crate::domain::manifest::ManifestDocument;

/// Keys identifying a sequence element, in priority order.
pub const IDENTITY_KEYS: [&str; 8] =
    ["name", "host", "containerPort", "port", "path", "mountPath", "secretName", "key"];

/// Identity of a sequence element, taken from the incoming side.
#[derive(Debug)]
enum Identity<'a> {
    /// Identity fields present on the element, strongest first.
    Fields(Vec<(&'static str, &'a Value)>),
    Whole(&'a Value),
}

impl<'a> Identity<'a> {
    fn of(element: &'a Value) -> Self {
        if let Value::Mapping(mapping) = element {
            let fields: Vec<_> = IDENTITY_KEYS
                .iter()
                .filter_map(|&key| mapping.get(key).map(|value| (key, value)))
                .collect();
            if !fields.is_empty() {
                return Identity::Fields(fields);
            }
        }
        Identity::Whole(element)
    }

    fn primary(&self) -> Option<(&'static str, &'a Value)> {
        match self {
            Identity::Fields(fields) => fields.first().copied(),
            Identity::Whole(_) => None,
        }
    }

    fn rank(&self) -> usize {
        self.primary()
            .and_then(|(key, _)| IDENTITY_KEYS.iter().position(|candidate| *candidate == key))
            .unwrap_or(IDENTITY_KEYS.len())
    }
}

fn has_field(candidate: &Value, key: &str, value: &Value) -> bool {
    candidate.as_mapping().and_then(|mapping| mapping.get(key)) == Some(value)
}

/// Merge `incoming` into `existing`.
pub fn merge_value(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Mapping(existing), Value::Mapping(incoming)) => {
            Value::Mapping(merge_mapping(existing, incoming))
        }
        (Value::Sequence(existing), Value::Sequence(incoming)) => {
            Value::Sequence(merge_sequence(existing, incoming))
        }
        (_, incoming) => incoming,
    }
}

pub fn merge_documents(existing: ManifestDocument, incoming: ManifestDocument) -> ManifestDocument {
    ManifestDocument::new(merge_mapping(existing.into_root(), incoming.into_root()))
}

fn merge_mapping(mut existing: Mapping, incoming: Mapping) -> Mapping {
    for (key, value) in incoming {
        match existing.get_mut(&key) {
            Some(slot) => {
                let previous = mem::replace(slot, Value::Null);
                *slot = merge_value(previous, value);
            }
            None => {
                existing.insert(key, value);
            }
        }
    }
    existing
}

fn merge_sequence(mut existing: Vec<Value>, incoming: Vec<Value>) -> Vec<Value> {
    let targets = match_elements(&existing, &incoming);
    for (element, target) in incoming.into_iter().zip(targets) {
        match target {
            Some(index) => {
                let previous = mem::replace(&mut existing[index], Value::Null);
                existing[index] = merge_value(previous, element);
            }
            None => existing.push(element),
        }
    }
    existing
}

/// Pair each incoming element with the existing element it merges into.
///
/// Incoming elements are matched strongest identity key first, in sequence
/// order within a key. An existing element matches when it has the same value
/// under the incoming element's key. An element whose primary identity is
/// unique among the incoming ones may fall back to its other identity keys.
fn match_elements(existing: &[Value], incoming: &[Value]) -> Vec<Option<usize>> {
    let identities: Vec<Identity<'_>> = incoming.iter().map(Identity::of).collect();
    let mut order: Vec<usize> = (0..incoming.len()).collect();
    order.sort_by_key(|&index| identities[index].rank());

    let mut matched = vec![false; existing.len()];
    let mut targets = vec![None; incoming.len()];
    for index in order {
        let free = |accepts: &dyn Fn(&Value) -> bool| {
            (0..existing.len()).find(|&i| !matched[i] && accepts(&existing[i]))
        };
        let position = match &identities[index] {
            Identity::Whole(value) => free(&|candidate: &Value| candidate == *value),
            Identity::Fields(fields) => {
                let primary = identities[index].primary();
                let sharing = identities.iter().filter(|other| other.primary() == primary).count();
                let usable = if sharing == 1 { fields.len() } else { 1 };
                fields
                    .iter()
                    .take(usable)
                    .find_map(|&(key, value)| {
                        free(&|candidate: &Value| has_field(candidate, key, value))
                    })
            }
        };
        if let Some(position) = position {
            matched[position] = true;
            targets[index] = Some(position);
        }
    }
    targets
}
