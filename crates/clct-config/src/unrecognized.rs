//! # Unrecognized-Field Detector
//!
//! Walks the generic decoded tree in lock-step with the declared-keyword
//! table and warns about every mapping key the schema does not declare.
//! Typed decoding silently drops such keys, so this check is what catches
//! typos like `naem:`.

use serde_yaml::Value;

use clct_core::{FieldPath, PositionIndex, Report};

use crate::keywords::{FieldKind, TypeSchema};

/// Check `value` against `schema`.
///
/// Returns `true` when at least one unrecognized key was found, together
/// with one warning per such key. Values whose shape does not match the
/// schema (a scalar where a section is declared) are left to typed decoding.
pub fn has_unrecognized_keys(
    value: &Value,
    schema: &'static TypeSchema,
    positions: &PositionIndex,
) -> (bool, Report) {
    let mut report = Report::new();
    walk(value, schema, &FieldPath::root(), positions, &mut report);
    (!report.is_empty(), report)
}

fn walk(
    value: &Value,
    schema: &'static TypeSchema,
    path: &FieldPath,
    positions: &PositionIndex,
    report: &mut Report,
) {
    let Value::Mapping(mapping) = value else {
        return;
    };
    for (key, child) in mapping {
        let key = key_text(key);
        let child_path = path.join(key.as_str());
        let Some(kind) = schema.field(&key) else {
            tracing::trace!(section = schema.name, %key, "unrecognized keyword");
            report.merge(
                Report::warning(format!("unrecognized keyword: {key}"))
                    .located(&child_path, positions.key(&child_path)),
            );
            continue;
        };
        match kind {
            FieldKind::Struct(inner) => walk(child, inner, &child_path, positions, report),
            FieldKind::StructList(inner) => {
                if let Value::Sequence(items) = child {
                    for (i, item) in items.iter().enumerate() {
                        walk(item, inner, &child_path.join(i), positions, report);
                    }
                }
            }
            FieldKind::Scalar | FieldKind::ScalarList => {}
        }
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => "<complex key>".to_string(),
    }
}
