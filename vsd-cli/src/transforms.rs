//! Transforms available to `tabify` from the command line

use serde_json::Map;
use serde_json::Value;
use vsd_lib::transform::TransformRegistry;

/// Builds the registry the CLI installs at start-up.
///
/// - `flatten` turns nested objects into dotted column names
///   (`{"stats": {"rx": 1}}` becomes `{"stats.rx": 1}`).
/// - `ids` keeps only each row's `ID`.
pub fn registry() -> TransformRegistry {
    TransformRegistry::new()
        .register("flatten", |rows: Vec<Value>| rows.into_iter().map(flatten_row).collect())
        .register("ids", |rows: Vec<Value>| {
            rows.into_iter()
                .filter_map(|row| row.get("ID").cloned())
                .collect()
        })
}

fn flatten_row(row: Value) -> Value {
    match row {
        Value::Object(object) => {
            let mut flat = Map::new();
            flatten_into(&mut flat, None, object);
            Value::Object(flat)
        }
        other => other,
    }
}

fn flatten_into(flat: &mut Map<String, Value>, prefix: Option<&str>, object: Map<String, Value>) {
    for (key, value) in object {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key,
        };
        match value {
            Value::Object(nested) => flatten_into(flat, Some(&key), nested),
            value => {
                flat.insert(key, value);
            }
        }
    }
}
