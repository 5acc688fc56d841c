//! Structural drift detection between desired and remote settings values
//!
//! Both sides are compared as JSON. Top-level ignored fields are removed, and
//! nulls, empty arrays and empty objects count as absent. Array order is
//! significant.

use dynatrace_client::Settings;
use serde_json::{Map, Value};

const ABSENT: &str = "<absent>";

/// Human-readable diff between `remote` and `desired`, empty when they match
pub fn settings_diff<V: Settings>(remote: &V, desired: &V) -> Result<String, serde_json::Error> {
    let remote = serde_json::to_value(remote)?;
    let desired = serde_json::to_value(desired)?;
    Ok(diff_values(&remote, &desired, V::ignored_fields()).join("\n"))
}

/// One `path: -remote +desired` line per differing leaf
pub fn diff_values(remote: &Value, desired: &Value, ignored: &[&str]) -> Vec<String> {
    let remote = normalize(strip_ignored(remote, ignored));
    let desired = normalize(strip_ignored(desired, ignored));

    let mut lines = Vec::new();
    walk("", remote.as_ref(), desired.as_ref(), &mut lines);
    lines
}

fn strip_ignored(value: &Value, ignored: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| !ignored.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Drop empty values; `None` means the value itself is empty
fn normalize(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => {
            if items.is_empty() {
                return None;
            }
            // Elements keep their position, so an emptied element becomes null
            Some(Value::Array(
                items.into_iter().map(|v| normalize(v).unwrap_or(Value::Null)).collect(),
            ))
        }
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| normalize(v).map(|v| (k, v)))
                .collect();
            if map.is_empty() { None } else { Some(Value::Object(map)) }
        }
        other => Some(other),
    }
}

fn walk(path: &str, remote: Option<&Value>, desired: Option<&Value>, lines: &mut Vec<String>) {
    match (remote, desired) {
        (None, None) => {}
        (Some(Value::Object(r)), Some(Value::Object(d))) => {
            let mut keys: Vec<&String> = r.keys().chain(d.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                walk(&join(path, key), r.get(key), d.get(key), lines);
            }
        }
        (Some(Value::Array(r)), Some(Value::Array(d))) => {
            for i in 0..r.len().max(d.len()) {
                let child = format!("{}[{}]", path, i);
                walk(&child, r.get(i).filter(|v| !v.is_null()), d.get(i).filter(|v| !v.is_null()), lines);
            }
        }
        (r, d) if r == d => {}
        (r, d) => lines.push(format!(
            "{}: -{} +{}",
            if path.is_empty() { "." } else { path },
            render(r),
            render(d)
        )),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() { key.to_string() } else { format!("{}.{}", path, key) }
}

fn render(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_else(|| ABSENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_values_have_no_diff() {
        let v = json!({"name": "prod", "rules": [{"a": 1}]});
        assert!(diff_values(&v, &v, &[]).is_empty());
    }

    #[test]
    fn test_ignored_fields_are_skipped() {
        let remote = json!({"name": "prod", "legacyId": "123"});
        let desired = json!({"name": "prod"});
        assert!(diff_values(&remote, &desired, &["legacyId"]).is_empty());
    }

    #[test]
    fn test_empty_equals_absent() {
        let remote = json!({"name": "x", "cc": [], "filter": {}, "zone": null});
        let desired = json!({"name": "x"});
        assert!(diff_values(&remote, &desired, &[]).is_empty());
    }

    #[test]
    fn test_nested_change_reports_path() {
        let remote = json!({"email": {"recipients": ["a@x.com", "b@x.com"]}});
        let desired = json!({"email": {"recipients": ["a@x.com"]}});
        assert_eq!(
            diff_values(&remote, &desired, &[]),
            vec![r#"email.recipients[1]: -"b@x.com" +<absent>"#.to_string()]
        );
    }

    #[test]
    fn test_order_is_significant() {
        let remote = json!({"rules": ["a", "b"]});
        let desired = json!({"rules": ["b", "a"]});
        assert_eq!(diff_values(&remote, &desired, &[]).len(), 2);
    }

    #[test]
    fn test_scalar_change() {
        let remote = json!({"enabled": false});
        let desired = json!({"enabled": true});
        assert_eq!(diff_values(&remote, &desired, &[]), vec!["enabled: -false +true".to_string()]);
    }
}
