//! Path-based navigation over parsed API payloads.
//!
//! Post payloads are heterogeneous, so extraction reads them through a few
//! lookups instead of fixed types. Missing or mistyped fields read as empty.

use serde_json::Value;

/// Lookup capability over a parsed document.
pub trait Tree: Sized {
    /// Array at `path`, or an empty slice.
    fn array_at(&self, path: &[&str]) -> &[Self];

    /// String at `path`, or `""`.
    fn string_at(&self, path: &[&str]) -> &str;

    /// Whether any value (including `null`) exists at `path`.
    fn exists(&self, path: &[&str]) -> bool;
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| match node {
        Value::Object(map) => map.get(*key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

impl Tree for Value {
    fn array_at(&self, path: &[&str]) -> &[Value] {
        lookup(self, path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn string_at(&self, path: &[&str]) -> &str {
        lookup(self, path).and_then(Value::as_str).unwrap_or("")
    }

    fn exists(&self, path: &[&str]) -> bool {
        lookup(self, path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_lookups() {
        let doc = json!({
            "response": {
                "posts": [{"type": "photo"}, {"type": "audio"}],
                "blog": {"name": "staff"}
            }
        });

        assert_eq!(doc.array_at(&["response", "posts"]).len(), 2);
        assert_eq!(doc.string_at(&["response", "blog", "name"]), "staff");
        assert_eq!(doc.string_at(&["response", "posts", "1", "type"]), "audio");
        assert!(doc.exists(&["response", "blog"]));
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let doc = json!({"a": {"b": 5}, "reblogged_from_id": null});

        assert!(doc.array_at(&["a", "b"]).is_empty());
        assert!(doc.array_at(&["nope"]).is_empty());
        assert_eq!(doc.string_at(&["a", "b"]), "");
        assert_eq!(doc.string_at(&["a", "b", "c"]), "");
        assert!(!doc.exists(&["a", "c"]));
        assert!(doc.exists(&["reblogged_from_id"]));
    }
}
