//! Local shape check for the allow-list document.
//!
//! Mirrors the rules the plugin applies server-side that can be checked
//! without the server's model metadata. It is never run on submit; the
//! server stays the authority.

use std::collections::BTreeMap;

use serde_json::Value;

/// Collections the plugin can search.
pub const SEARCHABLE_COLLECTIONS: [&str; 4] = ["user", "collection", "folder", "item"];

/// A well-formed allow-list: collection name to searchable field names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedFields(pub BTreeMap<String, Vec<String>>);

impl AllowedFields {
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn fields(&self, collection: &str) -> Option<&[String]> {
        self.0.get(collection).map(Vec::as_slice)
    }
}

/// Check `value` and collect every problem found.
pub fn check(value: &Value) -> Result<AllowedFields, Vec<String>> {
    let Some(object) = value.as_object() else {
        return Err(vec!["Allowed fields settings must be a dict.".to_string()]);
    };

    let mut problems = Vec::new();
    let mut allowed = BTreeMap::new();

    for (collection, fields) in object {
        if !SEARCHABLE_COLLECTIONS.contains(&collection.as_str()) {
            problems.push(format!(
                "Unknown collection \"{collection}\"; only {} are valid keywords",
                SEARCHABLE_COLLECTIONS.join(", ")
            ));
            continue;
        }
        let Some(list) = fields.as_array() else {
            problems.push(format!("Allowed fields for \"{collection}\" must be a list."));
            continue;
        };
        let mut names = Vec::with_capacity(list.len());
        for field in list {
            match field.as_str() {
                Some(name) => names.push(name.to_string()),
                None => problems.push(format!(
                    "Invalid key for \"{collection}\": {field} is not a string"
                )),
            }
        }
        allowed.insert(collection.clone(), names);
    }

    if problems.is_empty() {
        Ok(AllowedFields(allowed))
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_known_collections_with_field_lists() {
        let allowed = check(&json!({"item": ["name", "meta"], "folder": []})).unwrap();
        assert_eq!(allowed.collections().collect::<Vec<_>>(), vec!["folder", "item"]);
        assert_eq!(allowed.fields("item").unwrap(), ["name", "meta"]);
    }

    #[test]
    fn rejects_non_objects() {
        let problems = check(&json!(["item"])).unwrap_err();
        assert_eq!(problems, vec!["Allowed fields settings must be a dict."]);
    }

    #[test]
    fn reports_every_problem() {
        let problems = check(&json!({
            "widget": ["a"],
            "item": "name",
            "user": ["login", 3],
        }))
        .unwrap_err();
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("\"widget\"")));
        assert!(problems.iter().any(|p| p.contains("must be a list")));
        assert!(problems.iter().any(|p| p.contains("3 is not a string")));
    }
}
