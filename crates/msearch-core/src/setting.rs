use serde::Serialize;
use serde_json::Value;

/// Key of the allow-list setting in the host's settings store.
pub const ALLOWED_KEY: &str = "mongo_search.allowed";

/// Display name of the plugin, used in breadcrumbs and titles.
pub const PLUGIN_NAME: &str = "MongoDB custom search";

/// Indentation used when rendering a document into the editor.
const INDENT: &[u8] = b"    ";

/// A setting value on either side of the wire.
///
/// Values read from the server are structured documents. Values written
/// from the editor are the text the user typed, which travels as a JSON
/// string and is never re-parsed on this side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Document(Value),
}

impl SettingValue {
    /// Form text for this value.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Document(doc) => pretty(doc),
        }
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        Self::Document(value)
    }
}

/// Form text for an optional value. A key the server did not return renders
/// as an empty field.
pub fn render_optional(value: Option<&SettingValue>) -> String {
    value.map(SettingValue::render).unwrap_or_default()
}

/// Pretty-print a document with four-space indentation.
pub fn pretty(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// One entry of a settings write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingUpdate {
    pub key: String,
    pub value: SettingValue,
}

impl SettingUpdate {
    pub fn new(key: impl Into<String>, value: SettingValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn documents_render_with_four_space_indent() {
        let value = SettingValue::from(json!(["a", "b"]));
        assert_eq!(value.render(), "[\n    \"a\",\n    \"b\"\n]");
    }

    #[test]
    fn nested_documents_render_like_the_form() {
        let value = SettingValue::from(json!({"item": ["name"]}));
        assert_eq!(value.render(), "{\n    \"item\": [\n        \"name\"\n    ]\n}");
    }

    #[test]
    fn object_keys_keep_server_order() {
        let doc: Value = serde_json::from_str(r#"{"item": ["name"], "folder": ["name"]}"#).unwrap();
        assert_eq!(
            pretty(&doc),
            "{\n    \"item\": [\n        \"name\"\n    ],\n    \"folder\": [\n        \"name\"\n    ]\n}"
        );
    }

    #[test]
    fn empty_and_null_values() {
        assert_eq!(render_optional(None), "");
        assert_eq!(render_optional(Some(&SettingValue::from(Value::Null))), "null");
        assert_eq!(SettingValue::from(json!([])).render(), "[]");
    }

    #[test]
    fn text_is_rendered_and_sent_as_is() {
        let value = SettingValue::Text("{ not json".into());
        assert_eq!(value.render(), "{ not json");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("{ not json"));
    }

    #[test]
    fn update_serializes_text_as_string() {
        let update = SettingUpdate::new(ALLOWED_KEY, SettingValue::Text("[\"a\"]".into()));
        let encoded = serde_json::to_string(&[update]).unwrap();
        assert_eq!(
            encoded,
            r#"[{"key":"mongo_search.allowed","value":"[\"a\"]"}]"#
        );
    }
}
