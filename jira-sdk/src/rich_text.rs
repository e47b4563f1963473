// ABOUTME: Encodes plain text into dialect-specific comment/description bodies and back
// ABOUTME: Handles both bare strings (API v2) and Atlassian document trees (API v3)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::dialect::{Dialect, RichTextMode};

/// One node of a structured rich-text document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient_children"
    )]
    pub content: Vec<DocumentNode>,
}

/// Null content reads as no children, and a child that is not a node is dropped
/// so its siblings still decode.
fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<DocumentNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|child| serde_json::from_value(child).ok())
        .collect())
}

impl DocumentNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            version: None,
            text: Some(text.into()),
            content: Vec::new(),
        }
    }

    pub fn paragraph(content: Vec<DocumentNode>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            version: None,
            text: None,
            content,
        }
    }

    pub fn doc(content: Vec<DocumentNode>) -> Self {
        Self {
            kind: "doc".to_string(),
            version: Some(1),
            text: None,
            content,
        }
    }

    /// Depth-first plain-text extraction, keeping paragraph breaks at the document root.
    pub fn plain_text(&self) -> String {
        match self.kind.as_str() {
            "text" => return self.text.clone().unwrap_or_default(),
            "hardBreak" => return "\n".to_string(),
            _ => {}
        }

        let is_doc = self.kind == "doc";
        let mut out = String::new();
        for child in &self.content {
            let child_text = child.plain_text();
            if child_text.is_empty() {
                continue;
            }
            if is_doc && !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&child_text);
        }
        out
    }
}

/// A ticket description or comment body as the server returned it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DescriptionValue {
    PlainText(String),
    Document(DocumentNode),
    #[default]
    Absent,
}

impl DescriptionValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, DescriptionValue::Absent)
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => DescriptionValue::Absent,
            Value::String(text) => DescriptionValue::PlainText(text),
            Value::Object(_) => serde_json::from_value::<DocumentNode>(value)
                .map(DescriptionValue::Document)
                .unwrap_or(DescriptionValue::Absent),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => DescriptionValue::Absent,
        }
    }
}

impl<'de> Deserialize<'de> for DescriptionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(DescriptionValue::from_json(value))
    }
}

impl Serialize for DescriptionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DescriptionValue::PlainText(text) => serializer.serialize_str(text),
            DescriptionValue::Document(node) => node.serialize(serializer),
            DescriptionValue::Absent => serializer.serialize_none(),
        }
    }
}

/// Encode a plain string as the body representation the dialect expects.
pub fn encode_body(plain: &str, dialect: &Dialect) -> DescriptionValue {
    match dialect.rich_text_mode {
        RichTextMode::PlainString => DescriptionValue::PlainText(plain.to_string()),
        RichTextMode::Document => DescriptionValue::Document(DocumentNode::doc(vec![
            DocumentNode::paragraph(vec![DocumentNode::text(plain)]),
        ])),
    }
}

/// Extract plain text from either body representation. Never fails.
pub fn decode_text(value: &DescriptionValue) -> String {
    match value {
        DescriptionValue::PlainText(text) => text.clone(),
        DescriptionValue::Document(node) => node.plain_text(),
        DescriptionValue::Absent => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{AuthMode, dialect_for};
    use serde_json::json;

    fn both_dialects() -> [Dialect; 2] {
        [
            dialect_for(AuthMode::CloudBasic),
            dialect_for(AuthMode::ServerPat),
        ]
    }

    #[test]
    fn test_round_trip_plain_text() {
        let samples = [
            "",
            "Fix the login race",
            "line one\nline two",
            "  padded  ",
            "unicode: café ✓",
        ];
        for dialect in both_dialects() {
            for sample in samples {
                assert_eq!(decode_text(&encode_body(sample, &dialect)), sample);
            }
        }
    }

    #[test]
    fn test_server_encoding_is_bare_string() {
        let encoded = encode_body("hello", &dialect_for(AuthMode::ServerPat));
        assert_eq!(serde_json::to_value(&encoded).unwrap(), json!("hello"));
    }

    #[test]
    fn test_cloud_encoding_is_single_paragraph_document() {
        let encoded = encode_body("hello", &dialect_for(AuthMode::CloudBasic));
        assert_eq!(
            serde_json::to_value(&encoded).unwrap(),
            json!({
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "hello"}]
                }]
            })
        );
    }

    #[test]
    fn test_decode_separates_paragraphs() {
        let value: DescriptionValue = serde_json::from_value(json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "First "},
                    {"type": "text", "text": "paragraph", "marks": [{"type": "strong"}]}
                ]},
                {"type": "paragraph", "content": []},
                {"type": "paragraph", "content": [{"type": "text", "text": "Second"}]}
            ]
        }))
        .unwrap();

        assert_eq!(decode_text(&value), "First paragraph\n\nSecond");
    }

    #[test]
    fn test_decode_nested_lists_and_hard_breaks() {
        let value: DescriptionValue = serde_json::from_value(json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "a"},
                    {"type": "hardBreak"},
                    {"type": "text", "text": "b"}
                ]},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "one"}]}
                    ]},
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "two"}]}
                    ]}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(decode_text(&value), "a\nb\n\nonetwo");
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let value: DescriptionValue = serde_json::from_value(json!("")).unwrap();
        assert_eq!(value, DescriptionValue::PlainText(String::new()));
        assert!(!value.is_absent());
        assert_eq!(decode_text(&value), "");
    }

    #[test]
    fn test_null_and_unrecognized_shapes_decode_to_empty() {
        for raw in [json!(null), json!(42), json!([1, 2]), json!({"no_type": true})] {
            let value: DescriptionValue = serde_json::from_value(raw).unwrap();
            assert!(value.is_absent());
            assert_eq!(decode_text(&value), "");
        }
    }

    #[test]
    fn test_missing_field_defaults_to_absent() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default)]
            description: DescriptionValue,
        }

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.description.is_absent());
    }

    #[test]
    fn test_odd_child_nodes_do_not_empty_the_document() {
        let raw = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "First"}]},
                {"type": "paragraph", "content": null},
                {"type": "paragraph", "content": [{"text": "no type"}, 7]},
                {"type": "paragraph", "content": [{"type": "text", "text": "Second"}]}
            ]
        });

        let value: DescriptionValue = serde_json::from_value(raw).unwrap();
        assert!(matches!(value, DescriptionValue::Document(_)));
        assert_eq!(decode_text(&value), "First\n\nSecond");
    }
}
