//! Front matter parsing.
//!
//! A content file starts with a YAML block delimited by `---` lines,
//! followed by the markdown body:
//!
//! ```markdown
//! ---
//! title: My Post
//! date: 2024-01-02
//! tags: rust, web dev
//! og:type: article
//! ---
//!
//! # Content starts here
//! ```
//!
//! Keys keep their source order, which later decides the order of the
//! page's meta tags.

use indexmap::IndexMap;
use serde_yaml::Value;

const FENCE: &str = "---";

/// Raw front matter: every key exactly as written, in source order.
pub type Attributes = IndexMap<String, Value>;

/// Result of splitting a content file.
#[derive(Debug, Clone, Default)]
pub struct ParsedContent {
    /// The parsed front matter (empty if none found or unparseable)
    pub attributes: Attributes,
    /// The markdown content without the front matter block
    pub body: String,
}

/// Split a content file into its front matter and markdown body.
///
/// A missing or unterminated block, or YAML that is not a mapping, is not an
/// error: the whole file becomes the body and the attribute map is empty.
pub fn parse_front_matter(raw_text: &str) -> ParsedContent {
    let whole_file = || ParsedContent {
        attributes: Attributes::new(),
        body: raw_text.to_string(),
    };

    let content = raw_text.trim_start_matches('\u{feff}');
    let Some(after_opening) = content.strip_prefix(FENCE) else {
        return whole_file();
    };
    let after_opening = match after_opening
        .strip_prefix("\r\n")
        .or_else(|| after_opening.strip_prefix('\n'))
    {
        Some(rest) => rest,
        None => return whole_file(),
    };

    // The block may be empty, in which case the closing fence comes first.
    let (yaml, rest) = if let Some(rest) = after_opening.strip_prefix(FENCE) {
        ("", rest)
    } else {
        match after_opening.find("\n---") {
            Some(pos) => (&after_opening[..pos], &after_opening[pos + 4..]),
            None => {
                tracing::warn!("front matter has no closing `---`, treating file as body");
                return whole_file();
            }
        }
    };

    // Drop the rest of the closing fence line.
    let body = match rest.find('\n') {
        Some(pos) if rest[..pos].trim().is_empty() => &rest[pos + 1..],
        Some(_) => rest,
        None if rest.trim().is_empty() => "",
        None => rest,
    };

    match parse_attributes(yaml) {
        Ok(attributes) => ParsedContent {
            attributes,
            body: body.trim_start_matches(['\r', '\n']).to_string(),
        },
        Err(e) => {
            tracing::warn!("failed to parse front matter, treating file as body: {}", e);
            whole_file()
        }
    }
}

fn parse_attributes(yaml: &str) -> Result<Attributes, String> {
    if yaml.trim().is_empty() {
        return Ok(Attributes::new());
    }

    match serde_yaml::from_str::<Value>(yaml).map_err(|e| e.to_string())? {
        Value::Null => Ok(Attributes::new()),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| match text_value(&key) {
                Some(key) => Ok((key, value)),
                None => Err("front matter keys must be scalars".to_string()),
            })
            .collect(),
        _ => Err("front matter must be a mapping".to_string()),
    }
}

// =============================================================================
// Attribute values
// =============================================================================

/// Render a scalar (or list of scalars) attribute as text.
///
/// Lists are joined with `, `. Null and nested mappings have no text form.
pub fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Mapping(_) => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(text_value)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Tagged(tagged) => text_value(&tagged.value),
    }
}

/// Read a list attribute.
///
/// Accepts a YAML sequence or a comma-separated string. Items are trimmed
/// and empty items dropped.
pub fn list_value(value: &Value) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Sequence(items) => items.iter().filter_map(text_value).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Tagged(tagged) => return list_value(&tagged.value),
        other => text_value(other).into_iter().collect(),
    };

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter_basic() {
        let content = r#"---
title: My Page
description: A test page
---

# Hello World
"#;
        let parsed = parse_front_matter(content);
        assert_eq!(
            parsed.attributes.get("title").and_then(text_value),
            Some("My Page".to_string())
        );
        assert_eq!(
            parsed.attributes.get("description").and_then(text_value),
            Some("A test page".to_string())
        );
        assert_eq!(parsed.body.trim(), "# Hello World");
    }

    #[test]
    fn test_parse_front_matter_keeps_key_order() {
        let content = "---\nzeta: 1\nog:type: article\ntitle: T\ndate: 2024-01-01\n---\nBody";
        let parsed = parse_front_matter(content);
        let keys: Vec<&str> = parsed.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "og:type", "title", "date"]);
        assert_eq!(
            parsed.attributes.get("date").and_then(text_value),
            Some("2024-01-01".to_string())
        );
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_parse_front_matter_no_front_matter() {
        let content = "# Just Markdown\n\nNo front matter here.";
        let parsed = parse_front_matter(content);
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_parse_front_matter_unterminated() {
        let content = "---\ntitle: Lost\n\n# Body";
        let parsed = parse_front_matter(content);
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_parse_front_matter_malformed_yaml() {
        let content = "---\ntitle: [unclosed\n---\n# Body";
        let parsed = parse_front_matter(content);
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_parse_front_matter_scalar_yaml_is_malformed() {
        let content = "---\njust a sentence\n---\n# Body";
        let parsed = parse_front_matter(content);
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_parse_front_matter_empty_front_matter() {
        let content = "---\n---\n\n# Content";
        let parsed = parse_front_matter(content);
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, "# Content");
    }

    #[test]
    fn test_parse_front_matter_crlf() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let parsed = parse_front_matter(content);
        assert_eq!(
            parsed.attributes.get("title").and_then(text_value),
            Some("Windows".to_string())
        );
        assert_eq!(parsed.body, "Body\r\n");
    }

    #[test]
    fn test_list_value_forms() {
        let seq: Value = serde_yaml::from_str("[rust, ' web dev ', '']").unwrap();
        assert_eq!(list_value(&seq), vec!["rust", "web dev"]);

        let csv = Value::String("rust, web dev,,".to_string());
        assert_eq!(list_value(&csv), vec!["rust", "web dev"]);

        let number: Value = serde_yaml::from_str("2024").unwrap();
        assert_eq!(list_value(&number), vec!["2024"]);

        assert!(list_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_text_value_joins_lists() {
        let seq: Value = serde_yaml::from_str("[a, b]").unwrap();
        assert_eq!(text_value(&seq), Some("a, b".to_string()));
        assert_eq!(text_value(&Value::Bool(true)), Some("true".to_string()));
        assert_eq!(text_value(&Value::Null), None);
    }
}
