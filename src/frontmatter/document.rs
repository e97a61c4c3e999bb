//! Split documents into YAML frontmatter and body, and join them back.

use serde_yaml::Value;

use super::Frontmatter;
use crate::error::{Result, document_parse_failed};

const DELIMITER: &str = "---";

const BOM: char = '\u{feff}';

/// A document split into its header mapping and opaque body text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Locate the YAML block between the first two `---` lines.
/// Returns `(yaml, body)` with the body left exactly as written after the
/// closing delimiter line, or `None` when the content has no header.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end_matches('\r') != DELIMITER {
        return None;
    }
    let rest = &content[first_line_end + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse a document. Content without a header yields an empty mapping and
/// the whole content as body. A leading byte order mark is dropped.
/// `origin` is used in error messages.
pub fn parse_document(content: &str, origin: &str) -> Result<Document> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let Some((yaml, body)) = split_frontmatter(content) else {
        return Ok(Document {
            frontmatter: Frontmatter::new(),
            body: content.to_string(),
        });
    };

    let frontmatter = if yaml.trim().is_empty() {
        Frontmatter::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml)
            .map_err(|e| document_parse_failed(origin, e.to_string()))?
        {
            Value::Mapping(mapping) => mapping,
            Value::Null => Frontmatter::new(),
            _ => {
                return Err(document_parse_failed(
                    origin,
                    "frontmatter is not a mapping",
                ));
            }
        }
    };

    Ok(Document {
        frontmatter,
        body: body.to_string(),
    })
}

/// Join a header mapping and a body into `---\n<yaml>---\n<body>`.
pub fn render_document(
    frontmatter: &Frontmatter,
    body: &str,
) -> std::result::Result<String, serde_yaml::Error> {
    if frontmatter.is_empty() {
        return Ok(format!("{DELIMITER}\n{DELIMITER}\n{body}"));
    }
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

/// Get a string value from a frontmatter mapping by key (top-level).
/// Numbers and booleans are rendered as strings; empty strings count as absent.
pub fn get_str(frontmatter: &Frontmatter, key: &str) -> Option<String> {
    match frontmatter.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "just body\nno delimiters";
        let doc = parse_document(content, "test.md").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_parse_frontmatter_and_body() {
        let content = "---\ndescription: hello\n---\n\nbody here\n";
        let doc = parse_document(content, "test.md").unwrap();
        assert_eq!(
            get_str(&doc.frontmatter, "description").as_deref(),
            Some("hello")
        );
        assert_eq!(doc.body, "\nbody here\n");
    }

    #[test]
    fn parse_empty_header() {
        let doc = parse_document("---\n---\nbody", "test.md").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn parse_unterminated_header_is_body() {
        let content = "---\nname: x\nno closing delimiter\n";
        let doc = parse_document(content, "test.md").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn parse_crlf_delimiters() {
        let doc = parse_document("---\r\nname: x\r\n---\r\nbody", "test.md").unwrap();
        assert_eq!(get_str(&doc.frontmatter, "name").as_deref(), Some("x"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn parse_bom_header() {
        let doc = parse_document("\u{feff}---\ndescription: d\n---\nBody\n", "bom.md").unwrap();
        assert_eq!(get_str(&doc.frontmatter, "description").as_deref(), Some("d"));
        assert_eq!(doc.body, "Body\n");

        let rendered = render_document(&doc.frontmatter, &doc.body).unwrap();
        assert_eq!(rendered, "---\ndescription: d\n---\nBody\n");
    }

    #[test]
    fn parse_bom_without_header() {
        let doc = parse_document("\u{feff}plain body", "x.md").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "plain body");
    }

    #[test]
    fn parse_invalid_yaml_is_error() {
        let err = parse_document("---\nname: [unclosed\n---\nbody", "agents/pm.md").unwrap_err();
        assert!(err.to_string().contains("agents/pm.md"));
    }

    #[test]
    fn parse_list_header_is_error() {
        assert!(parse_document("---\n- a\n- b\n---\nbody", "x.md").is_err());
    }

    #[test]
    fn render_keeps_body_verbatim() {
        let doc = parse_document("---\nname: pm\nmodel: inherit\n---\n\n# PM\n", "pm.md").unwrap();
        let rendered = render_document(&doc.frontmatter, &doc.body).unwrap();
        assert_eq!(rendered, "---\nname: pm\nmodel: inherit\n---\n\n# PM\n");
    }

    #[test]
    fn render_empty_mapping() {
        let rendered = render_document(&Frontmatter::new(), "body").unwrap();
        assert_eq!(rendered, "---\n---\nbody");
    }

    #[test]
    fn get_str_treats_empty_as_absent() {
        let doc = parse_document("---\nname: ''\nversion: 2\n---\n", "x.md").unwrap();
        assert_eq!(get_str(&doc.frontmatter, "name"), None);
        assert_eq!(get_str(&doc.frontmatter, "version").as_deref(), Some("2"));
        assert_eq!(get_str(&doc.frontmatter, "missing"), None);
    }
}
