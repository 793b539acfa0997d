//! Content blocks: the units of text the page-flow engine lays out.
//!
//! A document is described as an ordered list of blocks. Blocks never refer to
//! each other or to a position on the page; the engine decides where each one lands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::colour::Colour;
use crate::error::{BookletError, Result};

/// The heading levels the engine knows how to draw. Level 1 is reserved for the
/// document title, which lives in the page chrome rather than the block flow
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

impl TryFrom<u8> for HeadingLevel {
    type Error = BookletError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            4 => Ok(HeadingLevel::H4),
            other => Err(BookletError::UnsupportedBlockKind {
                kind: format!("heading level {other}"),
            }),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        match level {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

/// One unit of document content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ContentBlock {
    /// A section title drawn on a filled bar whose style depends on the level
    Heading { level: HeadingLevel, text: String },
    /// Items drawn with a bullet glyph on their first line
    BulletList { items: Vec<String> },
    /// Free text, word-wrapped to the printable width
    Paragraph { text: String },
    /// A single line of text on a bar of the given colour
    Banner { text: String, fill: Colour },
}

/// The `kind` tags [ContentBlock] understands
pub const BLOCK_KINDS: [&str; 4] = ["heading", "bullet_list", "paragraph", "banner"];

impl ContentBlock {
    pub fn heading<S: Into<String>>(level: HeadingLevel, text: S) -> ContentBlock {
        ContentBlock::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph<S: Into<String>>(text: S) -> ContentBlock {
        ContentBlock::Paragraph { text: text.into() }
    }

    pub fn bullets<I, S>(items: I) -> ContentBlock
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::BulletList {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn banner<S: Into<String>>(text: S, fill: Colour) -> ContentBlock {
        ContentBlock::Banner {
            text: text.into(),
            fill,
        }
    }

    /// The `kind` tag of this block, as used in JSON block lists
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::BulletList { .. } => "bullet_list",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::Banner { .. } => "banner",
        }
    }
}

/// Decode a JSON array of blocks.
///
/// A block whose `kind` is not one of [BLOCK_KINDS], or a heading whose level is not
/// 2, 3, or 4, fails the whole list with [BookletError::UnsupportedBlockKind] rather
/// than being dropped.
pub fn blocks_from_json(json: &str) -> Result<Vec<ContentBlock>> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    raw.into_iter().map(block_from_value).collect()
}

fn block_from_value(value: Value) -> Result<ContentBlock> {
    let kind = match value.get("kind") {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
        None => "<missing>".to_string(),
    };
    if !BLOCK_KINDS.contains(&kind.as_str()) {
        return Err(BookletError::UnsupportedBlockKind { kind });
    }

    if kind == "heading" {
        if let Some(level) = value.get("level").and_then(Value::as_u64) {
            let level = u8::try_from(level).unwrap_or(u8::MAX);
            HeadingLevel::try_from(level)?;
        }
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;

    #[test]
    fn decodes_every_known_kind() {
        let json = r##"[
            {"kind": "heading", "level": 2, "text": "Hymns"},
            {"kind": "bullet_list", "items": ["On Eagle's Wings", "Amazing Grace"]},
            {"kind": "paragraph", "text": "The souls of the just are in the hand of God."},
            {"kind": "banner", "text": "Final Preparations", "fill": "#4b2e63"}
        ]"##;
        let blocks = blocks_from_json(json).unwrap();
        assert_eq!(
            blocks,
            vec![
                ContentBlock::heading(HeadingLevel::H2, "Hymns"),
                ContentBlock::bullets(["On Eagle's Wings", "Amazing Grace"]),
                ContentBlock::paragraph("The souls of the just are in the hand of God."),
                ContentBlock::banner("Final Preparations", colours::VIOLET),
            ]
        );
    }

    #[test]
    fn unknown_kind_is_surfaced_not_skipped() {
        let json = r#"[{"kind": "paragraph", "text": "ok"}, {"kind": "image", "src": "cover.png"}]"#;
        match blocks_from_json(json) {
            Err(BookletError::UnsupportedBlockKind { kind }) => assert_eq!(kind, "image"),
            other => panic!("expected unsupported kind, got {other:?}"),
        }
    }

    #[test]
    fn missing_kind_is_unsupported() {
        let err = blocks_from_json(r#"[{"text": "orphan"}]"#).unwrap_err();
        assert!(matches!(err, BookletError::UnsupportedBlockKind { .. }));
    }

    #[test]
    fn heading_levels_outside_two_to_four_are_unsupported() {
        for level in [1, 5, 300] {
            let json = format!(r#"[{{"kind": "heading", "level": {level}, "text": "x"}}]"#);
            match blocks_from_json(&json) {
                Err(BookletError::UnsupportedBlockKind { kind }) => {
                    assert!(kind.starts_with("heading level"), "{kind}")
                }
                other => panic!("level {level}: {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_payload_is_a_json_error() {
        let err = blocks_from_json(r#"[{"kind": "paragraph"}]"#).unwrap_err();
        assert!(matches!(err, BookletError::Json(_)));
    }

    #[test]
    fn kind_tag_matches_serialized_form() {
        let block = ContentBlock::bullets(["a"]);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], block.kind());
    }
}
