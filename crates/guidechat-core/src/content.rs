//! Structured content exchanged with the Conversation Service.
//!
//! A reply is a sequence of [`ContentBlock`]s. On the wire each block is
//! either a bare JSON string (a paragraph) or an object discriminated by its
//! `type` field. Decoding is tolerant per element: one bad block never fails
//! the whole array. Unknown kinds decode to [`ContentBlock::Unknown`] and
//! known kinds with missing or ill-typed fields decode to
//! [`ContentBlock::Malformed`], both keeping the raw JSON so they re-serialize
//! unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Discriminator values the renderer understands.
pub const BLOCK_KINDS: &[&str] = &[
    "header",
    "subheader",
    "text",
    "list",
    "table",
    "section",
    "timeline",
    "ordered-list",
    "summary",
    "note",
];

// =============================================================================
// ContentBlock
// =============================================================================

/// One typed unit of structured chat output.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// A bare string, rendered as a paragraph.
    Plain(String),
    /// Top-level heading.
    Header(String),
    /// Secondary heading.
    Subheader(String),
    /// Paragraph.
    Text(String),
    /// Unordered list with up to two groups of entries.
    List(ListBlock),
    /// Column headers plus body rows.
    Table(TableBlock),
    /// Titled, recursive grouping of blocks.
    Section {
        title: String,
        content: Vec<ContentBlock>,
    },
    /// Chronological groups of events.
    Timeline(Vec<TimelinePeriod>),
    /// Itinerary-style numbered days.
    OrderedList(Vec<ItineraryDay>),
    /// Boxed synopsis: element 0 is the heading, the rest are points.
    Summary(Vec<String>),
    /// Callout.
    Note(String),
    /// A block whose `type` is missing or not recognised.
    Unknown(Value),
    /// A block of a known `type` whose fields could not be decoded.
    Malformed {
        kind: String,
        reason: String,
        raw: Value,
    },
}

/// Fields of a `list` block. Both groups may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<NestedItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NestedItem>>,
}

/// Fields of a `table` block.
///
/// Row widths are not checked against `columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One entry of a `timeline` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePeriod {
    pub year: String,
    pub events: Vec<String>,
}

/// One entry of an `ordered-list` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: String,
    pub activities: Vec<String>,
}

/// A recursively nestable list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedItem {
    Text(String),
    Branch {
        text: String,
        #[serde(default)]
        subitems: Vec<NestedItem>,
    },
}

impl NestedItem {
    /// Convenience constructor for a labelled entry with children.
    pub fn branch(text: impl Into<String>, subitems: Vec<NestedItem>) -> Self {
        NestedItem::Branch {
            text: text.into(),
            subitems,
        }
    }

    /// The entry's own label.
    pub fn text(&self) -> &str {
        match self {
            NestedItem::Text(text) => text,
            NestedItem::Branch { text, .. } => text,
        }
    }
}

impl From<&str> for NestedItem {
    fn from(text: &str) -> Self {
        NestedItem::Text(text.to_string())
    }
}

impl ContentBlock {
    /// Decode a single JSON element into a block without ever failing.
    pub fn from_value(value: Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str).map(str::to_owned);
        match (value, kind) {
            (Value::String(text), _) => ContentBlock::Plain(text),
            (value @ Value::Object(_), Some(kind)) if BLOCK_KINDS.contains(&kind.as_str()) => {
                match serde_json::from_value::<WireBlock>(value.clone()) {
                    Ok(wire) => wire.into(),
                    Err(e) => ContentBlock::Malformed {
                        kind,
                        reason: e.to_string(),
                        raw: value,
                    },
                }
            }
            (value, _) => ContentBlock::Unknown(value),
        }
    }

    /// The wire discriminator of this block, if it has one.
    ///
    /// Bare strings have no discriminator.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ContentBlock::Plain(_) => None,
            ContentBlock::Header(_) => Some("header"),
            ContentBlock::Subheader(_) => Some("subheader"),
            ContentBlock::Text(_) => Some("text"),
            ContentBlock::List(_) => Some("list"),
            ContentBlock::Table(_) => Some("table"),
            ContentBlock::Section { .. } => Some("section"),
            ContentBlock::Timeline(_) => Some("timeline"),
            ContentBlock::OrderedList(_) => Some("ordered-list"),
            ContentBlock::Summary(_) => Some("summary"),
            ContentBlock::Note(_) => Some("note"),
            ContentBlock::Unknown(raw) => raw.get("type").and_then(Value::as_str),
            ContentBlock::Malformed { kind, .. } => Some(kind.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentBlock::from_value(value))
    }
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = match self {
            ContentBlock::Plain(text) => return serializer.serialize_str(text),
            ContentBlock::Unknown(raw) | ContentBlock::Malformed { raw, .. } => {
                return raw.serialize(serializer)
            }
            ContentBlock::Header(content) => WireBlockRef::Header { content },
            ContentBlock::Subheader(content) => WireBlockRef::Subheader { content },
            ContentBlock::Text(content) => WireBlockRef::Text { content },
            ContentBlock::List(list) => WireBlockRef::List(list),
            ContentBlock::Table(table) => WireBlockRef::Table(table),
            ContentBlock::Section { title, content } => WireBlockRef::Section { title, content },
            ContentBlock::Timeline(items) => WireBlockRef::Timeline { items },
            ContentBlock::OrderedList(items) => WireBlockRef::OrderedList { items },
            ContentBlock::Summary(content) => WireBlockRef::Summary { content },
            ContentBlock::Note(content) => WireBlockRef::Note { content },
        };
        wire.serialize(serializer)
    }
}

// =============================================================================
// Wire representation
// =============================================================================

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum WireBlock {
    Header { content: String },
    Subheader { content: String },
    Text { content: String },
    List(ListBlock),
    Table(TableBlock),
    Section {
        title: String,
        content: Vec<ContentBlock>,
    },
    Timeline { items: Vec<TimelinePeriod> },
    OrderedList { items: Vec<ItineraryDay> },
    Summary { content: Vec<String> },
    Note { content: String },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum WireBlockRef<'a> {
    Header {
        content: &'a str,
    },
    Subheader {
        content: &'a str,
    },
    Text {
        content: &'a str,
    },
    List(&'a ListBlock),
    Table(&'a TableBlock),
    Section {
        title: &'a str,
        content: &'a [ContentBlock],
    },
    Timeline {
        items: &'a [TimelinePeriod],
    },
    OrderedList {
        items: &'a [ItineraryDay],
    },
    Summary {
        content: &'a [String],
    },
    Note {
        content: &'a str,
    },
}

impl From<WireBlock> for ContentBlock {
    fn from(wire: WireBlock) -> Self {
        match wire {
            WireBlock::Header { content } => ContentBlock::Header(content),
            WireBlock::Subheader { content } => ContentBlock::Subheader(content),
            WireBlock::Text { content } => ContentBlock::Text(content),
            WireBlock::List(list) => ContentBlock::List(list),
            WireBlock::Table(table) => ContentBlock::Table(table),
            WireBlock::Section { title, content } => ContentBlock::Section { title, content },
            WireBlock::Timeline { items } => ContentBlock::Timeline(items),
            WireBlock::OrderedList { items } => ContentBlock::OrderedList(items),
            WireBlock::Summary { content } => ContentBlock::Summary(content),
            WireBlock::Note { content } => ContentBlock::Note(content),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
