//! Renderer output types.

use crate::error::RenderError;

/// Visual weight of a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Title,
    Subtitle,
}

/// Whether a list entry is a leaf item or the label of a nested group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    Item,
    Label,
}

/// One flattened line of a (possibly nested) list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub text: String,
    /// Indentation level; equals the entry's structural nesting depth.
    pub depth: usize,
    pub role: EntryRole,
}

/// A labelled run of lines, used by timelines and itineraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledGroup {
    pub label: String,
    pub entries: Vec<String>,
}

/// The renderer's output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Paragraph(String),
    /// Unordered list. Each present source field becomes its own group.
    List {
        groups: Vec<Vec<ListEntry>>,
    },
    /// Rows are kept exactly as received, whatever their width.
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Section {
        title: String,
        children: Vec<ViewNode>,
    },
    Timeline(Vec<LabeledGroup>),
    /// Numbered days, each with its activities.
    Itinerary(Vec<LabeledGroup>),
    Summary {
        heading: String,
        points: Vec<String>,
    },
    Note(String),
    /// Inert stand-in for a block that could not be rendered.
    Placeholder(RenderError),
}

impl ViewNode {
    /// Number of nodes in this subtree, counting `self`.
    pub fn node_count(&self) -> usize {
        match self {
            ViewNode::Section { children, .. } => {
                1 + children.iter().map(ViewNode::node_count).sum::<usize>()
            }
            _ => 1,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ViewNode::Placeholder(_))
    }
}
