//! Recursive `ContentBlock` -> `ViewNode` transform.
//!
//! Dispatch policy:
//! - every known block kind maps to exactly one top-level node;
//! - unknown kinds produce no node at all (not even a placeholder);
//! - malformed blocks and empty summaries degrade to a placeholder.

use guidechat_core::content::{ContentBlock, ItineraryDay, ListBlock, NestedItem, TimelinePeriod};

use crate::error::RenderError;
use crate::view::{EntryRole, HeadingLevel, LabeledGroup, ListEntry, ViewNode};

/// Render a sequence of blocks, preserving order.
pub fn render(blocks: &[ContentBlock]) -> Vec<ViewNode> {
    blocks.iter().filter_map(render_block).collect()
}

/// Render one block. Returns `None` for blocks of an unknown kind.
pub fn render_block(block: &ContentBlock) -> Option<ViewNode> {
    let node = match block {
        ContentBlock::Plain(text) | ContentBlock::Text(text) => ViewNode::Paragraph(text.clone()),
        ContentBlock::Header(text) => ViewNode::Heading {
            level: HeadingLevel::Title,
            text: text.clone(),
        },
        ContentBlock::Subheader(text) => ViewNode::Heading {
            level: HeadingLevel::Subtitle,
            text: text.clone(),
        },
        ContentBlock::Note(text) => ViewNode::Note(text.clone()),
        ContentBlock::List(list) => render_list(list),
        ContentBlock::Table(table) => {
            let width = table.columns.len();
            if let Some(ragged) = table.rows.iter().position(|row| row.len() != width) {
                tracing::debug!(
                    columns = width,
                    row = ragged,
                    "Table row width differs from column count; rendering as-is"
                );
            }
            ViewNode::Table {
                header: table.columns.clone(),
                rows: table.rows.clone(),
            }
        }
        ContentBlock::Section { title, content } => ViewNode::Section {
            title: title.clone(),
            children: render(content),
        },
        ContentBlock::Timeline(periods) => {
            ViewNode::Timeline(periods.iter().map(period_group).collect())
        }
        ContentBlock::OrderedList(days) => {
            ViewNode::Itinerary(days.iter().map(day_group).collect())
        }
        ContentBlock::Summary(content) => match content.split_first() {
            Some((heading, points)) => ViewNode::Summary {
                heading: heading.clone(),
                points: points.to_vec(),
            },
            None => {
                tracing::warn!("Summary block has no content; rendering placeholder");
                ViewNode::Placeholder(RenderError::EmptySummary)
            }
        },
        ContentBlock::Malformed { kind, reason, .. } => {
            tracing::warn!(
                kind = %kind,
                reason = %reason,
                "Malformed block; rendering placeholder"
            );
            ViewNode::Placeholder(RenderError::MalformedBlock {
                kind: kind.clone(),
                reason: reason.clone(),
            })
        }
        ContentBlock::Unknown(_) => {
            tracing::debug!(kind = ?block.kind(), "Dropping block of unknown kind");
            return None;
        }
    };
    Some(node)
}

/// Flatten nested list items into indented entries.
///
/// Plain items are emitted at `depth`. Labelled items emit their label at
/// `depth` followed by their subitems at `depth + 1`.
pub fn render_nested(items: &[NestedItem], depth: usize) -> Vec<ListEntry> {
    let mut entries = Vec::new();
    push_nested(&mut entries, items, depth);
    entries
}

fn push_nested(entries: &mut Vec<ListEntry>, items: &[NestedItem], depth: usize) {
    for item in items {
        match item {
            NestedItem::Text(text) => entries.push(ListEntry {
                text: text.clone(),
                depth,
                role: EntryRole::Item,
            }),
            NestedItem::Branch { text, subitems } if subitems.is_empty() => {
                entries.push(ListEntry {
                    text: text.clone(),
                    depth,
                    role: EntryRole::Item,
                })
            }
            NestedItem::Branch { text, subitems } => {
                entries.push(ListEntry {
                    text: text.clone(),
                    depth,
                    role: EntryRole::Label,
                });
                push_nested(entries, subitems, depth + 1);
            }
        }
    }
}

fn render_list(list: &ListBlock) -> ViewNode {
    let groups = [&list.content, &list.items]
        .into_iter()
        .flatten()
        .map(|items| render_nested(items, 0))
        .collect();
    ViewNode::List { groups }
}

fn period_group(period: &TimelinePeriod) -> LabeledGroup {
    LabeledGroup {
        label: period.year.clone(),
        entries: period.events.clone(),
    }
}

fn day_group(day: &ItineraryDay) -> LabeledGroup {
    LabeledGroup {
        label: day.day.clone(),
        entries: day.activities.clone(),
    }
}

// =============================================================================
// Tests
// =============================================================================
