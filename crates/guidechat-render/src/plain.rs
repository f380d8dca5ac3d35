//! Plain-text layout of rendered view nodes for terminal output.

use crate::view::{EntryRole, HeadingLevel, LabeledGroup, ListEntry, ViewNode};

const INDENT: &str = "  ";

/// Lay out nodes as text, one blank line between top-level nodes.
pub fn to_plain_text(nodes: &[ViewNode]) -> String {
    nodes
        .iter()
        .map(|node| node_lines(node).join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn node_lines(node: &ViewNode) -> Vec<String> {
    match node {
        ViewNode::Heading { level, text } => {
            let rule = match level {
                HeadingLevel::Title => '=',
                HeadingLevel::Subtitle => '-',
            };
            vec![
                text.clone(),
                std::iter::repeat(rule).take(text.chars().count()).collect(),
            ]
        }
        ViewNode::Paragraph(text) => vec![text.clone()],
        ViewNode::List { groups } => groups.iter().flatten().map(entry_line).collect(),
        ViewNode::Table { header, rows } => table_lines(header, rows),
        ViewNode::Section { title, children } => {
            let mut lines = vec![format!("┌─ {}", title)];
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    lines.push("│".to_string());
                }
                lines.extend(node_lines(child).into_iter().map(|l| format!("│ {}", l)));
            }
            lines.push("└─".to_string());
            lines
        }
        ViewNode::Timeline(periods) => periods
            .iter()
            .flat_map(|period| {
                std::iter::once(format!("│ {}", period.label)).chain(
                    period
                        .entries
                        .iter()
                        .map(|event| format!("│ {}- {}", INDENT, event)),
                )
            })
            .collect(),
        ViewNode::Itinerary(days) => days
            .iter()
            .enumerate()
            .flat_map(|(i, day)| numbered_group(i + 1, day))
            .collect(),
        ViewNode::Summary { heading, points } => std::iter::once(heading.clone())
            .chain(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, point)| format!("{}{}. {}", INDENT, i + 1, point)),
            )
            .collect(),
        ViewNode::Note(text) => vec![format!("Note: {}", text)],
        ViewNode::Placeholder(err) => vec![format!("[unavailable: {}]", err)],
    }
}

fn entry_line(entry: &ListEntry) -> String {
    let bullet = match entry.role {
        EntryRole::Item => "-",
        EntryRole::Label => "•",
    };
    format!("{}{} {}", INDENT.repeat(entry.depth), bullet, entry.text)
}

fn numbered_group(number: usize, group: &LabeledGroup) -> Vec<String> {
    let prefix = format!("{}. ", number);
    let pad = " ".repeat(prefix.len());
    std::iter::once(format!("{}{}", prefix, group.label))
        .chain(group.entries.iter().map(|e| format!("{}- {}", pad, e)))
        .collect()
}

fn table_lines(header: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |row: &[String]| {
        row.iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i] - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(header)];
    lines.push(
        widths[..header.len()]
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| format_row(row.as_slice())));
    lines
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn test_heading_is_underlined() {
        let out = to_plain_text(&[ViewNode::Heading {
            level: HeadingLevel::Title,
            text: s("Fees"),
        }]);
        assert_eq!(out, "Fees\n====");
    }

    #[test]
    fn test_nodes_separated_by_blank_line() {
        let out = to_plain_text(&[ViewNode::Paragraph(s("a")), ViewNode::Note(s("b"))]);
        assert_eq!(out, "a\n\nNote: b");
    }

    #[test]
    fn test_list_indents_by_depth() {
        let out = to_plain_text(&[ViewNode::List {
            groups: vec![
                vec![ListEntry {
                    text: s("Route 1"),
                    depth: 0,
                    role: EntryRole::Item,
                }],
                vec![
                    ListEntry {
                        text: s("Lodges"),
                        depth: 0,
                        role: EntryRole::Label,
                    },
                    ListEntry {
                        text: s("Bale Mountain Lodge"),
                        depth: 1,
                        role: EntryRole::Item,
                    },
                ],
            ],
        }]);
        assert_eq!(out, "- Route 1\n• Lodges\n  - Bale Mountain Lodge");
    }

    #[test]
    fn test_table_columns_are_padded() {
        let out = to_plain_text(&[ViewNode::Table {
            header: vec![s("Visitor"), s("Fee")],
            rows: vec![vec![s("Adult"), s("90 ETB")], vec![s("Child"), s("40")]],
        }]);
        assert_eq!(
            out,
            "Visitor | Fee\n--------+-------\nAdult   | 90 ETB\nChild   | 40"
        );
    }

    #[test]
    fn test_ragged_table_does_not_panic() {
        let lines = table_lines(&[s("A")], &[vec![s("1"), s("extra")], vec![]]);
        assert_eq!(lines, vec![s("A"), s("-"), s("1 | extra"), s("")]);
    }

    #[test]
    fn test_section_draws_border() {
        let out = to_plain_text(&[ViewNode::Section {
            title: s("Wildlife"),
            children: vec![ViewNode::Paragraph(s("Ethiopian wolf"))],
        }]);
        assert_eq!(out, "┌─ Wildlife\n│ Ethiopian wolf\n└─");
    }

    #[test]
    fn test_itinerary_and_summary_are_numbered() {
        let out = to_plain_text(&[
            ViewNode::Itinerary(vec![LabeledGroup {
                label: s("Day 1"),
                entries: vec![s("Arrive")],
            }]),
            ViewNode::Summary {
                heading: s("Key points"),
                points: vec![s("Go early"), s("Pack layers")],
            },
        ]);
        assert_eq!(
            out,
            "1. Day 1\n   - Arrive\n\nKey points\n  1. Go early\n  2. Pack layers"
        );
    }

    #[test]
    fn test_timeline_uses_left_rule() {
        let out = to_plain_text(&[ViewNode::Timeline(vec![LabeledGroup {
            label: s("1970"),
            entries: vec![s("Established")],
        }])]);
        assert_eq!(out, "│ 1970\n│   - Established");
    }

    #[test]
    fn test_placeholder_shows_reason() {
        let out = to_plain_text(&[ViewNode::Placeholder(RenderError::EmptySummary)]);
        assert_eq!(out, "[unavailable: summary has no content]");
    }
}
