//! Benchmarks for rendering large structured replies.
//!
//! Rendering runs on every display pass with no caching, so the cost of a
//! full pass over a long, deeply nested reply is what matters here.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use guidechat_core::content::{
    ContentBlock, ItineraryDay, ListBlock, NestedItem, TableBlock, TimelinePeriod,
};
use guidechat_render::{render, to_plain_text};

/// Build a nested list item `depth` levels deep with `fanout` children each.
fn nested_item(label: &str, depth: usize, fanout: usize) -> NestedItem {
    if depth == 0 {
        return NestedItem::Text(label.to_string());
    }
    let subitems = (0..fanout)
        .map(|i| nested_item(&format!("{}.{}", label, i), depth - 1, fanout))
        .collect();
    NestedItem::branch(label, subitems)
}

/// A reply mixing every block kind, wrapped in sections.
fn large_reply(sections: usize) -> Vec<ContentBlock> {
    (0..sections)
        .map(|s| ContentBlock::Section {
            title: format!("Section {}", s),
            content: vec![
                ContentBlock::Header(format!("Heading {}", s)),
                ContentBlock::Text("The Sanetti Plateau sits above 4,000 metres.".to_string()),
                ContentBlock::List(ListBlock {
                    content: Some(vec![NestedItem::from("Ethiopian wolf")]),
                    items: Some(vec![nested_item("Habitats", 4, 3)]),
                }),
                ContentBlock::Table(TableBlock {
                    columns: vec!["Visitor".to_string(), "Fee".to_string()],
                    rows: (0..20)
                        .map(|r| vec![format!("Type {}", r), format!("{} ETB", r * 10)])
                        .collect(),
                }),
                ContentBlock::Timeline(vec![TimelinePeriod {
                    year: "1970".to_string(),
                    events: vec!["Park established".to_string()],
                }]),
                ContentBlock::OrderedList(vec![ItineraryDay {
                    day: "Day 1".to_string(),
                    activities: vec!["Drive to Dinsho".to_string()],
                }]),
                ContentBlock::Summary(vec!["Summary".to_string(), "Point".to_string()]),
                ContentBlock::Note("Bring layers.".to_string()),
            ],
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let reply = large_reply(50);

    let mut group = c.benchmark_group("render");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("view_nodes", |b| {
        b.iter(|| render(std::hint::black_box(&reply)))
    });

    let nodes = render(&reply);
    group.bench_function("plain_text", |b| {
        b.iter(|| to_plain_text(std::hint::black_box(&nodes)))
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
