use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heavylist::search::{SearchQuery, Searcher};
use heavylist::source::tag::{Tag, TagSource};
use heavylist::source::StaticSource;
use heavylist::tree::{NodeSeed, NodeTree};
use std::sync::Arc;

fn section(y: i8) -> Tag {
    Tag::compound([
        ("Y", Tag::Byte(y)),
        ("Palette", Tag::list((0..16).map(|i| Tag::compound([("Name", Tag::Int(i))])))),
        ("BlockStates", Tag::LongArray(vec![0; 256])),
    ])
}

fn chunk_root() -> Tag {
    Tag::compound([(
        "Level",
        Tag::compound([
            ("Sections", Tag::list((0..16).map(section))),
            ("Entities", Tag::list((0..4).map(Tag::Int))),
        ]),
    )])
}

fn world(regions: usize, chunks: usize) -> (NodeTree, heavylist::NodeId) {
    let root_tag = Arc::new(chunk_root());
    let region_seeds = (0..regions)
        .map(|r| {
            let chunk_seeds = (0..chunks)
                .map(|c| NodeSeed::chunk(format!("Chunk [{}, {}]", r, c), Arc::new(TagSource::new(root_tag.clone()))))
                .collect();
            NodeSeed::region(format!("r.{}.0.region", r), Arc::new(StaticSource::new(chunk_seeds)))
        })
        .collect();
    let mut tree = NodeTree::new();
    let root = tree.insert_root(NodeSeed::container("world", Arc::new(StaticSource::new(region_seeds))));
    (tree, root)
}

fn bench_full_scan(c: &mut Criterion) {
    let searcher = Searcher::default();
    let query = SearchQuery::new("Entities", 1_000);
    c.bench_function("full_scan_4x32_chunks", |b| {
        b.iter_with_setup(
            || world(4, 32),
            |(mut tree, root)| black_box(searcher.search(&mut tree, root, &query).unwrap()),
        )
    });
}

fn bench_early_hit(c: &mut Criterion) {
    let searcher = Searcher::default();
    let query = SearchQuery::new("Palette", 8);
    c.bench_function("early_hit", |b| {
        b.iter_with_setup(
            || world(4, 32),
            |(mut tree, root)| black_box(searcher.search(&mut tree, root, &query).unwrap()),
        )
    });
}

criterion_group!(benches, bench_full_scan, bench_early_hit);
criterion_main!(benches);
