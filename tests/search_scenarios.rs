mod support;

use heavylist::search::{gather, SearchOptions, SearchOutcome, SearchQuery, Searcher};
use heavylist::source::directory::root_seed;
use heavylist::source::tag::{Tag, TagSource};
use heavylist::source::StaticSource;
use heavylist::tree::{NodeId, NodeKind, NodeSeed, NodeTree};
use proptest::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

use support::{ints, inventory_chunk, plain_chunk, scenario_world, write_region};

fn child_named(tree: &NodeTree, parent: NodeId, name: &str) -> NodeId {
    *tree
        .children(parent)
        .unwrap()
        .iter()
        .find(|id| tree.name(**id).unwrap() == Some(name))
        .unwrap_or_else(|| panic!("{name} should be a child"))
}

#[test]
fn inventory_scenario_returns_first_chunk_list_and_keeps_its_path() {
    let temp_dir = TempDir::new().unwrap();
    let world = scenario_world(temp_dir.path());

    let mut tree = NodeTree::new();
    let root = tree.insert_root(root_seed(&world).unwrap());
    let outcome = heavylist::search(&mut tree, root, &SearchQuery::new("Inventory", 5)).unwrap();

    let found = outcome.found().expect("Inventory should be found");
    assert_eq!(tree.name(found).unwrap(), Some("Inventory"));
    assert_eq!(tree.list_count(found).unwrap(), Some(10));
    assert_eq!(
        tree.path_of(found).unwrap(),
        vec!["world", "r.0.0.region", "Chunk [0, 0]", "Level", "Inventory"]
    );

    // Root-to-match path stays expanded.
    let region = child_named(&tree, root, "r.0.0.region");
    let chunk = child_named(&tree, region, "Chunk [0, 0]");
    let level = child_named(&tree, chunk, "Level");
    for id in [root, region, chunk, level, found] {
        assert!(tree.is_expanded(id).unwrap());
    }

    // Chunk 2 was never reached.
    let second = child_named(&tree, region, "Chunk [1, 0]");
    assert!(!tree.is_expanded(second).unwrap());

    // The entry holding the nested Items list was never expanded.
    let first_entry = tree.children(found).unwrap()[0];
    assert!(!tree.is_expanded(first_entry).unwrap());
    assert!(tree.children(first_entry).unwrap().is_empty());
}

#[test]
fn nested_list_is_found_when_outer_list_is_too_small() {
    let temp_dir = TempDir::new().unwrap();
    let world = scenario_world(temp_dir.path());

    let mut tree = NodeTree::new();
    let root = tree.insert_root(root_seed(&world).unwrap());
    let outcome = heavylist::search(&mut tree, root, &SearchQuery::new("Items", 2)).unwrap();
    let found = outcome.found().unwrap();
    assert_eq!(
        tree.display_path(found),
        "world/r.0.0.region/Chunk [0, 0]/Level/Inventory/[0]/Items"
    );
}

#[test]
fn no_match_leaves_every_region_and_chunk_collapsed() {
    let temp_dir = TempDir::new().unwrap();
    let world = scenario_world(temp_dir.path());
    std::fs::create_dir(world.join("DIM1")).unwrap();
    write_region(&world.join("DIM1"), "r.5.5.region", &[(5, 5, plain_chunk())]);

    let mut tree = NodeTree::new();
    let root = tree.insert_root(root_seed(&world).unwrap());
    let report = Searcher::default()
        .search(&mut tree, root, &SearchQuery::new("Inventory", 10))
        .unwrap();

    assert_eq!(report.outcome, SearchOutcome::NotFound);
    assert_eq!(report.stats.regions, 2);
    assert_eq!(report.stats.chunks, 3);

    let regions = gather(&mut tree, root).unwrap();
    for region in regions {
        assert!(!tree.is_expanded(region).unwrap());
        assert!(tree.children(region).unwrap().is_empty());
    }
    // world, DIM1 and the two regions
    assert_eq!(tree.live_count(), 4);
}

#[test]
fn first_match_in_document_order_wins() {
    let temp_dir = TempDir::new().unwrap();
    let world = temp_dir.path().join("world");
    std::fs::create_dir_all(world.join("a")).unwrap();
    // "a/" sorts before "r.0.0.region"; its region is gathered first.
    write_region(
        &world.join("a"),
        "r.9.9.region",
        &[
            (9, 9, Tag::compound([("Entities", ints(2))])),
            (9, 8, Tag::compound([("Deep", Tag::compound([("Entities", ints(7))]))])),
        ],
    );
    write_region(&world, "r.0.0.region", &[(0, 0, Tag::compound([("Entities", ints(50))]))]);

    let mut tree = NodeTree::new();
    let root = tree.insert_root(root_seed(&world).unwrap());
    let found = heavylist::search(&mut tree, root, &SearchQuery::new("Entities", 5))
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(
        tree.display_path(found),
        "world/a/r.9.9.region/Chunk [9, 8]/Deep/Entities"
    );
}

#[test]
fn region_file_root_is_searched_directly() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_region(temp_dir.path(), "r.0.0.region", &[(0, 0, inventory_chunk())]);

    let mut tree = NodeTree::new();
    let root = tree.insert_root(root_seed(&path).unwrap());
    assert_eq!(tree.kind(root).unwrap(), NodeKind::Region);
    let outcome = heavylist::search(&mut tree, root, &SearchQuery::new("Inventory", 9)).unwrap();
    assert!(outcome.is_found());
}

#[test]
fn repeated_search_reuses_retained_path() {
    let temp_dir = TempDir::new().unwrap();
    let world = scenario_world(temp_dir.path());

    let mut tree = NodeTree::new();
    let root = tree.insert_root(root_seed(&world).unwrap());
    let query = SearchQuery::new("Inventory", 5);
    let first = heavylist::search(&mut tree, root, &query).unwrap();
    let second = heavylist::search(&mut tree, root, &query).unwrap();
    assert_eq!(first, second);
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![Just("A"), Just("B"), Just("C")].prop_map(str::to_string)
}

fn arb_tag() -> impl Strategy<Value = Tag> {
    let leaf = prop_oneof![
        any::<i32>().prop_map(Tag::Int),
        Just(Tag::String("s".to_string())),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|entries| Tag::List(entries.into_iter().map(Arc::new).collect())),
            prop::collection::vec((arb_name(), inner), 0..4).prop_map(|entries| {
                Tag::Compound(entries.into_iter().map(|(n, t)| (n, Arc::new(t))).collect())
            }),
        ]
    })
}

fn arb_chunk() -> impl Strategy<Value = Tag> {
    prop::collection::vec((arb_name(), arb_tag()), 0..4)
        .prop_map(|entries| Tag::Compound(entries.into_iter().map(|(n, t)| (n, Arc::new(t))).collect()))
}

fn arb_world() -> impl Strategy<Value = Vec<Vec<Tag>>> {
    prop::collection::vec(prop::collection::vec(arb_chunk(), 0..3), 0..3)
}

/// Plain recursive pre-order search over the tag values
fn reference(world: &[Vec<Tag>], name: &str, threshold: usize) -> Option<Vec<String>> {
    fn visit(tag: &Tag, path: &mut Vec<String>, name: &str, threshold: usize) -> bool {
        let children: Vec<(Option<&String>, &Tag)> = match tag {
            Tag::Compound(entries) => entries.iter().map(|(n, t)| (Some(n), t.as_ref())).collect(),
            Tag::List(entries) => entries.iter().map(|t| (None, t.as_ref())).collect(),
            _ => Vec::new(),
        };
        for (position, (child_name, child)) in children.into_iter().enumerate() {
            path.push(match child_name {
                Some(n) => n.clone(),
                None => format!("[{}]", position),
            });
            if let (Some(n), Tag::List(entries)) = (child_name, child) {
                if n == name && entries.len() > threshold {
                    return true;
                }
            }
            if visit(child, path, name, threshold) {
                return true;
            }
            path.pop();
        }
        false
    }

    for (r, chunks) in world.iter().enumerate() {
        for (c, root) in chunks.iter().enumerate() {
            let mut path = vec!["world".to_string(), format!("r{}", r), format!("c{}", c)];
            if visit(root, &mut path, name, threshold) {
                return Some(path);
            }
        }
    }
    None
}

fn build_tree(world: &[Vec<Tag>]) -> (NodeTree, NodeId) {
    let regions = world
        .iter()
        .enumerate()
        .map(|(r, chunks)| {
            let chunk_seeds = chunks
                .iter()
                .enumerate()
                .map(|(c, root)| {
                    NodeSeed::chunk(
                        format!("c{}", c),
                        Arc::new(TagSource::new(Arc::new(root.clone()))),
                    )
                })
                .collect();
            NodeSeed::region(format!("r{}", r), Arc::new(StaticSource::new(chunk_seeds)))
        })
        .collect();
    let mut tree = NodeTree::new();
    let root = tree.insert_root(NodeSeed::container("world", Arc::new(StaticSource::new(regions))));
    (tree, root)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn iterative_search_matches_recursive_reference(
        world in arb_world(),
        name in arb_name(),
        threshold in 0usize..4,
    ) {
        let (mut tree, root) = build_tree(&world);
        let report = Searcher::new(SearchOptions::default())
            .search(&mut tree, root, &SearchQuery::new(name.clone(), threshold))
            .unwrap();

        let expected = reference(&world, &name, threshold);
        match report.outcome {
            SearchOutcome::Found(id) => {
                prop_assert_eq!(Some(tree.path_of(id).unwrap()), expected);
            }
            SearchOutcome::NotFound => {
                prop_assert_eq!(expected, None);
                // Only the world container and its collapsed regions remain.
                prop_assert_eq!(tree.live_count(), 1 + world.len());
            }
        }
    }
}
