//! Shared fixtures for integration tests
#![allow(dead_code)]

use heavylist::source::region::{ChunkImage, RegionImage};
use heavylist::source::tag::Tag;
use std::fs;
use std::path::{Path, PathBuf};

pub fn ints(n: usize) -> Tag {
    Tag::list((0..n).map(|i| Tag::Int(i as i32)))
}

/// Chunk holding `Inventory` (10 entries) whose first entry holds `Items` (3 entries)
pub fn inventory_chunk() -> Tag {
    let mut entries = vec![Tag::compound([("Items", ints(3)), ("Slot", Tag::Byte(0))])];
    entries.extend((1..10).map(|slot| Tag::compound([("Slot", Tag::Byte(slot))])));
    Tag::compound([
        ("DataVersion", Tag::Int(1343)),
        (
            "Level",
            Tag::compound([
                ("xPos", Tag::Int(0)),
                ("Inventory", Tag::list(entries)),
            ]),
        ),
    ])
}

/// Chunk without any list named `Inventory`
pub fn plain_chunk() -> Tag {
    Tag::compound([(
        "Level",
        Tag::compound([("Entities", ints(40)), ("xPos", Tag::Int(1))]),
    )])
}

pub fn write_region(dir: &Path, name: &str, chunks: &[(i32, i32, Tag)]) -> PathBuf {
    let images = chunks
        .iter()
        .map(|(x, z, root)| ChunkImage::encode(*x, *z, root).unwrap())
        .collect();
    let path = dir.join(name);
    RegionImage::new(images).write_to(&path).unwrap();
    path
}

/// `<dir>/world` with one region holding an inventory chunk and a plain chunk
pub fn scenario_world(dir: &Path) -> PathBuf {
    let world = dir.join("world");
    fs::create_dir_all(&world).unwrap();
    write_region(
        &world,
        "r.0.0.region",
        &[(0, 0, inventory_chunk()), (1, 0, plain_chunk())],
    );
    world
}
