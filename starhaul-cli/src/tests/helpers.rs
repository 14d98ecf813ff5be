//! Test helpers for writing haul documents into temporary workspaces.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// One parcel from the depot to the market, five apart.
pub(super) const SINGLE_DELIVERY: &str = r#"{
    "HaulerCapacity": 1,
    "Locations": ["depot", "market"],
    "HaulerStartLocation": "depot",
    "Distances": { "depot": { "market": 5 } },
    "Tasks": [{ "From": "depot", "To": "market", "Items": [{ "Volume": 1 }] }]
}"#;

/// An item twice the size of the carrier.
pub(super) const OVERSIZED_DELIVERY: &str = r#"{
    "HaulerCapacity": 1,
    "Locations": ["depot", "market"],
    "HaulerStartLocation": "depot",
    "Distances": { "market": { "depot": 3 } },
    "Tasks": [{ "From": "depot", "To": "market", "Items": [{ "Volume": 2 }] }]
}"#;

/// A start location that is not listed.
pub(super) const UNKNOWN_START: &str = r#"{
    "HaulerCapacity": 1,
    "Locations": ["depot", "market"],
    "HaulerStartLocation": "harbour",
    "Distances": { "depot": { "market": 5 } },
    "Tasks": []
}"#;

/// Expected text report for [`SINGLE_DELIVERY`].
pub(super) const SINGLE_DELIVERY_REPORT: &str = "Actions to take:\n  \
    1. take item 0\n  \
    2. move to location 1\n  \
    3. put item 0\n\
    ---\n\
    Lowest estimated cost: 9\n\
    Actual cost          : 9\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

/// A temporary directory and its UTF-8 path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Write `contents` as `haul.json` inside a fresh workspace.
pub(super) fn haul_file(contents: &str) -> (TempDir, Utf8PathBuf) {
    let (tmp, root) = workspace();
    let path = root.join("haul.json");
    write_utf8(&path, contents.as_bytes());
    (tmp, path)
}
