//! Test helpers for writing scenario fixtures into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Write `contents` to `path`, creating the file.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding scenario and demand files.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_json(&self, name: &str, value: &Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_vec_pretty(value).expect("serialise fixture");
        write_utf8(&path, &payload);
        path
    }
}

/// Corridor scenario: a busy stop at the origin, a quieter stop 10 km north
/// and an empty stop between them, served by one bus of capacity 60.
pub(super) fn corridor_scenario() -> Value {
    json!({
        "stops": [
            { "id": 1, "location": { "x": 0.0, "y": 0.0 }, "demand": 50 },
            { "id": 2, "location": { "x": 0.0, "y": 0.089_932_2 }, "demand": 10 },
            { "id": 3, "location": { "x": 0.0, "y": 0.044_966_1 }, "demand": 0 }
        ],
        "vehicles": [
            { "id": 1, "capacity": 60, "start": { "stop": 1 } }
        ]
    })
}
