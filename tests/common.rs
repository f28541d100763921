use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn pathscope() -> Command {
    cargo_bin_cmd!("pathscope")
}

/// Nodes {0,1,2} with edges 0-1 (1), 1-2 (1), 0-2 (5)
pub const TRIANGLE: &str = r#"{
  "nodes": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}],
  "edges": [
    {"u": 0, "v": 1, "weight": 1},
    {"u": 1, "v": 2, "weight": 1},
    {"u": 0, "v": 2, "weight": 5}
  ]
}"#;

/// A=0, B=1, C=2, D=3 with two cost-2 routes and a direct A-D edge of cost 5
#[allow(dead_code)]
pub const DIAMOND: &str = r#"{
  "nodes": [{"x": 0, "y": 0}, {"x": 0.5, "y": 0.5}, {"x": 0.5, "y": -0.5}, {"x": 1, "y": 0}],
  "edges": [
    {"u": 0, "v": 1, "weight": 1},
    {"u": 0, "v": 2, "weight": 1},
    {"u": 1, "v": 3, "weight": 1},
    {"u": 2, "v": 3, "weight": 1},
    {"u": 0, "v": 3, "weight": 5}
  ]
}"#;

pub fn write_graph(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write graph document");
    path
}

/// Parse JSON-lines stdout into values
#[allow(dead_code)]
pub fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}
