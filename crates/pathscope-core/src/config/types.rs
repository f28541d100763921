//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Default file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pathscope.toml";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Event trace settings
    #[serde(default)]
    pub trace: TraceConfig,

    /// City graph generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Settings that shape emitted traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Number of frontier entries captured in each snapshot
    #[serde(default = "default_snapshot_depth")]
    pub snapshot_depth: usize,

    /// Number of paths requested from Yen when no `k` is given
    #[serde(default = "default_k")]
    pub default_k: usize,
}

/// Parameters for the random "city" graph generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of intersections to place
    #[serde(default = "default_nodes")]
    pub nodes: usize,

    /// Width of the placement area
    #[serde(default = "default_width")]
    pub width: f64,

    /// Height of the placement area
    #[serde(default = "default_height")]
    pub height: f64,

    /// Inset kept free on every side of the area
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Street connection radius as a fraction of min(width, height)
    #[serde(default = "default_street_radius")]
    pub street_radius: f64,

    /// Chance that two nearby intersections get a street
    #[serde(default = "default_street_probability")]
    pub street_probability: f64,

    /// Number of random long-distance edges
    #[serde(default = "default_long_edges")]
    pub long_edges: usize,
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_snapshot_depth() -> usize {
    5
}

fn default_k() -> usize {
    5
}

fn default_nodes() -> usize {
    230
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    500.0
}

fn default_margin() -> f64 {
    40.0
}

fn default_street_radius() -> f64 {
    0.18
}

fn default_street_probability() -> f64 {
    0.35
}

fn default_long_edges() -> usize {
    30
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            trace: TraceConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            snapshot_depth: default_snapshot_depth(),
            default_k: default_k(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            street_radius: default_street_radius(),
            street_probability: default_street_probability(),
            long_edges: default_long_edges(),
        }
    }
}
