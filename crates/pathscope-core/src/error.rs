//! Error types and exit codes for pathscope
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid request)
//! - 3: Data error (unknown node, malformed graph document)
//!
//! "No path" and "fewer than K paths" are normal search outcomes and never
//! surface as errors.

mod macros;

use thiserror::Error;

use crate::graph::NodeId;

/// Exit codes for the pathscope CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unknown node, invalid document (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building graphs or starting searches
#[derive(Error, Debug)]
pub enum PathscopeError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("{role} node {id} does not exist (graph has {node_count} node slots)")]
    UnknownNode {
        role: &'static str,
        id: NodeId,
        node_count: usize,
    },

    #[error("{role} node {id} has been removed")]
    RemovedNode { role: &'static str, id: NodeId },

    #[error("invalid weight {weight} for edge {u}-{v}: weights must be finite and non-negative")]
    InvalidWeight { u: NodeId, v: NodeId, weight: f64 },

    #[error("self loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),
}

impl PathscopeError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        PathscopeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a usage error from a message
    pub fn usage(message: impl Into<String>) -> Self {
        PathscopeError::UsageError(message.into())
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PathscopeError::UsageError(_) | PathscopeError::InvalidValue { .. } => ExitCode::Usage,

            PathscopeError::UnknownNode { .. }
            | PathscopeError::RemovedNode { .. }
            | PathscopeError::InvalidWeight { .. }
            | PathscopeError::SelfLoop(_)
            | PathscopeError::Json(_) => ExitCode::Data,

            PathscopeError::Io(_)
            | PathscopeError::Toml(_)
            | PathscopeError::TomlSer(_)
            | PathscopeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            PathscopeError::UsageError(_) => "usage_error",
            PathscopeError::InvalidValue { .. } => "invalid_value",
            PathscopeError::UnknownNode { .. } => "unknown_node",
            PathscopeError::RemovedNode { .. } => "removed_node",
            PathscopeError::InvalidWeight { .. } => "invalid_weight",
            PathscopeError::SelfLoop(_) => "self_loop",
            PathscopeError::Io(_) => "io_error",
            PathscopeError::Json(_) => "json_error",
            PathscopeError::Toml(_) | PathscopeError::TomlSer(_) => "toml_error",
            PathscopeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for pathscope operations
pub type Result<T> = std::result::Result<T, PathscopeError>;
