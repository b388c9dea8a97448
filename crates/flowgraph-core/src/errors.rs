//! Structured error types shared across flowgraph crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GraphError`] variant.
///
/// `field`, `edge` and `node` locate the offending part of a serialized
/// document; edges and nodes are addressed by their position in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Document field holding the offending value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Position of the offending edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<usize>,
    /// Position of the offending node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<usize>,
    /// Remaining key value pairs (endpoint role, underlying cause, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            edge: None,
            node: None,
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Names the document field holding the offending value.
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Points at the edge listed at `index`.
    pub fn at_edge(mut self, index: usize) -> Self {
        self.edge = Some(index);
        self
    }

    /// Points at the node listed at `index`.
    pub fn at_node(mut self, index: usize) -> Self {
        self.node = Some(index);
        self
    }

    /// Adds a free-form context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the flowgraph engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GraphError {
    /// Structural errors and caller contract violations on a graph.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Maximum flow solver errors.
    #[error("flow error: {0}")]
    Flow(ErrorInfo),
    /// Serialization and parsing errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        match (self.edge, self.node) {
            (Some(edge), _) => write!(f, " at edge #{edge}")?,
            (None, Some(node)) => write!(f, " at node #{node}")?,
            (None, None) => {}
        }
        if let Some(field) = &self.field {
            write!(f, " in `{field}`")?;
        }
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GraphError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GraphError::Graph(info) | GraphError::Flow(info) | GraphError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Attaches a context entry to the payload regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        let value = value.to_string();
        self.map_info(|info| info.with_context(key, value))
    }

    /// Names the offending document field regardless of the error family.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        self.map_info(|info| info.in_field(field))
    }

    /// Points at the offending edge regardless of the error family.
    pub fn at_edge(self, index: usize) -> Self {
        self.map_info(|info| info.at_edge(index))
    }

    /// Points at the offending node regardless of the error family.
    pub fn at_node(self, index: usize) -> Self {
        self.map_info(|info| info.at_node(index))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            GraphError::Graph(info) => GraphError::Graph(f(info)),
            GraphError::Flow(info) => GraphError::Flow(f(info)),
            GraphError::Serde(info) => GraphError::Serde(f(info)),
        }
    }
}

/// Builds a [`GraphError::Graph`] with the given code and message.
pub fn graph_error(code: impl Into<String>, message: impl Into<String>) -> GraphError {
    GraphError::Graph(ErrorInfo::new(code, message))
}

/// Builds a [`GraphError::Serde`] with the given code and message.
pub fn serde_error(code: impl Into<String>, message: impl Into<String>) -> GraphError {
    GraphError::Serde(ErrorInfo::new(code, message))
}
