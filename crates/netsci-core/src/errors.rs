//! Error values raised by generators, graph assembly, queries and the run driver.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and offending inputs carried by each [`NetError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code such as `probability-range` or `unknown-node`.
    pub code: String,
    /// What went wrong, in a sentence.
    pub message: String,
    /// Offending inputs by name, e.g. `parameter=p` and `value=1.5`, or the node id.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to fix the input, when there is an obvious fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one offending input.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a fix suggestion.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the netsci engine.
///
/// Only programmer errors surface here. Unreachable pairs, stuck walks and
/// exhausted rewiring budgets are ordinary results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NetError {
    /// A generator or query received an out-of-range parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// An edge or query referenced a node that is not part of the graph.
    #[error("unknown node reference: {0}")]
    UnknownNodeReference(ErrorInfo),
    /// Structural violations detected while assembling a graph.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Run configuration errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    /// Renders as `[code] message {key=value, ...} hint: ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " {{{key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl NetError {
    /// Payload shared by every variant.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NetError::InvalidParameter(info)
            | NetError::UnknownNodeReference(info)
            | NetError::Graph(info)
            | NetError::Serde(info)
            | NetError::Config(info) => info,
        }
    }

    /// Shorthand for an [`NetError::InvalidParameter`] naming the offending parameter.
    pub fn invalid_parameter(
        code: impl Into<String>,
        parameter: &str,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        NetError::InvalidParameter(
            ErrorInfo::new(code, message)
                .with_context("parameter", parameter)
                .with_context("value", value.to_string()),
        )
    }

    /// Shorthand for an [`NetError::UnknownNodeReference`] naming the missing node.
    pub fn unknown_node(node: impl ToString) -> Self {
        NetError::UnknownNodeReference(
            ErrorInfo::new("unknown-node", "node is not part of the graph")
                .with_context("node", node.to_string()),
        )
    }
}
