//! Errors raised by passes.
//!
//! - [`CheckViolation`]: the input uses a construct the target cannot run.
//! - [`FixerError::Unsupported`]: a fixer met a shape it cannot rewrite.
//! - [`FixerError::Contract`]: a fixer broke the rewrite contract (an internal defect).

use downlevel_tree::{Node, NodeRef};
use thiserror::Error;

/// First offending construct found by a checker.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{checker}: {message}")]
pub struct CheckViolation {
    pub checker: &'static str,
    pub message: String,
    pub node: Option<Box<Node>>,
}

impl CheckViolation {
    pub fn new(checker: &'static str, message: impl Into<String>) -> Self {
        Self {
            checker,
            message: message.into(),
            node: None,
        }
    }

    pub fn at(mut self, node: impl Into<Node>) -> Self {
        self.node = Some(Box::new(node.into()));
        self
    }

    pub fn at_ref(self, node: NodeRef<'_>) -> Self {
        self.at(node.to_node())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixerError {
    /// The input has a shape this fixer does not handle.
    #[error("{message}{}", in_module(.module))]
    Unsupported {
        message: String,
        node: Option<Box<Node>>,
        module: Option<String>,
    },

    /// The fixer produced a tree that breaks the rewrite contract.
    #[error("contract violation{}: {message}", in_fixer(.fixer))]
    Contract {
        fixer: Option<&'static str>,
        message: String,
    },
}

fn in_module(module: &Option<String>) -> String {
    module
        .as_deref()
        .map(|m| format!(" (in module {m})"))
        .unwrap_or_default()
}

fn in_fixer(fixer: &Option<&'static str>) -> String {
    fixer.map(|f| format!(" in {f}")).unwrap_or_default()
}

impl FixerError {
    pub fn unsupported(message: impl Into<String>, node: impl Into<Node>) -> Self {
        FixerError::Unsupported {
            message: message.into(),
            node: Some(Box::new(node.into())),
            module: None,
        }
    }

    pub fn contract(message: impl Into<String>) -> Self {
        FixerError::Contract {
            fixer: None,
            message: message.into(),
        }
    }

    /// Attaches the module name to an `Unsupported` error.
    ///
    /// A name that is already set is kept.
    pub fn with_module(mut self, name: &str) -> Self {
        if let FixerError::Unsupported { module, .. } = &mut self
            && module.is_none()
        {
            *module = Some(name.to_string());
        }
        self
    }

    /// Attaches the reporting fixer to a `Contract` error. A set fixer is kept.
    pub fn with_fixer(mut self, key: &'static str) -> Self {
        if let FixerError::Contract { fixer, .. } = &mut self
            && fixer.is_none()
        {
            *fixer = Some(key);
        }
        self
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, FixerError::Contract { .. })
    }

    pub fn node(&self) -> Option<&Node> {
        match self {
            FixerError::Unsupported { node, .. } => node.as_deref(),
            FixerError::Contract { .. } => None,
        }
    }

    pub fn module(&self) -> Option<&str> {
        match self {
            FixerError::Unsupported { module, .. } => module.as_deref(),
            FixerError::Contract { .. } => None,
        }
    }
}

pub type FixResult<T> = Result<T, FixerError>;
