//! Boundary error types.

use thiserror::Error;

/// Boundary errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A facade was declared for a namespace missing from `defined_namespaces`.
    #[error("namespace {namespace} is not listed in defined_namespaces")]
    WrongNamespace { namespace: String },

    /// A facade's simple name is not in `allowed_class_names_for_facade`.
    #[error("facade name {name} is not allowed (expected one of {allowed:?})")]
    WrongFacadeClassName { name: String, allowed: Vec<String> },

    /// External code referenced a symbol hidden behind a facade.
    #[error("private constant {namespace}::{name} referenced")]
    SymbolNotFound { namespace: String, name: String },

    /// The symbol was never defined.
    #[error("uninitialized constant {namespace}::{name}")]
    UndefinedSymbol { namespace: String, name: String },

    /// No namespace is registered under this path.
    #[error("uninitialized namespace {path}")]
    UndefinedNamespace { path: String },

    /// The path resolved, but not to a facade.
    #[error("{path} is not a facade")]
    NotAFacade { path: String },

    /// The configuration was already finalized.
    #[error("Cannot modify frozen config")]
    FrozenConfiguration,

    /// A declared facade cannot gain or replace operations.
    #[error("can't modify frozen facade: {facade}")]
    FrozenFacade { facade: String },

    /// A callable action never overrode `call`.
    #[error("{type_name} does not implement a call method")]
    NotImplemented { type_name: String },

    /// The facade has no operation with this name.
    #[error("undefined operation `{operation}` for {facade}")]
    UndefinedOperation { facade: String, operation: String },

    /// The operation exists but is not part of the facade's public surface.
    #[error("private operation `{operation}` called for {facade}")]
    PrivateOperation { facade: String, operation: String },

    /// The operation name collides with the facade's private surface.
    #[error("operation name `{operation}` is reserved on {facade}")]
    ReservedOperation { facade: String, operation: String },

    /// An action could not be constructed from its arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An action ran and failed.
    #[error("action failed: {0}")]
    Action(String),

    /// Failed to parse a settings file.
    #[error("failed to parse settings: {0}")]
    Parse(String),

    /// An I/O error occurred while reading settings.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode an argument value.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error signals a boundary violation rather than misconfiguration.
    ///
    /// Callers may catch and report these; everything else is a programmer error.
    pub fn is_boundary_violation(&self) -> bool {
        matches!(
            self,
            Error::SymbolNotFound { .. } | Error::PrivateOperation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
