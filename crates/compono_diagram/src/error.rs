//! Error types for diagram building.

use thiserror::Error;

/// Result type alias for diagram operations.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Errors that can occur while building a diagram.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DiagramError {
    #[error("Component '{component}' depends on unknown component '{dependency}'")]
    UnknownDependency { component: String, dependency: String },

    #[error("Component '{0}' is not placed in any rendered area")]
    UnplacedComponent(String),
}
