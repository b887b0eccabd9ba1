//! Error types for merging and dispatching

use std::fmt;

/// Error raised when a patch cannot be merged into a state value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The state is a dynamic value that is not a record
    NotAnObject {
        /// JSON type name of the offending value
        found: &'static str,
    },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::NotAnObject { found } => {
                write!(f, "cannot merge a patch into a non-object state ({})", found)
            }
        }
    }
}

impl std::error::Error for MergeError {}

/// Error raised by a dispatcher
///
/// A failing dispatch never replaces the state: the new state is computed
/// completely before it is written back to the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No dispatcher is registered under this name
    UnknownAction(String),
    /// The reducer function no longer produces a handler for this action
    MissingHandler(String),
    /// The patch could not be merged into the previous state
    Merge(MergeError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownAction(name) => write!(f, "unknown action: {}", name),
            DispatchError::MissingHandler(name) => {
                write!(f, "reducer no longer handles action: {}", name)
            }
            DispatchError::Merge(e) => write!(f, "merge failed: {}", e),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Merge(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MergeError> for DispatchError {
    fn from(e: MergeError) -> Self {
        DispatchError::Merge(e)
    }
}
