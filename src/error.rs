//! Error types for the truss solver

use thiserror::Error;

/// Main error type for model building, assembly and solving
#[derive(Error, Debug)]
pub enum TrussError {
    #[error("Cannot add node id={0}, it already exists")]
    DuplicateNode(usize),

    #[error("Node {0} not found in model")]
    NodeNotFound(usize),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("DOF numbering is frozen; nodes cannot be added after constraints or forces are registered")]
    NumberingFrozen,

    #[error("Node {node} has an unconstrained DOF without an active index - run assemble() first")]
    UnnumberedDof { node: usize },

    #[error("Model not assembled - run assemble() first")]
    NotAssembled,

    #[error("Model not solved - run solve() first")]
    NotSolved,

    #[error("Zero pivot on diagonal row {0}")]
    ZeroPivot(usize),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for truss solver operations
pub type TrussResult<T> = Result<T, TrussError>;
