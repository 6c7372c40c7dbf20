//! Domain errors raised when assembling packages and loads

use thiserror::Error;

/// Errors produced by the domain builders
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid package id '{id}': {reason}")]
    InvalidPackageId { id: String, reason: &'static str },

    #[error("Invalid content line ({length} ft x {piece_count} pcs): {reason}")]
    InvalidContentLine {
        length: i32,
        piece_count: i32,
        reason: &'static str,
    },

    #[error("Package {id} has no valid content lines")]
    EmptyPackage { id: String },

    #[error("Unknown load status '{0}'")]
    UnknownLoadStatus(String),
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
