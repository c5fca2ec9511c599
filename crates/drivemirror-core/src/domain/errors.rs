//! Domain error types
//!
//! This module defines error types specific to domain operations.
//! Adapter-level failures (HTTP, object storage) stay behind the port
//! boundaries as `anyhow::Error`; only domain-rule violations live here.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown addressing mode name (expected `hierarchical` or `flattened`)
    #[error("Invalid addressing mode: {0}")]
    InvalidAddressingMode(String),
}
