//! Error types for the Voltflow diagram simulator.
//!
//! This module provides a unified error type [`VoltflowError`] covering the
//! loader and configuration boundary: DSL parsing, JSON decoding, diagram
//! construction and simulator configuration.
//!
//! The simulation engine itself never fails. Lookup misses, missing power
//! sources and malformed wire endpoints all degrade to an inspectable
//! "nothing energized / no path" result instead of an error.

use thiserror::Error;

/// Result type alias using [`VoltflowError`].
pub type Result<T> = std::result::Result<T, VoltflowError>;

/// Unified error type for all Voltflow operations that can fail.
#[derive(Error, Debug)]
pub enum VoltflowError {
    // ============ DSL Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{id}' at line {line}: {message}")]
    InvalidComponent {
        id: String,
        line: usize,
        message: String,
    },

    /// Unknown component kind keyword
    #[error("Unknown component kind '{kind}' at line {line}")]
    UnknownComponentKind { kind: String, line: usize },

    // ============ Diagram Errors ============
    /// Two components share an id
    #[error("Duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    /// Two components share a designation
    #[error("Duplicate designation '{designation}' (components '{first}' and '{second}')")]
    DuplicateDesignation {
        designation: String,
        first: String,
        second: String,
    },

    /// Two wires share an id
    #[error("Duplicate wire id '{id}'")]
    DuplicateWire { id: String },

    /// JSON diagram could not be decoded
    #[error("Invalid diagram JSON: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    // ============ Configuration Errors ============
    /// Invalid simulator configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ I/O Errors ============
    /// Error reading a diagram file
    #[error("Failed to read diagram file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl VoltflowError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(
        id: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidComponent {
            id: id.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
