//! Unified error types for the crate.
//!
//! Every fallible operation returns [`Result`], so callers (the service layer, the CLI)
//! handle a single error enum regardless of whether the failure came from input
//! validation, the database, or configuration loading.

use thiserror::Error;

/// All errors produced by the library and the binary.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be used
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable explanation
        message: String,
    },

    /// Error reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A caller passed arguments that violate an operation's contract
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// An amount was negative, not a number, or otherwise unusable
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount as received
        amount: String,
    },

    /// A NIT did not have the expected shape or check digit
    #[error("Invalid tax id '{tax_id}': {reason}")]
    InvalidTaxId {
        /// The tax id as received
        tax_id: String,
        /// Why it was rejected
        reason: String,
    },

    /// No supplier with the given id
    #[error("Supplier not found: {id}")]
    SupplierNotFound {
        /// Supplier id or tax id used for the lookup
        id: String,
    },

    /// No company with the given id
    #[error("Company not found: {id}")]
    CompanyNotFound {
        /// Company id or tax id used for the lookup
        id: String,
    },

    /// No retention concept with the given code
    #[error("Retention concept not found: {code}")]
    ConceptNotFound {
        /// The concept code
        code: String,
    },

    /// The retention concept exists but is deactivated
    #[error("Retention concept is inactive: {code}")]
    InactiveConcept {
        /// The concept code
        code: String,
    },

    /// A record with the same natural key already exists
    #[error("{entity} already exists: {key}")]
    DuplicateRecord {
        /// Kind of record (e.g. "Supplier")
        entity: &'static str,
        /// The conflicting key
        key: String,
    },

    /// A stored row could not be turned into a domain record
    #[error("Corrupt {entity} record: {message}")]
    CorruptRecord {
        /// Kind of record
        entity: &'static str,
        /// What could not be parsed
        message: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
