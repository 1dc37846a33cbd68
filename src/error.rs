//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `remold` core. It uses the `thiserror` library to create an `Error` enum
//! covering the failure modes this crate owns, providing clear and
//! descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the orchestration core. Each variant corresponds to a
//!   specific type of error and includes contextual information to aid in
//!   debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the crate to simplify function signatures.
//!
//! Failures raised by recipe-supplied logic (accumulator initialization,
//! scanners, generators, transform visitors) are propagated unchanged as
//! `Error::Recipe`; this core adds no recovery semantics of its own, since
//! it has no knowledge of what a safe partial state looks like for an
//! arbitrary accumulator type.

use thiserror::Error;

/// Main error type for remold operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error raised by recipe-supplied logic.
    ///
    /// Covers accumulator initialization, scanner, generator, and transform
    /// visitor failures. The failure aborts the recipe's participation in
    /// the current traversal; no partial rollback is attempted.
    #[error("Recipe error: {recipe} - {message}")]
    Recipe { recipe: String, message: String },

    /// A value in a shared store did not have the type the caller expected.
    ///
    /// Practically impossible under high-entropy key allocation, since no
    /// two recipe instances resolve to the same key.
    #[error("Store value type mismatch for key: {key}")]
    StoreType { key: String },

    /// An error indicating that a mutex guarding shared traversal state has
    /// been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
