//! Error conversion helpers for store I/O
//!
//! Provides an extension trait for cleaner error handling with key context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add store-key context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// self.store.get(key).with_key_context("read", key)?;
    /// ```
    fn with_key_context(self, action: &str, key: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_key_context(self, action: &str, key: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{} `{}`", action, key),
            source: Box::new(e),
        })
    }
}
