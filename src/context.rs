//! Run-scoped execution context threaded through every recipe call.
//!
//! The [`ExecutionContext`] is an externally-owned bag of run-scoped
//! configuration and state. The orchestration core forwards it unchanged
//! through every visitor and recipe call; only recipe implementations
//! interpret its contents. Messages are stored behind a shared mutex so a
//! context can be read from parallel scan and transform workers.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Opaque bag of run-scoped state shared by every call in a recipe run.
///
/// Cloning a context is cheap and yields a handle to the same underlying
/// message map.
#[derive(Clone, Default)]
pub struct ExecutionContext {
    messages: Arc<Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>>,
}

impl ExecutionContext {
    /// Create a new empty execution context
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a message under `key`, replacing any previous value.
    pub fn put_message<V: Any + Send + Sync>(&self, key: &str, value: V) -> Result<()> {
        let mut messages = self.messages.lock().map_err(|_| Error::LockPoisoned {
            context: "execution context messages".to_string(),
        })?;
        messages.insert(key.to_string(), Arc::new(value));
        Ok(())
    }

    /// Read the message stored under `key`, if any.
    ///
    /// Fails with [`Error::StoreType`] when a value exists under `key` but
    /// was stored with a different type.
    pub fn message<V: Any + Send + Sync>(&self, key: &str) -> Result<Option<Arc<V>>> {
        let messages = self.messages.lock().map_err(|_| Error::LockPoisoned {
            context: "execution context messages".to_string(),
        })?;
        match messages.get(key) {
            Some(value) => value
                .clone()
                .downcast::<V>()
                .map(Some)
                .map_err(|_| Error::StoreType {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.messages.lock().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("ExecutionContext")
            .field("messages", &entries)
            .finish()
    }
}
