//! Traversal-position handles and the root-scoped store.
//!
//! ## Overview
//!
//! Every traversal over a repository owns one [`RootScope`]: an atomic
//! get-or-compute key-value store shared by every position visited during
//! that traversal. Scanning recipes use it to share one accumulator across
//! all files of the traversal ("compute once, reuse many"). The scope is an
//! explicit per-traversal object passed through the walk rather than an
//! implicit global, so the coupling between recipe and store stays visible
//! at the call sites.
//!
//! A [`Cursor`] represents "where we are" in the walk: it carries an
//! ownership chain of parent links up to the traversal root plus a handle
//! to the root's scope. This core uses cursors for exactly two things:
//! reaching the root, and reaching the root's store.
//!
//! The scope's lifetime is externally managed; dropping it at the end of a
//! cycle discards all accumulated state, so no explicit release protocol
//! exists here.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Atomic get-or-compute key-value store scoped to one traversal root.
#[derive(Default)]
pub struct RootScope {
    values: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl RootScope {
    /// Create a new empty root scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`, or compute, store, and return it.
    ///
    /// The supplier runs at most once per key: the store lock is held for
    /// the duration of the computation, so racing first accesses all
    /// observe the one stored value. A supplier failure propagates to the
    /// caller and caches nothing, so a later call recomputes from scratch.
    pub fn compute_if_absent<V, F>(&self, key: &str, supplier: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce() -> Result<V>,
    {
        let mut values = self.values.lock().map_err(|_| Error::LockPoisoned {
            context: "root scope store".to_string(),
        })?;
        if let Some(existing) = values.get(key) {
            return existing
                .clone()
                .downcast::<V>()
                .map_err(|_| Error::StoreType {
                    key: key.to_string(),
                });
        }
        let value = Arc::new(supplier()?);
        values.insert(key.to_string(), value.clone() as Arc<dyn Any + Send + Sync>);
        Ok(value)
    }

    /// Get the number of stored entries
    pub fn len(&self) -> Result<usize> {
        let values = self.values.lock().map_err(|_| Error::LockPoisoned {
            context: "root scope store".to_string(),
        })?;
        Ok(values.len())
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl fmt::Debug for RootScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.values.lock().map(|v| v.len()).unwrap_or(0);
        f.debug_struct("RootScope").field("entries", &entries).finish()
    }
}

/// A position within a traversal, with an ownership chain up to the root.
#[derive(Debug, Clone)]
pub struct Cursor {
    parent: Option<Arc<Cursor>>,
    scope: Arc<RootScope>,
    path: Option<PathBuf>,
}

impl Cursor {
    /// The root cursor of a fresh traversal over `scope`.
    pub fn new_root(scope: Arc<RootScope>) -> Self {
        Self {
            parent: None,
            scope,
            path: None,
        }
    }

    /// A child cursor positioned at `path`, owned by this cursor.
    pub fn child<P: Into<PathBuf>>(&self, path: P) -> Self {
        Self {
            parent: Some(Arc::new(self.clone())),
            scope: self.scope.clone(),
            path: Some(path.into()),
        }
    }

    /// Walk the parent chain up to the traversal root.
    pub fn root(&self) -> &Cursor {
        let mut cursor = self;
        while let Some(parent) = cursor.parent.as_deref() {
            cursor = parent;
        }
        cursor
    }

    /// Position label for this cursor, if any. Root cursors have none.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The store shared by every cursor of this traversal.
    pub fn scope(&self) -> &Arc<RootScope> {
        &self.scope
    }

    /// Atomic get-or-compute against the root's store.
    ///
    /// See [`RootScope::compute_if_absent`] for the at-most-once guarantee.
    pub fn compute_if_absent_at_root<V, F>(&self, key: &str, supplier: F) -> Result<Arc<V>>
    where
        V: Any + Send + Sync,
        F: FnOnce() -> Result<V>,
    {
        self.root().scope.compute_if_absent(key, supplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_compute_if_absent_computes_once() {
        let scope = RootScope::new();
        let calls = AtomicUsize::new(0);

        let first = scope
            .compute_if_absent("k", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(41usize)
            })
            .unwrap();
        let second = scope
            .compute_if_absent("k", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(99usize)
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*first, 41);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_compute_if_absent_distinct_keys_are_isolated() {
        let scope = RootScope::new();
        let a = scope.compute_if_absent("a", || Ok(1usize)).unwrap();
        let b = scope.compute_if_absent("b", || Ok(2usize)).unwrap();
        assert_eq!(*a, 1);
        assert_eq!(*b, 2);
        assert_eq!(scope.len().unwrap(), 2);
    }

    #[test]
    fn test_supplier_failure_caches_nothing() {
        let scope = RootScope::new();
        let result: Result<Arc<usize>> = scope.compute_if_absent("k", || {
            Err(Error::Recipe {
                recipe: "test".to_string(),
                message: "boom".to_string(),
            })
        });
        assert!(result.is_err());
        assert!(scope.is_empty().unwrap());

        // A retry recomputes from scratch and succeeds
        let value = scope.compute_if_absent("k", || Ok(7usize)).unwrap();
        assert_eq!(*value, 7);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let scope = RootScope::new();
        scope.compute_if_absent("k", || Ok(1usize)).unwrap();
        let result: Result<Arc<String>> =
            scope.compute_if_absent("k", || Ok("nope".to_string()));
        assert!(matches!(result, Err(Error::StoreType { .. })));
    }

    #[test]
    fn test_concurrent_first_access_initializes_once() {
        let scope = Arc::new(RootScope::new());
        let calls = Arc::new(AtomicUsize::new(0));

        std::thread::scope(|s| {
            for _ in 0..8 {
                let scope = scope.clone();
                let calls = calls.clone();
                s.spawn(move || {
                    let value = scope
                        .compute_if_absent("shared", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(AtomicUsize::new(0))
                        })
                        .unwrap();
                    value.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let value = scope
            .compute_if_absent("shared", || Ok(AtomicUsize::new(0)))
            .unwrap();
        assert_eq!(value.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_cursor_root_walks_parent_chain() {
        let scope = Arc::new(RootScope::new());
        let root = Cursor::new_root(scope);
        let file = root.child("src/lib.rs");
        let nested = file.child("src/lib.rs#item");

        assert!(root.path().is_none());
        assert_eq!(file.path(), Some(Path::new("src/lib.rs")));
        assert!(nested.root().path().is_none());
        assert!(Arc::ptr_eq(nested.root().scope(), root.scope()));
    }

    #[test]
    fn test_cursor_store_access_reaches_the_root_store() {
        let scope = Arc::new(RootScope::new());
        let root = Cursor::new_root(scope);
        let a = root.child("a.rs");
        let b = root.child("b.rs");

        let first = a
            .compute_if_absent_at_root("k", || Ok(10usize))
            .unwrap();
        let second = b
            .compute_if_absent_at_root("k", || Ok(20usize))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 10);
    }
}
