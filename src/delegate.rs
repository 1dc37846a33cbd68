//! Lazily-bound transform visitors.
//!
//! The transform visitor of a scanning recipe needs the finished
//! accumulator, and the accumulator is only reachable once a traversal
//! position exists. The engine, however, asks a recipe for "its visitor"
//! before any traversal starts. [`TransformDelegate`] closes that gap: it
//! is handed out immediately, defers resolving the real visitor until its
//! first capability call, and forwards every call thereafter to the one
//! bound visitor.

use std::sync::{Arc, Mutex};

use crate::context::ExecutionContext;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::recipe::{RecipeRun, ScanningRecipe};
use crate::source::SourceFile;
use crate::visitor::Visitor;

/// Transform-phase visitor that binds itself to the accumulator on first
/// use.
///
/// A fresh delegate (and thus a fresh binding) is created on each call to
/// [`RecipeRun::transform_visitor`], so one recipe run can serve multiple
/// independent traversals, each with its own lazily-bound visitor.
pub struct TransformDelegate<R: ScanningRecipe> {
    run: Arc<RecipeRun<R>>,
    bound: Mutex<Option<Arc<dyn Visitor>>>,
}

impl<R: ScanningRecipe> TransformDelegate<R> {
    pub(crate) fn new(run: Arc<RecipeRun<R>>) -> Self {
        Self {
            run,
            bound: Mutex::new(None),
        }
    }

    /// Resolve the recipe's transform visitor against the shared
    /// accumulator, at most once per delegate.
    ///
    /// The slot lock is held across the binding computation, so racing
    /// first calls observe the same bound visitor and
    /// [`ScanningRecipe::transform`] is never invoked twice. A binding
    /// failure leaves the slot empty.
    fn bind(&self, ctx: &ExecutionContext, cursor: &Cursor) -> Result<Arc<dyn Visitor>> {
        let mut slot = self.bound.lock().map_err(|_| Error::LockPoisoned {
            context: "transform delegate binding".to_string(),
        })?;
        if let Some(bound) = slot.as_ref() {
            return Ok(Arc::clone(bound));
        }
        let acc = self.run.accumulator(cursor, ctx)?;
        let bound: Arc<dyn Visitor> = Arc::from(self.run.recipe().transform(acc));
        *slot = Some(Arc::clone(&bound));
        Ok(bound)
    }
}

impl<R: ScanningRecipe> Visitor for TransformDelegate<R> {
    fn is_acceptable(
        &self,
        file: &SourceFile,
        ctx: &ExecutionContext,
        cursor: &Cursor,
    ) -> Result<bool> {
        self.bind(ctx, cursor)?.is_acceptable(file, ctx, cursor)
    }

    fn visit(
        &self,
        file: &SourceFile,
        ctx: &ExecutionContext,
        cursor: &Cursor,
    ) -> Result<Option<SourceFile>> {
        self.bind(ctx, cursor)?.visit(file, ctx, cursor)
    }
}
