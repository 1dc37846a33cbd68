//! Visitor capability consumed and produced by recipes.
//!
//! A visitor is invoked once per source file during a traversal phase. The
//! tree-walking dispatch *within* one file belongs to the surrounding
//! engine; this core only calls the two capabilities below, passing the
//! file, the run's execution context, and the cursor for the current
//! position. The cursor is how accumulator-aware visitors reach the
//! traversal root's shared store.

use crate::context::ExecutionContext;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::source::SourceFile;

/// A visitor called for each source file in a traversal phase.
pub trait Visitor: Send + Sync {
    /// Whether this visitor wants to see `file` at all.
    ///
    /// Files that are not acceptable pass through the phase unchanged.
    fn is_acceptable(
        &self,
        file: &SourceFile,
        ctx: &ExecutionContext,
        cursor: &Cursor,
    ) -> Result<bool> {
        let _ = (file, ctx, cursor);
        Ok(true)
    }

    /// Visit one file, returning the possibly transformed result.
    ///
    /// Returning `Ok(None)` deletes the file from the repository.
    fn visit(
        &self,
        file: &SourceFile,
        ctx: &ExecutionContext,
        cursor: &Cursor,
    ) -> Result<Option<SourceFile>>;
}

/// Visitor that accepts every file and returns it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisitor;

impl Visitor for NoopVisitor {
    fn visit(
        &self,
        file: &SourceFile,
        _ctx: &ExecutionContext,
        _cursor: &Cursor,
    ) -> Result<Option<SourceFile>> {
        Ok(Some(file.clone()))
    }
}

/// A boxed no-op visitor, the default transform of a scanning recipe.
pub fn noop() -> Box<dyn Visitor> {
    Box::new(NoopVisitor)
}
