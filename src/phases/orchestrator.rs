//! Orchestrator for one recipe's traversal
//!
//! This module coordinates the scan, generate, and transform phases to
//! provide a clean API for running a scanning recipe over a set of parsed
//! source files. Each call drives one complete traversal with a fresh root
//! scope:
//!
//! `scan (all files) -> generate (once) -> transform (all files, original
//! and generated)`
//!
//! Phases never re-enter. A failure in any phase aborts the traversal for
//! this recipe and propagates; already-produced intermediate results are
//! dropped, and no rollback of transformed files is attempted here.

use std::sync::Arc;

use super::{generate, scan, transform};
use crate::context::ExecutionContext;
use crate::cursor::{Cursor, RootScope};
use crate::error::Result;
use crate::recipe::{RecipeRun, ScanningRecipe};
use crate::source::SourceFile;

/// Run one recipe over `files` in a fresh traversal.
///
/// Returns the resulting repository contents: the original files as the
/// transform pass left them, plus whatever generation produced (also
/// subject to the transform pass).
pub fn execute<R: ScanningRecipe>(
    run: &Arc<RecipeRun<R>>,
    files: Vec<SourceFile>,
    ctx: &ExecutionContext,
) -> Result<Vec<SourceFile>> {
    execute_with_peers(run, files, &[], ctx)
}

/// Like [`execute`], additionally passing the files other recipes
/// generated earlier in this cycle through to the generation phase.
pub fn execute_with_peers<R: ScanningRecipe>(
    run: &Arc<RecipeRun<R>>,
    mut files: Vec<SourceFile>,
    generated_in_cycle: &[SourceFile],
    ctx: &ExecutionContext,
) -> Result<Vec<SourceFile>> {
    let root = Cursor::new_root(Arc::new(RootScope::new()));

    // Phase 1: Scan every file, folding into the one shared accumulator
    scan::execute(run, &files, ctx, &root)?;

    // Phase 2: Generate new files from the finished accumulator, once
    let acc = run.accumulator(&root, ctx)?;
    let generated = generate::execute(run, &acc, generated_in_cycle, ctx)?;
    files.extend(generated);

    // Phase 3: Transform originals and generated files alike
    transform::execute(run, files, ctx, &root)
}
