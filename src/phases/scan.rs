//! Phase 1: Scanning
//!
//! The first pass over the repository. Every source file is visited by the
//! recipe's scanner, and every invocation shares the one accumulator of
//! the current traversal. The scanner may return a transformed tree, but
//! that result is dropped here: mutation of the accumulator is the only
//! observable effect of this phase.
//!
//! Files are scanned in parallel. If the accumulator's folding is neither
//! idempotent nor commutative, scan order determines the final accumulator
//! content; this phase guarantees only that every file is visited exactly
//! once before generation begins.

use log::debug;
use rayon::prelude::*;

use crate::context::ExecutionContext;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::recipe::{RecipeRun, ScanningRecipe};
use crate::source::SourceFile;

/// Executes the scan phase of a traversal.
///
/// Resolves the shared accumulator (creating it if this is the first
/// access under `root`), builds one scanner visitor bound to it, and
/// visits every file. For an empty repository the accumulator is still
/// initialized, so later phases observe it exactly as a populated
/// repository would.
pub fn execute<R: ScanningRecipe>(
    run: &RecipeRun<R>,
    files: &[SourceFile],
    ctx: &ExecutionContext,
    root: &Cursor,
) -> Result<()> {
    let acc = run.accumulator(root, ctx)?;
    let scanner = run.recipe().scanner(acc);

    debug!(
        "scanning {} files for recipe {}",
        files.len(),
        run.recipe().name()
    );

    files.par_iter().try_for_each(|file| -> Result<()> {
        let cursor = root.child(file.path());
        if scanner.is_acceptable(file, ctx, &cursor)? {
            // Scanner output is discarded; only accumulator effects persist
            scanner.visit(file, ctx, &cursor)?;
        }
        Ok(())
    })
}
