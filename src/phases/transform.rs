//! Phase 3: Transformation
//!
//! The second pass over the repository, covering original and newly
//! generated files alike. A fresh lazily-binding delegate is acquired for
//! the traversal; its first call resolves the recipe's transform visitor
//! against the shared accumulator, and every file is then visited with the
//! one bound visitor. A visit returning `Ok(None)` removes the file from
//! the repository; files the visitor does not accept pass through
//! unchanged.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::context::ExecutionContext;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::recipe::{RecipeRun, ScanningRecipe};
use crate::source::SourceFile;
use crate::visitor::Visitor;

/// Executes the transform phase of a traversal.
///
/// Returns the surviving file set in input order. Files are transformed in
/// parallel; the delegate's binding resolves exactly once even when first
/// calls race.
pub fn execute<R: ScanningRecipe>(
    run: &Arc<RecipeRun<R>>,
    files: Vec<SourceFile>,
    ctx: &ExecutionContext,
    root: &Cursor,
) -> Result<Vec<SourceFile>> {
    let visitor = run.transform_visitor();

    let results = files
        .par_iter()
        .map(|file| -> Result<Option<SourceFile>> {
            let cursor = root.child(file.path());
            if !visitor.is_acceptable(file, ctx, &cursor)? {
                return Ok(Some(file.clone()));
            }
            let result = visitor.visit(file, ctx, &cursor)?;
            if result.is_none() {
                debug!(
                    "recipe {} deleted {}",
                    run.recipe().name(),
                    file.path().display()
                );
            }
            Ok(result)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(results.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::RootScope;
    use crate::visitor;

    struct DropEmptyFiles;

    struct DropEmptyVisitor;

    impl Visitor for DropEmptyVisitor {
        fn is_acceptable(
            &self,
            file: &SourceFile,
            _ctx: &ExecutionContext,
            _cursor: &Cursor,
        ) -> Result<bool> {
            Ok(file.path().extension().is_some_and(|ext| ext == "rs"))
        }

        fn visit(
            &self,
            file: &SourceFile,
            _ctx: &ExecutionContext,
            _cursor: &Cursor,
        ) -> Result<Option<SourceFile>> {
            if file.text().trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(file.with_text(file.text().trim().to_string())))
            }
        }
    }

    impl ScanningRecipe for DropEmptyFiles {
        type Accumulator = ();

        fn name(&self) -> String {
            "test.drop-empty".to_string()
        }

        fn initial_value(&self, _ctx: &ExecutionContext) -> Result<()> {
            Ok(())
        }

        fn scanner(&self, _acc: Arc<()>) -> Box<dyn Visitor> {
            visitor::noop()
        }

        fn transform(&self, _acc: Arc<()>) -> Box<dyn Visitor> {
            Box::new(DropEmptyVisitor)
        }
    }

    #[test]
    fn test_transform_deletes_on_none_and_keeps_order() {
        let run = Arc::new(RecipeRun::new(DropEmptyFiles));
        let ctx = ExecutionContext::new();
        let root = Cursor::new_root(Arc::new(RootScope::new()));
        let files = vec![
            SourceFile::new("a.rs", "fn a() {}\n"),
            SourceFile::new("empty.rs", "   \n"),
            SourceFile::new("b.rs", "fn b() {}\n"),
        ];

        let out = execute(&run, files, &ctx, &root).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].path().to_str(), Some("a.rs"));
        assert_eq!(out[0].text(), "fn a() {}");
        assert_eq!(out[1].path().to_str(), Some("b.rs"));
    }

    #[test]
    fn test_unacceptable_files_pass_through_unchanged() {
        let run = Arc::new(RecipeRun::new(DropEmptyFiles));
        let ctx = ExecutionContext::new();
        let root = Cursor::new_root(Arc::new(RootScope::new()));
        let files = vec![SourceFile::new("README.md", "   ")];

        let out = execute(&run, files, &ctx, &root).unwrap();

        // Empty but not a .rs file, so the visitor never saw it
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text(), "   ");
    }
}
