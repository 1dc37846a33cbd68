//! Phase 2: Generation
//!
//! The single post-scan step. The recipe is handed the finished
//! accumulator (read-only from here on) and the files other recipes
//! generated earlier in this cycle, and returns zero or more new source
//! files. The orchestrator merges these into the set of files subject to
//! the transform phase.

use log::debug;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::recipe::{RecipeRun, ScanningRecipe};
use crate::source::SourceFile;

/// Executes the generation phase of a traversal, exactly once.
///
/// `generated_in_cycle` carries peer recipes' output; the default recipe
/// implementation ignores it.
pub fn execute<R: ScanningRecipe>(
    run: &RecipeRun<R>,
    acc: &R::Accumulator,
    generated_in_cycle: &[SourceFile],
    ctx: &ExecutionContext,
) -> Result<Vec<SourceFile>> {
    let generated = run
        .recipe()
        .generate_with_peers(acc, generated_in_cycle, ctx)?;
    if !generated.is_empty() {
        debug!(
            "recipe {} generated {} new files",
            run.recipe().name(),
            generated.len()
        );
    }
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::{self, Visitor};
    use std::sync::Arc;

    struct EmitSummary;

    impl ScanningRecipe for EmitSummary {
        type Accumulator = usize;

        fn name(&self) -> String {
            "test.emit-summary".to_string()
        }

        fn initial_value(&self, _ctx: &ExecutionContext) -> Result<usize> {
            Ok(0)
        }

        fn scanner(&self, _acc: Arc<usize>) -> Box<dyn Visitor> {
            visitor::noop()
        }

        fn generate(&self, acc: &usize, _ctx: &ExecutionContext) -> Result<Vec<SourceFile>> {
            Ok(vec![SourceFile::new("SUMMARY", acc.to_string())])
        }
    }

    #[test]
    fn test_generate_forwards_the_accumulator() {
        let run = RecipeRun::new(EmitSummary);
        let ctx = ExecutionContext::new();

        let generated = execute(&run, &42, &[], &ctx).unwrap();

        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].text(), "42");
    }

    #[test]
    fn test_default_generate_emits_nothing() {
        struct Silent;

        impl ScanningRecipe for Silent {
            type Accumulator = usize;

            fn name(&self) -> String {
                "test.silent".to_string()
            }

            fn initial_value(&self, _ctx: &ExecutionContext) -> Result<usize> {
                Ok(0)
            }

            fn scanner(&self, _acc: Arc<usize>) -> Box<dyn Visitor> {
                visitor::noop()
            }
        }

        let run = RecipeRun::new(Silent);
        let ctx = ExecutionContext::new();
        let peers = vec![SourceFile::new("peer.rs", "fn p() {}")];

        let generated = execute(&run, &0, &peers, &ctx).unwrap();
        assert!(generated.is_empty());
    }
}
