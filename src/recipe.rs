//! Scanning recipes and per-run accumulator access.
//!
//! ## Overview
//!
//! A scanning recipe cannot decide its transformation from one file in
//! isolation: it first studies the whole repository in a scan pass, folding
//! observations into an accumulator, may then generate new files from what
//! it learned, and only then transforms each file with a visitor bound to
//! the finished accumulator. [`ScanningRecipe`] is the contract a concrete
//! recipe implements; [`RecipeRun`] is one configured instance of such a
//! recipe, bound to the collision-free key that namespaces its accumulator
//! inside the traversal's shared store.
//!
//! Phase ordering per traversal is strict:
//! scan (all files) → generate (once) → transform (all files, original
//! plus generated). The phase drivers live in [`crate::phases`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::ExecutionContext;
use crate::cursor::Cursor;
use crate::delegate::TransformDelegate;
use crate::error::Result;
use crate::source::SourceFile;
use crate::visitor::{self, Visitor};

/// Serializable metadata describing a recipe, for engines that list the
/// recipes available to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDescriptor {
    /// Stable recipe identifier, e.g. `remold.text.count-matches`
    pub name: String,
    /// Human-readable summary of what the recipe does
    pub description: String,
    /// Free-form grouping labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A recipe that first scans the repository in one pass over its source
/// files before, in a second pass, deciding how to transform the code.
///
/// New file generation is part of this contract as well, since in almost
/// every case a recipe checks repository-wide conditions (collected during
/// the scan) before deciding to generate a file.
pub trait ScanningRecipe: Send + Sync {
    /// Aggregate scan state shared by every phase of one traversal.
    ///
    /// Scanner invocations may run concurrently, so a type used here must
    /// support concurrent mutation (atomics, a mutex, or similar interior
    /// synchronization) or the engine must serialize scan calls against a
    /// single root. Initialization is made atomic by this core; mutation
    /// safety afterwards is this type's own contract.
    type Accumulator: Send + Sync + 'static;

    /// Stable identifier for this recipe, e.g. `remold.text.count-matches`.
    fn name(&self) -> String;

    /// Human-readable summary of what this recipe does.
    fn description(&self) -> String {
        String::new()
    }

    /// Free-form grouping labels for recipe listings.
    fn tags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Metadata describing this recipe.
    fn descriptor(&self) -> RecipeDescriptor {
        RecipeDescriptor {
            name: self.name(),
            description: self.description(),
            tags: self.tags(),
        }
    }

    /// The accumulator value before any source file has been scanned.
    fn initial_value(&self, ctx: &ExecutionContext) -> Result<Self::Accumulator>;

    /// The visitor called for each source file in the scan pass.
    ///
    /// Observations fold into `acc`. Any change the returned visitor makes
    /// to a file is discarded by the scan phase; mutation of the
    /// accumulator is the only effect that persists.
    fn scanner(&self, acc: Arc<Self::Accumulator>) -> Box<dyn Visitor>;

    /// Generate new source files from the finished accumulator.
    ///
    /// Invoked exactly once per traversal, after every file has been
    /// scanned. The default generates nothing.
    fn generate(
        &self,
        acc: &Self::Accumulator,
        ctx: &ExecutionContext,
    ) -> Result<Vec<SourceFile>> {
        let _ = (acc, ctx);
        Ok(Vec::new())
    }

    /// Like [`ScanningRecipe::generate`], additionally given the files
    /// other recipes generated earlier in this cycle, for recipes that
    /// must avoid duplicating a peer's output. The default ignores them
    /// and forwards to `generate`.
    fn generate_with_peers(
        &self,
        acc: &Self::Accumulator,
        generated_in_cycle: &[SourceFile],
        ctx: &ExecutionContext,
    ) -> Result<Vec<SourceFile>> {
        let _ = generated_in_cycle;
        self.generate(acc, ctx)
    }

    /// The visitor called for each file in the transform pass.
    ///
    /// To delete a file, return `Ok(None)` from the visitor's `visit`.
    /// The default is a no-op visitor that keeps every file unchanged.
    fn transform(&self, acc: Arc<Self::Accumulator>) -> Box<dyn Visitor> {
        let _ = acc;
        visitor::noop()
    }
}

/// One configured recipe instance, bound to a collision-free store key.
///
/// The key namespaces this instance's accumulator inside the shared
/// root-scoped store. It is allocated at construction from a random
/// 128-bit identifier and never changes for the life of the run, so no two
/// live instances resolve to the same store entry. A run may be reused
/// across any number of independent traversals; each traversal's root
/// scope holds its own accumulator under the same key.
pub struct RecipeRun<R: ScanningRecipe> {
    recipe: R,
    acc_key: String,
}

impl<R: ScanningRecipe> RecipeRun<R> {
    /// Wrap a configured recipe, allocating its accumulator store key.
    pub fn new(recipe: R) -> Self {
        Self {
            acc_key: format!("remold.recipe.acc.{}", Uuid::new_v4()),
            recipe,
        }
    }

    /// The wrapped recipe.
    pub fn recipe(&self) -> &R {
        &self.recipe
    }

    /// The store key namespacing this instance's accumulator.
    pub fn acc_key(&self) -> &str {
        &self.acc_key
    }

    /// The one shared accumulator of the traversal `cursor` belongs to.
    ///
    /// The first access per root computes [`ScanningRecipe::initial_value`]
    /// exactly once and stores the result; every later access from any
    /// position under the same root returns the identical instance, even
    /// when first accesses race. An `initial_value` failure propagates to
    /// the caller and caches nothing, so a retry recomputes from scratch.
    pub fn accumulator(
        &self,
        cursor: &Cursor,
        ctx: &ExecutionContext,
    ) -> Result<Arc<R::Accumulator>> {
        cursor.compute_if_absent_at_root(&self.acc_key, || self.recipe.initial_value(ctx))
    }

    /// Engine-facing transform visitor: a fresh, lazily-binding delegate.
    ///
    /// Binding is scoped to the returned delegate, not to this run: each
    /// acquisition gets its own binding, resolved on its first capability
    /// call, while every acquisition shares the same store key and thus
    /// the same accumulator within one traversal.
    pub fn transform_visitor(self: &Arc<Self>) -> TransformDelegate<R> {
        TransformDelegate::new(Arc::clone(self))
    }
}

impl<R: ScanningRecipe> fmt::Debug for RecipeRun<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeRun")
            .field("recipe", &self.recipe.name())
            .field("acc_key", &self.acc_key)
            .finish()
    }
}
