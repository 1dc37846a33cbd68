//! # Remold Scanning-Recipe Core
//!
//! This library provides the orchestration core for "scanning recipes":
//! units of automated source transformation that must study the whole
//! repository before they can decide how to change any single file. It is
//! designed to be embedded in a larger code-transformation engine that
//! owns parsing, scheduling, and file I/O.
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use remold::context::ExecutionContext;
//! use remold::cursor::Cursor;
//! use remold::error::Result;
//! use remold::phases::orchestrator;
//! use remold::recipe::{RecipeRun, ScanningRecipe};
//! use remold::source::SourceFile;
//! use remold::visitor::Visitor;
//!
//! // Count Rust files, then generate a manifest recording the count.
//! struct CountRustFiles;
//!
//! struct Counter {
//!     count: AtomicUsize,
//! }
//!
//! struct CountingScanner {
//!     acc: Arc<Counter>,
//! }
//!
//! impl Visitor for CountingScanner {
//!     fn visit(
//!         &self,
//!         file: &SourceFile,
//!         _ctx: &ExecutionContext,
//!         _cursor: &Cursor,
//!     ) -> Result<Option<SourceFile>> {
//!         if file.path().extension().is_some_and(|ext| ext == "rs") {
//!             self.acc.count.fetch_add(1, Ordering::Relaxed);
//!         }
//!         Ok(Some(file.clone()))
//!     }
//! }
//!
//! impl ScanningRecipe for CountRustFiles {
//!     type Accumulator = Counter;
//!
//!     fn name(&self) -> String {
//!         "demo.count-rust-files".to_string()
//!     }
//!
//!     fn initial_value(&self, _ctx: &ExecutionContext) -> Result<Counter> {
//!         Ok(Counter { count: AtomicUsize::new(0) })
//!     }
//!
//!     fn scanner(&self, acc: Arc<Counter>) -> Box<dyn Visitor> {
//!         Box::new(CountingScanner { acc })
//!     }
//!
//!     fn generate(&self, acc: &Counter, _ctx: &ExecutionContext) -> Result<Vec<SourceFile>> {
//!         let count = acc.count.load(Ordering::Relaxed);
//!         Ok(vec![SourceFile::new("RUST_FILE_COUNT", count.to_string())])
//!     }
//! }
//!
//! let run = Arc::new(RecipeRun::new(CountRustFiles));
//! let ctx = ExecutionContext::new();
//! let files = vec![
//!     SourceFile::new("src/main.rs", "fn main() {}"),
//!     SourceFile::new("README.md", "# demo"),
//! ];
//!
//! let out = orchestrator::execute(&run, files, &ctx).unwrap();
//! assert_eq!(out.len(), 3);
//! let manifest = out.iter().find(|f| f.path().ends_with("RUST_FILE_COUNT")).unwrap();
//! assert_eq!(manifest.text(), "1");
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Scanning Recipe (`recipe`)**: The contract a concrete recipe
//!   implements: an initial accumulator value, a scanner visitor, optional
//!   file generation, and an optional transform visitor.
//! - **Accumulator**: Aggregate scan state, one instance per (recipe
//!   instance, traversal), created exactly once and shared by every phase.
//! - **Root-Scoped Store (`cursor`)**: An atomic get-or-compute key-value
//!   store owned by each traversal root; recipe instances namespace their
//!   accumulator in it under collision-free random keys.
//! - **Transform Delegate (`delegate`)**: The engine-facing visitor that
//!   lazily binds itself to the accumulator on its first call and forwards
//!   every later call to the one bound visitor.
//! - **Phases (`phases`)**: The strict scan → generate → transform
//!   pipeline driven by `phases::orchestrator`.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute`, which drives
//! one traversal:
//!
//! 1.  **Scan**: Visit every source file with the recipe's scanner; all
//!     invocations share one accumulator, and any tree the scanner returns
//!     is discarded.
//! 2.  **Generate**: Invoke the recipe's generator exactly once with the
//!     finished accumulator; its output joins the traversal's file set.
//! 3.  **Transform**: Visit every file, original and generated, with the
//!     lazily-bound transform visitor; files may be changed or deleted.
//!
//! Scanning and transforming parallelize across files; the core only makes
//! accumulator *initialization* atomic, while concurrent mutation during
//! the scan is the accumulator type's own contract.

pub mod context;
pub mod cursor;
pub mod delegate;
pub mod error;
pub mod phases;
pub mod recipe;
pub mod source;
pub mod visitor;

#[cfg(test)]
mod store_proptest;
