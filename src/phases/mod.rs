//! Implementation of the 3 phases of a scanning-recipe traversal.
//!
//! ## Overview
//!
//! One traversal of a recipe over a repository follows 3 phases:
//! 1. Scan - Visit every source file, folding observations into the one
//!    shared accumulator (any tree the scanner returns is discarded)
//! 2. Generate - Produce new files from the finished accumulator, exactly
//!    once, after every file has been scanned
//! 3. Transform - Visit every file, original and newly generated, with the
//!    lazily-bound transform visitor; a visitor may change a file or delete
//!    it
//!
//! Phase ordering is strict and no phase re-enters an earlier one. Files
//! *within* a phase carry no ordering guarantee and may be processed in
//! parallel; the accumulator type's own contract covers concurrent
//! mutation (see [`crate::recipe::ScanningRecipe::Accumulator`]).
//!
//! A failure in any phase aborts the recipe's participation in the current
//! traversal. No partial rollback of already-transformed files happens
//! here; that responsibility belongs to the surrounding engine.

// Phase modules
pub mod generate;
pub mod orchestrator;
pub mod scan;
pub mod transform;
