//! Source file values passed through the recipe pipeline.
//!
//! The orchestration core treats a [`SourceFile`] as an opaque AST root: it
//! receives files from the engine, hands them to visitors, and returns them
//! (possibly replaced, possibly omitted to signal deletion). Parsing and
//! diffing belong to the surrounding engine, not to this crate.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A parsed source file flowing through the scan and transform phases.
///
/// Each file carries a stable random id so that "the same logical file,
/// transformed" can be recognized across phases: [`SourceFile::with_text`]
/// and [`SourceFile::with_path`] produce modified copies that keep the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    id: Uuid,
    path: PathBuf,
    text: String,
}

impl SourceFile {
    /// Create a new source file with a fresh identity.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, text: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            text: text.into(),
        }
    }

    /// Stable identity of this logical file.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Repository-relative path of this file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Printed form of the file's tree.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A transformed copy of this file with new content, same identity.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Self {
            id: self.id,
            path: self.path.clone(),
            text: text.into(),
        }
    }

    /// A moved copy of this file at a new path, same identity.
    pub fn with_path<P: Into<PathBuf>>(&self, path: P) -> Self {
        Self {
            id: self.id,
            path: path.into(),
            text: self.text.clone(),
        }
    }
}
