//! Snapshot discovery and loading.

use class_lint_core::{ClassIndex, SnapshotError};
use std::path::{Path, PathBuf};

/// Errors collecting snapshot files.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DiscoverError {
    /// A path given on the command line does not exist.
    #[error("snapshot path not found: {0}")]
    #[diagnostic(code(class_lint::cli::path))]
    Missing(PathBuf),

    /// Directory walk failed.
    #[error("failed to walk {path}: {source}")]
    #[diagnostic(code(class_lint::cli::walk))]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying walk error.
        source: ignore::Error,
    },

    /// No snapshot file was found.
    #[error("no snapshot files found")]
    #[diagnostic(
        code(class_lint::cli::empty),
        help("pass a snapshot .json file, or a directory containing some")
    )]
    Empty,
}

/// Errors producing the class index.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum IndexError {
    /// Snapshot files could not be collected.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Discover(#[from] DiscoverError),

    /// A snapshot could not be loaded or merged.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Expands `paths` into snapshot files.
///
/// Files are taken as-is; directories are walked for `*.json`, honoring
/// `.gitignore`. The result is sorted and deduplicated.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>, DiscoverError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            walk(path, &mut files)?;
        } else {
            return Err(DiscoverError::Missing(path.clone()));
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(DiscoverError::Empty);
    }
    Ok(files)
}

fn walk(root: &Path, files: &mut Vec<PathBuf>) -> Result<(), DiscoverError> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    for entry in builder.build() {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }

    Ok(())
}

/// Loads every snapshot under `paths` into one index.
pub fn load_index(paths: &[PathBuf]) -> Result<ClassIndex, IndexError> {
    let mut index = ClassIndex::new();

    for file in discover(paths)? {
        tracing::debug!("Loading snapshot: {}", file.display());
        let snapshot = ClassIndex::from_path(&file)?;
        index.merge(snapshot).map_err(SnapshotError::from)?;
    }

    tracing::info!("Loaded {} declarations", index.len());
    Ok(index)
}
