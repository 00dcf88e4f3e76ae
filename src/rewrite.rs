//! File rewrite driver
//!
//! Reads a file, runs the substitution engine on it and, when the content
//! changed, replaces the file atomically: the new content goes to a temporary
//! file in the same directory which is then renamed over the original. A
//! reader sees either the old file or the new one, never a partial write.
//! When nothing changed the file is not touched at all.

use crate::mapping::MappingTable;
use crate::substitution::{substitute, SubstitutionError};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = ".macrosub-";

/// Knobs for [`rewrite_file`] and [`replace_atomically`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Give the replacement file the permissions of the file it replaces
    pub preserve_permissions: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            preserve_permissions: true,
        }
    }
}

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output was byte-identical to the input; nothing was written
    Unchanged,
    /// The file was replaced
    Rewritten { replaced: usize, deleted: usize },
}

/// Errors that can occur while rewriting a file
#[derive(Debug)]
pub enum RewriteError {
    /// Reading the file or writing the temporary file failed
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid UTF-8
    Decode { path: PathBuf },
    /// Renaming the temporary file over the original failed
    Persist { path: PathBuf, source: io::Error },
    /// The engine rejected the content
    Substitution {
        path: PathBuf,
        source: SubstitutionError,
    },
}

impl RewriteError {
    pub fn path(&self) -> &Path {
        match self {
            RewriteError::Io { path, .. }
            | RewriteError::Decode { path }
            | RewriteError::Persist { path, .. }
            | RewriteError::Substitution { path, .. } => path,
        }
    }

    fn io(path: &Path) -> impl FnOnce(io::Error) -> RewriteError + '_ {
        move |source| RewriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            RewriteError::Decode { path } => {
                write!(f, "{}: file is not valid UTF-8", path.display())
            }
            RewriteError::Persist { path, source } => {
                write!(f, "{}: could not replace file: {}", path.display(), source)
            }
            RewriteError::Substitution { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RewriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RewriteError::Io { source, .. } | RewriteError::Persist { source, .. } => Some(source),
            RewriteError::Substitution { source, .. } => Some(source),
            RewriteError::Decode { .. } => None,
        }
    }
}

/// Apply `table` to the file at `path`, rewriting it only if its content
/// changes. Symbolic links are followed; the link target is rewritten.
pub fn rewrite_file(
    path: &Path,
    table: &MappingTable,
    options: &RewriteOptions,
) -> Result<FileOutcome, RewriteError> {
    let bytes = fs::read(path).map_err(RewriteError::io(path))?;
    let original = String::from_utf8(bytes).map_err(|_| RewriteError::Decode {
        path: path.to_path_buf(),
    })?;

    let substitution =
        substitute(table, &original).map_err(|source| RewriteError::Substitution {
            path: path.to_path_buf(),
            source,
        })?;

    if substitution.output == original {
        tracing::debug!(path = %path.display(), "unchanged");
        return Ok(FileOutcome::Unchanged);
    }

    let target = fs::canonicalize(path).map_err(RewriteError::io(path))?;
    replace_atomically(&target, &substitution.output, options)?;
    tracing::info!(
        path = %path.display(),
        replaced = substitution.replaced,
        deleted = substitution.deleted,
        "rewritten"
    );

    Ok(FileOutcome::Rewritten {
        replaced: substitution.replaced,
        deleted: substitution.deleted,
    })
}

/// Replace the file at `path` with `contents` via a temporary file in the
/// same directory and a rename. On failure the temporary file is removed
/// and `path` keeps its previous content.
pub fn replace_atomically(
    path: &Path,
    contents: &str,
    options: &RewriteOptions,
) -> Result<(), RewriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(RewriteError::io(path))?;
    temp.write_all(contents.as_bytes())
        .map_err(RewriteError::io(path))?;
    temp.as_file().sync_all().map_err(RewriteError::io(path))?;

    if options.preserve_permissions {
        match fs::metadata(path) {
            Ok(metadata) => temp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(RewriteError::io(path))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(RewriteError::io(path)(err)),
        }
    }

    temp.persist(path).map_err(|err| RewriteError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
