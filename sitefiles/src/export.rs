//! Export: write the accumulated file set to a directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::files::FileSet;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No files to download")]
    Empty,
    #[error("refusing to write file with unsafe name: {0}")]
    UnsafeName(String),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// MIME type a browser download would use for `filename`.
#[must_use]
pub fn mime_type(filename: &str) -> &'static str {
    if filename.ends_with(".html") {
        "text/html"
    } else if filename.ends_with(".css") {
        "text/css"
    } else if filename.ends_with(".js") {
        "text/javascript"
    } else {
        "text/plain"
    }
}

/// Write every entry of `files` into `dir`, creating it if needed. Returns
/// the written paths in set order.
///
/// # Errors
///
/// Fails on an empty set, on names that are not a single plain path
/// component, and on any I/O error. Files written before the failure stay
/// on disk.
pub fn write_files(dir: &Path, files: &FileSet) -> Result<Vec<PathBuf>, ExportError> {
    if files.is_empty() {
        return Err(ExportError::Empty);
    }
    if let Some(bad) = files.names().find(|name| !is_plain_name(name)) {
        return Err(ExportError::UnsafeName(bad.to_owned()));
    }

    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files.iter() {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|source| ExportError::Io { path: path.clone(), source })?;
        written.push(path);
    }
    Ok(written)
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
