//! Content resolution module
//!
//! Maps a URL path onto an ordered list of root directories and reads the
//! first file that exists. Roots form a priority list, never a union.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Document served for directory requests (paths ending in `/`)
pub const INDEX_FILE: &str = "index.html";

/// Root used when no roots are configured
pub const DEFAULT_ROOT: &str = ".";

/// Outcome of resolving a URL path against the configured roots
#[derive(Debug)]
pub enum Resolution {
    /// The file was read successfully
    Found { path: PathBuf, content: Vec<u8> },
    /// No root contains the file; carries the last attempted path
    NotFound { path: PathBuf },
    /// Any other filesystem error on the last attempted path
    IoError { path: PathBuf, error: io::Error },
}

impl Resolution {
    /// Path of the file that was served or last attempted
    pub fn path(&self) -> &Path {
        match self {
            Self::Found { path, .. } | Self::NotFound { path } | Self::IoError { path, .. } => path,
        }
    }

    fn from_read(path: PathBuf, result: io::Result<Vec<u8>>) -> Self {
        match result {
            Ok(content) => Self::Found { path, content },
            Err(error) if error.kind() == io::ErrorKind::NotFound => Self::NotFound { path },
            Err(error) => Self::IoError { path, error },
        }
    }
}

/// Compute the file a URL path maps to under a single root.
///
/// The URL path is joined as a relative path; `..` segments are not
/// sanitized. Paths ending in `/` map to the directory's `index.html`.
pub fn candidate_path(root: &Path, url_path: &str) -> PathBuf {
    let base = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    let candidate = base.join(url_path.trim_start_matches('/'));

    if url_path.ends_with('/') {
        candidate.join(INDEX_FILE)
    } else {
        candidate
    }
}

/// Resolve a URL path against the roots in order, stopping at the first hit.
///
/// Any read failure moves on to the next root. When every root fails, the
/// last root's error decides between `NotFound` and `IoError`.
pub async fn resolve(roots: &[PathBuf], url_path: &str) -> Resolution {
    let fallback = [PathBuf::from(DEFAULT_ROOT)];
    let roots = if roots.is_empty() { &fallback[..] } else { roots };

    let mut last_failure = None;
    for root in roots {
        let path = candidate_path(root, url_path);
        match fs::read(&path).await {
            Ok(content) => return Resolution::Found { path, content },
            Err(error) => last_failure = Some((path, error)),
        }
    }

    match last_failure {
        Some((path, error)) => Resolution::from_read(path, Err(error)),
        // roots is never empty here
        None => Resolution::NotFound {
            path: candidate_path(Path::new(DEFAULT_ROOT), url_path),
        },
    }
}

/// Read a single known file, classifying the outcome like `resolve` does
pub async fn read_file(path: impl Into<PathBuf>) -> Resolution {
    let path = path.into();
    let result = fs::read(&path).await;
    Resolution::from_read(path, result)
}
