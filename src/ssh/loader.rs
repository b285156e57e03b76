// ABOUTME: Include loading collaborators that resolve glob patterns to config file contents
// ABOUTME: The filesystem loader roots relative patterns at an explicit SSH directory

use crate::ssh::error::ParseError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncludedFile {
    pub path: PathBuf,
    pub content: String,
}

impl IncludedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Resolves the argument of an `Include` directive to the files it names.
///
/// An empty result means the pattern matched nothing, which is not an error.
/// Failing to read a matched file must be reported as an error instead.
pub trait IncludeLoader {
    fn load(&self, pattern: &str) -> Result<Vec<IncludedFile>, ParseError>;
}

impl<F> IncludeLoader for F
where
    F: Fn(&str) -> Result<Vec<IncludedFile>, ParseError>,
{
    fn load(&self, pattern: &str) -> Result<Vec<IncludedFile>, ParseError> {
        self(pattern)
    }
}

/// Loader for callers that only have a single file's text.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIncludes;

impl IncludeLoader for NoIncludes {
    fn load(&self, pattern: &str) -> Result<Vec<IncludedFile>, ParseError> {
        tracing::debug!("Ignoring include '{}': no loader configured", pattern);
        Ok(Vec::new())
    }
}

#[derive(Clone, Debug)]
pub struct FsIncludeLoader {
    ssh_dir: PathBuf,
}

impl FsIncludeLoader {
    pub fn new(ssh_dir: impl Into<PathBuf>) -> Self {
        Self {
            ssh_dir: ssh_dir.into(),
        }
    }

    /// Absolute patterns are used as they are; the SSH directory itself is matched literally.
    fn resolve(&self, pattern: &str) -> String {
        if Path::new(pattern).is_absolute() {
            return pattern.to_string();
        }
        let base = glob::Pattern::escape(&self.ssh_dir.to_string_lossy());
        Path::new(&base).join(pattern).to_string_lossy().into_owned()
    }
}

impl IncludeLoader for FsIncludeLoader {
    fn load(&self, pattern: &str) -> Result<Vec<IncludedFile>, ParseError> {
        let full_pattern = self.resolve(pattern);
        tracing::debug!("Expanding include pattern: {}", full_pattern);

        let matches = glob::glob(&full_pattern).map_err(|source| ParseError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in matches {
            let path = entry.map_err(|e| ParseError::SourceUnavailable {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;

            let content = fs::read_to_string(&path).map_err(|source| {
                ParseError::SourceUnavailable {
                    path: path.clone(),
                    source,
                }
            })?;

            tracing::trace!("Loaded included file: {}", path.display());
            files.push(IncludedFile { path, content });
        }

        if files.is_empty() {
            tracing::debug!("Include pattern matched no files: {}", full_pattern);
        }

        Ok(files)
    }
}
