//! Path normalization.
//!
//! The codec never interprets caller paths itself; it hands them to a
//! [`PathResolver`] and works with whatever absolute path comes back.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::config::CodecConfig;
use crate::error::{CoreError, CoreResult};

/// Turns a caller-supplied path into a normalized absolute path.
pub trait PathResolver: fmt::Debug + Send + Sync {
    /// Resolve `path` to the location the codec should open.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPath`] if the path cannot be resolved.
    fn resolve(&self, path: &Path) -> CoreResult<PathBuf>;
}

/// Lexical path normalizer.
///
/// - a leading `~` is replaced by `$HOME`
/// - relative paths are joined onto the base directory (or the working directory)
/// - `.` components are dropped and `..` components pop their parent
///
/// The filesystem is never consulted, so symlinks are left untouched and the
/// target does not need to exist.
#[derive(Debug, Clone, Default)]
pub struct NormalizingResolver {
    base_dir: Option<PathBuf>,
}

impl NormalizingResolver {
    /// Create a resolver that joins relative paths onto the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that joins relative paths onto `base_dir`.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Create a resolver from the codec configuration.
    #[must_use]
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
        }
    }

    fn base(&self) -> CoreResult<PathBuf> {
        match &self.base_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => {
                let cwd = std::env::current_dir().context("failed to read working directory")?;
                Ok(cwd.join(dir))
            }
            None => Ok(std::env::current_dir().context("failed to read working directory")?),
        }
    }
}

impl PathResolver for NormalizingResolver {
    fn resolve(&self, path: &Path) -> CoreResult<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(invalid(path, "path is empty"));
        }

        let expanded = expand_home(path)?;
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.base()?.join(expanded)
        };

        Ok(normalize_lexically(&absolute))
    }
}

fn invalid(path: &Path, reason: &str) -> CoreError {
    CoreError::InvalidPath {
        path: path.to_path_buf(),
        reason: reason.to_owned(),
    }
}

fn expand_home(path: &Path) -> CoreResult<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid(path, "HOME is not set"))?;
    Ok(PathBuf::from(home).join(rest))
}

/// Remove `.` and resolve `..` without touching the filesystem.
///
/// `..` at the root stays at the root.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
        }
    }
    out
}
