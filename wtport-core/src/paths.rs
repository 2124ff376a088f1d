// wtport-core/src/paths.rs
//! Default on-disk layout of a portable profile repository.
//!
//! ```text
//! <root>/artifacts/zshrc.portable
//! <root>/artifacts/settings.json
//! <root>/artifacts/assets/
//! <root>/artifacts/manifest.json
//! <root>/docs/SANITIZATION_REPORT.md
//! ```

use std::path::{Path, PathBuf};

pub const PORTABLE_PROFILE: &str = "artifacts/zshrc.portable";
pub const PORTABLE_SETTINGS: &str = "artifacts/settings.json";
pub const ASSETS_DIR: &str = "artifacts/assets";
pub const MANIFEST: &str = "artifacts/manifest.json";
pub const SANITIZATION_LOG: &str = "docs/SANITIZATION_REPORT.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    root: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ArtifactPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn portable_profile(&self) -> PathBuf {
        self.root.join(PORTABLE_PROFILE)
    }

    pub fn portable_settings(&self) -> PathBuf {
        self.root.join(PORTABLE_SETTINGS)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST)
    }

    pub fn sanitization_log(&self) -> PathBuf {
        self.root.join(SANITIZATION_LOG)
    }

    /// The manifest key for `path`: relative to the root when possible,
    /// always with forward slashes.
    pub fn logical_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        to_posix(rel)
    }
}

/// Creates the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Renders a path with `/` separators regardless of platform.
pub fn to_posix(path: &Path) -> String {
    use std::path::Component;

    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}
