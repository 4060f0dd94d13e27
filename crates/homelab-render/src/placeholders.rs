//! platform-core placeholder substitution
//!
//! Chart values under `platform-core/` contain literal tokens such as `__ARGOCD_HOSTNAME__`.
//! Each token maps to one required config field. Tokens are plain substrings, they are never
//! interpreted as YAML or as a pattern.
use crate::fields::{self, compose_hostname, get_required, FieldError, FieldPath};
use crate::value::Value;
use std::path::{Path, PathBuf};

/// File name that is searched for below the platform-core root
pub const VALUES_FILE_NAME: &str = "values.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// The config value is used as is
    Literal,
    /// The config value is an ingress prefix, combined with `ingress.base_domain`
    Hostname,
}

#[derive(Debug, Clone, Copy)]
pub struct Placeholder {
    pub token: &'static str,
    pub path: FieldPath,
    pub kind: PlaceholderKind,
}

/// All known placeholders, in substitution order
pub const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder {
        token: "__METALLB_IP_RANGE__",
        path: fields::METALLB_IP_RANGE,
        kind: PlaceholderKind::Literal,
    },
    Placeholder {
        token: "__ARGOCD_HOSTNAME__",
        path: fields::ARGOCD_PREFIX,
        kind: PlaceholderKind::Hostname,
    },
    Placeholder {
        token: "__GITEA_HOSTNAME__",
        path: fields::GITEA_PREFIX,
        kind: PlaceholderKind::Hostname,
    },
    Placeholder {
        token: "__VAULT_HOSTNAME__",
        path: fields::VAULT_PREFIX,
        kind: PlaceholderKind::Hostname,
    },
    Placeholder {
        token: "__MINIO_HOSTNAME__",
        path: fields::MINIO_PREFIX,
        kind: PlaceholderKind::Hostname,
    },
    Placeholder {
        token: "__MINIO_API_HOSTNAME__",
        path: fields::MINIO_API_PREFIX,
        kind: PlaceholderKind::Hostname,
    },
];

impl Placeholder {
    pub fn resolve(&self, root: &Value, base_domain: &str) -> Result<String, FieldError> {
        let raw = get_required(root, self.path)?;
        Ok(match self.kind {
            PlaceholderKind::Literal => raw.to_string(),
            PlaceholderKind::Hostname => compose_hostname(raw, base_domain),
        })
    }
}

/// Resolved token values, kept in [PLACEHOLDERS] order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Replacements {
    values: indexmap::IndexMap<&'static str, String>,
}

impl Replacements {
    /// Resolve every known placeholder
    ///
    /// Stops at the first field that is missing, empty or of the wrong type.
    pub fn resolve(root: &Value, base_domain: &str) -> Result<Self, FieldError> {
        let mut replacements = Self::default();
        for placeholder in PLACEHOLDERS {
            let value = placeholder.resolve(root, base_domain)?;
            replacements.insert(placeholder.token, value);
        }
        Ok(replacements)
    }

    pub fn insert(&mut self, token: &'static str, value: impl Into<String>) {
        self.values.insert(token, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(token, value)| (*token, value.as_str()))
    }

    /// Replace every token occurrence in `contents`
    pub fn apply(&self, contents: &str) -> String {
        let mut contents = contents.to_string();
        for (token, value) in self.iter() {
            if contents.contains(token) {
                tracing::debug!(token, value, "replacing placeholder");
                contents = contents.replace(token, value);
            }
        }
        contents
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    #[error("Unable to walk {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Unable to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every `values.yaml` below `root`, sorted by path
///
/// A missing root is not an error, it simply contains no files.
pub fn find_values_files(root: &Path) -> Result<Vec<PathBuf>, PatchError> {
    if !root.is_dir() {
        tracing::debug!(root=%root.display(), "no values directory");
        return Ok(vec![]);
    }

    let mut files = vec![];
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.map_err(|source| PatchError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        // `path().is_file()` follows symlinked values files, `file_type()` would not
        if entry.file_name() == VALUES_FILE_NAME && entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Substitute placeholders in all values files below `root`
///
/// Only files whose contents changed are written. Returns the written files.
pub fn patch_values_files(
    root: &Path,
    replacements: &Replacements,
) -> Result<Vec<PathBuf>, PatchError> {
    let mut patched = vec![];

    for path in find_values_files(root)? {
        let original = std::fs::read_to_string(&path).map_err(|source| PatchError::Read {
            path: path.clone(),
            source,
        })?;

        let contents = replacements.apply(&original);
        if contents == original {
            tracing::trace!(path=%path.display(), "unchanged");
            continue;
        }

        std::fs::write(&path, contents).map_err(|source| PatchError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path=%path.display(), "patched values file");
        patched.push(path);
    }

    Ok(patched)
}
