//! homelab config document ([Value] tree and path to source file)
//!
//! The document is parsed once per run and never mutated. No schema is applied at this stage,
//! the file only has to be valid YAML. Required fields are checked later by [crate::fields].
use crate::value::Value;
use std::path::{Path, PathBuf};

/// Config path used when none is given, relative to the repository root
pub const DEFAULT_CONFIG_PATH: &str = "config/homelab.yml";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    source: Option<PathBuf>,
    root: Value,
}

impl ConfigDocument {
    pub fn new(root: Value, source: impl Into<Option<PathBuf>>) -> Self {
        // `null` and empty documents are treated as an empty mapping
        let root = match root {
            Value::Null => Value::empty_object(),
            root => root,
        };

        Self {
            source: source.into(),
            root,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Serialize the parsed tree back to YAML, for trace output
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.root)
    }
}

impl ConfigDocument {
    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        if !file_path.exists() {
            return Err(LoadError::NotFound(file_path.to_path_buf()));
        }

        tracing::info!(path=%file_path.display(), "loading config");

        let file_contents = std::fs::read_to_string(file_path)?;
        let mut document: Self = file_contents.parse()?;
        document.source = Some(file_path.to_path_buf());

        if tracing::enabled!(tracing::Level::TRACE) {
            match document.to_yaml() {
                Ok(dump) => tracing::trace!(source=?document.source(), %dump, "loaded config"),
                Err(error) => tracing::trace!(%error, "unable to dump config"),
            }
        }

        Ok(document)
    }
}

impl std::str::FromStr for ConfigDocument {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(s)?;
        Ok(Self::new(yaml.into(), None))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse config yaml")]
    YamlParseFailed(#[from] serde_yaml::Error),
}

/// Resolve the config file location
///
/// Relative paths (including the default) are taken relative to `repo_root`,
/// absolute paths are returned unchanged.
pub fn resolve_config_path(repo_root: &Path, config: Option<&Path>) -> PathBuf {
    let config = config.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    if config.is_absolute() {
        config.to_path_buf()
    } else {
        repo_root.join(config)
    }
}

/// Utility macro to create a [ConfigDocument]
///
/// ```
/// # use homelab_render::config_document;
/// let document = config_document!("cluster:\n  server_ip: 10.0.0.5");
/// assert!(document.root().get("cluster").is_some());
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use homelab_render::config_document;
/// config_document!("cluster: [unclosed");
/// ```
#[macro_export]
macro_rules! config_document {
    { $expr:expr } => {
        $expr
            .parse::<$crate::config_document::ConfigDocument>()
            .expect("document must parse")
    };
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_empty_object() {
        assert_eq!(config_document!("").root(), &Value::empty_object());
        assert_eq!(config_document!("~").root(), &Value::empty_object());
        assert_eq!(config_document!("# only a comment\n").root(), &Value::empty_object());
    }

    #[test]
    fn non_mapping_root_is_kept() {
        let document = config_document!("- a\n- b\n");
        assert_eq!(document.root(), &Value::from(vec!["a", "b"]));
    }

    #[test]
    fn malformed_yaml_fails() {
        let err = "cluster: [unclosed"
            .parse::<ConfigDocument>()
            .expect_err("must not parse");
        assert!(matches!(err, LoadError::YamlParseFailed(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.yml");

        let err = ConfigDocument::load_file(&path).expect_err("must not load");
        assert!(matches!(&err, LoadError::NotFound(p) if p == &path));
        assert_eq!(
            err.to_string(),
            format!("Config file not found: {}", path.display())
        );
    }

    #[test]
    fn load_file_records_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("homelab.yml");
        std::fs::write(&path, "cluster:\n  server_ip: 10.0.0.5\n").expect("write config");

        let document = ConfigDocument::load_file(&path).expect("loads");
        assert_eq!(document.source(), Some(path.as_path()));
        assert!(document.root().get("cluster").is_some());
    }

    #[test]
    fn dump_round_trips_parsed_tree() {
        let document = config_document!("ingress:\n  base_domain: lab.dev\n  port: 443\n");
        assert_eq!(
            document.to_yaml().expect("serializable"),
            "ingress:\n  base_domain: lab.dev\n  port: 443\n"
        );
        assert_eq!(config_document!("").to_yaml().expect("serializable"), "{}\n");
    }

    #[test]
    fn yaml_1_2_scalars_and_duplicate_keys() {
        // `yes`/`on` are plain strings in YAML 1.2
        let document = config_document!("ingress:\n  prefixes:\n    argocd: yes\n");
        assert_eq!(
            crate::fields::get_required(document.root(), crate::fields::ARGOCD_PREFIX),
            Ok("yes")
        );

        let err = "a: 1\na: 2\n"
            .parse::<ConfigDocument>()
            .expect_err("duplicate keys are rejected");
        assert!(matches!(err, LoadError::YamlParseFailed(_)));
    }

    #[test]
    fn config_path_resolution() {
        let root = Path::new("/srv/homelab");

        assert_eq!(
            resolve_config_path(root, None),
            PathBuf::from("/srv/homelab/config/homelab.yml")
        );
        assert_eq!(
            resolve_config_path(root, Some(Path::new("other/lab.yml"))),
            PathBuf::from("/srv/homelab/other/lab.yml")
        );
        assert_eq!(
            resolve_config_path(root, Some(Path::new("/etc/lab.yml"))),
            PathBuf::from("/etc/lab.yml")
        );
    }
}
