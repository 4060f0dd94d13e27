//! Required config fields
//!
//! A field is addressed by a fixed list of keys ([FieldPath]), written as a dotted path in
//! error messages, e.g. `cluster.server_ip`. Resolution walks the document one key at a time.
//! Each intermediate value must be an object that contains the next key.
//!
//! The final value must be a non-empty string. The three ways this can fail are reported
//! separately, see [FieldError].
use crate::value::Value;

/// Keys leading from the document root to a single value
pub type FieldPath = &'static [&'static str];

pub const SERVER_IP: FieldPath = &["cluster", "server_ip"];
pub const METALLB_IP_RANGE: FieldPath = &["network", "metallb_ip_range"];
pub const BASE_DOMAIN: FieldPath = &["ingress", "base_domain"];
pub const ARGOCD_PREFIX: FieldPath = &["ingress", "prefixes", "argocd"];
pub const GITEA_PREFIX: FieldPath = &["ingress", "prefixes", "gitea"];
pub const VAULT_PREFIX: FieldPath = &["ingress", "prefixes", "vault"];
pub const MINIO_PREFIX: FieldPath = &["ingress", "prefixes", "minio"];
pub const MINIO_API_PREFIX: FieldPath = &["ingress", "prefixes", "minio_api"];

pub fn dotted(path: &[&str]) -> String {
    path.join(".")
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FieldError {
    #[error("Missing required config value: {0}")]
    Missing(String),
    #[error("Config value must be a non-empty string: {0}")]
    Empty(String),
    #[error("Config value must be a string: {path} (found {found})")]
    WrongType { path: String, found: &'static str },
}

/// Fetch a required, non-empty string
#[tracing::instrument(level = "trace", skip_all, fields(path = %dotted(path)))]
pub fn get_required<'v>(root: &'v Value, path: &[&str]) -> Result<&'v str, FieldError> {
    let mut current = root;
    for key in path {
        current = current
            .get(key)
            .ok_or_else(|| FieldError::Missing(dotted(path)))?;
    }

    match current {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::String(_) | Value::Null => Err(FieldError::Empty(dotted(path))),
        other => Err(FieldError::WrongType {
            path: dotted(path),
            found: other.type_name(),
        }),
    }
}

/// Build a fully qualified hostname from an ingress prefix
///
/// An empty prefix means the service lives on the base domain itself.
/// No normalization or DNS label validation is applied.
pub fn compose_hostname(prefix: &str, base_domain: &str) -> String {
    if prefix.is_empty() {
        base_domain.to_string()
    } else {
        format!("{prefix}.{base_domain}")
    }
}
