//! render pipeline
//!
//! 1. resolve every required field (nothing is written if any of them fails)
//! 2. write the ansible inventory
//! 3. write the terraform variables
//! 4. patch placeholders in platform-core values files
use crate::artifacts::{self, WriteError};
use crate::config_document::ConfigDocument;
use crate::fields::{self, compose_hostname, get_required, FieldError};
use crate::placeholders::{self, PatchError, Replacements};
use std::path::PathBuf;

/// All values needed to render, validated up front
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub server_ip: String,
    pub base_domain: String,
    pub argocd_hostname: String,
    pub gitea_hostname: String,
    pub replacements: Replacements,
}

impl ResolvedConfig {
    pub fn resolve(document: &ConfigDocument) -> Result<Self, FieldError> {
        let root = document.root();

        let server_ip = get_required(root, fields::SERVER_IP)?.to_string();
        let base_domain = get_required(root, fields::BASE_DOMAIN)?.to_string();
        let replacements = Replacements::resolve(root, &base_domain)?;

        let argocd_hostname =
            compose_hostname(get_required(root, fields::ARGOCD_PREFIX)?, &base_domain);
        let gitea_hostname =
            compose_hostname(get_required(root, fields::GITEA_PREFIX)?, &base_domain);

        Ok(Self {
            server_ip,
            base_domain,
            argocd_hostname,
            gitea_hostname,
            replacements,
        })
    }

    /// Terraform variables in output order
    pub fn tfvars(&self) -> Vec<(&str, &str)> {
        vec![
            ("base_domain", self.base_domain.as_str()),
            ("argocd_hostname", self.argocd_hostname.as_str()),
            ("gitea_hostname", self.gitea_hostname.as_str()),
        ]
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Files touched by a render, in the order they were written
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<PathBuf>,
}

#[derive(derive_new::new, Debug, Clone)]
pub struct Renderer {
    repo_root: PathBuf,
}

impl Renderer {
    pub fn inventory_path(&self) -> PathBuf {
        self.repo_root.join(artifacts::INVENTORY_PATH)
    }

    pub fn tfvars_path(&self) -> PathBuf {
        self.repo_root.join(artifacts::TFVARS_PATH)
    }

    pub fn platform_core_dir(&self) -> PathBuf {
        self.repo_root.join(artifacts::PLATFORM_CORE_DIR)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(repo_root = %self.repo_root.display()))]
    pub fn render(&self, document: &ConfigDocument) -> Result<RenderReport, RenderError> {
        let config = ResolvedConfig::resolve(document)?;
        let mut report = RenderReport::default();

        let inventory_path = self.inventory_path();
        artifacts::write_artifact(
            &inventory_path,
            &artifacts::inventory_contents(&config.server_ip),
        )?;
        report.rendered.push(inventory_path);

        let tfvars_path = self.tfvars_path();
        artifacts::write_artifact(&tfvars_path, &artifacts::tfvars_contents(config.tfvars()))?;
        report.rendered.push(tfvars_path);

        let patched =
            placeholders::patch_values_files(&self.platform_core_dir(), &config.replacements)?;
        report.rendered.extend(patched);

        Ok(report)
    }
}
