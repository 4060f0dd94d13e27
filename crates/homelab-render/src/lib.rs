//! # homelab-render - render homelab config
//!
//! Reads a single YAML file (by default `config/homelab.yml` in the repository root) and renders
//! it into the files consumed by the bootstrap tooling.
//!
//! ## Pipeline
//!
//! Every run goes through the same steps, strictly in order:
//!
//! 1. load the document ([config_document::ConfigDocument]), any valid YAML is accepted
//! 2. resolve the required fields ([render::ResolvedConfig]), see [fields::get_required]
//! 3. write the outputs ([render::Renderer])
//!
//! All fields are resolved before the first file is written. A config with a missing, empty or
//! non-string field leaves the repository untouched.
//!
//! ## Outputs
//!
//! | **file**                                | **contents**                                        |
//! |-----------------------------------------|-----------------------------------------------------|
//! | `bootstrap/ansible/inventory/hosts`     | `[k3s-server]` group with `cluster.server_ip`       |
//! | `bootstrap/terraform/terraform.tfvars`  | `base_domain`, `argocd_hostname`, `gitea_hostname`  |
//! | `platform-core/**/values.yaml`          | placeholders replaced, see [placeholders]           |
//!
//! Hostnames are built from `ingress.prefixes.*` and `ingress.base_domain`
//! ([fields::compose_hostname]).
//!
//! Re-running with an unchanged config produces identical files. Values files are only
//! written (and reported) when a placeholder was actually replaced.
pub mod artifacts;
pub mod config_document;
pub mod fields;
pub mod placeholders;
pub mod render;
pub mod value;
