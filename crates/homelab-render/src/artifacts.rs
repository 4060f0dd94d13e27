//! fixed-format output files
//!
//! Both files are fully determined by the resolved config. They are overwritten on every run.
use std::path::{Path, PathBuf};

/// Ansible inventory, relative to the repository root
pub const INVENTORY_PATH: &str = "bootstrap/ansible/inventory/hosts";
/// Terraform variables, relative to the repository root
pub const TFVARS_PATH: &str = "bootstrap/terraform/terraform.tfvars";
/// Chart values searched for placeholders, relative to the repository root
pub const PLATFORM_CORE_DIR: &str = "platform-core";

/// Inventory group the k3s server is listed under
pub const INVENTORY_GROUP: &str = "k3s-server";

pub fn inventory_contents(server_ip: &str) -> String {
    format!("[{INVENTORY_GROUP}]\n{server_ip}\n")
}

/// `key = "value"` per line, in the given order
///
/// Values are quoted verbatim. Embedded quotes are not escaped.
pub fn tfvars_contents<'a>(variables: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    variables
        .into_iter()
        .map(|(key, value)| format!("{key} = \"{value}\"\n"))
        .collect()
}

#[derive(thiserror::Error, Debug)]
#[error("Unable to write {}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Write `contents` to `path`, creating parent directories as needed
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), WriteError> {
    let wrap = |source| WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, contents).map_err(wrap)?;

    tracing::info!(path=%path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inventory() {
        assert_eq!(inventory_contents("10.0.0.5"), "[k3s-server]\n10.0.0.5\n");
    }

    #[test]
    fn tfvars() {
        let contents = tfvars_contents([
            ("base_domain", "lab.dev"),
            ("argocd_hostname", "argocd.lab.dev"),
        ]);
        assert_eq!(
            contents,
            "base_domain = \"lab.dev\"\nargocd_hostname = \"argocd.lab.dev\"\n"
        );
    }

    #[test]
    fn tfvars_does_not_escape() {
        assert_eq!(tfvars_contents([("a", "x\"y")]), "a = \"x\"y\"\n");
    }

    #[test]
    fn write_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bootstrap/ansible/inventory/hosts");

        write_artifact(&path, "first\n").expect("write");
        write_artifact(&path, "second\n").expect("overwrite");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn write_error_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("bootstrap");
        std::fs::write(&blocker, "not a directory").unwrap();

        let path = blocker.join("terraform/terraform.tfvars");
        let err = write_artifact(&path, "x").expect_err("parent is a file");
        assert_eq!(err.path, path);
    }
}
