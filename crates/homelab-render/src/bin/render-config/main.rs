mod cli;

use homelab_render::config_document::{resolve_config_path, ConfigDocument, LoadError};
use homelab_render::render::{RenderReport, Renderer};
use std::path::PathBuf;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("HOMELAB_RENDER_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let repo_root = match repo_root(&cli) {
        Ok(repo_root) => repo_root,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(repo_root=%repo_root.display(), "using repository root");

    let config_path = resolve_config_path(&repo_root, Some(&cli.config));
    let document = match ConfigDocument::load_file(&config_path) {
        Ok(document) => document,
        Err(e @ LoadError::NotFound(_)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => exit_with(e.into()),
    };

    let report = match Renderer::new(repo_root).render(&document) {
        Ok(report) => report,
        Err(e) => exit_with(e.into()),
    };

    if let Err(e) = output(&cli.report_format, &report) {
        exit_with(e);
    }
}

fn repo_root(cli: &cli::Cli) -> anyhow::Result<PathBuf> {
    use anyhow::Context;

    let repo_root = match &cli.repo_root {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to read work directory")?,
    };

    repo_root.canonicalize().with_context(|| {
        format!(
            "Failed to resolve path for -C/--repo-root {}",
            repo_root.display()
        )
    })
}

fn output(format: &cli::ReportFormat, report: &RenderReport) -> anyhow::Result<()> {
    match format {
        cli::ReportFormat::Text => {
            println!("Rendered:");
            for path in &report.rendered {
                println!("  {}", path.display());
            }
        }
        cli::ReportFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), report)?,
        cli::ReportFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), report)?;
            println!();
        }
    };

    Ok(())
}

fn exit_with(e: anyhow::Error) -> ! {
    for error in e.chain() {
        eprintln!("{error}")
    }
    std::process::exit(1);
}
