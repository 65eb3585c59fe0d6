//! Resolve command

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;

use addon_loader::{Addon, Context, ManifestLoader, ManifestSet, Repository};

use crate::error::{CliError, Result};

/// Run the resolve command
pub async fn run_resolve<R: Repository>(
    loader: &ManifestLoader<R>,
    ctx: &Context,
    file: &Path,
    json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let addon = Addon::from_yaml(&content)?;

    let resolved = loader.resolve_version(ctx, &addon).await?;
    let manifests = loader.load_resolved(ctx, &resolved).await?;

    eprintln!(
        "{} {} ({} file{})",
        "Resolved".green().bold(),
        resolved,
        manifests.len(),
        if manifests.len() == 1 { "" } else { "s" }
    );

    if json {
        let sorted: BTreeMap<_, _> = manifests.iter().collect();
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else {
        print!("{}", render_manifests(&manifests));
    }
    Ok(())
}

/// Render a manifest set as a multi-document YAML stream, sorted by path.
pub fn render_manifests(manifests: &ManifestSet) -> String {
    let sorted: BTreeMap<_, _> = manifests.iter().collect();
    let mut out = String::new();

    for (path, content) in sorted {
        out.push_str("---\n");
        out.push_str(&format!("# Source: {path}\n"));
        out.push_str(content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
