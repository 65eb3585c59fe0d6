//! Channel inspection commands

use colored::Colorize;

use addon_loader::{Context, Error, ManifestLoader, Repository};

use crate::error::Result;

/// Run the latest command
pub async fn run_latest<R: Repository>(
    loader: &ManifestLoader<R>,
    ctx: &Context,
    component: &str,
    channel_name: &str,
) -> Result<()> {
    let channel = loader.repository().load_channel(ctx, channel_name).await?;

    match channel.latest(component)? {
        Some(version) => {
            println!("{}", version.version);
            Ok(())
        }
        None => Err(Error::NoLatestVersion {
            channel: channel_name.to_string(),
            component: component.to_string(),
        }
        .into()),
    }
}

/// Run the channel command
pub async fn run_channel<R: Repository>(
    loader: &ManifestLoader<R>,
    ctx: &Context,
    channel_name: &str,
) -> Result<()> {
    let channel = loader.repository().load_channel(ctx, channel_name).await?;

    println!("{} {}", "Channel".bold(), channel.name.cyan());
    println!();

    let components = channel.components();
    if components.is_empty() {
        println!("  {}", "(no components)".dimmed());
        return Ok(());
    }

    for component in components {
        let versions = channel.versions(component)?;
        let listed: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
        match listed.split_first() {
            Some((latest, older)) => {
                print!("  {} {}", component.green(), latest.bold());
                if !older.is_empty() {
                    print!(" {}", format!("({})", older.join(", ")).dimmed());
                }
                println!();
            }
            None => println!("  {} {}", component.green(), "(no versions)".dimmed()),
        }
    }

    Ok(())
}
