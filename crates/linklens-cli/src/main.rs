use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use linklens_core::{load_app_config, load_platforms, Platform};
use linklens_discovery::{Discovery, DiscoveryOptions};
use linklens_extract::build_registry;
use linklens_normalize::Normalizer;

#[derive(Debug, Parser)]
#[command(name = "linklens")]
#[command(about = "Creator link-in-bio discovery and intelligence")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a discovery for a creator and print the profile as JSON.
    Discover {
        /// Seed query: a creator handle, with or without a leading '@'.
        query: String,

        /// Restrict the fan-out to specific platforms (repeatable).
        #[arg(long = "platform", value_name = "PLATFORM")]
        platforms: Vec<Platform>,

        /// Override the handle for one platform, e.g.
        /// `--handle youtube=thechannel` (repeatable).
        #[arg(long = "handle", value_name = "PLATFORM=HANDLE")]
        handles: Vec<String>,

        /// Per-platform extraction timeout in seconds (overrides config).
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// List the platforms configured in the platforms file.
    Platforms,
}

fn parse_handle_override(raw: &str) -> anyhow::Result<(Platform, String)> {
    let (platform, handle) = raw
        .split_once('=')
        .with_context(|| format!("expected PLATFORM=HANDLE, got \"{raw}\""))?;
    let platform = platform
        .parse::<Platform>()
        .map_err(|e| anyhow::anyhow!(e))?;
    if handle.trim().is_empty() {
        anyhow::bail!("empty handle override for platform '{platform}'");
    }
    Ok((platform, handle.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Discover {
            query,
            platforms,
            handles,
            timeout_secs,
            pretty,
        } => {
            let platforms_file = load_platforms(&config.platforms_path)?;
            let registry = build_registry(&config, &platforms_file)?;
            let normalizer = Normalizer::new(config.request_timeout_secs, &config.user_agent)?;

            let handle_overrides: HashMap<Platform, String> = handles
                .iter()
                .map(|raw| parse_handle_override(raw))
                .collect::<anyhow::Result<_>>()?;

            let options = DiscoveryOptions {
                platforms: if platforms.is_empty() {
                    Some(platforms_file.enabled_platforms())
                } else {
                    Some(platforms)
                },
                handle_overrides,
                per_platform_timeout: timeout_secs.map(Duration::from_secs),
            };

            let discovery = Discovery::new(registry, normalizer, config);
            let profile = discovery.discover(&query, options).await?;

            tracing::info!(summary = %profile.summary, "discovery finished");

            let json = if pretty {
                serde_json::to_string_pretty(&profile)?
            } else {
                serde_json::to_string(&profile)?
            };
            println!("{json}");
        }
        Commands::Platforms => {
            let platforms_file = load_platforms(&config.platforms_path)?;
            for entry in &platforms_file.platforms {
                let status = if entry.enabled { "enabled" } else { "disabled" };
                println!(
                    "{:<10} {:<9} {}",
                    entry.platform.to_string(),
                    status,
                    entry.profile_url
                );
            }
        }
    }

    Ok(())
}
