//! ChainPort toolchain entry point.
//!
//! Resolves the monitoring project slug for the current branch and target
//! network, and guards branch/network pairings before deployments.
//!
//! # Usage
//!
//! ```bash
//! # Target ropsten (remembered for later tasks) and print the slug
//! chainport slug --network ropsten
//!
//! # Reuse the last targeted network
//! chainport slug
//!
//! # Refuse to continue unless the current branch may deploy to mainnet
//! chainport check --network mainnet
//!
//! # Show every known network
//! chainport networks
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chainport::config::DEFAULT_CONFIG_FILE;
use chainport::{
    Config, ContextStore, Credentials, FileContextStore, GitCli, MonitoringConfig, Network,
    NetworkSelection, Resolver,
};
use clap::{Parser, Subcommand};

/// ChainPort deployment environment resolver.
#[derive(Debug, Parser)]
#[command(name = "chainport", version, about)]
struct Cli {
    /// Project working directory (git checkout and deployment context).
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Config file, relative to `--dir` unless absolute.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Print the monitoring project slug.
    Slug {
        /// Target network. Saved for later invocations; when omitted the
        /// last saved network is used.
        #[arg(long)]
        network: Option<Network>,
    },

    /// Fail unless the current branch may deploy to the network.
    Check {
        /// Target network. When omitted the last saved network is used.
        #[arg(long)]
        network: Option<Network>,
    },

    /// Print the persisted deployment context.
    Context,

    /// List all known networks.
    Networks,

    /// Print the monitoring backend account and project.
    Monitoring {
        /// Target network. When omitted the last saved network is used.
        #[arg(long)]
        network: Option<Network>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }

    let cli = Cli::parse();
    let config_path = cli.dir.join(&cli.config);
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let store = FileContextStore::new(config.context_path(&cli.dir));

    match cli.command {
        Command::Slug { network } => cmd_slug(&cli.dir, store, network),
        Command::Check { network } => cmd_check(&cli.dir, store, network),
        Command::Context => cmd_context(&store, &config),
        Command::Networks => {
            cmd_networks(&config, &Credentials::from_env());
            Ok(())
        }
        Command::Monitoring { network } => cmd_monitoring(&cli.dir, store, network),
    }
}

fn resolver(dir: &Path, store: FileContextStore) -> Resolver<FileContextStore, GitCli> {
    Resolver::new(store, GitCli::new(dir))
}

/// Execute the `slug` subcommand.
#[allow(clippy::print_stdout, reason = "the slug is the command output")]
fn cmd_slug(dir: &Path, store: FileContextStore, network: Option<Network>) -> Result<()> {
    let path = store.path().to_path_buf();
    let slug = resolver(dir, store)
        .slug(network.into())
        .with_context(|| format!("resolving project slug (context {})", path.display()))?;
    println!("{slug}");
    Ok(())
}

/// Execute the `check` subcommand.
fn cmd_check(dir: &Path, store: FileContextStore, network: Option<Network>) -> Result<()> {
    let network = resolver(dir, store)
        .check(network.into())
        .context("branch/network check failed")?;
    tracing::info!(%network, "deployment allowed");
    Ok(())
}

/// Execute the `context` subcommand.
#[allow(clippy::print_stdout, reason = "the context is the command output")]
fn cmd_context(store: &FileContextStore, config: &Config) -> Result<()> {
    let record = store
        .get()
        .with_context(|| format!("reading {}", store.path().display()))?;
    match record {
        Some(record) => println!("{}", record.network),
        None => tracing::warn!(
            path = %store.path().display(),
            default = %config.default_network,
            "no deployment context saved yet"
        ),
    }
    Ok(())
}

/// Execute the `networks` subcommand.
#[allow(clippy::print_stdout, reason = "the table is the command output")]
fn cmd_networks(config: &Config, credentials: &Credentials) {
    println!(
        "{:<20} {:<8} {:<10} {:<10} {:<8} URL",
        "Network", "Family", "Branch", "Chain ID", "Signer"
    );
    println!("{}", "-".repeat(110));

    for network in Network::ALL {
        let marker = if *network == config.default_network { "*" } else { "" };
        let connection = config.connection(*network, credentials);
        println!(
            "{:<20} {:<8} {:<10} {:<10} {:<8} {}",
            format!("{network}{marker}"),
            network.chain_family().map_or("-", |f| f.as_str()),
            network.required_branch().unwrap_or("-"),
            connection
                .as_ref()
                .and_then(|c| c.chain_id)
                .map_or_else(|| "-".to_owned(), |id| id.to_string()),
            if connection.as_ref().is_some_and(|c| !c.accounts.is_empty()) { "yes" } else { "no" },
            connection.as_ref().map_or("-", |c| c.url.as_str()),
        );
    }
}

/// Execute the `monitoring` subcommand.
#[allow(clippy::print_stdout, reason = "the settings are the command output")]
fn cmd_monitoring(dir: &Path, store: FileContextStore, network: Option<Network>) -> Result<()> {
    let slug = resolver(dir, store)
        .slug(NetworkSelection::from(network))
        .context("resolving project slug")?;
    let monitoring = MonitoringConfig::new(&Credentials::from_env(), slug);
    println!("username = {}", monitoring.username.as_deref().unwrap_or("-"));
    println!("project  = {}", monitoring.project);
    Ok(())
}
