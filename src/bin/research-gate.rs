//! research-gate binary
//!
//! HTTP gateway serving paper summaries, insights, search and chat

use anyhow::{Context, Result};
use clap::Parser;
use research_gate::gate::{start_server, GatewayConfig};
use research_gate::ProviderConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// research-gate: research paper analysis gateway
#[derive(Parser, Debug)]
#[command(name = "research-gate")]
#[command(about = "Research paper analysis gateway", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to listen on
    #[arg(long, env = "RESEARCH_GATE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "RESEARCH_GATE_PORT")]
    port: Option<u16>,

    /// Provider request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Model identifier sent to the provider
    #[arg(long)]
    model: Option<String>,

    /// Return errors instead of demo payloads when the API key is rejected
    #[arg(long)]
    no_demo_mode: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

/// Load gateway configuration from file
fn load_gateway_config(config_path: &Path) -> Result<GatewayConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    GatewayConfig::from_toml(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))
}

/// Explicit path, then ./config.toml, then ~/.research-gate/config.toml
fn find_config_file(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let local = PathBuf::from("./config.toml");
        if local.exists() {
            return Some(local);
        }
        dirs::home_dir()
            .map(|home| home.join(".research-gate").join("config.toml"))
            .filter(|p| p.exists())
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Seed the environment from .env before anything reads it
    let dotenv = dotenvy::dotenv();

    fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    let args = Args::parse();

    let config_file = find_config_file(args.config.clone());

    let mut gateway_config = match config_file {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            load_gateway_config(path)?
        }
        None => {
            tracing::info!("Using default configuration");
            GatewayConfig::default()
        }
    };

    // Override with CLI arguments
    if let Some(host) = args.host {
        gateway_config.host = host;
    }
    if let Some(port) = args.port {
        gateway_config.port = port;
    }
    if let Some(timeout) = args.timeout {
        gateway_config.timeout_secs = timeout;
    }
    if args.no_demo_mode {
        gateway_config.demo_mode = false;
    }

    let mut provider_config = ProviderConfig::from_env()?;
    if let Some(model) = args.model {
        provider_config = provider_config.with_model(model);
    }

    if args.validate {
        return validate_config(&gateway_config, &provider_config);
    }

    start_server(gateway_config, provider_config).await
}

/// Validate configuration
fn validate_config(config: &GatewayConfig, provider: &ProviderConfig) -> Result<()> {
    println!("Configuration validation:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  Timeout: {}s", config.timeout_secs);
    println!("  Demo mode: {}", if config.demo_mode { "on" } else { "off" });
    println!("  Provider: {}", provider.api_base);
    println!("  Model: {}", provider.model);
    println!(
        "  API key: {}",
        if provider.has_api_key() { "set" } else { "missing (demo mode)" }
    );

    if config.port < 1024 {
        anyhow::bail!("Invalid port: {} (must be between 1024 and 65535)", config.port);
    }

    if config.timeout_secs < 10 || config.timeout_secs > 600 {
        anyhow::bail!(
            "Invalid timeout: {} (must be between 10 and 600 seconds)",
            config.timeout_secs
        );
    }

    config
        .bind_addr()
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("Invalid listen address '{}'", config.bind_addr()))?;

    println!("\n✓ Configuration is valid");
    Ok(())
}
