//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use campus_core::GatewayConfig;

pub mod analyze;
pub mod check;
pub mod serve;

/// Campus Bridge - AI code review gateway
#[derive(Parser)]
#[command(name = "campus-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./campus-bridge.toml if present)
    #[arg(short, long, global = true, env = "CAMPUS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub gemini: GeminiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Generation service overrides shared by every command.
#[derive(Args, Debug, Default)]
pub struct GeminiArgs {
    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, global = true, env = "GEMINI_MODEL_NAME")]
    pub model: Option<String>,

    /// Gemini API base URL
    #[arg(long, global = true, env = "GEMINI_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request generation timeout in seconds
    #[arg(long, global = true, env = "GEMINI_TIMEOUT_SECS")]
    pub timeout: Option<u64>,
}

impl GeminiArgs {
    fn apply(&self, config: &mut GatewayConfig) {
        if let Some(key) = &self.api_key {
            config.gemini.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            config.gemini.model = model.clone();
        }
        if let Some(url) = &self.base_url {
            config.gemini.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.gemini.timeout_secs = timeout;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the AI backend HTTP server
    Serve(serve::ServeArgs),

    /// Analyze a single file from the terminal
    Analyze(analyze::AnalyzeArgs),

    /// Check that the configured model is reachable
    Check,
}

impl Cli {
    /// Load the config file and layer the shared flags on top.
    pub fn load_config(&self, dir: &Path) -> Result<GatewayConfig> {
        let mut config = GatewayConfig::load_or_default(self.config.as_deref(), dir)
            .context("Failed to load configuration")?;
        self.gemini.apply(&mut config);
        Ok(config)
    }

    pub async fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
        let config = self.load_config(&cwd)?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Analyze(args) => analyze::execute(args, config).await,
            Commands::Check => check::execute(config).await,
        }
    }
}
