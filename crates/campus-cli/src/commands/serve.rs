//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use campus_core::{Environment, GatewayConfig};
use campus_web::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "CAMPUS_HOST")]
    pub host: Option<String>,

    /// Deployment environment (development or production)
    #[arg(long = "env", env = "CAMPUS_ENV")]
    pub environment: Option<Environment>,

    /// Origin allowed by CORS in production
    #[arg(long, env = "CAMPUS_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// URL of the external code runner behind /api/execute
    #[arg(long, env = "EXECUTION_SERVICE_URL")]
    pub execution_url: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./logs/campus-bridge.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(environment) = self.environment {
            config.server.environment = environment;
        }
        if let Some(origin) = &self.allowed_origin {
            config.server.allowed_origin = Some(origin.clone());
        }
        if let Some(url) = &self.execution_url {
            config.execution.url = Some(url.clone());
        }
    }

    /// Where `--log` writes.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs/campus-bridge.log"))
    }
}

pub async fn execute(args: ServeArgs, mut config: GatewayConfig) -> Result<()> {
    args.apply(&mut config);
    config
        .validate()
        .context("FATAL ERROR: refusing to start the server")?;

    let server = &config.server;

    println!();
    println!(
        "  {} {}",
        "Campus Bridge".cyan().bold(),
        "AI Backend".bold()
    );
    println!();
    println!(
        "  {}  http://{}:{}/api/ai/analyze",
        "Analyze".green(),
        server.host,
        server.port
    );
    println!(
        "  {}  {}",
        "Execute".green(),
        config
            .execution
            .url
            .as_deref()
            .unwrap_or("not configured")
    );
    println!("  {}    {}", "Model".green(), config.gemini.model);
    println!("  {}      {}", "Env".green(), server.environment);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    tracing::info!(model = %config.gemini.model, "Using Gemini model");

    let state = AppState::from_config(&config);
    campus_web::run_server(state, server).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["campus-bridge", "serve"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Serve(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_serve_overrides() {
        let args = serve_args(&[
            "--port",
            "8088",
            "--env",
            "production",
            "--allowed-origin",
            "https://campus.example.edu",
            "--execution-url",
            "http://runner.local/run",
        ]);
        let mut config = GatewayConfig::default();
        args.apply(&mut config);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(
            config.server.allowed_origin.as_deref(),
            Some("https://campus.example.edu")
        );
        assert_eq!(config.execution.url.as_deref(), Some("http://runner.local/run"));
    }

    #[test]
    fn test_default_log_path() {
        let args = serve_args(&["--log"]);
        assert!(args.log);
        assert_eq!(args.log_path(), PathBuf::from("logs/campus-bridge.log"));
    }

    #[tokio::test]
    async fn test_missing_api_key_refuses_to_start() {
        let args = serve_args(&["--port", "0"]);
        let err = execute(args, GatewayConfig::default()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("GEMINI_API_KEY"));
    }
}
