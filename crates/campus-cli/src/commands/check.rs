//! Model health check command.

use anyhow::{bail, Result};
use colored::Colorize;

use campus_clients::GeminiClient;
use campus_core::{GatewayConfig, TextGenerator};

pub async fn execute(config: GatewayConfig) -> Result<()> {
    config.validate_gemini()?;

    let client = GeminiClient::from_config(&config.gemini);
    print!("  {:<10} ", client.model_name());

    match client.health_check().await {
        Ok(true) => {
            println!("{}", "ok".green());
            Ok(())
        }
        Ok(false) => {
            println!("{}", "unavailable".red());
            bail!(
                "Model '{}' is not available with the configured API key",
                client.model_name()
            )
        }
        Err(e) => {
            println!("{}", "unreachable".red());
            bail!("Generation service unreachable: {}", e)
        }
    }
}
