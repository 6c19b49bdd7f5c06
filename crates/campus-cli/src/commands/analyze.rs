//! One-shot analysis from the terminal.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use campus_clients::GeminiClient;
use campus_core::{AnalysisGateway, AnalysisOutcome, AnalysisRequest, AnalysisType, GatewayConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    Review,
    Debug,
    Hint,
}

impl From<Mode> for AnalysisType {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Review => AnalysisType::Review,
            Mode::Debug => AnalysisType::Debug,
            Mode::Hint => AnalysisType::Hint,
        }
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// File to analyze ("-" reads stdin)
    pub file: PathBuf,

    /// Language tag (inferred from the file extension when omitted)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Kind of feedback
    #[arg(short = 't', long = "type", value_enum, default_value = "review")]
    pub mode: Mode,

    /// Print the raw JSON result
    #[arg(long)]
    pub json: bool,
}

/// Guess a language tag from a file extension.
pub fn language_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let language = match ext.as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "java" => "java",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rb" => "ruby",
        "kt" => "kotlin",
        "swift" => "swift",
        "php" => "php",
        "sql" => "sql",
        "sh" => "bash",
        _ => return None,
    };
    Some(language)
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read stdin")?;
        return Ok(code);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub async fn execute(args: AnalyzeArgs, config: GatewayConfig) -> Result<()> {
    config.validate_gemini()?;

    let code = read_source(&args.file)?;
    let language = args
        .language
        .as_deref()
        .or_else(|| language_for(&args.file));
    let request = AnalysisRequest::new(code, language, args.mode.into())?;

    let gateway = AnalysisGateway::new(Arc::new(GeminiClient::from_config(&config.gemini)));
    let outcome = gateway.analyze(&request).await;
    let success = outcome.is_success();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.into_result())?);
    } else {
        print_outcome(&request, outcome);
    }

    if !success {
        bail!("Analysis did not complete");
    }
    Ok(())
}

fn print_outcome(request: &AnalysisRequest, outcome: AnalysisOutcome) {
    match outcome {
        AnalysisOutcome::Completed(text) => {
            println!(
                "{} {}",
                request.analysis_type.to_string().to_uppercase().cyan().bold(),
                format!("({})", request.language).dimmed()
            );
            println!();
            println!("{}", text);
        }
        AnalysisOutcome::Blocked { reason, message, .. } => {
            eprintln!("{} {} {}", "Blocked:".red().bold(), message, format!("[{}]", reason).dimmed());
        }
        other => {
            let result = other.into_result();
            eprintln!(
                "{} {}",
                "Error:".red().bold(),
                result.error.unwrap_or_default()
            );
        }
    }
}
