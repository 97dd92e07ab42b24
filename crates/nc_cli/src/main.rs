use anyhow::{bail, Context};
use clap::Parser;
use nc_inference::models::{create_model, requires_api_key};
use nc_inference::{AnalysisService, Config};
use nc_storage::StoreHandle;
use nc_web::{create_app, AppState};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if c.is_whitespace() {
                continue;
            } else {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| format!("Missing number before unit '{}'", c))?;
                total_seconds += match c {
                    's' => num,
                    'm' => num * 60,
                    'h' => num * 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                current_number.clear();
                has_value = true;
            }
        }

        // a trailing bare number is seconds
        if !current_number.is_empty() {
            total_seconds += current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Fact-check news articles with a language model", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NEWSCHECK_HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
    #[arg(long, env = "NEWSCHECK_MODEL", default_value = "deepseek", help = "Model to use for analysis. Available models: deepseek (default), dummy")]
    model: String,
    /// Base URL of an OpenAI-compatible API (e.g. https://api.deepseek.com/v1)
    #[arg(long, env = "NEWSCHECK_MODEL_URL")]
    model_url: Option<String>,
    /// Model identifier sent to the provider (e.g. deepseek-chat)
    #[arg(long, env = "NEWSCHECK_MODEL_NAME")]
    model_name: Option<String>,
    #[arg(long, env = "NEWSCHECK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Where analyses are stored: memory:// or sqlite:<path>. History is disabled when unset.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    /// Timeout for a single model call (e.g. 30s, 2m)
    #[arg(long, env = "NEWSCHECK_REQUEST_TIMEOUT", default_value = "30s")]
    request_timeout: HumanDuration,
}

impl Cli {
    fn inference_config(&self) -> anyhow::Result<Config> {
        let has_key = self
            .api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false);
        if requires_api_key(&self.model) && !has_key {
            bail!(
                "NEWSCHECK_API_KEY is not set; the '{}' model cannot run without an API key",
                self.model
            );
        }

        Ok(Config {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            model_url: self.model_url.clone(),
            model_name: self.model_name.clone(),
            request_timeout: self.request_timeout.0,
        })
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("👋 Shutting down");
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.inference_config()?;
    let model = create_model(&config)?;
    info!("🧠 Inference model initialized successfully (using {})", model.name());

    info!("💾 Checking storage connection...");
    let store = StoreHandle::connect(cli.database_url.as_deref()).await;

    let app = create_app(AppState::new(AnalysisService::new(model), store));

    let addr = cli.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
