use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tl_core::types::TEMPERATURE_RANGE;
use tl_core::{ComputeDevice, SummarizationRequest, SummarizationResult};
use tl_inference::evaluation::{self, builtin_examples};
use tl_inference::presets::{self, PRESETS};
use tl_inference::{load_summarizer, BackendKind, Config, InferenceConfig};
use tracing::info;

mod input;
mod logging;
mod render;

fn parse_temperature(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("Invalid temperature: {}", s))?;
    if TEMPERATURE_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(format!("Temperature must be between 0.1 and 2.0, got {}", value))
    }
}

#[derive(Parser, Debug)]
#[command(name = "tldr", author, version, about = "TL;DR - Text Summarizer", long_about = None)]
pub struct Cli {
    /// Inference backend: huggingface (default), ollama, dummy
    #[arg(long, global = true, env = "TLDR_BACKEND", default_value = "huggingface")]
    backend: BackendKind,
    /// Base URL of the inference service
    #[arg(long, global = true, env = "TLDR_ENDPOINT")]
    endpoint: Option<String>,
    #[arg(long, global = true, env = "TLDR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Force a compute device (cpu, cuda, metal); probed when omitted
    #[arg(long, global = true)]
    device: Option<ComputeDevice>,
    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 180)]
    timeout: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize text given inline, from a .txt/.md file, or on stdin
    Summarize(SummarizeArgs),
    /// List the model presets
    Models,
    /// Score summaries of the built-in examples with ROUGE
    Evaluate {
        /// Only evaluate this preset or model id
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
        /// Load this preset or model id at start-up
        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    text: Option<String>,
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,
    /// Preset key, preset label or raw model id
    #[arg(long, short)]
    model: Option<String>,
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u16).range(50..=300))]
    max_length: u16,
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(10..=100))]
    min_length: u16,
    /// More creative but less consistent
    #[arg(long)]
    sample: bool,
    /// Only used with --sample
    #[arg(long, default_value_t = 1.0, value_parser = parse_temperature)]
    temperature: f32,
    /// Print the raw result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self, model_name: Option<String>) -> Config {
        Config {
            backend: self.backend,
            model_name,
            device: self.device,
            inference_config: InferenceConfig {
                endpoint: self.endpoint.clone(),
                api_key: self.api_key.clone(),
                timeout: Duration::from_secs(self.timeout),
            },
        }
    }
}

impl SummarizeArgs {
    fn request(&self, text: String) -> SummarizationRequest {
        let request = SummarizationRequest::new(text)
            .with_lengths(self.min_length as usize, self.max_length as usize);
        if self.sample {
            request.with_sampling(self.temperature)
        } else {
            request
        }
    }
}

async fn summarize(cli: &Cli, args: &SummarizeArgs) -> Result<()> {
    let text = input::resolve_text(args.text.clone(), args.file.as_deref())?;
    let summarizer = load_summarizer(&cli.config(args.model.clone()))
        .await
        .context("Error loading model")?;
    info!("🚀 Summarizing with {} on {}", summarizer.model_identifier(), summarizer.device());

    let result = summarizer.summarize(&args.request(text)).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    match result {
        SummarizationResult::Success { summary, metadata } => {
            if !args.json {
                print!("{}", render::summary(&summary, &metadata));
            }
            Ok(())
        }
        SummarizationResult::Failure { error } => Err(anyhow!(error)),
    }
}

async fn evaluate(cli: &Cli, model: Option<&str>, json: bool) -> Result<()> {
    let targets: Vec<(String, String)> = match model {
        Some(name) => {
            let label = presets::find_preset(name).map_or(name, |p| p.label);
            vec![(label.to_string(), name.to_string())]
        }
        None => PRESETS
            .iter()
            .map(|p| (p.label.to_string(), p.key.to_string()))
            .collect(),
    };

    let examples = builtin_examples();
    let mut reports = Vec::with_capacity(targets.len());
    for (label, name) in targets {
        let summarizer = load_summarizer(&cli.config(Some(name)))
            .await
            .with_context(|| format!("Error loading {}", label))?;
        let report = evaluation::evaluate(&summarizer, &examples).await;
        if !json {
            print!("{}", render::evaluation(&label, &report));
        }
        reports.push(report);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

async fn serve(cli: &Cli, addr: SocketAddr, model: Option<String>) -> Result<()> {
    let config = cli.config(model.clone());
    let loader = tl_inference::create_loader(&config)?;
    let state = tl_web::AppState::new(loader, config.device);
    if model.is_some() {
        let model_id = presets::resolve_model(model.as_deref());
        state.load(&model_id).await.context("Error loading model")?;
    }

    let app = tl_web::create_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🌐 Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();
    info!("🧠 Using {} backend", cli.backend);

    match &cli.command {
        Commands::Summarize(args) => summarize(&cli, args).await,
        Commands::Models => {
            print!("{}", render::presets(&PRESETS, presets::default_preset().key));
            Ok(())
        }
        Commands::Evaluate { model, json } => evaluate(&cli, model.as_deref(), *json).await,
        Commands::Serve { addr, model } => serve(&cli, *addr, model.clone()).await,
    }
}
