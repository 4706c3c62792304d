mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use config::Config;
use report_core::{PricingConfig, ReportRun};
use report_llm::{CompletionProvider, OpenAiProvider};
use report_pipeline::{
    segmentation_instructions, ArtifactStore, Locale, ReportPipeline, DEFAULT_MAX_OUTPUT_TOKENS,
};

#[derive(Parser)]
#[command(name = "report-cli")]
#[command(about = "Generate a LaTeX incident report from a security-log transcript")]
#[command(version)]
struct Cli {
    /// Path to the log transcript to analyze
    log_file: PathBuf,

    /// Directory for the generated report artifacts
    #[arg(long, default_value = "generated_report")]
    output_dir: PathBuf,

    /// Completion model to consult (overrides config/env)
    #[arg(long)]
    model: Option<String>,

    /// Output-token budget per completion call
    #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    max_tokens: u32,

    /// Input price in dollars per million tokens
    #[arg(long, default_value_t = 10.00)]
    input_price: f64,

    /// Output price in dollars per million tokens
    #[arg(long, default_value_t = 30.00)]
    output_price: f64,

    /// Report language: en or pt
    #[arg(long, default_value = "en")]
    locale: Locale,
}

/// Read the transcript and drive the pipeline. The transcript is read in
/// full before the provider is consulted, so an unreadable input fails with
/// zero service calls.
async fn generate_report(
    provider: Arc<dyn CompletionProvider>,
    log_file: &Path,
    output_dir: &Path,
    pricing: PricingConfig,
    max_tokens: u32,
    locale: Locale,
) -> anyhow::Result<ReportRun> {
    let log_text = std::fs::read_to_string(log_file)
        .with_context(|| format!("failed to read log file {}", log_file.display()))?;

    let artifacts = ArtifactStore::create(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let pipeline = ReportPipeline::new(provider, artifacts, pricing)
        .with_max_output_tokens(max_tokens)
        .with_locale(locale);

    let run = pipeline
        .run(segmentation_instructions(locale), &log_text)
        .await?;
    Ok(run)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load();

    let api_key = config
        .api_key
        .context("no API key configured; set OPENAI_API_KEY or api_key in config.toml")?;

    let model = cli
        .model
        .or(config.model)
        .unwrap_or_else(|| "gpt-4-turbo".to_string());

    let mut provider = OpenAiProvider::new(api_key).with_model(&model);
    if let Some(api_base) = config.api_base {
        provider = provider.with_base_url(api_base);
    }

    let pricing = PricingConfig {
        input_per_million: cli.input_price,
        output_per_million: cli.output_price,
    };

    println!(
        "{}",
        format!("Analyzing {} with {}...", cli.log_file.display(), model).dimmed()
    );

    let run = generate_report(
        Arc::new(provider),
        &cli.log_file,
        &cli.output_dir,
        pricing,
        cli.max_tokens,
        cli.locale,
    )
    .await?;

    println!("\n{}", "Initial report:".bold());
    println!("{}\n", run.initial_response);
    println!("Number of identified steps: {}", run.step_count);

    for step in &run.steps {
        println!("\n{}", format!("Expansion of Step {}:", step.index).bold());
        println!("{}", step.content);
        println!("Time for Step {}: {:.2} seconds", step.index, step.duration_secs);
        println!("Tokens used in Step {}: {}", step.index, step.tokens_used);
        println!("Cost of Step {}: ${:.5}", step.index, step.cost_usd);
    }

    println!();
    println!(
        "Total time for generating the report: {:.2} seconds",
        run.total_duration_secs
    );
    println!("Estimated total cost: ${:.5}", run.total_cost_usd);
    println!(
        "{}",
        format!("Artifacts written to {}", cli.output_dir.display()).green()
    );

    Ok(())
}
