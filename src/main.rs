mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use renova_core::RunInfo;
use renova_llm::AnthropicGenerator;
use renova_notify::WebhookNotifier;
use secrecy::SecretString;

/// Apply an AI-generated change request to a repository working tree.
#[derive(Parser, Debug)]
#[command(name = "renova", version)]
struct Args {
    /// Working tree the job operates on.
    #[arg(long)]
    repo: PathBuf,

    /// Natural-language change request (or build-failure output with --fix).
    #[arg(long)]
    request: String,

    /// Fix mode: treat the request as a build failure and make minimal
    /// corrective edits.
    #[arg(long)]
    fix: bool,

    /// Job identifier echoed back in webhook payloads.
    #[arg(long)]
    job_id: String,

    /// CI run id for webhook payloads.
    #[arg(long, default_value = "")]
    run_id: String,

    /// CI run URL for webhook payloads.
    #[arg(long, default_value = "")]
    run_url: String,

    /// Job-tracking endpoint. Requires WEBHOOK_SECRET when set.
    #[arg(long)]
    webhook_url: Option<String>,

    /// Generation model override.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Input errors fail fast, before any I/O.
    let api_key = match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) if !key.is_empty() => SecretString::from(key),
        _ => {
            eprintln!("error: ANTHROPIC_API_KEY is not set");
            std::process::exit(2);
        }
    };

    let notifier = match &args.webhook_url {
        Some(url) => match std::env::var("WEBHOOK_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                Some(WebhookNotifier::new(url.clone(), SecretString::from(secret)))
            }
            _ => {
                eprintln!("error: --webhook-url requires WEBHOOK_SECRET");
                std::process::exit(2);
            }
        },
        None => None,
    };

    if !args.repo.is_dir() {
        eprintln!("error: {} is not a directory", args.repo.display());
        std::process::exit(2);
    }

    let config = pipeline::JobConfig {
        working_root: args.repo,
        request: args.request,
        fix_mode: args.fix,
        job_id: args.job_id,
        run: RunInfo {
            run_id: args.run_id,
            run_url: args.run_url,
        },
    };

    let generator = AnthropicGenerator::new(api_key, args.model.as_deref());

    match pipeline::run_job(&config, &generator, notifier.as_ref()).await {
        Ok(report) => {
            tracing::info!(
                operations = report.operations,
                framework = report.framework.label(),
                "job completed"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "job failed");
            pipeline::report_failure(
                notifier.as_ref(),
                &config.job_id,
                &config.run,
                &e.to_string(),
            )
            .await;
            std::process::exit(1);
        }
    }
}
