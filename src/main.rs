// ABOUTME: Entry point for the deploy-wait CLI application.
// ABOUTME: Builds the run configuration, waits for the deploy, and reports the outcome.

mod cli;

use clap::Parser;
use cli::Cli;
use deploy_wait::clock::TokioClock;
use deploy_wait::config::{Config, EventContext, FileConfig, resolve_commit};
use deploy_wait::diagnostics::Diagnostics;
use deploy_wait::error::Result;
use deploy_wait::observer::TracingObserver;
use deploy_wait::orchestrator::Orchestrator;
use deploy_wait::output::{GithubOutput, Output};
use deploy_wait::provider::{HttpProbe, NetlifyClient};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());

    if let Err(e) = run(cli, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::discover(&env::current_dir()?)?,
    };

    let mut diag = Diagnostics::default();
    let commit = resolve_commit(cli.commit.as_deref(), &EventContext::from_env(), &mut diag);
    let config = Config::from_inputs(cli.inputs(commit), file, &mut diag)?;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    let provider = NetlifyClient::new(&config.api_url, &config.token, config.request_timeout)?;
    let probe = HttpProbe::new(config.request_timeout)?;

    output.progress(&format!(
        "Waiting for deploy of {} on site {}",
        config.commit, config.site_id
    ));
    output.start_timer();

    let output = &*output;
    let observer = (TracingObserver, output);
    let mut sink = GithubOutput::from_env();
    let mut diag = Diagnostics::default();
    let result = Orchestrator::new(&provider, &probe, &TokioClock, &observer)
        .run(&config, &mut sink, &mut diag)
        .await;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    let result = result?;

    output.success(&format!(
        "Deploy {} is {} at {}",
        result.deploy_id, result.state, result.url
    ));
    Ok(())
}
