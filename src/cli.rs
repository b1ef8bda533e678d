// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Every input can also come from the environment, as CI steps pass them.

use clap::Parser;
use deploy_wait::config::Inputs;
use deploy_wait::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deploy-wait")]
#[command(about = "Wait for a Netlify deploy of a commit to go live")]
#[command(version)]
pub struct Cli {
    /// Netlify personal access token
    #[arg(long, env = "NETLIFY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Netlify site ID
    #[arg(long, env = "INPUT_SITE_ID")]
    pub site_id: Option<String>,

    /// Only match deploys from this context (e.g. deploy-preview)
    #[arg(long, env = "INPUT_CONTEXT")]
    pub context: Option<String>,

    /// Seconds to wait for the preview URL to respond [default: 60]
    #[arg(long, env = "INPUT_MAX_TIMEOUT")]
    pub max_timeout: Option<String>,

    /// Commit SHA to wait for (defaults to the triggering CI event)
    #[arg(long)]
    pub commit: Option<String>,

    /// Netlify API base URL
    #[arg(long, env = "NETLIFY_API_URL")]
    pub api_url: Option<String>,

    /// Settings file (defaults to deploy-wait.yml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON events
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
            OutputMode::Github
        } else {
            OutputMode::Normal
        }
    }

    /// Raw inputs, with the commit already resolved from the CI event.
    pub fn inputs(&self, commit: Option<String>) -> Inputs {
        Inputs {
            token: self.token.clone(),
            site_id: self.site_id.clone(),
            context: self.context.clone(),
            max_timeout: self.max_timeout.clone(),
            commit,
            api_url: self.api_url.clone(),
        }
    }
}
