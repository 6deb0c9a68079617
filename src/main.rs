use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use autoreview::review_config::DEFAULT_CONFIG_PATH;
use autoreview::settings::DEFAULT_API_URL;

mod cmd;

#[derive(Parser)]
#[command(name = "autoreview")]
#[command(
    version,
    about = "Request pull request reviewers from file globs, groups and per-author rules"
)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long,
        global = true,
        env = "AUTOREVIEW_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// GitHub token; falls back to GITHUB_TOKEN
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path of the reviewer configuration
    #[arg(long, env = "INPUT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Read the configuration from the local checkout
    #[arg(long, env = "INPUT_USE_LOCAL")]
    pub use_local: bool,

    /// Also check repository access of every configured reviewer
    #[arg(long, env = "INPUT_VALIDATE_ALL")]
    pub validate_all: bool,

    /// Pull-request event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Git ref to read the remote configuration from (default: PR head ref)
    #[arg(long, env = "GITHUB_REF")]
    pub git_ref: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request reviewers for the pull request in the event payload (default)
    Run(RunArgs),
    /// Check a configuration file and list every reviewer it names
    Validate {
        path: PathBuf,
    },
    /// Show the reviewers a pull request would get, without calling GitHub
    Resolve {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Pull-request author
        #[arg(long)]
        author: String,

        /// Seed for the reviewer cap sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Changed file paths
        files: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    autoreview::telemetry::init_tracing(cli.log_format == LogFormat::Json, level);

    match &cli.command {
        None => cmd::cmd_run(&cli.run).await?,
        Some(Commands::Run(args)) => cmd::cmd_run(args).await?,
        Some(Commands::Validate { path }) => cmd::cmd_validate(path)?,
        Some(Commands::Resolve {
            config,
            author,
            seed,
            files,
        }) => cmd::cmd_resolve(config, author, *seed, files)?,
    }

    Ok(())
}
