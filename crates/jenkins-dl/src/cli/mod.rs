use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use jenkins_fetch::ReqwestClient;
use reqwest::Url;

use crate::config::Config;

mod download;
mod get;
mod history;

#[derive(Clone, Debug, Parser)]
#[command(name = "jenkins-dl", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// URL of the Jenkins job to interact with
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Don't print periodic download progress
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v info, -vv debug); logs go to stderr
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file (default: <config dir>/jenkins-dl/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Get build metadata
    #[command(alias = "g", name = "get")]
    Get(get::GetArg),

    /// Download build artifacts
    #[command(alias = "dl", name = "download")]
    Download(download::DownloadArg),

    /// List builds, newest first
    #[command(alias = "h", name = "history")]
    History(history::HistoryArg),
}

/// Values every subcommand needs, resolved once from flags and config.
pub struct Context {
    pub server: Url,
    pub quiet: bool,
    pub client: ReqwestClient,
    pub config: Config,
}

pub fn run(app: App) -> Result<()> {
    let config = Config::load(app.config.as_deref())?;
    let server = config.server(app.server.as_deref())?;
    let quiet = app.quiet || config.quiet.unwrap_or(false);
    let client = ReqwestClient::new().context("Failed to build HTTP client")?;

    tracing::debug!(%server, quiet, "resolved settings");

    let ctx = Context {
        server,
        quiet,
        client,
        config,
    };

    match app.cmd {
        Commands::Get(arg) => get::run(&ctx, arg),
        Commands::Download(arg) => download::run(&ctx, arg),
        Commands::History(arg) => history::run(&ctx, arg),
    }
}
