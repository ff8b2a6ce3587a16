use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use jenkins_fetch::{BuildMetadata, Fetcher, resolve_build};

use super::Context;

#[derive(Clone, Debug, Args)]
pub struct HistoryArg {
    /// Newest build to list (defaults to latest)
    #[arg(short, long, default_value = "")]
    pub build: String,

    /// Stop before this build
    #[arg(long)]
    pub since: Option<String>,

    /// List at most this many builds
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(ctx: &Context, arg: HistoryArg) -> Result<()> {
    let fetcher = Fetcher::new(&ctx.client);
    let mut out = io::stdout().lock();

    let history = fetcher
        .history(&ctx.server, resolve_build(&arg.build), arg.since.as_deref())
        .take(arg.limit.unwrap_or(usize::MAX));

    for metadata in history {
        writeln!(out, "{}", summary(&metadata?))?;
    }

    Ok(())
}

fn summary(metadata: &BuildMetadata) -> String {
    let state = if metadata.in_progress {
        "RUNNING".to_string()
    } else {
        metadata.display_result().to_string()
    };

    format!(
        "{:<8} {:<10} {} artifacts, {} changes",
        metadata.display_id().to_string(),
        state,
        metadata.artifacts.len(),
        metadata.changes().count()
    )
}
