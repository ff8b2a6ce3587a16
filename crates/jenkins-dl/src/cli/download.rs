use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::Args;
use jenkins_fetch::{Artifact, DownloadOptions, Downloader, Fetcher, resolve_build};
use regex::Regex;
use tracing::warn;

use super::Context;

#[derive(Clone, Debug, Args)]
pub struct DownloadArg {
    /// Build to fetch (defaults to latest)
    #[arg(short, long, default_value = "")]
    pub build: String,

    /// Regex selecting which artifacts to fetch by display path (default all)
    #[arg(short, long)]
    pub artifact: Option<String>,

    /// Destination directory to download artifact(s) into (default .)
    #[arg(short, long)]
    pub dstdir: Option<PathBuf>,

    /// Replace artifacts if they already exist
    #[arg(short, long)]
    pub replace: bool,

    /// List the matching artifacts without downloading them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &Context, arg: DownloadArg) -> Result<()> {
    let filter = arg
        .artifact
        .or_else(|| ctx.config.artifact.clone())
        .unwrap_or_else(|| ".*".to_string());
    let filter =
        Regex::new(&filter).with_context(|| format!("invalid artifact filter {filter:?}"))?;

    let dstdir = arg
        .dstdir
        .or_else(|| ctx.config.dstdir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    check_dstdir(&dstdir)?;

    let options = DownloadOptions {
        replace: arg.replace || ctx.config.replace.unwrap_or(false),
        quiet: ctx.quiet,
    };

    let build = resolve_build(&arg.build);
    let metadata = Fetcher::new(&ctx.client).fetch_metadata(&ctx.server, build)?;
    let selected = select(&metadata.artifacts, &filter);
    if selected.is_empty() {
        warn!(filter = %filter, build, "no artifacts matched");
        return Ok(());
    }

    if arg.dry_run {
        for artifact in selected {
            println!(
                "{} -> {}",
                artifact.display_path,
                dstdir.join(&artifact.filename).display()
            );
        }
        return Ok(());
    }

    let downloader = Downloader::new(&ctx.client);
    for artifact in selected {
        downloader
            .download(&ctx.server, build, artifact, &dstdir, options)
            .with_context(|| format!("download {}", artifact.display_path))?;
    }

    Ok(())
}

/// Artifacts whose display path matches, in server order.
fn select<'a>(artifacts: &'a [Artifact], filter: &Regex) -> Vec<&'a Artifact> {
    artifacts
        .iter()
        .filter(|a| filter.is_match(&a.display_path))
        .collect()
}

fn check_dstdir(dir: &Path) -> Result<()> {
    let meta = fs::metadata(dir).with_context(|| format!("{}", dir.display()))?;
    if !meta.is_dir() {
        bail!("{}: is not a directory", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(path: &str) -> Artifact {
        Artifact {
            display_path: path.to_string(),
            filename: path.rsplit('/').next().unwrap().to_string(),
            relative_path: path.to_string(),
        }
    }

    #[test]
    fn test_select_keeps_server_order() {
        let artifacts = [
            artifact("build/libs/app.jar"),
            artifact("build/reports/tests.zip"),
            artifact("build/libs/app-sources.jar"),
        ];

        let picked = select(&artifacts, &Regex::new(r"\.jar$").unwrap());

        let names: Vec<_> = picked.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["app.jar", "app-sources.jar"]);
    }

    #[test]
    fn test_default_filter_selects_everything() {
        let artifacts = [artifact("a.txt"), artifact("b/c.bin")];
        assert_eq!(select(&artifacts, &Regex::new(".*").unwrap()).len(), 2);
    }

    #[test]
    fn test_check_dstdir() {
        let dir = tempfile::tempdir().unwrap();
        check_dstdir(dir.path()).unwrap();

        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();
        assert!(check_dstdir(&file).is_err());
        assert!(check_dstdir(&dir.path().join("absent")).is_err());
    }
}
