use std::io::{self, Write};

use anyhow::{Context as _, Result};
use chrono::SecondsFormat;
use clap::Args;
use jenkins_fetch::{BuildMetadata, Fetcher, resolve_build};

use super::Context;

#[derive(Clone, Debug, Args)]
pub struct GetArg {
    /// Build to fetch (defaults to latest)
    #[arg(short, long, default_value = "")]
    pub build: String,

    /// Dump the server's JSON instead of a summary
    #[arg(short, long)]
    pub json: bool,

    /// Also list the commits recorded against each build
    #[arg(long)]
    pub changes: bool,

    /// Walk back through older builds, stopping before this one
    #[arg(long, conflicts_with = "all")]
    pub since: Option<String>,

    /// Walk back through every older build
    #[arg(long)]
    pub all: bool,

    /// Stop a walk after this many builds
    #[arg(long)]
    pub limit: Option<usize>,
}

impl GetArg {
    fn walks(&self) -> bool {
        self.all || self.since.is_some()
    }
}

pub fn run(ctx: &Context, arg: GetArg) -> Result<()> {
    let fetcher = Fetcher::new(&ctx.client);
    let build = resolve_build(&arg.build);
    let mut out = io::stdout().lock();

    if !arg.walks() {
        if arg.json {
            let raw = fetcher.fetch_raw(&ctx.server, build)?;
            out.write_all(&raw)?;
            writeln!(out)?;
        } else {
            let metadata = fetcher.fetch_metadata(&ctx.server, build)?;
            print_build(&mut out, build, &metadata, arg.changes)?;
        }
        return Ok(());
    }

    let history = fetcher
        .history(&ctx.server, build, arg.since.as_deref())
        .take(arg.limit.unwrap_or(usize::MAX));

    for (i, metadata) in history.enumerate() {
        let metadata = metadata?;
        if arg.json {
            // One re-encoded document per line while walking.
            serde_json::to_writer(&mut out, &metadata).context("encode build metadata")?;
            writeln!(out)?;
        } else {
            if i > 0 {
                writeln!(out)?;
            }
            let label = metadata.id.clone().unwrap_or_else(|| build.to_string());
            print_build(&mut out, &label, &metadata, arg.changes)?;
        }
    }

    Ok(())
}

fn print_build<W: Write>(
    out: &mut W,
    build: &str,
    metadata: &BuildMetadata,
    changes: bool,
) -> io::Result<()> {
    writeln!(out, "Build    {build}")?;
    writeln!(out, "ID       {}", metadata.display_id())?;
    writeln!(out, "Result   {}", metadata.display_result())?;
    if metadata.in_progress {
        writeln!(out, "Running  yes")?;
    }

    for artifact in &metadata.artifacts {
        writeln!(out, "Artifact {}", artifact.display_path)?;
    }

    if changes {
        for change in metadata.changes() {
            let when = change
                .timestamp
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_else(|| "<nil>".to_string());
            writeln!(
                out,
                "Change   {} {} {} {}",
                change.display_commit(),
                change.display_author(),
                when,
                change.display_msg()
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_build_with_placeholders() {
        let metadata = jenkins_fetch::decode(
            br#"{"artifacts": [{"displayPath": "lib/app.jar", "fileName": "app.jar", "relativePath": "lib/app.jar"}]}"#,
        )
        .unwrap();

        let mut out = Vec::new();
        print_build(&mut out, "lastSuccessfulBuild", &metadata, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Build    lastSuccessfulBuild\n\
             ID       <unknown>\n\
             Result   <nil>\n\
             Artifact lib/app.jar\n"
        );
    }

    #[test]
    fn test_print_build_with_changes() {
        let metadata = jenkins_fetch::decode(
            br#"{"id": "9", "result": "SUCCESS", "inProgress": false, "changeSets": [{"items": [
                {"commitId": "abc123", "timestamp": "1691515123000",
                 "author": {"fullName": "dev"}, "msg": "Fix build"}
            ]}]}"#,
        )
        .unwrap();

        let mut out = Vec::new();
        print_build(&mut out, "9", &metadata, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Result   SUCCESS\n"));
        assert!(text.contains("Change   abc123 dev 2023-08-08T17:18:43.000Z Fix build\n"));
    }
}
