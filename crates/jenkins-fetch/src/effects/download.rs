use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use indicatif::HumanCount;
use tracing::{info, warn};
use url::Url;

use crate::core::{artifact_url, format_decimal, kilobytes_per_second};
use crate::data::Artifact;
use crate::effects::http::HttpClient;
use crate::effects::status::{ERASE_LINE, START_OF_LINE, StatusWriter};
use crate::error::{Error, FsOp, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// How a download treats an existing destination and how much it prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Remove an existing destination file instead of failing.
    pub replace: bool,

    /// Suppress periodic progress lines. The final summary is still printed.
    pub quiet: bool,
}

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub bytes: u64,
    pub elapsed: Duration,
}

impl DownloadReport {
    pub fn kilobytes_per_second(&self) -> f64 {
        kilobytes_per_second(self.bytes, self.elapsed)
    }
}

/// Streams build artifacts to local files, one at a time.
///
/// A transfer that fails midway leaves the partial file in place; callers
/// that need all-or-nothing placement must download elsewhere and rename.
pub struct Downloader<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Downloader<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Download `artifact` into `dest_dir`, reporting progress on stdout.
    pub fn download(
        &self,
        server: &Url,
        build: &str,
        artifact: &Artifact,
        dest_dir: &Path,
        options: DownloadOptions,
    ) -> Result<DownloadReport> {
        let stdout = io::stdout();
        self.download_to(server, build, artifact, dest_dir, options, &mut stdout.lock())
    }

    /// Download `artifact` into `dest_dir`, writing progress and the final
    /// summary line to `out`.
    pub fn download_to<W: Write>(
        &self,
        server: &Url,
        build: &str,
        artifact: &Artifact,
        dest_dir: &Path,
        options: DownloadOptions,
        out: &mut W,
    ) -> Result<DownloadReport> {
        let destination = destination_path(dest_dir, artifact)?;
        prepare_destination(&destination, options.replace)?;

        let url = artifact_url(server, build, &artifact.relative_path);
        info!(%url, destination = %destination.display(), "downloading artifact");

        let mut body = self
            .client
            .get(&url)
            .map_err(|e| Error::transport(&url, e))?;
        let mut file = create_exclusive(&destination)?;

        let name = destination.display().to_string();
        let mut status = StatusWriter::new(&mut *out, name.as_str(), options.quiet);
        copy_body(&url, &mut body, &destination, &mut file, &mut status)?;

        let bytes = status.total();
        let elapsed = status.elapsed();
        drop(status);

        file.sync_all()
            .map_err(|e| Error::fs(FsOp::Sync, &destination, e))?;

        let report = DownloadReport {
            path: destination,
            bytes,
            elapsed,
        };
        info!(path = %name, bytes, "download finished");

        // The summary line is printed even in quiet mode.
        let _ = writeln!(
            out,
            "{ERASE_LINE}{START_OF_LINE}Downloaded {} {} bytes ({} KB/s)",
            name,
            HumanCount(bytes),
            format_decimal(report.kilobytes_per_second())
        )
        .and_then(|()| out.flush());

        Ok(report)
    }
}

fn copy_body<R: Read, W: Write>(
    url: &str,
    body: &mut R,
    destination: &Path,
    file: &mut File,
    status: &mut StatusWriter<W>,
) -> Result<()> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::transport(url, e)),
        };

        file.write_all(&buf[..n])
            .map_err(|e| Error::fs(FsOp::Write, destination, e))?;
        // Never fails: the status sink only counts and prints.
        let _ = status.write_all(&buf[..n]);
    }
}

/// `dest_dir/filename`, provided the artifact's file name is a single plain
/// path component.
fn destination_path(dest_dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    let name = artifact.filename.as_str();
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => {
            Ok(dest_dir.join(name))
        }
        _ => Err(Error::InvalidFileName(name.to_string())),
    }
}

fn prepare_destination(path: &Path, replace: bool) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) if !replace => Err(Error::DestinationExists {
            path: path.to_path_buf(),
        }),
        Ok(_) => {
            warn!(path = %path.display(), "replacing existing file");
            fs::remove_file(path).map_err(|e| Error::fs(FsOp::Remove, path, e))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::fs(FsOp::Stat, path, e)),
    }
}

// Exclusive create: a file that appeared after `prepare_destination` is
// reported as existing, never overwritten.
fn create_exclusive(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::DestinationExists {
                path: path.to_path_buf(),
            },
            _ => Error::fs(FsOp::Create, path, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(filename: &str) -> Artifact {
        Artifact {
            display_path: filename.to_string(),
            filename: filename.to_string(),
            relative_path: format!("target/{filename}"),
        }
    }

    #[test]
    fn test_destination_path_joins_plain_name() {
        let path = destination_path(Path::new("out"), &artifact("app-1.0.jar")).unwrap();
        assert_eq!(path, Path::new("out").join("app-1.0.jar"));
    }

    #[test]
    fn test_destination_path_rejects_escaping_names() {
        for name in ["", ".", "..", "../app.jar", "lib/app.jar", "/etc/passwd", "dir/", "a\\b"] {
            assert!(
                matches!(
                    destination_path(Path::new("out"), &artifact(name)),
                    Err(Error::InvalidFileName(_))
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_prepare_destination_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        prepare_destination(&dir.path().join("absent.bin"), false).unwrap();
    }

    #[test]
    fn test_prepare_destination_replace_of_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sub");
        fs::create_dir(&target).unwrap();

        assert!(matches!(
            prepare_destination(&target, true),
            Err(Error::Filesystem {
                op: FsOp::Remove,
                ..
            })
        ));
    }

    #[test]
    fn test_create_exclusive_reports_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("raced.bin");
        fs::write(&target, b"other writer").unwrap();

        assert!(matches!(
            create_exclusive(&target),
            Err(Error::DestinationExists { .. })
        ));
        assert_eq!(fs::read(&target).unwrap(), b"other writer");
    }
}
