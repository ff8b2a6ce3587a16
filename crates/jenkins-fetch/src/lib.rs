//! Jenkins build metadata retrieval and streamed artifact downloads.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable metadata model and build identifiers
//! - [`core`] - Pure transformations (alias resolution, URL construction, formatting)
//! - [`effects`] - HTTP and filesystem I/O behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Explicit Context**: Server URL and verbosity are parameters, never process state
//! - **Raw or Typed**: Metadata is available as the literal response body or a decoded model
//! - **Lazy History**: [`BuildHistory`] fetches one build per step by following `previousBuild`
//! - **Streamed Downloads**: Artifacts are copied chunk by chunk through a [`StatusWriter`]

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{artifact_url, decode, metadata_url, resolve_build};
pub use data::{
    Artifact, BuildInfo, BuildMetadata, ChangeSet, ChangeSetAuthor, ChangeSetItem, ChangeSetPath,
    LAST_SUCCESSFUL_BUILD, LATEST_BUILD, Placeholder,
};
pub use effects::{
    BuildHistory, DownloadOptions, DownloadReport, Downloader, Fetcher, HttpClient, REPORT_THRESHOLD,
    StatusWriter,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, FsOp, MetadataSyntaxError, Result};
