//! I/O operations: HTTP requests, history traversal and artifact downloads.
//!
//! Every operation takes the server URL explicitly and talks to the network
//! through an [`HttpClient`], so tests can substitute an in-memory server.

mod download;
mod fetcher;
mod history;
mod http;
mod status;

pub use download::{DownloadOptions, DownloadReport, Downloader};
pub use fetcher::Fetcher;
pub use history::BuildHistory;
pub use http::HttpClient;
pub use status::{REPORT_THRESHOLD, StatusWriter};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
