use std::io::Read;

use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::core::{decode, metadata_url};
use crate::data::BuildMetadata;
use crate::effects::history::BuildHistory;
use crate::effects::http::HttpClient;
use crate::error::{Error, Result};

/// Retrieves build metadata from a Jenkins job.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher with the provided HTTP client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch the literal `api/json` body for a build.
    ///
    /// The body is returned whatever the response status; interpreting it is
    /// up to the caller.
    pub fn fetch_raw(&self, server: &Url, build: &str) -> Result<Bytes> {
        let url = metadata_url(server, build);
        debug!(%url, "GET");

        let mut body = self
            .client
            .get(&url)
            .map_err(|e| Error::transport(&url, e))?;

        let mut raw = Vec::new();
        body.read_to_end(&mut raw)
            .map_err(|e| Error::transport(&url, e))?;

        debug!(%url, bytes = raw.len(), "received metadata");
        Ok(Bytes::from(raw))
    }

    /// Fetch and decode a build's metadata.
    pub fn fetch_metadata(&self, server: &Url, build: &str) -> Result<BuildMetadata> {
        let raw = self.fetch_raw(server, build)?;
        decode(&raw)
    }

    /// Walk the build history from `start` towards older builds.
    ///
    /// With `since`, the walk stops before yielding that build; without it,
    /// the walk runs back to the first build the server knows.
    pub fn history<'a>(
        &'a self,
        server: &'a Url,
        start: &str,
        since: Option<&str>,
    ) -> BuildHistory<'a, C> {
        BuildHistory::new(self, server, start, since)
    }
}
