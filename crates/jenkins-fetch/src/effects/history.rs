use std::iter::FusedIterator;

use tracing::debug;
use url::Url;

use crate::data::{BuildInfo, BuildMetadata};
use crate::effects::fetcher::Fetcher;
use crate::effects::http::HttpClient;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Walk {
    Active(String),
    Done,
}

/// Lazy walk over a job's builds, newest first, following `previousBuild`.
///
/// Each call to `next` performs one metadata fetch. The walk ends when a
/// build has no usable previous build, when the previous build is the stop
/// build (which is not fetched), or after yielding an error.
pub struct BuildHistory<'a, C: HttpClient> {
    fetcher: &'a Fetcher<C>,
    server: &'a Url,
    stop: Option<String>,
    state: Walk,
}

impl<'a, C: HttpClient> BuildHistory<'a, C> {
    pub fn new(fetcher: &'a Fetcher<C>, server: &'a Url, start: &str, stop: Option<&str>) -> Self {
        let state = if stop.is_some_and(|stop| same_build(stop, start)) {
            Walk::Done
        } else {
            Walk::Active(start.to_string())
        };

        Self {
            fetcher,
            server,
            stop: stop.map(str::to_string),
            state,
        }
    }

    /// The build the next step will fetch, if the walk is still active.
    pub fn current(&self) -> Option<&str> {
        match &self.state {
            Walk::Active(token) => Some(token),
            Walk::Done => None,
        }
    }

    fn advance(&self, current: &str, metadata: &BuildMetadata) -> Walk {
        let Some(previous) = metadata.previous_build.as_ref().and_then(BuildInfo::token) else {
            debug!(build = current, "no previous build");
            return Walk::Done;
        };

        if self
            .stop
            .as_deref()
            .is_some_and(|stop| same_build(stop, &previous))
        {
            debug!(build = current, stop = %previous, "reached stop build");
            return Walk::Done;
        }

        debug!(build = current, previous = %previous, "following previous build");
        Walk::Active(previous)
    }
}

impl<C: HttpClient> Iterator for BuildHistory<'_, C> {
    type Item = Result<BuildMetadata>;

    fn next(&mut self) -> Option<Self::Item> {
        let Walk::Active(current) = std::mem::replace(&mut self.state, Walk::Done) else {
            return None;
        };

        match self.fetcher.fetch_metadata(self.server, &current) {
            Ok(metadata) => {
                self.state = self.advance(&current, &metadata);
                Some(Ok(metadata))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl<C: HttpClient> FusedIterator for BuildHistory<'_, C> {}

// Numeric tokens compare by value so "07" and "7" name the same build.
fn same_build(a: &str, b: &str) -> bool {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_build_numeric() {
        assert!(same_build("7", "7"));
        assert!(same_build("07", "7"));
        assert!(!same_build("7", "8"));
    }

    #[test]
    fn test_same_build_symbolic() {
        assert!(same_build("lastSuccessfulBuild", "lastSuccessfulBuild"));
        assert!(!same_build("lastBuild", "7"));
    }
}
