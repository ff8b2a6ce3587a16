use std::io::Read;

/// Blocking HTTP client abstraction.
///
/// This trait provides the minimal interface needed by the fetcher and the
/// downloader: a GET whose body can be read incrementally. Implementations
/// handle their own redirect following and timeouts.
///
/// A non-200 status is not an error at this layer; the body is returned
/// as-is for the caller to interpret.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - In-memory servers for testing
pub trait HttpClient: Send + Sync {
    /// Error type for connection and protocol failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Response body, read as bytes arrive.
    type Body: Read;

    /// Issue a GET and return the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed (DNS failure,
    /// connection refused, protocol error).
    fn get(&self, url: &str) -> Result<Self::Body, Self::Error>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Error = C::Error;
    type Body = C::Body;

    fn get(&self, url: &str) -> Result<Self::Body, Self::Error> {
        (**self).get(url)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use reqwest::blocking::{Client, Response};

    /// Production HTTP client implementation using reqwest's blocking API.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Create a client without an overall request timeout, so long
        /// artifact transfers are not cut off.
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = Client::builder()
                .user_agent(concat!("jenkins-fetch/", env!("CARGO_PKG_VERSION")))
                .timeout(None::<std::time::Duration>)
                .build()?;
            Ok(Self { client })
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;
        type Body = Response;

        fn get(&self, url: &str) -> Result<Self::Body, Self::Error> {
            self.client.get(url).send()
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
