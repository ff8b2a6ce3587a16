//! In-memory Jenkins server for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::sync::Mutex;

use jenkins_fetch::HttpClient;
use serde_json::json;
use url::Url;

pub const SERVER: &str = "http://ci.test/job/app";

pub fn server() -> Url {
    Url::parse(SERVER).unwrap()
}

enum Route {
    Body(Vec<u8>),
    BreaksAfter(Vec<u8>),
}

/// Serves fixed bodies by URL and records every request.
#[derive(Default)]
pub struct MockServer {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.into(), Route::Body(body.into()));
        self
    }

    /// Serve `prefix`, then fail the read as a dropped connection would.
    pub fn route_broken(mut self, url: impl Into<String>, prefix: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.into(), Route::BreaksAfter(prefix.into()));
        self
    }

    /// Serve build `number` whose previous build is `previous`.
    pub fn build(self, number: u64, previous: Option<u64>) -> Self {
        let body = build_json(number, previous);
        self.route(format!("{SERVER}/{number}/api/json"), body)
    }

    /// Builds `1..=newest`, each linked to its predecessor.
    pub fn chain(newest: u64) -> Self {
        (1..=newest).fold(Self::new(), |server, n| {
            server.build(n, (n > 1).then(|| n - 1))
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockServer {
    type Error = io::Error;
    type Body = Box<dyn Read + Send>;

    fn get(&self, url: &str) -> Result<Self::Body, Self::Error> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(Route::Body(body)) => Ok(Box::new(Cursor::new(body.clone()))),
            Some(Route::BreaksAfter(prefix)) => {
                Ok(Box::new(Cursor::new(prefix.clone()).chain(BrokenPipe)))
            }
            None => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no route to {url}"),
            )),
        }
    }
}

struct BrokenPipe;

impl Read for BrokenPipe {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }
}

pub fn build_json(number: u64, previous: Option<u64>) -> Vec<u8> {
    let previous = previous.map(|p| json!({"number": p, "url": format!("{SERVER}/{p}/")}));
    serde_json::to_vec(&json!({
        "_class": "hudson.model.FreeStyleBuild",
        "id": number.to_string(),
        "result": if number % 2 == 0 { "SUCCESS" } else { "FAILURE" },
        "inProgress": false,
        "artifacts": [
            {"displayPath": "app.jar", "fileName": "app.jar", "relativePath": "target/app.jar"}
        ],
        "changeSets": [],
        "nextBuild": null,
        "previousBuild": previous,
    }))
    .unwrap()
}
