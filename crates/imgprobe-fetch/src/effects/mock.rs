//! In-memory [`HttpClient`] for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use url::Url;

use crate::effects::http::{HttpClient, HttpResponse};

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

#[derive(Debug, Clone)]
enum Route {
    Serve { final_path: String, body: Bytes },
    RejectRequest,
    FailExecute,
    FailBody { final_path: String },
}

/// Serves canned responses keyed by request path and records every path
/// that was executed.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    routes:    HashMap<String, Route>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    /// Answer `path` directly with `body`.
    pub fn serve(self, path: &str, body: impl Into<Bytes>) -> Self {
        self.redirect(path, path, body)
    }

    /// Answer `path` as if the server redirected to `final_path`.
    pub fn redirect(mut self, path: &str, final_path: &str, body: impl Into<Bytes>) -> Self {
        self.routes.insert(path.to_owned(), Route::Serve {
            final_path: final_path.to_owned(),
            body:       body.into(),
        });
        self
    }

    pub fn reject_request(mut self, path: &str) -> Self {
        self.routes.insert(path.to_owned(), Route::RejectRequest);
        self
    }

    pub fn fail_execute(mut self, path: &str) -> Self {
        self.routes.insert(path.to_owned(), Route::FailExecute);
        self
    }

    pub fn fail_body(mut self, path: &str) -> Self {
        self.routes.insert(path.to_owned(), Route::FailBody {
            final_path: path.to_owned(),
        });
        self
    }

    /// Paths executed so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct MockRequest {
    url: Url,
}

#[derive(Debug)]
pub struct MockResponse {
    url:  Url,
    body: Result<Bytes, MockError>,
}

impl HttpClient for MockClient {
    type Error = MockError;
    type Request = MockRequest;
    type Response = MockResponse;

    fn request(&self, url: Url, _headers: &[(String, String)]) -> Result<MockRequest, MockError> {
        match self.routes.get(url.path()) {
            Some(Route::RejectRequest) => Err(MockError(format!("cannot build {url}"))),
            _ => Ok(MockRequest { url }),
        }
    }

    async fn execute(&self, request: MockRequest) -> Result<MockResponse, MockError> {
        let path = request.url.path().to_owned();
        if let Ok(mut log) = self.requested.lock() {
            log.push(path.clone());
        }

        let resolve = |final_path: &str| {
            let mut url = request.url.clone();
            url.set_path(final_path);
            url
        };

        match self.routes.get(&path) {
            Some(Route::Serve { final_path, body }) => Ok(MockResponse {
                url:  resolve(final_path),
                body: Ok(body.clone()),
            }),
            Some(Route::FailBody { final_path }) => Ok(MockResponse {
                url:  resolve(final_path),
                body: Err(MockError("connection reset".into())),
            }),
            Some(Route::FailExecute) => Err(MockError("connection refused".into())),
            Some(Route::RejectRequest) | None => Err(MockError(format!("no route for {path}"))),
        }
    }
}

impl HttpResponse for MockResponse {
    type Error = MockError;

    fn final_url(&self) -> &Url { &self.url }

    async fn bytes(self) -> Result<Bytes, MockError> { self.body }
}
