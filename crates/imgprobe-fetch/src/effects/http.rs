use std::future::Future;

use bytes::Bytes;
use url::Url;

/// Asynchronous HTTP client abstraction.
///
/// Building a request and executing it are separate steps so a caller can
/// tell a malformed request apart from a failed exchange. Implementations
/// follow redirects themselves and own their timeout configuration.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - In-memory mocks for testing
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// A fully built request, ready to send.
    type Request: Send;

    type Response: HttpResponse<Error = Self::Error>;

    /// Build a GET request for `url` carrying `headers`.
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is invalid or the URL is
    /// not usable by this client.
    fn request(&self, url: Url, headers: &[(String, String)]) -> Result<Self::Request, Self::Error>;

    /// Send a request and wait for the response head.
    ///
    /// # Errors
    ///
    /// Returns an error on DNS failure, connection failure, timeout or a
    /// redirect loop.
    fn execute(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// Response whose body has not been read yet.
pub trait HttpResponse: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// URL after all redirects were followed.
    fn final_url(&self) -> &Url;

    /// Read the full body.
    fn bytes(self) -> impl Future<Output = Result<Bytes, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;
    use reqwest::{Client, Proxy, redirect};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ClientSettingError {
        #[error("invalid proxy URL {url}: {source}")]
        Proxy {
            url:    String,
            #[source]
            source: reqwest::Error,
        },

        #[error("failed to build client: {0}")]
        Build(#[source] reqwest::Error),
    }

    /// Transport configuration for [`ReqwestClient`].
    #[derive(Debug, Clone)]
    pub struct ClientSetting {
        /// Whole-request timeout. `None` waits forever.
        pub timeout:         Option<Duration>,
        pub connect_timeout: Option<Duration>,
        pub max_redirects:   usize,
        pub proxies:         Vec<Url>,
    }

    impl Default for ClientSetting {
        fn default() -> Self {
            Self {
                timeout:         Some(Duration::from_secs(30)),
                connect_timeout: Some(Duration::from_secs(10)),
                max_redirects:   10,
                proxies:         Vec::new(),
            }
        }
    }

    impl ClientSetting {
        pub fn build(self) -> Result<ReqwestClient, ClientSettingError> {
            let mut cb = Client::builder().redirect(redirect::Policy::limited(self.max_redirects));

            if let Some(timeout) = self.timeout {
                cb = cb.timeout(timeout);
            }
            if let Some(timeout) = self.connect_timeout {
                cb = cb.connect_timeout(timeout);
            }

            let (secure, insecure): (Vec<Url>, Vec<Url>) =
                self.proxies.into_iter().partition(|u| u.scheme() == "https");

            for u in secure {
                cb = cb.proxy(Proxy::https(u.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            for u in insecure {
                cb = cb.proxy(Proxy::http(u.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            let client = cb.build().map_err(ClientSettingError::Build)?;
            Ok(ReqwestClient { client })
        }
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Create a client with [`ClientSetting::default`].
        pub fn new() -> Result<Self, ClientSettingError> { ClientSetting::default().build() }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;
        type Request = reqwest::Request;
        type Response = reqwest::Response;

        fn request(
            &self,
            url: Url,
            headers: &[(String, String)],
        ) -> Result<Self::Request, Self::Error> {
            let mut request = self.client.get(url);

            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }

            request.build()
        }

        async fn execute(&self, request: Self::Request) -> Result<Self::Response, Self::Error> {
            self.client.execute(request).await
        }
    }

    impl HttpResponse for reqwest::Response {
        type Error = reqwest::Error;

        fn final_url(&self) -> &Url { self.url() }

        async fn bytes(self) -> Result<Bytes, Self::Error> { reqwest::Response::bytes(self).await }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSetting, ClientSettingError, ReqwestClient};
