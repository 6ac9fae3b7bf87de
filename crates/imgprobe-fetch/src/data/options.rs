use std::sync::Arc;

use url::Url;

use crate::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://i.imgur.com/";

/// Appended to every identifier. The host serves any format under it.
pub const DEFAULT_SUFFIX: &str = ".png";

/// Redirect target meaning the identifier does not exist.
pub const DEFAULT_REMOVED_PATH: &str = "/removed.png";

/// Desktop Chrome request headers. The host answers scripted clients
/// differently without them.
pub fn browser_headers() -> Vec<(String, String)> {
    [
        ("authority", "i.imgur.com"),
        ("pragma", "no-cache"),
        ("cache-control", "no-cache"),
        (
            "sec-ch-ua",
            r#""Google Chrome";v="89", "Chromium";v="89", ";Not A Brand";v="99""#,
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("upgrade-insecure-requests", "1"),
        (
            "user-agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.90 Safari/537.36",
        ),
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9",
        ),
        ("dnt", "1"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-user", "?1"),
        ("sec-fetch-dest", "document"),
        ("accept-language", "en-GB,en;q=0.9"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

/// Where and how to probe.
///
/// # Examples
///
/// ```
/// use imgprobe_fetch::ProbeOptions;
///
/// let options = ProbeOptions::default()
///     .base_url("http://127.0.0.1:8080/")
///     .header("x-probe", "1");
///
/// let url = options.probe_url("abCD123").unwrap();
/// assert_eq!(url.as_str(), "http://127.0.0.1:8080/abCD123.png");
/// ```
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Base location every identifier is resolved against.
    ///
    /// Default: `https://i.imgur.com/`
    pub base_url: String,

    /// Fixed placeholder extension appended to the identifier. It does not
    /// reflect the real content type.
    ///
    /// Default: `.png`
    pub suffix: String,

    /// Final path after redirects that marks a miss.
    ///
    /// Default: `/removed.png`
    pub removed_path: String,

    /// Headers sent with every request.
    ///
    /// Default: [`browser_headers`]
    pub headers: Arc<[(String, String)]>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            base_url:     DEFAULT_BASE_URL.to_owned(),
            suffix:       DEFAULT_SUFFIX.to_owned(),
            removed_path: DEFAULT_REMOVED_PATH.to_owned(),
            headers:      browser_headers().into(),
        }
    }
}

impl ProbeOptions {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn removed_path(mut self, removed_path: impl Into<String>) -> Self {
        self.removed_path = removed_path.into();
        self
    }

    /// Replace the whole header set.
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Add or override one header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let mut headers: Vec<_> = self
            .headers
            .iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case(&key))
            .cloned()
            .collect();
        headers.push((key, value.into()));
        self.headers = headers.into();
        self
    }

    /// Address probed for `identifier`: `<base_url><identifier><suffix>`.
    pub fn probe_url(&self, identifier: &str) -> Result<Url, FetchError> {
        let raw = format!("{}{}{}", self.base_url, identifier, self.suffix);
        Url::parse(&raw).map_err(|e| FetchError::RequestConstruction {
            url:    raw,
            reason: e.to_string(),
        })
    }

    pub fn is_removed(&self, url: &Url) -> bool { url.path() == self.removed_path }
}
