use crate::core::{SignatureTable, derive_file_stem};
use crate::data::{FetchResult, Hit, Outcome, ProbeOptions};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::error::FetchError;

/// Fetches one identifier and classifies what comes back.
pub struct Prober<C: HttpClient> {
    client:     C,
    options:    ProbeOptions,
    signatures: SignatureTable,
}

impl<C: HttpClient> Prober<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options:    ProbeOptions::default(),
            signatures: SignatureTable::default(),
        }
    }

    pub fn with_options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_signatures(mut self, signatures: SignatureTable) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn options(&self) -> &ProbeOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    /// Probe `identifier` once.
    ///
    /// A redirect to the removed sentinel is [`Outcome::NotFound`] and the
    /// body is never read. Anything else must carry a known signature.
    pub async fn fetch(&self, identifier: &str) -> FetchResult {
        let url = self.options.probe_url(identifier)?;
        let url_str = url.to_string();
        tracing::debug!(identifier, url = %url_str, "probing");

        let request = self
            .client
            .request(url, &self.options.headers)
            .map_err(|e| FetchError::RequestConstruction {
                url:    url_str.clone(),
                reason: describe(&e),
            })?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::RequestExecution {
                url:    url_str.clone(),
                reason: describe(&e),
            })?;

        let final_url = response.final_url().clone();
        tracing::trace!(identifier, final_url = %final_url, "resolved");

        if self.options.is_removed(&final_url) {
            tracing::debug!(identifier, "redirected to removed sentinel");
            return Ok(Outcome::NotFound);
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::BodyRead {
            url:    url_str.clone(),
            reason: describe(&e),
        })?;

        let kind = self.signatures.classify(&url_str, &bytes)?;

        Ok(Outcome::Found(Hit {
            identifier: identifier.to_owned(),
            file_stem:  derive_file_stem(final_url.path(), identifier),
            kind,
            bytes,
        }))
    }
}

/// Render an error with its whole source chain.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
