//! The probe loop: take an identifier, fetch it, route the outcome, wait.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use imgprobe_fetch::{FetchError, HttpClient, Outcome, Prober};
use imgprobe_fs::Store;
use imgprobe_source::Source;
use thiserror::Error;

use crate::notify::{HIT_TITLE, Notifier};
use crate::report::{QuietReporter, Reporter};

/// Fatal crawl failure. The crawl stops at the first one.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("probing {identifier} failed")]
    Fetch {
        identifier: String,
        #[source]
        source:     FetchError,
    },

    #[error("saving {identifier} failed")]
    Persist {
        identifier: String,
        #[source]
        source:     imgprobe_fs::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub attempts:    u64,
    pub hits:        u64,
    pub misses:      u64,
    /// Stopped by the shutdown signal rather than exhaustion.
    pub interrupted: bool,
}

pub struct Crawler<C: HttpClient> {
    prober:   Prober<C>,
    store:    Store,
    reporter: Box<dyn Reporter>,
    notifier: Option<Box<dyn Notifier>>,
    delay:    Duration,
}

impl<C: HttpClient> Crawler<C> {
    pub fn new(prober: Prober<C>, store: Store) -> Self {
        Self {
            prober,
            store,
            reporter: Box::new(QuietReporter),
            notifier: None,
            delay:    Duration::ZERO,
        }
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Pause after every handled outcome. Zero disables it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn prober(&self) -> &Prober<C> { &self.prober }

    /// Crawl until `source` is exhausted or a fatal error occurs.
    pub async fn run(&mut self, source: &mut dyn Source) -> Result<CrawlSummary, CrawlError> {
        self.run_until(source, std::future::pending()).await
    }

    /// Like [`run`](Self::run), but also stops when `shutdown` completes.
    ///
    /// The source is released on every exit path.
    pub async fn run_until<F>(
        &mut self,
        source: &mut dyn Source,
        shutdown: F,
    ) -> Result<CrawlSummary, CrawlError>
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        let result = self.drive(source, shutdown.as_mut()).await;

        source.release();
        self.reporter.finish(result.as_ref().ok());

        match &result {
            Ok(summary) => tracing::info!(
                attempts = summary.attempts,
                hits = summary.hits,
                misses = summary.misses,
                interrupted = summary.interrupted,
                "crawl finished"
            ),
            Err(e) => tracing::error!("crawl aborted: {e}"),
        }

        result
    }

    async fn drive<F>(
        &mut self,
        source: &mut dyn Source,
        mut shutdown: Pin<&mut F>,
    ) -> Result<CrawlSummary, CrawlError>
    where
        F: Future<Output = ()>,
    {
        let mut summary = CrawlSummary::default();

        while source.has_more() {
            let Some(identifier) = source.take_next() else {
                break;
            };
            self.reporter.attempt(&identifier);

            let result = tokio::select! {
                biased;
                () = &mut shutdown => {
                    summary.interrupted = true;
                    break;
                }
                result = self.prober.fetch(&identifier) => result,
            };
            summary.attempts += 1;

            let outcome = result.map_err(|source| CrawlError::Fetch {
                identifier: identifier.clone(),
                source,
            })?;

            match outcome {
                Outcome::Found(hit) => {
                    self.store.persist(&hit).map_err(|source| CrawlError::Persist {
                        identifier: identifier.clone(),
                        source,
                    })?;
                    summary.hits += 1;
                    self.reporter.hit(&identifier, summary.hits);
                    self.notify_hit(&identifier);
                }
                Outcome::NotFound => {
                    summary.misses += 1;
                    self.reporter.miss(&identifier, summary.hits);
                }
            }

            if !self.delay.is_zero() {
                tokio::select! {
                    biased;
                    () = &mut shutdown => {
                        summary.interrupted = true;
                        break;
                    }
                    () = tokio::time::sleep(self.delay) => {}
                }
            }
        }

        Ok(summary)
    }

    fn notify_hit(&self, identifier: &str) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if let Err(e) = notifier.notify(HIT_TITLE, identifier) {
            tracing::warn!(identifier, "{e}");
        }
    }
}
