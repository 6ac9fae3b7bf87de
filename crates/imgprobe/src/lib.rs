//! Probe an image host for content at short identifiers.
//!
//! Identifiers come from an [`imgprobe_source::Source`], each one is fetched
//! and classified by an [`imgprobe_fetch::Prober`], and hits are written by
//! an [`imgprobe_fs::Store`]. [`Crawler`] ties the three together and routes
//! every outcome to a [`Reporter`] and an optional [`Notifier`].

pub mod cli;
pub mod config;
pub mod crawl;
pub mod logging;
pub mod notify;
pub mod report;

pub use config::{Config, ConfigError, Settings};
pub use crawl::{CrawlError, CrawlSummary, Crawler};
pub use notify::{DesktopNotifier, NotifyError, Notifier};
pub use report::{ConsoleReporter, QuietReporter, Reporter};
