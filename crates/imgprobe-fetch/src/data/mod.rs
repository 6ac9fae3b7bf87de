//! Data layer: immutable probe configuration and outcome types.

mod options;
mod outcome;

pub use options::{DEFAULT_BASE_URL, DEFAULT_REMOVED_PATH, DEFAULT_SUFFIX, ProbeOptions, browser_headers};
pub use outcome::{ContentKind, FetchResult, Hit, Outcome};
