//! Probe a hosted image service for a single identifier and classify what
//! comes back.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and outcome types
//! - [`core`] - Pure transformations: signature lookup and file naming
//! - [`effects`] - I/O behind the [`HttpClient`] trait
//!
//! Each [`Prober::fetch`] call is one best-effort attempt. There are no
//! retries; timeouts belong to the client configuration.

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{SignatureTable, derive_file_stem};
pub use data::{ContentKind, FetchResult, Hit, Outcome, ProbeOptions};
pub use effects::{HttpClient, HttpResponse, Prober};

#[cfg(feature = "reqwest")]
pub use effects::{ClientSetting, ClientSettingError, ReqwestClient};

pub use error::{FetchError, FetchPhase};
