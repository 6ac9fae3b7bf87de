//! I/O operations: the HTTP client seam and the prober built on it.

mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod prober;

pub use http::{HttpClient, HttpResponse};
pub use prober::Prober;

#[cfg(feature = "reqwest")]
pub use http::{ClientSetting, ClientSettingError, ReqwestClient};
