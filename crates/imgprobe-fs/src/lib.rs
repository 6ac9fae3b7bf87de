//! Filesystem side of the probe pipeline.
//!
//! [`Store`] lays hits out as `<root>/<stem>.<ext>`, creating directories as
//! needed, and replaces files through a temporary sibling so a crash never
//! leaves a truncated image behind.

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{DEFAULT_FILE_MODE, Store};
