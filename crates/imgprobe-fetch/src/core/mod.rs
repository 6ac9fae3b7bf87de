//! Core layer: pure classification and naming logic.

mod naming;
mod signature;

pub use naming::derive_file_stem;
pub use signature::{DEFAULT_SIGNATURES, SIGNATURE_LEN, SignatureTable};
