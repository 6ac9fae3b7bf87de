use std::path::PathBuf;

/// Failures of a file-backed source. These are logged, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open identifier file {}: {source}", path.display())]
    Unavailable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read identifier file {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("identifier file {} line {line} is not valid UTF-8", path.display())]
    InvalidLine { path: PathBuf, line: usize },
}
