use bytes::Bytes;

use crate::FetchError;

/// Binary type recovered from a content signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Jpeg,
    Gif,
    Png,
}

impl ContentKind {
    /// File extension used on disk.
    pub fn extension(&self) -> &'static str {
        match self {
            ContentKind::Jpeg => "jpg",
            ContentKind::Gif => "gif",
            ContentKind::Png => "png",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Content found at an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub identifier: String,
    /// Resolved path without leading separator or extension.
    pub file_stem:  String,
    pub kind:       ContentKind,
    pub bytes:      Bytes,
}

impl Hit {
    /// Name to persist under: the stem with the classified extension.
    pub fn file_name(&self) -> String { format!("{}.{}", self.file_stem, self.kind.extension()) }
}

/// Result of one probe that reached the server and was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Hit),
    NotFound,
}

impl Outcome {
    pub fn is_hit(&self) -> bool { matches!(self, Outcome::Found(_)) }
}

/// Hit, miss or transport error.
pub type FetchResult = Result<Outcome, FetchError>;
