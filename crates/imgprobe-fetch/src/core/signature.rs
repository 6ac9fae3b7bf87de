use once_cell::sync::Lazy;

use crate::{ContentKind, FetchError};

/// Bytes inspected at the start of a body.
pub const SIGNATURE_LEN: usize = 4;

/// JPEG, GIF and PNG magic numbers seen on the image host.
pub static DEFAULT_SIGNATURES: Lazy<SignatureTable> = Lazy::new(|| {
    let jpeg = [0xe0, 0xe1, 0xe2, 0xe8, 0xdb, 0xee, 0xfe]
        .into_iter()
        .map(|marker| ([0xff, 0xd8, 0xff, marker], ContentKind::Jpeg));

    SignatureTable::new(
        jpeg.chain([
            ([0x47, 0x49, 0x46, 0x38], ContentKind::Gif),
            ([0x89, 0x50, 0x4e, 0x47], ContentKind::Png),
        ])
        .collect(),
    )
});

/// Immutable lookup from a four-byte prefix to a content kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTable {
    entries: Vec<([u8; SIGNATURE_LEN], ContentKind)>,
}

impl Default for SignatureTable {
    fn default() -> Self { DEFAULT_SIGNATURES.clone() }
}

impl SignatureTable {
    pub fn new(entries: Vec<([u8; SIGNATURE_LEN], ContentKind)>) -> Self { Self { entries } }

    pub fn entries(&self) -> &[([u8; SIGNATURE_LEN], ContentKind)] { &self.entries }

    /// Kind whose signature starts `body`, if any.
    pub fn lookup(&self, body: &[u8]) -> Option<ContentKind> {
        let prefix = body.get(..SIGNATURE_LEN)?;
        self.entries
            .iter()
            .find(|(signature, _)| signature.as_slice() == prefix)
            .map(|(_, kind)| *kind)
    }

    /// Like [`lookup`](Self::lookup), but an unknown prefix is an error
    /// naming the offending bytes.
    pub fn classify(&self, url: &str, body: &[u8]) -> Result<ContentKind, FetchError> {
        self.lookup(body)
            .ok_or_else(|| FetchError::UnrecognizedSignature {
                url:    url.to_owned(),
                prefix: body[..body.len().min(SIGNATURE_LEN)].to_vec(),
            })
    }
}
