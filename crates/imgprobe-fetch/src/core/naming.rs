/// Logical file stem for a resolved path.
///
/// Drops the leading `/` and the extension of the final segment, so
/// `/abCD123.png` becomes `abCD123`. Falls back to `identifier` when
/// nothing is left.
pub fn derive_file_stem(path: &str, identifier: &str) -> String {
    let trimmed = path.trim_start_matches('/');

    let last_segment_start = trimmed.rfind('/').map_or(0, |i| i + 1);
    let stem = match trimmed[last_segment_start..].rfind('.') {
        Some(dot) => &trimmed[..last_segment_start + dot],
        None => trimmed,
    };

    if stem.is_empty() || stem.ends_with('/') {
        identifier.to_owned()
    } else {
        stem.to_owned()
    }
}
