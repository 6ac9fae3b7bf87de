use std::io::Write;
use std::path::{Path, PathBuf};

use imgprobe_fetch::Hit;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Mode of saved images on unix, `rw-r--r--`.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Output directory for hits.
#[derive(Debug, Clone)]
pub struct Store {
    root:      PathBuf,
    file_mode: u32,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:      root.into(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }

    /// Unix permission bits for saved images. Ignored elsewhere.
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn file_mode(&self) -> u32 { self.file_mode }

    /// `<root>/<stem>.<classified extension>`
    pub fn path_for(&self, hit: &Hit) -> PathBuf { self.root.join(hit.file_name()) }

    /// Write a hit, creating the root and any intermediate directories.
    ///
    /// The bytes land in a temporary file next to the target first, so an
    /// existing image is replaced whole or not at all.
    pub fn persist(&self, hit: &Hit) -> Result<PathBuf> {
        let path = self.path_for(hit);
        let parent = path.parent().unwrap_or(&self.root);

        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;

        self.replace(parent, &path, &hit.bytes)?;
        tracing::debug!(path = %path.display(), bytes = hit.bytes.len(), "persisted hit");

        Ok(path)
    }

    fn replace(&self, dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".imgprobe-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(write_err)?;
        tmp.write_all(bytes).map_err(write_err)?;
        set_mode(&tmp, self.file_mode).map_err(write_err)?;

        // A failed rename hands the file back; dropping it removes it.
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(file: &NamedTempFile, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file().set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &NamedTempFile, _mode: u32) -> std::io::Result<()> { Ok(()) }
