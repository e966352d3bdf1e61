use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use axionax_core::error::GenesisError;
use tracing::info;

use crate::document::GenesisDocument;

/// Canonical bytes of a genesis document: pretty JSON plus a trailing newline.
/// Same document, same bytes.
pub fn to_genesis_bytes(doc: &GenesisDocument) -> Result<Vec<u8>, GenesisError> {
    let mut bytes = serde_json::to_vec_pretty(doc)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize `doc` and move it into place at `path` atomically.
pub fn write_genesis(doc: &GenesisDocument, path: &Path) -> Result<(), GenesisError> {
    let bytes = to_genesis_bytes(doc)?;
    write_atomic(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "genesis written");
    Ok(())
}

pub fn read_genesis(path: &Path) -> Result<GenesisDocument, GenesisError> {
    let bytes = std::fs::read(path).map_err(|e| GenesisError::io(path, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// `<path>.tmp` next to the target, so the final rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A fully written, fsynced temp file waiting to be renamed over its target.
///
/// Dropping it without [`StagedFile::commit`] removes the temp file, so an
/// aborted run leaves nothing behind.
#[derive(Debug)]
pub struct StagedFile {
    tmp: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename into place. On failure the temp file is removed.
    pub fn commit(mut self) -> Result<(), GenesisError> {
        std::fs::rename(&self.tmp, &self.target).map_err(|e| GenesisError::io(&self.target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.tmp);
        }
    }
}

/// Write `bytes` to `<path>.tmp` and fsync it, without touching `path`.
pub fn stage(path: &Path, bytes: &[u8]) -> Result<StagedFile, GenesisError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GenesisError::io(parent, e))?;
    }

    let staged = StagedFile {
        tmp: temp_path(path),
        target: path.to_path_buf(),
        committed: false,
    };
    File::create(&staged.tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .map_err(|e| GenesisError::io(&staged.tmp, e))?;
    Ok(staged)
}

/// Write to a sibling temp file, fsync, then rename over `path`.
///
/// Readers see either the previous file or the complete new one. On failure
/// the temp file is removed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), GenesisError> {
    stage(path, bytes)?.commit()
}
