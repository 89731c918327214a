//! Raw binary snapshot export and import.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use swirl_core::StepId;

use crate::continuum::Continuum;
use crate::error::SnapshotError;

/// Snapshot location `<dir>/<name>_<step>.bin`.
pub fn snapshot_path(dir: &Path, name: &str, step: StepId) -> PathBuf {
    dir.join(format!("{name}_{step}.bin"))
}

impl Continuum {
    /// Write the field's byte image to `<dir>/<name>_<step>.bin`.
    ///
    /// Creates `dir` if needed and overwrites an existing file. Returns
    /// the path written.
    pub fn export(&self, dir: &Path, name: &str, step: StepId) -> Result<PathBuf, SnapshotError> {
        fs::create_dir_all(dir).map_err(|source| SnapshotError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = snapshot_path(dir, name, step);
        fs::write(&path, bytemuck::cast_slice::<f64, u8>(self.as_slice())).map_err(|source| {
            SnapshotError::Io {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!("exported {} bytes to {}", self.byte_len(), path.display());
        Ok(path)
    }

    /// Replace the field with the byte image stored at `<dir>/<name>_<step>.bin`.
    ///
    /// The file must hold exactly [`byte_len`](Self::byte_len) bytes. On
    /// any error the field is left unchanged:
    /// - `Err(SnapshotError::Missing)` if the file does not exist;
    /// - `Err(SnapshotError::SizeMismatch)` if its size is wrong;
    /// - `Err(SnapshotError::Io)` for any other read failure.
    pub fn import(&mut self, dir: &Path, name: &str, step: StepId) -> Result<(), SnapshotError> {
        let path = snapshot_path(dir, name, step);
        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SnapshotError::Missing { path: path.clone() },
            _ => SnapshotError::Io {
                path: path.clone(),
                source,
            },
        })?;
        let expected = self.byte_len();
        if bytes.len() != expected {
            return Err(SnapshotError::SizeMismatch {
                path,
                expected,
                found: bytes.len(),
            });
        }
        bytemuck::cast_slice_mut::<f64, u8>(self.as_mut_slice()).copy_from_slice(&bytes);
        tracing::debug!("imported {} bytes from {}", expected, path.display());
        Ok(())
    }
}
