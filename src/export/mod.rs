//! Delivery of the flattened PNG to a destination.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::editor::{EditError, EditSession};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "painted-room.png";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export file name is empty or not a plain file name: {0:?}")]
    InvalidFileName(String),
    #[error("failed to write export: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Edit(#[from] EditError),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Destination for encoded PNG bytes.
pub trait ExportSink {
    fn deliver(&self, png: &[u8], file_name: &str) -> ExportResult<PathBuf>;
}

/// Writes exports into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryExport {
    dir: PathBuf,
}

impl DirectoryExport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for DirectoryExport {
    fn deliver(&self, png: &[u8], file_name: &str) -> ExportResult<PathBuf> {
        validate_file_name(file_name)?;
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, png).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn validate_file_name(file_name: &str) -> ExportResult<()> {
    let plain = Path::new(file_name)
        .file_name()
        .is_some_and(|name| name == file_name);
    if file_name.trim().is_empty() || !plain {
        return Err(ExportError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}

/// Flattens the session and hands the PNG to `sink` under the default name.
pub fn export_session(session: &EditSession, sink: &impl ExportSink) -> ExportResult<PathBuf> {
    let png = session.export_png()?;
    let path = sink.deliver(&png, DEFAULT_EXPORT_FILE_NAME)?;
    tracing::info!(bytes = png.len(), ?path, "exported painted image");
    Ok(path)
}
