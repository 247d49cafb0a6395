//! Reading and writing table documents.

use std::path::Path;

use geolocal_core::{Table, TableError};
use geolocal_fs::{Filesystem, FsError};
use geolocal_schema::{DocumentError, TableDocument};
use thiserror::Error;

/// Errors from table file IO.
#[derive(Debug, Error)]
pub enum TableFileError {
    #[error("table file: {0}")]
    Fs(#[from] FsError),

    #[error("invalid table document {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: DocumentError,
    },

    #[error("invalid table {path}: {source}")]
    Table {
        path: String,
        #[source]
        source: TableError,
    },
}

/// Writes table documents through a [`Filesystem`].
pub struct TableWriter<'a, F: Filesystem> {
    fs: &'a F,
}

impl<'a, F: Filesystem> TableWriter<'a, F> {
    /// Create a new table writer.
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Write `doc` as JSON to `path`, creating the parent directory.
    pub fn write(&self, path: &Path, doc: &TableDocument) -> Result<(), TableFileError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }

        let mut json = doc.to_json();
        json.push('\n');
        self.fs.write_atomic(path, json.as_bytes())?;
        Ok(())
    }
}

/// Read a table written by [`TableWriter`].
pub fn read_table<F: Filesystem>(fs: &F, path: &Path) -> Result<Table, TableFileError> {
    let display = || path.display().to_string();

    let content = fs.read_file(path)?;
    let doc = TableDocument::from_json(&content).map_err(|e| TableFileError::Document {
        path: display(),
        source: e,
    })?;

    Table::from_document(&doc).map_err(|e| TableFileError::Table {
        path: display(),
        source: e,
    })
}
