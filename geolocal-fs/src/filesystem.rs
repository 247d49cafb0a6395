//! Filesystem seam for config, range and table files.
//!
//! Every error names the path it concerns, so callers only add what they
//! were doing with the file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("{}: no such file", path.display())]
    NotFound { path: PathBuf },

    #[error("{}: not a regular file path", path.display())]
    NotAFile { path: PathBuf },

    #[error("{}: contents are not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => FsError::NotUtf8 {
                path: path.to_path_buf(),
            },
            _ => FsError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFound { path }
            | FsError::NotAFile { path }
            | FsError::NotUtf8 { path }
            | FsError::Io { path, .. } => path,
        }
    }
}

/// File access used by the loaders and the table writer.
pub trait Filesystem: Send + Sync {
    /// Replace `path` with `data` in one step; readers never see a partial table.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Read a whole UTF-8 file.
    fn read_file(&self, path: &Path) -> Result<String, FsError>;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;
}

/// The host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let Some(file_name) = path.file_name() else {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_dir_all(parent)?;
        }

        // Sibling of the target so the rename never crosses filesystems
        let mut staged = file_name.to_os_string();
        staged.push(".partial");
        let staged = path.with_file_name(staged);

        fs::write(&staged, data).map_err(|e| FsError::io(&staged, e))?;
        fs::rename(&staged, path).map_err(|e| {
            let _ = fs::remove_file(&staged);
            FsError::io(path, e)
        })
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        if path.is_dir() {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        fs::read_to_string(path).map_err(|e| FsError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path).map_err(|e| FsError::io(path, e))
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem for tests. Clones share the same tree.
///
/// Writing a file implicitly creates its ancestors, like [`RealFilesystem`].
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    nodes: Arc<Mutex<BTreeMap<PathBuf, Node>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        let mut nodes = self.nodes.lock().unwrap();
        insert_ancestors(&mut nodes, &path);
        nodes.insert(path, Node::File(data.into()));
    }

    /// Contents of a file as text, if it exists and is UTF-8.
    pub fn get_text(&self, path: &Path) -> Option<String> {
        match self.nodes.lock().unwrap().get(path) {
            Some(Node::File(data)) => String::from_utf8(data.clone()).ok(),
            _ => None,
        }
    }

    /// Paths of every file, in order.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

fn insert_ancestors(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
    for dir in path.ancestors().skip(1) {
        if dir.as_os_str().is_empty() {
            break;
        }
        nodes.entry(dir.to_path_buf()).or_insert(Node::Dir);
    }
}

impl Filesystem for MockFilesystem {
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut nodes = self.nodes.lock().unwrap();
        if path.file_name().is_none() || matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        insert_ancestors(&mut nodes, path);
        nodes.insert(path.to_path_buf(), Node::File(data.to_vec()));
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        match self.nodes.lock().unwrap().get(path) {
            Some(Node::File(data)) => String::from_utf8(data.clone()).map_err(|_| FsError::NotUtf8 {
                path: path.to_path_buf(),
            }),
            Some(Node::Dir) => Err(FsError::NotAFile {
                path: path.to_path_buf(),
            }),
            None => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let mut nodes = self.nodes.lock().unwrap();
        if matches!(nodes.get(path), Some(Node::File(_))) {
            return Err(FsError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "file exists"),
            });
        }
        insert_ancestors(&mut nodes, path);
        nodes.insert(path.to_path_buf(), Node::Dir);
        Ok(())
    }
}
