//! Filesystem abstraction for geolocal.
//!
//! This crate provides the Filesystem trait used to read configuration and
//! range files and to write built tables atomically, with a real and a mock
//! implementation.

pub mod filesystem;

pub use filesystem::{Filesystem, FsError, MockFilesystem, RealFilesystem};
