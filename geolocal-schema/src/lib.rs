//! geolocal Table Schema
//!
//! Defines the versioned document format for built lookup tables.

mod document;

pub use document::{
    BucketDocument, DocumentError, EntryPoint, Family, ParseFamilyError, TableDocument,
    SCHEMA_VERSION,
};
