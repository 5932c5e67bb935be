//! Curated EXIF metadata extraction for image byte streams.
//!
//! Walks the parsed EXIF tag tree of an image, picks a fixed subset of
//! camera and capture tags, and folds them into a flat [`ImageMetadata`]
//! record. Missing or damaged EXIF degrades to an empty record rather than
//! an error; only stream I/O faults and structural traversal failures reach
//! the caller.

pub mod config;
pub mod error;
pub mod extractor;
pub mod gps;
pub mod metadata;
pub mod value;
pub mod walk;

pub use crate::config::{ExtractorConfig, LogTarget};
pub use crate::error::ExtractError;
pub use crate::extractor::MetadataExtractor;
pub use crate::metadata::ImageMetadata;
