//! CBIR Adapters - External adapters for cbir.
//!
//! This crate provides adapters for:
//! - Filesystem image database and query loading

pub mod fs;

pub use fs::{is_supported_image, load_image, FsImageSource};
