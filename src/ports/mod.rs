//! Port traits defining external boundaries.
//!
//! The filesystem is the only boundary the prober crosses. Implementations
//! live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{DirListing, FileSystem, FsError};
