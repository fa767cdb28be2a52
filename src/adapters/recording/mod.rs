//! Recording adapter that captures filesystem calls to a cassette.

pub mod filesystem;

pub use filesystem::RecordingFileSystem;
