//! Transfer module
//!
//! Streams uploaded bytes to disk and file contents back to clients.

pub mod file_ops;

pub use file_ops::{receive_upload, stream_download};
