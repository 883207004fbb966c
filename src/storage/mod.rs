//! File system storage management
//!
//! Handles the upload tree layout, file operations, and filename validation.

pub mod filesystem;
pub mod layout;
pub mod operations;
pub mod results;
pub mod validation;

pub use layout::{Department, Layout, Scope};
pub use operations::{Storage, UploadLimits};
pub use results::{DeleteResult, RetrieveResult, SaveResult};
