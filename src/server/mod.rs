//! Server core functionality
//!
//! This module contains the listener, the shared request state, and the
//! startup and shutdown sequence.

pub mod core;
pub mod state;

pub use core::Server;
pub use state::AppState;
