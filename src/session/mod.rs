//! Session management system
//!
//! Handles per-client session state, the in-memory session registry, and the
//! login/logout transitions.

pub mod operations;
pub mod registry;
pub mod results;
pub mod state;

pub use operations::{process_login, process_logout};
pub use registry::SessionRegistry;
pub use results::{LoginResult, LogoutResult};
pub use state::{Session, SessionState};
