//! HTTP presentation layer
//!
//! Maps the controller's actions onto routes, renders the page, and turns
//! errors into JSON responses.

pub mod handlers;
pub mod page;
pub mod responses;
pub mod routes;

pub use page::render_page;
pub use responses::{ErrorBody, SESSION_COOKIE};
pub use routes::build_router;
