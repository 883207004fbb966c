//! Shared application state handed to every request handler.

use std::sync::Arc;

use crate::controller::Controller;
use crate::session::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(controller: Controller, sessions: SessionRegistry) -> Self {
        Self {
            controller: Arc::new(controller),
            sessions: Arc::new(sessions),
        }
    }
}
