//! The rendered view
//!
//! A `View` is recomputed from scratch after every action: session state plus
//! a fresh listing of the two folders the user can see.

use serde::Serialize;

use crate::storage::{DeleteResult, Scope};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    LoggedOut,
    LoggedIn {
        username: String,
        department: String,
        department_files: Vec<String>,
        global_files: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
}

impl View {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, View::LoggedIn { .. })
    }

    /// Files listed for `scope`; empty when logged out.
    pub fn files(&self, scope: Scope) -> &[String] {
        match (self, scope) {
            (View::LoggedIn { department_files, .. }, Scope::Department) => department_files,
            (View::LoggedIn { global_files, .. }, Scope::Global) => global_files,
            (View::LoggedOut, _) => &[],
        }
    }
}

pub fn upload_notice(scope: Scope, original_name: &str) -> String {
    format!("File uploaded successfully to {}: {}", scope.label(), original_name)
}

pub fn delete_notice(scope: Scope, result: &DeleteResult) -> String {
    if result.deleted {
        format!("Deleted {} from {}", result.name, scope.label())
    } else {
        format!("{} was already gone from {}", result.name, scope.label())
    }
}
