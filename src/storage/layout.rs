//! Upload tree layout
//!
//! Maps departments and scopes onto folders below the upload root:
//!
//! ```text
//! uploads/
//!   .staging/          in-flight uploads, never listed
//!   global/            shared by every department
//!   <department-slug>/ one per configured department
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;

const STAGING_FOLDER: &str = ".staging";

/// A configured department: `name` is what credentials refer to, `slug` names its folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    pub name: String,
    pub slug: String,
}

impl Department {
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }
}

/// Which of the two folders visible to a user an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Department,
    Global,
}

impl Scope {
    /// Human label used in notices
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Department => "Department Folder",
            Scope::Global => "Global Folder",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Department => "department",
            Scope::Global => "global",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves folders for departments and scopes
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    global_folder: String,
    departments: Vec<Department>,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, global_folder: &str, departments: Vec<Department>) -> Self {
        Self {
            root: root.into(),
            global_folder: global_folder.to_string(),
            departments,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let departments = config
            .storage
            .departments
            .iter()
            .map(|d| Department::new(&d.name, &d.slug))
            .collect();
        Self::new(
            config.upload_root_path(),
            &config.storage.global_folder,
            departments,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Looks up a department by the name credentials use
    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_FOLDER)
    }

    pub fn global_dir(&self) -> PathBuf {
        self.root.join(&self.global_folder)
    }

    pub fn department_dir(&self, department: &Department) -> PathBuf {
        self.root.join(&department.slug)
    }

    /// Folder an action in `scope` touches for a member of `department`
    pub fn folder(&self, scope: Scope, department: &Department) -> PathBuf {
        match scope {
            Scope::Department => self.department_dir(department),
            Scope::Global => self.global_dir(),
        }
    }

    /// Every folder `ensure_layout` must create, root first
    pub fn all_folders(&self) -> Vec<PathBuf> {
        let mut folders = vec![self.root.clone(), self.staging_dir(), self.global_dir()];
        folders.extend(self.departments.iter().map(|d| self.department_dir(d)));
        folders
    }
}
