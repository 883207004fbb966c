//! Session/UI controller
//!
//! Dispatches user actions against an explicit `Session` and recomputes the
//! view from fresh storage state afterwards. No state lives here besides the
//! read-only credential store and the storage manager.

pub mod view;

use log::{info, warn};
use std::path::PathBuf;
use tokio::io::AsyncRead;

use crate::auth::CredentialStore;
use crate::config::ServerConfig;
use crate::error::ShareError;
use crate::session::{LoginResult, LogoutResult, Session, process_login, process_logout};
use crate::storage::{DeleteResult, RetrieveResult, SaveResult, Scope, Storage};

pub use view::{View, delete_notice, upload_notice};

pub struct Controller {
    credentials: CredentialStore,
    storage: Storage,
}

impl Controller {
    pub fn new(credentials: CredentialStore, storage: Storage) -> Self {
        Self {
            credentials,
            storage,
        }
    }

    /// Loads credentials and builds the storage manager described by `config`
    pub fn from_config(config: &ServerConfig) -> Result<Self, ShareError> {
        let credentials =
            CredentialStore::load(&config.auth.credentials_file, config.auth.max_input_length)?;
        Ok(Self::new(credentials, Storage::from_config(config)))
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<LoginResult, ShareError> {
        Ok(process_login(
            session,
            &self.credentials,
            self.storage.layout(),
            username,
            password,
        )?)
    }

    pub fn logout(&self, session: &mut Session) -> LogoutResult {
        process_logout(session)
    }

    pub async fn upload<R>(
        &self,
        session: &Session,
        reader: R,
        filename: &str,
        scope: Scope,
        declared_len: Option<u64>,
    ) -> Result<SaveResult, ShareError>
    where
        R: AsyncRead + Unpin,
    {
        let folder = self.folder(session, scope)?;
        let saved = self
            .storage
            .save(reader, filename, &folder, declared_len)
            .await?;
        info!(
            "{} uploaded {} to {} ({} bytes)",
            session.username().unwrap_or("?"),
            saved.stored_name,
            scope,
            saved.size
        );
        Ok(saved)
    }

    pub async fn list(&self, session: &Session, scope: Scope) -> Result<Vec<String>, ShareError> {
        let folder = self.folder(session, scope)?;
        Ok(self.storage.list(&folder).await?)
    }

    pub async fn download(
        &self,
        session: &Session,
        scope: Scope,
        name: &str,
    ) -> Result<RetrieveResult, ShareError> {
        let folder = self.folder(session, scope)?;
        Ok(self.storage.open(&folder, name).await?)
    }

    pub async fn delete(
        &self,
        session: &Session,
        scope: Scope,
        name: &str,
    ) -> Result<DeleteResult, ShareError> {
        let folder = self.folder(session, scope)?;
        let result = self.storage.delete(&folder, name).await?;
        info!(
            "{} deleted {} from {} (existed: {})",
            session.username().unwrap_or("?"),
            name,
            scope,
            result.deleted
        );
        Ok(result)
    }

    /// Recomputes the whole view from the session and current folder contents.
    pub async fn render(&self, session: &Session, notice: Option<String>) -> Result<View, ShareError> {
        let Some(department) = session.department() else {
            return Ok(View::LoggedOut);
        };

        let department_files = self.list(session, Scope::Department).await?;
        let global_files = self.list(session, Scope::Global).await?;

        Ok(View::LoggedIn {
            username: session.username().unwrap_or_default().to_string(),
            department: department.name.clone(),
            department_files,
            global_files,
            notice,
        })
    }

    /// Renders the view that follows a completed upload or delete.
    ///
    /// The action has already happened, so a folder that cannot be listed is
    /// shown empty instead of turning the response into an error.
    pub async fn render_after_action(&self, session: &Session, notice: String) -> View {
        let Some(department) = session.department() else {
            return View::LoggedOut;
        };

        let department_files = self.list_or_empty(session, Scope::Department).await;
        let global_files = self.list_or_empty(session, Scope::Global).await;

        View::LoggedIn {
            username: session.username().unwrap_or_default().to_string(),
            department: department.name.clone(),
            department_files,
            global_files,
            notice: Some(notice),
        }
    }

    async fn list_or_empty(&self, session: &Session, scope: Scope) -> Vec<String> {
        match self.list(session, scope).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not refresh {} listing: {}", scope, e);
                Vec::new()
            }
        }
    }

    fn folder(&self, session: &Session, scope: Scope) -> Result<PathBuf, ShareError> {
        let department = session.require_department()?;
        Ok(self.storage.layout().folder(scope, department))
    }
}
