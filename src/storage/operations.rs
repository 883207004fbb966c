//! Storage operations
//!
//! Handles file system operations for user actions including layout setup,
//! save, list, retrieve, and delete.

use log::{error, info, warn};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::AsyncRead;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::StorageError;
use crate::storage::filesystem::{create_directory, regular_file_len};
use crate::storage::layout::Layout;
use crate::storage::results::{DeleteResult, RetrieveResult, SaveResult};
use crate::storage::validation::{STORED_PREFIX_LEN, stored_name, validate_filename};
use crate::transfer::receive_upload;

/// Size and naming limits applied to uploads
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub max_filename_length: usize,
    pub buffer_size: usize,
}

impl UploadLimits {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes(),
            max_filename_length: config.limits.max_filename_length,
            buffer_size: config.storage.buffer_size,
        }
    }
}

/// Storage manager over the upload tree
#[derive(Debug, Clone)]
pub struct Storage {
    layout: Layout,
    limits: UploadLimits,
}

impl Storage {
    pub fn new(layout: Layout, limits: UploadLimits) -> Self {
        Self { layout, limits }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Layout::from_config(config), UploadLimits::from_config(config))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// Creates the base folder, staging, global and department folders. Safe to repeat.
    pub async fn ensure_layout(&self) -> Result<(), StorageError> {
        for folder in self.layout.all_folders() {
            if let Err(e) = create_directory(&folder).await {
                error!("Failed to create folder {}: {}", folder.display(), e);
                return Err(StorageError::from(e));
            }
        }

        info!(
            "Upload tree ready at {} ({} departments)",
            self.layout.root().display(),
            self.layout.departments().len()
        );
        Ok(())
    }

    /// Saves `reader` into `folder` as `{uuid}_{original_name}`.
    ///
    /// A declared length over the limit is refused before anything is written.
    pub async fn save<R>(
        &self,
        reader: R,
        original_name: &str,
        folder: &Path,
        declared_len: Option<u64>,
    ) -> Result<SaveResult, StorageError>
    where
        R: AsyncRead + Unpin,
    {
        validate_filename(original_name, self.limits.max_filename_length)?;

        if let Some(len) = declared_len {
            if len > self.limits.max_file_size {
                warn!(
                    "Rejected upload of {} before writing: declared {} bytes > {} bytes",
                    original_name, len, self.limits.max_file_size
                );
                return Err(StorageError::FileTooLarge {
                    limit_bytes: self.limits.max_file_size,
                });
            }
        }

        let stored_name = stored_name(Uuid::new_v4(), original_name);
        let staging_path = self.layout.staging_dir().join(&stored_name);
        let final_path = folder.join(&stored_name);

        let size = receive_upload(
            reader,
            &staging_path,
            &final_path,
            self.limits.max_file_size,
            self.limits.buffer_size,
        )
        .await?;

        Ok(SaveResult { stored_name, size })
    }

    /// Lists regular files in `folder`, sorted by name
    pub async fn list(&self, folder: &Path) -> Result<Vec<String>, StorageError> {
        let mut entries = fs::read_dir(folder).await.map_err(|e| {
            error!("Failed to list directory {}: {}", folder.display(), e);
            StorageError::from(e)
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(raw) => warn!("Skipping non UTF-8 file name {:?}", raw),
            }
        }
        files.sort();

        info!("Listed directory {} - {} files", folder.display(), files.len());
        Ok(files)
    }

    /// Opens a stored file for download
    pub async fn open(&self, folder: &Path, name: &str) -> Result<RetrieveResult, StorageError> {
        validate_filename(name, self.stored_name_limit())?;

        let path = folder.join(name);
        let size = regular_file_len(&path)
            .await?
            .ok_or_else(|| StorageError::FileNotFound(name.to_string()))?;

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::FileNotFound(name.to_string()));
            }
            Err(e) => {
                error!("Failed to open file {}: {}", path.display(), e);
                return Err(StorageError::from(e));
            }
        };

        info!("Prepared file retrieval for {} ({} bytes)", path.display(), size);
        Ok(RetrieveResult {
            name: name.to_string(),
            file,
            size,
        })
    }

    /// Deletes `name` from `folder`; a missing file is not an error
    pub async fn delete(&self, folder: &Path, name: &str) -> Result<DeleteResult, StorageError> {
        validate_filename(name, self.stored_name_limit())?;

        let path = folder.join(name);
        if regular_file_len(&path).await?.is_none() {
            info!("Nothing to delete at {}", path.display());
            return Ok(DeleteResult {
                name: name.to_string(),
                deleted: false,
            });
        }

        let deleted = match fs::remove_file(&path).await {
            Ok(_) => true,
            // Lost a race with another delete
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                error!("Failed to delete file {}: {}", path.display(), e);
                return Err(StorageError::from(e));
            }
        };

        info!("Deleted file {}", path.display());
        Ok(DeleteResult {
            name: name.to_string(),
            deleted,
        })
    }

    fn stored_name_limit(&self) -> usize {
        self.limits.max_filename_length + STORED_PREFIX_LEN
    }
}
