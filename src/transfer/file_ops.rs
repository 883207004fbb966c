//! Module `file_ops`
//!
//! Moves file bytes between HTTP bodies and the upload tree. Uploads land in
//! a staging file first and are renamed into place only once complete, so a
//! rejected or interrupted upload never shows up in a listing.

use log::{error, info};
use std::path::Path;
use tokio::fs::{File, rename};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::error::StorageError;
use crate::storage::filesystem::discard;

/// Streams `reader` into `staging_path`, then renames it to `final_path`.
///
/// The running total is checked before every write, so at most one buffer
/// past the limit is ever read and nothing past it is written.
pub async fn receive_upload<R>(
    mut reader: R,
    staging_path: &Path,
    final_path: &Path,
    max_file_size: u64,
    buffer_size: usize,
) -> Result<u64, StorageError>
where
    R: AsyncRead + Unpin,
{
    info!(
        "Starting file upload: {} -> {}",
        staging_path.display(),
        final_path.display()
    );

    let mut staging_file = File::create(staging_path).await.map_err(|e| {
        error!(
            "Failed to create staging file {}: {}",
            staging_path.display(),
            e
        );
        StorageError::from(e)
    })?;

    let mut buffer = vec![0u8; buffer_size];
    let mut total_bytes_received = 0u64;

    loop {
        let n = match reader.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                error!("Upload stream failed after {total_bytes_received} bytes: {e}");
                drop(staging_file);
                discard(staging_path).await;
                return Err(StorageError::UploadInterrupted(e));
            }
        };

        // Check file size limit BEFORE writing (fail fast)
        total_bytes_received += n as u64;
        if total_bytes_received > max_file_size {
            error!(
                "File size limit exceeded: {total_bytes_received} bytes > {max_file_size} bytes"
            );
            drop(staging_file);
            discard(staging_path).await;
            return Err(StorageError::FileTooLarge {
                limit_bytes: max_file_size,
            });
        }

        if let Err(e) = staging_file.write_all(&buffer[..n]).await {
            error!(
                "Failed to write to staging file {}: {}",
                staging_path.display(),
                e
            );
            drop(staging_file);
            discard(staging_path).await;
            return Err(StorageError::from(e));
        }
    }

    // Ensure all data is written to disk
    if let Err(e) = staging_file.flush().await {
        error!(
            "Failed to flush staging file {}: {}",
            staging_path.display(),
            e
        );
        drop(staging_file);
        discard(staging_path).await;
        return Err(StorageError::from(e));
    }
    drop(staging_file);

    match rename(staging_path, final_path).await {
        Ok(_) => {
            info!(
                "File upload completed successfully: {} ({} bytes)",
                final_path.display(),
                total_bytes_received
            );
            Ok(total_bytes_received)
        }
        Err(e) => {
            error!(
                "Failed to rename {} to {}: {}",
                staging_path.display(),
                final_path.display(),
                e
            );
            discard(staging_path).await;
            Err(StorageError::from(e))
        }
    }
}

/// Turns an opened file into a chunked byte stream for a response body.
pub fn stream_download(file: File, buffer_size: usize) -> ReaderStream<File> {
    ReaderStream::with_capacity(file, buffer_size)
}
