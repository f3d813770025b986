//! Single-file upload into the configured bucket

use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use super::{StorageError, StorageHandle};

/// Every object this service writes lives under this prefix.
pub const OBJECT_PREFIX: &str = "uploads";

/// An in-memory file as received from a client
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub data: Bytes,
    /// Only used to pick the object key's extension.
    pub filename: String,
    pub content_type: String,
}

/// Where an upload ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
    pub object_key: String,
    pub size: usize,
}

/// Text after the last `.` of `filename`, or `""` when there is none.
pub fn file_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

/// `uploads/<32 hex chars>.<extension>`
///
/// The dot is written even when `extension` is empty.
pub fn object_key(extension: &str) -> String {
    format!("{}/{}.{}", OBJECT_PREFIX, Uuid::new_v4().simple(), extension)
}

pub fn public_url(handle: &StorageHandle, key: &str) -> String {
    let settings = handle.settings();
    format!(
        "{}://{}/{}/{}",
        settings.scheme(),
        settings.endpoint,
        settings.bucket_name,
        key
    )
}

/// Upload `file` and return the URL (and key) it can be reached at.
///
/// Fails fast with [`StorageError::Unavailable`] when no handle exists;
/// nothing is sent to the store in that case.
pub async fn upload_file(
    handle: Option<&StorageHandle>,
    file: FileUpload,
) -> Result<StoredFile, StorageError> {
    let Some(handle) = handle else {
        error!("MinIO client is not available. Cannot upload {}", file.filename);
        return Err(StorageError::Unavailable(
            "storage client was not initialized".to_string(),
        ));
    };

    let key = object_key(file_extension(&file.filename));
    let size = file.data.len();

    if let Err(e) = handle
        .store()
        .put_object(handle.bucket(), &key, file.data, &file.content_type)
        .await
    {
        error!("Exception during MinIO upload of {}: {:#}", file.filename, e);
        return Err(StorageError::UploadFailed(format!("{:#}", e)));
    }

    let url = public_url(handle, &key);
    info!(
        filename = %file.filename,
        size,
        key = %key,
        "Successfully uploaded {} to {}",
        file.filename,
        url
    );
    Ok(StoredFile {
        url,
        object_key: key,
        size,
    })
}
