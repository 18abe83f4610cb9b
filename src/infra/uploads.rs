//! Single-file upload collaborator.

use std::path::Path;

use bytes::Bytes;
use mealdesk_api_types::uploads::UploadedFile;
use thiserror::Error;
use tokio::fs;
use tracing::info;

use super::rest::{ApiClient, ApiError, ApiRequest, MultipartForm};

const UPLOAD_PATH: &str = "upload";
const FILE_FIELD: &str = "file";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("upload path has no file name")]
    MissingFileName,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Sends one file to the upload endpoint and returns the stored URL.
#[derive(Clone, Debug)]
pub struct Uploader {
    client: ApiClient,
}

impl Uploader {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn upload_bytes(&self, file_name: &str, bytes: Bytes) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyPayload);
        }
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let size = bytes.len();
        let form = MultipartForm::new().file(FILE_FIELD, file_name, mime.essence_str(), bytes);

        let payload = self
            .client
            .send(ApiRequest::post(UPLOAD_PATH).multipart(form))
            .await?;
        let UploadedFile { url } = payload.into_data()?;
        info!(file_name, size, url = %url, "file uploaded");
        Ok(url)
    }

    pub async fn upload_path(&self, path: &Path) -> Result<String, UploadError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(UploadError::MissingFileName)?
            .to_string();
        let bytes = fs::read(path).await?;
        self.upload_bytes(&file_name, Bytes::from(bytes)).await
    }
}
