use serde::{Deserialize, Serialize};

/// Response data of the single-file upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,
}
