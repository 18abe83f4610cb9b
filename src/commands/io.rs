use std::fs;
use std::path::Path;

use mealdesk::application::error::AppError;
use serde::de::DeserializeOwned;

pub fn read_text(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| {
        AppError::invalid_input(format!("cannot read `{}`: {source}", path.display()))
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_input(format!("`{}` is not a valid record: {e}", path.display()))
    })
}
