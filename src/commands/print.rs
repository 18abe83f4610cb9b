use mealdesk::application::{error::AppError, feedback::Toast};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::invalid_input(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}

/// Toasts go to stderr so stdout stays machine-readable.
pub fn toast(toast: &Toast) {
    eprintln!("{toast}");
}
