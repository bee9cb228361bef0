//! Session token persistence

use std::{io::ErrorKind, path::Path};

use tokio::fs;

/// Reads a saved session token. A missing or blank file means no session.
pub(crate) async fn load(path: &Path) -> Result<Option<String>, String> {
    match fs::read_to_string(path).await {
        Ok(contents) => {
            let token = contents.trim();

            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(format!(
            "failed to read session file {}: {error}",
            path.display()
        )),
    }
}

/// Saves the session token, replacing any previous one.
pub(crate) async fn save(path: &Path, token: &str) -> Result<(), String> {
    fs::write(path, format!("{token}\n"))
        .await
        .map_err(|error| format!("failed to write session file {}: {error}", path.display()))
}
