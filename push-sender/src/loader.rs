//! Loads push requests from JSON files.

use std::path::Path;

use push_common::PushRequest;

use crate::error::{Error, Result};

/// Read a request file such as
/// `{"apiKey": "...", "alert": "...", "recipient": "...", "extras": {...}}`.
///
/// Missing keys fail here; blank values are left for dispatch validation.
pub fn load_request(path: impl AsRef<Path>) -> Result<PushRequest> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::RequestFile(format!("{}: {}", path.display(), e)))?;

    let request: PushRequest = serde_json::from_str(&contents)
        .map_err(|e| Error::RequestFile(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(
        "Loaded push request from {} ({} extras)",
        path.display(),
        request.extras.len()
    );
    Ok(request)
}
