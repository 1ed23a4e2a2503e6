use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use relay_logging::relay_info;

use crate::{write_atomic, PersistError};

/// `downloaded-<unix millis>.html`
pub fn artifact_filename(at: DateTime<Utc>) -> String {
    filename_for(at.timestamp_millis())
}

/// Save delivered content under a fresh time-based name in `dir`.
///
/// When a file for the same millisecond already exists the stamp is bumped
/// until the name is free.
pub fn deliver_content(
    dir: &Path,
    content: &str,
    at: DateTime<Utc>,
) -> Result<PathBuf, PersistError> {
    let mut millis = at.timestamp_millis();
    let mut filename = filename_for(millis);
    while dir.join(&filename).exists() {
        millis += 1;
        filename = filename_for(millis);
    }
    let path = write_atomic(dir, &filename, content.as_bytes())?;
    relay_info!("Delivered {} bytes to {:?}", content.len(), path);
    Ok(path)
}

fn filename_for(millis: i64) -> String {
    format!("downloaded-{millis}.html")
}
