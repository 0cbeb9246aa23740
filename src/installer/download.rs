//! Streamed archive download into the target directory.

use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use super::error::InstallerError;

/// Name of the temporary archive file inside the target directory. Deleted
/// after extraction.
pub(super) const ARCHIVE_NAME: &str = "file.zip";

/// Download the release archive to `dest` with a streamed GET.
///
/// A non-success status is terminal for the run; there is no retry.
pub(super) async fn download_archive(
    client: &reqwest::Client,
    archive_url: &str,
    dest: &Path,
) -> Result<(), InstallerError> {
    let response = client.get(archive_url).send().await?;
    if !response.status().is_success() {
        return Err(InstallerError::Download {
            status: response.status().as_u16(),
        });
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| InstallerError::io(dest, e))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| InstallerError::io(dest, e))?;
    }
    file.flush()
        .await
        .map_err(|e| InstallerError::io(dest, e))?;

    Ok(())
}
