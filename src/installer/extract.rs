//! Zip extraction for the downloaded release archive.

use std::path::Path;

use super::error::InstallerError;

/// Extract the whole archive into `target_dir`.
///
/// The zip work is CPU-bound, so it runs on `spawn_blocking`.
pub(super) async fn extract_archive(
    archive_path: &Path,
    target_dir: &Path,
) -> Result<(), InstallerError> {
    let archive_path = archive_path.to_path_buf();
    let target_dir = target_dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&archive_path)
            .map_err(|e| InstallerError::io(&archive_path, e))?;
        let mut archive = zip::ZipArchive::new(file)?;
        archive.extract(&target_dir)?;
        Ok::<_, InstallerError>(())
    })
    .await
    .map_err(|e| InstallerError::Task(e.to_string()))?
}
