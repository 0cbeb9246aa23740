//! Launcher script synthesis.
//!
//! The installed application is started through a small OS-native script
//! that forwards up to 7 positional arguments to the program entry point.

use std::path::{Path, PathBuf};

use super::error::InstallerError;

/// Script file name inside the application folder.
#[cfg(windows)]
pub const LAUNCHER_NAME: &str = "spotr.bat";
#[cfg(not(windows))]
pub const LAUNCHER_NAME: &str = "spotr.sh";

const ENTRY_POINT: &str = "spotr.py";

/// Write the launcher script into `app_dir` and make it invocable.
pub(super) async fn write_launcher(app_dir: &Path) -> Result<PathBuf, InstallerError> {
    let launcher_path = app_dir.join(LAUNCHER_NAME);
    let script = render_script(&app_dir.join(ENTRY_POINT));

    tokio::fs::write(&launcher_path, script)
        .await
        .map_err(|e| InstallerError::io(&launcher_path, e))?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&launcher_path, Permissions::from_mode(0o755))
            .await
            .map_err(|e| InstallerError::io(&launcher_path, e))?;
    }

    Ok(launcher_path)
}

fn render_script(entry: &Path) -> String {
    #[cfg(windows)]
    return format!(
        "@echo off\r\n\r\npython \"{}\" %1 %2 %3 %4 %5 %6 %7\r\n",
        entry.display()
    );

    #[cfg(not(windows))]
    format!(
        "#!/bin/sh\n\npython3 \"{}\" \"$1\" \"$2\" \"$3\" \"$4\" \"$5\" \"$6\" \"$7\"\n",
        entry.display()
    )
}
