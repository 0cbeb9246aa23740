//! Materializes the Spotr application on disk and prepares it to run.
//!
//! The sequence is linear: download the release zip, extract it, swap it
//! into the canonical `Spotr` folder, start the dependency install, write
//! the launcher script, then start the application's own follow-up setup.
//! Progress is reported over a one-way channel so a front-end stays
//! responsive; the run itself happens on a background task.

mod download;
mod error;
mod extract;
mod launcher;
mod progress;

pub use error::InstallerError;
pub use launcher::LAUNCHER_NAME;
pub use progress::{InstallEvent, InstallProgress};

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use log::warn;
use tokio::sync::mpsc;

/// Zip archive of the application, served by GitHub for the main branch.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/TrashName1/spotr/archive/refs/heads/main.zip";

/// Canonical application folder created directly under the target directory.
pub const APP_FOLDER: &str = "Spotr";

/// Folder name the archive extracts to before the rename.
const EXTRACTED_FOLDER: &str = "spotr-main";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("spotr-setup/", env!("CARGO_PKG_VERSION"));
const EVENT_BUFFER: usize = 100;

#[cfg(windows)]
const PYTHON_COMMAND: &str = "python";
#[cfg(not(windows))]
const PYTHON_COMMAND: &str = "python3";

/// What one installation run operates on.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Target directory; created if absent. The `Spotr` folder lands inside.
    pub directory: PathBuf,
    /// Archive source. Overridable so tests can point at a stub server.
    pub archive_url: String,
    /// Program plus leading arguments for the dependency install; the
    /// requirements file path is appended. Empty disables the step.
    pub dependency_command: Vec<String>,
    /// Program plus leading arguments for the follow-up setup; the setup
    /// script path is appended. Empty disables the step.
    pub setup_command: Vec<String>,
}

impl InstallRequest {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            dependency_command: vec!["pip3".into(), "install".into(), "-r".into()],
            setup_command: vec![PYTHON_COMMAND.into()],
        }
    }

    pub fn with_archive_url(mut self, archive_url: impl Into<String>) -> Self {
        self.archive_url = archive_url.into();
        self
    }

    pub fn with_dependency_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_command = command.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_setup_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.setup_command = command.into_iter().map(Into::into).collect();
        self
    }
}

/// Run the installation on a background task.
///
/// Returns the event receiver and the join handle carrying the run result.
/// There is no internal lock: overlapping runs against the same directory
/// are the caller's responsibility to serialize.
pub fn spawn_install(
    request: InstallRequest,
) -> (
    mpsc::Receiver<InstallEvent>,
    tokio::task::JoinHandle<Result<(), InstallerError>>,
) {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let handle = tokio::spawn(async move { install(&request, tx).await });
    (rx, handle)
}

/// Execute the full installation sequence, emitting progress as it goes.
///
/// Progress percentages form the exact sequence 0, 50, 90, 93, 96, 100 on
/// a successful run. A download or filesystem failure is terminal; partial
/// state on disk is not rolled back.
pub async fn install(
    request: &InstallRequest,
    events: mpsc::Sender<InstallEvent>,
) -> Result<(), InstallerError> {
    let directory = &request.directory;

    send_progress(&events, 0, "Starting installation").await;
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| InstallerError::io(directory, e))?;

    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let archive_path = directory.join(download::ARCHIVE_NAME);
    download::download_archive(&client, &request.archive_url, &archive_path).await?;

    extract::extract_archive(&archive_path, directory).await?;
    tokio::fs::remove_file(&archive_path)
        .await
        .map_err(|e| InstallerError::io(&archive_path, e))?;

    // Replace any prior installation with the freshly extracted tree. The
    // remove and rename are separate steps, not an atomic swap.
    let app_dir = directory.join(APP_FOLDER);
    if tokio::fs::try_exists(&app_dir)
        .await
        .map_err(|e| InstallerError::io(&app_dir, e))?
    {
        tokio::fs::remove_dir_all(&app_dir)
            .await
            .map_err(|e| InstallerError::io(&app_dir, e))?;
    }
    let extracted = directory.join(EXTRACTED_FOLDER);
    tokio::fs::rename(&extracted, &app_dir)
        .await
        .map_err(|e| InstallerError::io(&extracted, e))?;
    send_progress(&events, 50, "Application files installed").await;

    // Third-party dependency install for the application itself. Failure is
    // surfaced as a warning event, never as a failed run.
    if let Some((program, args)) = request.dependency_command.split_first() {
        let mut install_deps = tokio::process::Command::new(program);
        install_deps.args(args).arg(app_dir.join("requirements.txt"));
        spawn_observed(events.clone(), "dependency install", install_deps);
    }
    send_progress(&events, 90, "Dependency install started").await;

    send_progress(&events, 93, "Creating launcher script").await;
    send_progress(&events, 96, format!("Writing {LAUNCHER_NAME}")).await;
    launcher::write_launcher(&app_dir).await?;
    send_progress(&events, 100, format!("Finished writing {LAUNCHER_NAME}")).await;

    let _ = events.send(InstallEvent::Finished).await;

    // Application-owned follow-up setup, same observable-failure treatment.
    if let Some((program, args)) = request.setup_command.split_first() {
        let mut setup = tokio::process::Command::new(program);
        setup.args(args).arg(app_dir.join("install.py"));
        spawn_observed(events, "follow-up setup", setup);
    }

    Ok(())
}

async fn send_progress(
    events: &mpsc::Sender<InstallEvent>,
    percent: u8,
    message: impl Into<String>,
) {
    // Best-effort: a dropped receiver does not stop the installation.
    let _ = events
        .send(InstallEvent::Progress(InstallProgress::new(
            percent, message,
        )))
        .await;
}

/// Spawn a side subprocess, keep its handle, and report a non-zero exit or
/// spawn failure as a warning event.
fn spawn_observed(
    events: mpsc::Sender<InstallEvent>,
    what: &'static str,
    mut command: tokio::process::Command,
) {
    command.stdout(Stdio::null()).stderr(Stdio::null());
    match command.spawn() {
        Ok(mut child) => {
            tokio::spawn(async move {
                let outcome = match child.wait().await {
                    Ok(status) if status.success() => return,
                    Ok(status) => format!("{what} exited with {status}"),
                    Err(e) => format!("{what} could not be waited on: {e}"),
                };
                warn!("{outcome}");
                let _ = events.send(InstallEvent::Warning(outcome)).await;
            });
        }
        Err(e) => {
            let outcome = format!("{what} could not be started: {e}");
            warn!("{outcome}");
            let _ = events.try_send(InstallEvent::Warning(outcome));
        }
    }
}
