//! Top-level runners: interactive install with a progress bar, plain
//! non-interactive install, and the post-install authorization sequence.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Text};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::auth::{
    CredentialManager, CredentialProvider, GeniusToken, SpotifyAuthorization,
    providers::extract_authorization_code,
};
use crate::installer::{self, InstallEvent, InstallRequest};

/// Run one installation, rendering progress with an interactive bar.
pub async fn run_install_interactive(request: InstallRequest) -> Result<()> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("\n[{bar:50.green/blue}] {pos:>3}%  {msg}\n")
            .context("Invalid progress bar template")?
            .progress_chars("█▓░"),
    );

    let (mut events, handle) = installer::spawn_install(request);
    while let Some(event) = events.recv().await {
        match event {
            InstallEvent::Progress(progress) => {
                pb.set_position(u64::from(progress.percent));
                pb.set_message(progress.message);
            }
            InstallEvent::Warning(warning) => {
                pb.println(format!("⚠ {warning}"));
            }
            InstallEvent::Finished => break,
        }
    }

    handle.await.context("installation task panicked")??;
    pb.finish_with_message("Installation complete");
    Ok(())
}

/// Run one installation in non-interactive mode, printing each event.
pub async fn run_install_plain(request: InstallRequest) -> Result<()> {
    let (mut events, handle) = installer::spawn_install(request);
    while let Some(event) = events.recv().await {
        match event {
            InstallEvent::Progress(progress) => {
                eprintln!("[{:>3}%] {}", progress.percent, progress.message);
            }
            InstallEvent::Warning(warning) => {
                eprintln!("⚠ {warning}");
            }
            InstallEvent::Finished => break,
        }
    }
    handle.await.context("installation task panicked")??;
    Ok(())
}

/// Drive the two credential providers in sequence: Spotify (full
/// authorization-code exchange), then optionally Genius (pasted token).
pub async fn run_authorization(install_dir: &Path) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "\n🎵 Spotify authorization");
    let _ = stdout.reset();
    let _ = writeln!(
        stdout,
        "Create an application at https://developer.spotify.com/dashboard and"
    );
    let _ = writeln!(stdout, "enter its credentials below.\n");

    let client_id = Text::new("Spotify client id:")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    let client_secret = Text::new("Spotify client secret:")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;

    let mut manager = CredentialManager::open(install_dir)?;
    let spotify = SpotifyAuthorization::new(client_id, client_secret)?;

    // Opening the consent page is best-effort; the URL is printed as a
    // fallback so the flow can continue in any environment.
    if let Err(err) = spotify.begin_flow(manager.config()) {
        log::warn!("could not open browser: {err}");
        let _ = writeln!(
            stdout,
            "Open this URL manually:\n  {}",
            spotify.authorize_url()?
        );
    }
    let _ = writeln!(
        stdout,
        "\nApprove access in your browser. You will be redirected; paste the"
    );
    let _ = writeln!(stdout, "full redirect URL (or just the code) below.");

    let pasted = Text::new("Redirect URL or code:")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    let code = extract_authorization_code(&pasted)?;
    spotify
        .complete_flow(manager.config_mut(), &code)
        .await
        .context("Spotify authorization failed")?;

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
    let _ = writeln!(stdout, "✓ Spotify authorized");
    let _ = stdout.reset();

    let setup_genius = Confirm::new("Set up a Genius token for lyrics support?")
        .with_default(true)
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    if setup_genius {
        let genius = GeniusToken;
        if let Err(err) = genius.begin_flow(manager.config()) {
            log::warn!("could not open browser: {err}");
            let _ = writeln!(
                stdout,
                "Create a client at {} and copy its access token.",
                crate::auth::providers::GENIUS_AUTH_URL
            );
        }
        let token = Text::new("Genius access token:")
            .prompt()
            .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
        genius
            .complete_flow(manager.config_mut(), &token)
            .await
            .context("Genius token storage failed")?;

        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = writeln!(stdout, "✓ Genius token stored");
        let _ = stdout.reset();
    }

    Ok(())
}
