//! Interactive setup wizard: welcome, license, destination, confirmation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use inquire::{Confirm, Text};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::installer::APP_FOLDER;

/// Setup choices gathered from the interactive wizard.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Directory the `Spotr` folder is created inside.
    pub directory: PathBuf,
    /// Run the Spotify/Genius authorization steps after installing.
    pub run_authorization: bool,
}

const LICENSE_TEXT: &str = "\
MIT License

Copyright (c) 2023 Havard03

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.";

/// Default destination: the user's home directory.
pub fn default_install_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Display welcome banner
fn show_welcome() {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
    let _ = writeln!(
        stdout,
        "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    );
    let _ = stdout.reset();

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "\n                    S P O T R   S E T U P");
    let _ = stdout.reset();

    let _ = writeln!(
        stdout,
        "\n        Control your Spotify playback from the terminal"
    );

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
    let _ = writeln!(
        stdout,
        "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n"
    );
    let _ = stdout.reset();

    let _ = writeln!(stdout, "This wizard will:");
    let _ = writeln!(stdout, "  • Download the latest Spotr release");
    let _ = writeln!(stdout, "  • Install it into a directory of your choice");
    let _ = writeln!(stdout, "  • Write a launcher script and install dependencies");
    let _ = writeln!(stdout, "  • Connect your Spotify and Genius accounts\n");
}

/// Display the completion summary once everything ran.
pub fn show_completion(options: &SetupOptions) {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "\n✅ SETUP COMPLETE\n");
    let _ = stdout.reset();

    let _ = writeln!(stdout, "Installed to:");
    let _ = writeln!(
        stdout,
        "  {}",
        options.directory.join(APP_FOLDER).display()
    );
    let _ = writeln!(
        stdout,
        "\nNext: add the Spotr folder to your PATH and run `spotr`."
    );
}

/// Run the interactive wizard screens up to the pre-install confirmation.
pub fn run_wizard() -> Result<SetupOptions> {
    show_welcome();

    // License gate: the terms must be accepted before anything is installed.
    println!("{LICENSE_TEXT}\n");
    let accepted = Confirm::new("Do you accept the terms of the license agreement?")
        .with_default(false)
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    if !accepted {
        return Err(anyhow::anyhow!("License not accepted, setup cancelled"));
    }

    let default_dir = default_install_dir();
    let directory = Text::new("Installation directory:")
        .with_default(&default_dir.to_string_lossy())
        .with_help_message("The Spotr folder is created inside this directory")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;

    let run_authorization = Confirm::new("Set up Spotify and Genius authorization after install?")
        .with_default(true)
        .with_help_message("You can run `spotr-setup authorize` later instead")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;

    // Pre-install summary and final confirmation.
    println!("\n📋 Setup summary:");
    println!("  • Install into: {directory}");
    println!(
        "  • Authorization: {}",
        if run_authorization {
            "Spotify + Genius (after install)"
        } else {
            "skipped"
        }
    );
    println!();

    let proceed = Confirm::new("Proceed with these settings?")
        .with_default(true)
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    if !proceed {
        return Err(anyhow::anyhow!("Setup cancelled by user"));
    }

    Ok(SetupOptions {
        directory: PathBuf::from(directory),
        run_authorization,
    })
}
