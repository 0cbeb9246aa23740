use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "spotr-setup",
    version,
    about = "Install and authorize the Spotr terminal Spotify controller"
)]
pub struct Args {
    /// Sub-commands (install, authorize); the full wizard runs by default
    #[command(subcommand)]
    pub sub: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run only the installation
    Install {
        /// Destination directory (the Spotr folder is created inside it)
        #[arg(long, short = 'd')]
        directory: Option<PathBuf>,

        /// Non-interactive mode for scripted installs
        #[arg(long)]
        no_interaction: bool,
    },
    /// Run only the post-install Spotify/Genius authorization steps
    Authorize {
        /// Directory the application was installed into
        #[arg(long, short = 'd')]
        directory: Option<PathBuf>,
    },
}
