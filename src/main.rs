mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::error;

use spotr_setup::installer::InstallRequest;
use spotr_setup::{runners, wizard};

/// Append-only log for warnings and errors from failed requests.
const ERROR_LOG: &str = "error.log";

fn main() {
    init_logging();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: Failed to create async runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(real_main()) {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn);

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(ERROR_LOG)
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("could not open {ERROR_LOG}: {e}"),
    }
    builder.init();
}

async fn real_main() -> Result<()> {
    let args = cli::Args::parse();

    match args.sub {
        None => run_full_setup().await,
        Some(cli::Cmd::Install {
            directory,
            no_interaction,
        }) => {
            let directory = resolve_directory(directory);
            let request = InstallRequest::new(directory);
            if no_interaction {
                runners::run_install_plain(request).await
            } else {
                runners::run_install_interactive(request).await
            }
        }
        Some(cli::Cmd::Authorize { directory }) => {
            let directory = resolve_directory(directory);
            runners::run_authorization(&directory).await
        }
    }
}

/// Default wizard flow: screens, install, then authorization.
async fn run_full_setup() -> Result<()> {
    let options = wizard::run_wizard()?;

    let request = InstallRequest::new(options.directory.clone());
    runners::run_install_interactive(request).await?;

    if options.run_authorization {
        runners::run_authorization(&options.directory).await?;
    }

    wizard::show_completion(&options);
    Ok(())
}

fn resolve_directory(directory: Option<PathBuf>) -> PathBuf {
    directory.unwrap_or_else(wizard::default_install_dir)
}
