use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use target_picker::cli::{Cli, Command};
use target_picker::commands;
use target_picker::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging based on verbosity. The TUI owns the terminal, so its
    // logs go to a file.
    let target = match cli.command {
        Command::Tui(_) => LogTarget::File(config.tui.log_path()),
        _ => LogTarget::Stderr,
    };
    init_logging(cli.verbose, cli.quiet, target);

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Tree(args) => {
            tracing::info!(?args, "Printing target tree");
            commands::tree::run(args, &config)?;
        }
        Command::Tui(args) => {
            tracing::info!(?args, "Starting TUI");
            commands::tui::run(args, &config)?;
        }
        Command::Completions(args) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Where log lines are written.
enum LogTarget {
    Stderr,
    /// Dropped when there is no usable file.
    File(Option<PathBuf>),
}

fn init_logging(verbosity: u8, quiet: bool, target: LogTarget) {
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let interactive = matches!(target, LogTarget::File(_));
    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 if interactive => "off",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if level == "off" => return,
        Err(_) => EnvFilter::new(format!("target_picker={}", level)),
    };

    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::File(Some(path)) => match open_log_file(&path) {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(err) => {
                eprintln!("warning: cannot open log file {}: {}", path.display(), err);
                BoxMakeWriter::new(std::io::sink)
            }
        },
        LogTarget::File(None) => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!interactive)
                .with_writer(writer),
        )
        .with(filter)
        .init();
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
