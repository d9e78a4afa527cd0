//! pr-patch - contextual patches between two files or two directory trees.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use patch_config::PatchConfig;

mod commands;
mod local_tree;
mod logger;

/// Contextual line patches for code review
#[derive(Parser, Debug)]
#[command(name = "pr-patch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (default: .pr-patch.toml, then the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Patch between two versions of one file
    File {
        /// Original file (a missing file counts as empty)
        before: PathBuf,

        /// Changed file
        after: PathBuf,

        /// Path shown in the patch header (default: AFTER)
        #[arg(long)]
        path: Option<String>,

        /// First selected line of the original file (1-based)
        #[arg(long, requires = "left_end")]
        left_start: Option<usize>,

        /// Last selected line of the original file
        #[arg(long, requires = "left_start")]
        left_end: Option<usize>,

        /// First selected line of the changed file (1-based)
        #[arg(long, requires = "right_end")]
        right_start: Option<usize>,

        /// Last selected line of the changed file
        #[arg(long, requires = "right_start")]
        right_end: Option<usize>,

        /// Keep only the context around changes
        #[arg(long)]
        condense: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Patches for every changed file between two directory trees
    Tree {
        /// Directory holding the base revision
        base_dir: PathBuf,

        /// Directory holding the target revision
        target_dir: PathBuf,

        /// Keep only the context around changes
        #[arg(long)]
        condense: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = match PatchConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Command::File {
            before,
            after,
            path,
            left_start,
            left_end,
            right_start,
            right_end,
            condense,
            format,
        } => {
            let request = commands::FileRequest {
                before,
                after,
                path,
                left: left_start.zip(left_end),
                right: right_start.zip(right_end),
                condense,
            };
            commands::run_file(&config, &request, format).await
        }
        Command::Tree {
            base_dir,
            target_dir,
            condense,
            format,
        } => commands::run_tree(&config, &base_dir, &target_dir, condense, format).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
