//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::ExportAction;

/// Entity hierarchy manager: import, edit, prune and re-export three-sheet workbooks
#[derive(Parser, Debug)]
#[command(name = "assetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (repeat for more detail)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the hierarchy as a tree
    Show {
        /// Workbook file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print hierarchy statistics
    Info {
        /// Workbook file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Replace an entity's JSON attribute payload
    Edit {
        /// Workbook file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entity id
        id: String,
        /// New attribute payload (must parse as JSON)
        attributes: String,
        /// Output file (default: overwrite input)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Action tag for exported rows (default from config)
        #[arg(long, value_enum)]
        action: Option<ExportAction>,
    },

    /// Delete an entity and its full containment subtree
    Delete {
        /// Workbook file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entity id
        id: String,
        /// Output file (default: overwrite input)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Action tag for exported rows (default from config)
        #[arg(long, value_enum)]
        action: Option<ExportAction>,
    },

    /// Re-export a workbook (prunes unused types and dangling rows)
    Export {
        /// Workbook file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output file (default: overwrite input)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Action tag for exported rows (default from config)
        #[arg(long, value_enum)]
        action: Option<ExportAction>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a config file template
    Init,
}
