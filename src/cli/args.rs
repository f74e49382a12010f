//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::config::AppConfig;
use crate::domain::interval::Interval;
use crate::domain::selection::Selection;
use crate::domain::sync_mode::SyncMode;

/// clipsync - mirror X selections into the Wayland clipboard
#[derive(Parser, Debug)]
#[command(name = "clipsync")]
#[command(version)]
#[command(
    about = "Continuously mirror the X clipboard and primary selection into the Wayland clipboard via wl-copy"
)]
#[command(long_about = None)]
pub struct Cli {
    /// Poll period and maximum wait before checking for shutdown (e.g. 300ms, 0.5s, 2s) [env: CLIPSYNC_INTERVAL]
    #[arg(short = 'i', long, value_name = "TIME")]
    pub interval: Option<String>,

    /// X display/socket to talk to [default: $DISPLAY]
    #[arg(long, value_name = "DISPLAY")]
    pub display: Option<String>,

    /// Emit verbose debug logs
    #[arg(long)]
    pub debug: bool,

    /// Re-check selections every interval instead of waiting for clipnotify
    #[arg(long)]
    pub poll: bool,

    /// Selection to mirror, repeatable [default: clipboard, primary]
    #[arg(short = 's', long = "selection", value_name = "SELECTION")]
    pub selections: Vec<SelectionArg>,

    /// Config file to read instead of the XDG default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command to run while syncing; clipsync exits with its status
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Config layer contributed by command-line flags
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            interval: self.interval.clone(),
            display: self.display.clone(),
            debug: if self.debug { Some(true) } else { None },
            mode: if self.poll {
                Some(SyncMode::Poll.to_string())
            } else {
                None
            },
            selections: if self.selections.is_empty() {
                None
            } else {
                Some(
                    self.selections
                        .iter()
                        .map(|s| Selection::from(*s).to_string())
                        .collect(),
                )
            },
        }
    }

    /// Wrapped command with a leading `--` separator removed
    pub fn wrapped_command(&self) -> Vec<String> {
        match self.command.split_first() {
            Some((first, rest)) if first == "--" => rest.to_vec(),
            _ => self.command.clone(),
        }
    }
}

/// Selection argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    Clipboard,
    Primary,
    Secondary,
}

impl From<SelectionArg> for Selection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Clipboard => Selection::Clipboard,
            SelectionArg::Primary => Selection::Primary,
            SelectionArg::Secondary => Selection::Secondary,
        }
    }
}

/// Fully resolved sync options
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub interval: Interval,
    pub display: Option<String>,
    pub debug: bool,
    pub mode: SyncMode,
    pub selections: Vec<Selection>,
    pub command: Vec<String>,
}
