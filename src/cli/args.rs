//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Standup helper: keep a participant roster, shuffle the speaking order, track absentees
#[derive(Parser, Debug)]
#[command(name = "standup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: $XDG_CONFIG_HOME/standup/standup.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved roster (overrides config)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's checklist (default)
    Show {
        /// Print the session as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set participants, one per line (args, file, or stdin)
    Set {
        /// Participant names
        #[arg(conflicts_with = "file")]
        names: Vec<String>,
        /// Read names from file ("-" for stdin)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Edit the participant list in $EDITOR
    Edit,

    /// Print the saved participant text
    Text,

    /// Randomize speaking order
    Shuffle {
        /// Seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Mark a participant absent
    Absent {
        /// Participant name
        name: String,
    },

    /// Set a participant's note (no text clears it)
    Note {
        /// Participant name
        name: String,
        /// Note text
        text: Vec<String>,
    },

    /// Tick a participant off the checklist
    Check {
        /// Participant name
        name: String,
        /// Remove the tick instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete all saved data
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config and store paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_subcommand_when_parsing_then_command_is_none() {
        let cli = Cli::try_parse_from(["standup", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn given_names_and_file_when_parsing_set_then_conflict() {
        let res = Cli::try_parse_from(["standup", "set", "Alice", "--file", "x.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn given_note_words_when_parsing_then_collected() {
        let cli = Cli::try_parse_from(["standup", "note", "Bob", "on", "call"]).unwrap();
        match cli.command {
            Some(Commands::Note { name, text }) => {
                assert_eq!(name, "Bob");
                assert_eq!(text, ["on", "call"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
