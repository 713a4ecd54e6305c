//! Command dispatch
//!
//! Each command loads settings, builds the service container and runs one
//! service call, then renders the result.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use chrono::Local;
use clap::CommandFactory;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::Absence;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{RngSource, StandupState};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{
    AssumeYes, CommandEditor, Confirmer, Editor, TerminalConfirmer,
};
use crate::infrastructure::InfraError;

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return cmd_completion(*shell);
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    debug!("store: {}", settings.store_path().display());
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => cmd_show(&container, false),
        Some(Commands::Show { json }) => cmd_show(&container, *json),
        Some(Commands::Set { names, file }) => cmd_set(&container, names, file.as_deref()),
        Some(Commands::Edit) => cmd_edit(&container),
        Some(Commands::Text) => cmd_text(&container),
        Some(Commands::Shuffle { seed }) => cmd_shuffle(&container, *seed),
        Some(Commands::Absent { name }) => cmd_absent(&container, name),
        Some(Commands::Note { name, text }) => cmd_note(&container, name, text),
        Some(Commands::Check { name, undo }) => cmd_check(&container, name, !*undo),
        Some(Commands::Reset { yes }) => cmd_reset(&container, *yes),
        Some(Commands::Config { command }) => cmd_config(&container, cli.config.as_deref(), command),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

#[derive(Serialize)]
struct ShowJson<'a> {
    date: String,
    #[serde(flatten)]
    state: &'a StandupState,
}

fn today(container: &ServiceContainer) -> CliResult<String> {
    let date = Local::now().date_naive();
    Ok(output::format_date(date, &container.settings.date_format)?)
}

fn print_checklist(container: &ServiceContainer, state: &StandupState) -> CliResult<()> {
    output::header("Welcome to Standup");
    output::info(&today(container)?);
    output::info("");
    if state.roster.is_empty() && state.absentees.is_empty() {
        output::detail("No participants yet. Add some with `standup set` or `standup edit`.");
        return Ok(());
    }
    print!("{}", output::render_checklist(state));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, json: bool) -> CliResult<()> {
    let state = container.standup.load()?;
    if json {
        let doc = ShowJson {
            date: today(container)?,
            state: &state,
        };
        let text = serde_json::to_string_pretty(&doc).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "serialize session".to_string(),
                source: Box::new(e),
            }
        })?;
        output::info(&text);
        return Ok(());
    }
    print_checklist(container, &state)
}

#[instrument(skip(container))]
fn cmd_set(container: &ServiceContainer, names: &[String], file: Option<&Path>) -> CliResult<()> {
    let raw = if !names.is_empty() {
        names.join("\n")
    } else {
        match file {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?,
            _ => read_stdin()?,
        }
    };

    let state = container.standup.submit(&raw)?;
    output::success(&format!("{} participants saved", state.roster.len()));
    print_checklist(container, &state)
}

fn read_stdin() -> CliResult<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        output::prompt("Enter participant names, one per line (Ctrl-D to finish):");
        println!();
    }
    let mut raw = String::new();
    stdin
        .read_to_string(&mut raw)
        .map_err(|e| InfraError::io("read stdin", e))?;
    Ok(raw)
}

#[instrument(skip(container))]
fn cmd_edit(container: &ServiceContainer) -> CliResult<()> {
    let current = container.standup.load()?;

    let file = tempfile::Builder::new()
        .prefix("standup-")
        .suffix(".txt")
        .tempfile()
        .map_err(|e| InfraError::io("create temp file", e))?;
    container
        .fs
        .write(file.path(), &current.roster_text)
        .map_err(|e| InfraError::io(format!("write {}", file.path().display()), e))?;

    let editor = CommandEditor::new(container.settings.editor.clone());
    editor.open(file.path()).map_err(|e| InfraError::Editor {
        message: e.to_string(),
    })?;

    let raw = container
        .fs
        .read_to_string(file.path())
        .map_err(|e| InfraError::io(format!("read {}", file.path().display()), e))?;
    if raw == current.roster_text {
        output::info("No changes.");
        return Ok(());
    }

    let state = container.standup.submit(&raw)?;
    output::success(&format!("{} participants saved", state.roster.len()));
    print_checklist(container, &state)
}

fn cmd_text(container: &ServiceContainer) -> CliResult<()> {
    let state = container.standup.load()?;
    print!("{}", state.roster_text);
    if !state.roster_text.is_empty() && !state.roster_text.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_shuffle(container: &ServiceContainer, seed: Option<u64>) -> CliResult<()> {
    let state = match seed {
        Some(seed) => container.standup.shuffle(&mut RngSource::seeded(seed))?,
        None => container.standup.shuffle(&mut RngSource::thread())?,
    };
    if state.roster.is_empty() {
        output::warning("roster is empty, nothing to shuffle");
        return Ok(());
    }
    output::action("Order", &output::speaking_order(&state));
    print_checklist(container, &state)
}

#[instrument(skip(container))]
fn cmd_absent(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let (state, absence) = container.standup.mark_absent(name)?;
    let name = name.trim();
    match absence {
        Absence::Moved => output::action("Absent", &name),
        Absence::Unlisted => {
            output::warning(&format!("{name} was not on the roster"));
            output::action("Absent", &name);
        }
        Absence::AlreadyAbsent => output::warning(&format!("{name} is already absent")),
    }
    print_checklist(container, &state)
}

#[instrument(skip(container))]
fn cmd_note(container: &ServiceContainer, name: &str, text: &[String]) -> CliResult<()> {
    let note = text.join(" ");
    let state = container.standup.set_note(name, &note)?;
    match state.note(name) {
        Some(note) => output::action(name, &note),
        None => output::action(name, &"note cleared"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, name: &str, checked: bool) -> CliResult<()> {
    let state = container.standup.set_checked(name, checked)?;
    print_checklist(container, &state)
}

#[instrument(skip(container))]
fn cmd_reset(container: &ServiceContainer, yes: bool) -> CliResult<()> {
    let confirmer: Box<dyn Confirmer> = if yes || !container.settings.confirm_reset {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirmer)
    };

    if container.standup.reset(confirmer.as_ref())? {
        output::success("All saved data cleared");
    } else {
        output::info("Reset cancelled, nothing changed.");
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    explicit: Option<&Path>,
    command: &ConfigCommands,
) -> CliResult<()> {
    let config_path = explicit.map(Path::to_path_buf).or_else(global_config_path);

    match command {
        ConfigCommands::Show => {
            print!("{}", container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match &config_path {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (missing)" };
                    output::info(&format!("config: {}{}", path.display(), state));
                }
                None => output::info("config: (no config directory)"),
            }
            output::info(&format!("store:  {}", container.settings.store_path().display()));
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = config_path.ok_or_else(|| {
                CliError::Usage("cannot determine config directory, use --config".to_string())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
