//! Command dispatch and handlers

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::instrument;

use crate::application::services::editor::AttributeEditor;
use crate::application::services::exchange;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{ExportAction, TreeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { file }) => _show(file),
        Some(Commands::Info { file }) => _info(file),
        Some(Commands::Edit {
            file,
            id,
            attributes,
            out,
            action,
        }) => _edit(file, id, attributes, out.as_deref(), *action),
        Some(Commands::Delete {
            file,
            id,
            out,
            action,
        }) => _delete(file, id, out.as_deref(), *action),
        Some(Commands::Export { file, out, action }) => _export(file, out.as_deref(), *action),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => {
            _completions(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Resolve the action tag: CLI flag wins over configured default.
fn resolve_action(cli_action: Option<ExportAction>, settings: &Settings) -> ExportAction {
    cli_action.unwrap_or(settings.action)
}

#[instrument]
fn _show(file: &Path) -> CliResult<()> {
    let store = exchange::import(file)?;
    if store.is_empty() {
        output::warning("hierarchy is empty");
        return Ok(());
    }
    for tree in store.to_tree_string() {
        output::info(&tree);
    }
    let unreachable = store.unreachable();
    if !unreachable.is_empty() {
        output::warning(&format!(
            "{} entities not reachable from any root",
            unreachable.len()
        ));
    }
    Ok(())
}

#[instrument]
fn _info(file: &Path) -> CliResult<()> {
    let store = exchange::import(file)?;
    let (has, link) = store.edge_counts();
    let used = store.serialize(ExportAction::Insert).types.len();

    output::header(&format!("{}", file.display()));
    output::detail(&format!(
        "types:     {} registered, {} used",
        store.types().count(),
        used
    ));
    output::detail(&format!("entities:  {}", store.len()));
    output::detail(&format!("edges:     {} HAS, {} LINK", has, link));
    output::detail(&format!("roots:     {}", store.roots().len()));
    output::detail(&format!("unreachable: {}", store.unreachable().len()));
    Ok(())
}

#[instrument(skip(attributes))]
fn _edit(
    file: &Path,
    id: &str,
    attributes: &str,
    out: Option<&Path>,
    action: Option<ExportAction>,
) -> CliResult<()> {
    let settings = Settings::load()?;
    let mut store = exchange::import(file)?;
    AttributeEditor::apply(&mut store, id, attributes)?;

    let out = out.unwrap_or(file);
    exchange::export(&store, out, resolve_action(action, &settings), settings.pretty)?;
    output::success(&format!("updated attributes of '{}' -> {}", id, out.display()));
    Ok(())
}

#[instrument]
fn _delete(
    file: &Path,
    id: &str,
    out: Option<&Path>,
    action: Option<ExportAction>,
) -> CliResult<()> {
    let settings = Settings::load()?;
    let mut store = exchange::import(file)?;
    if !store.contains(id) {
        return Err(crate::application::ApplicationError::NodeNotFound(id.to_string()).into());
    }
    let removed = store.delete_cascade(id);

    let out = out.unwrap_or(file);
    exchange::export(&store, out, resolve_action(action, &settings), settings.pretty)?;
    output::success(&format!(
        "deleted {} entities (subtree of '{}') -> {}",
        removed,
        id,
        out.display()
    ));
    Ok(())
}

#[instrument]
fn _export(file: &Path, out: Option<&Path>, action: Option<ExportAction>) -> CliResult<()> {
    let settings = Settings::load()?;
    let store = exchange::import(file)?;
    let action = resolve_action(action, &settings);

    let out = out.unwrap_or(file);
    exchange::export(&store, out, action, settings.pretty)?;
    output::success(&format!(
        "exported {} entities as {} -> {}",
        store.len(),
        action,
        out.display()
    ));
    Ok(())
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            if let Some(path) = global_config_path() {
                output::header(&format!("config file: {}", path.display()));
            }
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            output::info(&Settings::template());
            Ok(())
        }
    }
}

fn _completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
