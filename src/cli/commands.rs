//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::JobBoard;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::Company;
use crate::infrastructure::JsonStore;
use crate::model::flatten::{TITLE_COLUMN, VISIBLE_COLUMNS};
use crate::model::{ItemRole, ModelIndex, TreeModel};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    let db_path = cli.db.clone().unwrap_or_else(|| settings.db_path.clone());
    debug!("db_path: {}", db_path.display());

    match &cli.command {
        Some(Commands::Tree { ids }) => cmd_tree(&settings, db_path, *ids),
        Some(Commands::Roles { company_id }) => {
            output::table(&board(&settings, db_path).roles(company_id)?);
            Ok(())
        }
        Some(Commands::Recruiters { company_id }) => {
            output::table(&board(&settings, db_path).recruiters(company_id)?);
            Ok(())
        }
        Some(Commands::Interviews { role_id }) => {
            output::table(&board(&settings, db_path).interviews(role_id)?);
            Ok(())
        }
        Some(Commands::People { interview_id }) => {
            output::table(&board(&settings, db_path).interviewers(interview_id)?);
            Ok(())
        }
        Some(Commands::AddCompany { name, website }) => {
            let company = Company {
                uuid: String::new(),
                name: name.clone(),
                website: website.clone(),
                recruiters: Vec::new(),
                roles: Vec::new(),
            };
            let stored = board(&settings, db_path).save_company(&company)?;
            output::info(&stored.uuid);
            Ok(())
        }
        Some(Commands::RemoveRecruiter {
            company_id,
            person_id,
        }) => {
            board(&settings, db_path).delete_recruiter(person_id, company_id)?;
            Ok(())
        }
        Some(Commands::Search { term }) => cmd_search(&settings, db_path, term),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see 'nextjob --help'".to_string(),
        )),
    }
}

fn board(settings: &Settings, db_path: PathBuf) -> JobBoard<JsonStore> {
    JobBoard::new(JsonStore::new(db_path), settings.board_options())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: &Settings, db_path: PathBuf, ids: bool) -> CliResult<()> {
    let model = board(settings, db_path).company_tree(&settings.headers)?;
    let columns = if ids {
        model.index_count_columns(None)
    } else {
        VISIBLE_COLUMNS
    };
    output::info(&model.to_tree_string(columns));
    Ok(())
}

/// Title path from the top-level row down to `index`, e.g. `Acme > Engineer`.
fn title_path(model: &TreeModel, index: &ModelIndex) -> String {
    let mut titles = Vec::new();
    let mut current = Some(index.sibling_column(TITLE_COLUMN));
    while let Some(idx) = current {
        if let Some(title) = model.data(&idx, ItemRole::Display) {
            titles.push(title.to_string());
        }
        current = model.parent_of(&idx);
    }
    titles.reverse();
    titles.join(" > ")
}

#[instrument(skip(settings))]
fn cmd_search(settings: &Settings, db_path: PathBuf, term: &str) -> CliResult<()> {
    let (model, matches) = board(settings, db_path).search(&settings.headers, term)?;
    let visible: Vec<&ModelIndex> = matches
        .iter()
        .filter(|idx| idx.column() < VISIBLE_COLUMNS)
        .collect();
    if visible.is_empty() {
        output::info(&format!("no match for '{}'", term));
        return Ok(());
    }
    for idx in visible {
        let cell = model
            .data(idx, ItemRole::Display)
            .map(|v| v.to_string())
            .unwrap_or_default();
        output::matched(&title_path(&model, idx), &cell);
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".to_string())
            })?;
            output::info(&path.display());
            if !path.exists() {
                output::detail(&"(file does not exist, defaults apply)");
            }
        }
    }
    Ok(())
}
