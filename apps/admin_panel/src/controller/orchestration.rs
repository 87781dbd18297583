//! Turns typed commands into controller actions and dispatches them.

use std::sync::Arc;

use directory_client::DirectoryApi;
use shared::domain::EmployeeId;
use thiserror::Error;

use crate::{
    controller::{events::UserAction, view::ViewController},
    ui::{Action, RenderSink},
};

pub const USAGE: &str = "\
commands:
  page N        show page N
  type TEXT     type into the search box (debounced)
  search TEXT   search immediately
  view ID       show employee details
  edit ID       open the edit form for an employee
  click ACTION  follow a rendered data-action, e.g. change-page:2
  stats         reload statistics
  health        check the backend
  help          show this message
  quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Action(UserAction),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a rendered action")]
    UnknownAction(String),
    #[error("`{value}` is not a valid {argument}")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },
}

fn parse_number<T: std::str::FromStr>(
    command: &'static str,
    argument: &'static str,
    raw: &str,
) -> Result<T, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        argument,
        value: raw.to_string(),
    })
}

pub fn parse_command(line: &str) -> Result<PanelCommand, CommandError> {
    let line = line.trim_start();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };

    let action = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(PanelCommand::Help),
        "quit" | "exit" => return Ok(PanelCommand::Quit),
        "page" => UserAction::ChangePage(parse_number("page", "page number", rest.trim())?),
        "type" => UserAction::SearchInput(rest.to_string()),
        "search" => UserAction::SearchCommit(rest.trim().to_string()),
        "view" => UserAction::ViewEmployee(EmployeeId(parse_number(
            "view",
            "employee id",
            rest.trim(),
        )?)),
        "edit" => UserAction::EditEmployee(EmployeeId(parse_number(
            "edit",
            "employee id",
            rest.trim(),
        )?)),
        "click" => {
            let raw = rest.trim();
            if raw.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "click",
                    argument: "an action",
                });
            }
            Action::decode(raw)
                .map(UserAction::from)
                .ok_or_else(|| CommandError::UnknownAction(raw.to_string()))?
        }
        "stats" => UserAction::LoadStats,
        "health" => UserAction::HealthCheck,
        "init" | "reload" => UserAction::Init,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(PanelCommand::Action(action))
}

pub async fn dispatch<A, S>(controller: &Arc<ViewController<A, S>>, action: UserAction)
where
    A: DirectoryApi + 'static,
    S: RenderSink + 'static,
{
    tracing::debug!(action = action.name(), "dispatching user action");
    match action {
        UserAction::Init => controller.init().await,
        UserAction::ChangePage(page) => controller.change_page(page).await,
        UserAction::SearchInput(term) => controller.search_input(term),
        UserAction::SearchCommit(term) => {
            controller.cancel_pending_search();
            controller.commit_search(term).await
        }
        UserAction::ViewEmployee(id) => controller.view_employee(id).await,
        UserAction::EditEmployee(id) => controller.edit_employee(id).await,
        UserAction::LoadStats => controller.load_stats().await,
        UserAction::HealthCheck => {
            controller.check_health().await;
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
