//! User actions fed into the controller and the notices it raises on failure.

use directory_client::{ClientError, ErrorKind};
use shared::domain::EmployeeId;

use crate::ui::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Init,
    ChangePage(u32),
    /// Current contents of the search box after a keystroke.
    SearchInput(String),
    /// Search immediately, skipping the debounce.
    SearchCommit(String),
    ViewEmployee(EmployeeId),
    EditEmployee(EmployeeId),
    LoadStats,
    HealthCheck,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ChangePage(_) => "change_page",
            Self::SearchInput(_) => "search_input",
            Self::SearchCommit(_) => "search_commit",
            Self::ViewEmployee(_) => "view_employee",
            Self::EditEmployee(_) => "edit_employee",
            Self::LoadStats => "load_stats",
            Self::HealthCheck => "health_check",
        }
    }
}

impl From<Action> for UserAction {
    fn from(value: Action) -> Self {
        match value {
            Action::ChangePage(page) => Self::ChangePage(page),
            Action::ViewEmployee(id) => Self::ViewEmployee(id),
            Action::EditEmployee(id) => Self::EditEmployee(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeContext {
    LoadEmployees,
    LoadEmployee,
    LoadStats,
    HealthCheck,
}

impl NoticeContext {
    fn label(self) -> &'static str {
        match self {
            Self::LoadEmployees => "Failed to load employees",
            Self::LoadEmployee => "Failed to load employee",
            Self::LoadStats => "Failed to load statistics",
            Self::HealthCheck => "Health check failed",
        }
    }
}

/// A failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: ErrorKind,
    context: NoticeContext,
    message: String,
}

impl Notice {
    pub fn from_client_error(context: NoticeContext, err: &ClientError) -> Self {
        let message = match err {
            ClientError::Application(rejected) => format!("{}: {}", context.label(), rejected),
            other => format!("Connection error: {other}"),
        };
        Self {
            kind: err.kind(),
            context,
            message,
        }
    }

    /// The backend answered the health check but reported itself down.
    pub fn unhealthy(status: &str) -> Self {
        Self {
            kind: ErrorKind::Application,
            context: NoticeContext::HealthCheck,
            message: format!(
                "{}: backend reported status `{status}`",
                NoticeContext::HealthCheck.label()
            ),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn context(&self) -> NoticeContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
