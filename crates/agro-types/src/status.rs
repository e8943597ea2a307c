//! Status enumerations and their display mapping.
//!
//! Every domain has one tagged enumeration and one exhaustive `view()`
//! function. The mapping is pure: a status code always yields the same
//! [`StatusView`], whatever else is on screen. Codes the client does not know
//! are kept in an `Unknown` variant and render as [`StatusView::UNKNOWN`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display data for a status: a translation key and a CSS-style state class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusView {
    pub label_key: &'static str,
    pub css_class: &'static str,
}

impl StatusView {
    pub const UNKNOWN: StatusView = StatusView::new("status.unknown", "estado-desconocido");

    const fn new(label_key: &'static str, css_class: &'static str) -> Self {
        Self {
            label_key,
            css_class,
        }
    }
}

/// Status of an advisory or workshop request (solicitud).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum RequestStatus {
    Pending,
    /// Accepted by the advisor; workshop requests then await payment.
    Accepted,
    Rejected,
    /// Payment proof submitted, waiting for the advisor to validate it.
    InReview,
    Completed,
    Unknown(i64),
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
        RequestStatus::InReview,
        RequestStatus::Completed,
    ];

    pub fn code(self) -> i64 {
        match self {
            RequestStatus::Pending => 1,
            RequestStatus::Accepted => 2,
            RequestStatus::Rejected => 3,
            RequestStatus::InReview => 4,
            RequestStatus::Completed => 5,
            RequestStatus::Unknown(code) => code,
        }
    }

    pub fn view(self) -> StatusView {
        match self {
            RequestStatus::Pending => StatusView::new("status.request.pending", "estado-pendiente"),
            RequestStatus::Accepted => StatusView::new("status.request.accepted", "estado-aceptada"),
            RequestStatus::Rejected => StatusView::new("status.request.rejected", "estado-rechazada"),
            RequestStatus::InReview => StatusView::new("status.request.in_review", "estado-revision"),
            RequestStatus::Completed => StatusView::new("status.request.completed", "estado-finalizada"),
            RequestStatus::Unknown(_) => StatusView::UNKNOWN,
        }
    }
}

impl From<i64> for RequestStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => RequestStatus::Pending,
            2 => RequestStatus::Accepted,
            3 => RequestStatus::Rejected,
            4 => RequestStatus::InReview,
            5 => RequestStatus::Completed,
            other => RequestStatus::Unknown(other),
        }
    }
}

impl From<RequestStatus> for i64 {
    fn from(status: RequestStatus) -> Self {
        status.code()
    }
}

/// Schedule status of a workshop offering (taller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum WorkshopStatus {
    Upcoming,
    InProgress,
    Completed,
    Rejected,
    InReview,
    Overdue,
    Unknown(i64),
}

impl WorkshopStatus {
    pub const ALL: [WorkshopStatus; 6] = [
        WorkshopStatus::Upcoming,
        WorkshopStatus::InProgress,
        WorkshopStatus::Completed,
        WorkshopStatus::Rejected,
        WorkshopStatus::InReview,
        WorkshopStatus::Overdue,
    ];

    pub fn code(self) -> i64 {
        match self {
            WorkshopStatus::Upcoming => 1,
            WorkshopStatus::InProgress => 2,
            WorkshopStatus::Completed => 3,
            WorkshopStatus::Rejected => 4,
            WorkshopStatus::InReview => 5,
            WorkshopStatus::Overdue => 6,
            WorkshopStatus::Unknown(code) => code,
        }
    }

    pub fn view(self) -> StatusView {
        match self {
            WorkshopStatus::Upcoming => StatusView::new("status.workshop.upcoming", "taller-proximo"),
            WorkshopStatus::InProgress => StatusView::new("status.workshop.in_progress", "taller-en-curso"),
            WorkshopStatus::Completed => StatusView::new("status.workshop.completed", "taller-finalizado"),
            WorkshopStatus::Rejected => StatusView::new("status.workshop.rejected", "taller-rechazado"),
            WorkshopStatus::InReview => StatusView::new("status.workshop.in_review", "taller-revision"),
            WorkshopStatus::Overdue => StatusView::new("status.workshop.overdue", "taller-vencido"),
            WorkshopStatus::Unknown(_) => StatusView::UNKNOWN,
        }
    }
}

impl From<i64> for WorkshopStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => WorkshopStatus::Upcoming,
            2 => WorkshopStatus::InProgress,
            3 => WorkshopStatus::Completed,
            4 => WorkshopStatus::Rejected,
            5 => WorkshopStatus::InReview,
            6 => WorkshopStatus::Overdue,
            other => WorkshopStatus::Unknown(other),
        }
    }
}

impl From<WorkshopStatus> for i64 {
    fn from(status: WorkshopStatus) -> Self {
        status.code()
    }
}

/// Stored status of a plan task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TaskStatus {
    Pending,
    Completed,
    Unknown(i64),
}

impl TaskStatus {
    pub fn code(self) -> i64 {
        match self {
            TaskStatus::Pending => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Unknown(code) => code,
        }
    }

    /// Status a toggle action moves the task to.
    pub fn toggled(self) -> TaskStatus {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::Unknown(_) => TaskStatus::Completed,
        }
    }
}

impl From<i64> for TaskStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => TaskStatus::Pending,
            2 => TaskStatus::Completed,
            other => TaskStatus::Unknown(other),
        }
    }
}

impl From<TaskStatus> for i64 {
    fn from(status: TaskStatus) -> Self {
        status.code()
    }
}

/// What a task shows on screen: its stored status plus the derived overdue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Pending,
    Completed,
    Overdue,
    Unknown(i64),
}

impl TaskState {
    /// A pending task whose due day is strictly before `today` is overdue.
    /// Due today or later stays pending.
    pub fn classify(status: TaskStatus, due: Option<NaiveDate>, today: NaiveDate) -> TaskState {
        match status {
            TaskStatus::Pending => match due {
                Some(due) if due < today => TaskState::Overdue,
                _ => TaskState::Pending,
            },
            TaskStatus::Completed => TaskState::Completed,
            TaskStatus::Unknown(code) => TaskState::Unknown(code),
        }
    }

    pub fn view(self) -> StatusView {
        match self {
            TaskState::Pending => StatusView::new("status.task.pending", "tarea-pendiente"),
            TaskState::Completed => StatusView::new("status.task.completed", "tarea-completada"),
            TaskState::Overdue => StatusView::new("status.task.overdue", "tarea-vencida"),
            TaskState::Unknown(_) => StatusView::UNKNOWN,
        }
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
