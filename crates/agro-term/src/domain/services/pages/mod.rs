//! One controller per screen.
//!
//! A controller owns its [`PageState`] and a [`PageContext`]. `load` runs the
//! session guard, then fetches what the screen shows. Actions move the page to
//! `ActionInFlight` for their duration; a second action started meanwhile is
//! refused. API failures are sorted in one place ([`PageContext::explain`]):
//! a rejected session clears local state and redirects to the login page,
//! everything else becomes a message on the page.

mod clients;
mod home;
mod login;
mod notifications;
mod password;
mod profile;
mod project_detail;
mod projects;
mod register;
mod requests;
mod workshops;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use agro_client::{ApiError, SessionStore};
use agro_types::{Role, Session};
use async_trait::async_trait;
use chrono::NaiveDate;

use super::i18n::Translations;
use crate::domain::models::{Language, Outcome, PageState, Route};

pub use clients::{ClientListPage, ClientListView};
pub use home::{HomePage, HomeView};
pub use login::{LoginPage, LoginView};
pub use notifications::{NotificationsPage, NotificationsView};
pub use password::{PasswordMode, PasswordPage, PasswordView};
pub use profile::{ProfilePage, ProfileView};
pub use project_detail::{ProjectDetailPage, ProjectDetailView, TaskEditor, TaskRow};
pub use projects::{ProjectListPage, ProjectListView};
pub use register::{RegisterPage, RegisterView};
pub use requests::{RequestListPage, RequestListView, RequestTab};
pub use workshops::{
    WorkshopAdminPage, WorkshopAdminView, WorkshopCatalogPage, WorkshopCatalogView,
    WorkshopHistoryPage, WorkshopHistoryView,
};

/// Everything a controller needs. Built once per page instance.
#[derive(Clone)]
pub struct PageContext {
    pub api: Arc<dyn agro_client::AgroApi>,
    pub sessions: SessionStore,
    pub i18n: Arc<Translations>,
    /// Reference day for overdue checks.
    pub today: NaiveDate,
}

#[async_trait]
pub trait Page: Send {
    type View: Send;

    /// Runs the session guard and the initial data load.
    async fn load(&mut self) -> Outcome;

    fn state(&self) -> &PageState<Self::View>;
}

/// How a page must react to a failed API call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Failure {
    /// Session missing or rejected. Local state is already cleared.
    Login,
    Message(String),
}

impl PageContext {
    pub fn new(
        api: Arc<dyn agro_client::AgroApi>,
        sessions: SessionStore,
        language: Language,
        today: NaiveDate,
    ) -> PageContext {
        return PageContext {
            api,
            sessions,
            i18n: Arc::new(Translations::new(language)),
            today,
        };
    }

    pub fn t(&self, key: &str) -> String {
        return self.i18n.t(key);
    }

    /// Session guard. `None` accepts either role.
    pub(crate) fn guard(&self, role: Option<Role>) -> Option<Session> {
        let checked = match role {
            Some(role) => self.sessions.require_role(role),
            None => self.sessions.require_any(),
        };

        return checked.ok();
    }

    pub(crate) fn explain(&self, err: &ApiError) -> Failure {
        if err.requires_login() {
            self.sessions.clear();
            return Failure::Login;
        }

        let text = match err {
            ApiError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Api { status: 404, .. } => self.t("error.not_found"),
            ApiError::Network(_) => self.t("error.connection"),
            _ => self.t("error.generic"),
        };
        tracing::warn!(error = %err, "api call failed");

        return Failure::Message(text);
    }

    /// Turns a failed initial load into either a redirect or an error page.
    pub(crate) fn load_failed<V>(
        &self,
        state: &mut PageState<V>,
        err: &ApiError,
        back_link: Option<Route>,
    ) -> Outcome {
        return match self.explain(err) {
            Failure::Login => redirect_to_login(state),
            Failure::Message(text) => {
                state.fail(text, back_link);
                Outcome::Stay
            }
        };
    }
}

/// Leaves no page content or error behind when the session is gone.
pub(crate) fn redirect_to_login<V>(state: &mut PageState<V>) -> Outcome {
    *state = PageState::Init;
    return Outcome::Redirect(Route::Login);
}
