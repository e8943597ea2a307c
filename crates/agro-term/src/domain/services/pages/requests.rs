use agro_client::ApiResult;
use agro_types::{RequestAction, RequestKind, RequestStatus, Role, Solicitud};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState};

/// Which request feed the list shows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RequestTab {
    #[default]
    All,
    Advisory,
    Workshop,
}

impl RequestTab {
    pub fn label_key(self) -> &'static str {
        match self {
            RequestTab::All => "requests.tab.all",
            RequestTab::Advisory => "requests.tab.advisory",
            RequestTab::Workshop => "requests.tab.workshop",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestListView {
    pub tab: RequestTab,
    pub status_filter: Option<RequestStatus>,
    pub requests: Vec<Solicitud>,
    pub feedback: Feedback,
}

impl RequestListView {
    pub fn visible(&self) -> Vec<&Solicitud> {
        return self
            .requests
            .iter()
            .filter(|r| self.status_filter.map_or(true, |status| r.status == status))
            .collect();
    }
}

async fn fetch(ctx: &PageContext, tab: RequestTab) -> ApiResult<Vec<Solicitud>> {
    return match tab {
        RequestTab::All => ctx.api.all_requests().await,
        RequestTab::Advisory => ctx.api.advisory_requests().await,
        RequestTab::Workshop => ctx.api.workshop_requests().await,
    };
}

/// Advisor's inbox of advisory and workshop requests.
pub struct RequestListPage {
    ctx: PageContext,
    tab: RequestTab,
    state: PageState<RequestListView>,
}

impl RequestListPage {
    pub fn new(ctx: PageContext) -> RequestListPage {
        return RequestListPage::with_tab(ctx, RequestTab::All);
    }

    pub fn with_tab(ctx: PageContext, tab: RequestTab) -> RequestListPage {
        return RequestListPage {
            ctx,
            tab,
            state: PageState::Init,
        };
    }

    pub fn filter_by_status(&mut self, status: Option<RequestStatus>) {
        if let Some(view) = self.state.view_mut() {
            view.status_filter = status;
        }
    }

    pub async fn select_tab(&mut self, tab: RequestTab) -> Outcome {
        if !self.state.begin_action() {
            return Outcome::Stay;
        }

        match fetch(&self.ctx, tab).await {
            Ok(requests) => {
                self.tab = tab;
                self.state.finish_action(|view| {
                    view.tab = tab;
                    view.requests = requests;
                    view.feedback.clear();
                });
            }
            Err(err) => match self.ctx.explain(&err) {
                Failure::Login => return redirect_to_login(&mut self.state),
                Failure::Message(text) => self.state.finish_action(|view| view.feedback.error(text)),
            },
        }

        return Outcome::Stay;
    }

    /// Applies `action` to request `id` if its kind and status allow it.
    pub async fn apply(&mut self, id: i64, action: RequestAction) -> Outcome {
        let Some(request) = self
            .state
            .view()
            .and_then(|view| view.requests.iter().find(|r| r.id == id))
            .cloned()
        else {
            return Outcome::Stay;
        };
        if !request.available_actions().contains(&action) {
            let text = self.ctx.t("requests.action_unavailable");
            self.state.finish_action(|view| view.feedback.error(text));
            return Outcome::Stay;
        }
        if !self.state.begin_action() {
            return Outcome::Stay;
        }

        let status = action.target_status();
        tracing::info!(id, kind = ?request.kind, code = status.code(), "updating request status");
        let result = match request.kind {
            RequestKind::Advisory => self.ctx.api.set_advisory_request_status(id, status).await,
            RequestKind::Workshop => self.ctx.api.set_workshop_request_status(id, status).await,
        };
        let result = match result {
            Ok(()) => fetch(&self.ctx, self.tab).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(requests) => {
                let text = self.ctx.t("requests.updated");
                self.state.finish_action(|view| {
                    view.requests = requests;
                    view.feedback.success(text);
                });
            }
            Err(err) => match self.ctx.explain(&err) {
                Failure::Login => return redirect_to_login(&mut self.state),
                Failure::Message(text) => self.state.finish_action(|view| view.feedback.error(text)),
            },
        }

        return Outcome::Stay;
    }
}

#[async_trait]
impl Page for RequestListPage {
    type View = RequestListView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(Some(Role::Advisor)).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        match fetch(&self.ctx, self.tab).await {
            Ok(requests) => {
                self.state = PageState::Rendered(RequestListView {
                    tab: self.tab,
                    status_filter: None,
                    requests,
                    feedback: Feedback::default(),
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        }
    }

    fn state(&self) -> &PageState<RequestListView> {
        return &self.state;
    }
}
