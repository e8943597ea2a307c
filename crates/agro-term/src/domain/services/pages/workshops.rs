//! Workshop screens: the farmer's catalog and request history, and the
//! advisor's workshop administration.

use agro_client::ApiResult;
use agro_types::{
    PaymentProofForm, Role, Solicitud, Workshop, WorkshopForm, WorkshopSelection, WorkshopStatus,
};
use async_trait::async_trait;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState};

/// Shared tail of every workshop action: refresh the list on success and
/// report the outcome.
fn settle<V, T>(
    ctx: &PageContext,
    state: &mut PageState<V>,
    result: ApiResult<T>,
    success_key: &str,
    apply: impl FnOnce(&mut V, T),
    feedback: impl Fn(&mut V) -> &mut Feedback,
) -> Outcome {
    match result {
        Ok(fresh) => {
            let text = ctx.t(success_key);
            state.finish_action(|view| {
                apply(view, fresh);
                feedback(view).success(text);
            });
        }
        Err(err) => match ctx.explain(&err) {
            Failure::Login => return redirect_to_login(state),
            Failure::Message(text) => state.finish_action(|view| feedback(view).error(text)),
        },
    }

    return Outcome::Stay;
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkshopCatalogView {
    pub workshops: Vec<Workshop>,
    pub selection: WorkshopSelection,
    pub feedback: Feedback,
}

impl WorkshopCatalogView {
    pub fn is_selected(&self, workshop_id: i64) -> bool {
        return self.selection.workshop_ids.contains(&workshop_id);
    }
}

/// Farmer's workshop catalog with multi-select enrollment.
pub struct WorkshopCatalogPage {
    ctx: PageContext,
    state: PageState<WorkshopCatalogView>,
}

impl WorkshopCatalogPage {
    pub fn new(ctx: PageContext) -> WorkshopCatalogPage {
        return WorkshopCatalogPage {
            ctx,
            state: PageState::Init,
        };
    }

    /// Only upcoming workshops accept enrollments.
    pub fn toggle(&mut self, workshop_id: i64) {
        let not_open = self.ctx.t("workshops.not_open");
        let Some(view) = self.state.view_mut() else {
            return;
        };
        let open = view
            .workshops
            .iter()
            .any(|w| w.id == workshop_id && w.status == WorkshopStatus::Upcoming);

        if view.is_selected(workshop_id) {
            view.selection.workshop_ids.retain(|id| *id != workshop_id);
        } else if open {
            view.selection.workshop_ids.push(workshop_id);
        } else {
            view.feedback.error(not_open);
            return;
        }
        view.feedback.clear();
    }

    /// Sends the enrollment request. An empty selection never leaves the page.
    pub async fn submit(&mut self) -> Outcome {
        let Some(selection) = self.state.view().map(|view| view.selection.clone()) else {
            return Outcome::Stay;
        };
        let input = match selection.into_input() {
            Ok(input) => input,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };
        if !self.state.begin_action() {
            return Outcome::Stay;
        }

        let result = self.ctx.api.request_workshops(&input).await;
        return settle(
            &self.ctx,
            &mut self.state,
            result,
            "workshops.requested",
            |view, ()| view.selection = WorkshopSelection::default(),
            |view| &mut view.feedback,
        );
    }
}

#[async_trait]
impl Page for WorkshopCatalogPage {
    type View = WorkshopCatalogView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(Some(Role::Farmer)).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        match self.ctx.api.workshops().await {
            Ok(workshops) => {
                self.state = PageState::Rendered(WorkshopCatalogView {
                    workshops,
                    selection: WorkshopSelection::default(),
                    feedback: Feedback::default(),
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        }
    }

    fn state(&self) -> &PageState<WorkshopCatalogView> {
        return &self.state;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkshopHistoryView {
    pub requests: Vec<Solicitud>,
    pub feedback: Feedback,
}

/// Farmer's own workshop requests and their payment proofs.
pub struct WorkshopHistoryPage {
    ctx: PageContext,
    state: PageState<WorkshopHistoryView>,
}

impl WorkshopHistoryPage {
    pub fn new(ctx: PageContext) -> WorkshopHistoryPage {
        return WorkshopHistoryPage {
            ctx,
            state: PageState::Init,
        };
    }

    pub async fn submit_proof(&mut self, request_id: i64, form: PaymentProofForm) -> Outcome {
        let Some(awaiting) = self.state.view().map(|view| {
            view.requests
                .iter()
                .any(|r| r.id == request_id && r.awaits_payment())
        }) else {
            return Outcome::Stay;
        };
        if !awaiting {
            let text = self.ctx.t("requests.action_unavailable");
            self.state.finish_action(|view| view.feedback.error(text));
            return Outcome::Stay;
        }
        let proof = match form.into_proof(request_id) {
            Ok(proof) => proof,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };
        if !self.state.begin_action() {
            return Outcome::Stay;
        }

        let result = match self.ctx.api.submit_payment_proof(&proof).await {
            Ok(()) => self.ctx.api.my_workshop_requests().await,
            Err(err) => Err(err),
        };
        return settle(
            &self.ctx,
            &mut self.state,
            result,
            "workshops.proof_sent",
            |view, requests| view.requests = requests,
            |view| &mut view.feedback,
        );
    }
}

#[async_trait]
impl Page for WorkshopHistoryPage {
    type View = WorkshopHistoryView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(Some(Role::Farmer)).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        match self.ctx.api.my_workshop_requests().await {
            Ok(requests) => {
                self.state = PageState::Rendered(WorkshopHistoryView {
                    requests,
                    feedback: Feedback::default(),
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        }
    }

    fn state(&self) -> &PageState<WorkshopHistoryView> {
        return &self.state;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkshopAdminView {
    pub status_filter: Option<WorkshopStatus>,
    pub workshops: Vec<Workshop>,
    pub feedback: Feedback,
}

/// Advisor's workshop management.
pub struct WorkshopAdminPage {
    ctx: PageContext,
    status_filter: Option<WorkshopStatus>,
    state: PageState<WorkshopAdminView>,
}

impl WorkshopAdminPage {
    pub fn new(ctx: PageContext) -> WorkshopAdminPage {
        return WorkshopAdminPage {
            ctx,
            status_filter: None,
            state: PageState::Init,
        };
    }

    async fn fetch(&self, status_filter: Option<WorkshopStatus>) -> ApiResult<Vec<Workshop>> {
        return match status_filter {
            Some(status) => self.ctx.api.workshops_by_status(status).await,
            None => self.ctx.api.workshops().await,
        };
    }

    /// Reloads the list from `/getTallerForStatus`, or everything for `None`.
    pub async fn filter_by_status(&mut self, status: Option<WorkshopStatus>) -> Outcome {
        if !self.state.begin_action() {
            return Outcome::Stay;
        }
        let result = self.fetch(status).await;
        match result {
            Ok(workshops) => {
                self.status_filter = status;
                self.state.finish_action(|view| {
                    view.status_filter = status;
                    view.workshops = workshops;
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

    pub async fn create(&mut self, form: WorkshopForm) -> Outcome {
        if !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let input = match form.into_input(WorkshopStatus::Upcoming) {
            Ok(input) => input,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.create_workshop(&input).await;
        return self.reload_after(result, "workshops.created").await;
    }

    pub async fn update(&mut self, id: i64, form: WorkshopForm, status: WorkshopStatus) -> Outcome {
        if !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let input = match form.into_input(status) {
            Ok(input) => input,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.update_workshop(id, &input).await;
        return self.reload_after(result, "workshops.updated").await;
    }

    pub async fn delete(&mut self, id: i64) -> Outcome {
        if !self.state.begin_action() {
            return Outcome::Stay;
        }
        let result = self.ctx.api.delete_workshop(id).await;
        return self.reload_after(result, "workshops.deleted").await;
    }

    async fn reload_after(&mut self, result: ApiResult<()>, success_key: &str) -> Outcome {
        let result = match result {
            Ok(()) => self.fetch(self.status_filter).await,
            Err(err) => Err(err),
        };

        return settle(
            &self.ctx,
            &mut self.state,
            result,
            success_key,
            |view, workshops| view.workshops = workshops,
            |view| &mut view.feedback,
        );
    }
}

#[async_trait]
impl Page for WorkshopAdminPage {
    type View = WorkshopAdminView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(Some(Role::Advisor)).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        match self.fetch(self.status_filter).await {
            Ok(workshops) => {
                self.state = PageState::Rendered(WorkshopAdminView {
                    status_filter: self.status_filter,
                    workshops,
                    feedback: Feedback::default(),
                });
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, None),
        }
    }

    fn state(&self) -> &PageState<WorkshopAdminView> {
        return &self.state;
    }
}

#[cfg(test)]
#[path = "workshops_test.rs"]
mod tests;
