use agro_client::{ApiError, ApiResult};
use agro_types::{
    Catalogs, CultivationPlan, PerformanceReport, PestReport, PestReportForm, Task, TaskForm,
    TaskState, TaskStatus,
};
use async_trait::async_trait;
use chrono::NaiveDate;

use super::{redirect_to_login, Failure, Page, PageContext};
use crate::domain::models::{Feedback, Outcome, PageState, Route};

/// A task with its on-screen state, overdue included.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskRow {
    pub task: Task,
    pub state: TaskState,
}

/// Task being created (`task_id` empty) or edited.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskEditor {
    pub task_id: Option<i64>,
    pub form: TaskForm,
    /// Derived state of the edited task, shown next to the form.
    pub state: Option<TaskState>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectDetailView {
    pub plan: CultivationPlan,
    pub catalogs: Catalogs,
    pub tasks: Vec<TaskRow>,
    pub pest_reports: Vec<PestReport>,
    pub performance: Option<PerformanceReport>,
    pub editor: Option<TaskEditor>,
    pub feedback: Feedback,
}

impl ProjectDetailView {
    fn task(&self, task_id: i64) -> Option<&TaskRow> {
        return self.tasks.iter().find(|row| row.task.id == task_id);
    }
}

/// Failures of secondary data are tolerated, except a rejected session.
fn optional<T>(result: ApiResult<T>) -> ApiResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.requires_login() => Err(err),
        Err(err) => {
            tracing::warn!(error = %err, "secondary load failed");
            Ok(None)
        }
    }
}

async fn fetch(ctx: &PageContext, plan_id: i64) -> ApiResult<ProjectDetailView> {
    let api = &ctx.api;
    let (plans, tasks, pests, performance, crops, soil_types) = tokio::join!(
        api.plans(),
        api.tasks(plan_id),
        api.pest_reports(),
        api.performance_report(plan_id),
        api.crops(),
        api.soil_types(),
    );

    let plan = plans?
        .into_iter()
        .find(|plan| plan.id == plan_id)
        .ok_or_else(|| ApiError::Api {
            status: 404,
            message: Some(ctx.t("project.not_found")),
        })?;
    let tasks = tasks?
        .into_iter()
        .map(|task| TaskRow {
            state: task.state(ctx.today),
            task,
        })
        .collect();
    let pest_reports = pests?
        .into_iter()
        .filter(|report| report.plan_id == plan_id)
        .collect();

    return Ok(ProjectDetailView {
        plan,
        catalogs: Catalogs {
            crops: optional(crops)?.unwrap_or_default(),
            soil_types: optional(soil_types)?.unwrap_or_default(),
        },
        tasks,
        pest_reports,
        performance: optional(performance)?,
        editor: None,
        feedback: Feedback::default(),
    });
}

pub struct ProjectDetailPage {
    ctx: PageContext,
    plan_id: i64,
    state: PageState<ProjectDetailView>,
}

impl ProjectDetailPage {
    pub fn new(ctx: PageContext, plan_id: i64) -> ProjectDetailPage {
        return ProjectDetailPage {
            ctx,
            plan_id,
            state: PageState::Init,
        };
    }

    /// Opens the editor for a new task, or for an existing one with its
    /// current values and derived state.
    pub fn open_editor(&mut self, task_id: Option<i64>) {
        let Some(view) = self.state.view_mut() else {
            return;
        };
        let editor = match task_id.and_then(|id| view.task(id)) {
            Some(row) => TaskEditor {
                task_id: Some(row.task.id),
                form: TaskForm {
                    title: row.task.title.clone(),
                    description: row.task.description.clone().unwrap_or_default(),
                    due_date: row
                        .task
                        .due_date
                        .map(agro_types::dates::format_day)
                        .unwrap_or_default(),
                },
                state: Some(row.state),
            },
            None => TaskEditor {
                task_id: None,
                form: TaskForm::default(),
                state: None,
            },
        };
        view.editor = Some(editor);
    }

    pub fn close_editor(&mut self) {
        if let Some(view) = self.state.view_mut() {
            view.editor = None;
        }
    }

    /// Creates a task, or updates `task_id` keeping its stored status.
    pub async fn save_task(&mut self, task_id: Option<i64>, form: TaskForm) -> Outcome {
        let Some(view) = self.state.view() else {
            return Outcome::Stay;
        };
        let status = task_id
            .and_then(|id| view.task(id))
            .map(|row| row.task.status)
            .unwrap_or(TaskStatus::Pending);
        let input = match form.clone().into_input(self.plan_id, status) {
            Ok(input) => input,
            Err(errors) => {
                let state = self.derived_state(form.due_date.as_str(), status);
                self.state.finish_action(|view| {
                    view.editor = Some(TaskEditor {
                        task_id,
                        form,
                        state,
                    });
                    view.feedback.fields(errors.0);
                });
                return Outcome::Stay;
            }
        };
        if !self.state.begin_action() {
            return Outcome::Stay;
        }

        let (result, key) = match task_id {
            Some(id) => (self.ctx.api.update_task(id, &input).await, "project.task_updated"),
            None => (self.ctx.api.create_task(&input).await, "project.task_created"),
        };
        return self.reload_after(result, key).await;
    }

    pub async fn toggle_task(&mut self, task_id: i64) -> Outcome {
        let Some(status) = self
            .state
            .view()
            .and_then(|view| view.task(task_id))
            .map(|row| row.task.status)
        else {
            return Outcome::Stay;
        };
        if !self.state.begin_action() {
            return Outcome::Stay;
        }

        let result = self.ctx.api.set_task_status(task_id, status.toggled()).await;
        return self.reload_after(result, "project.task_updated").await;
    }

    pub async fn delete_task(&mut self, task_id: i64) -> Outcome {
        if !self.state.begin_action() {
            return Outcome::Stay;
        }
        let result = self.ctx.api.delete_task(task_id).await;
        return self.reload_after(result, "project.task_deleted").await;
    }

    pub async fn report_pest(&mut self, form: PestReportForm) -> Outcome {
        if !self.state.is_rendered() {
            return Outcome::Stay;
        }
        let input = match form.into_input(self.plan_id) {
            Ok(input) => input,
            Err(errors) => {
                self.state.finish_action(|view| view.feedback.fields(errors.0));
                return Outcome::Stay;
            }
        };

        self.state.begin_action();
        let result = self.ctx.api.create_pest_report(&input).await;
        return self.reload_after(result, "project.pest_reported").await;
    }

    fn derived_state(&self, due_date: &str, status: TaskStatus) -> Option<TaskState> {
        let due: Option<NaiveDate> = agro_types::dates::parse_form_day(due_date);
        return Some(TaskState::classify(status, due, self.ctx.today));
    }

    async fn reload_after(&mut self, result: ApiResult<()>, success_key: &str) -> Outcome {
        let result = match result {
            Ok(()) => fetch(&self.ctx, self.plan_id).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(mut fresh) => {
                fresh.feedback.success(self.ctx.t(success_key));
                self.state.finish_action(|view| *view = fresh);
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
impl Page for ProjectDetailPage {
    type View = ProjectDetailView;

    async fn load(&mut self) -> Outcome {
        self.state = PageState::AuthChecking;
        if self.ctx.guard(None).is_none() {
            return redirect_to_login(&mut self.state);
        }
        self.state = PageState::Loading;

        match fetch(&self.ctx, self.plan_id).await {
            Ok(view) => {
                self.state = PageState::Rendered(view);
                Outcome::Stay
            }
            Err(err) => self.ctx.load_failed(&mut self.state, &err, Some(Route::Projects)),
        }
    }

    fn state(&self) -> &PageState<ProjectDetailView> {
        return &self.state;
    }
}

#[cfg(test)]
#[path = "project_detail_test.rs"]
mod tests;
