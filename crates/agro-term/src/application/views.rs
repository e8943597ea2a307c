//! Text views derived from page state.
//!
//! Rendering never mutates anything: the same state and language always yield
//! the same text. Status badges render as `[label]`.

use agro_types::{dates::format_day, StatusView};

use crate::domain::models::{Feedback, NoticeKind, PageState, Route};
use crate::domain::services::i18n::Translations;
use crate::domain::services::pages::{
    ClientListView, HomeView, LoginView, NotificationsView, PasswordView, ProfileView,
    ProjectDetailView, ProjectListView, RegisterView, RequestListView, WorkshopAdminView,
    WorkshopCatalogView, WorkshopHistoryView,
};

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

pub trait Render {
    fn render(&self, i18n: &Translations) -> Vec<String>;
}

/// Full text of a page in any state.
pub fn render_page<V: Render>(title: Route, state: &PageState<V>, i18n: &Translations) -> String {
    let mut lines = vec![format!("== {} ==", i18n.t(title.label_key()))];

    match state {
        PageState::Init | PageState::AuthChecking => lines.push(i18n.t("page.checking_session")),
        PageState::Loading => lines.push(i18n.t("page.loading")),
        PageState::Error(error) => {
            lines.push(format!("{}: {}", i18n.t("page.error"), error.message));
            if let Some(back) = error.back_link {
                lines.push(format!(
                    "{} {} ({})",
                    i18n.t("page.back"),
                    i18n.t(back.label_key()),
                    back
                ));
            }
        }
        PageState::Rendered(view) => lines.extend(view.render(i18n)),
        PageState::ActionInFlight(view) => {
            lines.extend(view.render(i18n));
            lines.push(i18n.t("page.action_in_progress"));
        }
    }

    return lines.join("\n");
}

pub fn badge(i18n: &Translations, view: StatusView) -> String {
    return format!("[{}]", i18n.status(view));
}

fn feedback(i18n: &Translations, feedback: &Feedback, lines: &mut Vec<String>) {
    if let Some(notice) = &feedback.notice {
        let marker = match notice.kind {
            NoticeKind::Success => "*",
            NoticeKind::Error => "!",
        };
        lines.push(format!("{marker} {}", notice.text));
    }
    for error in &feedback.errors {
        lines.push(format!("! {}", i18n.field_error(error)));
    }
}

fn money(i18n: &Translations, cost: Option<f64>) -> String {
    return match cost {
        Some(cost) if cost > 0.0 => format!("${cost:.2}"),
        _ => i18n.t("workshops.free"),
    };
}

fn day(date: Option<chrono::NaiveDate>) -> String {
    return date.map(format_day).unwrap_or_else(|| "-".to_string());
}

impl Render for LoginView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        feedback(i18n, &self.feedback, &mut lines);
        if !self.form.email.is_empty() {
            lines.push(format!("{}: {}", i18n.t("field.correo"), self.form.email));
        }
        return lines;
    }
}

impl Render for RegisterView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        feedback(i18n, &self.feedback, &mut lines);
        return lines;
    }
}

impl Render for PasswordView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = vec![self.intro.clone()];
        feedback(i18n, &self.feedback, &mut lines);
        return lines;
    }
}

impl Render for HomeView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = vec![self.greeting.clone()];
        feedback(i18n, &self.feedback, &mut lines);

        lines.push(format!("{}:", i18n.t("home.menu")));
        for route in &self.menu {
            lines.push(format!("  {} ({})", i18n.t(route.label_key()), route));
        }

        let unread = self.unread.to_string();
        lines.push(format!(
            "{} ({})",
            i18n.t("page.notifications"),
            i18n.t_with("home.unread", &[("count", unread.as_str())])
        ));
        if self.notifications.is_empty() {
            lines.push(format!("  {}", i18n.t("notifications.empty")));
        }
        for notification in &self.notifications {
            let marker = if notification.read { " " } else { "*" };
            lines.push(format!("  {marker} {}", notification.message));
        }

        return lines;
    }
}

impl Render for NotificationsView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        if self.notifications.is_empty() {
            return vec![i18n.t("notifications.empty")];
        }

        return self
            .notifications
            .iter()
            .map(|n| {
                let date = n.date.as_deref().unwrap_or("");
                if n.read {
                    format!("  {date} {}", n.message)
                } else {
                    format!("* {date} {} ({})", n.message, i18n.t("notifications.new"))
                }
            })
            .collect();
    }
}

impl Render for ProfileView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        feedback(i18n, &self.feedback, &mut lines);
        lines.push(format!("{}: {}", i18n.t("field.nombre"), self.profile.name));
        lines.push(format!("{}: {}", i18n.t("field.correo"), self.profile.email));
        lines.push(format!(
            "{}: {}",
            i18n.t("field.telefono"),
            self.profile.phone.as_deref().unwrap_or("-")
        ));
        return lines;
    }
}

impl Render for ClientListView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        feedback(i18n, &self.feedback, &mut lines);
        if !self.query.is_empty() {
            lines.push(format!("{}: {}", i18n.t("clients.search"), self.query));
        }

        let visible = self.visible();
        if visible.is_empty() {
            lines.push(i18n.t("clients.empty"));
        }
        for client in visible {
            let mut line = format!("#{} {} <{}>", client.id, client.name, client.email);
            if let Some(phone) = &client.phone {
                line.push_str(&format!(" {phone}"));
            }
            if let Some(location) = &client.location {
                line.push_str(&format!(" - {location}"));
            }
            lines.push(line);
        }

        return lines;
    }
}

impl Render for ProjectListView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        let filter = match self.crop_filter {
            Some(id) => self
                .catalogs
                .crop_name(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{id}")),
            None => i18n.t("projects.all"),
        };
        lines.push(format!("{}: {}", i18n.t("projects.filter"), filter));

        let visible = self.visible();
        if visible.is_empty() {
            lines.push(i18n.t("projects.empty"));
        }
        for plan in visible {
            let mut line = format!("#{} {} ({})", plan.id, plan.name, self.crop_names(plan).join(", "));
            if let Some(owner) = &plan.owner_name {
                line.push_str(&format!(" - {}: {owner}", i18n.t("projects.owner")));
            }
            lines.push(line);
        }

        return lines;
    }
}

impl Render for ProjectDetailView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = vec![format!("{} (#{})", self.plan.name, self.plan.id)];
        feedback(i18n, &self.feedback, &mut lines);

        let crops: Vec<String> = self
            .plan
            .crops
            .iter()
            .map(|id| {
                self.catalogs
                    .crop_name(*id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{id}"))
            })
            .collect();
        lines.push(format!("{}: {}", i18n.t("project.crops"), crops.join(", ")));
        if let Some(soil) = self.plan.soil_type_id {
            let name = self.catalogs.soil_type_name(soil).unwrap_or("-");
            lines.push(format!("{}: {name}", i18n.t("project.soil")));
        }
        if let Some(hectares) = self.plan.hectares {
            lines.push(format!("{}: {hectares}", i18n.t("project.hectares")));
        }
        lines.push(format!("{}: {}", i18n.t("project.start"), day(self.plan.start_date)));

        lines.push(format!("{}:", i18n.t("project.tasks")));
        if self.tasks.is_empty() {
            lines.push(format!("  {}", i18n.t("project.no_tasks")));
        }
        for row in &self.tasks {
            lines.push(format!(
                "  #{} {} {} ({} {})",
                row.task.id,
                badge(i18n, row.state.view()),
                row.task.title,
                i18n.t("project.due"),
                day(row.task.due_date)
            ));
        }

        if let Some(editor) = &self.editor {
            let title = match editor.task_id {
                Some(id) => format!("{} #{id}", i18n.t("project.editor_edit")),
                None => i18n.t("project.editor_new"),
            };
            lines.push(format!("{title}:"));
            if let Some(state) = editor.state {
                lines.push(format!("  {}", badge(i18n, state.view())));
            }
            lines.push(format!("  {}: {}", i18n.t("field.titulo"), editor.form.title));
            lines.push(format!(
                "  {}: {}",
                i18n.t("field.fecha_vencimiento"),
                editor.form.due_date
            ));
        }

        lines.push(format!("{}:", i18n.t("project.pests")));
        if self.pest_reports.is_empty() {
            lines.push(format!("  {}", i18n.t("project.no_pests")));
        }
        for report in &self.pest_reports {
            lines.push(format!("  {} {}", day(report.reported_on), report.pest));
        }

        if let Some(report) = &self.performance {
            lines.push(format!("{}:", i18n.t("project.performance")));
            if let Some(percent) = report.completion_percent() {
                lines.push(format!(
                    "  {}: {percent}% ({}/{})",
                    i18n.t("project.completion"),
                    report.completed_tasks,
                    report.total_tasks
                ));
            }
            if let Some(expected) = report.expected_yield {
                lines.push(format!("  {}: {expected}", i18n.t("project.expected_yield")));
            }
            if let Some(actual) = report.actual_yield {
                lines.push(format!("  {}: {actual}", i18n.t("project.actual_yield")));
            }
        }

        return lines;
    }
}

impl Render for RequestListView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = vec![format!("[{}]", i18n.t(self.tab.label_key()))];
        feedback(i18n, &self.feedback, &mut lines);

        let visible = self.visible();
        if visible.is_empty() {
            lines.push(i18n.t("requests.empty"));
        }
        for request in visible {
            let mut line = format!(
                "#{} {} {} {}",
                request.id,
                badge(i18n, request.status.view()),
                i18n.t(request.kind.label_key()),
                request.requester
            );
            if let Some(workshop) = &request.workshop_name {
                line.push_str(&format!(" - {workshop}"));
            }
            if let Some(proof) = &request.payment_proof {
                line.push_str(&format!(" ({}: {proof})", i18n.t("requests.payment_proof")));
            }
            let actions: Vec<String> = request
                .available_actions()
                .iter()
                .map(|a| i18n.t(a.label_key()))
                .collect();
            if !actions.is_empty() {
                line.push_str(&format!(" -> {}", actions.join(" / ")));
            }
            lines.push(line);
        }

        return lines;
    }
}

impl Render for WorkshopCatalogView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        feedback(i18n, &self.feedback, &mut lines);
        if self.workshops.is_empty() {
            lines.push(i18n.t("workshops.empty"));
        }
        for workshop in &self.workshops {
            let check = if self.is_selected(workshop.id) { "[x]" } else { "[ ]" };
            lines.push(format!(
                "{check} #{} {} {} {} {}",
                workshop.id,
                badge(i18n, workshop.status.view()),
                workshop.name,
                day(workshop.date),
                money(i18n, workshop.cost)
            ));
        }
        if !self.selection.workshop_ids.is_empty() {
            lines.push(format!(
                "{} {}",
                self.selection.workshop_ids.len(),
                i18n.t("workshops.selected")
            ));
        }

        return lines;
    }
}

impl Render for WorkshopHistoryView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        feedback(i18n, &self.feedback, &mut lines);
        if self.requests.is_empty() {
            lines.push(i18n.t("workshops.no_requests"));
        }
        for request in &self.requests {
            let mut line = format!(
                "#{} {} {}",
                request.id,
                badge(i18n, request.status.view()),
                request.workshop_name.as_deref().unwrap_or("-")
            );
            if request.awaits_payment() {
                line.push_str(&format!(" ({})", i18n.t("workshops.awaiting_payment")));
            }
            lines.push(line);
        }

        return lines;
    }
}

impl Render for WorkshopAdminView {
    fn render(&self, i18n: &Translations) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(status) = self.status_filter {
            lines.push(badge(i18n, status.view()));
        }
        feedback(i18n, &self.feedback, &mut lines);
        if self.workshops.is_empty() {
            lines.push(i18n.t("workshops.empty"));
        }
        for workshop in &self.workshops {
            let mut line = format!(
                "#{} {} {} {} {}",
                workshop.id,
                badge(i18n, workshop.status.view()),
                workshop.name,
                day(workshop.date),
                money(i18n, workshop.cost)
            );
            if let Some(capacity) = workshop.capacity {
                line.push_str(&format!(" {}: {capacity}", i18n.t("workshops.capacity")));
            }
            lines.push(line);
        }

        return lines;
    }
}
