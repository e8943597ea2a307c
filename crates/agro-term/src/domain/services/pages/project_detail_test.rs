use super::super::fake::{advisor, context, plan, task, today, FakeApi};
use super::*;
use agro_types::{PestReport, TaskStatus};

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn api() -> FakeApi {
    FakeApi {
        plans: vec![plan(1, 7, vec![3]), plan(2, 8, vec![])],
        tasks: vec![
            task(1, 1, TaskStatus::Pending, day(2024, 1, 1)),
            task(2, 1, TaskStatus::Pending, Some(today())),
            task(3, 1, TaskStatus::Completed, day(2023, 12, 1)),
            task(4, 2, TaskStatus::Pending, None),
        ],
        pest_reports: vec![
            PestReport {
                id: 1,
                plan_id: 1,
                pest: "Filoxera".to_string(),
                description: None,
                reported_on: None,
            },
            PestReport {
                id: 2,
                plan_id: 2,
                pest: "Gusano cogollero".to_string(),
                description: None,
                reported_on: None,
            },
        ],
        ..Default::default()
    }
}

async fn loaded(api: FakeApi) -> (ProjectDetailPage, std::sync::Arc<FakeApi>) {
    let (ctx, api) = context(api, Some(advisor()));
    let mut page = ProjectDetailPage::new(ctx, 1);
    assert_eq!(page.load().await, Outcome::Stay);
    (page, api)
}

#[tokio::test]
async fn it_derives_task_states() {
    let (page, _) = loaded(api()).await;

    let states: Vec<_> = page
        .state()
        .view()
        .unwrap()
        .tasks
        .iter()
        .map(|row| (row.task.id, row.state))
        .collect();
    assert_eq!(
        states,
        vec![
            (1, TaskState::Overdue),
            (2, TaskState::Pending),
            (3, TaskState::Completed)
        ]
    );
    assert_eq!(TaskState::Overdue.view().css_class, "tarea-vencida");
}

#[tokio::test]
async fn it_loads_every_part_of_the_plan() {
    let (page, api) = loaded(api()).await;

    for method in ["plans", "tasks", "pest_reports", "performance_report", "crops", "soil_types"] {
        assert!(api.called(method), "{method} was not requested");
    }
    let view = page.state().view().unwrap();
    assert_eq!(view.plan.id, 1);
    assert_eq!(view.pest_reports.len(), 1);
    assert_eq!(view.pest_reports[0].pest, "Filoxera");
}

#[tokio::test]
async fn it_shows_missing_plan_with_a_back_link() {
    let (ctx, _) = context(api(), Some(advisor()));
    let mut page = ProjectDetailPage::new(ctx, 99);

    page.load().await;

    match page.state() {
        PageState::Error(error) => {
            assert_eq!(error.message, "El plan de cultivo no existe.");
            assert_eq!(error.back_link, Some(Route::Projects));
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[tokio::test]
async fn it_tolerates_a_missing_performance_report() {
    let api = api().failing(
        "performance_report",
        ApiError::Api {
            status: 500,
            message: None,
        },
    );
    let (page, _) = loaded(api).await;

    let view = page.state().view().unwrap();
    assert!(view.performance.is_none());
    assert_eq!(view.tasks.len(), 3);
}

#[tokio::test]
async fn it_shows_the_derived_state_in_the_editor() {
    let (mut page, _) = loaded(api()).await;

    page.open_editor(Some(1));

    let editor = page.state().view().unwrap().editor.clone().unwrap();
    assert_eq!(editor.state, Some(TaskState::Overdue));
    assert_eq!(editor.form.due_date, "2024-01-01");
}

#[tokio::test]
async fn it_toggles_and_reloads() {
    let (mut page, api) = loaded(api()).await;
    let before = api.calls().len();

    page.toggle_task(1).await;

    let calls = api.calls();
    assert_eq!(calls[before], "set_task_status 1 2");
    assert!(calls.len() > before + 1, "page was not reloaded");
    let view = page.state().view().unwrap();
    assert!(page.state().is_rendered());
    assert_eq!(view.feedback.notice.as_ref().unwrap().text, "Tarea actualizada.");
}

#[tokio::test]
async fn it_keeps_an_invalid_task_in_the_editor() {
    let (mut page, api) = loaded(api()).await;
    let before = api.calls().len();

    page.save_task(
        None,
        TaskForm {
            title: "Poda".to_string(),
            description: String::new(),
            due_date: "mañana".to_string(),
        },
    )
    .await;

    assert_eq!(api.calls().len(), before);
    let view = page.state().view().unwrap();
    assert_eq!(view.feedback.errors[0].field, "fecha_vencimiento");
    assert_eq!(view.editor.as_ref().unwrap().form.title, "Poda");
}

#[tokio::test]
async fn it_creates_tasks_for_this_plan() {
    let (mut page, api) = loaded(api()).await;

    page.save_task(
        None,
        TaskForm {
            title: "Poda".to_string(),
            description: String::new(),
            due_date: "2024-03-01".to_string(),
        },
    )
    .await;

    assert!(api.calls().contains(&"create_task 1 Poda".to_string()));
}

#[tokio::test]
async fn it_reports_pests() {
    let (mut page, api) = loaded(api()).await;

    page.report_pest(PestReportForm {
        pest: "Mildiu".to_string(),
        description: String::new(),
    })
    .await;

    assert!(api.calls().contains(&"create_pest_report 1 Mildiu".to_string()));
}

#[tokio::test]
async fn it_redirects_when_a_task_call_is_rejected() {
    let api = api().failing("delete_task", ApiError::Unauthorized { status: 401 });
    let (mut page, _) = loaded(api).await;

    assert_eq!(page.delete_task(1).await, Outcome::Redirect(Route::Login));
    assert!(!page.state().is_error());
}
