use agro_types::{Catalogs, Notification, RequestKind, RequestStatus, Solicitud, TaskState, TaskStatus};
use chrono::NaiveDate;

use super::*;
use crate::domain::models::{Language, PageError};
use crate::domain::services::pages::{RequestTab, TaskRow};

fn es() -> Translations {
    Translations::new(Language::Es)
}

fn home() -> HomeView {
    HomeView {
        greeting: "Hola, Marta".to_string(),
        notifications: vec![Notification {
            id: 1,
            message: "Nueva solicitud de asesoría".to_string(),
            date: None,
            read: false,
        }],
        unread: 1,
        menu: vec![Route::Clients],
        feedback: Feedback::default(),
    }
}

#[test]
fn it_renders_placeholders_before_the_view_exists() {
    let i18n = es();

    let checking = render_page::<HomeView>(Route::AdvisorHome, &PageState::AuthChecking, &i18n);
    assert!(checking.ends_with("Verificando sesión..."));

    let loading = render_page::<HomeView>(Route::AdvisorHome, &PageState::Loading, &i18n);
    assert!(loading.ends_with("Cargando..."));
}

#[test]
fn it_renders_errors_with_the_back_link() {
    let state: PageState<HomeView> = PageState::Error(PageError {
        message: "El plan de cultivo no existe.".to_string(),
        back_link: Some(Route::Projects),
    });

    let text = render_page(Route::ProjectDetail(9), &state, &es());

    assert_eq!(
        text,
        "== Detalle del plan ==\nError: El plan de cultivo no existe.\nVolver a Planes de cultivo (/proyectos)"
    );
}

#[test]
fn it_marks_actions_in_progress() {
    let i18n = Translations::new(Language::En);

    let rendered = render_page(Route::AdvisorHome, &PageState::Rendered(home()), &i18n);
    let busy = render_page(Route::AdvisorHome, &PageState::ActionInFlight(home()), &i18n);

    assert!(!rendered.contains("Working, please wait..."));
    assert!(busy.ends_with("Working, please wait..."));
    assert!(busy.contains("Hola, Marta"));
    assert!(busy.contains("1 unread"));
}

#[test]
fn it_renders_overdue_tasks_with_their_badge() {
    let task = agro_types::Task {
        id: 1,
        plan_id: 1,
        title: "Fertilizar".to_string(),
        description: None,
        due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        status: TaskStatus::Pending,
    };
    let view = ProjectDetailView {
        plan: agro_types::CultivationPlan {
            id: 1,
            name: "Viñedo norte".to_string(),
            owner_id: 7,
            owner_name: None,
            crops: vec![],
            soil_type_id: None,
            hectares: None,
            start_date: None,
        },
        catalogs: Catalogs::default(),
        tasks: vec![TaskRow {
            task,
            state: TaskState::Overdue,
        }],
        pest_reports: vec![],
        performance: None,
        editor: None,
        feedback: Feedback::default(),
    };

    let lines = view.render(&es());

    assert!(lines.contains(&"  #1 [Vencida] Fertilizar (vence 2024-01-01)".to_string()));
}

#[test]
fn it_lists_the_actions_a_request_allows() {
    let view = RequestListView {
        tab: RequestTab::All,
        status_filter: None,
        requests: vec![Solicitud {
            id: 2,
            kind: RequestKind::Workshop,
            status: RequestStatus::InReview,
            requester: "Jorge Ruiz".to_string(),
            requester_id: Some(8),
            workshop_id: Some(1),
            workshop_name: Some("Manejo integrado de plagas".to_string()),
            details: None,
            created_at: None,
            payment_proof: Some("SPEI-0042".to_string()),
        }],
        feedback: Feedback::default(),
    };

    let lines = view.render(&es());

    assert_eq!(
        lines[1],
        "#2 [En revisión] Taller Jorge Ruiz - Manejo integrado de plagas (Comprobante: SPEI-0042) -> Validar pago / Rechazar"
    );
}

#[test]
fn it_renders_unknown_status_codes() {
    assert_eq!(badge(&es(), RequestStatus::Unknown(42).view()), "[Desconocido]");
}

#[test]
fn it_renders_field_errors() {
    let mut view = LoginView::default();
    view.feedback
        .fields(vec![agro_types::FieldError::new("contrasena", "validation.required")]);

    assert_eq!(view.render(&es()), vec!["! Contraseña: Este campo es obligatorio."]);
}
