use agro_types::{
    ClientUpdate, PaymentProof, PerformanceReport, PestReport, PestReportInput, ProfileUpdate,
    RegistrationRequest, RequestKind, RequestStatus, Role, Solicitud, Task, TaskInput, TaskStatus,
    Workshop, WorkshopInput, WorkshopRequestInput, WorkshopStatus,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::fixtures::User;
use crate::server::MockState;

/// Authenticated account resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct Caller(pub User);

pub struct Failure(StatusCode, &'static str);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "mensaje": self.1 }))).into_response()
    }
}

type Reply = Result<Json<Value>, Failure>;

fn not_found() -> Failure {
    Failure(StatusCode::NOT_FOUND, "Recurso no encontrado")
}

fn ok() -> Reply {
    Ok(Json(json!({ "mensaje": "ok" })))
}

fn to_json<T: serde::Serialize>(value: &T) -> Reply {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|_| Failure(StatusCode::INTERNAL_SERVER_ERROR, "Error interno"))
}

fn require_advisor(caller: &Caller) -> Result<(), Failure> {
    if caller.0.role == Role::Advisor {
        Ok(())
    } else {
        Err(Failure(StatusCode::FORBIDDEN, "Acceso denegado"))
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "agro-api-mock"
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    correo: String,
    contrasena: String,
}

pub async fn login(State(state): State<MockState>, Form(form): Form<LoginForm>) -> Reply {
    let fixture = state.fixture();
    match fixture.user_by_email(&form.correo) {
        Some(user) if user.password == form.contrasena => Ok(Json(json!({
            "token": user.token,
            "rol": user.role.code(),
            "id": user.id,
            "nombre": user.name,
        }))),
        _ => Err(Failure(StatusCode::UNAUTHORIZED, "Credenciales inválidas")),
    }
}

pub async fn register(
    State(state): State<MockState>,
    Json(account): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut fixture = state.fixture();
    if fixture.user_by_email(&account.correo).is_some() {
        return Err(Failure(StatusCode::CONFLICT, "El correo ya está registrado"));
    }
    let id = fixture.next_id();
    fixture.users.push(User {
        id,
        name: account.nombre,
        email: account.correo,
        phone: account.telefono,
        password: account.contrasena,
        role: account.rol,
        token: format!("token-{}", id),
        location: None,
    });
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

#[derive(Debug, Deserialize)]
pub struct RecoveryBody {
    correo: String,
}

pub async fn recover_password(Json(body): Json<RecoveryBody>) -> Reply {
    tracing::info!("Password recovery requested for {}", body.correo);
    Ok(Json(json!({
        "mensaje": "Si el correo existe, recibirás instrucciones"
    })))
}

pub async fn get_profile(
    State(state): State<MockState>,
    Path(id): Path<i64>,
) -> Reply {
    let fixture = state.fixture();
    let user = fixture.users.iter().find(|u| u.id == id).ok_or_else(not_found)?;
    to_json(&user.profile())
}

pub async fn update_profile(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(update): Json<ProfileUpdate>,
) -> Reply {
    if caller.0.id != id {
        return Err(Failure(StatusCode::FORBIDDEN, "Acceso denegado"));
    }
    let mut fixture = state.fixture();
    let user = fixture.user_mut(id).ok_or_else(not_found)?;
    if let Some(name) = update.name {
        user.name = name;
    }
    if let Some(email) = update.email {
        user.email = email;
    }
    // An empty string clears the stored number.
    if let Some(phone) = update.phone {
        user.phone = Some(phone).filter(|p| !p.is_empty());
    }
    if let Some(password) = update.password {
        user.password = password;
    }
    ok()
}

pub async fn list_clients(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    require_advisor(&caller)?;
    let fixture = state.fixture();
    let clients: Vec<_> = fixture
        .users
        .iter()
        .filter(|u| u.role == Role::Farmer)
        .map(|u| u.client())
        .collect();
    to_json(&clients)
}

pub async fn update_client(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(update): Json<ClientUpdate>,
) -> Reply {
    require_advisor(&caller)?;
    let mut fixture = state.fixture();
    let user = fixture
        .user_mut(id)
        .filter(|u| u.role == Role::Farmer)
        .ok_or_else(not_found)?;
    user.name = update.name;
    user.email = update.email;
    user.phone = update.phone.filter(|p| !p.is_empty());
    ok()
}

pub async fn delete_client(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Reply {
    require_advisor(&caller)?;
    let mut fixture = state.fixture();
    let before = fixture.users.len();
    fixture.users.retain(|u| !(u.id == id && u.role == Role::Farmer));
    if fixture.users.len() == before {
        return Err(not_found());
    }
    ok()
}

pub async fn list_plans(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    let fixture = state.fixture();
    let plans: Vec<_> = fixture
        .plans
        .iter()
        .filter(|p| caller.0.role == Role::Advisor || p.owner_id == caller.0.id)
        .cloned()
        .collect();
    to_json(&plans)
}

pub async fn list_tasks(State(state): State<MockState>, Path(plan_id): Path<i64>) -> Reply {
    let fixture = state.fixture();
    let tasks: Vec<_> = fixture
        .tasks
        .iter()
        .filter(|t| t.plan_id == plan_id)
        .cloned()
        .collect();
    to_json(&tasks)
}

pub async fn create_task(
    State(state): State<MockState>,
    Json(input): Json<TaskInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut fixture = state.fixture();
    if !fixture.plans.iter().any(|p| p.id == input.plan_id) {
        return Err(Failure(StatusCode::BAD_REQUEST, "El plan no existe"));
    }
    let id = fixture.next_id();
    fixture.tasks.push(Task {
        id,
        plan_id: input.plan_id,
        title: input.title,
        description: input.description,
        due_date: input.due_date,
        status: input.status,
    });
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_task(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    Json(input): Json<TaskInput>,
) -> Reply {
    let mut fixture = state.fixture();
    let task = fixture
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(not_found)?;
    task.title = input.title;
    task.description = input.description;
    task.due_date = input.due_date;
    task.status = input.status;
    ok()
}

pub async fn set_task_status(
    State(state): State<MockState>,
    Path((id, code)): Path<(i64, i64)>,
) -> Reply {
    let status = TaskStatus::from(code);
    if matches!(status, TaskStatus::Unknown(_)) {
        return Err(Failure(StatusCode::BAD_REQUEST, "Estado inválido"));
    }
    let mut fixture = state.fixture();
    let task = fixture
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(not_found)?;
    task.status = status;
    ok()
}

pub async fn delete_task(State(state): State<MockState>, Path(id): Path<i64>) -> Reply {
    let mut fixture = state.fixture();
    let before = fixture.tasks.len();
    fixture.tasks.retain(|t| t.id != id);
    if fixture.tasks.len() == before {
        return Err(not_found());
    }
    ok()
}

pub async fn list_pest_reports(State(state): State<MockState>) -> Reply {
    to_json(&state.fixture().pest_reports)
}

pub async fn create_pest_report(
    State(state): State<MockState>,
    Json(input): Json<PestReportInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut fixture = state.fixture();
    let id = fixture.next_id();
    fixture.pest_reports.push(PestReport {
        id,
        plan_id: input.plan_id,
        pest: input.pest,
        description: input.description,
        reported_on: Some(chrono::Local::now().date_naive()),
    });
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn performance_report(
    State(state): State<MockState>,
    Path(plan_id): Path<i64>,
) -> Reply {
    let fixture = state.fixture();
    if !fixture.plans.iter().any(|p| p.id == plan_id) {
        return Err(not_found());
    }
    let tasks: Vec<_> = fixture.tasks.iter().filter(|t| t.plan_id == plan_id).collect();
    let report = PerformanceReport {
        plan_id,
        total_tasks: tasks.len() as u32,
        completed_tasks: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count() as u32,
        pest_reports: fixture
            .pest_reports
            .iter()
            .filter(|r| r.plan_id == plan_id)
            .count() as u32,
        expected_yield: fixture
            .expected_yields
            .iter()
            .find(|(id, _)| *id == plan_id)
            .map(|(_, y)| *y),
        actual_yield: None,
    };
    to_json(&report)
}

fn requests_of(state: &MockState, kind: Option<RequestKind>) -> Vec<Solicitud> {
    state
        .fixture()
        .requests
        .iter()
        .filter(|r| kind.map_or(true, |k| r.kind == k))
        .cloned()
        .collect()
}

pub async fn all_requests(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    require_advisor(&caller)?;
    to_json(&requests_of(&state, None))
}

pub async fn advisory_requests(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    require_advisor(&caller)?;
    to_json(&requests_of(&state, Some(RequestKind::Advisory)))
}

pub async fn workshop_requests(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    require_advisor(&caller)?;
    to_json(&requests_of(&state, Some(RequestKind::Workshop)))
}

pub async fn my_workshop_requests(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    let mine: Vec<_> = requests_of(&state, Some(RequestKind::Workshop))
        .into_iter()
        .filter(|r| r.requester_id == Some(caller.0.id))
        .collect();
    to_json(&mine)
}

fn set_request_status(state: &MockState, kind: RequestKind, id: i64, code: i64) -> Reply {
    let status = RequestStatus::from(code);
    if matches!(status, RequestStatus::Unknown(_)) {
        return Err(Failure(StatusCode::BAD_REQUEST, "Estado inválido"));
    }
    let mut fixture = state.fixture();
    let request = fixture
        .requests
        .iter_mut()
        .find(|r| r.id == id && r.kind == kind)
        .ok_or_else(not_found)?;
    request.status = status;
    ok()
}

pub async fn set_advisory_status(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path((id, code)): Path<(i64, i64)>,
) -> Reply {
    require_advisor(&caller)?;
    set_request_status(&state, RequestKind::Advisory, id, code)
}

pub async fn set_workshop_request_status(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path((id, code)): Path<(i64, i64)>,
) -> Reply {
    require_advisor(&caller)?;
    set_request_status(&state, RequestKind::Workshop, id, code)
}

pub async fn request_workshops(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<WorkshopRequestInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    if input.workshop_ids.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Selecciona al menos un taller"));
    }
    let mut fixture = state.fixture();
    let mut created = Vec::new();
    for workshop_id in input.workshop_ids {
        let name = fixture
            .workshops
            .iter()
            .find(|w| w.id == workshop_id)
            .map(|w| w.name.clone())
            .ok_or(Failure(StatusCode::BAD_REQUEST, "Taller inexistente"))?;
        let id = fixture.next_id();
        fixture.requests.push(Solicitud {
            id,
            kind: RequestKind::Workshop,
            status: RequestStatus::Pending,
            requester: caller.0.name.clone(),
            requester_id: Some(caller.0.id),
            workshop_id: Some(workshop_id),
            workshop_name: Some(name),
            details: None,
            created_at: Some(chrono::Local::now().date_naive().to_string()),
            payment_proof: None,
        });
        created.push(id);
    }
    Ok((StatusCode::CREATED, Json(json!({ "ids": created }))))
}

pub async fn submit_payment_proof(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Json(proof): Json<PaymentProof>,
) -> Reply {
    let mut fixture = state.fixture();
    let request = fixture
        .requests
        .iter_mut()
        .find(|r| r.id == proof.request_id && r.requester_id == Some(caller.0.id))
        .ok_or_else(not_found)?;
    if request.status != RequestStatus::Accepted {
        return Err(Failure(
            StatusCode::CONFLICT,
            "La solicitud no está esperando un pago",
        ));
    }
    request.payment_proof = Some(proof.reference);
    request.status = RequestStatus::InReview;
    ok()
}

pub async fn list_workshops(State(state): State<MockState>) -> Reply {
    to_json(&state.fixture().workshops)
}

pub async fn workshops_by_status(
    State(state): State<MockState>,
    Path(code): Path<i64>,
) -> Reply {
    let status = WorkshopStatus::from(code);
    let workshops: Vec<_> = state
        .fixture()
        .workshops
        .iter()
        .filter(|w| w.status == status)
        .cloned()
        .collect();
    to_json(&workshops)
}

pub async fn create_workshop(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Json(input): Json<WorkshopInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    require_advisor(&caller)?;
    let mut fixture = state.fixture();
    let id = fixture.next_id();
    fixture.workshops.push(Workshop {
        id,
        name: input.name,
        description: input.description,
        date: input.date,
        cost: input.cost,
        capacity: None,
        status: input.status,
    });
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_workshop(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(input): Json<WorkshopInput>,
) -> Reply {
    require_advisor(&caller)?;
    let mut fixture = state.fixture();
    let workshop = fixture
        .workshops
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or_else(not_found)?;
    workshop.name = input.name;
    workshop.description = input.description;
    workshop.date = input.date;
    workshop.cost = input.cost;
    workshop.status = input.status;
    ok()
}

pub async fn delete_workshop(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Reply {
    require_advisor(&caller)?;
    let mut fixture = state.fixture();
    let before = fixture.workshops.len();
    fixture.workshops.retain(|w| w.id != id);
    if fixture.workshops.len() == before {
        return Err(not_found());
    }
    ok()
}

pub async fn crops(State(state): State<MockState>) -> Reply {
    to_json(&state.fixture().crops)
}

pub async fn soil_types(State(state): State<MockState>) -> Reply {
    to_json(&state.fixture().soil_types)
}

fn notifications_for(state: &MockState, role: Role) -> Reply {
    let notifications: Vec<_> = state
        .fixture()
        .notifications
        .iter()
        .filter(|(r, _)| *r == role)
        .map(|(_, n)| n.clone())
        .collect();
    to_json(&notifications)
}

pub async fn advisor_notifications(
    State(state): State<MockState>,
    Extension(caller): Extension<Caller>,
) -> Reply {
    require_advisor(&caller)?;
    notifications_for(&state, Role::Advisor)
}

pub async fn farmer_notifications(State(state): State<MockState>) -> Reply {
    notifications_for(&state, Role::Farmer)
}
