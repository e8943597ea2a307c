//! In-memory `AgroApi` for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use agro_client::{AgroApi, ApiError, ApiResult, MemoryStore, SessionStore};
use agro_types::*;
use async_trait::async_trait;
use chrono::NaiveDate;

use super::PageContext;
use crate::domain::models::Language;

#[derive(Default)]
pub struct FakeApi {
    pub login: Option<LoginResponse>,
    pub profile: Option<Profile>,
    pub clients: Vec<Client>,
    pub plans: Vec<CultivationPlan>,
    pub tasks: Vec<Task>,
    pub pest_reports: Vec<PestReport>,
    pub performance: PerformanceReport,
    pub requests: Vec<Solicitud>,
    pub my_requests: Vec<Solicitud>,
    pub workshops: Vec<Workshop>,
    pub crops: Vec<Crop>,
    pub soil_types: Vec<SoilType>,
    pub notifications: Vec<Notification>,
    pub failures: HashMap<&'static str, ApiError>,
    /// Failures that only start with the second call of a method.
    pub later_failures: HashMap<&'static str, ApiError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn failing(mut self, method: &'static str, err: ApiError) -> Self {
        self.failures.insert(method, err);
        self
    }

    pub fn failing_after_first(mut self, method: &'static str, err: ApiError) -> Self {
        self.later_failures.insert(method, err);
        self
    }

    /// Calls made so far, as `method` or `method args`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, method: &str) -> bool {
        self.calls()
            .iter()
            .any(|c| c == method || c.starts_with(&format!("{method} ")))
    }

    fn call(&self, method: &'static str, args: String) -> ApiResult<()> {
        let entry = if args.is_empty() {
            method.to_string()
        } else {
            format!("{method} {args}")
        };
        let earlier = self.calls().iter().filter(|c| c.split(' ').next() == Some(method)).count();
        self.calls.lock().unwrap().push(entry);
        if let Some(err) = self.failures.get(method) {
            return Err(err.clone());
        }
        match self.later_failures.get(method) {
            Some(err) if earlier > 0 => Err(err.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AgroApi for FakeApi {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        self.call("login", credentials.correo.clone())?;
        self.login.clone().ok_or(ApiError::Api {
            status: 401,
            message: Some("Credenciales inválidas".to_string()),
        })
    }

    async fn register(&self, account: &RegistrationRequest) -> ApiResult<()> {
        self.call("register", account.correo.clone())
    }

    async fn recover_password(&self, request: &PasswordRecoveryRequest) -> ApiResult<()> {
        self.call("recover_password", request.correo.clone())
    }

    async fn profile(&self, user_id: i64) -> ApiResult<Profile> {
        self.call("profile", user_id.to_string())?;
        self.profile.clone().ok_or(ApiError::Api {
            status: 404,
            message: None,
        })
    }

    async fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> ApiResult<()> {
        let fields = serde_json::to_string(update).unwrap();
        self.call("update_profile", format!("{user_id} {fields}"))
    }

    async fn clients(&self) -> ApiResult<Vec<Client>> {
        self.call("clients", String::new())?;
        Ok(self.clients.clone())
    }

    async fn update_client(&self, client_id: i64, update: &ClientUpdate) -> ApiResult<()> {
        self.call("update_client", format!("{client_id} {}", update.name))
    }

    async fn delete_client(&self, client_id: i64) -> ApiResult<()> {
        self.call("delete_client", client_id.to_string())
    }

    async fn plans(&self) -> ApiResult<Vec<CultivationPlan>> {
        self.call("plans", String::new())?;
        Ok(self.plans.clone())
    }

    async fn tasks(&self, plan_id: i64) -> ApiResult<Vec<Task>> {
        self.call("tasks", plan_id.to_string())?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.plan_id == plan_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: &TaskInput) -> ApiResult<()> {
        self.call("create_task", format!("{} {}", task.plan_id, task.title))
    }

    async fn update_task(&self, task_id: i64, task: &TaskInput) -> ApiResult<()> {
        self.call("update_task", format!("{task_id} {}", task.title))
    }

    async fn set_task_status(&self, task_id: i64, status: TaskStatus) -> ApiResult<()> {
        self.call("set_task_status", format!("{task_id} {}", status.code()))
    }

    async fn delete_task(&self, task_id: i64) -> ApiResult<()> {
        self.call("delete_task", task_id.to_string())
    }

    async fn pest_reports(&self) -> ApiResult<Vec<PestReport>> {
        self.call("pest_reports", String::new())?;
        Ok(self.pest_reports.clone())
    }

    async fn create_pest_report(&self, report: &PestReportInput) -> ApiResult<()> {
        self.call("create_pest_report", format!("{} {}", report.plan_id, report.pest))
    }

    async fn performance_report(&self, plan_id: i64) -> ApiResult<PerformanceReport> {
        self.call("performance_report", plan_id.to_string())?;
        Ok(self.performance.clone())
    }

    async fn all_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.call("all_requests", String::new())?;
        Ok(self.requests.clone())
    }

    async fn advisory_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.call("advisory_requests", String::new())?;
        Ok(self.of_kind(RequestKind::Advisory))
    }

    async fn set_advisory_request_status(&self, id: i64, status: RequestStatus) -> ApiResult<()> {
        self.call("set_advisory_request_status", format!("{id} {}", status.code()))
    }

    async fn workshop_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.call("workshop_requests", String::new())?;
        Ok(self.of_kind(RequestKind::Workshop))
    }

    async fn my_workshop_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.call("my_workshop_requests", String::new())?;
        Ok(self.my_requests.clone())
    }

    async fn request_workshops(&self, selection: &WorkshopRequestInput) -> ApiResult<()> {
        self.call("request_workshops", format!("{:?}", selection.workshop_ids))
    }

    async fn submit_payment_proof(&self, proof: &PaymentProof) -> ApiResult<()> {
        self.call("submit_payment_proof", format!("{} {}", proof.request_id, proof.reference))
    }

    async fn set_workshop_request_status(&self, id: i64, status: RequestStatus) -> ApiResult<()> {
        self.call("set_workshop_request_status", format!("{id} {}", status.code()))
    }

    async fn workshops(&self) -> ApiResult<Vec<Workshop>> {
        self.call("workshops", String::new())?;
        Ok(self.workshops.clone())
    }

    async fn workshops_by_status(&self, status: WorkshopStatus) -> ApiResult<Vec<Workshop>> {
        self.call("workshops_by_status", status.code().to_string())?;
        Ok(self
            .workshops
            .iter()
            .filter(|w| w.status == status)
            .cloned()
            .collect())
    }

    async fn create_workshop(&self, workshop: &WorkshopInput) -> ApiResult<()> {
        self.call("create_workshop", workshop.name.clone())
    }

    async fn update_workshop(&self, id: i64, workshop: &WorkshopInput) -> ApiResult<()> {
        self.call("update_workshop", format!("{id} {}", workshop.name))
    }

    async fn delete_workshop(&self, id: i64) -> ApiResult<()> {
        self.call("delete_workshop", id.to_string())
    }

    async fn crops(&self) -> ApiResult<Vec<Crop>> {
        self.call("crops", String::new())?;
        Ok(self.crops.clone())
    }

    async fn soil_types(&self) -> ApiResult<Vec<SoilType>> {
        self.call("soil_types", String::new())?;
        Ok(self.soil_types.clone())
    }

    async fn notifications(&self, role: Role) -> ApiResult<Vec<Notification>> {
        self.call("notifications", role.code().to_string())?;
        Ok(self.notifications.clone())
    }
}

impl FakeApi {
    fn of_kind(&self, kind: RequestKind) -> Vec<Solicitud> {
        self.requests
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

pub fn advisor() -> Session {
    Session::new(5, Role::Advisor, "abc")
}

pub fn farmer() -> Session {
    Session::new(7, Role::Farmer, "xyz")
}

/// Spanish context over an in-memory store holding `session`.
pub fn context(api: FakeApi, session: Option<Session>) -> (PageContext, Arc<FakeApi>) {
    let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
    if let Some(session) = session {
        sessions.save(&session).unwrap();
    }
    let api = Arc::new(api);
    let ctx = PageContext::new(api.clone(), sessions, Language::Es, today());
    (ctx, api)
}

pub fn plan(id: i64, owner_id: i64, crops: Vec<i64>) -> CultivationPlan {
    CultivationPlan {
        id,
        name: format!("Plan {id}"),
        owner_id,
        owner_name: None,
        crops,
        soil_type_id: Some(1),
        hectares: Some(2.5),
        start_date: NaiveDate::from_ymd_opt(2023, 10, 1),
    }
}

pub fn task(id: i64, plan_id: i64, status: TaskStatus, due: Option<NaiveDate>) -> Task {
    Task {
        id,
        plan_id,
        title: format!("Tarea {id}"),
        description: None,
        due_date: due,
        status,
    }
}

pub fn solicitud(id: i64, kind: RequestKind, status: RequestStatus) -> Solicitud {
    Solicitud {
        id,
        kind,
        status,
        requester: "Lucía Pérez".to_string(),
        requester_id: Some(7),
        workshop_id: None,
        workshop_name: None,
        details: None,
        created_at: None,
        payment_proof: None,
    }
}

pub fn workshop(id: i64, status: WorkshopStatus) -> Workshop {
    Workshop {
        id,
        name: format!("Taller {id}"),
        description: None,
        date: NaiveDate::from_ymd_opt(2024, 6, 1),
        cost: Some(350.0),
        capacity: None,
        status,
    }
}

pub fn profile(id: i64, name: &str) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        email: "agronomo@agro.test".to_string(),
        phone: None,
        role: None,
    }
}
