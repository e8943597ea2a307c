//! Client of the agricultural advisory API
//!
//! Pages never talk to the network or to storage directly. They receive an
//! [`AgroApi`] implementation and a [`SessionStore`]; the HTTP implementation
//! routes every call through the [`AuthenticatedClient`], which owns the
//! bearer header and the 401/403 policy in one place.

use std::sync::Arc;

use agro_types::{
    Client, ClientUpdate, Crop, CultivationPlan, LoginRequest, LoginResponse, Notification,
    PasswordRecoveryRequest, PaymentProof, PerformanceReport, PestReport, PestReportInput,
    Profile, ProfileUpdate, RegistrationRequest, RequestStatus, Role, Solicitud, SoilType, Task,
    TaskInput, TaskStatus, Workshop, WorkshopInput, WorkshopRequestInput, WorkshopStatus,
};
use async_trait::async_trait;

pub mod error;
pub mod http_client;
pub mod request;
pub mod session_store;
pub mod storage;

pub use error::{ApiError, SessionError, StorageError};
pub use request::{ApiResponse, AuthenticatedClient, RequestBody, RequestOptions};
pub use session_store::SessionStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub type ApiResult<T> = Result<T, ApiError>;

/// Typed operations of the remote API.
#[async_trait]
pub trait AgroApi: Send + Sync {
    // Account
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse>;
    async fn register(&self, account: &RegistrationRequest) -> ApiResult<()>;
    async fn recover_password(&self, request: &PasswordRecoveryRequest) -> ApiResult<()>;
    async fn profile(&self, user_id: i64) -> ApiResult<Profile>;
    async fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> ApiResult<()>;

    // Advisor client management
    async fn clients(&self) -> ApiResult<Vec<Client>>;
    async fn update_client(&self, client_id: i64, update: &ClientUpdate) -> ApiResult<()>;
    async fn delete_client(&self, client_id: i64) -> ApiResult<()>;

    // Cultivation plans
    async fn plans(&self) -> ApiResult<Vec<CultivationPlan>>;
    async fn tasks(&self, plan_id: i64) -> ApiResult<Vec<Task>>;
    async fn create_task(&self, task: &TaskInput) -> ApiResult<()>;
    async fn update_task(&self, task_id: i64, task: &TaskInput) -> ApiResult<()>;
    async fn set_task_status(&self, task_id: i64, status: TaskStatus) -> ApiResult<()>;
    async fn delete_task(&self, task_id: i64) -> ApiResult<()>;
    async fn pest_reports(&self) -> ApiResult<Vec<PestReport>>;
    async fn create_pest_report(&self, report: &PestReportInput) -> ApiResult<()>;
    async fn performance_report(&self, plan_id: i64) -> ApiResult<PerformanceReport>;

    // Requests
    async fn all_requests(&self) -> ApiResult<Vec<Solicitud>>;
    async fn advisory_requests(&self) -> ApiResult<Vec<Solicitud>>;
    async fn set_advisory_request_status(&self, id: i64, status: RequestStatus) -> ApiResult<()>;
    async fn workshop_requests(&self) -> ApiResult<Vec<Solicitud>>;
    async fn my_workshop_requests(&self) -> ApiResult<Vec<Solicitud>>;
    async fn request_workshops(&self, selection: &WorkshopRequestInput) -> ApiResult<()>;
    async fn submit_payment_proof(&self, proof: &PaymentProof) -> ApiResult<()>;
    async fn set_workshop_request_status(&self, id: i64, status: RequestStatus) -> ApiResult<()>;

    // Workshops
    async fn workshops(&self) -> ApiResult<Vec<Workshop>>;
    async fn workshops_by_status(&self, status: WorkshopStatus) -> ApiResult<Vec<Workshop>>;
    async fn create_workshop(&self, workshop: &WorkshopInput) -> ApiResult<()>;
    async fn update_workshop(&self, id: i64, workshop: &WorkshopInput) -> ApiResult<()>;
    async fn delete_workshop(&self, id: i64) -> ApiResult<()>;

    // Catalogs and feeds
    async fn crops(&self) -> ApiResult<Vec<Crop>>;
    async fn soil_types(&self) -> ApiResult<Vec<SoilType>>;
    async fn notifications(&self, role: Role) -> ApiResult<Vec<Notification>>;
}

/// Factory for creating AgroApi instances
pub struct AgroClientFactory;

impl AgroClientFactory {
    pub fn create_http_client(
        base_url: impl Into<String>,
        sessions: SessionStore,
    ) -> Arc<dyn AgroApi> {
        Arc::new(http_client::HttpAgroClient::new(AuthenticatedClient::new(
            base_url, sessions,
        )))
    }

    pub fn create_with_client(client: AuthenticatedClient) -> Arc<dyn AgroApi> {
        Arc::new(http_client::HttpAgroClient::new(client))
    }
}
