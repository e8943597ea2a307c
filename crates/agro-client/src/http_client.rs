use agro_types::{
    Client, ClientUpdate, Crop, CultivationPlan, LoginRequest, LoginResponse, Notification,
    PasswordRecoveryRequest, PaymentProof, PerformanceReport, PestReport, PestReportInput,
    Profile, ProfileUpdate, RegistrationRequest, RequestStatus, Role, Solicitud, SoilType, Task,
    TaskInput, TaskStatus, Workshop, WorkshopInput, WorkshopRequestInput, WorkshopStatus,
};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::request::{AuthenticatedClient, RequestOptions};
use crate::{AgroApi, ApiError, ApiResult};

/// HTTP implementation of [`AgroApi`] against the advisory API.
pub struct HttpAgroClient {
    client: AuthenticatedClient,
}

impl HttpAgroClient {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.client
            .request(Method::GET, path, RequestOptions::default())
            .await?
            .json()
    }

    async fn send<B: Serialize + Sync>(&self, method: Method, path: &str, body: &B) -> ApiResult<()> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(method, path, RequestOptions::json(body))
            .await?;
        Ok(())
    }

    async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        self.client
            .request(method, path, RequestOptions::default())
            .await?;
        Ok(())
    }

    async fn send_public<B: Serialize + Sync>(&self, path: &str, body: &B) -> ApiResult<()> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .public_request(Method::POST, path, RequestOptions::json(body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AgroApi for HttpAgroClient {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let options = RequestOptions::form([
            ("correo", credentials.correo.as_str()),
            ("contrasena", credentials.contrasena.as_str()),
        ]);
        self.client
            .public_request(Method::POST, "/login", options)
            .await?
            .json()
    }

    async fn register(&self, account: &RegistrationRequest) -> ApiResult<()> {
        self.send_public("/registro", account).await
    }

    async fn recover_password(&self, request: &PasswordRecoveryRequest) -> ApiResult<()> {
        self.send_public("/recuperarContrasena", request).await
    }

    async fn profile(&self, user_id: i64) -> ApiResult<Profile> {
        self.get(&format!("/perfil/{}", user_id)).await
    }

    async fn update_profile(&self, user_id: i64, update: &ProfileUpdate) -> ApiResult<()> {
        self.send(Method::PUT, &format!("/perfil/{}", user_id), update)
            .await
    }

    async fn clients(&self) -> ApiResult<Vec<Client>> {
        self.get("/administrarClientes").await
    }

    async fn update_client(&self, client_id: i64, update: &ClientUpdate) -> ApiResult<()> {
        self.send(
            Method::PUT,
            &format!("/administrarClientes/{}", client_id),
            update,
        )
        .await
    }

    async fn delete_client(&self, client_id: i64) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/administrarClientes/{}", client_id))
            .await
    }

    async fn plans(&self) -> ApiResult<Vec<CultivationPlan>> {
        self.get("/obtenerPlanCultivos").await
    }

    async fn tasks(&self, plan_id: i64) -> ApiResult<Vec<Task>> {
        self.get(&format!("/tarea/{}", plan_id)).await
    }

    async fn create_task(&self, task: &TaskInput) -> ApiResult<()> {
        self.send(Method::POST, "/tarea", task).await
    }

    async fn update_task(&self, task_id: i64, task: &TaskInput) -> ApiResult<()> {
        self.send(Method::PUT, &format!("/tarea/{}", task_id), task)
            .await
    }

    async fn set_task_status(&self, task_id: i64, status: TaskStatus) -> ApiResult<()> {
        self.send_empty(
            Method::PATCH,
            &format!("/tarea/{}/{}", task_id, status.code()),
        )
        .await
    }

    async fn delete_task(&self, task_id: i64) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/tarea/{}", task_id))
            .await
    }

    async fn pest_reports(&self) -> ApiResult<Vec<PestReport>> {
        self.get("/reporteplaga").await
    }

    async fn create_pest_report(&self, report: &PestReportInput) -> ApiResult<()> {
        self.send(Method::POST, "/reporteplaga", report).await
    }

    async fn performance_report(&self, plan_id: i64) -> ApiResult<PerformanceReport> {
        self.get(&format!("/obtenerReporteDesempeno/{}", plan_id))
            .await
    }

    async fn all_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.get("/solicitudesTallerAsesoria").await
    }

    async fn advisory_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.get("/solicitudasesoria").await
    }

    async fn set_advisory_request_status(&self, id: i64, status: RequestStatus) -> ApiResult<()> {
        self.send_empty(
            Method::PATCH,
            &format!("/solicitudasesoria/{}/{}", id, status.code()),
        )
        .await
    }

    async fn workshop_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.get("/solicitudtaller").await
    }

    async fn my_workshop_requests(&self) -> ApiResult<Vec<Solicitud>> {
        self.get("/solicitudtaller/misolicitudes").await
    }

    async fn request_workshops(&self, selection: &WorkshopRequestInput) -> ApiResult<()> {
        self.send(Method::POST, "/solicitudtaller", selection).await
    }

    async fn submit_payment_proof(&self, proof: &PaymentProof) -> ApiResult<()> {
        self.send(Method::POST, "/solicitudtaller/comprobante", proof)
            .await
    }

    async fn set_workshop_request_status(&self, id: i64, status: RequestStatus) -> ApiResult<()> {
        self.send_empty(
            Method::PATCH,
            &format!("/solicitudtaller/{}/{}", id, status.code()),
        )
        .await
    }

    async fn workshops(&self) -> ApiResult<Vec<Workshop>> {
        self.get("/talleres").await
    }

    async fn workshops_by_status(&self, status: WorkshopStatus) -> ApiResult<Vec<Workshop>> {
        self.get(&format!("/getTallerForStatus/{}", status.code()))
            .await
    }

    async fn create_workshop(&self, workshop: &WorkshopInput) -> ApiResult<()> {
        self.send(Method::POST, "/talleres", workshop).await
    }

    async fn update_workshop(&self, id: i64, workshop: &WorkshopInput) -> ApiResult<()> {
        self.send(Method::PUT, &format!("/talleres/{}", id), workshop)
            .await
    }

    async fn delete_workshop(&self, id: i64) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/talleres/{}", id))
            .await
    }

    async fn crops(&self) -> ApiResult<Vec<Crop>> {
        self.get("/catalogo/cultivos").await
    }

    async fn soil_types(&self) -> ApiResult<Vec<SoilType>> {
        self.get("/catalogo/tipoterreno").await
    }

    async fn notifications(&self, role: Role) -> ApiResult<Vec<Notification>> {
        let path = match role {
            Role::Advisor => "/notificacionesagronomo",
            Role::Farmer => "/notificacionesagricultor",
        };
        self.get(path).await
    }
}
