use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::ApiFixture;
use crate::handlers::{self, Caller};

const PUBLIC_PATHS: [&str; 4] = ["/health", "/login", "/registro", "/recuperarContrasena"];
const MAX_BODY: usize = 1024 * 1024;

/// One request as it reached the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Every `Authorization` header value, in order.
    pub authorization: Vec<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Clone)]
struct CannedFailure {
    status: StatusCode,
    message: Option<String>,
}

#[derive(Clone)]
pub struct MockState {
    fixture: Arc<Mutex<ApiFixture>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    failures: Arc<Mutex<HashMap<String, CannedFailure>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockState {
    pub fn new(fixture: ApiFixture) -> Self {
        Self {
            fixture: Arc::new(Mutex::new(fixture)),
            requests: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn fixture(&self) -> MutexGuard<'_, ApiFixture> {
        locked(&self.fixture)
    }

    fn canned_failure(&self, path: &str) -> Option<CannedFailure> {
        locked(&self.failures).get(path).cloned()
    }
}

async fn record_and_authorize(
    State(state): State<MockState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
    };
    let path = parts.uri.path().to_string();
    let authorization: Vec<String> = parts
        .headers
        .get_all(header::AUTHORIZATION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();

    locked(&state.requests).push(RecordedRequest {
        method: parts.method.to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        content_type: parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    if let Some(failure) = state.canned_failure(&path) {
        tracing::debug!("Canned {} for {}", failure.status, path);
        let body = json!({ "mensaje": failure.message });
        return (failure.status, Json(body)).into_response();
    }

    if !PUBLIC_PATHS.contains(&path.as_str()) {
        let caller = match authorization.as_slice() {
            [single] => single
                .strip_prefix("Bearer ")
                .and_then(|token| state.fixture().user_by_token(token).cloned()),
            _ => None,
        };
        match caller {
            Some(user) => {
                parts.extensions.insert(Caller(user));
            }
            None => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "mensaje": "Token inválido o ausente" })),
                )
                    .into_response();
            }
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/login", post(handlers::login))
        .route("/registro", post(handlers::register))
        .route("/recuperarContrasena", post(handlers::recover_password))
        .route(
            "/perfil/{id}",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/administrarClientes", get(handlers::list_clients))
        .route(
            "/administrarClientes/{id}",
            put(handlers::update_client).delete(handlers::delete_client),
        )
        .route("/obtenerPlanCultivos", get(handlers::list_plans))
        .route("/tarea", post(handlers::create_task))
        .route(
            "/tarea/{id}",
            get(handlers::list_tasks)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tarea/{id}/{estado}", patch(handlers::set_task_status))
        .route(
            "/reporteplaga",
            get(handlers::list_pest_reports).post(handlers::create_pest_report),
        )
        .route(
            "/obtenerReporteDesempeno/{id}",
            get(handlers::performance_report),
        )
        .route("/solicitudesTallerAsesoria", get(handlers::all_requests))
        .route("/solicitudasesoria", get(handlers::advisory_requests))
        .route(
            "/solicitudasesoria/{id}/{estado}",
            patch(handlers::set_advisory_status),
        )
        .route(
            "/solicitudtaller",
            get(handlers::workshop_requests).post(handlers::request_workshops),
        )
        .route(
            "/solicitudtaller/misolicitudes",
            get(handlers::my_workshop_requests),
        )
        .route(
            "/solicitudtaller/comprobante",
            post(handlers::submit_payment_proof),
        )
        .route(
            "/solicitudtaller/{id}/{estado}",
            patch(handlers::set_workshop_request_status),
        )
        .route(
            "/talleres",
            get(handlers::list_workshops).post(handlers::create_workshop),
        )
        .route(
            "/talleres/{id}",
            put(handlers::update_workshop).delete(handlers::delete_workshop),
        )
        .route(
            "/getTallerForStatus/{estado}",
            get(handlers::workshops_by_status),
        )
        .route("/catalogo/cultivos", get(handlers::crops))
        .route("/catalogo/tipoterreno", get(handlers::soil_types))
        .route(
            "/notificacionesagronomo",
            get(handlers::advisor_notifications),
        )
        .route(
            "/notificacionesagricultor",
            get(handlers::farmer_notifications),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            record_and_authorize,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A running mock API bound to an ephemeral local port.
pub struct MockApi {
    addr: SocketAddr,
    state: MockState,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl MockApi {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(ApiFixture::create_test_fixture()).await
    }

    pub async fn start_with(fixture: ApiFixture) -> anyhow::Result<Self> {
        let state = MockState::new(fixture);
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tracing::info!("Mock agro API listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = served {
                tracing::error!("Mock agro API error: {}", e);
            }
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        locked(&self.state.requests).clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        locked(&self.state.requests).clear();
    }

    /// Makes every request to `path` fail with `status`, whatever the method.
    pub fn fail_path(&self, path: &str, status: u16, message: Option<&str>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        locked(&self.state.failures).insert(
            path.to_string(),
            CannedFailure {
                status,
                message: message.map(str::to_string),
            },
        );
    }

    pub fn forbid(&self, path: &str) {
        self.fail_path(path, 403, Some("Acceso denegado"));
    }

    pub fn fixture(&self) -> ApiFixture {
        self.state.fixture().clone()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            tracing::warn!("Mock agro API already stopped");
        }
    }
}
