use std::sync::Arc;

use agro_api_mock::{fixtures, MockApi};
use agro_client::{
    AgroApi, AgroClientFactory, ApiError, AuthenticatedClient, KeyValueStore, MemoryStore,
    RequestOptions, SessionStore,
};
use agro_types::{LoginRequest, RegistrationRequest, Role, Session, TaskStatus};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;

fn advisor_sessions() -> (Arc<MemoryStore>, SessionStore) {
    let memory = Arc::new(MemoryStore::new());
    let sessions = SessionStore::new(memory.clone());
    sessions
        .save(&Session::new(
            fixtures::ADVISOR_ID,
            Role::Advisor,
            fixtures::ADVISOR_TOKEN,
        ))
        .unwrap();
    (memory, sessions)
}

#[tokio::test]
async fn test_exactly_one_authorization_header() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();

    let mut extra = HeaderMap::new();
    extra.insert(AUTHORIZATION, HeaderValue::from_static("Bearer extra"));
    extra.insert("x-client", HeaderValue::from_static("agro-term"));
    let client = AuthenticatedClient::new(api.url(), sessions).with_extra_headers(extra);

    let options = RequestOptions::default()
        .with_header(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));
    let response = client
        .request(Method::GET, "/obtenerPlanCultivos", options)
        .await
        .unwrap();
    assert_eq!(response.status, 200);

    let recorded = api.requests_to("GET", "/obtenerPlanCultivos");
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].authorization, vec!["Bearer abc".to_string()]);
    api.shutdown().await;
}

#[tokio::test]
async fn test_no_stale_token_after_clear() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();
    let client = AuthenticatedClient::new(api.url(), sessions.clone());

    client
        .request(Method::GET, "/administrarClientes", RequestOptions::default())
        .await
        .unwrap();
    sessions.clear();

    let result = client
        .request(Method::GET, "/administrarClientes", RequestOptions::default())
        .await;
    assert_eq!(result.unwrap_err(), ApiError::LoginRequired);
    assert_eq!(api.requests_to("GET", "/administrarClientes").len(), 1);
    api.shutdown().await;
}

#[tokio::test]
async fn test_token_is_read_at_call_time() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();
    let client = AuthenticatedClient::new(api.url(), sessions.clone());

    sessions
        .save(&Session::new(fixtures::FARMER_ID, Role::Farmer, fixtures::FARMER_TOKEN))
        .unwrap();
    client
        .request(Method::GET, "/obtenerPlanCultivos", RequestOptions::default())
        .await
        .unwrap();

    let recorded = api.requests_to("GET", "/obtenerPlanCultivos");
    assert_eq!(recorded[0].authorization, vec!["Bearer xyz".to_string()]);
    api.shutdown().await;
}

#[tokio::test]
async fn test_forbidden_clears_session() {
    let api = MockApi::start().await.unwrap();
    api.forbid("/solicitudesTallerAsesoria");
    let (memory, sessions) = advisor_sessions();
    memory.set("idioma", "en").unwrap();
    let client = AuthenticatedClient::new(api.url(), sessions.clone());

    let result = client
        .request(Method::GET, "/solicitudesTallerAsesoria", RequestOptions::default())
        .await;

    assert_eq!(result.unwrap_err(), ApiError::Unauthorized { status: 403 });
    assert_eq!(sessions.load(), None);
    assert_eq!(memory.get("idioma").unwrap().as_deref(), Some("en"));
    api.shutdown().await;
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let api = MockApi::start().await.unwrap();
    let memory = Arc::new(MemoryStore::new());
    let sessions = SessionStore::new(memory);
    sessions
        .save(&Session::new(9, Role::Farmer, "revoked"))
        .unwrap();
    let client = AuthenticatedClient::new(api.url(), sessions.clone());

    let result = client
        .request(Method::GET, "/obtenerPlanCultivos", RequestOptions::default())
        .await;

    assert_eq!(result.unwrap_err(), ApiError::Unauthorized { status: 401 });
    assert!(sessions.load().is_none());
    api.shutdown().await;
}

#[tokio::test]
async fn test_network_error_keeps_session() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (_, sessions) = advisor_sessions();
    let client = AuthenticatedClient::new(url, sessions.clone());

    let result = client
        .request(Method::GET, "/obtenerPlanCultivos", RequestOptions::default())
        .await;

    assert!(matches!(result, Err(ApiError::Network(_))));
    assert!(sessions.load().is_some());
}

#[tokio::test]
async fn test_business_error_keeps_api_message() {
    let api = MockApi::start().await.unwrap();
    let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
    let agro = AgroClientFactory::create_http_client(api.url(), sessions);

    let result = agro
        .register(&RegistrationRequest {
            nombre: "Otra Lucía".to_string(),
            correo: fixtures::FARMER_EMAIL.to_string(),
            telefono: None,
            contrasena: "cosecha2024".to_string(),
            rol: Role::Farmer,
        })
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.api_message(), Some("El correo ya está registrado"));
    assert!(!err.requires_login());
    api.shutdown().await;
}

#[tokio::test]
async fn test_login_sends_form_without_authorization() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();
    let agro = AgroClientFactory::create_http_client(api.url(), sessions);

    let response = agro
        .login(&LoginRequest {
            correo: fixtures::ADVISOR_EMAIL.to_string(),
            contrasena: fixtures::ADVISOR_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.token, "abc");
    assert_eq!(response.role, Role::Advisor);
    assert_eq!(response.user_id, 5);

    let recorded = &api.requests_to("POST", "/login")[0];
    assert!(recorded.authorization.is_empty());
    assert_eq!(
        recorded.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(recorded.body, "correo=agronomo%40agro.test&contrasena=secreta");
    api.shutdown().await;
}

#[tokio::test]
async fn test_wrong_password_is_not_a_session_failure() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();
    let agro = AgroClientFactory::create_http_client(api.url(), sessions.clone());

    let err = agro
        .login(&LoginRequest {
            correo: fixtures::ADVISOR_EMAIL.to_string(),
            contrasena: "equivocada".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Api {
            status: 401,
            message: Some("Credenciales inválidas".to_string())
        }
    );
    assert!(sessions.load().is_some());
    api.shutdown().await;
}

#[tokio::test]
async fn test_typed_task_calls() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();
    let agro = AgroClientFactory::create_http_client(api.url(), sessions);

    let tasks = agro.tasks(1).await.unwrap();
    assert_eq!(tasks.len(), 2);

    agro.set_task_status(1, TaskStatus::Completed).await.unwrap();
    assert_eq!(api.requests_to("PATCH", "/tarea/1/2").len(), 1);

    let tasks = agro.tasks(1).await.unwrap();
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Completed));
    api.shutdown().await;
}

#[tokio::test]
async fn test_notifications_per_role() {
    let api = MockApi::start().await.unwrap();
    let (_, sessions) = advisor_sessions();
    let agro = AgroClientFactory::create_http_client(api.url(), sessions);

    let notifications = agro.notifications(Role::Advisor).await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(api.requests_to("GET", "/notificacionesagronomo").len(), 1);
    api.shutdown().await;
}
