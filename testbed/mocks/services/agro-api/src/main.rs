use agro_api_mock::{router, ApiFixture, MockState};
use std::env;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let addr: SocketAddr = env::var("AGRO_MOCK_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    let app = router(MockState::new(ApiFixture::create_test_fixture()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting agro API mock on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
