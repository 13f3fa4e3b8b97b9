use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let sid = std::env::var("MOCK_ACCOUNT_SID").unwrap_or_else(|_| "ACmock".to_string());
    let secret = std::env::var("MOCK_AUTH_TOKEN").unwrap_or_else(|_| "secret".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, account = %sid, "mock Twilio API listening");
    mock_server::run(listener, mock_server::Credentials::new(sid, secret)).await
}
