mod error;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::TextGenerator;

const DEFAULT_PORT: u16 = 4000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port = match std::env::var("PORT") {
        Ok(raw) => match raw.trim().parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                tracing::error!(value = %raw, error = %e, "invalid PORT");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    // Initialize LLM client; exits with status 1 if the key is missing.
    let llm = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            client
        }
        Err(e) => {
            tracing::error!(error = %e, "LLM client not configured");
            std::process::exit(1);
        }
    };

    let state = state::AppState::new(Arc::new(llm));
    let app = routes::app(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "wallah relay listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
