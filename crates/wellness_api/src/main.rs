use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;

use terra_client::TerraClient;
use terra_client::http_client::ReqwestTerraClient;
use wellness_api::config::AppConfig;
use wellness_api::llm::{CompletionClient, OpenAiClient};
use wellness_api::middleware::LoggingMiddleware;
use wellness_api::routes;
use wellness_api::state::AppState;

async fn metrics(handle: PrometheusHandle) -> impl IntoResponse {
    let body = handle.render();
    ([("content-type", "text/plain; version=0.0.4")], body)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from `WELLNESS_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("WELLNESS_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();
    tracing::info!("wellness_api: log filter: {}", log_env);

    let cfg = AppConfig::from_env();

    // Install prometheus recorder
    let builder = PrometheusBuilder::new();
    let handle = builder.install_recorder()?;

    let llm: Option<Arc<dyn CompletionClient>> = match cfg.llm.api_key.clone() {
        Some(api_key) => Some(Arc::new(LoggingMiddleware::new(OpenAiClient::new(
            &cfg.llm.base_url,
            cfg.llm.model.clone(),
            api_key,
        )))),
        None => {
            tracing::warn!(
                "OPENAI_API_KEY not set, analysis endpoints serve deterministic fallbacks only"
            );
            None
        }
    };

    let (terra, signing_secret) = match cfg.terra {
        Some(tc) => {
            let client: Arc<dyn TerraClient> = Arc::new(ReqwestTerraClient::new(
                &tc.base_url,
                tc.dev_id.clone(),
                tc.api_key.clone(),
            ));
            (Some(client), tc.signing_secret)
        }
        None => {
            tracing::warn!("Terra credentials not set, wearable integration disabled");
            (None, None)
        }
    };

    let state = AppState::new(llm, terra, signing_secret);
    let app = routes::router(state).route("/metrics", get(move || metrics(handle.clone())));

    let addr: SocketAddr = cfg
        .address
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 3000)));
    tracing::info!(%addr, "wellness_api: starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            signal::ctrl_c()
                .await
                .expect("failed to install ctrl+c handler");
        })
        .await?;
    Ok(())
}
