// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use creatordao_backend::chain::{RpcQuizRegistry, Signer};
use creatordao_backend::config::Config;
use creatordao_backend::routes;
use creatordao_backend::state::AppState;
use creatordao_backend::storage::IpfsStore;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Relayer account for score-recording transactions. Missing key keeps
    // read-only endpoints working; submissions fail with a config error.
    let signer = match config.relayer_private_key.as_deref() {
        Some(key) => Some(Signer::from_hex(key).expect("RELAYER_PRIVATE_KEY is invalid")),
        None => {
            tracing::warn!("RELAYER_PRIVATE_KEY not set; quiz submissions will be rejected");
            None
        }
    };

    if config.quiz_secret_key.is_none() {
        tracing::warn!("QUIZ_SECRET_KEY not set; answer encryption and scoring will be rejected");
    }

    // One connection pool shared by RPC, gateway, and pinning calls
    let http = reqwest::Client::new();

    let registry = Arc::new(RpcQuizRegistry::new(http.clone(), signer));
    let metadata = Arc::new(IpfsStore::new(
        http,
        config.ipfs_gateway.clone(),
        config.pinata_api_url.clone(),
        config.pinata_jwt.clone(),
    ));

    // Create AppState
    let state = AppState {
        config: config.clone(),
        registry,
        metadata,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("CreatorDao backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
