mod api;
mod config;
mod domain;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use api::handlers::{self, arguments, faults, files, headers, payloads};
use config::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Resolve filesystem locations
    let state = AppState::from_env();
    tracing::info!(
        settings = %state.settings_path.display(),
        public = %state.public_dir.display(),
        uploads = %state.upload_dir.display(),
        "resolved filesystem locations"
    );

    // Freeze the /arguments_3/ timestamp at startup
    arguments::process_start_time();

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Query binding
        .route("/arguments_1/", get(arguments::echo_required))
        .route("/arguments_2/", get(arguments::echo_optional))
        .route("/arguments_3/", get(arguments::echo_defaulted))
        // Body binding
        .route("/json/", post(payloads::echo_json_bundle))
        .route("/form/", post(payloads::echo_form))
        .route("/request/", post(payloads::echo_request))
        .route("/response/", post(payloads::echo_envelope))
        // Files
        .route("/files/", post(files::byte_length))
        .route("/upload_file/", post(files::store_upload))
        .route("/response_file/:file_name", get(files::fetch_file))
        // Headers and pre-checks
        .route("/headers/", post(headers::check_headers))
        .route("/dep/", post(headers::guarded_probe))
        // Errors
        .route("/error/:status_code", get(faults::raise_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
