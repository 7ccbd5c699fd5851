use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use sqlx::PgPool;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::error::ApiError;
use crate::api::handlers::{communes, demographics, echo_ping, patients, suspect_cases, users};
use crate::api::middleware::require_bearer;
use crate::config::AppConfig;
use crate::db;

/// Base path the monitor exposes to ApoloHRA
pub const BASE_PATH: &str = "/apolohra";

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// The endpoint's 400, honouring the error-detail setting
    pub fn bad_request(&self, message: &str, detail: impl fmt::Display) -> ApiError {
        ApiError::bad_request_with_detail(message, detail, self.config.expose_error_detail)
    }
}

/// Register a route under its canonical spelling and its all-lowercase
/// spelling; existing clients call both.
fn route_any_case(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    let lower = path.to_lowercase();
    if lower == path {
        router.route(path, method_router)
    } else {
        router
            .route(path, method_router.clone())
            .route(&lower, method_router)
    }
}

pub fn create_app(state: AppState) -> Router {
    let routes: [(&str, MethodRouter<AppState>); 12] = [
        ("/user", post(users::get_user)),
        ("/getPatient_ID", post(patients::get_patient_id)),
        ("/AddPatients", post(patients::add_patient)),
        ("/getPatients", get(patients::get_patient)),
        ("/getComuna", post(communes::get_commune)),
        ("/AddDemograph", post(demographics::add_demographic)),
        ("/getDemograph", get(demographics::get_demographic)),
        ("/addSospecha", post(suspect_cases::add_suspect_case)),
        ("/recepcionMuestra", post(suspect_cases::record_sample_reception)),
        ("/resultado", post(suspect_cases::record_result)),
        ("/getSospecha", get(suspect_cases::list_suspect_cases)),
        ("/getSuspectCase", post(suspect_cases::get_suspect_case)),
    ];

    let protected = routes
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            route_any_case(router, path, method_router)
        })
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let apolohra = Router::new()
        .route("/echoping", get(echo_ping))
        .merge(protected);

    Router::new()
        .nest(BASE_PATH, apolohra)
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable")
        }
    }
}

pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Esmeralda ApoloHRA API server");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutting down gracefully...");
    };

    let pool = db::create_pool(&config.database).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_app(AppState::new(pool, config));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
