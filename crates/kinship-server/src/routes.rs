//! HTTP routes for persons and parent links

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use kinship_core::{LineageView, Person, PersonId, PersonInput};
use kinship_storage::{FamilyRepository, FamilyService};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::response::{ApiError, ApiResponse};

/// Maximum request body size (1MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddParentRequest {
    #[serde(default)]
    parent_id: Option<String>,
}

/// Create the API router
pub fn create_router<R: FamilyRepository + ?Sized + 'static>(
    service: Arc<FamilyService<R>>,
) -> Router {
    // Restrictive CORS: only allow localhost origins
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://localhost:8080"),
            HeaderValue::from_static("http://127.0.0.1:8080"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/persons", get(list_persons::<R>).post(create_person::<R>))
        .route("/api/persons/:id", get(get_person::<R>).delete(delete_person::<R>))
        .route("/api/persons/:id/parents", post(add_parent::<R>))
        .route("/api/persons/:id/parents/:parent_id", delete(remove_parent::<R>))
        .route(
            "/api/persons/:id/available-parents",
            get(available_parents::<R>),
        )
        .route("/api/persons/:id/ancestors", get(ancestors::<R>))
        .route("/api/persons/:id/descendants", get(descendants::<R>))
        .route("/api/persons/:id/lineage", get(lineage::<R>))
        .route("/health", get(health_handler::<R>))
        .with_state(service)
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_handler<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
) -> impl IntoResponse {
    let storage = service.health_check().await.unwrap_or(false);
    Json(serde_json::json!({
        "status": if storage { "ok" } else { "degraded" },
        "server": "kinship-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_persons<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
) -> ApiResult<Vec<Person>> {
    let persons = service
        .list_persons()
        .await
        .map_err(ApiError::context("fetch persons"))?;
    Ok(Json(ApiResponse::ok(persons)))
}

async fn create_person<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Json(input): Json<PersonInput>,
) -> Result<(StatusCode, Json<ApiResponse<Person>>), ApiError> {
    let person = service
        .create_person(&input)
        .await
        .map_err(ApiError::context("create person"))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(person))))
}

async fn get_person<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
) -> ApiResult<Person> {
    let person = service
        .get_person(&PersonId::from(id))
        .await
        .map_err(ApiError::context("fetch person"))?;
    Ok(Json(ApiResponse::ok(person)))
}

async fn delete_person<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    service
        .delete_person(&PersonId::from(id))
        .await
        .map_err(ApiError::context("delete person"))?;
    Ok(Json(ApiResponse::empty()))
}

async fn add_parent<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
    Json(request): Json<AddParentRequest>,
) -> ApiResult<Person> {
    let parent_id = PersonId::from(request.parent_id.unwrap_or_default());
    tracing::debug!("Add parent request: {} -> {}", parent_id, id);

    let child = service
        .add_parent(&PersonId::from(id), &parent_id)
        .await
        .map_err(ApiError::context("add parent"))?;
    Ok(Json(ApiResponse::ok(child)))
}

async fn remove_parent<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path((id, parent_id)): Path<(String, String)>,
) -> ApiResult<Person> {
    let child = service
        .remove_parent(&PersonId::from(id), &PersonId::from(parent_id))
        .await
        .map_err(ApiError::context("remove parent"))?;
    Ok(Json(ApiResponse::ok(child)))
}

async fn available_parents<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Person>> {
    let persons = service
        .available_parents(&PersonId::from(id))
        .await
        .map_err(ApiError::context("fetch available parents"))?;
    Ok(Json(ApiResponse::ok(persons)))
}

async fn ancestors<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Person>> {
    let persons = service
        .ancestors(&PersonId::from(id))
        .await
        .map_err(ApiError::context("fetch ancestors"))?;
    Ok(Json(ApiResponse::ok(persons)))
}

async fn descendants<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Person>> {
    let persons = service
        .descendants(&PersonId::from(id))
        .await
        .map_err(ApiError::context("fetch descendants"))?;
    Ok(Json(ApiResponse::ok(persons)))
}

async fn lineage<R: FamilyRepository + ?Sized + 'static>(
    State(service): State<Arc<FamilyService<R>>>,
    Path(id): Path<String>,
) -> ApiResult<LineageView> {
    let view = service
        .lineage(&PersonId::from(id))
        .await
        .map_err(ApiError::context("fetch lineage"))?;
    Ok(Json(ApiResponse::ok(view)))
}

/// Run the HTTP server until Ctrl-C
pub async fn run_server<R: FamilyRepository + ?Sized + 'static>(
    service: Arc<FamilyService<R>>,
    addr: &str,
) -> anyhow::Result<()> {
    let router = create_router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Kinship server listening on {}", addr);
    tracing::info!("  API: http://{}/api/persons", addr);
    tracing::info!("  Health check: http://{}/health", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Kinship server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
