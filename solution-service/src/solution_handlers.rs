use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common_http_errors::{ApiError, ApiResult};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::model::{Solution, SolutionInput};
use crate::service::ServiceError;

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidRequest { code, message } => {
                ApiError::BadRequest { code, message: Some(message) }
            }
            ServiceError::NotFound { message } => {
                ApiError::not_found("solution_not_found", message)
            }
            ServiceError::DuplicateName(name) => ApiError::conflict(
                "duplicate_name",
                format!("a solution named \"{name}\" already exists"),
            ),
            ServiceError::Store(e) => ApiError::internal(e),
        }
    }
}

fn validated(input: SolutionInput) -> ApiResult<SolutionInput> {
    match input.validate() {
        Ok(()) => Ok(input),
        Err(e) => Err(ApiError::BadRequest { code: e.code, message: Some(e.message) }),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_solutions(State(state): State<AppState>) -> ApiResult<Json<Vec<Solution>>> {
    Ok(Json(state.service.list_all().await?))
}

pub async fn get_solution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Solution>> {
    Ok(Json(state.service.get_by_id(id).await?))
}

pub async fn create_solution(
    State(state): State<AppState>,
    Json(input): Json<SolutionInput>,
) -> ApiResult<(StatusCode, Json<Solution>)> {
    let input = validated(input)?;
    let created = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_solution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SolutionInput>,
) -> ApiResult<Json<Solution>> {
    let input = validated(input)?;
    Ok(Json(state.service.update(id, input).await?))
}

pub async fn delete_solution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<Solution>>> {
    Ok(Json(state.service.list_low_stock().await?))
}
