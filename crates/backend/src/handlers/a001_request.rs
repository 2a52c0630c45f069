use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Extension, Json,
};
use contracts::domain::a001_request::{
    CreateRequestDto, CreateRequestResponse, ListRequestsQuery, Request, RequestId, RequestStats,
    SearchRequestsQuery, StatsQuery, StatusFilter, UpdateStatusDto,
};
use contracts::domain::common::AggregateId;
use contracts::shared::telegram::InitData;

use crate::domain::a001_request::service;
use crate::shared::error::{ApiError, ApiResult};

fn parse_id(id: &str) -> ApiResult<RequestId> {
    RequestId::from_string(id).map_err(|_| ApiError::BadRequest(format!("Некорректный id: {}", id)))
}

/// GET /api/requests
pub async fn list(
    query: Result<Query<ListRequestsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Request>>> {
    let Query(query) = query?;
    let filter: StatusFilter = query
        .status
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(ApiError::BadRequest)?;
    Ok(Json(service::list(filter, query.user_id).await?))
}

/// GET /api/requests/search
pub async fn search(
    query: Result<Query<SearchRequestsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Request>>> {
    let Query(query) = query?;
    Ok(Json(service::search(&query.query, query.user_id).await?))
}

/// GET /api/requests/stats
pub async fn stats(
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> ApiResult<Json<RequestStats>> {
    let Query(query) = query?;
    Ok(Json(service::stats(query.user_id).await?))
}

/// GET /api/requests/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Request>> {
    let id = parse_id(&id)?;
    service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/requests
pub async fn create(
    payload: Result<Json<CreateRequestDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateRequestResponse>)> {
    let Json(dto) = payload?;
    let id = service::create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateRequestResponse {
            success: true,
            id,
            message: "Заявка создана".to_string(),
        }),
    ))
}

/// PUT /api/requests/:id/status (и PUT /api/requests/:id)
pub async fn update_status(
    Path(id): Path<String>,
    init_data: Option<Extension<InitData>>,
    payload: Result<Json<UpdateStatusDto>, JsonRejection>,
) -> ApiResult<Json<Request>> {
    let id = parse_id(&id)?;
    let Json(dto) = payload?;
    let actor = init_data.and_then(|Extension(data)| data.user_id());
    Ok(Json(service::update_status(id, dto.status, actor).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_garbage() {
        assert_eq!(parse_id("12").unwrap(), RequestId(12));
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
