use axum::Json;
use contracts::domain::a001_request::DbCheckResponse;

use crate::shared::data::db::{get_connection, ping};
use crate::shared::error::ApiResult;

/// GET /api/test_db
pub async fn test_db() -> ApiResult<Json<DbCheckResponse>> {
    let result = ping(get_connection()?).await?;
    Ok(Json(DbCheckResponse {
        success: true,
        result,
    }))
}
