use contracts::domain::a001_request::{
    ApiErrorBody, ListRequestsQuery, Request, RequestId, RequestStats, RequestStatus,
    SearchRequestsQuery, StatusFilter, UpdateStatusDto,
};
use contracts::shared::telegram::INIT_DATA_HEADER;
use gloo_net::http::{Request as HttpRequest, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::shared::telegram;

const API_BASE: &str = "/api/requests";

fn with_path_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        _ => path.to_string(),
    }
}

/// Путь списка с фильтром по статусу и пользователю
pub fn list_path(filter: StatusFilter, user_id: Option<i64>) -> String {
    let query = ListRequestsQuery {
        status: filter.status().map(|s| s.as_str().to_string()),
        user_id,
    };
    with_path_query(API_BASE, &query)
}

pub fn search_path(query: &str, user_id: Option<i64>) -> String {
    let query = SearchRequestsQuery {
        query: query.to_string(),
        user_id,
    };
    with_path_query(&format!("{}/search", API_BASE), &query)
}

pub fn status_path(id: RequestId) -> String {
    format!("{}/{}/status", API_BASE, id)
}

/// Текст ошибки: поле `message` из JSON-тела или `HTTP error <код>`
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error {}", status))
}

/// Общие заголовки: JSON и, внутри Telegram, initData
fn prepare(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Content-Type", "application/json");
    match telegram::init_data() {
        Some(init_data) => builder.header(INIT_DATA_HEADER, &init_data),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        log::error!("API request failed: {} -> {}", endpoint, message);
        return Err(message);
    }

    response.json::<T>().await.map_err(|e| {
        log::error!("API request failed: {} -> {}", endpoint, e);
        format!("Failed to parse response: {}", e)
    })
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = prepare(HttpRequest::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| {
            log::error!("API request failed: {} -> {}", path, e);
            format!("Request failed: {}", e)
        })?;
    read_json(path, response).await
}

/// Загрузить заявки с учётом фильтра и текущего пользователя Telegram
pub async fn load_requests(filter: StatusFilter) -> Result<Vec<Request>, String> {
    get_json(&list_path(filter, telegram::user_id())).await
}

pub async fn search_requests(query: &str) -> Result<Vec<Request>, String> {
    get_json(&search_path(query, telegram::user_id())).await
}

pub async fn get_stats() -> Result<RequestStats, String> {
    get_json(&format!("{}/stats", API_BASE)).await
}

/// Сменить статус; возвращает заявку в том виде, как её сохранил сервер
pub async fn update_request_status(
    id: RequestId,
    status: RequestStatus,
) -> Result<Request, String> {
    let path = status_path(id);
    let request = prepare(HttpRequest::put(&api_url(&path)))
        .json(&UpdateStatusDto { status })
        .map_err(|e| format!("Failed to serialize request: {}", e))?;
    let response = request.send().await.map_err(|e| {
        log::error!("API request failed: {} -> {}", path, e);
        format!("Request failed: {}", e)
    })?;
    read_json(&path, response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_path_skips_all_and_missing_user() {
        assert_eq!(list_path(StatusFilter::All, None), "/api/requests");
        assert_eq!(
            list_path(StatusFilter::Only(RequestStatus::New), Some(42)),
            "/api/requests?status=new&user_id=42"
        );
        assert_eq!(list_path(StatusFilter::All, Some(7)), "/api/requests?user_id=7");
    }

    #[test]
    fn search_path_carries_query() {
        assert_eq!(
            search_path("anna", None),
            "/api/requests/search?query=anna"
        );
        assert_eq!(
            search_path("anna", Some(1)),
            "/api/requests/search?query=anna&user_id=1"
        );
    }

    #[test]
    fn status_path_uses_id() {
        assert_eq!(status_path(RequestId(15)), "/api/requests/15/status");
    }

    #[test]
    fn error_message_prefers_server_text() {
        assert_eq!(
            error_message(404, r#"{"message":"Заявка не найдена"}"#),
            "Заявка не найдена"
        );
        assert_eq!(error_message(502, "<html>Bad gateway</html>"), "HTTP error 502");
        assert_eq!(error_message(500, r#"{"message":""}"#), "HTTP error 500");
    }
}
