use super::repository;
use chrono::Utc;
use contracts::domain::a001_request::{
    CreateRequestDto, Request, RequestId, RequestStats, RequestStatus, StatusFilter,
};

use crate::shared::data::db::get_connection;

/// Ошибки сценариев, которые отличаются для клиента
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Заявка не найдена")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Создание новой заявки (статус `new`)
pub async fn create(dto: CreateRequestDto) -> Result<RequestId, ServiceError> {
    dto.validate().map_err(ServiceError::Validation)?;
    let id = repository::insert(get_connection()?, &dto, Utc::now()).await?;
    tracing::info!("Request {} created (user_id={:?})", id, dto.user_id);
    Ok(id)
}

/// Смена статуса, возвращает обновлённую заявку
pub async fn update_status(
    id: RequestId,
    status: RequestStatus,
    actor: Option<i64>,
) -> Result<Request, ServiceError> {
    if !status.is_known() {
        return Err(ServiceError::Validation(format!(
            "Неизвестный статус: {}",
            status
        )));
    }

    let updated = repository::update_status(get_connection()?, id, status)
        .await?
        .ok_or(ServiceError::NotFound)?;
    tracing::info!(
        "Request {} status -> {} (actor={:?})",
        id,
        status,
        actor
    );
    Ok(updated)
}

pub async fn get_by_id(id: RequestId) -> anyhow::Result<Option<Request>> {
    repository::get_by_id(get_connection()?, id).await
}

/// Список с фильтром по статусу и пользователю
pub async fn list(filter: StatusFilter, user_id: Option<i64>) -> anyhow::Result<Vec<Request>> {
    let items = repository::list(get_connection()?, filter, user_id).await?;
    tracing::debug!("Found {} requests (filter={})", items.len(), filter.as_str());
    Ok(items)
}

/// Поиск; пустой запрос возвращает весь список
pub async fn search(query: &str, user_id: Option<i64>) -> anyhow::Result<Vec<Request>> {
    if query.trim().is_empty() {
        return list(StatusFilter::All, user_id).await;
    }
    repository::search(get_connection()?, query, user_id).await
}

pub async fn stats(user_id: Option<i64>) -> anyhow::Result<RequestStats> {
    repository::stats(get_connection()?, user_id).await
}

/// Демонстрационные заявки для пустой базы
pub async fn seed_demo_if_empty() -> anyhow::Result<()> {
    let db = get_connection()?;
    if repository::count(db).await? > 0 {
        return Ok(());
    }

    let data = [
        ("Анна Петрова", "89991234567", Some("Хочу узнать стоимость доставки в Казань")),
        ("Иван Сидоров", "+7 (912) 555-01-02", Some("Не пришёл заказ №1042")),
        ("ООО \"Ромашка\"", "84951112233", None),
    ];

    for (name, phone, message) in data {
        let dto = CreateRequestDto {
            name: name.into(),
            phone: phone.into(),
            message: message.map(Into::into),
            user_id: None,
        };
        repository::insert(db, &dto, Utc::now()).await?;
    }

    tracing::info!("Inserted demo requests into empty database");
    Ok(())
}
