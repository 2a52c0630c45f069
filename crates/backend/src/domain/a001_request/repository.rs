use chrono::{DateTime, Utc};
use contracts::domain::a001_request::{
    CreateRequestDto, Request, RequestId, RequestStats, RequestStatus, StatusFilter,
};
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub message: Option<String>,
    pub status: String,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Request {
    fn from(m: Model) -> Self {
        Request {
            id: RequestId(m.id),
            name: m.name,
            phone: m.phone,
            message: m.message,
            status: RequestStatus::from_db(&m.status),
            user_id: m.user_id,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

fn scoped(filter: StatusFilter, user_id: Option<i64>) -> Select<Entity> {
    let mut query = Entity::find();
    if let Some(status) = filter.status() {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(user_id) = user_id {
        query = query.filter(Column::UserId.eq(user_id));
    }
    query
}

/// Заявки, новые сверху
pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: StatusFilter,
    user_id: Option<i64>,
) -> anyhow::Result<Vec<Request>> {
    let items = scoped(filter, user_id)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Текстовый поиск. Выполняется в памяти: LIKE в SQLite не сворачивает
/// регистр кириллицы.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    query: &str,
    user_id: Option<i64>,
) -> anyhow::Result<Vec<Request>> {
    let items = list(db, StatusFilter::All, user_id).await?;
    Ok(items
        .into_iter()
        .filter(|r| r.matches_query(query))
        .collect())
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: RequestId,
) -> anyhow::Result<Option<Request>> {
    let result = Entity::find_by_id(id.value()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    dto: &CreateRequestDto,
    now: DateTime<Utc>,
) -> anyhow::Result<RequestId> {
    let message = dto
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(dto.name.trim().to_string()),
        phone: Set(dto.phone.trim().to_string()),
        message: Set(message),
        status: Set(RequestStatus::New.as_str().to_string()),
        user_id: Set(dto.user_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let inserted = active.insert(db).await?;
    Ok(RequestId(inserted.id))
}

/// Сменить статус. `None`, если заявки нет.
pub async fn update_status<C: ConnectionTrait>(
    db: &C,
    id: RequestId,
    status: RequestStatus,
) -> anyhow::Result<Option<Request>> {
    let Some(model) = Entity::find_by_id(id.value()).one(db).await? else {
        return Ok(None);
    };

    let mut active: ActiveModel = model.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Utc::now());
    let updated = active.update(db).await?;
    Ok(Some(updated.into()))
}

/// Количество заявок по статусам
pub async fn stats<C: ConnectionTrait>(
    db: &C,
    user_id: Option<i64>,
) -> anyhow::Result<RequestStats> {
    let rows: Vec<(String, i64)> = scoped(StatusFilter::All, user_id)
        .select_only()
        .column(Column::Status)
        .column_as(Expr::col(Column::Id).count(), "count")
        .group_by(Column::Status)
        .into_tuple()
        .all(db)
        .await?;

    let mut stats = RequestStats::default();
    for (status, count) in rows {
        stats.add(RequestStatus::from_db(&status), count.max(0) as u64);
    }
    Ok(stats)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> anyhow::Result<u64> {
    Ok(Entity::find().count(db).await?)
}
