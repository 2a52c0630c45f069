use serde::{Deserialize, Serialize};

use super::aggregate::{digits_only, RequestId};
use super::status::RequestStatus;

pub const NAME_MAX_CHARS: usize = 100;
pub const PHONE_MAX_CHARS: usize = 20;
pub const MESSAGE_MAX_CHARS: usize = 500;

/// Новая заявка из мини-приложения
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequestDto {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl CreateRequestDto {
    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Имя не может быть пустым".into());
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(format!("Имя длиннее {} символов", NAME_MAX_CHARS));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err("Телефон не может быть пустым".into());
        }
        if phone.chars().count() > PHONE_MAX_CHARS {
            return Err(format!("Телефон длиннее {} символов", PHONE_MAX_CHARS));
        }
        if digits_only(phone).is_empty() {
            return Err("Телефон должен содержать цифры".into());
        }

        if let Some(message) = &self.message {
            if message.chars().count() > MESSAGE_MAX_CHARS {
                return Err(format!("Сообщение длиннее {} символов", MESSAGE_MAX_CHARS));
            }
        }

        Ok(())
    }
}

/// Тело PUT /api/requests/:id/status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusDto {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequestResponse {
    pub success: bool,
    pub id: RequestId,
    pub message: String,
}

/// Query-параметры GET /api/requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequestsQuery {
    /// `all` или отсутствие — без фильтра
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Query-параметры GET /api/requests/search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequestsQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Query-параметры GET /api/requests/stats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Тело ответа с ошибкой
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Ответ GET /api/test_db
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbCheckResponse {
    pub success: bool,
    pub result: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateRequestDto {
        CreateRequestDto {
            name: "Иван".into(),
            phone: "89991234567".into(),
            message: None,
            user_id: None,
        }
    }

    #[test]
    fn valid_dto_passes() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_phone() {
        let mut d = dto();
        d.name = "  ".into();
        assert!(d.validate().is_err());

        let mut d = dto();
        d.phone = "".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn rejects_phone_without_digits() {
        let mut d = dto();
        d.phone = "нет".into();
        assert_eq!(d.validate().unwrap_err(), "Телефон должен содержать цифры");
    }

    #[test]
    fn limits_count_chars_not_bytes() {
        let mut d = dto();
        d.name = "Я".repeat(NAME_MAX_CHARS);
        assert!(d.validate().is_ok());
        d.name.push('Я');
        assert!(d.validate().is_err());

        let mut d = dto();
        d.message = Some("x".repeat(MESSAGE_MAX_CHARS + 1));
        assert!(d.validate().is_err());
    }

    #[test]
    fn update_status_rejects_unknown_names() {
        assert!(serde_json::from_str::<UpdateStatusDto>(r#"{"status":"archived"}"#).is_err());
        let ok: UpdateStatusDto = serde_json::from_str(r#"{"status":"in_progress"}"#).unwrap();
        assert_eq!(ok.status, RequestStatus::InProgress);
    }
}
