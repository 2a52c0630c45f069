use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::RequestStatus;
use crate::domain::common::{AggregateId, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор заявки (автоинкремент в БД)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub i64);

impl RequestId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AggregateId for RequestId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(RequestId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Заявка клиента, оставленная через мини-приложение
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
    pub status: RequestStatus,
    /// Telegram-пользователь, отправивший заявку
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Request {
    /// Сообщение, если оно есть и не пустое
    pub fn message_text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Текстовый поиск по имени, телефону и сообщению без учёта регистра.
    ///
    /// Если в запросе есть цифры, они дополнительно сравниваются с цифрами
    /// телефона, так что `999 123` находит `+7 (999) 123-45-67`.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let in_text = |text: &str| text.to_lowercase().contains(&needle);
        if in_text(&self.name) || in_text(&self.phone) {
            return true;
        }
        if self.message.as_deref().is_some_and(in_text) {
            return true;
        }

        let query_digits = digits_only(&needle);
        !query_digits.is_empty() && digits_only(&self.phone).contains(&query_digits)
    }

    /// Сменить статус. Возвращает `false`, если статус уже такой.
    pub fn set_status(&mut self, status: RequestStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.metadata.touch();
        true
    }
}

pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Request {
        Request {
            id: RequestId(7),
            name: "Анна Петрова".into(),
            phone: "+7 (999) 123-45-67".into(),
            message: Some("Нужна консультация по доставке".into()),
            status: RequestStatus::New,
            user_id: Some(42),
            metadata: EntityMetadata::new(),
        }
    }

    #[test]
    fn search_is_case_insensitive_for_cyrillic() {
        let r = sample();
        assert!(r.matches_query("анна"));
        assert!(r.matches_query("ДОСТАВК"));
        assert!(!r.matches_query("возврат"));
    }

    #[test]
    fn search_matches_phone_digits_regardless_of_formatting() {
        let r = sample();
        assert!(r.matches_query("9991234567"));
        assert!(r.matches_query("999 123"));
        assert!(!r.matches_query("555"));
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(sample().matches_query("   "));
    }

    #[test]
    fn set_status_reports_changes() {
        let mut r = sample();
        assert!(!r.set_status(RequestStatus::New));
        assert!(r.set_status(RequestStatus::Completed));
        assert_eq!(r.status, RequestStatus::Completed);
    }

    #[test]
    fn json_shape_is_flat() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["status"], "new");
        assert_eq!(value["user_id"], 42);
        assert!(value["created_at"].is_string());
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn id_from_string() {
        assert_eq!(RequestId::from_string("15").unwrap(), RequestId(15));
        assert!(RequestId::from_string("abc").is_err());
    }

    #[test]
    fn blank_message_is_hidden() {
        let mut r = sample();
        r.message = Some("  ".into());
        assert_eq!(r.message_text(), None);
    }
}
