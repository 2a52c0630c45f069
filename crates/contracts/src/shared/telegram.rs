//! Типы данных запуска мини-приложения Telegram (`initData`).

use serde::{Deserialize, Serialize};

/// Заголовок, в котором клиент передаёт сырую строку `initData`
pub const INIT_DATA_HEADER: &str = "Telegram-Init-Data";

/// Пользователь из `initData.user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl TelegramUser {
    /// Имя для журналов
    pub fn display_name(&self) -> String {
        match (&self.username, &self.last_name) {
            (Some(username), _) => format!("@{}", username),
            (None, Some(last)) => format!("{} {}", self.first_name, last),
            (None, None) => self.first_name.clone(),
        }
    }
}

/// Разобранные данные запуска
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitData {
    pub user: Option<TelegramUser>,
    /// Unix time, секунды
    pub auth_date: Option<i64>,
    pub query_id: Option<String>,
    pub hash: String,
    /// Подпись проверена токеном бота
    #[serde(default)]
    pub verified: bool,
}

impl InitData {
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_from_init_data_json() {
        let user: TelegramUser =
            serde_json::from_str(r#"{"id":279058397,"first_name":"Vlad","username":"vdkfrost"}"#)
                .unwrap();
        assert_eq!(user.id, 279058397);
        assert_eq!(user.display_name(), "@vdkfrost");
        assert_eq!(user.last_name, None);
    }
}
