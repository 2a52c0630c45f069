use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use contracts::shared::telegram::{InitData, INIT_DATA_HEADER};

use super::init_data;
use crate::shared::config::TelegramConfig;
use crate::shared::error::ApiError;

/// Правила проверки заголовка `Telegram-Init-Data`
#[derive(Debug, Clone, Default)]
pub struct InitDataPolicy {
    bot_token: Option<String>,
    require: bool,
    max_age_secs: u64,
}

impl InitDataPolicy {
    pub fn from_config(cfg: &TelegramConfig) -> Self {
        Self {
            bot_token: cfg.bot_token().map(str::to_string),
            require: cfg.require_init_data,
            max_age_secs: cfg.max_age_secs,
        }
    }

    /// Результат для значения заголовка.
    ///
    /// `Ok(None)` — заголовка нет и он не обязателен, либо его нечем
    /// проверить и он не разбирается.
    pub fn check(&self, header: Option<&str>, now_unix: i64) -> Result<Option<InitData>, ApiError> {
        let raw = match header.map(str::trim).filter(|h| !h.is_empty()) {
            Some(raw) => raw,
            None if self.require => {
                return Err(ApiError::Unauthorized(
                    "Требуется запуск из Telegram".to_string(),
                ))
            }
            None => return Ok(None),
        };

        match &self.bot_token {
            Some(token) => init_data::verify(raw, token, self.max_age_secs, now_unix)
                .map(Some)
                .map_err(|e| ApiError::Unauthorized(e.to_string())),
            None => match init_data::parse(raw) {
                Ok(data) => Ok(Some(data)),
                Err(e) if self.require => Err(ApiError::Unauthorized(e.to_string())),
                Err(e) => {
                    tracing::warn!("Ignoring unparsable init data: {}", e);
                    Ok(None)
                }
            },
        }
    }
}

/// Middleware: проверяет initData и кладёт его в extensions запроса
pub async fn init_data_guard(
    State(policy): State<Arc<InitDataPolicy>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(INIT_DATA_HEADER)
        .and_then(|h| h.to_str().ok());

    let now = chrono::Utc::now().timestamp();
    if let Some(data) = policy.check(header, now)? {
        req.extensions_mut().insert(data);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const TOKEN: &str = "123456:TEST-TOKEN";
    const RAW: &str = "query_id=AAHdF6IQAAAAAN0XohDhrOrc&user=%7B%22id%22%3A42%2C%22first_name%22%3A%22%D0%90%D0%BD%D0%BD%D0%B0%22%2C%22username%22%3A%22anna_p%22%7D&auth_date=1700000000&hash=0befd353f4e42d6460c356a9746f10a8a876ecde572123055e72650365d80788";

    fn policy(token: &str, require: bool) -> InitDataPolicy {
        InitDataPolicy::from_config(&TelegramConfig {
            bot_token: token.to_string(),
            require_init_data: require,
            max_age_secs: 0,
        })
    }

    #[test]
    fn missing_header_is_allowed_unless_required() {
        assert!(policy(TOKEN, false).check(None, 0).unwrap().is_none());
        let err = policy(TOKEN, true).check(Some("  "), 0).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn valid_header_is_verified() {
        let data = policy(TOKEN, true).check(Some(RAW), 1_700_000_000).unwrap().unwrap();
        assert!(data.verified);
        assert_eq!(data.user_id(), Some(42));
    }

    #[test]
    fn bad_signature_is_unauthorized() {
        let err = policy("1:other", false).check(Some(RAW), 0).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn without_token_header_is_parsed_but_unverified() {
        let data = policy("", false).check(Some(RAW), 0).unwrap().unwrap();
        assert!(!data.verified);
        assert!(policy("", false).check(Some("garbage"), 0).unwrap().is_none());
    }
}
