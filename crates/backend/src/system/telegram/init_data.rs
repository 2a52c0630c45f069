use contracts::shared::telegram::{InitData, TelegramUser};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Ключ первого шага HMAC по правилам Telegram
const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitDataError {
    #[error("initData: некорректная строка: {0}")]
    Malformed(String),
    #[error("initData: нет поля hash")]
    MissingHash,
    #[error("initData: подпись не совпадает")]
    BadSignature,
    #[error("initData: auth_date устарел")]
    Expired,
}

/// Пары ключ-значение после URL-декодирования, в исходном порядке
pub fn parse_pairs(raw: &str) -> Result<Vec<(String, String)>, InitDataError> {
    raw.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            let key = urlencoding::decode(key)
                .map_err(|e| InitDataError::Malformed(e.to_string()))?;
            let value = urlencoding::decode(value)
                .map_err(|e| InitDataError::Malformed(e.to_string()))?;
            Ok((key.into_owned(), value.into_owned()))
        })
        .collect()
}

/// Строка для подписи: все поля кроме `hash`, по алфавиту, через `\n`
pub fn data_check_string(pairs: &[(String, String)]) -> String {
    let mut fields: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| k != "hash").collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn keyed(key: &[u8]) -> Result<HmacSha256, InitDataError> {
    HmacSha256::new_from_slice(key).map_err(|e| InitDataError::Malformed(e.to_string()))
}

/// HMAC с ключом `HMAC-SHA256("WebAppData", bot_token)`
fn signing_mac(bot_token: &str) -> Result<HmacSha256, InitDataError> {
    let mut secret = keyed(WEB_APP_DATA_KEY)?;
    secret.update(bot_token.as_bytes());
    keyed(&secret.finalize().into_bytes())
}

/// Разобрать без проверки подписи
pub fn parse(raw: &str) -> Result<InitData, InitDataError> {
    let pairs = parse_pairs(raw)?;
    build(&pairs, false)
}

/// Разобрать и проверить подпись и возраст `auth_date`.
///
/// `max_age_secs == 0` отключает проверку возраста.
pub fn verify(
    raw: &str,
    bot_token: &str,
    max_age_secs: u64,
    now_unix: i64,
) -> Result<InitData, InitDataError> {
    let pairs = parse_pairs(raw)?;
    let hash = pairs
        .iter()
        .find(|(k, _)| k == "hash")
        .map(|(_, v)| v.as_str())
        .ok_or(InitDataError::MissingHash)?;
    let expected = hex::decode(hash).map_err(|_| InitDataError::BadSignature)?;

    let mut mac = signing_mac(bot_token)?;
    mac.update(data_check_string(&pairs).as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| InitDataError::BadSignature)?;

    let data = build(&pairs, true)?;
    if max_age_secs > 0 {
        let auth_date = data.auth_date.ok_or(InitDataError::Expired)?;
        if now_unix.saturating_sub(auth_date) > max_age_secs as i64 {
            return Err(InitDataError::Expired);
        }
    }
    Ok(data)
}

fn build(pairs: &[(String, String)], verified: bool) -> Result<InitData, InitDataError> {
    let mut data = InitData {
        verified,
        ..InitData::default()
    };
    for (key, value) in pairs {
        match key.as_str() {
            "user" => {
                let user: TelegramUser = serde_json::from_str(value)
                    .map_err(|e| InitDataError::Malformed(format!("user: {}", e)))?;
                data.user = Some(user);
            }
            "auth_date" => {
                let ts = value
                    .parse::<i64>()
                    .map_err(|e| InitDataError::Malformed(format!("auth_date: {}", e)))?;
                data.auth_date = Some(ts);
            }
            "query_id" => data.query_id = Some(value.clone()),
            "hash" => data.hash = value.clone(),
            _ => {}
        }
    }
    if data.hash.is_empty() {
        return Err(InitDataError::MissingHash);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "123456:TEST-TOKEN";
    // Подписано эталонной реализацией (HMAC-SHA256 по документации Telegram)
    const RAW: &str = "query_id=AAHdF6IQAAAAAN0XohDhrOrc&user=%7B%22id%22%3A42%2C%22first_name%22%3A%22%D0%90%D0%BD%D0%BD%D0%B0%22%2C%22username%22%3A%22anna_p%22%7D&auth_date=1700000000&hash=0befd353f4e42d6460c356a9746f10a8a876ecde572123055e72650365d80788";
    const AUTH_DATE: i64 = 1_700_000_000;

    fn sign(bot_token: &str, data_check_string: &str) -> Result<String, InitDataError> {
        let mut mac = signing_mac(bot_token)?;
        mac.update(data_check_string.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn accepts_reference_signature() {
        let data = verify(RAW, TOKEN, 0, AUTH_DATE).unwrap();
        assert!(data.verified);
        assert_eq!(data.user_id(), Some(42));
        assert_eq!(data.user.unwrap().first_name, "Анна");
        assert_eq!(data.auth_date, Some(AUTH_DATE));
        assert_eq!(data.query_id.as_deref(), Some("AAHdF6IQAAAAAN0XohDhrOrc"));
    }

    #[test]
    fn sign_matches_reference() {
        let pairs = parse_pairs(RAW).unwrap();
        assert_eq!(
            sign(TOKEN, &data_check_string(&pairs)).unwrap(),
            "0befd353f4e42d6460c356a9746f10a8a876ecde572123055e72650365d80788"
        );
    }

    #[test]
    fn rejects_wrong_token_and_tampering() {
        assert_eq!(
            verify(RAW, "654321:OTHER", 0, AUTH_DATE),
            Err(InitDataError::BadSignature)
        );
        let tampered = RAW.replace("auth_date=1700000000", "auth_date=1700000001");
        assert_eq!(
            verify(&tampered, TOKEN, 0, AUTH_DATE),
            Err(InitDataError::BadSignature)
        );
    }

    #[test]
    fn rejects_missing_hash() {
        let raw = "auth_date=1700000000";
        assert_eq!(verify(raw, TOKEN, 0, AUTH_DATE), Err(InitDataError::MissingHash));
        assert_eq!(parse(raw), Err(InitDataError::MissingHash));
    }

    #[test]
    fn enforces_max_age() {
        assert!(verify(RAW, TOKEN, 60, AUTH_DATE + 60).is_ok());
        assert_eq!(
            verify(RAW, TOKEN, 60, AUTH_DATE + 61),
            Err(InitDataError::Expired)
        );
    }

    #[test]
    fn data_check_string_is_sorted_and_skips_hash() {
        let pairs = vec![
            ("user".to_string(), "u".to_string()),
            ("hash".to_string(), "h".to_string()),
            ("auth_date".to_string(), "1".to_string()),
        ];
        assert_eq!(data_check_string(&pairs), "auth_date=1\nuser=u");
    }

    #[test]
    fn parse_without_verification() {
        let data = parse(RAW).unwrap();
        assert!(!data.verified);
        assert_eq!(data.user_id(), Some(42));
    }
}
