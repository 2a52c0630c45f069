//! Форматирование значений для карточек заявок.
//!
//! Функции чистые и не зависят от браузера: часовой пояс зрителя
//! передаётся явно, в минутах восточнее UTC.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc};

pub const PHONE_NOT_SET: &str = "Не указан";
pub const DATE_NOT_SET: &str = "Дата не указана";

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Телефон в виде `+7 (999) 123-45-67`.
///
/// Из строки берутся только цифры. Номер из 11 цифр форматируется по маске,
/// любой другой возвращается цифрами как есть.
pub fn format_phone(phone: Option<&str>) -> String {
    let digits: String = phone
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return PHONE_NOT_SET.to_string();
    }
    if digits.len() != 11 {
        return digits;
    }

    format!(
        "+{} ({}) {}-{}-{}",
        &digits[0..1],
        &digits[1..4],
        &digits[4..7],
        &digits[7..9],
        &digits[9..11]
    )
}

/// Дата из строки API в виде `15 марта 2024 г., 14:02` в часовом поясе зрителя.
///
/// Принимает RFC 3339, а также строки без зоны (`2024-03-15T14:02:26`,
/// `2024-03-15 14:02:26`), которые считаются UTC. Для уже разобранного
/// времени есть [`format_datetime`].
pub fn format_date(value: &str, offset_minutes: i32) -> String {
    match parse_timestamp(value) {
        Some(utc) => format_datetime(utc, offset_minutes),
        None => DATE_NOT_SET.to_string(),
    }
}

/// Время заявки в часовом поясе зрителя (смещение в минутах восточнее UTC)
pub fn format_datetime(value: DateTime<Utc>, offset_minutes: i32) -> String {
    match FixedOffset::east_opt(offset_minutes.saturating_mul(60)) {
        Some(offset) => format_local(&value.with_timezone(&offset)),
        None => DATE_NOT_SET.to_string(),
    }
}

fn format_local(local: &DateTime<FixedOffset>) -> String {
    let month = MONTHS_GENITIVE[local.month0() as usize];
    format!(
        "{} {} {} г., {:02}:{:02}",
        local.day(),
        month,
        local.year(),
        local.hour(),
        local.minute()
    )
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone(Some("89991234567")), "+8 (999) 123-45-67");
        assert_eq!(format_phone(Some("+7 (999) 123-45-67")), "+7 (999) 123-45-67");
        assert_eq!(format_phone(Some("12-34-56")), "123456");
        assert_eq!(format_phone(Some("")), PHONE_NOT_SET);
        assert_eq!(format_phone(Some("нет")), PHONE_NOT_SET);
        assert_eq!(format_phone(None), PHONE_NOT_SET);
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(
            format_date("2024-03-15T14:02:26.123Z", 0),
            "15 марта 2024 г., 14:02"
        );
        assert_eq!(format_date("2024-12-01 09:05:00", 0), "1 декабря 2024 г., 09:05");
    }

    #[test]
    fn test_format_date_shifts_to_viewer_zone() {
        // Москва, UTC+3: переход через полночь
        assert_eq!(
            format_date("2024-01-31T22:30:00Z", 180),
            "1 февраля 2024 г., 01:30"
        );
        assert_eq!(
            format_date("2024-05-10T12:00:00+03:00", 0),
            "10 мая 2024 г., 09:00"
        );
    }

    #[test]
    fn test_invalid_date() {
        assert_eq!(format_date("invalid", 0), DATE_NOT_SET);
        assert_eq!(format_date("", 180), DATE_NOT_SET);
    }

    #[test]
    fn test_string_and_parsed_inputs_agree() {
        let parsed = DateTime::parse_from_rfc3339("2024-07-04T21:15:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            format_datetime(parsed, 180),
            format_date("2024-07-04T21:15:00Z", 180)
        );
        assert_eq!(format_datetime(parsed, 180), "5 июля 2024 г., 00:15");
        assert_eq!(format_datetime(parsed, 24 * 60 * 60), DATE_NOT_SET);
    }
}
