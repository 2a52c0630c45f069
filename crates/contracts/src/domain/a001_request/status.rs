use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Статус заявки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InProgress,
    Completed,
    /// Значение из хранилища, которое модель не знает. Только на выход.
    Unknown,
}

impl RequestStatus {
    /// Статусы, которые можно выставить через API и UI
    pub const ALL_KNOWN: [RequestStatus; 3] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Unknown => "unknown",
        }
    }

    /// Подпись для интерфейса
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::New => "Новая",
            RequestStatus::InProgress => "В работе",
            RequestStatus::Completed => "Завершена",
            RequestStatus::Unknown => "Неизвестный статус",
        }
    }

    /// Разбор значения из БД: всё незнакомое становится `Unknown`
    pub fn from_db(value: &str) -> Self {
        value.parse().unwrap_or(RequestStatus::Unknown)
    }

    /// Завершённую заявку в интерфейсе менять нельзя
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RequestStatus::Unknown)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(RequestStatus::New),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(format!("Неизвестный статус: {}", other)),
        }
    }
}

/// Значение фильтра по статусу в списке заявок
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    /// Значение для `<select>` и query-параметра
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    /// `None` для `All`: параметр в запрос не добавляется
    pub fn status(&self) -> Option<RequestStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }

    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: RequestStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, RequestStatus::Completed);
    }

    #[test]
    fn unknown_text_is_rejected_on_input_but_tolerated_from_db() {
        assert!("done".parse::<RequestStatus>().is_err());
        assert!("unknown".parse::<RequestStatus>().is_err());
        assert_eq!(RequestStatus::from_db("done"), RequestStatus::Unknown);
        assert_eq!(RequestStatus::from_db("new"), RequestStatus::New);
    }

    #[test]
    fn labels() {
        assert_eq!(RequestStatus::New.label(), "Новая");
        assert_eq!(RequestStatus::InProgress.label(), "В работе");
        assert_eq!(RequestStatus::Completed.label(), "Завершена");
        assert_eq!(RequestStatus::Unknown.label(), "Неизвестный статус");
    }

    #[test]
    fn only_completed_is_terminal() {
        assert!(RequestStatus::Completed.is_terminal());
        assert!(!RequestStatus::New.is_terminal());
        assert!(!RequestStatus::InProgress.is_terminal());
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "in_progress".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(RequestStatus::InProgress)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::All.status(), None);
        assert!(StatusFilter::All.matches(RequestStatus::Unknown));
        assert!(!StatusFilter::Only(RequestStatus::New).matches(RequestStatus::Completed));
    }
}
