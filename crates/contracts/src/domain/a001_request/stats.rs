use serde::{Deserialize, Serialize};

use super::aggregate::Request;
use super::status::RequestStatus;

/// Количество заявок по статусам
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    #[serde(default)]
    pub new: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
}

impl RequestStats {
    pub fn from_statuses(statuses: impl IntoIterator<Item = RequestStatus>) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.record(status);
        }
        stats
    }

    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a Request>) -> Self {
        Self::from_statuses(requests.into_iter().map(|r| r.status))
    }

    /// Учесть одну заявку. Неизвестные статусы не считаются.
    pub fn record(&mut self, status: RequestStatus) {
        self.add(status, 1);
    }

    pub fn add(&mut self, status: RequestStatus, count: u64) {
        match status {
            RequestStatus::New => self.new += count,
            RequestStatus::InProgress => self.in_progress += count,
            RequestStatus::Completed => self.completed += count,
            RequestStatus::Unknown => {}
        }
    }

    pub fn get(&self, status: RequestStatus) -> u64 {
        match status {
            RequestStatus::New => self.new,
            RequestStatus::InProgress => self.in_progress,
            RequestStatus::Completed => self.completed,
            RequestStatus::Unknown => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.new + self.in_progress + self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_status_and_skips_unknown() {
        let stats = RequestStats::from_statuses([
            RequestStatus::New,
            RequestStatus::New,
            RequestStatus::Completed,
            RequestStatus::Unknown,
        ]);
        assert_eq!(stats.new, 2);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn from_requests_matches_total() {
        use crate::domain::a001_request::RequestId;
        use crate::domain::common::EntityMetadata;

        let requests: Vec<Request> = [RequestStatus::InProgress, RequestStatus::Completed]
            .into_iter()
            .enumerate()
            .map(|(i, status)| Request {
                id: RequestId(i as i64 + 1),
                name: "Клиент".into(),
                phone: "89991234567".into(),
                message: None,
                status,
                user_id: None,
                metadata: EntityMetadata::new(),
            })
            .collect();
        let stats = RequestStats::from_requests(&requests);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.total(), requests.len() as u64);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stats: RequestStats = serde_json::from_str(r#"{"new": 3}"#).unwrap();
        assert_eq!(stats.get(RequestStatus::New), 3);
        assert_eq!(stats.get(RequestStatus::Completed), 0);
    }
}
