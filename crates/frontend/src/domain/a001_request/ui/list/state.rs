use contracts::domain::a001_request::Request;

pub const EMPTY_TEXT: &str = "Нет заявок";
pub const LOADING_TEXT: &str = "Загрузка...";
pub const LOAD_ERROR_TEXT: &str = "Ошибка загрузки заявок";
pub const SEARCH_ERROR_TEXT: &str = "Ошибка поиска";

/// Что сейчас показывает список
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Request>),
    Failed(String),
}

impl ListState {
    /// Заменить заявку копией с сервера. `false`, если её нет в списке.
    pub fn replace(&mut self, updated: Request) -> bool {
        let ListState::Loaded(items) = self else {
            return false;
        };
        match items.iter_mut().find(|r| r.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[Request] {
        match self {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// Номер последней загрузки: ответ на устаревший запрос отбрасывается,
/// чтобы медленный ответ старого фильтра не перетёр новый.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn next(&mut self) -> LoadTicket {
        self.0 += 1;
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_request::{RequestId, RequestStatus};
    use contracts::domain::common::EntityMetadata;

    fn request(id: i64, status: RequestStatus) -> Request {
        Request {
            id: RequestId(id),
            name: format!("Клиент {}", id),
            phone: "89990000000".into(),
            message: None,
            status,
            user_id: None,
            metadata: EntityMetadata::new(),
        }
    }

    #[test]
    fn replace_swaps_matching_entry_only() {
        let mut state = ListState::Loaded(vec![
            request(1, RequestStatus::New),
            request(2, RequestStatus::New),
        ]);
        assert!(state.replace(request(2, RequestStatus::Completed)));
        assert_eq!(state.items()[0].status, RequestStatus::New);
        assert_eq!(state.items()[1].status, RequestStatus::Completed);
        assert!(!state.replace(request(3, RequestStatus::Completed)));
    }

    #[test]
    fn replace_is_noop_while_loading() {
        let mut state = ListState::Loading;
        assert!(!state.replace(request(1, RequestStatus::New)));
        assert!(state.items().is_empty());
    }

    #[test]
    fn tickets_increase() {
        let mut current = LoadTicket::default();
        let a = current.next();
        let b = current.next();
        assert_ne!(a, b);
        assert_eq!(current, b);
    }
}
