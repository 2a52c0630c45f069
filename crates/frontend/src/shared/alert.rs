//! Всплывающие уведомления.
//!
//! Внутри Telegram используется `WebApp.showAlert`, в браузере —
//! собственный toast, который исчезает через [`TOAST_DURATION_MS`].

use leptos::prelude::*;

use super::telegram;

pub const TOAST_DURATION_MS: u32 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Очередь toast-сообщений
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, message });
        id
    }

    pub fn remove(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct AlertService {
    queue: RwSignal<ToastQueue>,
}

impl AlertService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        if telegram::show_alert(&message) {
            return;
        }

        let mut id = 0;
        self.queue.update(|q| id = q.push(message));

        let queue = self.queue;
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            // Страница могла быть размонтирована
            let _ = queue.try_update(|q| q.remove(id));
        });
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_alerts() -> AlertService {
    use_context::<AlertService>().expect("AlertService not found in context")
}

/// Контейнер для toast-сообщений
#[component]
pub fn AlertHost() -> impl IntoView {
    let alerts = use_alerts();

    view! {
        <div class="custom-alert-host">
            <For
                each=move || alerts.queue.get().items().to_vec()
                key=|toast| toast.id
                children=|toast| view! { <div class="custom-alert">{toast.message}</div> }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_assigns_ids_and_removes_by_id() {
        let mut q = ToastQueue::default();
        let a = q.push("Статус обновлен!".into());
        let b = q.push("Ошибка обновления статуса".into());
        assert_ne!(a, b);
        q.remove(a);
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].id, b);
        q.remove(a);
        assert_eq!(q.items().len(), 1);
    }
}
