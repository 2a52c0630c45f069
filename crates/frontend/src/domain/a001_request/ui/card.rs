use contracts::domain::a001_request::{Request, RequestStatus};
use contracts::shared::format::{format_datetime, format_phone};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::domain::a001_request::api;
use crate::shared::alert::use_alerts;
use crate::shared::components::ui::{Select, StatusBadge};
use crate::shared::date_utils::viewer_offset_minutes;

pub const STATUS_UPDATED_TEXT: &str = "Статус обновлен!";
pub const STATUS_UPDATE_FAILED_TEXT: &str = "Ошибка обновления статуса";

fn status_options() -> Vec<(&'static str, &'static str)> {
    RequestStatus::ALL_KNOWN
        .iter()
        .map(|s| (s.as_str(), s.label()))
        .collect()
}

/// Карточка заявки со сменой статуса
#[component]
pub fn RequestCard(
    request: Request,
    /// Вызывается с копией заявки, которую вернул сервер
    on_updated: Callback<Request>,
) -> impl IntoView {
    let alerts = use_alerts();
    let id = request.id;
    let locked = request.status.is_terminal();
    let selected = RwSignal::new(request.status);
    let pending = RwSignal::new(false);

    let on_change = Callback::new(move |value: String| {
        let Ok(new_status) = value.parse::<RequestStatus>() else {
            log::warn!("Unexpected status option: {}", value);
            return;
        };
        let original = selected.get_untracked();
        if new_status == original {
            return;
        }

        selected.set(new_status);
        pending.set(true);
        spawn_local(async move {
            match api::update_request_status(id, new_status).await {
                Ok(updated) => {
                    alerts.show(STATUS_UPDATED_TEXT);
                    on_updated.run(updated);
                }
                Err(e) => {
                    log::error!("Failed to update status of request {}: {}", id, e);
                    // карточка могла пересоздаться после опроса
                    let _ = selected.try_set(original);
                    alerts.show(STATUS_UPDATE_FAILED_TEXT);
                }
            }
            let _ = pending.try_set(false);
        });
    });

    let message = request.message_text().map(str::to_string);
    let phone = format_phone(Some(&request.phone));
    let date = format_datetime(request.metadata.created_at, viewer_offset_minutes());

    view! {
        <div class="request-card" data-request-id=id.to_string()>
            <div class="request-header">
                <h3>{request.name}</h3>
                <StatusBadge status=request.status />
            </div>
            <div class="request-body">
                <p><strong>"Телефон: "</strong>{phone}</p>
                {message.map(|m| view! { <p><strong>"Сообщение: "</strong>{m}</p> })}
                <p class="date">{date}</p>
            </div>
            <div class="request-actions">
                <Select
                    class="status-select"
                    value=Signal::derive(move || selected.get().as_str().to_string())
                    options=status_options()
                    disabled=Signal::derive(move || locked || pending.get())
                    on_change=on_change
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_cover_known_statuses_in_order() {
        assert_eq!(
            status_options(),
            vec![
                ("new", "Новая"),
                ("in_progress", "В работе"),
                ("completed", "Завершена"),
            ]
        );
    }
}
