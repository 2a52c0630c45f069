use contracts::domain::a001_request::RequestStatus;
use leptos::prelude::*;

/// CSS-класс бейджа для статуса заявки
pub fn status_badge_class(status: RequestStatus) -> String {
    format!("status-badge {}", status.as_str())
}

/// Бейдж статуса заявки
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<RequestStatus>) -> impl IntoView {
    view! {
        <span class=move || status_badge_class(status.get())>
            {move || status.get().label()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_carries_wire_name() {
        assert_eq!(
            status_badge_class(RequestStatus::InProgress),
            "status-badge in_progress"
        );
    }
}
