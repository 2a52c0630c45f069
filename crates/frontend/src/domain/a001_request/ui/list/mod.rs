pub mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::domain::a001_request::{Request, RequestStats, StatusFilter};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use self::state::{
    ListState, LoadTicket, EMPTY_TEXT, LOADING_TEXT, LOAD_ERROR_TEXT, SEARCH_ERROR_TEXT,
};
use super::card::RequestCard;
use super::stats_panel::StatsPanel;
use crate::domain::a001_request::api;
use crate::shared::alert::use_alerts;
use crate::shared::components::ui::{Button, ButtonVariant, SearchInput, Select};

/// Интервал фонового обновления списка и счётчиков
pub const POLL_INTERVAL_MS: u32 = 30_000;

const FILTER_OPTIONS: [(&str, &str); 4] = [
    ("all", "Все заявки"),
    ("new", "Новые"),
    ("in_progress", "В работе"),
    ("completed", "Завершенные"),
];

#[component]
pub fn RequestList() -> impl IntoView {
    let alerts = use_alerts();

    let state = RwSignal::new(ListState::Loading);
    let stats = RwSignal::new(RequestStats::default());
    let filter = RwSignal::new(StatusFilter::All);
    let search = RwSignal::new(String::new());
    let ticket = StoredValue::new(LoadTicket::default());

    let issue_ticket = move || {
        let mut issued = LoadTicket::default();
        ticket.update_value(|t| issued = t.next());
        issued
    };
    let is_current = move |issued: LoadTicket| ticket.try_get_value() == Some(issued);

    let load = move || {
        let issued = issue_ticket();
        state.set(ListState::Loading);
        let current_filter = filter.get_untracked();
        spawn_local(async move {
            let result = api::load_requests(current_filter).await;
            if !is_current(issued) {
                return;
            }
            match result {
                Ok(items) => {
                    let _ = state.try_set(ListState::Loaded(items));
                }
                Err(e) => {
                    log::error!("Failed to load requests: {}", e);
                    let _ = state.try_set(ListState::Failed(LOAD_ERROR_TEXT.to_string()));
                    alerts.show("Не удалось загрузить заявки");
                }
            }
        });
    };

    let refresh_stats = move || {
        spawn_local(async move {
            let value = match api::get_stats().await {
                Ok(value) => value,
                Err(e) => {
                    log::error!("Failed to load stats: {}", e);
                    RequestStats::default()
                }
            };
            let _ = stats.try_set(value);
        });
    };

    let run_search = move || {
        let query = search.get_untracked();
        if query.trim().is_empty() {
            load();
            return;
        }
        let issued = issue_ticket();
        state.set(ListState::Loading);
        spawn_local(async move {
            let result = api::search_requests(query.trim()).await;
            if !is_current(issued) {
                return;
            }
            match result {
                Ok(items) => {
                    let _ = state.try_set(ListState::Loaded(items));
                }
                Err(e) => {
                    log::error!("Search failed: {}", e);
                    let _ = state.try_set(ListState::Failed(SEARCH_ERROR_TEXT.to_string()));
                    alerts.show("Не удалось выполнить поиск");
                }
            }
        });
    };

    let on_updated = Callback::new(move |updated: Request| {
        state.update(|s| {
            s.replace(updated);
        });
        refresh_stats();
    });

    // Первая загрузка и фоновый опрос
    load();
    refresh_stats();

    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if !alive.load(Ordering::Relaxed) {
                    break;
                }
                load();
                refresh_stats();
            }
        });
    }
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    let filter_value = Signal::derive(move || filter.get().as_str().to_string());
    let on_filter_change = Callback::new(move |value: String| {
        match value.parse::<StatusFilter>() {
            Ok(parsed) => {
                filter.set(parsed);
                load();
            }
            Err(e) => log::warn!("{}", e),
        }
    });

    let list_view = move || match state.get() {
        ListState::Loading => view! { <div class="loading">{LOADING_TEXT}</div> }.into_any(),
        ListState::Failed(message) => view! {
            <div class="error">
                <p>{message}</p>
                <Button
                    variant=ButtonVariant::Secondary
                    on_click=Callback::new(move |_| load())
                >
                    "Повторить"
                </Button>
            </div>
        }
        .into_any(),
        ListState::Loaded(items) if items.is_empty() => {
            view! { <div class="empty">{EMPTY_TEXT}</div> }.into_any()
        }
        ListState::Loaded(items) => view! {
            <For
                each=move || items.clone()
                key=|r| (r.id, r.status, r.metadata.updated_at)
                children=move |request| view! {
                    <RequestCard request=request on_updated=on_updated />
                }
            />
        }
        .into_any(),
    };

    view! {
        <div class="requests-page">
            <StatsPanel stats=Signal::derive(move || stats.get()) />

            <div class="controls">
                <Button id="refresh-btn" on_click=Callback::new(move |_| {
                    load();
                    refresh_stats();
                })>
                    "Обновить"
                </Button>
                <Select
                    id="status-filter"
                    value=filter_value
                    options=FILTER_OPTIONS.to_vec()
                    on_change=on_filter_change
                />
                <SearchInput
                    id="search-input"
                    value=Signal::derive(move || search.get())
                    placeholder="Поиск по имени, телефону или сообщению"
                    on_input=Callback::new(move |v: String| search.set(v))
                    on_enter=Callback::new(move |_| run_search())
                />
                <Button
                    id="search-btn"
                    variant=ButtonVariant::Secondary
                    on_click=Callback::new(move |_| run_search())
                >
                    "Найти"
                </Button>
            </div>

            <div id="requests-list" class="requests-list">
                {list_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_filter_option_parses() {
        for (value, _) in FILTER_OPTIONS {
            assert!(value.parse::<StatusFilter>().is_ok(), "{}", value);
        }
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
    }
}
