use contracts::domain::a001_request::{RequestStats, RequestStatus};
use leptos::prelude::*;

use crate::shared::components::stat_card::StatCard;

/// Счётчики заявок по статусам
#[component]
pub fn StatsPanel(#[prop(into)] stats: Signal<RequestStats>) -> impl IntoView {
    let count = move |status: RequestStatus| Signal::derive(move || stats.get().get(status));

    view! {
        <div class="stats">
            <StatCard
                label=RequestStatus::New.label()
                modifier="new"
                value=count(RequestStatus::New)
            />
            <StatCard
                label=RequestStatus::InProgress.label()
                modifier="in_progress"
                value=count(RequestStatus::InProgress)
            />
            <StatCard
                label=RequestStatus::Completed.label()
                modifier="completed"
                value=count(RequestStatus::Completed)
            />
        </div>
    }
}
