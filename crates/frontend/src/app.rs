use crate::domain::a001_request::ui::list::RequestList;
use crate::shared::alert::{AlertHost, AlertService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Уведомления доступны всем компонентам через контекст
    provide_context(AlertService::new());

    view! {
        <div class="container">
            <h1>"Заявки"</h1>
            <RequestList />
        </div>
        <AlertHost />
    }
}
