use leptos::prelude::*;

/// `<select>` с фиксированным набором вариантов.
///
/// Значение выставляется через `prop:value`, поэтому откат сигнала
/// (например, после неудачного сохранения) возвращает и DOM.
#[component]
pub fn Select(
    /// Current value
    #[prop(into)]
    value: Signal<String>,
    /// Options: (value, label)
    options: Vec<(&'static str, &'static str)>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <select
            id=move || id.get()
            class=move || format!("form__select {}", additional_class())
            disabled=move || disabled.get().unwrap_or(false)
            prop:value=move || value.get()
            on:change=move |ev| {
                if let Some(handler) = on_change {
                    handler.run(event_target_value(&ev));
                }
            }
        >
            {options
                .into_iter()
                .map(|(val, label)| {
                    view! {
                        <option value=val selected=move || value.get() == val>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
