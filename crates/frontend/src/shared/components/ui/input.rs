use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

/// Поле поиска: `on_input` на каждый ввод, `on_enter` по клавише Enter
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(optional)]
    on_enter: Option<Callback<()>>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <input
            id=move || id.get()
            class="form__input"
            type="search"
            prop:value=move || value.get()
            placeholder=move || placeholder.get().unwrap_or_default()
            on:input=move |ev| {
                if let Some(handler) = on_input {
                    handler.run(event_target_value(&ev));
                }
            }
            on:keydown=move |ev: KeyboardEvent| {
                if ev.key() == "Enter" {
                    if let Some(handler) = on_enter {
                        handler.run(());
                    }
                }
            }
        />
    }
}
