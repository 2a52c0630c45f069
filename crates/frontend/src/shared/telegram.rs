//! Мост к `window.Telegram.WebApp`.
//!
//! Объект появляется, только если страница открыта внутри Telegram и
//! подключён `telegram-web-app.js`. Вне Telegram все функции тихо
//! возвращают `None`/`false`.

use contracts::shared::telegram::TelegramUser;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn web_app() -> Option<JsValue> {
    let window = web_sys::window()?;
    let telegram = get(&window, "Telegram")?;
    get(&telegram, "WebApp")
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let function: Function = get(target, method)
        .ok_or_else(|| JsValue::from_str(&format!("{} is not available", method)))?
        .dyn_into()?;
    match args {
        [] => function.call0(target),
        [a] => function.call1(target, a),
        _ => Err(JsValue::from_str("unsupported arity")),
    }
}

/// `ready()`, `expand()`, `enableClosingConfirmation()`
pub fn init() -> bool {
    let Some(app) = web_app() else {
        log::warn!("Telegram WebApp not detected, running in browser mode");
        return false;
    };

    for method in ["ready", "expand", "enableClosingConfirmation"] {
        if let Err(e) = call(&app, method, &[]) {
            log::warn!("Telegram.WebApp.{} failed: {:?}", method, e);
        }
    }
    log::info!("WebApp initialized, user: {:?}", user());
    true
}

/// Сырая строка `initData` для заголовка запроса
pub fn init_data() -> Option<String> {
    web_app()
        .and_then(|app| get(&app, "initData"))
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
}

/// `initDataUnsafe.user`
pub fn user() -> Option<TelegramUser> {
    let unsafe_data = get(&web_app()?, "initDataUnsafe")?;
    let user = get(&unsafe_data, "user")?;
    serde_wasm_bindgen::from_value(user)
        .map_err(|e| log::warn!("Cannot read initDataUnsafe.user: {}", e))
        .ok()
}

pub fn user_id() -> Option<i64> {
    user().map(|u| u.id)
}

/// Нативный алерт Telegram. `false`, если показать не удалось.
pub fn show_alert(message: &str) -> bool {
    let Some(app) = web_app() else {
        return false;
    };
    match call(&app, "showAlert", &[JsValue::from_str(message)]) {
        Ok(_) => true,
        Err(e) => {
            log::error!("Telegram alert failed: {:?}", e);
            false
        }
    }
}
