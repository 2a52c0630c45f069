//! API utilities for frontend-backend communication
//!
//! Backend отдаёт собранный фронтенд сам, поэтому по умолчанию API живёт
//! на том же origin. Для `trunk serve` адрес можно переопределить тегом
//! `<meta name="api-base" content="http://localhost:3000">` в index.html.

use wasm_bindgen::JsCast;

/// Get the base URL for API requests
///
/// # Returns
/// - содержимое `<meta name="api-base">`, если задано
/// - иначе `window.location.origin`
/// - пустая строка вне браузера (относительные URL)
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };

    let from_meta = window
        .document()
        .and_then(|doc| doc.query_selector("meta[name='api-base']").ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
        .filter(|content| !content.trim().is_empty());

    match from_meta {
        Some(base) => normalize_base(&base),
        None => window.location().origin().unwrap_or_default(),
    }
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/requests/stats");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_has_no_trailing_slash() {
        assert_eq!(normalize_base(" http://localhost:3000/ "), "http://localhost:3000");
        assert_eq!(normalize_base("https://desk.example"), "https://desk.example");
    }
}
