//! Часовой пояс зрителя для форматирования дат

/// Смещение браузера относительно UTC в минутах (восточнее — положительное)
pub fn viewer_offset_minutes() -> i32 {
    // getTimezoneOffset() возвращает UTC − local, т.е. для Москвы −180
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}
