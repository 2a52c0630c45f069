//! Проверка данных запуска мини-приложения Telegram.
//!
//! Клиент передаёт `window.Telegram.WebApp.initData` в заголовке
//! `Telegram-Init-Data`; сервер сверяет подпись токеном бота.

pub mod init_data;
pub mod middleware;
