pub mod format;
pub mod telegram;
