pub mod card;
pub mod list;
pub mod stats_panel;
