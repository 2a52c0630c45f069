pub mod badge;
pub mod button;
pub mod input;
pub mod select;

pub use badge::StatusBadge;
pub use button::{Button, ButtonVariant};
pub use input::SearchInput;
pub use select::Select;
