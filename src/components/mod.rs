mod button;
mod menu_button;

pub use button::{Button, ButtonManager};
pub use menu_button::{ButtonClass, MenuButton};
