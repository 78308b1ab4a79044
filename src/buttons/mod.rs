pub mod align;
pub mod select;
pub mod types;

pub use select::{
    generate_select_buttons, parse_select_action, select_relative_path, SelectAction, SelectButtons, SelectOptions,
};
pub use types::{AfterAction, ButtonInfo, ButtonStyle, FormatResult};
