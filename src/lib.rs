//! Paginated multi-select inline keyboards for Telegram bots.
//!
//! A [`SelectButtons`] group renders one toggle button per choice. Each button's
//! callback data carries the state a press switches to, and
//! [`SelectButtons::handle`] turns a press back into a `set` call.

pub mod buttons;
pub mod choices;
pub mod error;
pub mod keyboard;
pub mod prefix;
pub mod resolve;

pub use buttons::{
    generate_select_buttons, parse_select_action, AfterAction, ButtonInfo, ButtonStyle, FormatResult, SelectAction,
    SelectButtons, SelectOptions,
};
pub use choices::{Choice, Choices};
pub use error::ChoiceKeyError;
pub use keyboard::{to_inline_keyboard, CallbackButton};
pub use resolve::ConstOrResolver;
