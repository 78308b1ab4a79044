use serde::{Deserialize, Serialize};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::buttons::types::ButtonStyle;

/// A callback button relative to the menu it lives in.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct CallbackButton {
    pub text: String,
    pub relative_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
}

impl CallbackButton {
    pub fn new(text: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            relative_path: relative_path.into(),
            ..Default::default()
        }
    }

    pub fn callback_data(&self, path: &str) -> String {
        format!("{}{}", path, self.relative_path)
    }
}

/// Turns button rows into a Telegram keyboard. Callback data is `path + relative_path`.
///
/// teloxide's button has no style or custom icon, those stay on the [`CallbackButton`].
pub fn to_inline_keyboard(path: &str, rows: &[Vec<CallbackButton>]) -> InlineKeyboardMarkup {
    let rows = rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|button| InlineKeyboardButton::callback(button.text.clone(), button.callback_data(path)))
                .collect::<Vec<_>>()
        });

    InlineKeyboardMarkup::new(rows)
}
