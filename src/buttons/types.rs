use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Success,
    Danger,
}

/// Presentation of a single button. `None` fields fall back to the menu-wide options.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ButtonInfo {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

impl ButtonInfo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_icon(mut self, icon_custom_emoji_id: impl Into<String>) -> Self {
        self.icon_custom_emoji_id = Some(icon_custom_emoji_id.into());
        self
    }
}

/// What a `format_state` override hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatResult {
    Text(String),
    Info(ButtonInfo),
}

impl FormatResult {
    pub fn into_button_info(self) -> ButtonInfo {
        match self {
            FormatResult::Text(text) => ButtonInfo::new(text),
            FormatResult::Info(info) => info,
        }
    }
}

impl From<String> for FormatResult {
    fn from(text: String) -> Self {
        FormatResult::Text(text)
    }
}

impl From<&str> for FormatResult {
    fn from(text: &str) -> Self {
        FormatResult::Text(text.to_string())
    }
}

impl From<ButtonInfo> for FormatResult {
    fn from(info: ButtonInfo) -> Self {
        FormatResult::Info(info)
    }
}

/// What the bot should do once a press was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AfterAction {
    /// Open another menu path.
    Navigate(String),
    /// Render the current menu again.
    Refresh,
    /// Leave the message untouched.
    Keep,
}

impl From<bool> for AfterAction {
    fn from(update: bool) -> Self {
        if update {
            AfterAction::Refresh
        } else {
            AfterAction::Keep
        }
    }
}

impl From<String> for AfterAction {
    fn from(path: String) -> Self {
        AfterAction::Navigate(path)
    }
}

impl From<&str> for AfterAction {
    fn from(path: &str) -> Self {
        AfterAction::Navigate(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_normalizes_to_bare_info() {
        let info = FormatResult::from("News").into_button_info();
        assert_eq!(info, ButtonInfo::new("News"));
        assert!(info.style.is_none() && info.icon_custom_emoji_id.is_none());
    }

    #[test]
    fn test_info_is_kept_as_is() {
        let styled = ButtonInfo::new("News").with_style(ButtonStyle::Danger).with_icon("123");
        let info = FormatResult::from(styled.clone()).into_button_info();
        assert_eq!(info, styled);
    }

    #[test]
    fn test_after_action_conversions() {
        assert_eq!(AfterAction::from(true), AfterAction::Refresh);
        assert_eq!(AfterAction::from(false), AfterAction::Keep);
        assert_eq!(AfterAction::from("/settings/"), AfterAction::Navigate("/settings/".into()));
    }

    #[test]
    fn test_style_serializes_lowercase() {
        let json = serde_json::to_string(&ButtonInfo::new("x").with_style(ButtonStyle::Primary))
            .expect("serialize");
        assert_eq!(json, r#"{"text":"x","style":"primary"}"#);
    }
}
